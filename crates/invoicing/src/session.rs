//! Owning handle for the single invoice edited during a session.
//!
//! Every input event is executed against the current snapshot; on success the
//! snapshot is replaced, on rejection it is left exactly as it was. Events are
//! processed one at a time, to completion.

use chrono::NaiveDate;
use tracing::{debug, info_span, warn};

use factura_core::{Aggregate, AggregateRoot, DocumentId, DomainResult};

use crate::input::FormEvent;
use crate::invoice::{Capabilities, Invoice, InvoiceCommand};

#[derive(Debug, Clone)]
pub struct InvoiceSession {
    current: Invoice,
}

impl InvoiceSession {
    /// Start a session with a blank invoice dated `today`.
    pub fn new(capabilities: Capabilities, today: NaiveDate) -> Self {
        Self::with_invoice(Invoice::new(DocumentId::new(), capabilities, today))
    }

    pub fn with_invoice(invoice: Invoice) -> Self {
        Self { current: invoice }
    }

    /// Read-only view of the current snapshot.
    pub fn snapshot(&self) -> &Invoice {
        &self.current
    }

    pub fn into_invoice(self) -> Invoice {
        self.current
    }

    pub fn dispatch(&mut self, command: InvoiceCommand) -> DomainResult<&Invoice> {
        let span = info_span!(
            "invoice_command",
            document_id = %self.current.id(),
            command = command.name(),
        );
        let _guard = span.enter();

        match self.current.execute(&command) {
            Ok(next) => {
                debug!(
                    version = next.version(),
                    mode = ?next.mode(),
                    total = next.total(),
                    total_units = next.total_units(),
                    "command applied"
                );
                if next.has_discrepancy() && !self.current.has_discrepancy() {
                    warn!(
                        items_total = next.items_total(),
                        final_payment = next.salary().final_payment,
                        "salary total diverges from line items"
                    );
                }
                self.current = next;
                Ok(&self.current)
            }
            Err(err) => {
                warn!(error = %err, "command rejected");
                Err(err)
            }
        }
    }

    /// Translate a raw form event and dispatch it.
    pub fn dispatch_event(&mut self, event: FormEvent) -> DomainResult<&Invoice> {
        let command = event.into_command().inspect_err(|err| {
            warn!(error = %err, "form event rejected");
        })?;
        self.dispatch(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line_item::ItemEdit;
    use factura_core::DomainError;

    fn session() -> InvoiceSession {
        InvoiceSession::new(
            Capabilities::extended(),
            NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
        )
    }

    #[test]
    fn dispatch_replaces_snapshot() {
        let mut session = session();
        session
            .dispatch(InvoiceCommand::EditItem {
                index: 0,
                edit: ItemEdit::Units(2.0),
            })
            .unwrap();
        session
            .dispatch_event(FormEvent::edit("items.0.pricePerUnit", "15"))
            .unwrap();

        assert_eq!(session.snapshot().total(), 30.0);
        assert_eq!(session.snapshot().version(), 2);
    }

    #[test]
    fn rejected_command_leaves_snapshot_untouched() {
        let mut session = session();
        let before = session.snapshot().clone();

        let err = session
            .dispatch(InvoiceCommand::RemoveItem { index: 5 })
            .unwrap_err();
        assert_eq!(err, DomainError::ItemOutOfRange { index: 5, len: 1 });
        assert_eq!(session.snapshot(), &before);

        assert!(session.dispatch_event(FormEvent::edit("bogus", 1)).is_err());
        assert_eq!(session.snapshot(), &before);
    }
}
