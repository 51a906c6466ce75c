//! Invoice computation model.
//!
//! Keeps line-item totals, document totals and the optional salary-based
//! payment figures consistent while the user edits the invoice. Pure
//! deterministic domain logic (no IO, no rendering); every rule takes a
//! snapshot and returns the next one.

pub mod header;
pub mod input;
pub mod invoice;
pub mod line_item;
pub mod salary;
pub mod session;

pub use header::{Company, HeaderEdit, PaymentMethod, Worker};
pub use input::{FormEvent, command_for_field};
pub use invoice::{
    Capabilities, DISCREPANCY_TOLERANCE, Discrepancy, Invoice, InvoiceCommand, TotalsMode,
};
pub use line_item::{ItemEdit, LineItem};
pub use salary::{SalaryEdit, SalaryTerms, Settlement};
pub use session::InvoiceSession;
