use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use factura_core::{Aggregate, AggregateRoot, DocumentId, DomainError, DomainResult};

use crate::header::{Company, HeaderEdit, PaymentMethod, Worker};
use crate::line_item::{ItemEdit, LineItem, items_total, items_units};
use crate::salary::{SalaryEdit, SalaryTerms};

/// Largest gap between item sum and salary result that is still considered a match.
pub const DISCREPANCY_TOLERANCE: f64 = 0.01;

/// Optional parts of the model.
///
/// The simple invoice has neither per-item clients nor salary mode; the
/// extended invoice has both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Capabilities {
    pub salary_mode: bool,
    pub client_field: bool,
}

impl Capabilities {
    pub fn extended() -> Self {
        Self {
            salary_mode: true,
            client_field: true,
        }
    }

    pub fn simple() -> Self {
        Self {
            salary_mode: false,
            client_field: false,
        }
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::extended()
    }
}

/// Which computation currently owns `total` / `total_units`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TotalsMode {
    ItemDriven,
    SalaryDriven,
}

/// Advisory mismatch between the item sum and the salary result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Discrepancy {
    pub items_total: f64,
    pub final_payment: f64,
}

/// Aggregate root: Invoice.
///
/// Invariants:
/// - `items` is never empty.
/// - every item without `manual_total` has `total == units * price_per_unit`.
/// - in item-driven mode `total`/`total_units` are the item sums; in
///   salary-driven mode they are owned by the salary rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    id: DocumentId,
    version: u64,
    capabilities: Capabilities,
    invoice_number: String,
    date: String,
    company: Company,
    worker: Worker,
    items: Vec<LineItem>,
    payment_method: PaymentMethod,
    bank_account: String,
    additional_note: String,
    total: f64,
    total_units: f64,
    #[serde(flatten)]
    salary: SalaryTerms,
    use_salary_calculation: bool,
}

impl Invoice {
    /// A blank invoice dated `date`, holding one default line item.
    pub fn new(id: DocumentId, capabilities: Capabilities, date: NaiveDate) -> Self {
        Self {
            id,
            version: 0,
            capabilities,
            invoice_number: String::new(),
            date: date.format("%Y-%m-%d").to_string(),
            company: Company::default(),
            worker: Worker::default(),
            items: vec![LineItem::default()],
            payment_method: PaymentMethod::default(),
            bank_account: String::new(),
            additional_note: String::new(),
            total: 0.0,
            total_units: 0.0,
            salary: SalaryTerms::default(),
            use_salary_calculation: false,
        }
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    pub fn invoice_number(&self) -> &str {
        &self.invoice_number
    }

    /// ISO calendar date (`YYYY-MM-DD`) as entered.
    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn company(&self) -> &Company {
        &self.company
    }

    pub fn worker(&self) -> &Worker {
        &self.worker
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    pub fn bank_account(&self) -> &str {
        &self.bank_account
    }

    pub fn additional_note(&self) -> &str {
        &self.additional_note
    }

    /// Authoritative document total.
    pub fn total(&self) -> f64 {
        self.total
    }

    /// Authoritative unit (hour) count.
    pub fn total_units(&self) -> f64 {
        self.total_units
    }

    pub fn salary(&self) -> &SalaryTerms {
        &self.salary
    }

    pub fn use_salary_calculation(&self) -> bool {
        self.use_salary_calculation
    }

    pub fn mode(&self) -> TotalsMode {
        if self.use_salary_calculation {
            TotalsMode::SalaryDriven
        } else {
            TotalsMode::ItemDriven
        }
    }

    /// Sum of item totals, regardless of mode.
    pub fn items_total(&self) -> f64 {
        items_total(&self.items)
    }

    /// Sum of item units, regardless of mode.
    pub fn items_units(&self) -> f64 {
        items_units(&self.items)
    }

    /// Reassign document totals from the items, unless salary mode owns them.
    fn sync_item_totals(&mut self) {
        if self.mode() == TotalsMode::ItemDriven {
            self.total = self.items_total();
            self.total_units = self.items_units();
        }
    }

    fn ensure_index(&self, index: usize) -> DomainResult<()> {
        if index >= self.items.len() {
            return Err(DomainError::item_out_of_range(index, self.items.len()));
        }
        Ok(())
    }

    /// Replace a header text field. No derived values depend on these.
    pub fn apply_header_edit(mut self, edit: HeaderEdit) -> Self {
        match edit {
            HeaderEdit::InvoiceNumber(v) => self.invoice_number = v,
            HeaderEdit::Date(v) => self.date = v,
            HeaderEdit::CompanyName(v) => self.company.name = v,
            HeaderEdit::CompanyTaxId(v) => self.company.tax_id = v,
            HeaderEdit::CompanyAddress(v) => self.company.address = v,
            HeaderEdit::WorkerName(v) => self.worker.name = v,
            HeaderEdit::WorkerId(v) => self.worker.id = v,
            HeaderEdit::WorkerAddress(v) => self.worker.address = v,
            HeaderEdit::PaymentMethod(v) => self.payment_method = v,
            HeaderEdit::BankAccount(v) => self.bank_account = v,
            HeaderEdit::AdditionalNote(v) => self.additional_note = v,
        }
        self
    }

    /// Edit one field of `items[index]`, then recompute that item and the item sums.
    pub fn apply_item_edit(mut self, index: usize, edit: ItemEdit) -> DomainResult<Self> {
        self.ensure_index(index)?;
        self.items[index].apply_edit(edit);
        self.sync_item_totals();
        Ok(self)
    }

    /// Append a blank item. Totals are unchanged since the new row contributes zero.
    pub fn add_item(mut self) -> Self {
        self.items.push(LineItem::default());
        self
    }

    /// Delete `items[index]`; the last remaining row is replaced by a blank one.
    pub fn remove_item(mut self, index: usize) -> DomainResult<Self> {
        self.ensure_index(index)?;
        self.items.remove(index);
        if self.items.is_empty() {
            self.items.push(LineItem::default());
        }
        self.sync_item_totals();
        Ok(self)
    }

    /// Edit a salary input and re-derive rates, final payment and hours.
    ///
    /// When the final payment cannot be derived the previous `final_payment`
    /// and `total_units` are kept. Never touches `items`.
    pub fn apply_salary_edit(mut self, edit: SalaryEdit) -> Self {
        if let Some(settlement) = self.salary.apply_edit(edit) {
            self.total_units = settlement.units;
        }
        if self.use_salary_calculation {
            self.total = self.salary.final_payment;
        }
        self
    }

    /// Switch which computation owns `total` / `total_units`.
    ///
    /// Enabling adopts the salary result only if it is non-zero; otherwise the
    /// item-derived totals stay until the next salary edit. Disabling always
    /// recomputes from the items. Salary inputs are kept either way.
    pub fn set_salary_mode(mut self, enabled: bool) -> Self {
        self.use_salary_calculation = enabled;

        if enabled {
            if let Some(final_payment) = self.salary.adoptable_payment() {
                self.total = final_payment;
                if let Some(hours) = self.salary.attended_hours() {
                    self.total_units = hours;
                }
            }
        } else {
            self.sync_item_totals();
        }
        self
    }

    /// The item sum and salary result disagree by more than a cent while salary mode is on.
    pub fn has_discrepancy(&self) -> bool {
        self.discrepancy().is_some()
    }

    pub fn discrepancy(&self) -> Option<Discrepancy> {
        if !self.use_salary_calculation {
            return None;
        }
        let final_payment = self.salary.final_payment;
        let items_total = self.items_total();

        ((items_total - final_payment).abs() > DISCREPANCY_TOLERANCE).then_some(Discrepancy {
            items_total,
            final_payment,
        })
    }
}

impl AggregateRoot for Invoice {
    type Id = DocumentId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Every edit the form can send, with a typed payload per field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum InvoiceCommand {
    EditHeader(HeaderEdit),
    EditItem { index: usize, edit: ItemEdit },
    AddItem,
    RemoveItem { index: usize },
    EditSalary(SalaryEdit),
    SetSalaryMode { enabled: bool },
}

impl InvoiceCommand {
    pub fn name(&self) -> &'static str {
        match self {
            InvoiceCommand::EditHeader(_) => "edit_header",
            InvoiceCommand::EditItem { .. } => "edit_item",
            InvoiceCommand::AddItem => "add_item",
            InvoiceCommand::RemoveItem { .. } => "remove_item",
            InvoiceCommand::EditSalary(_) => "edit_salary",
            InvoiceCommand::SetSalaryMode { .. } => "set_salary_mode",
        }
    }
}

impl Invoice {
    fn ensure_supported(&self, command: &InvoiceCommand) -> DomainResult<()> {
        match command {
            InvoiceCommand::EditItem { edit, .. }
                if edit.needs_client_field() && !self.capabilities.client_field =>
            {
                Err(DomainError::validation(
                    "per-item client is not enabled for this invoice",
                ))
            }
            InvoiceCommand::EditSalary(_) | InvoiceCommand::SetSalaryMode { enabled: true }
                if !self.capabilities.salary_mode =>
            {
                Err(DomainError::validation(
                    "salary calculation is not enabled for this invoice",
                ))
            }
            _ => Ok(()),
        }
    }
}

impl Aggregate for Invoice {
    type Command = InvoiceCommand;
    type Error = DomainError;

    fn execute(&self, command: &Self::Command) -> Result<Self, Self::Error> {
        self.ensure_supported(command)?;

        let current = self.clone();
        let mut next = match command.clone() {
            InvoiceCommand::EditHeader(edit) => current.apply_header_edit(edit),
            InvoiceCommand::EditItem { index, edit } => current.apply_item_edit(index, edit)?,
            InvoiceCommand::AddItem => current.add_item(),
            InvoiceCommand::RemoveItem { index } => current.remove_item(index)?,
            InvoiceCommand::EditSalary(edit) => current.apply_salary_edit(edit),
            InvoiceCommand::SetSalaryMode { enabled } => current.set_salary_mode(enabled),
        };

        // Deterministic version tracking: +1 per executed command.
        next.version += 1;
        Ok(next)
    }
}
