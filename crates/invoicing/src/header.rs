//! Identity, parties and payment details: opaque text with no derived behavior.

use serde::{Deserialize, Serialize};

use factura_core::{DomainError, ValueObject};

/// Issuing company.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub name: String,
    pub tax_id: String,
    pub address: String,
}

impl ValueObject for Company {}

/// Worker the invoice is issued by.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Worker {
    pub name: String,
    pub id: String,
    pub address: String,
}

impl ValueObject for Worker {}

/// How the invoice is to be paid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[default]
    Transferencia,
    Efectivo,
    Cheque,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Transferencia => "Transferencia",
            PaymentMethod::Efectivo => "Efectivo",
            PaymentMethod::Cheque => "Cheque",
        }
    }

    /// Bank account details only apply to transfers.
    pub fn uses_bank_account(&self) -> bool {
        matches!(self, PaymentMethod::Transferencia)
    }
}

impl core::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for PaymentMethod {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Transferencia" => Ok(PaymentMethod::Transferencia),
            "Efectivo" => Ok(PaymentMethod::Efectivo),
            "Cheque" => Ok(PaymentMethod::Cheque),
            other => Err(DomainError::validation(format!(
                "unknown payment method: {other}"
            ))),
        }
    }
}

/// Edit of a document-level text field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum HeaderEdit {
    InvoiceNumber(String),
    /// Calendar date in ISO form (`YYYY-MM-DD`).
    Date(String),
    CompanyName(String),
    CompanyTaxId(String),
    CompanyAddress(String),
    WorkerName(String),
    WorkerId(String),
    WorkerAddress(String),
    PaymentMethod(PaymentMethod),
    BankAccount(String),
    AdditionalNote(String),
}
