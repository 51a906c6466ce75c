//! Raw form events: `(field path, value)` pairs as sent by the form.
//!
//! This is where loosely typed input becomes an [`InvoiceCommand`]. Numeric
//! fields never fail (anything non-numeric reads as `0`); the only rejected
//! inputs are unknown field paths, malformed booleans and unknown payment
//! methods.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use factura_core::{DomainError, DomainResult, coerce_number, parse_flag};

use crate::header::{HeaderEdit, PaymentMethod};
use crate::invoice::InvoiceCommand;
use crate::line_item::ItemEdit;
use crate::salary::SalaryEdit;

/// One discrete user input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum FormEvent {
    /// Set the field at `field` (e.g. `items.0.units`, `company.taxId`).
    Edit { field: String, value: JsonValue },
    AddItem,
    RemoveItem { index: usize },
}

impl FormEvent {
    pub fn edit(field: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        FormEvent::Edit {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn into_command(self) -> DomainResult<InvoiceCommand> {
        match self {
            FormEvent::Edit { field, value } => command_for_field(&field, &value),
            FormEvent::AddItem => Ok(InvoiceCommand::AddItem),
            FormEvent::RemoveItem { index } => Ok(InvoiceCommand::RemoveItem { index }),
        }
    }
}

fn as_text(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        JsonValue::Null => String::new(),
        other => other.to_string(),
    }
}

fn as_number(value: &JsonValue) -> f64 {
    match value {
        JsonValue::Number(n) => n.as_f64().filter(|v| v.is_finite()).unwrap_or(0.0),
        JsonValue::String(s) => coerce_number(s),
        JsonValue::Bool(true) => 1.0,
        _ => 0.0,
    }
}

fn as_flag(field: &str, value: &JsonValue) -> DomainResult<bool> {
    let flag = match value {
        JsonValue::Bool(b) => Some(*b),
        JsonValue::String(s) => parse_flag(s),
        _ => None,
    };
    flag.ok_or_else(|| DomainError::validation(format!("{field}: expected true or false, got {value}")))
}

fn header(edit: HeaderEdit) -> DomainResult<InvoiceCommand> {
    Ok(InvoiceCommand::EditHeader(edit))
}

fn salary(edit: SalaryEdit) -> DomainResult<InvoiceCommand> {
    Ok(InvoiceCommand::EditSalary(edit))
}

/// Translate a field path plus raw value into a typed command.
///
/// Item paths accept both `items.2.units` and `items[2].units`.
pub fn command_for_field(field: &str, value: &JsonValue) -> DomainResult<InvoiceCommand> {
    let normalized = field.trim().replace('[', ".").replace(']', "");
    let segments: Vec<&str> = normalized.split('.').collect();

    match segments.as_slice() {
        ["invoiceNumber"] => header(HeaderEdit::InvoiceNumber(as_text(value))),
        ["date"] => header(HeaderEdit::Date(as_text(value))),
        ["company", "name"] => header(HeaderEdit::CompanyName(as_text(value))),
        ["company", "taxId"] => header(HeaderEdit::CompanyTaxId(as_text(value))),
        ["company", "address"] => header(HeaderEdit::CompanyAddress(as_text(value))),
        ["worker", "name"] => header(HeaderEdit::WorkerName(as_text(value))),
        ["worker", "id"] => header(HeaderEdit::WorkerId(as_text(value))),
        ["worker", "address"] => header(HeaderEdit::WorkerAddress(as_text(value))),
        ["paymentMethod"] => {
            let method: PaymentMethod = as_text(value).parse()?;
            header(HeaderEdit::PaymentMethod(method))
        }
        ["bankAccount"] => header(HeaderEdit::BankAccount(as_text(value))),
        ["additionalNote"] => header(HeaderEdit::AdditionalNote(as_text(value))),

        ["workingDays"] => salary(SalaryEdit::WorkingDays(as_number(value))),
        ["attendedDays"] => salary(SalaryEdit::AttendedDays(as_number(value))),
        ["dailyHours"] => salary(SalaryEdit::DailyHours(as_number(value))),
        ["monthlyPayment"] => salary(SalaryEdit::MonthlyPayment(as_number(value))),
        ["hourlyPayment"] => salary(SalaryEdit::HourlyPayment(as_number(value))),
        ["useSalaryCalculation"] => Ok(InvoiceCommand::SetSalaryMode {
            enabled: as_flag(field, value)?,
        }),

        ["items", index, item_field] => {
            let index: usize = index
                .parse()
                .map_err(|_| DomainError::validation(format!("invalid item index in {field}")))?;
            let edit = match *item_field {
                "client" => ItemEdit::Client(as_text(value)),
                "description" => ItemEdit::Description(as_text(value)),
                "units" => ItemEdit::Units(as_number(value)),
                "pricePerUnit" => ItemEdit::PricePerUnit(as_number(value)),
                "total" => ItemEdit::Total(as_number(value)),
                "isHourly" => ItemEdit::IsHourly(as_flag(field, value)?),
                "manualTotal" => ItemEdit::ManualTotal(as_flag(field, value)?),
                _ => return Err(DomainError::validation(format!("unknown field: {field}"))),
            };
            Ok(InvoiceCommand::EditItem { index, edit })
        }

        _ => Err(DomainError::validation(format!("unknown field: {field}"))),
    }
}
