//! Salary-based payment parameters and their derivation rules.

use serde::{Deserialize, Serialize};

use factura_core::ValueObject;

/// Salary parameters of the invoice. Every field starts at zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SalaryTerms {
    pub working_days: f64,
    pub attended_days: f64,
    pub daily_hours: f64,
    pub monthly_payment: f64,
    pub hourly_payment: f64,
    /// Derived; never edited directly.
    pub final_payment: f64,
}

impl ValueObject for SalaryTerms {}

/// Edit of one salary input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum SalaryEdit {
    WorkingDays(f64),
    AttendedDays(f64),
    DailyHours(f64),
    MonthlyPayment(f64),
    HourlyPayment(f64),
}

/// Result of a successful final-payment derivation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settlement {
    pub final_payment: f64,
    /// Hours actually worked: attended days times daily hours.
    pub units: f64,
}

fn positive(value: f64) -> Option<f64> {
    (value > 0.0).then_some(value)
}

fn nonzero(value: f64) -> Option<f64> {
    (value != 0.0 && !value.is_nan()).then_some(value)
}

impl SalaryTerms {
    /// Assign the edited field and cross-derive the paired rate.
    ///
    /// Rates are only re-synchronised when one of them is the edited field;
    /// changing days or hours alone leaves both rates as they were.
    pub fn apply_edit(&mut self, edit: SalaryEdit) -> Option<Settlement> {
        let schedule = positive(self.working_days).zip(positive(self.daily_hours));

        match edit {
            SalaryEdit::WorkingDays(v) => self.working_days = v,
            SalaryEdit::AttendedDays(v) => self.attended_days = v,
            SalaryEdit::DailyHours(v) => self.daily_hours = v,
            SalaryEdit::MonthlyPayment(v) => {
                self.monthly_payment = v;
                if let Some((days, hours)) = schedule {
                    self.hourly_payment = v / (days * hours);
                }
            }
            SalaryEdit::HourlyPayment(v) => {
                self.hourly_payment = v;
                if let Some((days, hours)) = schedule {
                    self.monthly_payment = v * days * hours;
                }
            }
        }

        let settlement = self.settlement()?;
        self.final_payment = settlement.final_payment;
        Some(settlement)
    }

    /// Final payment for the attended days, if every input is usable.
    ///
    /// Requires positive working days, hourly rate and daily hours. Attended
    /// days may be zero, which settles to a zero payment.
    pub fn settlement(&self) -> Option<Settlement> {
        positive(self.working_days)?;
        let hourly = positive(self.hourly_payment)?;
        let hours = positive(self.daily_hours)?;
        let attended = self.attended_days;

        Some(Settlement {
            final_payment: hourly * attended * hours,
            units: attended * hours,
        })
    }

    /// Final payment worth adopting when salary mode is switched on (non-zero).
    pub fn adoptable_payment(&self) -> Option<f64> {
        nonzero(self.final_payment)
    }

    /// Attended hours when both factors are non-zero, used when salary mode is switched on.
    pub fn attended_hours(&self) -> Option<f64> {
        nonzero(self.attended_days)
            .zip(nonzero(self.daily_hours))
            .map(|(days, hours)| days * hours)
    }
}
