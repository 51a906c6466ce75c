use serde::{Deserialize, Serialize};

use factura_core::ValueObject;

/// One billable row of the invoice.
///
/// `is_hourly` only changes how units are labelled ("h" suffix); it never
/// takes part in arithmetic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub client: String,
    pub description: String,
    /// Quantity or hours.
    pub units: f64,
    pub price_per_unit: f64,
    /// `units * price_per_unit` unless `manual_total` is set.
    pub total: f64,
    pub is_hourly: bool,
    pub manual_total: bool,
}

impl ValueObject for LineItem {}

impl Default for LineItem {
    fn default() -> Self {
        Self {
            client: String::new(),
            description: String::new(),
            units: 0.0,
            price_per_unit: 0.0,
            total: 0.0,
            is_hourly: true,
            manual_total: false,
        }
    }
}

/// A single field edit on a line item, carrying its typed payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum ItemEdit {
    Client(String),
    Description(String),
    Units(f64),
    PricePerUnit(f64),
    Total(f64),
    IsHourly(bool),
    ManualTotal(bool),
}

impl ItemEdit {
    /// Whether the edit touches the per-item client column.
    pub fn needs_client_field(&self) -> bool {
        matches!(self, ItemEdit::Client(_))
    }
}

impl LineItem {
    /// Product of units and price, the automatic value of `total`.
    pub fn computed_total(&self) -> f64 {
        self.units * self.price_per_unit
    }

    /// Apply one field edit, then restore the auto-total invariant.
    ///
    /// With `manual_total` set, `total` keeps whatever value it holds
    /// (including one supplied by this very edit).
    pub fn apply_edit(&mut self, edit: ItemEdit) {
        match edit {
            ItemEdit::Client(v) => self.client = v,
            ItemEdit::Description(v) => self.description = v,
            ItemEdit::Units(v) => self.units = v,
            ItemEdit::PricePerUnit(v) => self.price_per_unit = v,
            ItemEdit::Total(v) => self.total = v,
            ItemEdit::IsHourly(v) => self.is_hourly = v,
            ItemEdit::ManualTotal(v) => self.manual_total = v,
        }

        if !self.manual_total {
            self.total = self.computed_total();
        }
    }
}

/// Sum of item totals.
pub fn items_total(items: &[LineItem]) -> f64 {
    items.iter().map(|item| item.total).sum()
}

/// Sum of item units.
pub fn items_units(items: &[LineItem]) -> f64 {
    items.iter().map(|item| item.units).sum()
}
