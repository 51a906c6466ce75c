//! Formatting rules shared by the preview and the PDF.

use chrono::NaiveDate;

use factura_invoicing::LineItem;

pub const DASH: &str = "-";

/// `YYYY-MM-DD` → `DD-MM-YYYY`. Empty stays empty; anything that is not an
/// ISO date is shown as typed.
pub fn format_date(iso: &str) -> String {
    let trimmed = iso.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    match NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        Ok(date) => date.format("%d-%m-%Y").to_string(),
        Err(_) => iso.to_string(),
    }
}

/// Fixed two decimals, exact halves rounded away from zero (`12.125` → `12.13`).
///
/// `{:.2}` alone rounds exact binary halves to even. The only values sitting
/// exactly on a cent boundary are odd multiples of 1/8, so those are rounded
/// by hand; everything else already formats to the nearest cent.
pub fn format_amount(value: f64) -> String {
    let eighths = value * 8.0;
    if eighths.fract() == 0.0 && eighths % 2.0 != 0.0 {
        format!("{:.2}", (value * 100.0).round() / 100.0)
    } else {
        format!("{value:.2}")
    }
}

/// Table cell currency: `12.50€`.
pub fn format_money(value: f64) -> String {
    format!("{}€", format_amount(value))
}

/// Sentence currency: `12.50 €`.
pub fn format_money_spaced(value: f64) -> String {
    format!("{} €", format_amount(value))
}

/// Shortest decimal form (`8`, `7.5`).
pub fn format_quantity(value: f64) -> String {
    value.to_string()
}

/// Units with the hour suffix, or a dash when there are none.
pub fn units_label(units: f64, is_hourly: bool) -> String {
    if units > 0.0 {
        let suffix = if is_hourly { "h" } else { "" };
        format!("{}{suffix}", format_quantity(units))
    } else {
        DASH.to_string()
    }
}

pub fn price_cell(item: &LineItem) -> String {
    if item.price_per_unit > 0.0 {
        format_money(item.price_per_unit)
    } else {
        DASH.to_string()
    }
}

/// Item total, shown only when both units and price are set.
pub fn item_total_cell(item: &LineItem) -> String {
    if item.units > 0.0 && item.price_per_unit > 0.0 {
        format_money(item.total)
    } else {
        DASH.to_string()
    }
}

pub fn rate_cell(hourly_payment: f64) -> String {
    if hourly_payment > 0.0 {
        format_money(hourly_payment)
    } else {
        DASH.to_string()
    }
}

pub fn text_or_dash(text: &str) -> String {
    if text.is_empty() {
        DASH.to_string()
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(units: f64, price: f64, total: f64, is_hourly: bool) -> LineItem {
        LineItem {
            units,
            price_per_unit: price,
            total,
            is_hourly,
            ..LineItem::default()
        }
    }

    #[test]
    fn dates() {
        assert_eq!(format_date("2025-01-31"), "31-01-2025");
        assert_eq!(format_date("2024-12-05"), "05-12-2024");
        assert_eq!(format_date(""), "");
        assert_eq!(format_date("mañana"), "mañana");
    }

    #[test]
    fn money() {
        assert_eq!(format_money(1440.0), "1440.00€");
        assert_eq!(format_money(12.5), "12.50€");
        assert_eq!(format_money_spaced(0.0), "0.00 €");
    }

    #[test]
    fn half_cents_round_up() {
        // Half an hour at 24.25/h.
        assert_eq!(format_money(0.5 * 24.25), "12.13€");
        assert_eq!(format_money_spaced(0.125), "0.13 €");
        assert_eq!(format_amount(0.625), "0.63");
        assert_eq!(format_amount(0.375), "0.38");
        assert_eq!(format_amount(-12.125), "-12.13");
        // Not an exact half once stored as binary.
        assert_eq!(format_amount(1.005), "1.00");
        assert_eq!(format_amount(100.005), "100.00");
    }

    #[test]
    fn unit_labels() {
        assert_eq!(units_label(8.0, true), "8h");
        assert_eq!(units_label(7.5, false), "7.5");
        assert_eq!(units_label(0.0, true), "-");
        assert_eq!(units_label(-1.0, true), "-");
    }

    #[test]
    fn dash_when_units_or_price_missing() {
        assert_eq!(price_cell(&item(0.0, 0.0, 0.0, true)), "-");
        assert_eq!(item_total_cell(&item(3.0, 0.0, 0.0, true)), "-");
        assert_eq!(item_total_cell(&item(0.0, 10.0, 0.0, true)), "-");
        assert_eq!(price_cell(&item(0.0, 10.0, 0.0, true)), "10.00€");
        assert_eq!(item_total_cell(&item(3.0, 10.0, 30.0, true)), "30.00€");
    }

    #[test]
    fn item_total_cell_prints_the_model_total() {
        // A manual total is what the model says the row is worth.
        assert_eq!(item_total_cell(&item(3.0, 10.0, 25.0, false)), "25.00€");
    }

    #[test]
    fn rate() {
        assert_eq!(rate_cell(0.0), "-");
        assert_eq!(rate_cell(-3.0), "-");
        assert_eq!(rate_cell(10.0), "10.00€");
    }
}
