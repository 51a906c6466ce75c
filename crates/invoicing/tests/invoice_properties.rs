//! Property tests for the invoice computation rules.

use chrono::NaiveDate;
use proptest::prelude::*;

use factura_core::DocumentId;
use factura_invoicing::{
    Capabilities, Invoice, ItemEdit, LineItem, SalaryEdit, TotalsMode,
};

fn blank() -> Invoice {
    Invoice::new(
        DocumentId::new(),
        Capabilities::extended(),
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
    )
}

#[derive(Debug, Clone)]
enum Step {
    Units(usize, f64),
    Price(usize, f64),
    Total(usize, f64),
    Manual(usize, bool),
    Hourly(usize, bool),
    Add,
    Remove(usize),
}

fn amount() -> impl Strategy<Value = f64> {
    (0u32..100_000).prop_map(|cents| f64::from(cents) / 100.0)
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        (0usize..6, amount()).prop_map(|(i, v)| Step::Units(i, v)),
        (0usize..6, amount()).prop_map(|(i, v)| Step::Price(i, v)),
        (0usize..6, amount()).prop_map(|(i, v)| Step::Total(i, v)),
        (0usize..6, any::<bool>()).prop_map(|(i, v)| Step::Manual(i, v)),
        (0usize..6, any::<bool>()).prop_map(|(i, v)| Step::Hourly(i, v)),
        Just(Step::Add),
        (0usize..6).prop_map(Step::Remove),
    ]
}

/// Apply a step, wrapping the index onto the current list.
fn run(invoice: Invoice, step: &Step) -> Invoice {
    let len = invoice.items().len();
    let (index, edit) = match *step {
        Step::Units(i, v) => (i, ItemEdit::Units(v)),
        Step::Price(i, v) => (i, ItemEdit::PricePerUnit(v)),
        Step::Total(i, v) => (i, ItemEdit::Total(v)),
        Step::Manual(i, v) => (i, ItemEdit::ManualTotal(v)),
        Step::Hourly(i, v) => (i, ItemEdit::IsHourly(v)),
        Step::Add => return invoice.add_item(),
        Step::Remove(i) => return invoice.remove_item(i % len).unwrap(),
    };
    invoice.apply_item_edit(index % len, edit).unwrap()
}

fn sum_totals(items: &[LineItem]) -> f64 {
    items.iter().map(|i| i.total).sum()
}

fn sum_units(items: &[LineItem]) -> f64 {
    items.iter().map(|i| i.units).sum()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    })]

    /// Property: auto items always satisfy total == units * price, and in
    /// item-driven mode the document totals equal the item sums.
    #[test]
    fn item_driven_totals_track_items(steps in prop::collection::vec(step(), 1..40)) {
        let mut invoice = blank();
        for s in &steps {
            invoice = run(invoice, s);

            prop_assert!(!invoice.items().is_empty());
            for item in invoice.items() {
                if !item.manual_total {
                    prop_assert_eq!(item.total, item.units * item.price_per_unit);
                }
            }
            prop_assert_eq!(invoice.mode(), TotalsMode::ItemDriven);
            prop_assert_eq!(invoice.total(), sum_totals(invoice.items()));
            prop_assert_eq!(invoice.total_units(), sum_units(invoice.items()));
        }
    }

    /// Property: a manual total is immune to unit and price edits.
    #[test]
    fn manual_total_is_sticky(
        manual in amount(),
        edits in prop::collection::vec((any::<bool>(), amount()), 1..20)
    ) {
        let mut invoice = blank()
            .apply_item_edit(0, ItemEdit::ManualTotal(true)).unwrap()
            .apply_item_edit(0, ItemEdit::Total(manual)).unwrap();

        for (is_units, v) in edits {
            let edit = if is_units { ItemEdit::Units(v) } else { ItemEdit::PricePerUnit(v) };
            invoice = invoice.apply_item_edit(0, edit).unwrap();
            prop_assert_eq!(invoice.items()[0].total, manual);
        }
    }

    /// Property: item mutations never move totals while salary mode owns them.
    #[test]
    fn salary_mode_owns_totals(steps in prop::collection::vec(step(), 1..30)) {
        let mut invoice = blank()
            .apply_salary_edit(SalaryEdit::WorkingDays(20.0))
            .apply_salary_edit(SalaryEdit::DailyHours(8.0))
            .apply_salary_edit(SalaryEdit::HourlyPayment(12.0))
            .apply_salary_edit(SalaryEdit::AttendedDays(15.0))
            .set_salary_mode(true);
        let total = invoice.total();
        let units = invoice.total_units();
        prop_assert_eq!(total, 12.0 * 15.0 * 8.0);
        prop_assert_eq!(units, 120.0);

        for s in &steps {
            invoice = run(invoice, s);
            prop_assert_eq!(invoice.total(), total);
            prop_assert_eq!(invoice.total_units(), units);
        }

        let back = invoice.clone().set_salary_mode(false);
        prop_assert_eq!(back.total(), sum_totals(invoice.items()));
        prop_assert_eq!(back.total_units(), sum_units(invoice.items()));
    }

    /// Property: adding a row never changes the totals until it is edited.
    #[test]
    fn adding_blank_rows_is_neutral(units in amount(), price in amount(), extra in 1usize..5) {
        let mut invoice = blank()
            .apply_item_edit(0, ItemEdit::Units(units)).unwrap()
            .apply_item_edit(0, ItemEdit::PricePerUnit(price)).unwrap();
        let (total, total_units) = (invoice.total(), invoice.total_units());

        for _ in 0..extra {
            invoice = invoice.add_item();
        }
        prop_assert_eq!(invoice.items().len(), extra + 1);
        prop_assert_eq!(invoice.total(), total);
        prop_assert_eq!(invoice.total_units(), total_units);
    }
}

#[test]
fn toggling_salary_mode_adopts_final_payment() {
    // finalPayment 120 from 10 attended days of 8 hours at 1.5/h.
    let invoice = blank()
        .apply_item_edit(0, ItemEdit::Units(1.0))
        .unwrap()
        .apply_item_edit(0, ItemEdit::PricePerUnit(30.0))
        .unwrap()
        .apply_salary_edit(SalaryEdit::WorkingDays(20.0))
        .apply_salary_edit(SalaryEdit::DailyHours(8.0))
        .apply_salary_edit(SalaryEdit::HourlyPayment(1.5))
        .apply_salary_edit(SalaryEdit::AttendedDays(10.0));
    assert_eq!(invoice.salary().final_payment, 120.0);
    assert_eq!(invoice.total(), 30.0);

    let on = invoice.set_salary_mode(true);
    assert_eq!(on.total(), 120.0);
    assert_eq!(on.total_units(), 80.0);

    let off = on.set_salary_mode(false);
    assert_eq!(off.total(), 30.0);
    assert_eq!(off.total_units(), 1.0);
}

#[test]
fn salary_sequence_from_monthly_rate() {
    let invoice = blank()
        .apply_salary_edit(SalaryEdit::WorkingDays(20.0))
        .apply_salary_edit(SalaryEdit::DailyHours(8.0))
        .apply_salary_edit(SalaryEdit::MonthlyPayment(1600.0));
    assert_eq!(invoice.salary().hourly_payment, 10.0);

    let invoice = invoice.apply_salary_edit(SalaryEdit::AttendedDays(18.0));
    assert_eq!(invoice.salary().final_payment, 1440.0);
    assert_eq!(invoice.total_units(), 144.0);
}

#[test]
fn changing_schedule_first_needs_a_rate_edit_to_repropagate() {
    let invoice = blank()
        .apply_salary_edit(SalaryEdit::MonthlyPayment(1600.0))
        .apply_salary_edit(SalaryEdit::WorkingDays(20.0))
        .apply_salary_edit(SalaryEdit::DailyHours(8.0))
        .apply_salary_edit(SalaryEdit::AttendedDays(18.0));
    assert_eq!(invoice.salary().hourly_payment, 0.0);
    assert_eq!(invoice.salary().final_payment, 0.0);

    let invoice = invoice.apply_salary_edit(SalaryEdit::MonthlyPayment(1600.0));
    assert_eq!(invoice.salary().hourly_payment, 10.0);
    assert_eq!(invoice.salary().final_payment, 1440.0);
}

/// Salary result of 150.00 (or 100.005) against items summing to 100.00.
fn with_final_payment(hourly: f64) -> Invoice {
    blank()
        .apply_item_edit(0, ItemEdit::Units(4.0))
        .unwrap()
        .apply_item_edit(0, ItemEdit::PricePerUnit(25.0))
        .unwrap()
        .apply_salary_edit(SalaryEdit::WorkingDays(1.0))
        .apply_salary_edit(SalaryEdit::DailyHours(1.0))
        .apply_salary_edit(SalaryEdit::AttendedDays(1.0))
        .apply_salary_edit(SalaryEdit::HourlyPayment(hourly))
        .set_salary_mode(true)
}

#[test]
fn discrepancy_beyond_a_cent_is_flagged() {
    let invoice = with_final_payment(150.0);
    assert_eq!(invoice.salary().final_payment, 150.0);
    assert!(invoice.has_discrepancy());
}

#[test]
fn discrepancy_within_a_cent_is_tolerated() {
    let invoice = with_final_payment(100.005);
    assert_eq!(invoice.salary().final_payment, 100.005);
    assert!(!invoice.has_discrepancy());
}
