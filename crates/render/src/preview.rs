//! Text rendition of the invoice, as shown next to the form.

use core::fmt;

use factura_invoicing::{Invoice, LineItem};

use crate::format::{
    format_date, format_money, format_money_spaced, item_total_cell, price_cell, rate_cell,
    text_or_dash, units_label,
};

/// Name line plus detail lines of a party.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartyBlock {
    pub name: String,
    pub lines: Vec<String>,
}

/// One table row, every cell already formatted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewRow {
    pub client: String,
    pub description: String,
    pub units: String,
    pub price: String,
    pub total: String,
}

impl PreviewRow {
    fn from_item(item: &LineItem) -> Self {
        Self {
            client: text_or_dash(&item.client),
            description: text_or_dash(&item.description),
            units: units_label(item.units, item.is_hourly),
            price: price_cell(item),
            total: item_total_cell(item),
        }
    }

    fn cells(&self, with_client: bool) -> Vec<&str> {
        let mut cells = Vec::with_capacity(5);
        if with_client {
            cells.push(self.client.as_str());
        }
        cells.extend([
            self.description.as_str(),
            self.units.as_str(),
            self.price.as_str(),
            self.total.as_str(),
        ]);
        cells
    }
}

/// Everything the preview and the PDF print, computed once from a snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    pub title: String,
    pub date_line: String,
    pub company: PartyBlock,
    pub worker: PartyBlock,
    /// Whether the per-item client column is shown.
    pub show_client: bool,
    pub rows: Vec<PreviewRow>,
    /// Footer row: "TOTAL", hours, hourly rate, document total.
    pub totals: PreviewRow,
    pub payment_line: String,
    pub bank_account_line: Option<String>,
    pub note_lines: Vec<String>,
    pub amount_due: String,
    /// Salary/items mismatch notice, if any.
    pub warning: Option<String>,
}

pub const COLUMN_CLIENT: &str = "Cliente";
pub const COLUMN_HEADERS: [&str; 4] = ["Proyecto", "Unidades", "Precio/h", "Total"];

fn lines(text: &str) -> impl Iterator<Item = String> + '_ {
    text.lines().map(str::to_string)
}

impl Preview {
    pub fn from_invoice(invoice: &Invoice) -> Self {
        let company = invoice.company();
        let worker = invoice.worker();

        let first_is_hourly = invoice.items().first().is_some_and(|item| item.is_hourly);
        let totals = PreviewRow {
            client: "TOTAL".to_string(),
            description: String::new(),
            units: units_label(invoice.total_units(), first_is_hourly),
            price: rate_cell(invoice.salary().hourly_payment),
            total: format_money(invoice.total()),
        };

        let method = invoice.payment_method();
        let bank_account_line = method
            .uses_bank_account()
            .then(|| format!("Cuenta bancaria: {}", invoice.bank_account()));

        let warning = invoice.discrepancy().map(|d| {
            format!(
                "Advertencia: El total calculado por salario ({}) no coincide con el total de los conceptos ({}).",
                format_money_spaced(d.final_payment),
                format_money_spaced(d.items_total),
            )
        });

        Self {
            title: format!("Factura: {}", invoice.invoice_number()),
            date_line: format!("Fecha: {}", format_date(invoice.date())),
            company: PartyBlock {
                name: company.name.clone(),
                lines: std::iter::once(format!("NIF: {}", company.tax_id))
                    .chain(lines(&company.address))
                    .collect(),
            },
            worker: PartyBlock {
                name: worker.name.clone(),
                lines: std::iter::once(worker.id.clone())
                    .chain(lines(&worker.address))
                    .collect(),
            },
            show_client: invoice.capabilities().client_field,
            rows: invoice.items().iter().map(PreviewRow::from_item).collect(),
            totals,
            payment_line: format!("Forma de pago: {method}"),
            bank_account_line,
            note_lines: lines(invoice.additional_note()).collect(),
            amount_due: format!("Total a pagar: {}", format_money_spaced(invoice.total())),
            warning,
        }
    }

    pub fn headers(&self) -> Vec<&'static str> {
        let mut headers = Vec::with_capacity(5);
        if self.show_client {
            headers.push(COLUMN_CLIENT);
        }
        headers.extend(COLUMN_HEADERS);
        headers
    }

    /// Rows of cells in column order, header first, footer last.
    pub fn table(&self) -> Vec<Vec<&str>> {
        let mut table = vec![self.headers()];
        table.extend(self.rows.iter().map(|row| row.cells(self.show_client)));

        let mut footer = self.totals.cells(self.show_client);
        if !self.show_client {
            // Without a client column the label takes the description cell.
            footer[0] = self.totals.client.as_str();
        }
        table.push(footer);
        table
    }
}

impl fmt::Display for Preview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "{}", self.date_line)?;
        writeln!(f)?;
        writeln!(f, "{}", self.company.name)?;
        for line in &self.company.lines {
            writeln!(f, "{line}")?;
        }
        writeln!(f)?;
        writeln!(f, "{}", self.worker.name)?;
        for line in &self.worker.lines {
            writeln!(f, "{line}")?;
        }
        writeln!(f)?;

        if let Some(warning) = &self.warning {
            writeln!(f, "{warning}")?;
            writeln!(f)?;
        }

        let table = self.table();
        let columns = table[0].len();
        let widths: Vec<usize> = (0..columns)
            .map(|c| table.iter().map(|row| row[c].chars().count()).max().unwrap_or(0))
            .collect();
        // Text columns left-aligned, figures right-aligned.
        let text_columns = columns - 3;
        for row in &table {
            let cells: Vec<String> = row
                .iter()
                .zip(&widths)
                .enumerate()
                .map(|(c, (cell, &width))| {
                    if c < text_columns {
                        format!("{cell:<width$}")
                    } else {
                        format!("{cell:>width$}")
                    }
                })
                .collect();
            writeln!(f, "{}", cells.join(" | ").trim_end())?;
        }
        writeln!(f)?;

        writeln!(f, "{}", self.payment_line)?;
        if let Some(bank) = &self.bank_account_line {
            writeln!(f, "{bank}")?;
        }
        if !self.note_lines.is_empty() {
            writeln!(f)?;
            for line in &self.note_lines {
                writeln!(f, "{line}")?;
            }
        }
        writeln!(f)?;
        write!(f, "{}", self.amount_due)
    }
}
