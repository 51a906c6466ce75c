//! PDF export.
//!
//! Page geometry follows an A4 sheet with 20 mm margins, measured from the
//! top edge; every string placed on the page comes from [`Preview`].

use std::io::BufWriter;

use printpdf::{
    BuiltinFont, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
    Point,
};
use tracing::debug;

use factura_invoicing::Invoice;

use crate::error::RenderError;
use crate::preview::Preview;

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 20.0;
const ROW_HEIGHT: f32 = 10.0;
const LINE_HEIGHT: f32 = 5.0;
const TABLE_TOP: f32 = MARGIN + 100.0;
/// Rows must start above this line; later rows move to the next page.
const ROWS_LIMIT: f32 = 255.0;
const AMOUNT_DUE_Y: f32 = 270.0;
const PT_TO_MM: f32 = 0.3528;

/// The exported document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPdf {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Download name: `factura-<invoiceNumber>.pdf`.
pub fn pdf_file_name(invoice: &Invoice) -> String {
    format!("factura-{}.pdf", invoice.invoice_number())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Right,
}

/// Where a table row lands: page number (0-based) and distance from the top edge.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Slot {
    page: usize,
    y: f32,
}

/// Lay out `rows` table rows starting at `TABLE_TOP + ROW_HEIGHT`.
fn row_slots(rows: usize) -> Vec<Slot> {
    let mut slots = Vec::with_capacity(rows);
    let mut page = 0;
    let mut y = TABLE_TOP + ROW_HEIGHT;
    for _ in 0..rows {
        if y > ROWS_LIMIT {
            page += 1;
            y = MARGIN + ROW_HEIGHT;
        }
        slots.push(Slot { page, y });
        y += ROW_HEIGHT;
    }
    slots
}

/// Helvetica advance widths in thousandths of an em.
///
/// Builtin fonts carry no metrics, so the glyphs that show up in amounts and
/// labels are listed; anything else falls back to a typical lowercase width.
fn glyph_width(c: char) -> u16 {
    match c {
        '0'..='9' | '€' | '$' | '_' => 556,
        ' ' | '.' | ',' | ':' | ';' | '!' | '/' | '\\' | 'I' => 278,
        'i' | 'j' | 'l' => 222,
        'f' | 't' => 278,
        '-' | '(' | ')' | 'r' => 333,
        'm' => 833,
        'w' => 722,
        'c' | 'k' | 's' | 'v' | 'x' | 'y' | 'z' | 'J' => 500,
        'M' => 833,
        'W' => 944,
        'C' | 'D' | 'H' | 'N' | 'R' | 'U' => 722,
        'G' | 'O' | 'Q' => 778,
        'F' | 'T' | 'Z' => 611,
        c if c.is_uppercase() => 667,
        _ => 556,
    }
}

fn text_width(text: &str, size: f32) -> f32 {
    let em: u32 = text.chars().map(|c| u32::from(glyph_width(c))).sum();
    em as f32 / 1000.0 * size * PT_TO_MM
}

struct Canvas {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    page: usize,
}

impl Canvas {
    fn new(title: &str) -> Result<Self, RenderError> {
        let (doc, page, layer) =
            PdfDocument::new(title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
        let layer = doc.get_page(page).get_layer(layer);
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| RenderError::Pdf(e.to_string()))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| RenderError::Pdf(e.to_string()))?;

        Ok(Self {
            doc,
            layer,
            regular,
            bold,
            page: 0,
        })
    }

    fn next_page(&mut self) {
        let (page, layer) =
            self.doc
                .add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), format!("Layer {}", self.page + 2));
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.page += 1;
    }

    fn ensure_page(&mut self, page: usize) {
        while self.page < page {
            self.next_page();
        }
    }

    fn text(&self, text: &str, size: f32, bold: bool, x: f32, y: f32, align: Align) {
        if text.is_empty() {
            return;
        }
        let font = if bold { &self.bold } else { &self.regular };
        let x = match align {
            Align::Left => x,
            Align::Right => x - text_width(text, size),
        };
        self.layer
            .use_text(text, size, Mm(x), Mm(PAGE_HEIGHT - y), font);
    }

    fn rule(&self, y: f32) {
        let y = Mm(PAGE_HEIGHT - y);
        self.layer.add_line(Line {
            points: vec![
                (Point::new(Mm(MARGIN), y), false),
                (Point::new(Mm(PAGE_WIDTH - MARGIN), y), false),
            ],
            is_closed: false,
        });
    }

    fn finish(self) -> Result<Vec<u8>, RenderError> {
        let mut writer = BufWriter::new(Vec::<u8>::new());
        self.doc
            .save(&mut writer)
            .map_err(|e| RenderError::Pdf(e.to_string()))?;
        writer
            .into_inner()
            .map_err(|e| RenderError::Pdf(e.to_string()))
    }
}

/// Render the invoice as a PDF. The snapshot is only read.
pub fn render_pdf(invoice: &Invoice) -> Result<RenderedPdf, RenderError> {
    let preview = Preview::from_invoice(invoice);
    let mut canvas = Canvas::new(&preview.title)?;
    let right = PAGE_WIDTH - MARGIN;

    // Header, right aligned.
    canvas.text(&preview.title, 12.0, true, right, MARGIN, Align::Right);
    canvas.text(&preview.date_line, 10.0, false, right, MARGIN + 7.0, Align::Right);
    canvas.text(&preview.company.name, 11.0, true, right, MARGIN + 20.0, Align::Right);
    for (i, line) in preview.company.lines.iter().enumerate() {
        let y = MARGIN + 27.0 + i as f32 * LINE_HEIGHT;
        canvas.text(line, 10.0, false, right, y, Align::Right);
    }

    // Worker, left aligned.
    let worker_y = MARGIN + 60.0;
    canvas.text(&preview.worker.name, 11.0, true, MARGIN, worker_y, Align::Left);
    for (i, line) in preview.worker.lines.iter().enumerate() {
        let y = worker_y + 7.0 + i as f32 * LINE_HEIGHT;
        canvas.text(line, 10.0, false, MARGIN, y, Align::Left);
    }

    if let Some(warning) = &preview.warning {
        canvas.text(warning, 8.0, false, MARGIN, TABLE_TOP - 12.0, Align::Left);
    }

    // Table: equal-width columns, text columns left, figures right.
    let table = preview.table();
    let columns = table[0].len();
    let text_columns = columns - 3;
    let col_width = (PAGE_WIDTH - 2.0 * MARGIN) / columns as f32;
    let draw_row = |canvas: &Canvas, cells: &[&str], y: f32, bold: bool| {
        for (c, cell) in cells.iter().enumerate() {
            let left = MARGIN + col_width * c as f32;
            if c < text_columns {
                canvas.text(cell, 10.0, bold, left + 2.0, y, Align::Left);
            } else {
                canvas.text(cell, 10.0, bold, left + col_width - 5.0, y, Align::Right);
            }
        }
    };

    draw_row(&canvas, &table[0], TABLE_TOP, true);
    canvas.rule(TABLE_TOP + 3.0);

    let body = &table[1..];
    let slots = row_slots(body.len());
    let last = body.len() - 1;
    for (i, (cells, slot)) in body.iter().zip(&slots).enumerate() {
        canvas.ensure_page(slot.page);
        if i == last {
            canvas.rule(slot.y - 6.0);
        }
        draw_row(&canvas, cells, slot.y, i == last);
    }

    // Payment block below the table, on a fresh page if it would not fit.
    let mut y = slots.last().map_or(TABLE_TOP, |s| s.y) + 2.0 * ROW_HEIGHT;
    let block_height = 14.0 + (preview.note_lines.len() as f32 + 2.0) * LINE_HEIGHT;
    if y + block_height > AMOUNT_DUE_Y - ROW_HEIGHT {
        canvas.next_page();
        y = MARGIN;
    }
    canvas.text(&preview.payment_line, 10.0, true, MARGIN, y, Align::Left);
    if let Some(bank) = &preview.bank_account_line {
        y += 7.0;
        canvas.text(bank, 10.0, false, MARGIN, y, Align::Left);
    }
    if !preview.note_lines.is_empty() {
        y += 10.0;
        for line in &preview.note_lines {
            y += LINE_HEIGHT;
            canvas.text(line, 10.0, false, MARGIN, y, Align::Left);
        }
    }

    canvas.text(&preview.amount_due, 12.0, true, right, AMOUNT_DUE_Y, Align::Right);

    let pages = canvas.page + 1;
    let bytes = canvas.finish()?;
    let file_name = pdf_file_name(invoice);
    debug!(file_name = %file_name, pages, size = bytes.len(), "invoice pdf rendered");

    Ok(RenderedPdf { file_name, bytes })
}
