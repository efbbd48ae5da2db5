use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference};
use rust_decimal::Decimal;

use crate::domain::invoice::errors::InvoiceError;
use crate::domain::invoice::ports::InvoiceDocumentData;

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 20.0;
const LINE_HEIGHT_MM: f32 = 6.0;
const FOOTER_Y_MM: f32 = 12.0;

// Table column x positions
const COL_SERVICE: f32 = MARGIN_MM;
const COL_QTY: f32 = 120.0;
const COL_PRICE: f32 = 145.0;
const COL_SUM: f32 = 172.0;

fn money(value: Decimal) -> String {
  format!("{:.2}", value.round_dp(2))
}

/// Writes text lines top to bottom, opening a new page when the cursor
/// runs past the bottom margin.
struct TextCursor<'a> {
  doc: &'a PdfDocumentReference,
  layer: PdfLayerReference,
  regular: &'a IndirectFontRef,
  bold: &'a IndirectFontRef,
  y: f32,
  page_number: u32,
}

impl<'a> TextCursor<'a> {
  fn new(
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    regular: &'a IndirectFontRef,
    bold: &'a IndirectFontRef,
  ) -> Self {
    let cursor = Self {
      doc,
      layer,
      regular,
      bold,
      y: PAGE_HEIGHT_MM - MARGIN_MM,
      page_number: 1,
    };
    cursor.footer();
    cursor
  }

  fn footer(&self) {
    self.layer.use_text(
      format!("Page {}", self.page_number),
      8.0,
      Mm(PAGE_WIDTH_MM / 2.0 - 5.0),
      Mm(FOOTER_Y_MM),
      self.regular,
    );
  }

  fn break_page(&mut self) {
    let (page, layer) = self
      .doc
      .add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
    self.layer = self.doc.get_page(page).get_layer(layer);
    self.y = PAGE_HEIGHT_MM - MARGIN_MM;
    self.page_number += 1;
    self.footer();
  }

  fn advance(&mut self, height: f32) {
    self.y -= height;
    if self.y < MARGIN_MM {
      self.break_page();
    }
  }

  fn text(&self, content: &str, size: f32, x: f32, bold: bool) {
    let font = if bold { self.bold } else { self.regular };
    self.layer.use_text(content, size, Mm(x), Mm(self.y), font);
  }

  fn line(&mut self, content: &str, size: f32, bold: bool) {
    self.text(content, size, MARGIN_MM, bold);
    self.advance(LINE_HEIGHT_MM);
  }

  fn spacer(&mut self) {
    self.advance(LINE_HEIGHT_MM / 2.0);
  }
}

pub fn render_pdf(data: &InvoiceDocumentData) -> Result<Vec<u8>, InvoiceError> {
  let (doc, page, layer) = PdfDocument::new(
    format!("Invoice {}", data.number),
    Mm(PAGE_WIDTH_MM),
    Mm(PAGE_HEIGHT_MM),
    "Layer 1",
  );

  let regular = doc
    .add_builtin_font(BuiltinFont::Helvetica)
    .map_err(|e| InvoiceError::Render(e.to_string()))?;
  let bold = doc
    .add_builtin_font(BuiltinFont::HelveticaBold)
    .map_err(|e| InvoiceError::Render(e.to_string()))?;

  let first_layer = doc.get_page(page).get_layer(layer);
  let mut cursor = TextCursor::new(&doc, first_layer, &regular, &bold);

  // Header
  cursor.line("INVOICE", 20.0, true);
  cursor.spacer();
  cursor.line(&format!("Invoice #: {}", data.number), 10.0, false);
  cursor.line(
    &format!("Issued: {}", data.issued_at.format("%Y-%m-%d")),
    10.0,
    false,
  );
  cursor.line(
    &format!(
      "Billing period: {} - {}",
      data.start_date.format("%Y-%m-%d"),
      data.end_date.format("%Y-%m-%d")
    ),
    10.0,
    false,
  );
  cursor.line(&format!("Status: {}", data.status), 10.0, false);
  cursor.spacer();

  // From / For address blocks
  cursor.line("From", 11.0, true);
  cursor.line(&data.seller.name, 10.0, false);
  for line in &data.seller.lines {
    cursor.line(line, 10.0, false);
  }
  cursor.spacer();

  cursor.line("For", 11.0, true);
  cursor.line(&data.customer.name, 10.0, false);
  for line in &data.customer.lines {
    cursor.line(line, 10.0, false);
  }
  cursor.spacer();

  // Row table
  cursor.text("Service", 10.0, COL_SERVICE, true);
  cursor.text("Qty", 10.0, COL_QTY, true);
  cursor.text("Unit price", 10.0, COL_PRICE, true);
  cursor.text("Sum", 10.0, COL_SUM, true);
  cursor.advance(LINE_HEIGHT_MM);

  for row in &data.rows {
    cursor.text(&row.service, 10.0, COL_SERVICE, false);
    cursor.text(&money(row.quantity), 10.0, COL_QTY, false);
    cursor.text(&money(row.unit_price), 10.0, COL_PRICE, false);
    cursor.text(&money(row.sum), 10.0, COL_SUM, false);
    cursor.advance(LINE_HEIGHT_MM);
  }

  cursor.spacer();
  cursor.text("Total", 12.0, COL_PRICE, true);
  cursor.text(&money(data.total_sum), 12.0, COL_SUM, true);
  cursor.advance(LINE_HEIGHT_MM);

  // Optional comment block
  if let Some(comment) = &data.comment {
    cursor.spacer();
    cursor.line("Comments", 11.0, true);
    cursor.line(comment, 10.0, false);
  }

  doc
    .save_to_bytes()
    .map_err(|e| InvoiceError::Render(e.to_string()))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::invoice::ports::{DocumentRow, PartyBlock};
  use crate::domain::invoice::value_objects::InvoiceStatus;
  use chrono::Utc;
  use rust_decimal_macros::dec;
  use uuid::Uuid;

  fn sample_data(rows: usize) -> InvoiceDocumentData {
    InvoiceDocumentData {
      number: Uuid::new_v4(),
      issued_at: Utc::now(),
      start_date: Utc::now(),
      end_date: Utc::now(),
      status: InvoiceStatus::Created,
      seller: PartyBlock {
        name: "Jane Doe".to_string(),
        lines: vec!["Main Street 5".to_string(), "jane@example.com".to_string()],
      },
      customer: PartyBlock {
        name: "Acme GmbH".to_string(),
        lines: vec!["Hauptstrasse 1".to_string()],
      },
      rows: (0..rows)
        .map(|i| DocumentRow {
          service: format!("Service {}", i + 1),
          unit_price: dec!(10),
          quantity: dec!(2),
          sum: dec!(20),
        })
        .collect(),
      total_sum: dec!(20) * Decimal::from(rows as u32),
      comment: Some("Payable within 14 days".to_string()),
    }
  }

  #[test]
  fn test_pdf_bytes_have_magic_header() {
    let bytes = render_pdf(&sample_data(2)).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
  }

  #[test]
  fn test_pdf_handles_many_rows_across_pages() {
    let bytes = render_pdf(&sample_data(80)).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
    assert!(bytes.len() > 1000);
  }

  #[test]
  fn test_money_rounding() {
    assert_eq!(money(dec!(10)), "10.00");
    assert_eq!(money(dec!(10.005)), "10.00"); // banker's rounding
    assert_eq!(money(dec!(10.015)), "10.02");
  }
}
