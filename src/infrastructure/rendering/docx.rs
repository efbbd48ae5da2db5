use docx_rs::{
  AlignmentType, Docx, Paragraph, Run, Table, TableCell, TableRow, WidthType,
};
use rust_decimal::Decimal;
use std::io::Cursor;

use crate::domain::invoice::errors::InvoiceError;
use crate::domain::invoice::ports::InvoiceDocumentData;

fn money(value: Decimal) -> String {
  format!("{:.2}", value.round_dp(2))
}

fn text_paragraph(content: &str) -> Paragraph {
  Paragraph::new().add_run(Run::new().add_text(content))
}

fn bold_paragraph(content: &str) -> Paragraph {
  Paragraph::new().add_run(Run::new().add_text(content).bold())
}

fn cell(content: &str) -> TableCell {
  TableCell::new()
    .add_paragraph(text_paragraph(content))
    .width(2000, WidthType::Dxa)
}

fn header_cell(content: &str) -> TableCell {
  TableCell::new()
    .add_paragraph(bold_paragraph(content))
    .width(2000, WidthType::Dxa)
}

pub fn render_docx(data: &InvoiceDocumentData) -> Result<Vec<u8>, InvoiceError> {
  let mut docx = Docx::new()
    .add_paragraph(
      Paragraph::new()
        .add_run(Run::new().add_text("INVOICE").bold().size(40))
        .align(AlignmentType::Center),
    )
    .add_paragraph(text_paragraph(&format!("Invoice #: {}", data.number)))
    .add_paragraph(text_paragraph(&format!(
      "Issued: {}",
      data.issued_at.format("%Y-%m-%d")
    )))
    .add_paragraph(text_paragraph(&format!(
      "Billing period: {} - {}",
      data.start_date.format("%Y-%m-%d"),
      data.end_date.format("%Y-%m-%d")
    )))
    .add_paragraph(text_paragraph(&format!("Status: {}", data.status)))
    .add_paragraph(Paragraph::new())
    .add_paragraph(bold_paragraph("From"))
    .add_paragraph(text_paragraph(&data.seller.name));

  for line in &data.seller.lines {
    docx = docx.add_paragraph(text_paragraph(line));
  }

  docx = docx
    .add_paragraph(Paragraph::new())
    .add_paragraph(bold_paragraph("For"))
    .add_paragraph(text_paragraph(&data.customer.name));

  for line in &data.customer.lines {
    docx = docx.add_paragraph(text_paragraph(line));
  }

  let mut rows = vec![TableRow::new(vec![
    header_cell("Service"),
    header_cell("Qty"),
    header_cell("Unit price"),
    header_cell("Sum"),
  ])];
  for row in &data.rows {
    rows.push(TableRow::new(vec![
      cell(&row.service),
      cell(&money(row.quantity)),
      cell(&money(row.unit_price)),
      cell(&money(row.sum)),
    ]));
  }

  docx = docx
    .add_paragraph(Paragraph::new())
    .add_table(Table::new(rows))
    .add_paragraph(Paragraph::new())
    .add_paragraph(
      Paragraph::new()
        .add_run(
          Run::new()
            .add_text(format!("Total: {}", money(data.total_sum)))
            .bold(),
        )
        .align(AlignmentType::Right),
    );

  if let Some(comment) = &data.comment {
    docx = docx
      .add_paragraph(Paragraph::new())
      .add_paragraph(bold_paragraph("Comments"))
      .add_paragraph(text_paragraph(comment));
  }

  let mut buffer = Cursor::new(Vec::new());
  docx
    .build()
    .pack(&mut buffer)
    .map_err(|e| InvoiceError::Render(e.to_string()))?;

  Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::invoice::ports::{DocumentRow, PartyBlock};
  use crate::domain::invoice::value_objects::InvoiceStatus;
  use chrono::Utc;
  use rust_decimal_macros::dec;
  use uuid::Uuid;

  fn sample_data() -> InvoiceDocumentData {
    InvoiceDocumentData {
      number: Uuid::new_v4(),
      issued_at: Utc::now(),
      start_date: Utc::now(),
      end_date: Utc::now(),
      status: InvoiceStatus::Sent,
      seller: PartyBlock {
        name: "Jane Doe".to_string(),
        lines: vec!["jane@example.com".to_string()],
      },
      customer: PartyBlock {
        name: "Acme GmbH".to_string(),
        lines: vec![],
      },
      rows: vec![DocumentRow {
        service: "Consulting".to_string(),
        unit_price: dec!(120),
        quantity: dec!(8),
        sum: dec!(960),
      }],
      total_sum: dec!(960),
      comment: None,
    }
  }

  #[test]
  fn test_docx_bytes_are_a_zip_archive() {
    let bytes = render_docx(&sample_data()).unwrap();
    // DocX files are ZIP containers
    assert!(bytes.starts_with(b"PK"));
  }
}
