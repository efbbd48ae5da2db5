use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use super::get_invoice_details::InvoiceDetailsResponse;
use crate::domain::invoice::{
  InvoiceError, InvoiceService, NewInvoiceData, NewRowData, Quantity, ServiceDescription,
  UnitPrice,
};

#[derive(Debug, Deserialize)]
pub struct CreateInvoiceRowDto {
  pub service: String,
  pub quantity: Decimal,
  pub unit_price: Decimal,
}

#[derive(Debug, Deserialize)]
pub struct CreateInvoiceCommand {
  pub user_id: Uuid,
  pub customer_id: Uuid,
  pub start_date: DateTime<Utc>,
  pub end_date: DateTime<Utc>,
  pub comment: Option<String>,
  pub rows: Vec<CreateInvoiceRowDto>,
}

pub struct CreateInvoiceUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl CreateInvoiceUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  pub async fn execute(
    &self,
    command: CreateInvoiceCommand,
  ) -> Result<InvoiceDetailsResponse, InvoiceError> {
    let rows: Vec<NewRowData> = command
      .rows
      .into_iter()
      .map(|row| {
        Ok(NewRowData {
          service: ServiceDescription::new(row.service)?,
          quantity: Quantity::new(row.quantity)?,
          unit_price: UnitPrice::new(row.unit_price)?,
        })
      })
      .collect::<Result<Vec<_>, InvoiceError>>()?;

    let (invoice, rows) = self
      .invoice_service
      .create_invoice(
        command.user_id,
        NewInvoiceData {
          customer_id: command.customer_id,
          start_date: command.start_date,
          end_date: command.end_date,
          comment: command.comment,
          rows,
        },
      )
      .await?;

    Ok(InvoiceDetailsResponse::from_parts(invoice, rows))
  }
}
