use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use super::entities::{rows_total, Invoice, InvoiceChanges, InvoiceRow};
use super::errors::InvoiceError;
use super::ports::{
  CustomerRepository, DocumentFormat, DocumentRenderer, DocumentRow, InvoiceDocumentData,
  InvoiceQuery, InvoiceRepository, InvoiceRowRepository, PartyBlock,
};
use super::value_objects::{
  InvoiceStatus, OrderBy, Page, Quantity, ServiceDescription, UnitPrice,
};

/// Input for a new invoice. The total is never part of this; it is derived
/// from the rows.
#[derive(Debug, Clone)]
pub struct NewInvoiceData {
  pub customer_id: Uuid,
  pub start_date: DateTime<Utc>,
  pub end_date: DateTime<Utc>,
  pub comment: Option<String>,
  pub rows: Vec<NewRowData>,
}

#[derive(Debug, Clone)]
pub struct NewRowData {
  pub service: ServiceDescription,
  pub quantity: Quantity,
  pub unit_price: UnitPrice,
}

const MAX_PAGE_SIZE: u32 = 100;
const DEFAULT_PAGE_SIZE: u32 = 20;

/// Invoice business rules: creation with derived totals, partial edits,
/// status overwrites, soft deletion, paginated listing and document export.
pub struct InvoiceService {
  invoice_repo: Arc<dyn InvoiceRepository>,
  row_repo: Arc<dyn InvoiceRowRepository>,
  customer_repo: Arc<dyn CustomerRepository>,
  renderer: Arc<dyn DocumentRenderer>,
}

impl InvoiceService {
  pub fn new(
    invoice_repo: Arc<dyn InvoiceRepository>,
    row_repo: Arc<dyn InvoiceRowRepository>,
    customer_repo: Arc<dyn CustomerRepository>,
    renderer: Arc<dyn DocumentRenderer>,
  ) -> Self {
    Self {
      invoice_repo,
      row_repo,
      customer_repo,
      renderer,
    }
  }

  pub async fn create_invoice(
    &self,
    requester_id: Uuid,
    data: NewInvoiceData,
  ) -> Result<(Invoice, Vec<InvoiceRow>), InvoiceError> {
    if data.rows.is_empty() {
      return Err(InvoiceError::NoRows);
    }
    self
      .customer_repo
      .find_by_id(data.customer_id)
      .await?
      .ok_or(InvoiceError::CustomerNotFound(data.customer_id))?;

    let invoice_id = Uuid::new_v4();
    let rows: Vec<InvoiceRow> = data
      .rows
      .into_iter()
      .enumerate()
      .map(|(i, row)| {
        InvoiceRow::new(
          invoice_id,
          row.service,
          row.quantity,
          row.unit_price,
          (i + 1) as i32,
        )
      })
      .collect();

    let mut invoice = Invoice::new(
      data.customer_id,
      data.start_date,
      data.end_date,
      rows_total(&rows),
      data.comment,
    );
    invoice.id = invoice_id;

    let invoice = self.invoice_repo.create(&invoice).await?;
    let rows = self.row_repo.create_many(&rows).await?;

    info!(
      invoice_id = %invoice.id,
      requester_id = %requester_id,
      total = %invoice.total_sum,
      "Invoice created"
    );
    Ok((invoice, rows))
  }

  pub async fn edit_invoice(
    &self,
    requester_id: Uuid,
    id: Uuid,
    changes: InvoiceChanges,
  ) -> Result<(Invoice, Vec<InvoiceRow>), InvoiceError> {
    let mut invoice = self
      .invoice_repo
      .find_by_id(id)
      .await?
      .ok_or(InvoiceError::InvoiceNotFound(id))?;

    if let Some(customer_id) = changes.customer_id {
      self
        .customer_repo
        .find_by_id(customer_id)
        .await?
        .ok_or(InvoiceError::CustomerNotFound(customer_id))?;
    }

    invoice.apply_edit(changes);
    let invoice = self.invoice_repo.update(&invoice).await?;
    let rows = self.row_repo.find_by_invoice_id(invoice.id).await?;

    info!(invoice_id = %invoice.id, requester_id = %requester_id, "Invoice updated");
    Ok((invoice, rows))
  }

  pub async fn change_status(
    &self,
    requester_id: Uuid,
    id: Uuid,
    status: InvoiceStatus,
  ) -> Result<(Invoice, Vec<InvoiceRow>), InvoiceError> {
    let mut invoice = self
      .invoice_repo
      .find_by_id(id)
      .await?
      .ok_or(InvoiceError::InvoiceNotFound(id))?;

    invoice.change_status(status);
    let invoice = self.invoice_repo.update(&invoice).await?;
    let rows = self.row_repo.find_by_invoice_id(invoice.id).await?;

    info!(invoice_id = %invoice.id, requester_id = %requester_id, status = %status, "Invoice status changed");
    Ok((invoice, rows))
  }

  /// Soft-deletes and returns the representation as it stood before the
  /// delete.
  pub async fn delete_invoice(
    &self,
    requester_id: Uuid,
    id: Uuid,
  ) -> Result<(Invoice, Vec<InvoiceRow>), InvoiceError> {
    let mut invoice = self
      .invoice_repo
      .find_by_id(id)
      .await?
      .ok_or(InvoiceError::InvoiceNotFound(id))?;

    let prior = invoice.clone();
    let rows = self.row_repo.find_by_invoice_id(invoice.id).await?;

    invoice.mark_deleted();
    self.invoice_repo.update(&invoice).await?;

    info!(invoice_id = %id, requester_id = %requester_id, "Invoice deleted");
    Ok((prior, rows))
  }

  pub async fn get_invoice(
    &self,
    id: Uuid,
  ) -> Result<(Invoice, Vec<InvoiceRow>), InvoiceError> {
    let invoice = self
      .invoice_repo
      .find_by_id(id)
      .await?
      .ok_or(InvoiceError::InvoiceNotFound(id))?;
    let rows = self.row_repo.find_by_invoice_id(invoice.id).await?;
    Ok((invoice, rows))
  }

  /// 1-indexed pages. A page past the last one yields an empty slice with
  /// the correct totals rather than an error.
  pub async fn list_invoices(
    &self,
    page: u32,
    page_size: u32,
    search: Option<String>,
    order_by: Option<OrderBy>,
  ) -> Result<Page<Invoice>, InvoiceError> {
    let page = page.max(1);
    let page_size = if page_size == 0 {
      DEFAULT_PAGE_SIZE
    } else {
      page_size.min(MAX_PAGE_SIZE)
    };
    let order_by = order_by.unwrap_or_default();
    let search = search.filter(|s| !s.trim().is_empty());

    let total_count = self.invoice_repo.count(search.as_deref()).await?;
    let offset = (page as i64 - 1) * page_size as i64;
    if offset >= total_count as i64 {
      return Ok(Page::empty(page, page_size, total_count));
    }

    let items = self
      .invoice_repo
      .list(&InvoiceQuery {
        search,
        order_by,
        limit: page_size as i64,
        offset,
      })
      .await?;

    Ok(Page::new(items, page, page_size, total_count))
  }

  pub async fn render_document(
    &self,
    requester_id: Uuid,
    id: Uuid,
    format: DocumentFormat,
    seller: PartyBlock,
  ) -> Result<Vec<u8>, InvoiceError> {
    let (invoice, rows) = self.get_invoice(id).await?;
    let customer = self
      .customer_repo
      .find_by_id(invoice.customer_id)
      .await?
      .ok_or(InvoiceError::CustomerNotFound(invoice.customer_id))?;

    let data = InvoiceDocumentData {
      number: invoice.id,
      issued_at: invoice.created_at,
      start_date: invoice.start_date,
      end_date: invoice.end_date,
      status: invoice.status,
      seller,
      customer: PartyBlock {
        name: customer.name.clone(),
        lines: customer.address_lines(),
      },
      rows: rows
        .iter()
        .map(|row| DocumentRow {
          service: row.service.value().to_string(),
          unit_price: row.unit_price.value(),
          quantity: row.quantity.value(),
          sum: row.sum(),
        })
        .collect(),
      total_sum: invoice.total_sum,
      comment: invoice.comment.clone(),
    };

    let bytes = self.renderer.render(&data, format)?;
    info!(
      invoice_id = %id,
      requester_id = %requester_id,
      format = format.file_name(),
      size = bytes.len(),
      "Invoice document rendered"
    );
    Ok(bytes)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::invoice::entities::Customer;
  use async_trait::async_trait;
  use rust_decimal::Decimal;
  use rust_decimal_macros::dec;
  use std::sync::Mutex;

  struct InMemoryInvoiceRepo {
    invoices: Mutex<Vec<Invoice>>,
  }

  impl InMemoryInvoiceRepo {
    fn new() -> Self {
      Self {
        invoices: Mutex::new(Vec::new()),
      }
    }
  }

  #[async_trait]
  impl InvoiceRepository for InMemoryInvoiceRepo {
    async fn create(&self, invoice: &Invoice) -> Result<Invoice, InvoiceError> {
      self.invoices.lock().unwrap().push(invoice.clone());
      Ok(invoice.clone())
    }

    async fn update(&self, invoice: &Invoice) -> Result<Invoice, InvoiceError> {
      let mut invoices = self.invoices.lock().unwrap();
      match invoices.iter_mut().find(|i| i.id == invoice.id) {
        Some(stored) => {
          *stored = invoice.clone();
          Ok(invoice.clone())
        }
        None => Err(InvoiceError::InvoiceNotFound(invoice.id)),
      }
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Invoice>, InvoiceError> {
      Ok(
        self
          .invoices
          .lock()
          .unwrap()
          .iter()
          .find(|i| i.id == id && !i.is_deleted())
          .cloned(),
      )
    }

    async fn count(&self, search: Option<&str>) -> Result<u64, InvoiceError> {
      let invoices = self.invoices.lock().unwrap();
      Ok(
        invoices
          .iter()
          .filter(|i| !i.is_deleted())
          .filter(|i| match search {
            Some(term) => {
              let term = term.to_lowercase();
              i.comment
                .as_deref()
                .is_some_and(|c| c.to_lowercase().contains(&term))
                || i.status.as_str().contains(&term)
            }
            None => true,
          })
          .count() as u64,
      )
    }

    async fn list(&self, query: &InvoiceQuery) -> Result<Vec<Invoice>, InvoiceError> {
      let invoices = self.invoices.lock().unwrap();
      Ok(
        invoices
          .iter()
          .filter(|i| !i.is_deleted())
          .skip(query.offset as usize)
          .take(query.limit as usize)
          .cloned()
          .collect(),
      )
    }
  }

  struct InMemoryRowRepo {
    rows: Mutex<Vec<InvoiceRow>>,
  }

  impl InMemoryRowRepo {
    fn new() -> Self {
      Self {
        rows: Mutex::new(Vec::new()),
      }
    }
  }

  #[async_trait]
  impl InvoiceRowRepository for InMemoryRowRepo {
    async fn create_many(&self, rows: &[InvoiceRow]) -> Result<Vec<InvoiceRow>, InvoiceError> {
      self.rows.lock().unwrap().extend_from_slice(rows);
      Ok(rows.to_vec())
    }

    async fn find_by_invoice_id(
      &self,
      invoice_id: Uuid,
    ) -> Result<Vec<InvoiceRow>, InvoiceError> {
      Ok(
        self
          .rows
          .lock()
          .unwrap()
          .iter()
          .filter(|r| r.invoice_id == invoice_id)
          .cloned()
          .collect(),
      )
    }
  }

  struct StubCustomerRepo {
    known: Uuid,
  }

  #[async_trait]
  impl CustomerRepository for StubCustomerRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Customer>, InvoiceError> {
      if id == self.known {
        Ok(Some(Customer {
          id,
          name: "Acme GmbH".to_string(),
          email: None,
          street: None,
          city: None,
          postal_code: None,
          country: None,
          created_at: Utc::now(),
          updated_at: Utc::now(),
        }))
      } else {
        Ok(None)
      }
    }
  }

  struct NoopRenderer;

  impl DocumentRenderer for NoopRenderer {
    fn render(
      &self,
      _data: &InvoiceDocumentData,
      _format: DocumentFormat,
    ) -> Result<Vec<u8>, InvoiceError> {
      Ok(vec![0x25])
    }
  }

  fn service_with_customer(customer_id: Uuid) -> InvoiceService {
    InvoiceService::new(
      Arc::new(InMemoryInvoiceRepo::new()),
      Arc::new(InMemoryRowRepo::new()),
      Arc::new(StubCustomerRepo { known: customer_id }),
      Arc::new(NoopRenderer),
    )
  }

  fn new_data(customer_id: Uuid, rows: Vec<(Decimal, Decimal)>) -> NewInvoiceData {
    NewInvoiceData {
      customer_id,
      start_date: Utc::now(),
      end_date: Utc::now(),
      comment: Some("Quarterly work".to_string()),
      rows: rows
        .into_iter()
        .map(|(price, qty)| NewRowData {
          service: ServiceDescription::new("Development".to_string()).unwrap(),
          quantity: Quantity::new(qty).unwrap(),
          unit_price: UnitPrice::new(price).unwrap(),
        })
        .collect(),
    }
  }

  #[tokio::test]
  async fn test_create_derives_total_from_rows() {
    let customer_id = Uuid::new_v4();
    let service = service_with_customer(customer_id);
    let (invoice, rows) = service
      .create_invoice(
        Uuid::new_v4(),
        new_data(customer_id, vec![(dec!(10), dec!(2)), (dec!(5), dec!(1))]),
      )
      .await
      .unwrap();
    assert_eq!(invoice.total_sum, dec!(25));
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].line_order, 1);
    assert_eq!(rows[1].line_order, 2);
  }

  #[tokio::test]
  async fn test_create_rejects_empty_rows() {
    let customer_id = Uuid::new_v4();
    let service = service_with_customer(customer_id);
    let result = service
      .create_invoice(Uuid::new_v4(), new_data(customer_id, vec![]))
      .await;
    assert!(matches!(result, Err(InvoiceError::NoRows)));
  }

  #[tokio::test]
  async fn test_create_rejects_unknown_customer() {
    let service = service_with_customer(Uuid::new_v4());
    let result = service
      .create_invoice(
        Uuid::new_v4(),
        new_data(Uuid::new_v4(), vec![(dec!(10), dec!(1))]),
      )
      .await;
    assert!(matches!(result, Err(InvoiceError::CustomerNotFound(_))));
  }

  #[tokio::test]
  async fn test_deleted_invoice_is_not_found() {
    let customer_id = Uuid::new_v4();
    let service = service_with_customer(customer_id);
    let (invoice, _) = service
      .create_invoice(
        Uuid::new_v4(),
        new_data(customer_id, vec![(dec!(10), dec!(1))]),
      )
      .await
      .unwrap();

    let (prior, _) = service
      .delete_invoice(Uuid::new_v4(), invoice.id)
      .await
      .unwrap();
    assert!(prior.deleted_at.is_none());

    let result = service.get_invoice(invoice.id).await;
    assert!(matches!(result, Err(InvoiceError::InvoiceNotFound(_))));
  }

  #[tokio::test]
  async fn test_list_page_beyond_end_is_empty() {
    let customer_id = Uuid::new_v4();
    let service = service_with_customer(customer_id);
    for _ in 0..3 {
      service
        .create_invoice(
          Uuid::new_v4(),
          new_data(customer_id, vec![(dec!(10), dec!(1))]),
        )
        .await
        .unwrap();
    }

    let page = service.list_invoices(5, 2, None, None).await.unwrap();
    assert!(page.items.is_empty());
    assert_eq!(page.total_count, 3);
    assert_eq!(page.total_pages, 2);
  }

  #[tokio::test]
  async fn test_list_empty_store() {
    let service = service_with_customer(Uuid::new_v4());
    let page = service.list_invoices(1, 10, None, None).await.unwrap();
    assert!(page.items.is_empty());
    assert_eq!(page.total_count, 0);
  }

  #[tokio::test]
  async fn test_edit_partial_update() {
    let customer_id = Uuid::new_v4();
    let service = service_with_customer(customer_id);
    let (invoice, _) = service
      .create_invoice(
        Uuid::new_v4(),
        new_data(customer_id, vec![(dec!(10), dec!(1))]),
      )
      .await
      .unwrap();

    let (updated, _) = service
      .edit_invoice(
        Uuid::new_v4(),
        invoice.id,
        InvoiceChanges {
          status: Some(InvoiceStatus::Sent),
          ..Default::default()
        },
      )
      .await
      .unwrap();
    assert_eq!(updated.status, InvoiceStatus::Sent);
    assert_eq!(updated.comment, invoice.comment);
  }
}
