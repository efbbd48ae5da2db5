use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::{
  adapters::http::{
    dtos::{ChangeStatusRequest, CreateInvoiceRequest, EditInvoiceRequest, ListInvoicesQuery},
    errors::ApiError,
    middleware::AuthUser,
  },
  application::invoice::{
    ChangeInvoiceStatusCommand, ChangeInvoiceStatusUseCase, CreateInvoiceCommand,
    CreateInvoiceRowDto, CreateInvoiceUseCase, DeleteInvoiceUseCase, EditInvoiceCommand,
    EditInvoiceUseCase, ExportInvoiceCommand, ExportInvoiceUseCase, GetInvoiceDetailsUseCase,
    ListInvoicesCommand, ListInvoicesUseCase,
  },
  domain::invoice::DocumentFormat,
};

/// List invoices
/// GET /api/invoices
pub async fn list_invoices_handler(
  query: web::Query<ListInvoicesQuery>,
  use_case: web::Data<Arc<ListInvoicesUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let query = query.into_inner();

  let response = use_case
    .execute(ListInvoicesCommand {
      page: query.page,
      page_size: query.page_size,
      search: query.search,
      order_by: query.order_by,
    })
    .await?;

  Ok(HttpResponse::Ok().json(response))
}

/// Get invoice with rows
/// GET /api/invoices/:id
pub async fn get_invoice_handler(
  invoice_id: web::Path<Uuid>,
  use_case: web::Data<Arc<GetInvoiceDetailsUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let response = use_case.execute(*invoice_id).await?;
  Ok(HttpResponse::Ok().json(response))
}

/// Create invoice
/// POST /api/invoices
pub async fn create_invoice_handler(
  request: web::Json<CreateInvoiceRequest>,
  use_case: web::Data<Arc<CreateInvoiceUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  let user = http_req.authenticated_user();
  let request = request.into_inner();

  let command = CreateInvoiceCommand {
    user_id: user.id,
    customer_id: request.customer_id,
    start_date: request.start_date,
    end_date: request.end_date,
    comment: request.comment,
    rows: request
      .rows
      .into_iter()
      .map(|row| CreateInvoiceRowDto {
        service: row.service,
        quantity: row.quantity,
        unit_price: row.unit_price,
      })
      .collect(),
  };

  let response = use_case.execute(command).await?;
  Ok(HttpResponse::Created().json(response))
}

/// Partially edit invoice
/// PUT /api/invoices/:id
pub async fn edit_invoice_handler(
  invoice_id: web::Path<Uuid>,
  request: web::Json<EditInvoiceRequest>,
  use_case: web::Data<Arc<EditInvoiceUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  let user = http_req.authenticated_user();
  let request = request.into_inner();

  let command = EditInvoiceCommand {
    user_id: user.id,
    invoice_id: *invoice_id,
    customer_id: request.customer_id,
    start_date: request.start_date,
    end_date: request.end_date,
    comment: request.comment,
    status: request.status,
  };

  let response = use_case.execute(command).await?;
  Ok(HttpResponse::Ok().json(response))
}

/// Change invoice status
/// PUT /api/invoices/:id/status
pub async fn change_invoice_status_handler(
  invoice_id: web::Path<Uuid>,
  request: web::Json<ChangeStatusRequest>,
  use_case: web::Data<Arc<ChangeInvoiceStatusUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  let user = http_req.authenticated_user();

  let command = ChangeInvoiceStatusCommand {
    user_id: user.id,
    invoice_id: *invoice_id,
    status: request.status.clone(),
  };

  let response = use_case.execute(command).await?;
  Ok(HttpResponse::Ok().json(response))
}

/// Soft-delete invoice, returning its prior representation
/// DELETE /api/invoices/:id
pub async fn delete_invoice_handler(
  invoice_id: web::Path<Uuid>,
  use_case: web::Data<Arc<DeleteInvoiceUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  let user = http_req.authenticated_user();

  let response = use_case.execute(user.id, *invoice_id).await?;
  Ok(HttpResponse::Ok().json(response))
}

async fn export_invoice(
  invoice_id: Uuid,
  format: DocumentFormat,
  use_case: &ExportInvoiceUseCase,
  http_req: &HttpRequest,
) -> Result<HttpResponse, ApiError> {
  let user = http_req.authenticated_user();

  let response = use_case
    .execute(ExportInvoiceCommand {
      user_id: user.id,
      invoice_id,
      format,
    })
    .await?;

  Ok(
    HttpResponse::Ok()
      .content_type(response.content_type)
      .insert_header((
        "Content-Disposition",
        format!("attachment; filename=\"{}\"", response.file_name),
      ))
      .body(response.bytes),
  )
}

/// Export invoice as PDF
/// GET /api/invoices/:id/pdf
pub async fn export_invoice_pdf_handler(
  invoice_id: web::Path<Uuid>,
  use_case: web::Data<Arc<ExportInvoiceUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  export_invoice(*invoice_id, DocumentFormat::Pdf, &use_case, &http_req).await
}

/// Export invoice as DocX
/// GET /api/invoices/:id/docx
pub async fn export_invoice_docx_handler(
  invoice_id: web::Path<Uuid>,
  use_case: web::Data<Arc<ExportInvoiceUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  export_invoice(*invoice_id, DocumentFormat::Docx, &use_case, &http_req).await
}
