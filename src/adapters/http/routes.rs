use actix_web::web;
use std::sync::Arc;

use crate::application::auth::{
  ChangePasswordUseCase, DeleteUserUseCase, EditUserUseCase, GetCurrentUserUseCase,
  LoginUserUseCase, RegisterUserUseCase,
};
use crate::application::invoice::{
  ChangeInvoiceStatusUseCase, CreateInvoiceUseCase, DeleteInvoiceUseCase, EditInvoiceUseCase,
  ExportInvoiceUseCase, GetInvoiceDetailsUseCase, ListInvoicesUseCase,
};

use super::handlers::auth::{login_handler, register_handler};
use super::handlers::invoices::{
  change_invoice_status_handler, create_invoice_handler, delete_invoice_handler,
  edit_invoice_handler, export_invoice_docx_handler, export_invoice_pdf_handler,
  get_invoice_handler, list_invoices_handler,
};

/// Public authentication routes
///
/// - POST /register - Create a new account
/// - POST /login - Authenticate and receive a bearer token
pub fn configure_public_auth_routes(
  cfg: &mut web::ServiceConfig,
  register_use_case: Arc<RegisterUserUseCase>,
  login_use_case: Arc<LoginUserUseCase>,
) {
  cfg
    .app_data(web::Data::new(register_use_case))
    .app_data(web::Data::new(login_use_case))
    .route("/register", web::post().to(register_handler))
    .route("/login", web::post().to(login_handler));
}

/// Protected account routes (mounted behind AuthMiddleware)
///
/// - GET /me - Current account profile
/// - PUT /me - Partially edit profile
/// - PUT /me/password - Change password
/// - DELETE /me - Soft-delete account
pub fn configure_account_routes(
  cfg: &mut web::ServiceConfig,
  get_user_use_case: Arc<GetCurrentUserUseCase>,
  edit_user_use_case: Arc<EditUserUseCase>,
  change_password_use_case: Arc<ChangePasswordUseCase>,
  delete_user_use_case: Arc<DeleteUserUseCase>,
) {
  cfg
    .app_data(web::Data::new(get_user_use_case))
    .app_data(web::Data::new(edit_user_use_case))
    .app_data(web::Data::new(change_password_use_case))
    .app_data(web::Data::new(delete_user_use_case))
    .route("/me", web::get().to(super::handlers::auth::get_me_handler))
    .route("/me", web::put().to(super::handlers::auth::edit_me_handler))
    .route(
      "/me/password",
      web::put().to(super::handlers::auth::change_password_handler),
    )
    .route(
      "/me",
      web::delete().to(super::handlers::auth::delete_me_handler),
    );
}

/// Invoice routes (mounted behind AuthMiddleware)
///
/// - GET / - Paginated, searchable, sortable listing
/// - POST / - Create invoice with rows
/// - GET /{id} - Invoice with rows
/// - PUT /{id} - Partial edit
/// - PUT /{id}/status - Status-only change
/// - DELETE /{id} - Soft delete, returns prior representation
/// - GET /{id}/pdf - Export as PDF
/// - GET /{id}/docx - Export as DocX
#[allow(clippy::too_many_arguments)]
pub fn configure_invoice_routes(
  cfg: &mut web::ServiceConfig,
  create_use_case: Arc<CreateInvoiceUseCase>,
  list_use_case: Arc<ListInvoicesUseCase>,
  get_use_case: Arc<GetInvoiceDetailsUseCase>,
  edit_use_case: Arc<EditInvoiceUseCase>,
  change_status_use_case: Arc<ChangeInvoiceStatusUseCase>,
  delete_use_case: Arc<DeleteInvoiceUseCase>,
  export_use_case: Arc<ExportInvoiceUseCase>,
) {
  cfg
    .app_data(web::Data::new(create_use_case))
    .app_data(web::Data::new(list_use_case))
    .app_data(web::Data::new(get_use_case))
    .app_data(web::Data::new(edit_use_case))
    .app_data(web::Data::new(change_status_use_case))
    .app_data(web::Data::new(delete_use_case))
    .app_data(web::Data::new(export_use_case))
    .route("", web::get().to(list_invoices_handler))
    .route("", web::post().to(create_invoice_handler))
    .route("/{id}", web::get().to(get_invoice_handler))
    .route("/{id}", web::put().to(edit_invoice_handler))
    .route("/{id}", web::delete().to(delete_invoice_handler))
    .route("/{id}/status", web::put().to(change_invoice_status_handler))
    .route("/{id}/pdf", web::get().to(export_invoice_pdf_handler))
    .route("/{id}/docx", web::get().to(export_invoice_docx_handler));
}
