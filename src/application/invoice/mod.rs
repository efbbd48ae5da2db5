pub mod change_invoice_status;
pub mod create_invoice;
pub mod delete_invoice;
pub mod edit_invoice;
pub mod export_invoice;
pub mod get_invoice_details;
pub mod list_invoices;

pub use change_invoice_status::{ChangeInvoiceStatusCommand, ChangeInvoiceStatusUseCase};
pub use create_invoice::{CreateInvoiceCommand, CreateInvoiceRowDto, CreateInvoiceUseCase};
pub use delete_invoice::DeleteInvoiceUseCase;
pub use edit_invoice::{EditInvoiceCommand, EditInvoiceUseCase};
pub use export_invoice::{ExportInvoiceCommand, ExportInvoiceResponse, ExportInvoiceUseCase};
pub use get_invoice_details::{GetInvoiceDetailsUseCase, InvoiceDetailsResponse, InvoiceRowDto};
pub use list_invoices::{ListInvoicesCommand, ListInvoicesResponse, ListInvoicesUseCase};
