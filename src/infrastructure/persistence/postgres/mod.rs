pub mod customer_repository;
pub mod invoice_repository;
pub mod invoice_row_repository;
pub mod user_repository;

pub use customer_repository::PostgresCustomerRepository;
pub use invoice_repository::PostgresInvoiceRepository;
pub use invoice_row_repository::PostgresInvoiceRowRepository;
pub use user_repository::PostgresUserRepository;
