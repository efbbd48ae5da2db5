pub mod entities;
pub mod errors;
pub mod ports;
pub mod services;
pub mod value_objects;

pub use entities::{rows_total, Customer, Invoice, InvoiceChanges, InvoiceRow};
pub use errors::InvoiceError;
pub use ports::{
  CustomerRepository, DocumentFormat, DocumentRenderer, DocumentRow, InvoiceDocumentData,
  InvoiceQuery, InvoiceRepository, InvoiceRowRepository, PartyBlock,
};
pub use services::{InvoiceService, NewInvoiceData, NewRowData};
pub use value_objects::{
  InvoiceStatus, OrderBy, Page, Quantity, ServiceDescription, UnitPrice, ValueObjectError,
};
