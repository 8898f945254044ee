pub mod common;
pub mod export;
pub mod invoices;
pub mod movements;
pub mod options;
pub mod summary;
