pub mod aggregate;

pub use aggregate::{CreateSaleRequest, PaymentMethod, Sale, SaleItem, SaleItemRequest};
