pub mod aggregate;

pub use aggregate::{CreatePurchaseRequest, Purchase, PurchaseItem, PurchaseItemRequest};
