//! Форма новой закупки.
//!
//! - view_model.rs: черновик (строки, поставщик, фактура) и сборка запроса
//! - view.rs: поиск товаров и таблица строк

mod view;
mod view_model;

pub use view::PurchaseForm;
