pub mod a001_product;
pub mod a002_provider;
pub mod a003_sale;
pub mod a004_purchase;
pub mod a005_cash_closing;
pub mod a006_monthly_closing;
