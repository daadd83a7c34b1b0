pub mod aggregate;

pub use aggregate::{CreateMonthlyClosingRequest, MonthlyClosing};
