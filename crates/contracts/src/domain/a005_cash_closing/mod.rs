pub mod aggregate;

pub use aggregate::{
    ClosingBalance, CashRegisterClosing, CreateClosingRequest, DailySummary, BALANCE_TOLERANCE,
};
