mod dashboard;

pub use dashboard::FinanceDashboard;
