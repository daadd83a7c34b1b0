pub mod d400_overview;
pub mod d401_finance;

pub use d400_overview::ui::OverviewDashboard;
pub use d401_finance::ui::FinanceDashboard;
