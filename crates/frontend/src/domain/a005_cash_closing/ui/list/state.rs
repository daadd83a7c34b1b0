use contracts::domain::a005_cash_closing::CashRegisterClosing;
use contracts::shared::period::month_bounds_iso;
use leptos::prelude::*;

use crate::domain::a005_cash_closing::api::ClosingsQuery;
use crate::shared::date_utils::current_period;

/// Сумма закрытий за период
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ClosingTotals {
    pub count: usize,
    pub sales_count: u32,
    pub total_sales: f64,
    pub cash_sales: f64,
    pub expenses: f64,
    pub difference: f64,
}

impl ClosingTotals {
    pub fn from_closings(closings: &[CashRegisterClosing]) -> Self {
        closings.iter().fold(Self::default(), |mut acc, c| {
            acc.count += 1;
            acc.sales_count += c.sales_count;
            acc.total_sales += c.total_sales;
            acc.cash_sales += c.cash_sales;
            acc.expenses += c.expenses;
            acc.difference += c.difference;
            acc
        })
    }
}

#[derive(Clone, Debug)]
pub struct ClosingListState {
    pub items: Vec<CashRegisterClosing>,
    /// (год, месяц)
    pub period: (i32, u32),
    pub is_loaded: bool,
    pub error: Option<String>,
}

impl Default for ClosingListState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            period: current_period(),
            is_loaded: false,
            error: None,
        }
    }
}

impl ClosingListState {
    pub fn query(&self) -> Option<ClosingsQuery> {
        let (year, month) = self.period;
        month_bounds_iso(year, month).map(|(desde, hasta)| ClosingsQuery { desde, hasta })
    }

    /// Новые дни сверху
    pub fn sorted(&self) -> Vec<CashRegisterClosing> {
        let mut items = self.items.clone();
        items.sort_by(|a, b| b.date.cmp(&a.date));
        items
    }

    pub fn totals(&self) -> ClosingTotals {
        ClosingTotals::from_closings(&self.items)
    }
}

pub fn create_state() -> RwSignal<ClosingListState> {
    RwSignal::new(ClosingListState::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn closing(id: i64, date: &str, total: f64, expenses: f64, difference: f64) -> CashRegisterClosing {
        CashRegisterClosing {
            id,
            date: date.to_string(),
            opening_amount: 5000.0,
            cash_sales: total / 2.0,
            card_sales: total / 2.0,
            transfer_sales: 0.0,
            total_sales: total,
            sales_count: 10,
            expenses,
            expected_cash: 5000.0 + total / 2.0 - expenses,
            actual_cash: 5000.0 + total / 2.0 - expenses + difference,
            difference,
            notes: None,
            closed_by: None,
        }
    }

    #[test]
    fn test_totals() {
        let state = ClosingListState {
            items: vec![
                closing(1, "2024-06-01", 40000.0, 1000.0, -200.0),
                closing(2, "2024-06-02", 30000.0, 0.0, 50.0),
            ],
            period: (2024, 6),
            is_loaded: true,
            error: None,
        };
        let totals = state.totals();
        assert_eq!(totals.count, 2);
        assert_eq!(totals.sales_count, 20);
        assert_eq!(totals.total_sales, 70000.0);
        assert_eq!(totals.expenses, 1000.0);
        assert_eq!(totals.difference, -150.0);
        assert_eq!(state.sorted()[0].id, 2);
    }

    #[test]
    fn test_query_covers_month() {
        let state = ClosingListState {
            period: (2024, 2),
            ..Default::default()
        };
        let query = state.query().unwrap();
        assert_eq!(query.desde, "2024-02-01");
        assert_eq!(query.hasta, "2024-02-29");
    }
}
