use chrono::NaiveDate;
use contracts::domain::a006_monthly_closing::{CreateMonthlyClosingRequest, MonthlyClosing};
use contracts::shared::period::previous_month;
use leptos::prelude::*;

use crate::shared::date_utils::current_period;

#[derive(Clone, Debug)]
pub struct MonthlyClosingListState {
    pub items: Vec<MonthlyClosing>,
    /// Период, который предлагается закрыть
    pub period: (i32, u32),
    pub is_loaded: bool,
}

impl Default for MonthlyClosingListState {
    fn default() -> Self {
        let (year, month) = current_period();
        Self {
            items: Vec::new(),
            period: previous_month(year, month),
            is_loaded: false,
        }
    }
}

impl MonthlyClosingListState {
    /// Новые периоды сверху
    pub fn sorted(&self) -> Vec<MonthlyClosing> {
        let mut items = self.items.clone();
        items.sort_by(|a, b| (b.year, b.month).cmp(&(a.year, a.month)));
        items
    }

    pub fn request(&self) -> CreateMonthlyClosingRequest {
        let (year, month) = self.period;
        CreateMonthlyClosingRequest { year, month }
    }

    /// Причина, по которой выбранный месяц нельзя закрыть
    pub fn blocked_reason(&self, today: NaiveDate) -> Option<String> {
        self.request().validate(&self.items, today).err()
    }
}

pub fn create_state() -> RwSignal<MonthlyClosingListState> {
    RwSignal::new(MonthlyClosingListState::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn closing(id: i64, year: i32, month: u32) -> MonthlyClosing {
        MonthlyClosing {
            id,
            year,
            month,
            closings_count: 26,
            sales_count: 700,
            total_sales: 800_000.0,
            total_purchases: 500_000.0,
            total_expenses: 20_000.0,
            total_difference: 0.0,
            net_result: 280_000.0,
            closed_at: Some("2024-05-01T10:00:00".into()),
        }
    }

    fn state(period: (i32, u32)) -> MonthlyClosingListState {
        MonthlyClosingListState {
            items: vec![closing(1, 2024, 3), closing(2, 2023, 12), closing(3, 2024, 4)],
            period,
            is_loaded: true,
        }
    }

    #[test]
    fn test_sorted_newest_first() {
        let ids: Vec<i64> = state((2024, 5)).sorted().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_blocked_reason() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        assert_eq!(state((2024, 5)).blocked_reason(today), None);
        // текущий месяц закрыть можно
        assert_eq!(state((2024, 6)).blocked_reason(today), None);
        assert_eq!(
            state((2024, 4)).blocked_reason(today),
            Some("Abril 2024 ya está cerrado".to_string())
        );
        assert!(state((2024, 7)).blocked_reason(today).is_some());
    }
}
