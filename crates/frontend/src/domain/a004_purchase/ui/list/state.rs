use contracts::domain::a004_purchase::Purchase;
use contracts::domain::common::EntityId;
use contracts::shared::period::month_bounds_iso;
use leptos::prelude::*;
use std::cmp::Ordering;

use crate::shared::date_utils::current_period;
use crate::shared::list_utils::{cmp_ci, cmp_f64, contains_ci, ListState, Searchable, Sortable};

impl Searchable for Purchase {
    fn matches_filter(&self, filter_lower: &str) -> bool {
        contains_ci(&self.provider_name, filter_lower)
            || self.invoice_number.as_deref().is_some_and(|n| contains_ci(n, filter_lower))
            || self.items.iter().any(|i| contains_ci(&i.product_name, filter_lower))
    }
}

impl Sortable for Purchase {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "provider_name" => cmp_ci(&self.provider_name, &other.provider_name),
            "total" => cmp_f64(self.total, other.total),
            "invoice_number" => self
                .invoice_number
                .as_deref()
                .unwrap_or("")
                .cmp(other.invoice_number.as_deref().unwrap_or("")),
            // При равной дате: по номеру, чтобы порядок был стабильным
            _ => self.date.cmp(&other.date).then(self.id.cmp(&other.id)),
        }
    }
}

#[derive(Clone, Debug)]
pub struct PurchaseListState {
    pub items: Vec<Purchase>,
    pub list: ListState,
    pub date_from: String,
    pub date_to: String,
    pub provider_id: Option<EntityId>,
    pub is_loaded: bool,
}

impl Default for PurchaseListState {
    fn default() -> Self {
        let (year, month) = current_period();
        let (date_from, date_to) = month_bounds_iso(year, month).unwrap_or_default();
        Self {
            items: Vec::new(),
            list: ListState::new("date", false),
            date_from,
            date_to,
            provider_id: None,
            is_loaded: false,
        }
    }
}

impl PurchaseListState {
    /// Фильтр по поставщику применяется и на клиенте
    pub fn visible(&self) -> (Vec<Purchase>, usize, usize, usize) {
        let prefiltered: Vec<Purchase> = self
            .items
            .iter()
            .filter(|p| self.provider_id.is_none_or(|id| p.provider_id == id))
            .cloned()
            .collect();
        self.list.apply(&prefiltered)
    }

    pub fn total_amount(&self) -> f64 {
        self.items
            .iter()
            .filter(|p| self.provider_id.is_none_or(|id| p.provider_id == id))
            .map(|p| p.total)
            .sum()
    }
}

pub fn create_state() -> RwSignal<PurchaseListState> {
    RwSignal::new(PurchaseListState::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn purchase(id: i64, provider_id: i64, provider: &str, date: &str, total: f64) -> Purchase {
        Purchase {
            id,
            provider_id,
            provider_name: provider.to_string(),
            invoice_number: Some(format!("A-0001-{id:08}")),
            date: date.to_string(),
            items: Vec::new(),
            total,
        }
    }

    fn state() -> PurchaseListState {
        let mut s = PurchaseListState::default();
        s.list.page_size = 25;
        s.items = vec![
            purchase(1, 10, "Distribuidora Norte", "2024-06-03", 15000.0),
            purchase(2, 11, "Lácteos del Sur", "2024-06-03", 8200.0),
            purchase(3, 10, "Distribuidora Norte", "2024-06-12", 4300.0),
        ];
        s
    }

    #[test]
    fn test_newest_first() {
        let ids: Vec<i64> = state().visible().0.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn test_provider_filter() {
        let mut s = state();
        s.provider_id = Some(10);
        assert_eq!(s.visible().1, 2);
        assert_eq!(s.total_amount(), 19300.0);
    }

    #[test]
    fn test_search_invoice() {
        let mut s = state();
        s.list.search_query = "00000002".into();
        let (rows, count, _, _) = s.visible();
        assert_eq!(count, 1);
        assert_eq!(rows[0].provider_name, "Lácteos del Sur");
    }
}
