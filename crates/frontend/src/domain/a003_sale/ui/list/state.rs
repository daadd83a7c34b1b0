use contracts::domain::a003_sale::{PaymentMethod, Sale};
use contracts::shared::period::month_bounds_iso;
use leptos::prelude::*;
use std::cmp::Ordering;

use crate::shared::config::config;
use crate::shared::date_utils::current_period;
use crate::shared::list_utils::{cmp_f64, contains_ci, filter_list, ListState, Searchable, Sortable};

impl Searchable for Sale {
    fn matches_filter(&self, filter_lower: &str) -> bool {
        self.id.to_string() == filter_lower
            || self.cashier.as_deref().is_some_and(|c| contains_ci(c, filter_lower))
            || self.items.iter().any(|i| contains_ci(&i.product_name, filter_lower))
    }
}

impl Sortable for Sale {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "total" => cmp_f64(self.total, other.total),
            "units" => self.units().cmp(&other.units()),
            "payment_method" => self.payment_method.label().cmp(other.payment_method.label()),
            _ => self.created_at.cmp(&other.created_at),
        }
    }
}

/// Итоги по отфильтрованным продажам
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SalesTotals {
    pub count: usize,
    pub units: i32,
    pub total: f64,
    pub cash: f64,
}

#[derive(Clone, Debug)]
pub struct SaleListState {
    pub items: Vec<Sale>,
    pub list: ListState,
    pub date_from: String,
    pub date_to: String,
    /// None: все способы оплаты
    pub payment_method: Option<PaymentMethod>,
    pub is_loaded: bool,
}

impl Default for SaleListState {
    fn default() -> Self {
        let (year, month) = current_period();
        let (date_from, date_to) = month_bounds_iso(year, month).unwrap_or_default();
        Self {
            items: Vec::new(),
            // Новые продажи сверху
            list: ListState::new("created_at", false),
            date_from,
            date_to,
            payment_method: None,
            is_loaded: false,
        }
    }
}

impl SaleListState {
    fn by_payment(&self) -> Vec<Sale> {
        self.items
            .iter()
            .filter(|s| self.payment_method.is_none_or(|m| s.payment_method == m))
            .cloned()
            .collect()
    }

    pub fn visible(&self) -> (Vec<Sale>, usize, usize, usize) {
        self.list.apply(&self.by_payment())
    }

    pub fn totals(&self) -> SalesTotals {
        let rows = filter_list(&self.by_payment(), &self.list.search_query, config().search.min_query_len);
        rows.iter().fold(SalesTotals::default(), |mut acc, sale| {
            acc.count += 1;
            acc.units += sale.units();
            acc.total += sale.total;
            if sale.payment_method.is_cash() {
                acc.cash += sale.total;
            }
            acc
        })
    }
}

pub fn create_state() -> RwSignal<SaleListState> {
    RwSignal::new(SaleListState::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a003_sale::SaleItem;

    fn sale(id: i64, at: &str, total: f64, method: PaymentMethod, product: &str) -> Sale {
        Sale {
            id,
            created_at: at.to_string(),
            items: vec![SaleItem {
                product_id: id,
                product_name: product.to_string(),
                quantity: 2,
                unit_price: total / 2.0,
                subtotal: total,
            }],
            total,
            payment_method: method,
            cashier: Some("caja1".into()),
        }
    }

    fn state() -> SaleListState {
        let mut s = SaleListState::default();
        s.list.page_size = 25;
        s.items = vec![
            sale(1, "2024-05-01T09:00:00", 1000.0, PaymentMethod::Efectivo, "Yerba"),
            sale(2, "2024-05-01T12:30:00", 2500.0, PaymentMethod::Debito, "Café"),
            sale(3, "2024-05-02T10:15:00", 400.0, PaymentMethod::Efectivo, "Pan"),
        ];
        s
    }

    #[test]
    fn test_default_order_newest_first() {
        let ids: Vec<i64> = state().visible().0.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn test_payment_filter_and_totals() {
        let mut s = state();
        let totals = s.totals();
        assert_eq!(totals.count, 3);
        assert_eq!(totals.total, 3900.0);
        assert_eq!(totals.cash, 1400.0);
        assert_eq!(totals.units, 6);

        s.payment_method = Some(PaymentMethod::Debito);
        assert_eq!(s.visible().1, 1);
        assert_eq!(s.totals().total, 2500.0);
    }

    #[test]
    fn test_totals_follow_search() {
        let mut s = state();
        s.list.search_query = "yerba".into();
        assert_eq!(s.totals().count, 1);
        assert_eq!(s.totals().total, 1000.0);
    }

    #[test]
    fn test_default_range_is_current_month() {
        let s = SaleListState::default();
        assert!(s.date_from.ends_with("-01"));
        assert!(s.date_from <= s.date_to);
        assert_eq!(s.date_from[..7], s.date_to[..7]);
    }
}
