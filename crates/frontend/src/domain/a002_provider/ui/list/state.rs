use contracts::domain::a002_provider::Provider;
use leptos::prelude::*;
use std::cmp::Ordering;

use crate::shared::list_utils::{cmp_ci, contains_ci, ListState, Searchable, Sortable};

fn opt(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}

impl Searchable for Provider {
    fn matches_filter(&self, filter_lower: &str) -> bool {
        contains_ci(&self.name, filter_lower)
            || contains_ci(opt(&self.contact_name), filter_lower)
            || self.cuit.as_deref().is_some_and(|c| {
                // "20-12345678-6" ищется и с дефисами, и без
                contains_ci(c, filter_lower)
                    || c.replace('-', "").contains(&filter_lower.replace('-', ""))
            })
    }
}

impl Sortable for Provider {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "cuit" => opt(&self.cuit).cmp(opt(&other.cuit)),
            "contact_name" => cmp_ci(opt(&self.contact_name), opt(&other.contact_name)),
            "phone" => opt(&self.phone).cmp(opt(&other.phone)),
            _ => cmp_ci(&self.name, &other.name),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ProviderListState {
    pub items: Vec<Provider>,
    pub list: ListState,
    pub show_inactive: bool,
    pub is_loaded: bool,
}

impl Default for ProviderListState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            list: ListState::new("name", true),
            show_inactive: false,
            is_loaded: false,
        }
    }
}

impl ProviderListState {
    pub fn visible(&self) -> (Vec<Provider>, usize, usize, usize) {
        let prefiltered: Vec<Provider> = self
            .items
            .iter()
            .filter(|p| self.show_inactive || p.active)
            .cloned()
            .collect();
        self.list.apply(&prefiltered)
    }

    pub fn active_count(&self) -> usize {
        self.items.iter().filter(|p| p.active).count()
    }
}

pub fn create_state() -> RwSignal<ProviderListState> {
    RwSignal::new(ProviderListState::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(id: i64, name: &str, cuit: Option<&str>, contact: Option<&str>, active: bool) -> Provider {
        Provider {
            id,
            name: name.to_string(),
            cuit: cuit.map(String::from),
            phone: None,
            email: None,
            address: None,
            contact_name: contact.map(String::from),
            notes: None,
            active,
        }
    }

    fn state() -> ProviderListState {
        let mut state = ProviderListState::default();
        state.list.page_size = 25;
        state.items = vec![
            provider(1, "Distribuidora Norte", Some("20123456786"), Some("Marta Gómez"), true),
            provider(2, "Lácteos del Sur", Some("30-71234567-1"), None, true),
            provider(3, "Almacén Mayorista", None, Some("Raúl"), false),
        ];
        state
    }

    #[test]
    fn test_inactive_hidden_by_default() {
        let mut s = state();
        assert_eq!(s.visible().1, 2);
        assert_eq!(s.active_count(), 2);

        s.show_inactive = true;
        assert_eq!(s.visible().1, 3);
    }

    #[test]
    fn test_search_by_cuit_and_contact() {
        let mut s = state();
        s.list.search_query = "20-12345678".into();
        let (rows, count, _, _) = s.visible();
        assert_eq!(count, 1);
        assert_eq!(rows[0].id, 1);

        s.list.search_query = "3071234".into();
        assert_eq!(s.visible().0[0].id, 2);

        s.list.search_query = "marta".into();
        assert_eq!(s.visible().0[0].id, 1);
    }

    #[test]
    fn test_sort_by_name_default() {
        let mut s = state();
        s.show_inactive = true;
        let ids: Vec<i64> = s.visible().0.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }
}
