use contracts::domain::a001_product::{Product, ProductDto, StockStatus};
use contracts::domain::common::EntityId;
use leptos::prelude::*;
use std::cmp::Ordering;

use crate::shared::list_utils::{
    cmp_ci, cmp_f64, contains_ci, replace_by_id, ListState, Searchable, Sortable,
};

impl Searchable for Product {
    fn matches_filter(&self, filter_lower: &str) -> bool {
        contains_ci(&self.name, filter_lower)
            || contains_ci(&self.sku, filter_lower)
            || self.barcode.as_deref().is_some_and(|b| contains_ci(b, filter_lower))
            || self.category.as_deref().is_some_and(|c| contains_ci(c, filter_lower))
    }
}

impl Sortable for Product {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "sku" => cmp_ci(&self.sku, &other.sku),
            "category" => cmp_ci(
                self.category.as_deref().unwrap_or(""),
                other.category.as_deref().unwrap_or(""),
            ),
            "stock" => self.stock.cmp(&other.stock),
            "cost_price" => cmp_f64(self.cost_price, other.cost_price),
            "sale_price" => cmp_f64(self.sale_price, other.sale_price),
            _ => cmp_ci(&self.name, &other.name),
        }
    }
}

/// Фильтр по остатку
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StockFilter {
    #[default]
    All,
    /// Мало или нет совсем
    Low,
    Out,
}

impl StockFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            StockFilter::All => "all",
            StockFilter::Low => "low",
            StockFilter::Out => "out",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "low" => StockFilter::Low,
            "out" => StockFilter::Out,
            _ => StockFilter::All,
        }
    }

    pub fn accepts(&self, product: &Product) -> bool {
        match self {
            StockFilter::All => true,
            StockFilter::Low => product.stock_status() != StockStatus::Ok,
            StockFilter::Out => product.stock_status() == StockStatus::OutOfStock,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ProductListState {
    pub items: Vec<Product>,
    pub list: ListState,
    /// Пустая строка: все категории
    pub category: String,
    pub stock_filter: StockFilter,
    pub is_loaded: bool,
}

impl Default for ProductListState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            list: ListState::new("name", true),
            category: String::new(),
            stock_filter: StockFilter::All,
            is_loaded: false,
        }
    }
}

impl ProductListState {
    /// Строки текущей страницы: (rows, отфильтровано, страница, всего страниц)
    pub fn visible(&self) -> (Vec<Product>, usize, usize, usize) {
        let prefiltered: Vec<Product> = self
            .items
            .iter()
            .filter(|p| self.category.is_empty() || p.category.as_deref() == Some(self.category.as_str()))
            .filter(|p| self.stock_filter.accepts(p))
            .cloned()
            .collect();
        self.list.apply(&prefiltered)
    }

    /// Уникальные категории по алфавиту
    pub fn categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = self
            .items
            .iter()
            .filter_map(|p| p.category.clone())
            .filter(|c| !c.trim().is_empty())
            .collect();
        categories.sort_by(|a, b| cmp_ci(a, b));
        categories.dedup();
        categories
    }

    pub fn find(&self, id: EntityId) -> Option<&Product> {
        self.items.iter().find(|p| p.id == id)
    }

    /// Локальная правка до ответа бэкенда; возвращает прежнюю версию для отката
    pub fn apply_edit(&mut self, id: EntityId, dto: &ProductDto) -> Option<Product> {
        let mut updated = self.find(id)?.clone();
        updated.apply(dto);
        replace_by_id(&mut self.items, updated)
    }

    /// Товары с низким остатком или без остатка
    pub fn low_stock_count(&self) -> usize {
        self.items
            .iter()
            .filter(|p| p.stock_status() != StockStatus::Ok)
            .count()
    }
}

pub fn create_state() -> RwSignal<ProductListState> {
    RwSignal::new(ProductListState::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i64, name: &str, category: &str, stock: i32) -> Product {
        Product {
            id,
            sku: format!("SKU-{id}"),
            barcode: Some(format!("77900000000{id:02}")),
            name: name.to_string(),
            description: None,
            category: Some(category.to_string()),
            cost_price: 100.0,
            sale_price: 150.0,
            stock,
            min_stock: 5,
            provider_id: None,
            active: true,
        }
    }

    fn state() -> ProductListState {
        let mut state = ProductListState::default();
        state.list.page_size = 25;
        state.items = vec![
            product(1, "Yerba Playadito", "Almacén", 40),
            product(2, "Leche entera", "Lácteos", 3),
            product(3, "Yogur bebible", "Lácteos", 0),
            product(4, "Fideos tirabuzón", "Almacén", 12),
        ];
        state
    }

    #[test]
    fn test_search_matches_barcode_and_category() {
        let mut s = state();
        s.list.search_query = "lácteos".into();
        assert_eq!(s.visible().1, 2);

        s.list.search_query = "7790000000004".into();
        let (rows, count, _, _) = s.visible();
        assert_eq!(count, 1);
        assert_eq!(rows[0].id, 4);
    }

    #[test]
    fn test_stock_filters() {
        let mut s = state();
        s.stock_filter = StockFilter::Low;
        assert_eq!(s.visible().1, 2);

        s.stock_filter = StockFilter::Out;
        let (rows, _, _, _) = s.visible();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Yogur bebible");
    }

    #[test]
    fn test_category_filter_and_sort() {
        let mut s = state();
        s.category = "Almacén".into();
        s.list.sort_field = "stock".into();
        s.list.sort_ascending = true;
        let (rows, _, _, _) = s.visible();
        assert_eq!(rows.iter().map(|p| p.id).collect::<Vec<_>>(), vec![4, 1]);
    }

    #[test]
    fn test_categories_and_low_count() {
        let s = state();
        assert_eq!(s.categories(), vec!["Almacén".to_string(), "Lácteos".to_string()]);
        assert_eq!(s.low_stock_count(), 2);
    }

    #[test]
    fn test_edit_min_stock_updates_visible_status() {
        let mut s = state();
        let row_status = |s: &ProductListState| {
            s.visible().0.iter().find(|p| p.id == 4).map(Product::stock_status)
        };
        assert_eq!(row_status(&s), Some(StockStatus::Ok));

        let mut dto = s.find(4).unwrap().to_dto();
        dto.min_stock = 20;
        dto.cost_price = 130.0;
        let previous = s.apply_edit(4, &dto).unwrap();

        assert_eq!(row_status(&s), Some(StockStatus::Low));
        assert_eq!(s.find(4).unwrap().cost_price, 130.0);
        assert_eq!(s.low_stock_count(), 3);

        // откат возвращает прежнюю строку
        replace_by_id(&mut s.items, previous);
        assert_eq!(row_status(&s), Some(StockStatus::Ok));
        assert_eq!(s.find(4).unwrap().cost_price, 100.0);
    }

    #[test]
    fn test_edit_unknown_product_is_noop() {
        let mut s = state();
        let dto = s.find(1).unwrap().to_dto();
        assert_eq!(s.apply_edit(99, &dto), None);
        assert_eq!(s.items.len(), 4);
    }

    #[test]
    fn test_stock_filter_parse() {
        assert_eq!(StockFilter::parse("low"), StockFilter::Low);
        assert_eq!(StockFilter::parse("whatever"), StockFilter::All);
        assert_eq!(StockFilter::parse(StockFilter::Out.as_str()), StockFilter::Out);
    }
}
