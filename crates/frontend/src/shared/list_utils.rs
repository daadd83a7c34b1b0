/// Универсальные утилиты для работы со списками (поиск, сортировка, пагинация, UI компоненты)
use contracts::domain::common::{AggregateRoot, EntityId};
use leptos::prelude::*;
use std::cmp::Ordering;

use super::config::config;
use super::debounce::debounced;

/// Trait для типов данных, поддерживающих поиск
pub trait Searchable {
    /// Проверяет, соответствует ли объект поисковому запросу (уже в нижнем регистре)
    fn matches_filter(&self, filter_lower: &str) -> bool;
}

/// Trait для типов данных, поддерживающих сортировку
pub trait Sortable {
    /// Сравнивает два объекта по указанному полю
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering;
}

/// Регистронезависимое вхождение
pub fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

/// Сравнение строк без учёта регистра
pub fn cmp_ci(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

pub fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Подсветка совпадений в тексте (case-insensitive)
pub fn highlight_matches(text: &str, filter: &str) -> AnyView {
    let filter = filter.trim();
    if filter.chars().count() < config().search.min_query_len {
        return view! { <span>{text.to_string()}</span> }.into_any();
    }

    let filter_lower = filter.to_lowercase();
    let text_lower = text.to_lowercase();

    // to_lowercase может поменять длину строки (не-ASCII): тогда без подсветки
    if text_lower.len() != text.len() || !text_lower.contains(&filter_lower) {
        return view! { <span>{text.to_string()}</span> }.into_any();
    }

    let mut parts: Vec<AnyView> = Vec::new();
    let mut last_pos = 0;

    while let Some(pos) = text_lower[last_pos..].find(&filter_lower) {
        let actual_pos = last_pos + pos;
        if actual_pos > last_pos {
            parts.push(view! { <span>{text[last_pos..actual_pos].to_string()}</span> }.into_any());
        }
        let match_end = actual_pos + filter_lower.len();
        parts.push(view! {
            <mark class="search-highlight">{text[actual_pos..match_end].to_string()}</mark>
        }.into_any());
        last_pos = match_end;
    }

    if last_pos < text.len() {
        parts.push(view! { <span>{text[last_pos..].to_string()}</span> }.into_any());
    }

    view! { <>{parts}</> }.into_any()
}

/// Сортирует список по указанному полю
pub fn sort_list<T: Sortable>(items: &mut [T], field: &str, ascending: bool) {
    items.sort_by(|a, b| {
        let cmp = a.compare_by_field(b, field);
        if ascending { cmp } else { cmp.reverse() }
    });
}

/// Фильтрует список по поисковому запросу.
/// Запрос короче `min_len` символов (после trim) не фильтрует.
pub fn filter_list<T: Searchable + Clone>(items: &[T], filter: &str, min_len: usize) -> Vec<T> {
    let filter = filter.trim();
    if filter.is_empty() || filter.chars().count() < min_len {
        return items.to_vec();
    }

    let filter_lower = filter.to_lowercase();
    items
        .iter()
        .filter(|item| item.matches_filter(&filter_lower))
        .cloned()
        .collect()
}

/// Количество страниц (минимум 1)
pub fn total_pages(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    total.div_ceil(page_size).max(1)
}

/// Срез страницы. Номер страницы (с 0) ограничивается последней страницей.
/// Возвращает (элементы страницы, фактическая страница, всего страниц).
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> (Vec<T>, usize, usize) {
    let pages = total_pages(items.len(), page_size);
    let page = page.min(pages - 1);
    if page_size == 0 {
        return (items.to_vec(), 0, 1);
    }
    let start = page * page_size;
    let end = (start + page_size).min(items.len());
    let slice = if start < items.len() {
        items[start..end].to_vec()
    } else {
        Vec::new()
    };
    (slice, page, pages)
}

/// Состояние клиентского списка: поиск, сортировка, страница
#[derive(Debug, Clone, PartialEq)]
pub struct ListState {
    pub search_query: String,
    pub sort_field: String,
    pub sort_ascending: bool,
    pub page: usize,
    pub page_size: usize,
}

impl ListState {
    pub fn new(sort_field: &str, sort_ascending: bool) -> Self {
        Self {
            search_query: String::new(),
            sort_field: sort_field.to_string(),
            sort_ascending,
            page: 0,
            page_size: config().lists.default_page_size,
        }
    }

    /// Тот же столбец: смена направления, новый: по возрастанию; страница сбрасывается
    pub fn toggle_sort(&mut self, field: &str) {
        if self.sort_field == field {
            self.sort_ascending = !self.sort_ascending;
        } else {
            self.sort_field = field.to_string();
            self.sort_ascending = true;
        }
        self.page = 0;
    }

    pub fn set_query(&mut self, query: String) {
        if self.search_query != query {
            self.search_query = query;
            self.page = 0;
        }
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.page = 0;
    }

    /// Полный цикл: фильтр → сортировка → страница.
    /// Возвращает (строки страницы, число отфильтрованных, страница, всего страниц).
    pub fn apply<T>(&self, items: &[T]) -> (Vec<T>, usize, usize, usize)
    where
        T: Searchable + Sortable + Clone,
    {
        let mut filtered = filter_list(items, &self.search_query, config().search.min_query_len);
        sort_list(&mut filtered, &self.sort_field, self.sort_ascending);
        let count = filtered.len();
        let (rows, page, pages) = paginate(&filtered, self.page, self.page_size);
        (rows, count, page, pages)
    }
}

// ============================================================================
// Оптимистичные изменения локального списка
// ============================================================================

/// Заменяет запись с тем же id; возвращает прежнюю версию для отката
pub fn replace_by_id<T: AggregateRoot>(items: &mut [T], item: T) -> Option<T> {
    let pos = items.iter().position(|x| x.id() == item.id())?;
    Some(std::mem::replace(&mut items[pos], item))
}

/// Удаляет запись; возвращает позицию и запись для отката
pub fn remove_by_id<T: AggregateRoot>(items: &mut Vec<T>, id: EntityId) -> Option<(usize, T)> {
    let pos = items.iter().position(|x| x.id() == id)?;
    Some((pos, items.remove(pos)))
}

/// Возвращает удалённую запись на прежнее место
pub fn restore_at<T>(items: &mut Vec<T>, index: usize, item: T) {
    let index = index.min(items.len());
    items.insert(index, item);
}

/// Получить индикатор сортировки для заголовка
pub fn get_sort_indicator(current_field: &str, field: &str, ascending: bool) -> &'static str {
    if current_field == field {
        if ascending { " ▲" } else { " ▼" }
    } else {
        " ⇅"
    }
}

pub fn get_sort_class(field: &str, current_field: &str) -> &'static str {
    if field == current_field {
        "table__sort-indicator table__sort-indicator--active"
    } else {
        "table__sort-indicator"
    }
}

/// Компонент поиска с debounce и кнопкой очистки
#[component]
pub fn SearchInput(
    /// Текущее значение фильтра (для подсветки активного поиска)
    #[prop(into)]
    value: Signal<String>,
    /// Callback для обновления значения фильтра (после debounce)
    #[prop(into)]
    on_change: Callback<String>,
    /// Placeholder текст
    #[prop(optional, into)]
    placeholder: String,
) -> impl IntoView {
    let placeholder = if placeholder.is_empty() {
        "Buscar...".to_string()
    } else {
        placeholder
    };

    // Локальное состояние для input (до debounce)
    let (input_value, set_input_value) = signal(value.get_untracked());

    // Внешний сброс фильтра (например, после сканирования) обновляет поле
    Effect::new(move |_| {
        let external = value.get();
        if external != input_value.get_untracked() {
            set_input_value.set(external);
        }
    });

    let emit = debounced(config().search.debounce_ms, on_change);

    let is_filter_active = move || {
        value.get().trim().chars().count() >= config().search.min_query_len
    };

    // Пустое значение через emit гасит отложенный ввод, чтобы он не вернул старый запрос
    let clear_filter = move |_| {
        set_input_value.set(String::new());
        emit(String::new());
        on_change.run(String::new());
    };

    view! {
        <div class="search-input" class:search-input--active=is_filter_active>
            {super::icons::icon("search")}
            <input
                type="text"
                placeholder=placeholder
                prop:value=move || input_value.get()
                on:input=move |ev| {
                    let val = event_target_value(&ev);
                    set_input_value.set(val.clone());
                    emit(val);
                }
            />
            <Show when=move || !input_value.get().is_empty()>
                <button class="search-input__clear" on:click=clear_filter title="Limpiar">
                    {super::icons::icon("x")}
                </button>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        name: &'static str,
        qty: i32,
    }

    impl Searchable for Row {
        fn matches_filter(&self, filter_lower: &str) -> bool {
            contains_ci(self.name, filter_lower)
        }
    }

    impl Sortable for Row {
        fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
            match field {
                "qty" => self.qty.cmp(&other.qty),
                _ => cmp_ci(self.name, other.name),
            }
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { name: "Yerba Mate", qty: 4 },
            Row { name: "azúcar", qty: 10 },
            Row { name: "Aceite", qty: 1 },
            Row { name: "Mate cocido", qty: 7 },
        ]
    }

    #[test]
    fn test_filter_case_insensitive() {
        let found = filter_list(&rows(), "  MATE ", 2);
        let names: Vec<_> = found.iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["Yerba Mate", "Mate cocido"]);
    }

    #[test]
    fn test_short_filter_returns_all() {
        assert_eq!(filter_list(&rows(), "m", 2).len(), 4);
        assert_eq!(filter_list(&rows(), "   ", 2).len(), 4);
    }

    #[test]
    fn test_sort_list() {
        let mut items = rows();
        sort_list(&mut items, "qty", true);
        assert_eq!(items.iter().map(|r| r.qty).collect::<Vec<_>>(), vec![1, 4, 7, 10]);

        sort_list(&mut items, "name", false);
        assert_eq!(items[0].name, "Yerba Mate");
        assert_eq!(items[3].name, "Aceite");
    }

    #[test]
    fn test_paginate() {
        let items: Vec<i32> = (1..=23).collect();

        let (page, current, pages) = paginate(&items, 0, 10);
        assert_eq!(page, (1..=10).collect::<Vec<_>>());
        assert_eq!((current, pages), (0, 3));

        let (page, current, _) = paginate(&items, 2, 10);
        assert_eq!(page, vec![21, 22, 23]);
        assert_eq!(current, 2);

        // страница за пределами: последняя
        let (page, current, _) = paginate(&items, 9, 10);
        assert_eq!(page, vec![21, 22, 23]);
        assert_eq!(current, 2);
    }

    #[test]
    fn test_paginate_empty() {
        let items: Vec<i32> = vec![];
        let (page, current, pages) = paginate(&items, 3, 10);
        assert!(page.is_empty());
        assert_eq!((current, pages), (0, 1));
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 25), 1);
        assert_eq!(total_pages(25, 25), 1);
        assert_eq!(total_pages(26, 25), 2);
        assert_eq!(total_pages(5, 0), 1);
    }

    #[test]
    fn test_toggle_sort() {
        let mut state = ListState {
            search_query: String::new(),
            sort_field: "name".into(),
            sort_ascending: true,
            page: 3,
            page_size: 10,
        };

        state.toggle_sort("name");
        assert!(!state.sort_ascending);
        assert_eq!(state.page, 0);

        state.page = 2;
        state.toggle_sort("qty");
        assert_eq!(state.sort_field, "qty");
        assert!(state.sort_ascending);
        assert_eq!(state.page, 0);
    }

    #[test]
    fn test_set_query_resets_page_only_on_change() {
        let mut state = ListState {
            search_query: "mate".into(),
            sort_field: "name".into(),
            sort_ascending: true,
            page: 2,
            page_size: 10,
        };
        state.set_query("mate".into());
        assert_eq!(state.page, 2);
        state.set_query("yerba".into());
        assert_eq!(state.page, 0);
    }

    #[test]
    fn test_apply_pipeline() {
        let state = ListState {
            search_query: "ma".into(),
            sort_field: "qty".into(),
            sort_ascending: false,
            page: 0,
            page_size: 1,
        };
        let (page_rows, count, page, pages) = state.apply(&rows());
        assert_eq!(count, 2);
        assert_eq!(pages, 2);
        assert_eq!(page, 0);
        assert_eq!(page_rows[0].name, "Mate cocido");
    }

    #[derive(Debug, Clone, PartialEq)]
    struct Entity {
        id: EntityId,
        name: &'static str,
    }

    impl AggregateRoot for Entity {
        fn id(&self) -> EntityId {
            self.id
        }
        fn collection_name() -> &'static str {
            "test"
        }
        fn element_name() -> &'static str {
            "Test"
        }
        fn list_name() -> &'static str {
            "Tests"
        }
    }

    #[test]
    fn test_optimistic_replace_and_rollback() {
        let mut items = vec![Entity { id: 1, name: "a" }, Entity { id: 2, name: "b" }];

        let previous = replace_by_id(&mut items, Entity { id: 2, name: "B" });
        assert_eq!(previous, Some(Entity { id: 2, name: "b" }));
        assert_eq!(items[1].name, "B");

        // откат
        if let Some(prev) = previous {
            replace_by_id(&mut items, prev);
        }
        assert_eq!(items[1].name, "b");

        assert_eq!(replace_by_id(&mut items, Entity { id: 9, name: "x" }), None);
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn test_optimistic_remove_and_restore() {
        let mut items = vec![
            Entity { id: 1, name: "a" },
            Entity { id: 2, name: "b" },
            Entity { id: 3, name: "c" },
        ];
        let (index, removed) = remove_by_id(&mut items, 2).unwrap();
        assert_eq!(index, 1);
        assert_eq!(items.len(), 2);

        restore_at(&mut items, index, removed);
        assert_eq!(items.iter().map(|e| e.id).collect::<Vec<_>>(), vec![1, 2, 3]);

        assert!(remove_by_id(&mut items, 42).is_none());
        restore_at(&mut items, 99, Entity { id: 4, name: "d" });
        assert_eq!(items.last().map(|e| e.id), Some(4));
    }

    #[test]
    fn test_sort_indicator() {
        assert_eq!(get_sort_indicator("name", "name", true), " ▲");
        assert_eq!(get_sort_indicator("name", "name", false), " ▼");
        assert_eq!(get_sort_indicator("qty", "name", true), " ⇅");
    }
}
