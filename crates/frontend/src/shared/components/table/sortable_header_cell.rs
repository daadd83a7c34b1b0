//! Компонент сортируемой ячейки заголовка таблицы

use crate::shared::list_utils::{get_sort_class, get_sort_indicator};
use leptos::prelude::*;
use thaw::*;

/// Ячейка заголовка: клик переключает сортировку по `sort_field`,
/// рядом с подписью рисуется индикатор (▲▼⇅)
#[component]
pub fn SortableHeaderCell(
    /// Текст заголовка
    label: &'static str,

    /// Поле для сортировки
    sort_field: &'static str,

    /// Текущее поле сортировки из state
    #[prop(into)]
    current_sort_field: Signal<String>,

    /// Направление сортировки из state
    #[prop(into)]
    sort_ascending: Signal<bool>,

    /// Callback при клике на заголовок
    on_sort: Callback<&'static str>,

    /// Выравнивание заголовка (left/right)
    #[prop(optional, default = "left")]
    align: &'static str,
) -> impl IntoView {
    let header_class = if align == "right" {
        "table__sortable-header table__sortable-header--right"
    } else {
        "table__sortable-header"
    };

    view! {
        <TableHeaderCell>
            <div class=header_class on:click=move |_| on_sort.run(sort_field)>
                {label}
                <span class=move || get_sort_class(sort_field, &current_sort_field.get())>
                    {move || {
                        get_sort_indicator(&current_sort_field.get(), sort_field, sort_ascending.get())
                    }}
                </span>
            </div>
        </TableHeaderCell>
    }
}
