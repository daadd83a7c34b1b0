use crate::shared::config::config;
use crate::shared::icons::icon;
use leptos::prelude::*;

/// Текст «Mostrando 26-50 de 120» для страницы `page` (с нуля)
pub fn range_summary(page: usize, page_size: usize, total: usize) -> String {
    if total == 0 {
        return "Sin registros".to_string();
    }
    let first = (page * page_size + 1).min(total);
    let last = ((page + 1) * page_size).min(total);
    format!("Mostrando {}-{} de {}", first, last, total)
}

fn nav_button(
    icon_name: &'static str,
    title: &'static str,
    disabled: impl Fn() -> bool + Send + Sync + 'static,
    target: impl Fn() -> usize + Send + Sync + 'static,
    on_page_change: Callback<usize>,
) -> impl IntoView {
    view! {
        <button
            class="pagination-btn"
            title=title
            disabled=disabled
            on:click=move |_| on_page_change.run(target())
        >
            {icon(icon_name)}
        </button>
    }
}

/// Панель постраничной навигации под таблицей.
///
/// Кнопки «в начало / назад / вперёд / в конец» и выбор размера страницы;
/// варианты размера берутся из `[lists] page_size_options`.
#[component]
pub fn PaginationControls(
    #[prop(into)] current_page: Signal<usize>,
    #[prop(into)] total_pages: Signal<usize>,
    #[prop(into)] total_count: Signal<usize>,
    #[prop(into)] page_size: Signal<usize>,
    on_page_change: Callback<usize>,
    on_page_size_change: Callback<usize>,
) -> impl IntoView {
    let at_start = move || current_page.get() == 0;
    let at_end = move || current_page.get() + 1 >= total_pages.get();
    let last_page = move || total_pages.get().saturating_sub(1);

    let options = config().lists.page_size_options.clone();

    view! {
        <div class="pagination-controls">
            {nav_button("chevrons-left", "Primera página", at_start, || 0, on_page_change)}
            {nav_button(
                "chevron-left",
                "Página anterior",
                at_start,
                move || current_page.get().saturating_sub(1),
                on_page_change,
            )}
            <span class="pagination-info">
                {move || {
                    format!(
                        "{} · pág. {}/{}",
                        range_summary(current_page.get(), page_size.get(), total_count.get()),
                        current_page.get() + 1,
                        total_pages.get().max(1),
                    )
                }}
            </span>
            {nav_button(
                "chevron-right",
                "Página siguiente",
                at_end,
                move || (current_page.get() + 1).min(last_page()),
                on_page_change,
            )}
            {nav_button("chevrons-right", "Última página", at_end, last_page, on_page_change)}
            <select
                class="page-size-select"
                on:change=move |ev| {
                    if let Ok(size) = event_target_value(&ev).parse::<usize>() {
                        on_page_size_change.run(size);
                    }
                }
            >
                {options
                    .into_iter()
                    .map(|size| {
                        view! {
                            <option value=size.to_string() selected=move || page_size.get() == size>
                                {format!("{} por página", size)}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_summary() {
        assert_eq!(range_summary(0, 25, 0), "Sin registros");
        assert_eq!(range_summary(0, 25, 120), "Mostrando 1-25 de 120");
        assert_eq!(range_summary(4, 25, 120), "Mostrando 101-120 de 120");
        assert_eq!(range_summary(0, 25, 7), "Mostrando 1-7 de 7");
    }
}
