use crate::shared::date_utils::today;
use chrono::Datelike;
use contracts::shared::period::{is_future_period, month_label, month_name, previous_month};
use leptos::prelude::*;

/// Следующий месяц: (2024, 12) -> (2025, 1)
pub fn next_month(year: i32, month: u32) -> (i32, u32) {
    if month >= 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}

/// MonthSelector: выбор месяца стрелками и селектами.
/// Будущие месяцы выбрать нельзя.
#[component]
pub fn MonthSelector(
    /// Выбранный период (year, month)
    #[prop(into)]
    value: Signal<(i32, u32)>,
    /// Callback при выборе периода
    on_select: Callback<(i32, u32)>,
) -> impl IntoView {
    let select = move |(year, month): (i32, u32)| {
        if !is_future_period(year, month, today()) {
            on_select.run((year, month));
        }
    };

    let can_go_next = move || {
        let (y, m) = value.get();
        let (ny, nm) = next_month(y, m);
        !is_future_period(ny, nm, today())
    };

    let current_year = today().year();
    let years: Vec<i32> = (current_year - 4..=current_year).rev().collect();

    view! {
        <div class="month-selector">
            <button
                class="button button--icon"
                title="Mes anterior"
                on:click=move |_| {
                    let (y, m) = value.get_untracked();
                    select(previous_month(y, m));
                }
            >
                {crate::shared::icons::icon("chevron-left")}
            </button>

            <select
                class="month-selector__month"
                on:change=move |ev| {
                    if let Ok(month) = event_target_value(&ev).parse::<u32>() {
                        select((value.get_untracked().0, month));
                    }
                }
            >
                {(1..=12u32).map(|m| {
                    let disabled = move || is_future_period(value.get().0, m, today());
                    view! {
                        <option value=m.to_string() disabled=disabled selected=move || value.get().1 == m>
                            {month_name(m).unwrap_or_default()}
                        </option>
                    }
                }).collect_view()}
            </select>

            <select
                class="month-selector__year"
                on:change=move |ev| {
                    if let Ok(year) = event_target_value(&ev).parse::<i32>() {
                        let month = value.get_untracked().1;
                        // в текущем году месяц ограничивается текущим
                        let t = today();
                        let month = if year == t.year() { month.min(t.month()) } else { month };
                        select((year, month));
                    }
                }
            >
                {years.into_iter().map(|y| view! {
                    <option value=y.to_string() selected=move || value.get().0 == y>{y.to_string()}</option>
                }).collect_view()}
            </select>

            <button
                class="button button--icon"
                title="Mes siguiente"
                disabled=move || !can_go_next()
                on:click=move |_| {
                    let (y, m) = value.get_untracked();
                    select(next_month(y, m));
                }
            >
                {crate::shared::icons::icon("chevron-right")}
            </button>

            <span class="month-selector__label">{move || { let (y, m) = value.get(); month_label(y, m) }}</span>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_month() {
        assert_eq!(next_month(2024, 12), (2025, 1));
        assert_eq!(next_month(2024, 3), (2024, 4));
    }
}
