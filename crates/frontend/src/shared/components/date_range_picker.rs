use crate::shared::date_utils::{current_period, parse_iso_date, today_iso};
use chrono::Datelike;
use contracts::shared::period::{month_bounds_iso, previous_month};
use leptos::prelude::*;
use thaw::*;

/// DateRangePicker: два поля дат + кнопки быстрого выбора
/// (сегодня, текущий месяц, месяц до выбранного)
#[component]
pub fn DateRangePicker(
    /// Значение даты "от" в формате yyyy-mm-dd
    #[prop(into)]
    date_from: Signal<String>,

    /// Значение даты "до" в формате yyyy-mm-dd
    #[prop(into)]
    date_to: Signal<String>,

    /// Callback при изменении диапазона дат (from, to)
    on_change: Callback<(String, String)>,
) -> impl IntoView {
    let emit_month = move |(year, month): (i32, u32)| {
        if let Some(range) = month_bounds_iso(year, month) {
            on_change.run(range);
        }
    };

    let on_today = move |_| {
        let today = today_iso();
        on_change.run((today.clone(), today));
    };

    let on_current_month = move |_| emit_month(current_period());

    // Предыдущий месяц считается от текущей даты "от"
    let on_previous_month = move |_| {
        let base = parse_iso_date(&date_from.get_untracked())
            .map(|d| (d.year(), d.month()))
            .unwrap_or_else(current_period);
        emit_month(previous_month(base.0, base.1));
    };

    view! {
        <Flex class="date-range-picker" align=FlexAlign::Center gap=FlexGap::Small>
            <input
                type="date"
                class="date-range-picker__input"
                prop:value=date_from
                on:change=move |ev| on_change.run((event_target_value(&ev), date_to.get_untracked()))
            />
            <div>"—"</div>
            <input
                type="date"
                class="date-range-picker__input"
                prop:value=date_to
                on:change=move |ev| on_change.run((date_from.get_untracked(), event_target_value(&ev)))
            />

            <Button size=ButtonSize::Small on_click=on_today>"Hoy"</Button>
            <Button size=ButtonSize::Small on_click=on_current_month>"Este mes"</Button>
            <Button size=ButtonSize::Small on_click=on_previous_month>"Mes anterior"</Button>
        </Flex>
    }
}
