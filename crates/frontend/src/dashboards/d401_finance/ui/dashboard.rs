use crate::domain::a005_cash_closing::ui::details::ClosingForm;
use crate::domain::a005_cash_closing::ui::list::state::{create_state, ClosingListState};
use crate::domain::a005_cash_closing::ui::list::{load_closings, ClosingList};
use crate::domain::a006_monthly_closing::ui::list::MonthlyClosingList;
use crate::shared::components::month_selector::MonthSelector;
use crate::shared::components::stat_card::{StatCard, StatFormat, StatTone};
use crate::shared::page_frame::{ErrorBox, PageFrame, PageHeader};
use crate::shared::page_standard::PAGE_CAT_DASHBOARD;
use contracts::domain::a005_cash_closing::{ClosingBalance, CashRegisterClosing};
use contracts::shared::period::month_label;
use leptos::prelude::*;
use thaw::*;

const TAB_DAILY: &str = "cierre";
const TAB_CLOSINGS: &str = "cierres";
const TAB_MONTHS: &str = "meses";
const TAB_SUMMARY: &str = "resumen";

#[component]
fn MonthSummary(state: RwSignal<ClosingListState>) -> impl IntoView {
    let totals = Memo::new(move |_| state.with(|s| s.is_loaded.then(|| s.totals())));
    let error = Signal::derive(move || state.with(|s| s.error.clone()));

    let difference_tone = Signal::derive(move || match totals.get() {
        Some(t) => match ClosingBalance::classify(t.difference) {
            ClosingBalance::Balanced => StatTone::Good,
            ClosingBalance::Surplus => StatTone::Warning,
            ClosingBalance::Shortage => StatTone::Bad,
        },
        None => StatTone::Neutral,
    });

    view! {
        <div class="finance-summary">
            <div class="filter-panel">
                <div class="filter-panel-header">
                    <div class="filter-panel-header__left">
                        <MonthSelector
                            value=Signal::derive(move || state.with(|s| s.period))
                            on_select=Callback::new(move |period: (i32, u32)| {
                                state.update(|s| s.period = period);
                                load_closings(state);
                            })
                        />
                    </div>
                </div>
            </div>

            <ErrorBox message=error />

            <div class="stat-grid">
                <StatCard
                    label="Ventas del mes"
                    icon_name="trending-up"
                    value=Signal::derive(move || totals.get().map(|t| t.total_sales))
                    format=StatFormat::Money
                    subtitle=Signal::derive(move || totals.get().map(|t| format!("{} ventas", t.sales_count)))
                />
                <StatCard
                    label="Egresos"
                    icon_name="receipt"
                    value=Signal::derive(move || totals.get().map(|t| t.expenses))
                    format=StatFormat::Money
                />
                <StatCard
                    label="Diferencia acumulada"
                    icon_name="cash"
                    value=Signal::derive(move || totals.get().map(|t| t.difference))
                    format=StatFormat::Money
                    tone=difference_tone
                />
                <StatCard
                    label="Cierres de caja"
                    icon_name="calendar"
                    value=Signal::derive(move || totals.get().map(|t| t.count as f64))
                    format=StatFormat::Integer
                    subtitle=Signal::derive(move || {
                        let (year, month) = state.with(|s| s.period);
                        Some(month_label(year, month))
                    })
                />
            </div>
        </div>
    }
}

#[component]
pub fn FinanceDashboard() -> impl IntoView {
    let selected_tab = RwSignal::new(TAB_DAILY.to_string());
    // Закрытия месяца общие для списка и сводки
    let closings = create_state();
    load_closings(closings);

    let on_closing_saved = Callback::new(move |closing: CashRegisterClosing| {
        // Новое закрытие попадает в список, только если он показывает его месяц
        let in_period = state_contains(closings, &closing.date);
        if in_period {
            load_closings(closings);
        }
    });

    view! {
        <PageFrame page_id="d401_finance--dashboard" category=PAGE_CAT_DASHBOARD>
            <PageHeader title="Finanzas" />

            <div class="page__content">
                <TabList selected_value=selected_tab>
                    <Tab value=TAB_DAILY>"Cierre de caja"</Tab>
                    <Tab value=TAB_CLOSINGS>"Cierres de caja"</Tab>
                    <Tab value=TAB_MONTHS>"Cierres de mes"</Tab>
                    <Tab value=TAB_SUMMARY>"Resumen"</Tab>
                </TabList>

                <div class="tab-content">
                    {move || match selected_tab.get().as_str() {
                        TAB_CLOSINGS => view! { <ClosingList state=closings /> }.into_any(),
                        TAB_MONTHS => view! { <MonthlyClosingList /> }.into_any(),
                        TAB_SUMMARY => view! { <MonthSummary state=closings /> }.into_any(),
                        _ => view! { <ClosingForm on_saved=on_closing_saved /> }.into_any(),
                    }}
                </div>
            </div>
        </PageFrame>
    }
}

/// Дата закрытия (YYYY-MM-DD) попадает в выбранный месяц
fn state_contains(state: RwSignal<ClosingListState>, date: &str) -> bool {
    state.with_untracked(|s| period_contains(s.period, date))
}

fn period_contains((year, month): (i32, u32), date: &str) -> bool {
    date.get(..7) == Some(format!("{:04}-{:02}", year, month).as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_contains() {
        assert!(period_contains((2024, 6), "2024-06-30"));
        assert!(!period_contains((2024, 6), "2024-07-01"));
        assert!(!period_contains((2024, 6), "06/2024"));
    }
}
