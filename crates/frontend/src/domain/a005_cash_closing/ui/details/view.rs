use super::view_model::ClosingFormViewModel;
use crate::domain::a005_cash_closing::ui::balance_badge;
use crate::shared::components::table::format_money;
use crate::shared::date_utils::format_date;
use crate::shared::icons::icon;
use crate::shared::notifications::use_notifications;
use crate::shared::page_frame::ErrorBox;
use contracts::domain::a005_cash_closing::{CashRegisterClosing, DailySummary};
use leptos::prelude::*;

#[component]
pub fn ClosingForm(
    /// Сохранённое закрытие (список и сводка перезагружаются)
    on_saved: Callback<CashRegisterClosing>,
) -> impl IntoView {
    let notifications = use_notifications();
    let vm = ClosingFormViewModel::new();
    vm.load_summary();

    let amount_field = move |label: &'static str, value: RwSignal<String>| {
        view! {
            <div class="form-group">
                <label>{label}</label>
                <input
                    type="text"
                    inputmode="decimal"
                    placeholder="0,00"
                    prop:value=move || value.get()
                    on:input=move |ev| value.set(event_target_value(&ev))
                />
            </div>
        }
    };

    let summary_row = move |label: &'static str, get: fn(&DailySummary) -> f64| {
        view! {
            <div class="summary-row">
                <span>{label}</span>
                <span>{move || vm.summary.with(|s| s.as_ref().map(|s| format_money(get(s))).unwrap_or_default())}</span>
            </div>
        }
    };

    view! {
        <div class="details-container closing-form">
            <ErrorBox message=vm.error />

            <div class="closing-form__columns">
                <section class="closing-form__summary">
                    <div class="form-group">
                        <label>"Fecha"</label>
                        <input
                            type="date"
                            prop:value=move || vm.date.get()
                            on:change=move |ev| {
                                vm.date.set(event_target_value(&ev));
                                vm.load_summary();
                            }
                        />
                    </div>

                    <Show when=move || vm.loading.get()>
                        <div class="details-loading">"Cargando resumen..."</div>
                    </Show>

                    <Show when=move || vm.summary.with(Option::is_some)>
                        <div class="summary-block">
                            <div class="summary-row">
                                <span>"Ventas del día"</span>
                                <span>{move || vm.summary.with(|s| s.as_ref().map(|s| s.sales_count).unwrap_or(0))}</span>
                            </div>
                            {summary_row("Efectivo", |s| s.cash_sales)}
                            {summary_row("Tarjetas", |s| s.card_sales)}
                            {summary_row("Transferencias", |s| s.transfer_sales)}
                            {summary_row("Total", |s| s.total_sales)}
                        </div>
                    </Show>

                    <Show when=move || vm.already_closed()>
                        <div class="warning-box">
                            {icon("lock")}
                            {move || format!("La caja del {} ya fue cerrada", format_date(&vm.date.get()))}
                        </div>
                    </Show>
                </section>

                <section class="closing-form__amounts">
                    {amount_field("Monto inicial", vm.opening_text)}
                    {amount_field("Egresos", vm.expenses_text)}
                    {amount_field("Efectivo contado", vm.actual_text)}
                    <div class="form-group">
                        <label>"Observaciones"</label>
                        <textarea
                            rows="2"
                            prop:value=move || vm.notes.get()
                            on:input=move |ev| vm.notes.set(event_target_value(&ev))
                        />
                    </div>

                    {move || vm.preview().map(|(expected, difference)| view! {
                        <div class="summary-block closing-form__preview">
                            <div class="summary-row">
                                <span>"Efectivo esperado"</span>
                                <strong>{format_money(expected)}</strong>
                            </div>
                            <div class="summary-row">
                                <span>"Diferencia"</span>
                                {balance_badge(difference)}
                            </div>
                        </div>
                    })}

                    <div class="details-actions">
                        <button
                            class="button button--primary"
                            disabled=move || vm.saving.get() || vm.loading.get() || vm.already_closed()
                            on:click=move |_| vm.save_command(notifications, on_saved)
                        >
                            {icon("lock")}
                            {move || if vm.saving.get() { "Cerrando..." } else { "Cerrar caja" }}
                        </button>
                    </div>
                </section>
            </div>
        </div>
    }
}
