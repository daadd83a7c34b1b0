pub mod state;

use self::state::create_state;
use crate::domain::a006_monthly_closing::api;
use crate::shared::components::month_selector::MonthSelector;
use crate::shared::components::table::{format_money_signed, TableCellMoney};
use crate::shared::date_utils::{format_datetime, today};
use crate::shared::icons::icon;
use crate::shared::modal::ConfirmDialog;
use crate::shared::notifications::use_notifications;
use crate::shared::page_frame::ErrorBox;
use contracts::domain::a006_monthly_closing::MonthlyClosing;
use contracts::shared::period::month_label;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

#[component]
pub fn MonthlyClosingList(
    /// Вызывается после нового закрытия месяца
    #[prop(optional)]
    on_closed: Option<Callback<MonthlyClosing>>,
) -> impl IntoView {
    let notifications = use_notifications();
    let state = create_state();
    let (error, set_error) = signal::<Option<String>>(None);
    let (saving, set_saving) = signal(false);
    let confirming = RwSignal::new(false);

    let load_items = move || {
        set_error.set(None);
        spawn_local(async move {
            match api::fetch_monthly_closings().await {
                Ok(items) => state.update(|s| {
                    s.items = items;
                    s.is_loaded = true;
                }),
                Err(e) => {
                    log::error!("fetch monthly closings: {}", e);
                    set_error.set(Some(e.to_string()));
                }
            }
        });
    };

    load_items();

    let blocked_reason = Memo::new(move |_| state.with(|s| s.blocked_reason(today())));

    let close_month = move || {
        confirming.set(false);
        let request = state.with_untracked(|s| s.request());
        // Повторная проверка: список мог обновиться, пока был открыт диалог
        if let Some(reason) = state.with_untracked(|s| s.blocked_reason(today())) {
            notifications.warning(reason);
            return;
        }
        set_saving.set(true);
        spawn_local(async move {
            match api::create_monthly_closing(&request).await {
                Ok(closing) => {
                    log::info!("month {}/{} closed", closing.month, closing.year);
                    notifications.success(format!("{} cerrado", closing.period_label()));
                    state.update(|s| s.items.push(closing.clone()));
                    if let Some(cb) = on_closed {
                        cb.run(closing);
                    }
                }
                Err(e) => {
                    log::error!("close month {}/{}: {}", request.month, request.year, e);
                    notifications.error(format!("No se pudo cerrar el mes: {}", e));
                }
            }
            set_saving.set(false);
        });
    };

    view! {
        <div class="monthly-closing-list">
            <div class="filter-panel">
                <div class="filter-panel-header">
                    <div class="filter-panel-header__left">
                        <MonthSelector
                            value=Signal::derive(move || state.with(|s| s.period))
                            on_select=Callback::new(move |period: (i32, u32)| state.update(|s| s.period = period))
                        />
                        <Button
                            appearance=ButtonAppearance::Primary
                            disabled=Signal::derive(move || saving.get() || blocked_reason.with(Option::is_some))
                            on_click=move |_| confirming.set(true)
                        >
                            {icon("lock")}
                            "Cerrar mes"
                        </Button>
                    </div>
                    <div class="filter-panel-header__right">
                        {move || blocked_reason.get().map(|reason| view! {
                            <span class="hint">{reason}</span>
                        })}
                    </div>
                </div>
            </div>

            <ErrorBox message=error />

            <div class="table-wrapper">
                <Table attr:style="width: 100%;">
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCell>"Período"</TableHeaderCell>
                            <TableHeaderCell>"Cierres"</TableHeaderCell>
                            <TableHeaderCell>"Ventas"</TableHeaderCell>
                            <TableHeaderCell>"Total vendido"</TableHeaderCell>
                            <TableHeaderCell>"Compras"</TableHeaderCell>
                            <TableHeaderCell>"Egresos"</TableHeaderCell>
                            <TableHeaderCell>"Diferencias"</TableHeaderCell>
                            <TableHeaderCell>"Resultado"</TableHeaderCell>
                            <TableHeaderCell>"Cerrado el"</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        <For
                            each=move || state.with(|s| s.sorted())
                            key=|c| c.id
                            children=move |c: MonthlyClosing| {
                                let period = c.period_label();
                                let closings_count = c.closings_count;
                                let sales_count = c.sales_count;
                                let (sales, purchases, expenses, net) =
                                    (c.total_sales, c.total_purchases, c.total_expenses, c.net_result);
                                let difference = format_money_signed(c.total_difference);
                                let closed_at = c.closed_at.as_deref().map(format_datetime).unwrap_or_default();
                                view! {
                                    <TableRow>
                                        <TableCell><strong>{period}</strong></TableCell>
                                        <TableCell class="text-right">{closings_count}</TableCell>
                                        <TableCell class="text-right">{sales_count}</TableCell>
                                        <TableCellMoney value=Signal::derive(move || Some(sales)) />
                                        <TableCellMoney value=Signal::derive(move || Some(purchases)) />
                                        <TableCellMoney value=Signal::derive(move || Some(expenses)) />
                                        <TableCell class="text-right">{difference}</TableCell>
                                        <TableCellMoney value=Signal::derive(move || Some(net)) color_by_sign=true bold=true />
                                        <TableCell>{closed_at}</TableCell>
                                    </TableRow>
                                }
                            }
                        />
                    </TableBody>
                </Table>
                <Show when=move || state.with(|s| s.is_loaded && s.items.is_empty())>
                    <div class="table__empty">"Todavía no hay meses cerrados"</div>
                </Show>
            </div>

            <Show when=move || confirming.get()>
                <ConfirmDialog
                    title="Cerrar mes"
                    message=state.with_untracked(|s| {
                        let (year, month) = s.period;
                        format!(
                            "¿Cerrar {}? El cierre resume los cierres de caja y las compras del mes y no se puede repetir.",
                            month_label(year, month)
                        )
                    })
                    confirm_label="Cerrar mes"
                    on_confirm=Callback::new(move |_| close_month())
                    on_cancel=Callback::new(move |_| confirming.set(false))
                />
            </Show>
        </div>
    }
}
