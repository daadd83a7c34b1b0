pub mod state;

use self::state::ClosingListState;
use crate::domain::a005_cash_closing::api;
use crate::domain::a005_cash_closing::ui::balance_badge;
use crate::shared::components::month_selector::MonthSelector;
use crate::shared::components::table::{format_money, TableCellMoney};
use crate::shared::date_utils::format_date;
use crate::shared::modal::Modal;
use crate::shared::page_frame::ErrorBox;
use contracts::domain::a005_cash_closing::CashRegisterClosing;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// Загружает закрытия выбранного месяца в общий state
pub fn load_closings(state: RwSignal<ClosingListState>) {
    let Some(query) = state.with_untracked(ClosingListState::query) else {
        return;
    };
    state.update(|s| s.error = None);
    spawn_local(async move {
        match api::fetch_closings(&query).await {
            Ok(items) => state.update(|s| {
                s.items = items;
                s.is_loaded = true;
            }),
            Err(e) => {
                log::error!("fetch closings {}..{}: {}", query.desde, query.hasta, e);
                state.update(|s| s.error = Some(e.to_string()));
            }
        }
    });
}

/// Закрытия кассы за месяц; state принадлежит панели финансов,
/// сводка месяца читает его же
#[component]
pub fn ClosingList(state: RwSignal<ClosingListState>) -> impl IntoView {
    let error = Signal::derive(move || state.with(|s| s.error.clone()));
    let selected = RwSignal::new(None::<CashRegisterClosing>);
    let totals = Memo::new(move |_| state.with(|s| s.totals()));

    if !state.with_untracked(|s| s.is_loaded) {
        load_closings(state);
    }

    view! {
        <div class="closing-list">
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
                    <div class="filter-panel-header__right totals-bar">
                        <span>{move || format!("{} cierres", totals.get().count)}</span>
                        <strong>{move || format!("Ventas: {}", format_money(totals.get().total_sales))}</strong>
                    </div>
                </div>
            </div>

            <ErrorBox message=error />

            <div class="table-wrapper">
                <Table attr:style="width: 100%;">
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCell>"Fecha"</TableHeaderCell>
                            <TableHeaderCell>"Ventas"</TableHeaderCell>
                            <TableHeaderCell>"Total vendido"</TableHeaderCell>
                            <TableHeaderCell>"Egresos"</TableHeaderCell>
                            <TableHeaderCell>"Esperado"</TableHeaderCell>
                            <TableHeaderCell>"Contado"</TableHeaderCell>
                            <TableHeaderCell>"Diferencia"</TableHeaderCell>
                            <TableHeaderCell>"Cerró"</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        <For
                            each=move || state.with(|s| s.sorted())
                            key=|c| c.id
                            children=move |closing: CashRegisterClosing| {
                                let for_details = closing.clone();
                                let c = closing.clone();
                                view! {
                                    <TableRow
                                        on:click=move |_| selected.set(Some(for_details.clone()))
                                        attr:style="cursor: pointer;"
                                    >
                                        <TableCell>{format_date(&c.date)}</TableCell>
                                        <TableCell class="text-right">{c.sales_count}</TableCell>
                                        <TableCellMoney value=Signal::derive(move || Some(closing.total_sales)) bold=true />
                                        <TableCellMoney value=Signal::derive(move || Some(closing.expenses)) />
                                        <TableCellMoney value=Signal::derive(move || Some(closing.expected_cash)) />
                                        <TableCellMoney value=Signal::derive(move || Some(closing.actual_cash)) />
                                        <TableCell>{balance_badge(c.difference)}</TableCell>
                                        <TableCell>{c.closed_by.clone().unwrap_or_default()}</TableCell>
                                    </TableRow>
                                }
                            }
                        />
                    </TableBody>
                </Table>
                <Show when=move || state.with(|s| s.is_loaded && s.items.is_empty())>
                    <div class="table__empty">"No hay cierres de caja en el mes"</div>
                </Show>
            </div>

            {move || selected.get().map(|c| view! {
                <Modal
                    title=format!("Cierre del {}", format_date(&c.date))
                    on_close=Callback::new(move |_| selected.set(None))
                >
                    <div class="summary-block">
                        <div class="summary-row"><span>"Monto inicial"</span><span>{format_money(c.opening_amount)}</span></div>
                        <div class="summary-row"><span>"Ventas en efectivo"</span><span>{format_money(c.cash_sales)}</span></div>
                        <div class="summary-row"><span>"Ventas con tarjeta"</span><span>{format_money(c.card_sales)}</span></div>
                        <div class="summary-row"><span>"Transferencias"</span><span>{format_money(c.transfer_sales)}</span></div>
                        <div class="summary-row"><span>"Egresos"</span><span>{format_money(c.expenses)}</span></div>
                        <div class="summary-row"><span>"Efectivo esperado"</span><strong>{format_money(c.expected_cash)}</strong></div>
                        <div class="summary-row"><span>"Efectivo contado"</span><strong>{format_money(c.actual_cash)}</strong></div>
                        <div class="summary-row"><span>"Diferencia"</span>{balance_badge(c.difference)}</div>
                        {c.notes.clone().map(|n| view! { <p class="summary-notes">{n}</p> })}
                    </div>
                </Modal>
            })}
        </div>
    }
}
