pub mod state;

use self::state::create_state;
use crate::domain::a003_sale::api::{self, SalesQuery};
use crate::shared::components::date_range_picker::DateRangePicker;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::table::{format_money, SortableHeaderCell, TableCellMoney};
use crate::shared::date_utils::format_datetime;
use crate::shared::icons::icon;
use crate::shared::list_utils::SearchInput;
use crate::shared::modal::Modal;
use crate::shared::page_frame::{ErrorBox, PageFrame, PageHeader};
use crate::shared::page_standard::PAGE_CAT_LIST;
use contracts::domain::a003_sale::{PaymentMethod, Sale, SaleItem};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

#[component]
fn SaleDetails(sale: Sale) -> impl IntoView {
    let items = sale.items.clone();
    view! {
        <div class="details-container sale-details">
            <div class="details-summary">
                <span>{format_datetime(&sale.created_at)}</span>
                <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Informative>
                    {sale.payment_method.label()}
                </Badge>
                {sale.cashier.clone().map(|c| view! { <span>{format!("Cajero: {}", c)}</span> })}
            </div>
            <Table attr:style="width: 100%;">
                <TableHeader>
                    <TableRow>
                        <TableHeaderCell>"Producto"</TableHeaderCell>
                        <TableHeaderCell>"Cantidad"</TableHeaderCell>
                        <TableHeaderCell>"Precio"</TableHeaderCell>
                        <TableHeaderCell>"Subtotal"</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    {items.into_iter().map(|item: SaleItem| view! {
                        <TableRow>
                            <TableCell>
                                <TableCellLayout truncate=true>
                                    {if item.product_name.is_empty() {
                                        format!("Producto #{}", item.product_id)
                                    } else {
                                        item.product_name.clone()
                                    }}
                                </TableCellLayout>
                            </TableCell>
                            <TableCell class="text-right">{item.quantity}</TableCell>
                            <TableCellMoney value=Signal::derive(move || Some(item.unit_price)) />
                            <TableCellMoney value=Signal::derive(move || Some(item.subtotal)) />
                        </TableRow>
                    }).collect_view()}
                </TableBody>
            </Table>
            <div class="sale-entry__total">
                <span>"Total"</span>
                <strong>{format_money(sale.total)}</strong>
            </div>
        </div>
    }
}

#[component]
pub fn SaleList() -> impl IntoView {
    let state = create_state();
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);
    let selected = RwSignal::new(None::<Sale>);

    let load_items = move || {
        let query = state.with_untracked(|s| SalesQuery {
            desde: s.date_from.clone(),
            hasta: s.date_to.clone(),
        });
        set_loading.set(true);
        set_error.set(None);
        spawn_local(async move {
            match api::fetch_sales(&query).await {
                Ok(items) => state.update(|s| {
                    s.items = items;
                    s.list.page = 0;
                    s.is_loaded = true;
                }),
                Err(e) => {
                    log::error!("fetch sales {}..{}: {}", query.desde, query.hasta, e);
                    set_error.set(Some(e.to_string()));
                }
            }
            set_loading.set(false);
        });
    };

    load_items();

    let visible = Memo::new(move |_| state.with(|s| s.visible()));
    let totals = Memo::new(move |_| state.with(|s| s.totals()));
    let toggle_sort = Callback::new(move |field: &'static str| {
        state.update(|s| s.list.toggle_sort(field));
    });
    let sort_field = Signal::derive(move || state.with(|s| s.list.sort_field.clone()));
    let sort_ascending = Signal::derive(move || state.with(|s| s.list.sort_ascending));
    let query = Signal::derive(move || state.with(|s| s.list.search_query.clone()));

    view! {
        <PageFrame page_id="a003_sale--list" category=PAGE_CAT_LIST>
            <PageHeader title="Ventas">
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| load_items()
                    disabled=Signal::derive(move || loading.get())
                >
                    {icon("refresh")}
                    {move || if loading.get() { "Cargando..." } else { "Actualizar" }}
                </Button>
            </PageHeader>

            <div class="page__content">
                <div class="filter-panel">
                    <div class="filter-panel-header">
                        <div class="filter-panel-header__left">
                            <DateRangePicker
                                date_from=Signal::derive(move || state.with(|s| s.date_from.clone()))
                                date_to=Signal::derive(move || state.with(|s| s.date_to.clone()))
                                on_change=Callback::new(move |(from, to): (String, String)| {
                                    state.update(|s| {
                                        s.date_from = from;
                                        s.date_to = to;
                                    });
                                    load_items();
                                })
                            />
                            <select
                                class="filter-select"
                                on:change=move |ev| {
                                    let method = PaymentMethod::parse(&event_target_value(&ev));
                                    state.update(|s| {
                                        s.payment_method = method;
                                        s.list.page = 0;
                                    });
                                }
                            >
                                <option value="" selected=move || state.with(|s| s.payment_method.is_none())>
                                    "Todos los medios de pago"
                                </option>
                                {PaymentMethod::all().into_iter().map(|m| view! {
                                    <option
                                        value=m.as_str()
                                        selected=move || state.with(|s| s.payment_method == Some(m))
                                    >
                                        {m.label()}
                                    </option>
                                }).collect_view()}
                            </select>
                            <SearchInput
                                value=query
                                on_change=Callback::new(move |q: String| state.update(|s| s.list.set_query(q)))
                                placeholder="Producto o cajero"
                            />
                        </div>
                        <div class="filter-panel-header__center">
                            <PaginationControls
                                current_page=Signal::derive(move || visible.with(|v| v.2))
                                total_pages=Signal::derive(move || visible.with(|v| v.3))
                                total_count=Signal::derive(move || visible.with(|v| v.1))
                                page_size=Signal::derive(move || state.with(|s| s.list.page_size))
                                on_page_change=Callback::new(move |page| state.update(|s| s.list.page = page))
                                on_page_size_change=Callback::new(move |size| state.update(|s| s.list.set_page_size(size)))
                            />
                        </div>
                    </div>
                </div>

                <ErrorBox message=error />

                <div class="totals-bar">
                    <span>{move || format!("{} ventas", totals.get().count)}</span>
                    <span>{move || format!("{} unidades", totals.get().units)}</span>
                    <span>{move || format!("Efectivo: {}", format_money(totals.get().cash))}</span>
                    <strong>{move || format!("Total: {}", format_money(totals.get().total))}</strong>
                </div>

                <div class="table-wrapper">
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell>"N°"</TableHeaderCell>
                                <SortableHeaderCell label="Fecha" sort_field="created_at" current_sort_field=sort_field sort_ascending=sort_ascending on_sort=toggle_sort />
                                <SortableHeaderCell label="Medio de pago" sort_field="payment_method" current_sort_field=sort_field sort_ascending=sort_ascending on_sort=toggle_sort />
                                <SortableHeaderCell label="Unidades" sort_field="units" align="right" current_sort_field=sort_field sort_ascending=sort_ascending on_sort=toggle_sort />
                                <SortableHeaderCell label="Total" sort_field="total" align="right" current_sort_field=sort_field sort_ascending=sort_ascending on_sort=toggle_sort />
                                <TableHeaderCell>"Cajero"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=move || visible.get().0
                                key=|s| s.id
                                children=move |sale: Sale| {
                                    let total = sale.total;
                                    let number = format!("#{}", sale.id);
                                    let created_at = format_datetime(&sale.created_at);
                                    let payment = sale.payment_method.label();
                                    let units = sale.units();
                                    let cashier = sale.cashier.clone().unwrap_or_default();
                                    let for_details = sale;
                                    view! {
                                        <TableRow
                                            on:click=move |_| selected.set(Some(for_details.clone()))
                                            attr:style="cursor: pointer;"
                                        >
                                            <TableCell>{number}</TableCell>
                                            <TableCell>{created_at}</TableCell>
                                            <TableCell>{payment}</TableCell>
                                            <TableCell class="text-right">{units}</TableCell>
                                            <TableCellMoney value=Signal::derive(move || Some(total)) bold=true />
                                            <TableCell>{cashier}</TableCell>
                                        </TableRow>
                                    }
                                }
                            />
                        </TableBody>
                    </Table>
                    <Show when=move || state.with(|s| s.is_loaded) && visible.with(|v| v.1 == 0)>
                        <div class="table__empty">"No hay ventas en el período"</div>
                    </Show>
                </div>
            </div>

            {move || selected.get().map(|sale| view! {
                <Modal
                    title=format!("Venta #{}", sale.id)
                    on_close=Callback::new(move |_| selected.set(None))
                >
                    <SaleDetails sale=sale />
                </Modal>
            })}
        </PageFrame>
    }
}
