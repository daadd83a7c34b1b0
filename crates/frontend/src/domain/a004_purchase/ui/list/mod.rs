pub mod state;

use self::state::create_state;
use super::details::PurchaseForm;
use crate::domain::a002_provider::api as provider_api;
use crate::domain::a004_purchase::api::{self, PurchasesQuery};
use crate::shared::components::date_range_picker::DateRangePicker;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::table::{format_money, SortableHeaderCell, TableCellMoney};
use crate::shared::date_utils::format_date;
use crate::shared::icons::icon;
use crate::shared::list_utils::SearchInput;
use crate::shared::modal::Modal;
use crate::shared::notifications::use_notifications;
use crate::shared::page_frame::{ErrorBox, PageFrame, PageHeader};
use crate::shared::page_standard::PAGE_CAT_LIST;
use contracts::domain::a002_provider::Provider;
use contracts::domain::a004_purchase::{CreatePurchaseRequest, Purchase};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

#[component]
fn PurchaseDetails(purchase: Purchase) -> impl IntoView {
    view! {
        <div class="details-container purchase-details">
            <div class="details-summary">
                <span>{format_date(&purchase.date)}</span>
                <strong>{purchase.provider_name.clone()}</strong>
                <span>{format!("Factura: {}", purchase.invoice_number.clone().unwrap_or_else(|| "—".into()))}</span>
            </div>
            <Table attr:style="width: 100%;">
                <TableHeader>
                    <TableRow>
                        <TableHeaderCell>"Producto"</TableHeaderCell>
                        <TableHeaderCell>"Cantidad"</TableHeaderCell>
                        <TableHeaderCell>"Costo unitario"</TableHeaderCell>
                        <TableHeaderCell>"Subtotal"</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    {purchase.items.iter().cloned().map(|item| view! {
                        <TableRow>
                            <TableCell>
                                <TableCellLayout truncate=true>{item.product_name.clone()}</TableCellLayout>
                            </TableCell>
                            <TableCell class="text-right">{item.quantity}</TableCell>
                            <TableCellMoney value=Signal::derive(move || Some(item.unit_cost)) />
                            <TableCellMoney value=Signal::derive(move || Some(item.subtotal)) />
                        </TableRow>
                    }).collect_view()}
                </TableBody>
            </Table>
            <div class="sale-entry__total">
                <span>"Total"</span>
                <strong>{format_money(purchase.total)}</strong>
            </div>
        </div>
    }
}

#[component]
pub fn PurchaseList() -> impl IntoView {
    let notifications = use_notifications();
    let state = create_state();
    let providers = RwSignal::new(Vec::<Provider>::new());
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);
    let (saving, set_saving) = signal(false);
    let creating = RwSignal::new(false);
    let selected = RwSignal::new(None::<Purchase>);

    let load_items = move || {
        let query = state.with_untracked(|s| PurchasesQuery {
            desde: s.date_from.clone(),
            hasta: s.date_to.clone(),
            proveedor_id: s.provider_id,
        });
        set_loading.set(true);
        set_error.set(None);
        spawn_local(async move {
            match api::fetch_purchases(&query).await {
                Ok(items) => state.update(|s| {
                    s.items = items;
                    s.list.page = 0;
                    s.is_loaded = true;
                }),
                Err(e) => {
                    log::error!("fetch purchases: {}", e);
                    set_error.set(Some(e.to_string()));
                }
            }
            set_loading.set(false);
        });
    };

    load_items();
    spawn_local(async move {
        match provider_api::fetch_providers().await {
            Ok(list) => providers.set(list),
            Err(e) => log::warn!("providers for purchase filter: {}", e),
        }
    });

    let save_purchase = move |request: CreatePurchaseRequest| {
        set_saving.set(true);
        spawn_local(async move {
            match api::create_purchase(&request).await {
                Ok(created) => {
                    log::info!("purchase {} registered", created.id);
                    creating.set(false);
                    notifications.success(format!(
                        "Compra registrada: {}",
                        format_money(created.total)
                    ));
                    load_items();
                }
                Err(e) => {
                    log::error!("create purchase: {}", e);
                    notifications.error(format!("No se pudo registrar la compra: {}", e));
                }
            }
            set_saving.set(false);
        });
    };

    let visible = Memo::new(move |_| state.with(|s| s.visible()));
    let toggle_sort = Callback::new(move |field: &'static str| {
        state.update(|s| s.list.toggle_sort(field));
    });
    let sort_field = Signal::derive(move || state.with(|s| s.list.sort_field.clone()));
    let sort_ascending = Signal::derive(move || state.with(|s| s.list.sort_ascending));
    let query = Signal::derive(move || state.with(|s| s.list.search_query.clone()));
    let subtitle = Signal::derive(move || {
        state
            .with(|s| s.is_loaded.then(|| s.total_amount()))
            .map(|total| format!("Total del período: {}", format_money(total)))
    });

    view! {
        <PageFrame page_id="a004_purchase--list" category=PAGE_CAT_LIST>
            <PageHeader title="Compras" subtitle=subtitle>
                <Button appearance=ButtonAppearance::Primary on_click=move |_| creating.set(true)>
                    {icon("plus")}
                    "Nueva compra"
                </Button>
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| load_items()
                    disabled=Signal::derive(move || loading.get())
                >
                    {icon("refresh")}
                    "Actualizar"
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
                                    let provider_id = event_target_value(&ev).parse().ok();
                                    state.update(|s| {
                                        s.provider_id = provider_id;
                                        s.list.page = 0;
                                    });
                                    load_items();
                                }
                            >
                                <option value="" selected=move || state.with(|s| s.provider_id.is_none())>
                                    "Todos los proveedores"
                                </option>
                                <For
                                    each=move || providers.get()
                                    key=|p| p.id
                                    children=move |p: Provider| {
                                        let id = p.id;
                                        view! {
                                            <option
                                                value=id.to_string()
                                                selected=move || state.with(|s| s.provider_id == Some(id))
                                            >
                                                {p.name}
                                            </option>
                                        }
                                    }
                                />
                            </select>
                            <SearchInput
                                value=query
                                on_change=Callback::new(move |q: String| state.update(|s| s.list.set_query(q)))
                                placeholder="Proveedor, factura o producto"
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

                <div class="table-wrapper">
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                <SortableHeaderCell label="Fecha" sort_field="date" current_sort_field=sort_field sort_ascending=sort_ascending on_sort=toggle_sort />
                                <SortableHeaderCell label="Proveedor" sort_field="provider_name" current_sort_field=sort_field sort_ascending=sort_ascending on_sort=toggle_sort />
                                <SortableHeaderCell label="Factura" sort_field="invoice_number" current_sort_field=sort_field sort_ascending=sort_ascending on_sort=toggle_sort />
                                <TableHeaderCell>"Productos"</TableHeaderCell>
                                <SortableHeaderCell label="Total" sort_field="total" align="right" current_sort_field=sort_field sort_ascending=sort_ascending on_sort=toggle_sort />
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=move || visible.get().0
                                key=|p| p.id
                                children=move |purchase: Purchase| {
                                    let total = purchase.total;
                                    let for_details = purchase.clone();
                                    view! {
                                        <TableRow
                                            on:click=move |_| selected.set(Some(for_details.clone()))
                                            attr:style="cursor: pointer;"
                                        >
                                            <TableCell>{format_date(&purchase.date)}</TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>{purchase.provider_name.clone()}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>{purchase.invoice_number.clone().unwrap_or_default()}</TableCell>
                                            <TableCell class="text-right">{purchase.items.len()}</TableCell>
                                            <TableCellMoney value=Signal::derive(move || Some(total)) bold=true />
                                        </TableRow>
                                    }
                                }
                            />
                        </TableBody>
                    </Table>
                    <Show when=move || state.with(|s| s.is_loaded) && visible.with(|v| v.1 == 0)>
                        <div class="table__empty">"No hay compras en el período"</div>
                    </Show>
                </div>
            </div>

            <Show when=move || creating.get()>
                <Modal title="Nueva compra".to_string() on_close=Callback::new(move |_| creating.set(false))>
                    <PurchaseForm
                        on_submit=Callback::new(save_purchase)
                        on_cancel=Callback::new(move |_| creating.set(false))
                        saving=saving
                    />
                </Modal>
            </Show>

            {move || selected.get().map(|purchase| view! {
                <Modal
                    title=format!("Compra #{}", purchase.id)
                    on_close=Callback::new(move |_| selected.set(None))
                >
                    <PurchaseDetails purchase=purchase />
                </Modal>
            })}
        </PageFrame>
    }
}
