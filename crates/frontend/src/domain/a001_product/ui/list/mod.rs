pub mod state;

use self::state::{create_state, StockFilter};
use super::details::ProductDetails;
use crate::domain::a001_product::api;
use crate::layout::global_context::AppGlobalContext;
use crate::shared::barcode::use_barcode_scanner;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::table::{format_money, SortableHeaderCell, TableCellMoney};
use crate::shared::icons::icon;
use crate::shared::list_utils::{highlight_matches, remove_by_id, replace_by_id, restore_at, SearchInput};
use crate::shared::modal::{ConfirmDialog, Modal};
use crate::shared::notifications::use_notifications;
use crate::shared::page_frame::{ErrorBox, PageFrame, PageHeader};
use crate::shared::page_standard::PAGE_CAT_LIST;
use contracts::domain::a001_product::{Product, ProductDto, StockStatus};
use contracts::domain::common::AggregateRoot;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

fn status_badge(status: StockStatus) -> impl IntoView {
    let color = match status {
        StockStatus::Ok => BadgeColor::Success,
        StockStatus::Low => BadgeColor::Warning,
        StockStatus::OutOfStock => BadgeColor::Danger,
    };
    view! {
        <Badge appearance=BadgeAppearance::Tint color=color>{status.label()}</Badge>
    }
}

#[component]
pub fn ProductList(
    /// Ключ вкладки: сканер работает только на активной вкладке
    tab_key: &'static str,
) -> impl IntoView {
    let tabs_store =
        leptos::context::use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let notifications = use_notifications();
    let state = create_state();
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);
    let (saving, set_saving) = signal(false);

    // Some(dto): открыта форма
    let editing = RwSignal::new(None::<ProductDto>);
    let deleting = RwSignal::new(None::<Product>);

    let load_items = move || {
        set_loading.set(true);
        set_error.set(None);
        spawn_local(async move {
            match api::fetch_products().await {
                Ok(items) => {
                    state.update(|s| {
                        s.items = items;
                        s.is_loaded = true;
                    });
                }
                Err(e) => {
                    log::error!("fetch products: {}", e);
                    set_error.set(Some(e.to_string()));
                }
            }
            set_loading.set(false);
        });
    };

    load_items();

    // Сканер подставляет код в поиск
    let scanner_enabled = Signal::derive(move || {
        tabs_store.is_active(tab_key) && editing.with(Option::is_none) && deleting.with(Option::is_none)
    });
    use_barcode_scanner(
        scanner_enabled,
        Callback::new(move |code: String| {
            log::info!("scanned {} on stock list", code);
            state.update(|s| s.list.set_query(code));
        }),
    );

    let save_product = move |dto: ProductDto| {
        match dto.id {
            // Редактирование: сначала локально, откат при ошибке
            Some(id) => {
                let mut previous = None;
                state.update(|s| previous = s.apply_edit(id, &dto));
                editing.set(None);
                spawn_local(async move {
                    match api::update_product(id, &dto).await {
                        Ok(saved) => {
                            state.update(|s| {
                                replace_by_id(&mut s.items, saved);
                            });
                            notifications.success("Producto actualizado");
                        }
                        Err(e) => {
                            log::error!("update product {}: {}", id, e);
                            if let Some(prev) = previous {
                                state.update(|s| {
                                    replace_by_id(&mut s.items, prev);
                                });
                            }
                            notifications.error(format!("No se pudo guardar el producto: {}", e));
                        }
                    }
                });
            }
            None => {
                set_saving.set(true);
                spawn_local(async move {
                    match api::create_product(&dto).await {
                        Ok(created) => {
                            state.update(|s| s.items.push(created));
                            editing.set(None);
                            notifications.success("Producto creado");
                        }
                        Err(e) => {
                            log::error!("create product: {}", e);
                            notifications.error(format!("No se pudo crear el producto: {}", e));
                        }
                    }
                    set_saving.set(false);
                });
            }
        }
    };

    let confirm_delete = move || {
        let Some(product) = deleting.get_untracked() else {
            return;
        };
        deleting.set(None);
        let id = product.id;
        let mut removed = None;
        state.update(|s| removed = remove_by_id(&mut s.items, id));
        spawn_local(async move {
            match api::delete_product(id).await {
                Ok(()) => {
                    notifications.success(format!("\"{}\" eliminado", product.name));
                }
                Err(e) => {
                    log::error!("delete product {}: {}", id, e);
                    if let Some((index, item)) = removed {
                        state.update(|s| restore_at(&mut s.items, index, item));
                    }
                    notifications.error(format!("No se pudo eliminar el producto: {}", e));
                }
            }
        });
    };

    let visible = Memo::new(move |_| state.with(|s| s.visible()));

    let toggle_sort = Callback::new(move |field: &'static str| {
        state.update(|s| s.list.toggle_sort(field));
    });
    let sort_field = Signal::derive(move || state.with(|s| s.list.sort_field.clone()));
    let sort_ascending = Signal::derive(move || state.with(|s| s.list.sort_ascending));
    let query = Signal::derive(move || state.with(|s| s.list.search_query.clone()));

    let low_stock_subtitle = Signal::derive(move || {
        let count = state.with(|s| s.low_stock_count());
        (count > 0).then(|| format!("{} con stock bajo", count))
    });

    view! {
        <PageFrame page_id="a001_product--list" category=PAGE_CAT_LIST>
            <PageHeader title="Stock" subtitle=low_stock_subtitle>
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| editing.set(Some(ProductDto::default()))
                >
                    {icon("plus")}
                    "Nuevo producto"
                </Button>
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
                            <SearchInput
                                value=query
                                on_change=Callback::new(move |q: String| state.update(|s| s.list.set_query(q)))
                                placeholder="Nombre, código, código de barras o categoría"
                            />
                            <select
                                class="filter-select"
                                on:change=move |ev| {
                                    let value = event_target_value(&ev);
                                    state.update(|s| {
                                        s.category = value;
                                        s.list.page = 0;
                                    });
                                }
                            >
                                <option value="" selected=move || state.with(|s| s.category.is_empty())>
                                    "Todas las categorías"
                                </option>
                                {move || state.with(|s| s.categories()).into_iter().map(|category| {
                                    let option_value = category.clone();
                                    let selected_value = category.clone();
                                    view! {
                                        <option
                                            value=option_value
                                            selected=move || state.with(|s| s.category == selected_value)
                                        >
                                            {category}
                                        </option>
                                    }
                                }).collect_view()}
                            </select>
                            <select
                                class="filter-select"
                                on:change=move |ev| {
                                    let filter = StockFilter::parse(&event_target_value(&ev));
                                    state.update(|s| {
                                        s.stock_filter = filter;
                                        s.list.page = 0;
                                    });
                                }
                            >
                                {[
                                    (StockFilter::All, "Todo el stock"),
                                    (StockFilter::Low, "Stock bajo"),
                                    (StockFilter::Out, "Sin stock"),
                                ]
                                    .into_iter()
                                    .map(|(filter, label)| view! {
                                        <option
                                            value=filter.as_str()
                                            selected=move || state.with(|s| s.stock_filter == filter)
                                        >
                                            {label}
                                        </option>
                                    })
                                    .collect_view()}
                            </select>
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
                                <SortableHeaderCell label="Código" sort_field="sku" current_sort_field=sort_field sort_ascending=sort_ascending on_sort=toggle_sort />
                                <SortableHeaderCell label="Nombre" sort_field="name" current_sort_field=sort_field sort_ascending=sort_ascending on_sort=toggle_sort />
                                <SortableHeaderCell label="Categoría" sort_field="category" current_sort_field=sort_field sort_ascending=sort_ascending on_sort=toggle_sort />
                                <SortableHeaderCell label="Costo" sort_field="cost_price" align="right" current_sort_field=sort_field sort_ascending=sort_ascending on_sort=toggle_sort />
                                <SortableHeaderCell label="Precio" sort_field="sale_price" align="right" current_sort_field=sort_field sort_ascending=sort_ascending on_sort=toggle_sort />
                                <SortableHeaderCell label="Stock" sort_field="stock" align="right" current_sort_field=sort_field sort_ascending=sort_ascending on_sort=toggle_sort />
                                <TableHeaderCell>"Estado"</TableHeaderCell>
                                <TableHeaderCell>""</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=move || visible.get().0
                                key=|p| p.id
                                children=move |product: Product| {
                                    // Строка читается из state: правка и откат меняют её без смены ключа
                                    let id = product.id;
                                    let row = Memo::new(move |_| {
                                        state
                                            .with(|s| s.find(id).cloned())
                                            .unwrap_or_else(|| product.clone())
                                    });
                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                <TableCellLayout>{move || row.with(|p| p.sku.clone())}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    {move || row.with(|p| highlight_matches(&p.name, &query.get()))}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    {move || row.with(|p| p.category.clone().unwrap_or_else(|| "—".into()))}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCellMoney value=Signal::derive(move || Some(row.with(|p| p.cost_price))) />
                                            <TableCellMoney value=Signal::derive(move || Some(row.with(|p| p.sale_price))) bold=true />
                                            <TableCell class="text-right">
                                                {move || row.with(|p| format!("{} / mín. {}", p.stock, p.min_stock))}
                                            </TableCell>
                                            <TableCell>{move || status_badge(row.with(Product::stock_status))}</TableCell>
                                            <TableCell>
                                                <div class="table__actions">
                                                    <button
                                                        class="button button--icon"
                                                        title="Editar"
                                                        on:click=move |_| editing.set(Some(row.with_untracked(Product::to_dto)))
                                                    >
                                                        {icon("edit")}
                                                    </button>
                                                    <button
                                                        class="button button--icon button--danger"
                                                        title="Eliminar"
                                                        on:click=move |_| deleting.set(Some(row.get_untracked()))
                                                    >
                                                        {icon("trash")}
                                                    </button>
                                                </div>
                                            </TableCell>
                                        </TableRow>
                                    }
                                }
                            />
                        </TableBody>
                    </Table>
                    <Show when=move || state.with(|s| s.is_loaded) && visible.with(|v| v.1 == 0)>
                        <div class="table__empty">"No hay productos para mostrar"</div>
                    </Show>
                </div>
            </div>

            {move || editing.get().map(|dto| {
                let element = Product::element_name().to_lowercase();
                let title = if dto.is_edit() {
                    format!("Editar {}", element)
                } else {
                    format!("Nuevo {}", element)
                };
                view! {
                    <Modal title=title on_close=Callback::new(move |_| editing.set(None))>
                        <ProductDetails
                            initial=dto
                            on_submit=Callback::new(save_product)
                            on_cancel=Callback::new(move |_| editing.set(None))
                            saving=saving
                        />
                    </Modal>
                }
            })}

            {move || deleting.get().map(|product| view! {
                <ConfirmDialog
                    title="Eliminar producto"
                    message=format!(
                        "¿Eliminar \"{}\"? Precio actual: {}",
                        product.name,
                        format_money(product.sale_price),
                    )
                    confirm_label="Eliminar"
                    on_confirm=Callback::new(move |_| confirm_delete())
                    on_cancel=Callback::new(move |_| deleting.set(None))
                />
            })}
        </PageFrame>
    }
}
