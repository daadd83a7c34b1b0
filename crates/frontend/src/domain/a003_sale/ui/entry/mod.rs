//! Экран новой продажи: поиск товара, сканер, корзина, оплата.

use crate::domain::a001_product::api as product_api;
use crate::domain::a003_sale::api;
use crate::domain::a003_sale::cart::{Cart, CartLine};
use crate::layout::global_context::AppGlobalContext;
use crate::shared::barcode::use_barcode_scanner;
use crate::shared::components::table::format_money;
use crate::shared::config::config;
use crate::shared::icons::icon;
use crate::shared::list_utils::SearchInput;
use crate::shared::notifications::{use_notifications, NotificationService};
use crate::shared::page_frame::{ErrorBox, PageFrame, PageHeader};
use crate::shared::page_standard::PAGE_CAT_FORM;
use contracts::domain::a001_product::Product;
use contracts::domain::a003_sale::PaymentMethod;
use contracts::domain::common::EntityId;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

fn add_to_cart(cart: RwSignal<Cart>, notifications: NotificationService, product: &Product) {
    let mut result = Ok(());
    cart.update(|c| result = c.add(product));
    if let Err(e) = result {
        notifications.warning(e.to_string());
    }
}

#[component]
pub fn SaleEntry(tab_key: &'static str) -> impl IntoView {
    let tabs_store =
        leptos::context::use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let notifications = use_notifications();

    let cart = RwSignal::new(Cart::new());
    let payment_method = RwSignal::new(PaymentMethod::default());
    let (query, set_query) = signal(String::new());
    let (results, set_results) = signal(Vec::<Product>::new());
    let (searching, set_searching) = signal(false);
    let (search_error, set_search_error) = signal::<Option<String>>(None);
    let (submitting, set_submitting) = signal(false);
    // Номер последнего запроса: ответы на устаревшие запросы отбрасываются
    let search_seq = StoredValue::new(0u64);

    let run_search = Callback::new(move |q: String| {
        set_query.set(q.clone());
        set_search_error.set(None);
        let seq = search_seq.get_value() + 1;
        search_seq.set_value(seq);

        if q.trim().chars().count() < config().search.min_query_len {
            set_results.set(Vec::new());
            set_searching.set(false);
            return;
        }

        set_searching.set(true);
        spawn_local(async move {
            let response = product_api::search_products(q.trim()).await;
            if search_seq.get_value() != seq {
                return;
            }
            match response {
                Ok(items) => set_results.set(items),
                Err(e) => {
                    log::error!("product search '{}': {}", q, e);
                    set_results.set(Vec::new());
                    set_search_error.set(Some(e.to_string()));
                }
            }
            set_searching.set(false);
        });
    });

    let scanner_enabled = Signal::derive(move || tabs_store.is_active(tab_key) && !submitting.get());
    use_barcode_scanner(
        scanner_enabled,
        Callback::new(move |code: String| {
            spawn_local(async move {
                match product_api::find_by_code(&code).await {
                    Ok(Some(product)) => add_to_cart(cart, notifications, &product),
                    Ok(None) => {
                        notifications.warning(format!("Producto no encontrado: {}", code));
                    }
                    Err(e) => {
                        log::error!("find by code {}: {}", code, e);
                        notifications.error(format!("Error al buscar el código {}: {}", code, e));
                    }
                }
            });
        }),
    );

    let set_line_quantity = move |product_id: EntityId, quantity: i32| {
        let mut result = Ok(());
        cart.update(|c| result = c.set_quantity(product_id, quantity));
        if let Err(e) = result {
            notifications.warning(e.to_string());
        }
    };

    let submit = move || {
        let request = cart.with_untracked(|c| c.to_request(payment_method.get_untracked()));
        if let Err(msg) = request.validate() {
            notifications.warning(msg);
            return;
        }
        set_submitting.set(true);
        spawn_local(async move {
            match api::create_sale(&request).await {
                Ok(sale) => {
                    log::info!("sale {} registered", sale.id);
                    cart.update(Cart::clear);
                    notifications.success(format!(
                        "Venta #{} registrada: {}",
                        sale.id,
                        format_money(sale.total)
                    ));
                }
                Err(e) => {
                    log::error!("create sale: {}", e);
                    notifications.error(format!("No se pudo registrar la venta: {}", e));
                }
            }
            set_submitting.set(false);
        });
    };

    let total = Signal::derive(move || cart.with(Cart::total));
    let units = Signal::derive(move || cart.with(Cart::units));
    let cart_subtitle = Signal::derive(move || {
        let n = units.get();
        (n > 0).then(|| format!("{} unidades en el carrito", n))
    });

    view! {
        <PageFrame page_id="a003_sale--form" category=PAGE_CAT_FORM>
            <PageHeader title="Nueva venta" subtitle=cart_subtitle />

            <div class="page__content sale-entry">
                <section class="sale-entry__search">
                    <div class="sale-entry__search-bar">
                        <SearchInput
                            value=query
                            on_change=run_search
                            placeholder="Buscar por nombre o código (o escanear)"
                        />
                        <Show when=move || searching.get()>
                            <Spinner size=SpinnerSize::Small />
                        </Show>
                    </div>
                    <ErrorBox message=search_error />

                    <div class="sale-entry__results">
                        <For
                            each=move || results.get()
                            key=|p| (p.id, p.stock)
                            children=move |product: Product| {
                                let out = product.stock <= 0;
                                let name = product.name.clone();
                                let info = format!("{} · stock {}", product.sku, product.stock);
                                let price = format_money(product.sale_price);
                                view! {
                                    <button
                                        class="sale-entry__result"
                                        class:sale-entry__result--disabled=out
                                        disabled=out
                                        on:click=move |_| add_to_cart(cart, notifications, &product)
                                    >
                                        <span class="sale-entry__result-name">{name}</span>
                                        <span class="sale-entry__result-info">{info}</span>
                                        <span class="sale-entry__result-price">{price}</span>
                                    </button>
                                }
                            }
                        />
                        <Show when=move || {
                            !searching.get()
                                && results.with(Vec::is_empty)
                                && query.with(|q| q.trim().chars().count() >= config().search.min_query_len)
                        }>
                            <div class="table__empty">"Sin resultados"</div>
                        </Show>
                    </div>
                </section>

                <section class="sale-entry__cart">
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell>"Producto"</TableHeaderCell>
                                <TableHeaderCell>"Precio"</TableHeaderCell>
                                <TableHeaderCell>"Cantidad"</TableHeaderCell>
                                <TableHeaderCell>"Subtotal"</TableHeaderCell>
                                <TableHeaderCell>""</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=move || cart.with(|c| c.lines().to_vec())
                                key=|l: &CartLine| (l.product_id, l.quantity, l.unit_price.to_bits())
                                children=move |line: CartLine| {
                                    let id = line.product_id;
                                    let name = line.name.clone();
                                    let price = format_money(line.unit_price);
                                    let max_quantity = line.stock.to_string();
                                    let quantity = line.quantity.to_string();
                                    let subtotal = format_money(line.subtotal());
                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                <TableCellLayout truncate=true>{name}</TableCellLayout>
                                            </TableCell>
                                            <TableCell class="text-right">{price}</TableCell>
                                            <TableCell>
                                                <div class="quantity-control">
                                                    <button
                                                        class="button button--icon"
                                                        on:click=move |_| cart.update(|c| c.decrement(id))
                                                    >
                                                        {icon("minus")}
                                                    </button>
                                                    <input
                                                        type="number"
                                                        min="0"
                                                        max=max_quantity
                                                        prop:value=quantity
                                                        on:change=move |ev| {
                                                            let value = event_target_value(&ev).trim().parse::<i32>().unwrap_or(0);
                                                            set_line_quantity(id, value);
                                                        }
                                                    />
                                                    <button
                                                        class="button button--icon"
                                                        on:click=move |_| {
                                                            let mut result = Ok(());
                                                            cart.update(|c| result = c.increment(id));
                                                            if let Err(e) = result {
                                                                notifications.warning(e.to_string());
                                                            }
                                                        }
                                                    >
                                                        {icon("plus")}
                                                    </button>
                                                </div>
                                            </TableCell>
                                            <TableCell class="text-right">
                                                <strong>{subtotal}</strong>
                                            </TableCell>
                                            <TableCell>
                                                <button
                                                    class="button button--icon button--danger"
                                                    title="Quitar"
                                                    on:click=move |_| cart.update(|c| c.remove(id))
                                                >
                                                    {icon("trash")}
                                                </button>
                                            </TableCell>
                                        </TableRow>
                                    }
                                }
                            />
                        </TableBody>
                    </Table>
                    <Show when=move || cart.with(Cart::is_empty)>
                        <div class="table__empty">"El carrito está vacío"</div>
                    </Show>

                    <div class="sale-entry__checkout">
                        <div class="form-group">
                            <label>"Medio de pago"</label>
                            <select on:change=move |ev| {
                                    if let Some(method) = PaymentMethod::parse(&event_target_value(&ev)) {
                                        payment_method.set(method);
                                    }
                                }
                            >
                                {PaymentMethod::all().into_iter().map(|m| view! {
                                    <option value=m.as_str() selected=move || payment_method.get() == m>
                                        {m.label()}
                                    </option>
                                }).collect_view()}
                            </select>
                        </div>
                        <div class="sale-entry__total">
                            <span>"Total"</span>
                            <strong>{move || format_money(total.get())}</strong>
                        </div>
                        <div class="details-actions">
                            <Button
                                appearance=ButtonAppearance::Primary
                                disabled=Signal::derive(move || submitting.get() || cart.with(Cart::is_empty))
                                on_click=move |_| submit()
                            >
                                {icon("cash")}
                                {move || if submitting.get() { "Registrando..." } else { "Cobrar" }}
                            </Button>
                            <Button
                                appearance=ButtonAppearance::Secondary
                                disabled=Signal::derive(move || submitting.get() || cart.with(Cart::is_empty))
                                on_click=move |_| cart.update(Cart::clear)
                            >
                                {icon("x")}
                                "Vaciar"
                            </Button>
                        </div>
                    </div>
                </section>
            </div>
        </PageFrame>
    }
}
