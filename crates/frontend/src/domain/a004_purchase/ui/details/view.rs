use super::view_model::{DraftLine, PurchaseFormViewModel};
use crate::domain::a001_product::api as product_api;
use crate::shared::components::table::format_money;
use crate::shared::config::config;
use crate::shared::icons::icon;
use crate::shared::list_utils::SearchInput;
use crate::shared::page_frame::ErrorBox;
use contracts::domain::a001_product::Product;
use contracts::domain::a004_purchase::CreatePurchaseRequest;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

#[component]
pub fn PurchaseForm(
    on_submit: Callback<CreatePurchaseRequest>,
    on_cancel: Callback<()>,
    #[prop(into, optional)]
    saving: Signal<bool>,
) -> impl IntoView {
    let vm = PurchaseFormViewModel::new();
    vm.load_providers();

    let (query, set_query) = signal(String::new());
    let (results, set_results) = signal(Vec::<Product>::new());
    let search_seq = StoredValue::new(0u64);

    let run_search = Callback::new(move |q: String| {
        set_query.set(q.clone());
        let seq = search_seq.get_value() + 1;
        search_seq.set_value(seq);
        if q.trim().chars().count() < config().search.min_query_len {
            set_results.set(Vec::new());
            return;
        }
        spawn_local(async move {
            let response = product_api::search_products(q.trim()).await;
            if search_seq.get_value() != seq {
                return;
            }
            match response {
                Ok(items) => set_results.set(items),
                Err(e) => {
                    log::error!("product search for purchase '{}': {}", q, e);
                    vm.error.set(Some(e.to_string()));
                }
            }
        });
    });

    view! {
        <div class="details-container purchase-form">
            <ErrorBox message=vm.error />

            <div class="details-form details-form--grid">
                <div class="form-group">
                    <label>"Proveedor"</label>
                    <select on:change=move |ev| {
                        let value = event_target_value(&ev).parse().ok();
                        vm.draft.update(|d| d.provider_id = value);
                    }>
                        <option value="" selected=move || vm.draft.with(|d| d.provider_id.is_none())>
                            "Seleccione..."
                        </option>
                        <For
                            each=move || vm.providers.get()
                            key=|p| p.id
                            children=move |p| {
                                let id = p.id;
                                view! {
                                    <option
                                        value=id.to_string()
                                        selected=move || vm.draft.with(|d| d.provider_id == Some(id))
                                    >
                                        {p.name}
                                    </option>
                                }
                            }
                        />
                    </select>
                </div>
                <div class="form-group">
                    <label>"N° de factura"</label>
                    <input
                        type="text"
                        placeholder="A-0001-00001234"
                        prop:value=move || vm.draft.with(|d| d.invoice_number.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            vm.draft.update(|d| d.invoice_number = value);
                        }
                    />
                </div>
                <div class="form-group">
                    <label>"Fecha"</label>
                    <input
                        type="date"
                        prop:value=move || vm.draft.with(|d| d.date.clone())
                        on:change=move |ev| {
                            let value = event_target_value(&ev);
                            vm.draft.update(|d| d.date = value);
                        }
                    />
                </div>
            </div>

            <div class="purchase-form__search">
                <SearchInput value=query on_change=run_search placeholder="Agregar producto por nombre o código" />
                <div class="sale-entry__results">
                    <For
                        each=move || results.get()
                        key=|p| p.id
                        children=move |product: Product| {
                            let label = format!("{} · {}", product.sku, product.name);
                            let cost = format_money(product.cost_price);
                            view! {
                                <button
                                    class="sale-entry__result"
                                    on:click=move |_| vm.draft.update(|d| d.add_product(&product))
                                >
                                    <span class="sale-entry__result-name">{label}</span>
                                    <span class="sale-entry__result-price">{cost}</span>
                                </button>
                            }
                        }
                    />
                </div>
            </div>

            <Table attr:style="width: 100%;">
                <TableHeader>
                    <TableRow>
                        <TableHeaderCell>"Producto"</TableHeaderCell>
                        <TableHeaderCell>"Cantidad"</TableHeaderCell>
                        <TableHeaderCell>"Costo unitario"</TableHeaderCell>
                        <TableHeaderCell>"Subtotal"</TableHeaderCell>
                        <TableHeaderCell>""</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    <For
                        each=move || vm.draft.with(|d| d.lines.clone())
                        key=|l: &DraftLine| l.product_id
                        children=move |line: DraftLine| {
                            let id = line.product_id;
                            let current = move || {
                                vm.draft.with(|d| d.lines.iter().find(|l| l.product_id == id).cloned())
                            };
                            view! {
                                <TableRow>
                                    <TableCell>
                                        <TableCellLayout truncate=true>{line.name.clone()}</TableCellLayout>
                                    </TableCell>
                                    <TableCell>
                                        <input
                                            type="number"
                                            min="1"
                                            step="1"
                                            prop:value=move || current().map(|l| l.quantity.to_string()).unwrap_or_default()
                                            on:input=move |ev| {
                                                let value = event_target_value(&ev).trim().parse::<i32>().unwrap_or(0);
                                                vm.draft.update(|d| d.set_quantity(id, value));
                                            }
                                        />
                                    </TableCell>
                                    <TableCell>
                                        <input
                                            type="text"
                                            inputmode="decimal"
                                            prop:value=move || current().map(|l| l.cost_text).unwrap_or_default()
                                            on:input=move |ev| {
                                                let value = event_target_value(&ev);
                                                vm.draft.update(|d| d.set_cost(id, value));
                                            }
                                        />
                                    </TableCell>
                                    <TableCell class="text-right">
                                        {move || current().map(|l| format_money(l.subtotal())).unwrap_or_default()}
                                    </TableCell>
                                    <TableCell>
                                        <button
                                            class="button button--icon button--danger"
                                            title="Quitar"
                                            on:click=move |_| vm.draft.update(|d| d.remove(id))
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
            <Show when=move || vm.draft.with(|d| d.lines.is_empty())>
                <div class="table__empty">"Busque productos para agregarlos a la compra"</div>
            </Show>

            <div class="sale-entry__total">
                <span>"Total estimado"</span>
                <strong>{move || format_money(vm.draft.with(|d| d.preview_total()))}</strong>
            </div>

            <div class="details-actions">
                <button
                    class="button button--primary"
                    disabled=move || saving.get()
                    on:click=move |_| vm.submit_command(on_submit)
                >
                    {icon("save")}
                    {move || if saving.get() { "Guardando..." } else { "Registrar compra" }}
                </button>
                <button class="button button--secondary" on:click=move |_| on_cancel.run(())>
                    {icon("x")}
                    "Cancelar"
                </button>
            </div>
        </div>
    }
}
