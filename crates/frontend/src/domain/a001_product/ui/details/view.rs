use super::view_model::{margin_label, ProductDetailsViewModel};
use crate::shared::icons::icon;
use crate::shared::page_frame::ErrorBox;
use contracts::domain::a001_product::ProductDto;
use leptos::prelude::*;

/// Форма товара (создание/редактирование) для модального окна
#[component]
pub fn ProductDetails(
    initial: ProductDto,
    /// Проверенный DTO
    on_submit: Callback<ProductDto>,
    on_cancel: Callback<()>,
    /// Сохранение в процессе (кнопка блокируется)
    #[prop(into, optional)]
    saving: Signal<bool>,
) -> impl IntoView {
    let id = initial.id;
    let vm = ProductDetailsViewModel::new(initial);
    vm.load_if_needed(id);

    let text_field = move |label: &'static str,
                           get: fn(&ProductDto) -> String,
                           set: fn(&mut ProductDto, String),
                           placeholder: &'static str| {
        view! {
            <div class="form-group">
                <label>{label}</label>
                <input
                    type="text"
                    placeholder=placeholder
                    prop:value=move || vm.form.with(get)
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        vm.form.update(|f| set(f, value));
                    }
                />
            </div>
        }
    };

    let int_field = move |label: &'static str,
                          get: fn(&ProductDto) -> i32,
                          set: fn(&mut ProductDto, i32)| {
        view! {
            <div class="form-group">
                <label>{label}</label>
                <input
                    type="number"
                    min="0"
                    step="1"
                    prop:value=move || vm.form.with(get).to_string()
                    on:input=move |ev| {
                        let value = event_target_value(&ev).trim().parse::<i32>().unwrap_or(0);
                        vm.form.update(|f| set(f, value));
                    }
                />
            </div>
        }
    };

    view! {
        <div class="details-container product-details">
            <ErrorBox message=vm.error />

            <Show when=move || vm.loading.get()>
                <div class="details-loading">"Cargando..."</div>
            </Show>

            <div class="details-form details-form--grid">
                {text_field("Nombre", |f| f.name.clone(), |f, v| f.name = v, "Ej.: Yerba mate 1kg")}
                {text_field("Código", |f| f.sku.clone(), |f, v| f.sku = v, "Código interno")}
                {text_field(
                    "Código de barras",
                    |f| f.barcode.clone().unwrap_or_default(),
                    |f, v| f.barcode = Some(v),
                    "EAN (8 a 14 dígitos)",
                )}
                {text_field(
                    "Categoría",
                    |f| f.category.clone().unwrap_or_default(),
                    |f, v| f.category = Some(v),
                    "Ej.: Almacén",
                )}

                <div class="form-group">
                    <label>"Precio de costo"</label>
                    <input
                        type="text"
                        inputmode="decimal"
                        placeholder="0,00"
                        prop:value=move || vm.cost_text.get()
                        on:input=move |ev| vm.cost_text.set(event_target_value(&ev))
                    />
                </div>
                <div class="form-group">
                    <label>"Precio de venta"</label>
                    <input
                        type="text"
                        inputmode="decimal"
                        placeholder="0,00"
                        prop:value=move || vm.sale_text.get()
                        on:input=move |ev| vm.sale_text.set(event_target_value(&ev))
                    />
                </div>
                <div class="form-group">
                    <label>"Margen"</label>
                    <span class="form-hint">
                        {move || margin_label(&vm.cost_text.get(), &vm.sale_text.get())}
                    </span>
                </div>

                {int_field("Stock", |f| f.stock, |f, v| f.stock = v)}
                {int_field("Stock mínimo", |f| f.min_stock, |f, v| f.min_stock = v)}

                <div class="form-group">
                    <label>"Proveedor"</label>
                    <select
                        prop:value=move || vm.form.with(|f| f.provider_id.map(|id| id.to_string()).unwrap_or_default())
                        on:change=move |ev| {
                            let value = event_target_value(&ev).parse().ok();
                            vm.form.update(|f| f.provider_id = value);
                        }
                    >
                        <option value="">"Sin proveedor"</option>
                        <For
                            each=move || vm.providers.get()
                            key=|p| p.id
                            children=move |p| {
                                let id = p.id;
                                view! {
                                    <option
                                        value=id.to_string()
                                        selected=move || vm.form.with(|f| f.provider_id == Some(id))
                                    >
                                        {p.name}
                                    </option>
                                }
                            }
                        />
                    </select>
                </div>

                <div class="form-group form-group--wide">
                    <label>"Descripción"</label>
                    <textarea
                        rows="3"
                        prop:value=move || vm.form.with(|f| f.description.clone().unwrap_or_default())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            vm.form.update(|f| f.description = Some(value));
                        }
                    />
                </div>
            </div>

            <div class="details-actions">
                <button
                    class="button button--primary"
                    disabled=move || saving.get() || vm.loading.get()
                    on:click=move |_| vm.submit_command(on_submit)
                >
                    {icon("save")}
                    {move || if vm.is_edit_mode() { "Guardar" } else { "Crear" }}
                </button>
                <button class="button button--secondary" on:click=move |_| on_cancel.run(())>
                    {icon("x")}
                    "Cancelar"
                </button>
            </div>
        </div>
    }
}
