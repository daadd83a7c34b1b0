use super::view_model::ProviderDetailsViewModel;
use crate::shared::icons::icon;
use crate::shared::page_frame::ErrorBox;
use contracts::domain::a002_provider::ProviderDto;
use leptos::prelude::*;

type Getter = fn(&ProviderDto) -> Option<String>;
type Setter = fn(&mut ProviderDto, Option<String>);

#[component]
pub fn ProviderDetails(
    initial: ProviderDto,
    on_submit: Callback<ProviderDto>,
    on_cancel: Callback<()>,
    #[prop(into, optional)]
    saving: Signal<bool>,
) -> impl IntoView {
    let vm = ProviderDetailsViewModel::new(initial);

    let optional_field = move |label: &'static str, get: Getter, set: Setter, placeholder: &'static str| {
        view! {
            <div class="form-group">
                <label>{label}</label>
                <input
                    type="text"
                    placeholder=placeholder
                    prop:value=move || vm.form.with(get).unwrap_or_default()
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        vm.form.update(|f| set(f, Some(value)));
                    }
                />
            </div>
        }
    };

    view! {
        <div class="details-container provider-details">
            <ErrorBox message=vm.error />

            <div class="details-form details-form--grid">
                <div class="form-group">
                    <label>"Razón social"</label>
                    <input
                        type="text"
                        placeholder="Ej.: Distribuidora Norte SRL"
                        prop:value=move || vm.form.with(|f| f.name.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            vm.form.update(|f| f.name = value);
                        }
                    />
                </div>
                {optional_field("CUIT", |f| f.cuit.clone(), |f, v| f.cuit = v, "20-12345678-6")}
                {optional_field("Contacto", |f| f.contact_name.clone(), |f, v| f.contact_name = v, "Nombre de la persona")}
                {optional_field("Teléfono", |f| f.phone.clone(), |f, v| f.phone = v, "")}
                {optional_field("Email", |f| f.email.clone(), |f, v| f.email = v, "ventas@proveedor.com")}
                {optional_field("Dirección", |f| f.address.clone(), |f, v| f.address = v, "")}

                <div class="form-group form-group--wide">
                    <label>"Notas"</label>
                    <textarea
                        rows="3"
                        prop:value=move || vm.form.with(|f| f.notes.clone().unwrap_or_default())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            vm.form.update(|f| f.notes = Some(value));
                        }
                    />
                </div>
            </div>

            <div class="details-actions">
                <button
                    class="button button--primary"
                    disabled=move || saving.get()
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
