pub mod state;

use self::state::create_state;
use super::details::ProviderDetails;
use crate::domain::a002_provider::api;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::table::SortableHeaderCell;
use crate::shared::icons::icon;
use crate::shared::list_utils::{highlight_matches, replace_by_id, SearchInput};
use crate::shared::modal::{ConfirmDialog, Modal};
use crate::shared::notifications::use_notifications;
use crate::shared::page_frame::{ErrorBox, PageFrame, PageHeader};
use crate::shared::page_standard::PAGE_CAT_LIST;
use contracts::domain::a002_provider::{Provider, ProviderDto};
use contracts::domain::common::AggregateRoot;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// Форматирует CUIT как 20-12345678-6
fn display_cuit(cuit: &Option<String>) -> String {
    match cuit.as_deref() {
        Some(c) if c.len() == 11 && c.chars().all(|ch| ch.is_ascii_digit()) => {
            format!("{}-{}-{}", &c[..2], &c[2..10], &c[10..])
        }
        Some(c) => c.to_string(),
        None => "—".to_string(),
    }
}

#[component]
pub fn ProviderList() -> impl IntoView {
    let notifications = use_notifications();
    let state = create_state();
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);
    let (saving, set_saving) = signal(false);

    let editing = RwSignal::new(None::<ProviderDto>);
    let deactivating = RwSignal::new(None::<Provider>);

    let load_items = move || {
        set_loading.set(true);
        set_error.set(None);
        spawn_local(async move {
            match api::fetch_providers().await {
                Ok(items) => state.update(|s| {
                    s.items = items;
                    s.is_loaded = true;
                }),
                Err(e) => {
                    log::error!("fetch providers: {}", e);
                    set_error.set(Some(e.to_string()));
                }
            }
            set_loading.set(false);
        });
    };

    load_items();

    let save_provider = move |dto: ProviderDto| match dto.id {
        Some(id) => {
            let mut previous = None;
            state.update(|s| {
                if let Some(mut updated) = s.items.iter().find(|p| p.id == id).cloned() {
                    updated.apply(&dto);
                    previous = replace_by_id(&mut s.items, updated);
                }
            });
            editing.set(None);
            spawn_local(async move {
                match api::update_provider(id, &dto).await {
                    Ok(saved) => {
                        state.update(|s| {
                            replace_by_id(&mut s.items, saved);
                        });
                        notifications.success("Proveedor actualizado");
                    }
                    Err(e) => {
                        log::error!("update provider {}: {}", id, e);
                        if let Some(prev) = previous {
                            state.update(|s| {
                                replace_by_id(&mut s.items, prev);
                            });
                        }
                        notifications.error(format!("No se pudo guardar el proveedor: {}", e));
                    }
                }
            });
        }
        None => {
            set_saving.set(true);
            spawn_local(async move {
                match api::create_provider(&dto).await {
                    Ok(created) => {
                        state.update(|s| s.items.push(created));
                        editing.set(None);
                        notifications.success("Proveedor creado");
                    }
                    Err(e) => {
                        log::error!("create provider: {}", e);
                        notifications.error(format!("No se pudo crear el proveedor: {}", e));
                    }
                }
                set_saving.set(false);
            });
        }
    };

    // Деактивация: сразу помечаем неактивным, при ошибке возвращаем
    let confirm_deactivate = move || {
        let Some(provider) = deactivating.get_untracked() else {
            return;
        };
        deactivating.set(None);
        let id = provider.id;
        let mut inactive = provider.clone();
        inactive.active = false;
        state.update(|s| {
            replace_by_id(&mut s.items, inactive);
        });
        spawn_local(async move {
            match api::deactivate_provider(id).await {
                Ok(()) => {
                    notifications.success(format!("\"{}\" desactivado", provider.name));
                }
                Err(e) => {
                    log::error!("deactivate provider {}: {}", id, e);
                    state.update(|s| {
                        replace_by_id(&mut s.items, provider);
                    });
                    notifications.error(format!("No se pudo desactivar el proveedor: {}", e));
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
    let subtitle = Signal::derive(move || {
        state
            .with(|s| s.is_loaded.then(|| s.active_count()))
            .map(|n| format!("{} activos", n))
    });

    view! {
        <PageFrame page_id="a002_provider--list" category=PAGE_CAT_LIST>
            <PageHeader title="Proveedores" subtitle=subtitle>
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| editing.set(Some(ProviderDto::default()))
                >
                    {icon("plus")}
                    "Nuevo proveedor"
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
                            <SearchInput
                                value=query
                                on_change=Callback::new(move |q: String| state.update(|s| s.list.set_query(q)))
                                placeholder="Nombre, CUIT o contacto"
                            />
                            <label class="filter-checkbox">
                                <input
                                    type="checkbox"
                                    prop:checked=move || state.with(|s| s.show_inactive)
                                    on:change=move |ev| {
                                        let checked = event_target_checked(&ev);
                                        state.update(|s| {
                                            s.show_inactive = checked;
                                            s.list.page = 0;
                                        });
                                    }
                                />
                                "Mostrar inactivos"
                            </label>
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
                                <SortableHeaderCell label="Nombre" sort_field="name" current_sort_field=sort_field sort_ascending=sort_ascending on_sort=toggle_sort />
                                <SortableHeaderCell label="CUIT" sort_field="cuit" current_sort_field=sort_field sort_ascending=sort_ascending on_sort=toggle_sort />
                                <SortableHeaderCell label="Contacto" sort_field="contact_name" current_sort_field=sort_field sort_ascending=sort_ascending on_sort=toggle_sort />
                                <SortableHeaderCell label="Teléfono" sort_field="phone" current_sort_field=sort_field sort_ascending=sort_ascending on_sort=toggle_sort />
                                <TableHeaderCell>"Email"</TableHeaderCell>
                                <TableHeaderCell>"Estado"</TableHeaderCell>
                                <TableHeaderCell>""</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=move || visible.get().0
                                key=|p| (p.id, p.name.clone(), p.active, p.cuit.clone(), p.contact_name.clone(), p.phone.clone(), p.email.clone())
                                children=move |provider: Provider| {
                                    let name = provider.name.clone();
                                    let active = provider.active;
                                    let for_edit = provider.to_dto();
                                    let for_deactivate = provider.clone();
                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    {move || highlight_matches(&name, &query.get())}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell><TableCellLayout>{display_cuit(&provider.cuit)}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout>{provider.contact_name.clone().unwrap_or_default()}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout>{provider.phone.clone().unwrap_or_default()}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout truncate=true>{provider.email.clone().unwrap_or_default()}</TableCellLayout></TableCell>
                                            <TableCell>
                                                {if active {
                                                    view! { <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Success>"Activo"</Badge> }.into_any()
                                                } else {
                                                    view! { <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Subtle>"Inactivo"</Badge> }.into_any()
                                                }}
                                            </TableCell>
                                            <TableCell>
                                                <div class="table__actions">
                                                    <button
                                                        class="button button--icon"
                                                        title="Editar"
                                                        on:click=move |_| editing.set(Some(for_edit.clone()))
                                                    >
                                                        {icon("edit")}
                                                    </button>
                                                    {active.then(|| view! {
                                                        <button
                                                            class="button button--icon button--danger"
                                                            title="Desactivar"
                                                            on:click=move |_| deactivating.set(Some(for_deactivate.clone()))
                                                        >
                                                            {icon("trash")}
                                                        </button>
                                                    })}
                                                </div>
                                            </TableCell>
                                        </TableRow>
                                    }
                                }
                            />
                        </TableBody>
                    </Table>
                    <Show when=move || state.with(|s| s.is_loaded) && visible.with(|v| v.1 == 0)>
                        <div class="table__empty">"No hay proveedores para mostrar"</div>
                    </Show>
                </div>
            </div>

            {move || editing.get().map(|dto| {
                let element = Provider::element_name().to_lowercase();
                let title = if dto.is_edit() {
                    format!("Editar {}", element)
                } else {
                    format!("Nuevo {}", element)
                };
                view! {
                    <Modal title=title on_close=Callback::new(move |_| editing.set(None))>
                        <ProviderDetails
                            initial=dto
                            on_submit=Callback::new(save_provider)
                            on_cancel=Callback::new(move |_| editing.set(None))
                            saving=saving
                        />
                    </Modal>
                }
            })}

            {move || deactivating.get().map(|provider| view! {
                <ConfirmDialog
                    title="Desactivar proveedor"
                    message=format!(
                        "¿Desactivar \"{}\"? Las compras registradas se conservan.",
                        provider.name,
                    )
                    confirm_label="Desactivar"
                    on_confirm=Callback::new(move |_| confirm_deactivate())
                    on_cancel=Callback::new(move |_| deactivating.set(None))
                />
            })}
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_cuit() {
        assert_eq!(display_cuit(&Some("20123456786".into())), "20-12345678-6");
        assert_eq!(display_cuit(&Some("20-1234".into())), "20-1234");
        assert_eq!(display_cuit(&None), "—");
    }
}
