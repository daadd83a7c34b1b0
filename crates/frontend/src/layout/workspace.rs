//! Рабочая область: полоса вкладок и их содержимое.
//!
//! Содержимое вкладки строится один раз при открытии и живёт до закрытия;
//! неактивные вкладки только скрываются, поэтому фильтры и введённые данные
//! сохраняются при переключении.

use super::global_context::{AppGlobalContext, Tab};
use super::tabs::registry::render_tab_content;
use crate::shared::icons::icon_sized;
use leptos::ev;
use leptos::prelude::*;

/// Средняя кнопка мыши
const AUX_BUTTON_MIDDLE: i16 = 1;

#[component]
fn TabButton(tab: Tab, ctx: AppGlobalContext) -> impl IntoView {
    let key = StoredValue::new(tab.key);
    let title = tab.title;
    let tooltip = title.clone();
    let is_active = Memo::new(move |_| key.with_value(|k| ctx.is_active(k)));

    let close = move || key.with_value(|k| ctx.close_tab(k));

    view! {
        <div
            class="tab"
            class:active=is_active
            title=tooltip
            on:click=move |_| key.with_value(|k| ctx.activate_tab(k))
            on:auxclick=move |ev: ev::MouseEvent| {
                if ev.button() == AUX_BUTTON_MIDDLE {
                    close();
                }
            }
        >
            <span>{title}</span>
            <button
                class="tab-close"
                title="Cerrar"
                on:click=move |ev: ev::MouseEvent| {
                    ev.stop_propagation();
                    close();
                }
            >
                {icon_sized("x", 14)}
            </button>
        </div>
    }
}

#[component]
fn TabPane(tab: Tab, ctx: AppGlobalContext) -> impl IntoView {
    let key = tab.key;
    let key_for_check = key.clone();
    let hidden = move || !ctx.is_active(&key_for_check);

    let key_for_cleanup = key.clone();
    on_cleanup(move || log::debug!("tab '{}' disposed", key_for_cleanup));

    let content = render_tab_content(&key);

    view! {
        <div class="tabs__item" class:tabs__item--hidden=hidden data-tab-key=key>
            {content}
        </div>
    }
}

#[component]
pub fn Workspace() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext context not found");
    let no_tabs = move || ctx.opened.with(|tabs| tabs.is_empty());

    view! {
        <div class="tabs-container">
            <div class="tabs-bar">
                <For
                    each=move || ctx.opened.get()
                    key=|tab| tab.key.clone()
                    children=move |tab| view! { <TabButton tab=tab ctx=ctx /> }
                />
            </div>
            <div class="tab-content app-tabs">
                <For
                    each=move || ctx.opened.get()
                    key=|tab| tab.key.clone()
                    children=move |tab| view! { <TabPane tab=tab ctx=ctx /> }
                />
                {move || {
                    no_tabs()
                        .then(|| {
                            view! {
                                <div class="placeholder">"Seleccione una sección en el menú"</div>
                            }
                        })
                }}
            </div>
        </div>
    }
}
