//! Шапка: переключатель меню, текущая дата, пользователь и выход.

use crate::layout::global_context::AppGlobalContext;
use crate::shared::date_utils::{format_date, today_iso};
use crate::shared::icons::icon;
use crate::system::auth::context::{do_logout, use_auth};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

#[component]
fn UserBadge() -> impl IntoView {
    let (auth_state, _) = use_auth();

    let name = move || {
        auth_state.with(|s| {
            s.user
                .as_ref()
                .map(|u| u.display_name().to_string())
                .unwrap_or_default()
        })
    };
    let role = move || auth_state.with(|s| s.user.as_ref().and_then(|u| u.role.clone()));

    view! {
        <div class="top-header__user">
            {icon("user")}
            <span>{name}</span>
            {move || role().map(|role| view! { <span class="top-header__role">{role}</span> })}
        </div>
    }
}

#[component]
pub fn TopHeader() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext context not found");
    let (_, set_auth_state) = use_auth();
    let logging_out = RwSignal::new(false);

    // Выход закрывает все вкладки: следующий пользователь начинает с главной
    let logout = move |_| {
        if logging_out.get_untracked() {
            return;
        }
        logging_out.set(true);
        spawn_local(async move {
            do_logout(set_auth_state).await;
            ctx.reset();
            logging_out.set(false);
        });
    };

    let menu_title = move || {
        if ctx.left_open.get() {
            "Ocultar menú"
        } else {
            "Mostrar menú"
        }
    };
    let menu_icon = move || {
        if ctx.left_open.get() {
            "panel-left-close"
        } else {
            "panel-left-open"
        }
    };

    view! {
        <header class="top-header">
            <div class="top-header__brand">
                <button class="top-header__icon-btn" title=menu_title on:click=move |_| ctx.toggle_left()>
                    {move || icon(menu_icon())}
                </button>
                <span class="top-header__title">"Stockeate"</span>
            </div>

            <div class="top-header__actions">
                <span class="top-header__role">{icon("calendar")} {format_date(&today_iso())}</span>
                <UserBadge />
                <button
                    class="top-header__icon-btn"
                    title="Cerrar sesión"
                    disabled=move || logging_out.get()
                    on:click=logout
                >
                    {move || {
                        if logging_out.get() {
                            view! { <Spinner size=SpinnerSize::Tiny /> }.into_any()
                        } else {
                            icon("log-out")
                        }
                    }}
                </button>
            </div>
        </header>
    }
}
