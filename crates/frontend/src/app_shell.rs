//! Корневой переключатель: заставка проверки сессии, вход или приложение

use crate::layout::global_context::AppGlobalContext;
use crate::layout::Shell;
use crate::system::auth::context::use_auth;
use crate::system::pages::login::LoginPage;
use leptos::prelude::*;
use thaw::*;

/// Приложение после входа; вкладки синхронизируются с `?active=...`
#[component]
fn MainLayout() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext context not found");
    ctx.init_router_integration();

    view! { <Shell /> }
}

#[component]
fn SessionSplash() -> impl IntoView {
    view! {
        <div class="session-splash">
            <Spinner />
            <span>"Verificando sesión..."</span>
        </div>
    }
}

/// Пока идёт проверка cookie-сессии показывается заставка, затем вход или приложение.
#[component]
pub fn AppShell() -> impl IntoView {
    let (auth_state, _) = use_auth();

    view! {
        <Show
            when=move || !auth_state.with(|s| s.checking)
            fallback=|| view! { <SessionSplash /> }
        >
            <Show
                when=move || auth_state.with(|s| s.is_authenticated())
                fallback=|| view! { <LoginPage /> }
            >
                <MainLayout />
            </Show>
        </Show>
    }
}
