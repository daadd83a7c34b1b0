use contracts::system::auth::LoginRequest;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::icons::icon;
use crate::system::auth::{context::do_login, context::use_auth, storage};

#[component]
pub fn LoginPage() -> impl IntoView {
    let remembered = storage::get_last_username();
    let (username, set_username) = signal(remembered.clone().unwrap_or_default());
    let (password, set_password) = signal(String::new());
    let (remember_me, set_remember_me) = signal(remembered.is_some());
    let (error_message, set_error_message) = signal(Option::<String>::None);
    let (is_loading, set_is_loading) = signal(false);

    let (_, set_auth_state) = use_auth();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if is_loading.get_untracked() {
            return;
        }

        let request = LoginRequest {
            username: username.get_untracked().trim().to_string(),
            password: password.get_untracked(),
        };
        if let Err(msg) = request.validate() {
            set_error_message.set(Some(msg));
            return;
        }

        set_is_loading.set(true);
        set_error_message.set(None);

        let remember = remember_me.get_untracked();
        spawn_local(async move {
            let login_name = request.username.clone();
            match do_login(request, set_auth_state).await {
                Ok(_) => {
                    if remember {
                        storage::save_last_username(&login_name);
                    } else {
                        storage::clear_last_username();
                    }
                }
                Err(e) => {
                    set_password.set(String::new());
                    set_error_message.set(Some(e));
                }
            }
            set_is_loading.set(false);
        });
    };

    view! {
        <div class="login-container">
            <div class="login-box">
                <div class="login-box__logo">{icon("package")}</div>
                <h1>"Stockeate"</h1>
                <h2>"Iniciar sesión"</h2>

                <Show when=move || error_message.get().is_some()>
                    <div class="warning-box warning-box--error">
                        <span class="warning-box__icon">{icon("alert")}</span>
                        <span class="warning-box__text">{move || error_message.get().unwrap_or_default()}</span>
                    </div>
                </Show>

                <form on:submit=on_submit>
                    <div class="form-group">
                        <label for="username">"Usuario"</label>
                        <input
                            type="text"
                            id="username"
                            autocomplete="username"
                            prop:value=move || username.get()
                            on:input=move |ev| set_username.set(event_target_value(&ev))
                            disabled=move || is_loading.get()
                        />
                    </div>

                    <div class="form-group">
                        <label for="password">"Contraseña"</label>
                        <input
                            type="password"
                            id="password"
                            autocomplete="current-password"
                            prop:value=move || password.get()
                            on:input=move |ev| set_password.set(event_target_value(&ev))
                            disabled=move || is_loading.get()
                        />
                    </div>

                    <label class="form-check">
                        <input
                            type="checkbox"
                            prop:checked=move || remember_me.get()
                            on:change=move |ev| set_remember_me.set(event_target_checked(&ev))
                        />
                        "Recordar usuario"
                    </label>

                    <button
                        type="submit"
                        class="button button--primary button--block"
                        disabled=move || is_loading.get()
                    >
                        {move || if is_loading.get() { "Ingresando..." } else { "Ingresar" }}
                    </button>
                </form>
            </div>
        </div>
    }
}
