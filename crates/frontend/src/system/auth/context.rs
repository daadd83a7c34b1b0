use contracts::system::auth::{LoginRequest, UserInfo};
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::api;
use crate::shared::api::{set_session_expired_handler, ApiError};

#[derive(Clone, Debug, PartialEq)]
pub struct AuthState {
    pub user: Option<UserInfo>,
    /// Идёт первичная проверка сессии (GET /auth/me)
    pub checking: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            user: None,
            checking: true,
        }
    }
}

impl AuthState {
    pub fn signed_out() -> Self {
        Self {
            user: None,
            checking: false,
        }
    }

    pub fn signed_in(user: UserInfo) -> Self {
        Self {
            user: Some(user),
            checking: false,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

/// Auth context provider component
#[component]
pub fn AuthProvider(children: ChildrenFn) -> impl IntoView {
    let (auth_state, set_auth_state) = signal(AuthState::default());

    // Истёкшая сессия (refresh не удался) возвращает на форму входа
    set_session_expired_handler(move || {
        if auth_state.get_untracked().is_authenticated() {
            log::info!("session expired, signing out");
        }
        set_auth_state.set(AuthState::signed_out());
    });

    // Try to restore the cookie session on mount
    spawn_local(async move {
        match api::get_current_user().await {
            Ok(user) => {
                log::info!("session restored for {}", user.username);
                set_auth_state.set(AuthState::signed_in(user));
            }
            Err(e) => {
                log::info!("no active session: {}", e);
                set_auth_state.set(AuthState::signed_out());
            }
        }
    });

    provide_context(auth_state);
    provide_context(set_auth_state);

    children()
}

/// Hook to access auth state
pub fn use_auth() -> (ReadSignal<AuthState>, WriteSignal<AuthState>) {
    let auth_state =
        use_context::<ReadSignal<AuthState>>().expect("AuthProvider not found in component tree");
    let set_auth_state =
        use_context::<WriteSignal<AuthState>>().expect("AuthProvider not found in component tree");

    (auth_state, set_auth_state)
}

/// Perform login; the state setter comes from `use_auth()` of the caller
pub async fn do_login(
    request: LoginRequest,
    set_auth_state: WriteSignal<AuthState>,
) -> Result<UserInfo, String> {
    request.validate()?;

    match api::login(&request).await {
        Ok(user) => {
            log::info!("signed in as {}", user.username);
            set_auth_state.set(AuthState::signed_in(user.clone()));
            Ok(user)
        }
        Err(ApiError::Http { status: 401, .. }) => {
            Err("Usuario o contraseña incorrectos".to_string())
        }
        Err(e) => {
            log::error!("login failed: {}", e);
            Err(e.to_string())
        }
    }
}

/// Perform logout; local state is cleared even if the request fails
pub async fn do_logout(set_auth_state: WriteSignal<AuthState>) {
    if let Err(e) = api::logout().await {
        log::warn!("logout request failed: {}", e);
    }
    set_auth_state.set(AuthState::signed_out());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_state_transitions() {
        let initial = AuthState::default();
        assert!(initial.checking);
        assert!(!initial.is_authenticated());

        let user = UserInfo {
            id: 1,
            username: "caja1".into(),
            full_name: None,
            email: None,
            role: None,
        };
        let signed_in = AuthState::signed_in(user);
        assert!(!signed_in.checking);
        assert!(signed_in.is_authenticated());

        assert_eq!(AuthState::signed_out(), AuthState { user: None, checking: false });
    }
}
