//! Snackbar-уведомления.
//!
//! `NotificationService` кладётся в контекст в `App`; `NotificationHost`
//! рисует стек уведомлений в правом нижнем углу.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use super::config::config;
use super::icons::icon;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
    Warning,
    Info,
}

impl NotificationLevel {
    fn class(&self) -> &'static str {
        match self {
            NotificationLevel::Success => "snackbar snackbar--success",
            NotificationLevel::Error => "snackbar snackbar--error",
            NotificationLevel::Warning => "snackbar snackbar--warning",
            NotificationLevel::Info => "snackbar snackbar--info",
        }
    }

    fn icon(&self) -> &'static str {
        match self {
            NotificationLevel::Success => "check",
            NotificationLevel::Error => "alert",
            NotificationLevel::Warning => "alert",
            NotificationLevel::Info => "info",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: u64,
    pub level: NotificationLevel,
    pub message: String,
}

#[derive(Clone, Copy)]
pub struct NotificationService {
    items: RwSignal<Vec<Notification>>,
    next_id: StoredValue<u64>,
}

impl NotificationService {
    pub fn new() -> Self {
        Self {
            items: RwSignal::new(Vec::new()),
            next_id: StoredValue::new(1),
        }
    }

    pub fn push(&self, level: NotificationLevel, message: impl Into<String>) -> u64 {
        let id = self.next_id.get_value();
        self.next_id.set_value(id + 1);

        self.items.update(|items| {
            items.push(Notification {
                id,
                level,
                message: message.into(),
            })
        });

        let svc = *self;
        let timeout = config().notifications.timeout_ms;
        spawn_local(async move {
            TimeoutFuture::new(timeout).await;
            svc.dismiss(id);
        });

        id
    }

    pub fn success(&self, message: impl Into<String>) -> u64 {
        self.push(NotificationLevel::Success, message)
    }

    pub fn error(&self, message: impl Into<String>) -> u64 {
        self.push(NotificationLevel::Error, message)
    }

    pub fn warning(&self, message: impl Into<String>) -> u64 {
        self.push(NotificationLevel::Warning, message)
    }

    pub fn info(&self, message: impl Into<String>) -> u64 {
        self.push(NotificationLevel::Info, message)
    }

    pub fn dismiss(&self, id: u64) {
        let _ = self.items.try_update(|items| items.retain(|n| n.id != id));
    }
}

impl Default for NotificationService {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_notifications() -> NotificationService {
    use_context::<NotificationService>().expect("NotificationService not found in context")
}

#[component]
pub fn NotificationHost() -> impl IntoView {
    let svc = use_notifications();

    view! {
        <div class="snackbar-host">
            <For
                each=move || svc.items.get()
                key=|n| n.id
                children=move |n: Notification| {
                    let id = n.id;
                    view! {
                        <div class=n.level.class() role="status">
                            {icon(n.level.icon())}
                            <span class="snackbar__text">{n.message}</span>
                            <button class="snackbar__close" on:click=move |_| svc.dismiss(id) title="Cerrar">
                                {icon("x")}
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
