//! HTTP client for the Stockeate REST API.
//!
//! Session lives in httpOnly cookies, so every request goes out with
//! `credentials: include`. A 401/403 on a regular endpoint triggers exactly
//! one `POST /auth/refresh`; on success the original request is rebuilt and
//! sent again, otherwise the session-expired handler runs (the shell then
//! falls back to the login page). Parallel 401s wait on one shared refresh.

use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;
use std::thread::LocalKey;

use contracts::system::auth::ApiMessage;
use futures::future::{FutureExt, LocalBoxFuture, Shared};
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use web_sys::RequestCredentials;

use super::config::api_base;

const LOGIN_PATH: &str = "/auth/login";
const REFRESH_PATH: &str = "/auth/refresh";
const LOGOUT_PATH: &str = "/auth/logout";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error("Error de red: {0}")]
    Network(String),

    #[error("La sesión expiró. Inicie sesión nuevamente.")]
    SessionExpired,

    #[error("{message}")]
    Http { status: u16, message: String },

    #[error("Respuesta inválida del servidor: {0}")]
    Parse(String),

    #[error("No se pudo preparar la solicitud: {0}")]
    Serialize(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

/// Что делать с ответом, пришедшим от сервера
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshDecision {
    /// Ответ отдаётся вызывающему как есть
    Proceed,
    /// Обновить сессию и повторить запрос один раз
    RefreshAndRetry,
    /// Сессию восстановить не удалось
    Expire,
}

fn is_auth_failure(status: u16) -> bool {
    status == 401 || status == 403
}

/// login/refresh/logout отвечают 401 по существу, refresh для них бессмыслен
fn is_session_endpoint(path: &str) -> bool {
    let route = path.split('?').next().unwrap_or(path);
    [LOGIN_PATH, REFRESH_PATH, LOGOUT_PATH].contains(&route)
}

/// Политика повтора: не более одного refresh на запрос. `/auth/me` обновляет
/// сессию как обычный эндпоинт.
pub fn refresh_decision(status: u16, path: &str, already_retried: bool) -> RefreshDecision {
    if !is_auth_failure(status) || is_session_endpoint(path) {
        RefreshDecision::Proceed
    } else if already_retried {
        RefreshDecision::Expire
    } else {
        RefreshDecision::RefreshAndRetry
    }
}

/// Ошибка по статусу и телу ответа; текст берётся из `message`/`error`, если он есть
pub fn http_error(status: u16, body: &str) -> ApiError {
    let from_body = serde_json::from_str::<ApiMessage>(body)
        .ok()
        .and_then(ApiMessage::text);

    let message = from_body.unwrap_or_else(|| match status {
        400 | 422 => "Los datos enviados no son válidos".to_string(),
        401 | 403 => "No autorizado".to_string(),
        404 => "No encontrado".to_string(),
        409 => "Conflicto con datos existentes".to_string(),
        s if s >= 500 => format!("Error del servidor ({})", s),
        s => format!("Error inesperado ({})", s),
    });

    ApiError::Http { status, message }
}

/// Путь с query string: `query_path("/ventas", &filter)` -> `/ventas?desde=...`
pub fn query_path<Q: Serialize>(path: &str, query: &Q) -> Result<String, ApiError> {
    let qs = serde_qs::to_string(query).map_err(|e| ApiError::Serialize(e.to_string()))?;
    if qs.is_empty() {
        Ok(path.to_string())
    } else {
        Ok(format!("{}?{}", path, qs))
    }
}

// ============================================================================
// Session-expired hook
// ============================================================================

thread_local! {
    static ON_SESSION_EXPIRED: RefCell<Option<Rc<dyn Fn()>>> = RefCell::new(None);
}

/// Регистрирует обработчик истечения сессии (ставит AuthProvider)
pub fn set_session_expired_handler(handler: impl Fn() + 'static) {
    ON_SESSION_EXPIRED.with(|h| *h.borrow_mut() = Some(Rc::new(handler)));
}

fn notify_session_expired() {
    log::warn!("session expired, redirecting to login");
    let handler = ON_SESSION_EXPIRED.with(|h| h.borrow().clone());
    if let Some(handler) = handler {
        handler();
    }
}

// ============================================================================
// Transport
// ============================================================================

fn build_request(method: Method, url: &str, body: Option<&str>) -> Result<Request, ApiError> {
    let builder = match method {
        Method::Get => Request::get(url),
        Method::Post => Request::post(url),
        Method::Put => Request::put(url),
        Method::Delete => Request::delete(url),
    }
    .credentials(RequestCredentials::Include)
    .header("Accept", "application/json");

    let request = match body {
        Some(json) => builder
            .header("Content-Type", "application/json")
            .body(json.to_string()),
        None => builder.build(),
    };

    request.map_err(|e| ApiError::Serialize(e.to_string()))
}

async fn send_once(method: Method, path: &str, body: Option<&str>) -> Result<Response, ApiError> {
    let url = format!("{}{}", api_base(), path);
    build_request(method, &url, body)?
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))
}

async fn refresh_session() -> Result<(), ApiError> {
    let response = send_once(Method::Post, REFRESH_PATH, None).await?;
    if response.ok() {
        log::info!("session refreshed");
        Ok(())
    } else {
        Err(http_error(response.status(), ""))
    }
}

type InFlightRefresh = Shared<LocalBoxFuture<'static, Result<(), ApiError>>>;

thread_local! {
    static REFRESH_IN_FLIGHT: RefCell<Option<InFlightRefresh>> = const { RefCell::new(None) };
}

/// Возвращает уже идущий refresh или запускает новый через `start`.
/// Слот освобождается, когда refresh завершён.
fn join_or_start_refresh<F>(
    slot: &'static LocalKey<RefCell<Option<InFlightRefresh>>>,
    start: impl FnOnce() -> F,
) -> InFlightRefresh
where
    F: Future<Output = Result<(), ApiError>> + 'static,
{
    slot.with(|current| {
        current
            .borrow_mut()
            .get_or_insert_with(|| {
                let refresh = start();
                async move {
                    let result = refresh.await;
                    slot.with(|current| current.borrow_mut().take());
                    result
                }
                .boxed_local()
                .shared()
            })
            .clone()
    })
}

async fn execute(method: Method, path: &str, body: Option<String>) -> Result<Response, ApiError> {
    let mut retried = false;
    loop {
        let response = send_once(method, path, body.as_deref()).await?;

        match refresh_decision(response.status(), path, retried) {
            RefreshDecision::Proceed => return into_result(response).await,
            RefreshDecision::RefreshAndRetry => {
                retried = true;
                if let Err(e) = join_or_start_refresh(&REFRESH_IN_FLIGHT, refresh_session).await {
                    log::warn!("refresh failed for {}: {}", path, e);
                    notify_session_expired();
                    return Err(ApiError::SessionExpired);
                }
            }
            RefreshDecision::Expire => {
                notify_session_expired();
                return Err(ApiError::SessionExpired);
            }
        }
    }
}

async fn into_result(response: Response) -> Result<Response, ApiError> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Err(http_error(status, &body))
}

fn encode<B: Serialize>(body: &B) -> Result<String, ApiError> {
    serde_json::to_string(body).map_err(|e| ApiError::Serialize(e.to_string()))
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Parse(e.to_string()))
}

// ============================================================================
// Public API
// ============================================================================

pub async fn get_json<T: DeserializeOwned>(path: &str) -> Result<T, ApiError> {
    let response = execute(Method::Get, path, None).await?;
    decode(response).await
}

pub async fn post_json<B: Serialize, T: DeserializeOwned>(path: &str, body: &B) -> Result<T, ApiError> {
    let response = execute(Method::Post, path, Some(encode(body)?)).await?;
    decode(response).await
}

pub async fn put_json<B: Serialize, T: DeserializeOwned>(path: &str, body: &B) -> Result<T, ApiError> {
    let response = execute(Method::Put, path, Some(encode(body)?)).await?;
    decode(response).await
}

/// POST без тела ответа (logout и т.п.)
pub async fn post_empty(path: &str) -> Result<(), ApiError> {
    execute(Method::Post, path, None).await.map(|_| ())
}

pub async fn delete(path: &str) -> Result<(), ApiError> {
    execute(Method::Delete, path, None).await.map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_decision_success_passes_through() {
        assert_eq!(refresh_decision(200, "/producto", false), RefreshDecision::Proceed);
        assert_eq!(refresh_decision(404, "/producto/9", false), RefreshDecision::Proceed);
        assert_eq!(refresh_decision(500, "/ventas", true), RefreshDecision::Proceed);
    }

    #[test]
    fn test_refresh_decision_retries_once() {
        assert_eq!(refresh_decision(401, "/producto", false), RefreshDecision::RefreshAndRetry);
        assert_eq!(refresh_decision(403, "/ventas", false), RefreshDecision::RefreshAndRetry);
        assert_eq!(refresh_decision(401, "/producto", true), RefreshDecision::Expire);
        assert_eq!(refresh_decision(403, "/ventas", true), RefreshDecision::Expire);
    }

    #[test]
    fn test_refresh_decision_skips_session_endpoints() {
        assert_eq!(refresh_decision(401, LOGIN_PATH, false), RefreshDecision::Proceed);
        assert_eq!(refresh_decision(401, REFRESH_PATH, false), RefreshDecision::Proceed);
        assert_eq!(refresh_decision(401, LOGOUT_PATH, false), RefreshDecision::Proceed);
    }

    #[test]
    fn test_refresh_decision_restores_session_on_me() {
        assert_eq!(refresh_decision(401, "/auth/me", false), RefreshDecision::RefreshAndRetry);
        assert_eq!(refresh_decision(403, "/auth/me", false), RefreshDecision::RefreshAndRetry);
        assert_eq!(refresh_decision(401, "/auth/me", true), RefreshDecision::Expire);
    }

    thread_local! {
        static TEST_REFRESH: RefCell<Option<InFlightRefresh>> = const { RefCell::new(None) };
    }

    #[test]
    fn test_parallel_failures_share_one_refresh() {
        use futures::executor::block_on;
        use std::cell::Cell;

        let started = Rc::new(Cell::new(0));
        let start = || {
            let started = started.clone();
            move || {
                started.set(started.get() + 1);
                async { Ok(()) }
            }
        };

        let first = join_or_start_refresh(&TEST_REFRESH, start());
        let second = join_or_start_refresh(&TEST_REFRESH, start());
        let third = join_or_start_refresh(&TEST_REFRESH, start());
        let results = block_on(futures::future::join3(first, second, third));
        assert_eq!(results, (Ok(()), Ok(()), Ok(())));
        assert_eq!(started.get(), 1);

        // завершённый refresh освобождает слот
        assert!(TEST_REFRESH.with(|slot| slot.borrow().is_none()));
        let next = join_or_start_refresh(&TEST_REFRESH, start());
        assert_eq!(block_on(next), Ok(()));
        assert_eq!(started.get(), 2);
    }

    #[test]
    fn test_failed_refresh_reaches_every_waiter() {
        use futures::executor::block_on;

        let failing = || async { Err(ApiError::Http { status: 401, message: "No autorizado".into() }) };
        let first = join_or_start_refresh(&TEST_REFRESH, failing);
        let second = join_or_start_refresh(&TEST_REFRESH, failing);
        let (a, b) = block_on(futures::future::join(first, second));
        assert_eq!(a, b);
        assert!(a.is_err());
    }

    #[test]
    fn test_http_error_uses_backend_message() {
        let err = http_error(409, r#"{"message":"El código ya existe"}"#);
        assert_eq!(
            err,
            ApiError::Http { status: 409, message: "El código ya existe".into() }
        );
        assert_eq!(err.to_string(), "El código ya existe");
    }

    #[test]
    fn test_http_error_defaults() {
        assert_eq!(http_error(404, "").to_string(), "No encontrado");
        assert_eq!(http_error(502, "<html>").to_string(), "Error del servidor (502)");
        assert_eq!(http_error(418, "{}").to_string(), "Error inesperado (418)");
        assert!(http_error(404, "").is_not_found());
    }

    #[test]
    fn test_query_path() {
        #[derive(Serialize)]
        struct Filter<'a> {
            desde: &'a str,
            hasta: &'a str,
            #[serde(skip_serializing_if = "Option::is_none")]
            metodo_pago: Option<&'a str>,
        }

        let path = query_path(
            "/ventas",
            &Filter { desde: "2024-06-01", hasta: "2024-06-30", metodo_pago: None },
        )
        .unwrap();
        assert_eq!(path, "/ventas?desde=2024-06-01&hasta=2024-06-30");

        #[derive(Serialize)]
        struct Empty {}
        assert_eq!(query_path("/producto", &Empty {}).unwrap(), "/producto");
    }
}
