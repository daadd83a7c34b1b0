use contracts::domain::a005_cash_closing::{CashRegisterClosing, CreateClosingRequest, DailySummary};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::domain::a005_cash_closing::api;
use crate::shared::components::table::parse_amount;
use crate::shared::date_utils::today_iso;
use crate::shared::notifications::NotificationService;

/// Пустое поле считается нулём
fn amount_or_zero(text: &str, message: &str) -> Result<f64, String> {
    if text.trim().is_empty() {
        return Ok(0.0);
    }
    parse_amount(text).ok_or_else(|| message.to_string())
}

/// Собирает запрос из текстовых полей формы
pub fn build_request(
    date: &str,
    opening: &str,
    expenses: &str,
    actual: &str,
    notes: &str,
) -> Result<CreateClosingRequest, String> {
    if actual.trim().is_empty() {
        return Err("Ingrese el efectivo contado".into());
    }
    let request = CreateClosingRequest {
        date: date.trim().to_string(),
        opening_amount: amount_or_zero(opening, "Monto inicial inválido")?,
        expenses: amount_or_zero(expenses, "Egresos inválidos")?,
        actual_cash: amount_or_zero(actual, "Efectivo contado inválido")?,
        notes: Some(notes.trim().to_string()).filter(|n| !n.is_empty()),
    };
    request.validate()?;
    Ok(request)
}

#[derive(Clone, Copy)]
pub struct ClosingFormViewModel {
    pub date: RwSignal<String>,
    pub opening_text: RwSignal<String>,
    pub expenses_text: RwSignal<String>,
    pub actual_text: RwSignal<String>,
    pub notes: RwSignal<String>,
    pub summary: RwSignal<Option<DailySummary>>,
    pub loading: RwSignal<bool>,
    pub saving: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
}

impl ClosingFormViewModel {
    pub fn new() -> Self {
        Self {
            date: RwSignal::new(today_iso()),
            opening_text: RwSignal::new(String::new()),
            expenses_text: RwSignal::new(String::new()),
            actual_text: RwSignal::new(String::new()),
            notes: RwSignal::new(String::new()),
            summary: RwSignal::new(None),
            loading: RwSignal::new(false),
            saving: RwSignal::new(false),
            error: RwSignal::new(None),
        }
    }

    pub fn load_summary(&self) {
        let this = *self;
        let date = this.date.get_untracked();
        this.loading.set(true);
        this.error.set(None);
        spawn_local(async move {
            match api::fetch_daily_summary(&date).await {
                Ok(summary) => this.summary.set(Some(summary)),
                Err(e) => {
                    log::error!("daily summary {}: {}", date, e);
                    this.summary.set(None);
                    this.error.set(Some(format!("No se pudo cargar el resumen del día: {}", e)));
                }
            }
            this.loading.set(false);
        });
    }

    pub fn already_closed(&self) -> bool {
        self.summary.with(|s| s.as_ref().is_some_and(|s| s.already_closed))
    }

    /// (efectivo esperado, diferencia) según los montos cargados hasta ahora
    pub fn preview(&self) -> Option<(f64, f64)> {
        let summary = self.summary.get()?;
        let request = CreateClosingRequest {
            date: summary.date.clone(),
            opening_amount: parse_amount(&self.opening_text.get()).unwrap_or(0.0),
            expenses: parse_amount(&self.expenses_text.get()).unwrap_or(0.0),
            actual_cash: parse_amount(&self.actual_text.get()).unwrap_or(0.0),
            notes: None,
        };
        Some((
            request.preview_expected_cash(&summary),
            request.preview_difference(&summary),
        ))
    }

    fn reset_amounts(&self) {
        self.opening_text.set(String::new());
        self.expenses_text.set(String::new());
        self.actual_text.set(String::new());
        self.notes.set(String::new());
    }

    pub fn save_command(&self, notifications: NotificationService, on_saved: Callback<CashRegisterClosing>) {
        let request = match build_request(
            &self.date.get_untracked(),
            &self.opening_text.get_untracked(),
            &self.expenses_text.get_untracked(),
            &self.actual_text.get_untracked(),
            &self.notes.get_untracked(),
        ) {
            Ok(r) => r,
            Err(msg) => {
                self.error.set(Some(msg));
                return;
            }
        };

        let this = *self;
        this.saving.set(true);
        this.error.set(None);
        spawn_local(async move {
            match api::create_closing(&request).await {
                Ok(closing) => {
                    log::info!("cash closing {} saved for {}", closing.id, closing.date);
                    notifications.success(format!("Caja del {} cerrada", closing.date));
                    this.reset_amounts();
                    this.load_summary();
                    on_saved.run(closing);
                }
                Err(e) => {
                    log::error!("create closing: {}", e);
                    notifications.error(format!("No se pudo cerrar la caja: {}", e));
                }
            }
            this.saving.set(false);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_request_parses_amounts() {
        let req = build_request("2024-06-01", "5.000", "", "32.500,50", "  ").unwrap();
        assert_eq!(req.opening_amount, 5000.0);
        assert_eq!(req.expenses, 0.0);
        assert_eq!(req.actual_cash, 32500.5);
        assert_eq!(req.notes, None);
    }

    #[test]
    fn test_build_request_errors() {
        assert_eq!(
            build_request("2024-06-01", "0", "0", "", "").unwrap_err(),
            "Ingrese el efectivo contado"
        );
        assert_eq!(
            build_request("2024-06-01", "abc", "0", "10", "").unwrap_err(),
            "Monto inicial inválido"
        );
        assert!(build_request("", "0", "0", "10", "").is_err());
    }
}
