use serde::{Deserialize, Serialize};

use crate::domain::common::{AggregateRoot, EntityId};

/// Допуск, в пределах которого касса считается сошедшейся
pub const BALANCE_TOLERANCE: f64 = 0.01;

/// Результат сверки кассы
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClosingBalance {
    Balanced,
    Surplus,
    Shortage,
}

impl ClosingBalance {
    /// difference = efectivo real − efectivo esperado
    pub fn classify(difference: f64) -> Self {
        if difference.abs() <= BALANCE_TOLERANCE {
            ClosingBalance::Balanced
        } else if difference > 0.0 {
            ClosingBalance::Surplus
        } else {
            ClosingBalance::Shortage
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ClosingBalance::Balanced => "Caja cuadrada",
            ClosingBalance::Surplus => "Sobrante",
            ClosingBalance::Shortage => "Faltante",
        }
    }
}

/// Cierre de Caja: дневное закрытие кассы
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashRegisterClosing {
    pub id: EntityId,

    /// YYYY-MM-DD
    #[serde(rename = "fecha")]
    pub date: String,

    #[serde(rename = "monto_inicial")]
    pub opening_amount: f64,

    #[serde(rename = "ventas_efectivo")]
    pub cash_sales: f64,

    #[serde(rename = "ventas_tarjeta", default)]
    pub card_sales: f64,

    #[serde(rename = "ventas_transferencia", default)]
    pub transfer_sales: f64,

    #[serde(rename = "total_ventas")]
    pub total_sales: f64,

    #[serde(rename = "cantidad_ventas", default)]
    pub sales_count: u32,

    #[serde(rename = "egresos", default)]
    pub expenses: f64,

    #[serde(rename = "efectivo_esperado")]
    pub expected_cash: f64,

    #[serde(rename = "efectivo_real")]
    pub actual_cash: f64,

    #[serde(rename = "diferencia")]
    pub difference: f64,

    #[serde(rename = "observaciones", default)]
    pub notes: Option<String>,

    #[serde(rename = "usuario", default)]
    pub closed_by: Option<String>,
}

impl CashRegisterClosing {
    pub fn balance(&self) -> ClosingBalance {
        ClosingBalance::classify(self.difference)
    }
}

impl AggregateRoot for CashRegisterClosing {
    fn id(&self) -> EntityId {
        self.id
    }

    fn collection_name() -> &'static str {
        "cierre-caja"
    }

    fn element_name() -> &'static str {
        "Cierre de caja"
    }

    fn list_name() -> &'static str {
        "Cierres de caja"
    }
}

/// Сводка продаж за день (`GET /cierre-caja/resumen?fecha=`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DailySummary {
    #[serde(rename = "fecha")]
    pub date: String,

    #[serde(rename = "cantidad_ventas")]
    pub sales_count: u32,

    #[serde(rename = "ventas_efectivo")]
    pub cash_sales: f64,

    #[serde(rename = "ventas_tarjeta", default)]
    pub card_sales: f64,

    #[serde(rename = "ventas_transferencia", default)]
    pub transfer_sales: f64,

    #[serde(rename = "total_ventas")]
    pub total_sales: f64,

    /// Уже есть закрытие за этот день
    #[serde(rename = "cerrado", default)]
    pub already_closed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CreateClosingRequest {
    /// YYYY-MM-DD
    #[serde(rename = "fecha")]
    pub date: String,

    #[serde(rename = "monto_inicial")]
    pub opening_amount: f64,

    #[serde(rename = "egresos")]
    pub expenses: f64,

    #[serde(rename = "efectivo_real")]
    pub actual_cash: f64,

    #[serde(rename = "observaciones", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl CreateClosingRequest {
    pub fn validate(&self) -> Result<(), String> {
        if chrono::NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d").is_err() {
            return Err("La fecha no es válida".into());
        }
        let amounts = [
            (self.opening_amount, "El monto inicial no puede ser negativo"),
            (self.expenses, "Los egresos no pueden ser negativos"),
            (self.actual_cash, "El efectivo contado no puede ser negativo"),
        ];
        for (value, message) in amounts {
            if !value.is_finite() || value < 0.0 {
                return Err(message.to_string());
            }
        }
        Ok(())
    }

    /// Предпросмотр ожидаемой наличности: monto inicial + ventas en efectivo − egresos.
    /// Сохраняются значения, посчитанные бэкендом.
    pub fn preview_expected_cash(&self, summary: &DailySummary) -> f64 {
        self.opening_amount + summary.cash_sales - self.expenses
    }

    pub fn preview_difference(&self, summary: &DailySummary) -> f64 {
        self.actual_cash - self.preview_expected_cash(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_balance() {
        assert_eq!(ClosingBalance::classify(0.0), ClosingBalance::Balanced);
        assert_eq!(ClosingBalance::classify(0.009), ClosingBalance::Balanced);
        assert_eq!(ClosingBalance::classify(-0.01), ClosingBalance::Balanced);
        assert_eq!(ClosingBalance::classify(150.0), ClosingBalance::Surplus);
        assert_eq!(ClosingBalance::classify(-0.5), ClosingBalance::Shortage);
    }

    #[test]
    fn test_preview_expected_cash() {
        let summary = DailySummary {
            date: "2024-06-01".into(),
            sales_count: 14,
            cash_sales: 30_000.0,
            card_sales: 12_000.0,
            transfer_sales: 3_000.0,
            total_sales: 45_000.0,
            already_closed: false,
        };
        let req = CreateClosingRequest {
            date: "2024-06-01".into(),
            opening_amount: 5_000.0,
            expenses: 2_000.0,
            actual_cash: 32_500.0,
            notes: None,
        };
        assert_eq!(req.preview_expected_cash(&summary), 33_000.0);
        assert_eq!(req.preview_difference(&summary), -500.0);
        assert_eq!(
            ClosingBalance::classify(req.preview_difference(&summary)),
            ClosingBalance::Shortage
        );
    }

    #[test]
    fn test_closing_request_validation() {
        let mut req = CreateClosingRequest {
            date: "2024-06-01".into(),
            ..Default::default()
        };
        assert!(req.validate().is_ok());

        req.expenses = -10.0;
        assert_eq!(req.validate().unwrap_err(), "Los egresos no pueden ser negativos");

        req.expenses = 0.0;
        req.date = String::new();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_notes_not_serialized_when_absent() {
        let req = CreateClosingRequest {
            date: "2024-06-01".into(),
            ..Default::default()
        };
        let json = serde_json::to_value(&req).unwrap();
        assert!(json.get("observaciones").is_none());
        assert_eq!(json["fecha"], "2024-06-01");
    }
}
