use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::common::{AggregateRoot, EntityId};
use crate::shared::period::{is_future_period, month_label};

/// Cierre de Mes: агрегат дневных закрытий за месяц
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyClosing {
    pub id: EntityId,

    #[serde(rename = "anio")]
    pub year: i32,

    #[serde(rename = "mes")]
    pub month: u32,

    #[serde(rename = "cantidad_cierres", default)]
    pub closings_count: u32,

    #[serde(rename = "cantidad_ventas", default)]
    pub sales_count: u32,

    #[serde(rename = "total_ventas")]
    pub total_sales: f64,

    #[serde(rename = "total_compras", default)]
    pub total_purchases: f64,

    #[serde(rename = "total_egresos", default)]
    pub total_expenses: f64,

    #[serde(rename = "diferencia_total", default)]
    pub total_difference: f64,

    #[serde(rename = "resultado")]
    pub net_result: f64,

    #[serde(rename = "fecha_cierre", default)]
    pub closed_at: Option<String>,
}

impl MonthlyClosing {
    pub fn period_label(&self) -> String {
        month_label(self.year, self.month)
    }

    pub fn is_period(&self, year: i32, month: u32) -> bool {
        self.year == year && self.month == month
    }
}

impl AggregateRoot for MonthlyClosing {
    fn id(&self) -> EntityId {
        self.id
    }

    fn collection_name() -> &'static str {
        "cierre-mes"
    }

    fn element_name() -> &'static str {
        "Cierre de mes"
    }

    fn list_name() -> &'static str {
        "Cierres de mes"
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateMonthlyClosingRequest {
    #[serde(rename = "anio")]
    pub year: i32,

    #[serde(rename = "mes")]
    pub month: u32,
}

impl CreateMonthlyClosingRequest {
    /// `existing`: уже закрытые месяцы, `today`: текущая дата клиента
    pub fn validate(&self, existing: &[MonthlyClosing], today: NaiveDate) -> Result<(), String> {
        if !(1..=12).contains(&self.month) {
            return Err("El mes no es válido".into());
        }
        if is_future_period(self.year, self.month, today) {
            return Err("No se puede cerrar un mes futuro".into());
        }
        if existing.iter().any(|c| c.is_period(self.year, self.month)) {
            return Err(format!(
                "{} ya está cerrado",
                month_label(self.year, self.month)
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn closing(year: i32, month: u32) -> MonthlyClosing {
        MonthlyClosing {
            id: 1,
            year,
            month,
            closings_count: 30,
            sales_count: 900,
            total_sales: 1_000_000.0,
            total_purchases: 600_000.0,
            total_expenses: 50_000.0,
            total_difference: -200.0,
            net_result: 350_000.0,
            closed_at: None,
        }
    }

    #[test]
    fn test_monthly_request_validation() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 20).unwrap();
        let existing = vec![closing(2024, 4)];

        let ok = CreateMonthlyClosingRequest { year: 2024, month: 5 };
        assert!(ok.validate(&existing, today).is_ok());

        let dup = CreateMonthlyClosingRequest { year: 2024, month: 4 };
        assert_eq!(dup.validate(&existing, today).unwrap_err(), "Abril 2024 ya está cerrado");

        let future = CreateMonthlyClosingRequest { year: 2024, month: 7 };
        assert_eq!(
            future.validate(&existing, today).unwrap_err(),
            "No se puede cerrar un mes futuro"
        );

        let bad = CreateMonthlyClosingRequest { year: 2024, month: 13 };
        assert!(bad.validate(&existing, today).is_err());
    }

    #[test]
    fn test_period_label() {
        assert_eq!(closing(2024, 9).period_label(), "Septiembre 2024");
    }
}
