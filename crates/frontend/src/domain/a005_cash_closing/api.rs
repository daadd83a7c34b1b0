use contracts::domain::a005_cash_closing::{CashRegisterClosing, CreateClosingRequest, DailySummary};
use contracts::domain::common::AggregateRoot;
use serde::Serialize;

use crate::shared::api::{self, query_path, ApiError};

#[derive(Serialize)]
struct SummaryQuery<'a> {
    fecha: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClosingsQuery {
    pub desde: String,
    pub hasta: String,
}

fn collection() -> String {
    format!("/{}", CashRegisterClosing::collection_name())
}

/// Продажи за день, которые войдут в закрытие
pub async fn fetch_daily_summary(date: &str) -> Result<DailySummary, ApiError> {
    let path = query_path(&format!("{}/resumen", collection()), &SummaryQuery { fecha: date })?;
    api::get_json(&path).await
}

pub async fn fetch_closings(query: &ClosingsQuery) -> Result<Vec<CashRegisterClosing>, ApiError> {
    api::get_json(&query_path(&collection(), query)?).await
}

/// Бэкенд пересчитывает суммы и возвращает сохранённое закрытие
pub async fn create_closing(request: &CreateClosingRequest) -> Result<CashRegisterClosing, ApiError> {
    api::post_json(&collection(), request).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_path() {
        let path = query_path("/cierre-caja/resumen", &SummaryQuery { fecha: "2024-06-01" }).unwrap();
        assert_eq!(path, "/cierre-caja/resumen?fecha=2024-06-01");
    }
}
