use contracts::domain::a003_sale::{CreateSaleRequest, Sale};
use contracts::domain::common::AggregateRoot;
use serde::Serialize;

use crate::shared::api::{self, query_path, ApiError};

/// Диапазон дат (YYYY-MM-DD, включительно)
#[derive(Debug, Clone, Serialize)]
pub struct SalesQuery {
    pub desde: String,
    pub hasta: String,
}

fn collection() -> String {
    format!("/{}", Sale::collection_name())
}

pub async fn fetch_sales(query: &SalesQuery) -> Result<Vec<Sale>, ApiError> {
    api::get_json(&query_path(&collection(), query)?).await
}

pub async fn create_sale(request: &CreateSaleRequest) -> Result<Sale, ApiError> {
    api::post_json(&collection(), request).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sales_query_path() {
        let query = SalesQuery {
            desde: "2024-05-01".into(),
            hasta: "2024-05-31".into(),
        };
        assert_eq!(
            query_path("/ventas", &query).unwrap(),
            "/ventas?desde=2024-05-01&hasta=2024-05-31"
        );
    }
}
