use contracts::domain::a004_purchase::{CreatePurchaseRequest, Purchase};
use contracts::domain::common::{AggregateRoot, EntityId};
use serde::Serialize;

use crate::shared::api::{self, query_path, ApiError};

#[derive(Debug, Clone, Serialize)]
pub struct PurchasesQuery {
    pub desde: String,
    pub hasta: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proveedor_id: Option<EntityId>,
}

fn collection() -> String {
    format!("/{}", Purchase::collection_name())
}

pub async fn fetch_purchases(query: &PurchasesQuery) -> Result<Vec<Purchase>, ApiError> {
    api::get_json(&query_path(&collection(), query)?).await
}

/// Остатки товаров увеличивает бэкенд
pub async fn create_purchase(request: &CreatePurchaseRequest) -> Result<Purchase, ApiError> {
    api::post_json(&collection(), request).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_skips_empty_provider() {
        let mut query = PurchasesQuery {
            desde: "2024-06-01".into(),
            hasta: "2024-06-30".into(),
            proveedor_id: None,
        };
        assert_eq!(
            query_path("/compras", &query).unwrap(),
            "/compras?desde=2024-06-01&hasta=2024-06-30"
        );

        query.proveedor_id = Some(7);
        assert!(query_path("/compras", &query).unwrap().ends_with("&proveedor_id=7"));
    }
}
