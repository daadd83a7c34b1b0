use contracts::domain::a001_product::{Product, ProductDto};
use contracts::domain::common::{AggregateRoot, EntityId};
use serde::Serialize;

use crate::shared::api::{self, query_path, ApiError};

fn collection() -> String {
    format!("/{}", Product::collection_name())
}

fn element(id: EntityId) -> String {
    format!("/{}/{}", Product::collection_name(), id)
}

#[derive(Serialize)]
struct SearchQuery<'a> {
    q: &'a str,
}

pub async fn fetch_products() -> Result<Vec<Product>, ApiError> {
    api::get_json(&collection()).await
}

pub async fn fetch_product(id: EntityId) -> Result<Product, ApiError> {
    api::get_json(&element(id)).await
}

/// Поиск по названию/коду (`/producto/buscar?q=`)
pub async fn search_products(query: &str) -> Result<Vec<Product>, ApiError> {
    let path = query_path(&format!("{}/buscar", collection()), &SearchQuery { q: query })?;
    api::get_json(&path).await
}

/// Товар по штрихкоду или коду; 404: товара нет
pub async fn find_by_code(code: &str) -> Result<Option<Product>, ApiError> {
    let path = format!("{}/codigo/{}", collection(), urlencoding::encode(code));
    match api::get_json(&path).await {
        Ok(product) => Ok(Some(product)),
        Err(e) if e.is_not_found() => Ok(None),
        Err(e) => Err(e),
    }
}

pub async fn create_product(dto: &ProductDto) -> Result<Product, ApiError> {
    api::post_json(&collection(), dto).await
}

pub async fn update_product(id: EntityId, dto: &ProductDto) -> Result<Product, ApiError> {
    api::put_json(&element(id), dto).await
}

pub async fn delete_product(id: EntityId) -> Result<(), ApiError> {
    api::delete(&element(id)).await
}
