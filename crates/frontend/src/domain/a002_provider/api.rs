use contracts::domain::a002_provider::{Provider, ProviderDto};
use contracts::domain::common::{AggregateRoot, EntityId};

use crate::shared::api::{self, ApiError};

fn collection() -> String {
    format!("/{}", Provider::collection_name())
}

fn element(id: EntityId) -> String {
    format!("/{}/{}", Provider::collection_name(), id)
}

pub async fn fetch_providers() -> Result<Vec<Provider>, ApiError> {
    api::get_json(&collection()).await
}

pub async fn create_provider(dto: &ProviderDto) -> Result<Provider, ApiError> {
    api::post_json(&collection(), &dto.normalized()).await
}

pub async fn update_provider(id: EntityId, dto: &ProviderDto) -> Result<Provider, ApiError> {
    api::put_json(&element(id), &dto.normalized()).await
}

/// Бэкенд не удаляет поставщика, а помечает неактивным
pub async fn deactivate_provider(id: EntityId) -> Result<(), ApiError> {
    api::delete(&element(id)).await
}
