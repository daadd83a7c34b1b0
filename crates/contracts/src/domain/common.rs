//! Common traits for all aggregates

/// Идентификатор записи на бэкенде
pub type EntityId = i64;

/// Общие метаданные агрегата: REST-коллекция и подписи для UI.
pub trait AggregateRoot {
    fn id(&self) -> EntityId;

    /// Путь REST-коллекции без ведущего слэша ("producto", "ventas", ...)
    fn collection_name() -> &'static str;

    fn element_name() -> &'static str;

    fn list_name() -> &'static str;
}

/// Обязательное текстовое поле: не пустое после trim.
pub fn require(value: &str, message: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(message.to_string());
    }
    Ok(())
}
