//! Форма поставщика (MVVM, как у товара): view_model проверяет,
//! сохранение делает список.

mod view;
mod view_model;

pub use view::ProviderDetails;
