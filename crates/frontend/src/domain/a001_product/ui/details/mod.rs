//! Product Details UI Module
//!
//! MVVM:
//! - view_model.rs: форма, валидация, загрузка свежих данных
//! - view.rs: Leptos component (pure UI)
//!
//! Сохранение выполняет список (оптимистичное обновление), форма только
//! отдаёт проверенный DTO через `on_submit`.

mod view;
mod view_model;

pub use view::ProductDetails;
