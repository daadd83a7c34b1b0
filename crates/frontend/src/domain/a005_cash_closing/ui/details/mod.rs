//! Дневное закрытие кассы
//!
//! MVVM:
//! - view_model.rs: суммы формы, сводка дня, предварительный расчёт, сохранение
//! - view.rs: Leptos component (pure UI)

mod view;
mod view_model;

pub use view::ClosingForm;
