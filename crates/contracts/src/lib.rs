//! DTO и валидация форм Stockeate, общие для фронтенда и бэкенда.
//!
//! Бэкенд остаётся источником истины: здесь только зеркала JSON
//! и клиентские проверки форм.

pub mod domain;
pub mod shared;
pub mod system;
