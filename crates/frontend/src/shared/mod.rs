pub mod api;
pub mod barcode;
pub mod components;
pub mod config;
pub mod date_utils;
pub mod debounce;
pub mod icons;
pub mod list_utils;
pub mod modal;
pub mod notifications;
pub mod page_frame;
pub mod page_standard;
