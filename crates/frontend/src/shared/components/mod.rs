pub mod date_range_picker;
pub mod month_selector;
pub mod pagination_controls;
pub mod stat_card;
pub mod table;
