pub mod registry;
pub mod tab_labels;

pub use tab_labels::tab_label_for_key;
