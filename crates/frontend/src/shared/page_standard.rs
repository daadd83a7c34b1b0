//! Page category constants for tab pages.
//!
//! Every page rendered inside a tab declares:
//!   - HTML `id` in the format `{entity}--{category}` (e.g. `"a001_product--list"`)
//!   - `data-page-category` with one of the constants below
//!
//! The `--` separator keeps the entity name searchable: copy the id from
//! the DOM Inspector and it leads to the `domain/a001_product/` directory.

/// List of records: table with filters/pagination.
pub const PAGE_CAT_LIST: &str = "list";

/// Form page (sale entry, new purchase, daily closing).
pub const PAGE_CAT_FORM: &str = "form";

/// Analytical dashboard.
pub const PAGE_CAT_DASHBOARD: &str = "dashboard";

/// All known category values.
pub const ALL_CATEGORIES: &[&str] = &[PAGE_CAT_LIST, PAGE_CAT_FORM, PAGE_CAT_DASHBOARD];

/// Validate that a page id matches the `{entity}--{category}` format.
pub fn is_valid_page_id(id: &str) -> bool {
    matches!(id.split_once("--"), Some((entity, cat)) if !entity.is_empty() && !cat.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_ids() {
        assert!(is_valid_page_id("a001_product--list"));
        assert!(!is_valid_page_id("a001_product"));
        assert!(!is_valid_page_id("--list"));
        assert!(ALL_CATEGORIES.contains(&PAGE_CAT_FORM));
    }
}
