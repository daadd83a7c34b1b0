//! Tab labels - единственный источник правды для заголовков табов.
//!
//! Для агрегатов берётся `list_name` из contracts, для остального: хардкод.

use contracts::domain::a001_product::Product;
use contracts::domain::a002_provider::Provider;
use contracts::domain::a003_sale::Sale;
use contracts::domain::a004_purchase::Purchase;
use contracts::domain::common::AggregateRoot;

/// Возвращает заголовок таба для данного ключа. Неизвестный ключ: пустая строка.
pub fn tab_label_for_key(key: &str) -> &'static str {
    match key {
        "d400_overview" => "Principal",
        "a001_product" => Product::list_name(),
        "a003_sale_entry" => "Nueva venta",
        "a003_sale" => Sale::list_name(),
        "a002_provider" => Provider::list_name(),
        "a004_purchase" => Purchase::list_name(),
        "d401_finance" => "Finanzas",
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(tab_label_for_key("a001_product"), "Stock");
        assert_eq!(tab_label_for_key("a002_provider"), "Proveedores");
        assert_eq!(tab_label_for_key("d401_finance"), "Finanzas");
        assert_eq!(tab_label_for_key("sys_users"), "");
    }
}
