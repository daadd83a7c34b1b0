//! Сопоставление ключа вкладки и её содержимого

use crate::dashboards::{FinanceDashboard, OverviewDashboard};
use crate::domain::a001_product::ui::list::ProductList;
use crate::domain::a002_provider::ui::list::ProviderList;
use crate::domain::a003_sale::ui::entry::SaleEntry;
use crate::domain::a003_sale::ui::list::SaleList;
use crate::domain::a004_purchase::ui::list::PurchaseList;
use leptos::prelude::*;

/// Рендерит контент таба по его ключу.
/// Для неизвестных ключей: placeholder.
pub fn render_tab_content(key: &str) -> AnyView {
    match key {
        // Dashboards
        "d400_overview" => view! { <OverviewDashboard /> }.into_any(),
        "d401_finance" => view! { <FinanceDashboard /> }.into_any(),

        // Aggregates
        "a001_product" => view! { <ProductList tab_key="a001_product" /> }.into_any(),
        "a002_provider" => view! { <ProviderList /> }.into_any(),
        "a003_sale_entry" => view! { <SaleEntry tab_key="a003_sale_entry" /> }.into_any(),
        "a003_sale" => view! { <SaleList /> }.into_any(),
        "a004_purchase" => view! { <PurchaseList /> }.into_any(),

        _ => {
            log::warn!("unknown tab key '{}'", key);
            let key = key.to_string();
            view! {
                <div class="placeholder">{format!("Sección desconocida: {}", key)}</div>
            }
            .into_any()
        }
    }
}
