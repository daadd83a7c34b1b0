use contracts::domain::a001_product::ProductDto;
use contracts::domain::a002_provider::Provider;
use contracts::domain::common::EntityId;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::domain::a001_product::api;
use crate::domain::a002_provider::api as provider_api;
use crate::shared::components::table::{format_money, format_percent, parse_amount};

/// ViewModel for Product details form
#[derive(Clone, Copy)]
pub struct ProductDetailsViewModel {
    pub form: RwSignal<ProductDto>,
    pub error: RwSignal<Option<String>>,
    pub loading: RwSignal<bool>,
    pub providers: RwSignal<Vec<Provider>>,
    /// Цены вводятся как текст ("1.234,50"), в DTO попадают при сохранении
    pub cost_text: RwSignal<String>,
    pub sale_text: RwSignal<String>,
}

impl ProductDetailsViewModel {
    pub fn new(initial: ProductDto) -> Self {
        let cost_text = price_text(initial.cost_price);
        let sale_text = price_text(initial.sale_price);
        Self {
            form: RwSignal::new(initial),
            error: RwSignal::new(None),
            loading: RwSignal::new(false),
            providers: RwSignal::new(Vec::new()),
            cost_text: RwSignal::new(cost_text),
            sale_text: RwSignal::new(sale_text),
        }
    }

    pub fn is_edit_mode(&self) -> bool {
        self.form.with(|f| f.is_edit())
    }

    /// Свежая версия товара с сервера (в списке может быть устаревшая)
    pub fn load_if_needed(&self, id: Option<EntityId>) {
        let this = *self;
        spawn_local(async move {
            match provider_api::fetch_providers().await {
                Ok(list) => this.providers.set(list.into_iter().filter(|p| p.active).collect()),
                Err(e) => log::warn!("providers for product form: {}", e),
            }
        });

        let Some(id) = id else {
            return;
        };
        let this = *self;
        this.loading.set(true);
        spawn_local(async move {
            match api::fetch_product(id).await {
                Ok(product) => {
                    this.cost_text.set(price_text(product.cost_price));
                    this.sale_text.set(price_text(product.sale_price));
                    this.form.set(product.to_dto());
                }
                Err(e) => this.error.set(Some(format!("Error al cargar: {}", e))),
            }
            this.loading.set(false);
        });
    }

    /// Собирает DTO из формы и проверяет его
    pub fn build(&self) -> Result<ProductDto, String> {
        let mut dto = self.form.get_untracked();
        dto.cost_price = parse_amount(&self.cost_text.get_untracked())
            .ok_or_else(|| "Precio de costo inválido".to_string())?;
        dto.sale_price = parse_amount(&self.sale_text.get_untracked())
            .ok_or_else(|| "Precio de venta inválido".to_string())?;
        dto.sku = dto.sku.trim().to_string();
        dto.name = dto.name.trim().to_string();
        dto.barcode = non_empty(dto.barcode);
        dto.category = non_empty(dto.category);
        dto.description = non_empty(dto.description);
        dto.validate()?;
        Ok(dto)
    }

    pub fn submit_command(&self, on_submit: Callback<ProductDto>) {
        match self.build() {
            Ok(dto) => {
                self.error.set(None);
                on_submit.run(dto);
            }
            Err(msg) => self.error.set(Some(msg)),
        }
    }
}

/// Маржа по введённым ценам: "$ 500,00 (50,0 %)"; прочерк, пока цены не читаются
pub fn margin_label(cost_text: &str, sale_text: &str) -> String {
    let (Some(cost_price), Some(sale_price)) = (parse_amount(cost_text), parse_amount(sale_text)) else {
        return "—".to_string();
    };
    let prices = ProductDto {
        cost_price,
        sale_price,
        ..Default::default()
    };
    match prices.margin_percent() {
        Some(percent) => format!("{} ({})", format_money(prices.margin()), format_percent(percent)),
        None => format_money(prices.margin()),
    }
}

fn price_text(value: f64) -> String {
    if value == 0.0 {
        String::new()
    } else {
        format!("{:.2}", value).replace('.', ",")
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_text() {
        assert_eq!(price_text(0.0), "");
        assert_eq!(price_text(1234.5), "1234,50");
        assert_eq!(parse_amount(&price_text(1234.5)), Some(1234.5));
    }

    #[test]
    fn test_margin_label() {
        assert_eq!(margin_label("1.000", "1.500"), "$ 500,00 (50,0 %)");
        assert_eq!(margin_label("0", "250,5"), "$ 250,50");
        assert_eq!(margin_label("900", "800"), "-$ 100,00 (-11,1 %)");
        assert_eq!(margin_label("", "1500"), "—");
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(Some("  ".into())), None);
        assert_eq!(non_empty(Some(" Almacén ".into())), Some("Almacén".into()));
        assert_eq!(non_empty(None), None);
    }
}
