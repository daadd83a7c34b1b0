use contracts::domain::a001_product::Product;
use contracts::domain::a002_provider::Provider;
use contracts::domain::a004_purchase::{CreatePurchaseRequest, PurchaseItemRequest};
use contracts::domain::common::EntityId;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::domain::a002_provider::api as provider_api;
use crate::shared::components::table::parse_amount;
use crate::shared::date_utils::today_iso;

/// Строка черновика: стоимость вводится текстом ("1.234,50")
#[derive(Debug, Clone, PartialEq)]
pub struct DraftLine {
    pub product_id: EntityId,
    pub name: String,
    pub quantity: i32,
    pub cost_text: String,
}

impl DraftLine {
    pub fn unit_cost(&self) -> Option<f64> {
        parse_amount(&self.cost_text)
    }

    pub fn subtotal(&self) -> f64 {
        self.unit_cost().unwrap_or(0.0) * self.quantity as f64
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PurchaseDraft {
    pub provider_id: Option<EntityId>,
    pub invoice_number: String,
    pub date: String,
    pub lines: Vec<DraftLine>,
}

impl PurchaseDraft {
    pub fn new(date: String) -> Self {
        Self {
            date,
            ..Default::default()
        }
    }

    /// Повторный товар увеличивает количество строки
    pub fn add_product(&mut self, product: &Product) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product.id) {
            line.quantity += 1;
            return;
        }
        self.lines.push(DraftLine {
            product_id: product.id,
            name: product.name.clone(),
            quantity: 1,
            cost_text: cost_text(product.cost_price),
        });
    }

    pub fn set_quantity(&mut self, product_id: EntityId, quantity: i32) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product_id) {
            line.quantity = quantity.max(0);
        }
    }

    pub fn set_cost(&mut self, product_id: EntityId, text: String) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product_id) {
            line.cost_text = text;
        }
    }

    pub fn remove(&mut self, product_id: EntityId) {
        self.lines.retain(|l| l.product_id != product_id);
    }

    pub fn preview_total(&self) -> f64 {
        self.lines.iter().map(DraftLine::subtotal).sum()
    }

    /// Запрос для бэкенда; нечитаемая стоимость: ошибка с названием товара
    pub fn to_request(&self) -> Result<CreatePurchaseRequest, String> {
        let items = self
            .lines
            .iter()
            .map(|l| {
                let unit_cost = l
                    .unit_cost()
                    .ok_or_else(|| format!("Costo inválido para \"{}\"", l.name))?;
                Ok(PurchaseItemRequest {
                    product_id: l.product_id,
                    quantity: l.quantity,
                    unit_cost,
                })
            })
            .collect::<Result<Vec<_>, String>>()?;

        let request = CreatePurchaseRequest {
            provider_id: self.provider_id,
            invoice_number: self.invoice_number.trim().to_string(),
            date: self.date.trim().to_string(),
            items,
        };
        request.validate()?;
        Ok(request)
    }
}

fn cost_text(value: f64) -> String {
    format!("{:.2}", value).replace('.', ",")
}

#[derive(Clone, Copy)]
pub struct PurchaseFormViewModel {
    pub draft: RwSignal<PurchaseDraft>,
    pub providers: RwSignal<Vec<Provider>>,
    pub error: RwSignal<Option<String>>,
}

impl PurchaseFormViewModel {
    pub fn new() -> Self {
        Self {
            draft: RwSignal::new(PurchaseDraft::new(today_iso())),
            providers: RwSignal::new(Vec::new()),
            error: RwSignal::new(None),
        }
    }

    pub fn load_providers(&self) {
        let this = *self;
        spawn_local(async move {
            match provider_api::fetch_providers().await {
                Ok(list) => this.providers.set(list.into_iter().filter(|p| p.active).collect()),
                Err(e) => {
                    log::error!("providers for purchase form: {}", e);
                    this.error.set(Some(format!("No se pudieron cargar los proveedores: {}", e)));
                }
            }
        });
    }

    pub fn submit_command(&self, on_submit: Callback<CreatePurchaseRequest>) {
        match self.draft.with_untracked(PurchaseDraft::to_request) {
            Ok(request) => {
                self.error.set(None);
                on_submit.run(request);
            }
            Err(msg) => self.error.set(Some(msg)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: EntityId, name: &str, cost: f64) -> Product {
        Product {
            id,
            sku: format!("P{id}"),
            barcode: None,
            name: name.to_string(),
            description: None,
            category: None,
            cost_price: cost,
            sale_price: cost * 1.5,
            stock: 0,
            min_stock: 0,
            provider_id: None,
            active: true,
        }
    }

    fn draft() -> PurchaseDraft {
        let mut d = PurchaseDraft::new("2024-06-10".into());
        d.provider_id = Some(3);
        d.invoice_number = " A-0001-00000042 ".into();
        d
    }

    #[test]
    fn test_add_merges_and_prefills_cost() {
        let mut d = draft();
        let harina = product(1, "Harina 000", 650.0);
        d.add_product(&harina);
        d.add_product(&harina);
        assert_eq!(d.lines.len(), 1);
        assert_eq!(d.lines[0].quantity, 2);
        assert_eq!(d.lines[0].cost_text, "650,00");
        assert_eq!(d.preview_total(), 1300.0);
    }

    #[test]
    fn test_to_request() {
        let mut d = draft();
        d.add_product(&product(1, "Harina 000", 650.0));
        d.add_product(&product(2, "Aceite", 1800.0));
        d.set_quantity(2, 12);
        d.set_cost(2, "1.750,50".into());

        let request = d.to_request().unwrap();
        assert_eq!(request.invoice_number, "A-0001-00000042");
        assert_eq!(request.items[1].quantity, 12);
        assert_eq!(request.items[1].unit_cost, 1750.5);
        assert_eq!(request.preview_total(), 650.0 + 12.0 * 1750.5);
    }

    #[test]
    fn test_bad_cost_names_product() {
        let mut d = draft();
        d.add_product(&product(2, "Aceite", 1800.0));
        d.set_cost(2, "abc".into());
        assert_eq!(d.to_request().unwrap_err(), "Costo inválido para \"Aceite\"");
    }

    #[test]
    fn test_zero_quantity_fails_validation() {
        let mut d = draft();
        d.add_product(&product(1, "Harina 000", 650.0));
        d.set_quantity(1, 0);
        assert!(d.to_request().is_err());

        d.remove(1);
        assert_eq!(d.to_request().unwrap_err(), "La compra no tiene productos");
    }
}
