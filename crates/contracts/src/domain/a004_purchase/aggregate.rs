use serde::{Deserialize, Serialize};

use crate::domain::common::{require, AggregateRoot, EntityId};

/// Строка закупки
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseItem {
    #[serde(rename = "producto_id")]
    pub product_id: EntityId,

    #[serde(rename = "nombre_producto", default)]
    pub product_name: String,

    #[serde(rename = "cantidad")]
    pub quantity: i32,

    #[serde(rename = "costo_unitario")]
    pub unit_cost: f64,

    pub subtotal: f64,
}

/// Закупка у поставщика (приход товара)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Purchase {
    pub id: EntityId,

    #[serde(rename = "proveedor_id")]
    pub provider_id: EntityId,

    #[serde(rename = "nombre_proveedor", default)]
    pub provider_name: String,

    #[serde(rename = "numero_factura", default)]
    pub invoice_number: Option<String>,

    /// YYYY-MM-DD
    #[serde(rename = "fecha")]
    pub date: String,

    #[serde(default)]
    pub items: Vec<PurchaseItem>,

    pub total: f64,
}

impl AggregateRoot for Purchase {
    fn id(&self) -> EntityId {
        self.id
    }

    fn collection_name() -> &'static str {
        "compras"
    }

    fn element_name() -> &'static str {
        "Compra"
    }

    fn list_name() -> &'static str {
        "Compras"
    }
}

// ============================================================================
// Requests
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseItemRequest {
    #[serde(rename = "producto_id")]
    pub product_id: EntityId,

    #[serde(rename = "cantidad")]
    pub quantity: i32,

    #[serde(rename = "costo_unitario")]
    pub unit_cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CreatePurchaseRequest {
    #[serde(rename = "proveedor_id")]
    pub provider_id: Option<EntityId>,

    #[serde(rename = "numero_factura")]
    pub invoice_number: String,

    /// YYYY-MM-DD
    #[serde(rename = "fecha")]
    pub date: String,

    pub items: Vec<PurchaseItemRequest>,
}

impl CreatePurchaseRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.provider_id.is_none() {
            return Err("Seleccione un proveedor".into());
        }
        require(&self.date, "La fecha es obligatoria")?;
        if chrono::NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d").is_err() {
            return Err("La fecha no es válida".into());
        }
        if self.items.is_empty() {
            return Err("La compra no tiene productos".into());
        }
        for item in &self.items {
            if item.quantity <= 0 {
                return Err("Las cantidades deben ser mayores a cero".into());
            }
            if !item.unit_cost.is_finite() || item.unit_cost < 0.0 {
                return Err("El costo unitario no puede ser negativo".into());
            }
        }
        Ok(())
    }

    /// Предварительная сумма для формы (итог считает бэкенд)
    pub fn preview_total(&self) -> f64 {
        self.items
            .iter()
            .map(|i| i.quantity as f64 * i.unit_cost)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CreatePurchaseRequest {
        CreatePurchaseRequest {
            provider_id: Some(2),
            invoice_number: "A-0001-00001234".into(),
            date: "2024-06-10".into(),
            items: vec![
                PurchaseItemRequest { product_id: 1, quantity: 10, unit_cost: 120.0 },
                PurchaseItemRequest { product_id: 5, quantity: 3, unit_cost: 55.5 },
            ],
        }
    }

    #[test]
    fn test_valid_purchase() {
        assert!(request().validate().is_ok());
        assert_eq!(request().preview_total(), 1366.5);
    }

    #[test]
    fn test_purchase_requires_provider_and_items() {
        let mut req = request();
        req.provider_id = None;
        assert_eq!(req.validate().unwrap_err(), "Seleccione un proveedor");

        let mut req = request();
        req.items.clear();
        assert_eq!(req.validate().unwrap_err(), "La compra no tiene productos");
    }

    #[test]
    fn test_purchase_item_rules() {
        let mut req = request();
        req.items[0].quantity = 0;
        assert!(req.validate().is_err());

        let mut req = request();
        req.items[1].unit_cost = -1.0;
        assert!(req.validate().is_err());

        let mut req = request();
        req.date = "10/06/2024".into();
        assert_eq!(req.validate().unwrap_err(), "La fecha no es válida");
    }
}
