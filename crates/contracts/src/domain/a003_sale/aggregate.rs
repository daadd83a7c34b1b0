use serde::{Deserialize, Serialize};

use crate::domain::common::{AggregateRoot, EntityId};

/// Способ оплаты
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    Efectivo,
    Debito,
    Credito,
    Transferencia,
    MercadoPago,
}

impl PaymentMethod {
    pub fn all() -> [PaymentMethod; 5] {
        [
            PaymentMethod::Efectivo,
            PaymentMethod::Debito,
            PaymentMethod::Credito,
            PaymentMethod::Transferencia,
            PaymentMethod::MercadoPago,
        ]
    }

    /// Значение в JSON и в query string
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Efectivo => "efectivo",
            PaymentMethod::Debito => "debito",
            PaymentMethod::Credito => "credito",
            PaymentMethod::Transferencia => "transferencia",
            PaymentMethod::MercadoPago => "mercado_pago",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Efectivo => "Efectivo",
            PaymentMethod::Debito => "Débito",
            PaymentMethod::Credito => "Crédito",
            PaymentMethod::Transferencia => "Transferencia",
            PaymentMethod::MercadoPago => "Mercado Pago",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::all().into_iter().find(|m| m.as_str() == value)
    }

    pub fn is_cash(&self) -> bool {
        matches!(self, PaymentMethod::Efectivo)
    }
}

/// Строка продажи (цены проставляет бэкенд)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleItem {
    #[serde(rename = "producto_id")]
    pub product_id: EntityId,

    #[serde(rename = "nombre_producto", default)]
    pub product_name: String,

    #[serde(rename = "cantidad")]
    pub quantity: i32,

    #[serde(rename = "precio_unitario")]
    pub unit_price: f64,

    pub subtotal: f64,
}

/// Продажа
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    pub id: EntityId,

    /// RFC 3339 / ISO datetime от бэкенда
    #[serde(rename = "fecha")]
    pub created_at: String,

    #[serde(default)]
    pub items: Vec<SaleItem>,

    pub total: f64,

    #[serde(rename = "metodo_pago")]
    pub payment_method: PaymentMethod,

    #[serde(rename = "usuario", default)]
    pub cashier: Option<String>,
}

impl Sale {
    /// Дата продажи в формате YYYY-MM-DD
    pub fn date(&self) -> &str {
        self.created_at
            .split('T')
            .next()
            .unwrap_or(&self.created_at)
    }

    pub fn units(&self) -> i32 {
        self.items.iter().map(|i| i.quantity).sum()
    }
}

impl AggregateRoot for Sale {
    fn id(&self) -> EntityId {
        self.id
    }

    fn collection_name() -> &'static str {
        "ventas"
    }

    fn element_name() -> &'static str {
        "Venta"
    }

    fn list_name() -> &'static str {
        "Ventas"
    }
}

// ============================================================================
// Requests
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleItemRequest {
    #[serde(rename = "producto_id")]
    pub product_id: EntityId,

    #[serde(rename = "cantidad")]
    pub quantity: i32,
}

/// Запрос на регистрацию продажи: только id товаров и количества,
/// цену и списание остатков выполняет бэкенд
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateSaleRequest {
    pub items: Vec<SaleItemRequest>,

    #[serde(rename = "metodo_pago")]
    pub payment_method: PaymentMethod,
}

impl CreateSaleRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.items.is_empty() {
            return Err("La venta no tiene productos".into());
        }
        if self.items.iter().any(|i| i.quantity <= 0) {
            return Err("Las cantidades deben ser mayores a cero".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_method_roundtrip_names() {
        for m in PaymentMethod::all() {
            assert_eq!(PaymentMethod::parse(m.as_str()), Some(m));
            let json = serde_json::to_string(&m).unwrap();
            assert_eq!(json, format!("\"{}\"", m.as_str()));
        }
        assert_eq!(PaymentMethod::parse("cheque"), None);
    }

    #[test]
    fn test_sale_date_and_units() {
        let json = r#"{
            "id": 10,
            "fecha": "2024-05-02T18:30:00Z",
            "items": [
                {"producto_id": 1, "nombre_producto": "Yerba", "cantidad": 2, "precio_unitario": 2500, "subtotal": 5000},
                {"producto_id": 2, "cantidad": 1, "precio_unitario": 900, "subtotal": 900}
            ],
            "total": 5900,
            "metodo_pago": "mercado_pago"
        }"#;
        let sale: Sale = serde_json::from_str(json).unwrap();
        assert_eq!(sale.date(), "2024-05-02");
        assert_eq!(sale.units(), 3);
        assert_eq!(sale.payment_method, PaymentMethod::MercadoPago);
        assert_eq!(sale.items[1].product_name, "");
    }

    #[test]
    fn test_create_sale_validation() {
        let mut req = CreateSaleRequest {
            items: vec![],
            payment_method: PaymentMethod::Efectivo,
        };
        assert!(req.validate().is_err());

        req.items.push(SaleItemRequest { product_id: 1, quantity: 0 });
        assert!(req.validate().is_err());

        req.items[0].quantity = 3;
        assert!(req.validate().is_ok());
    }
}
