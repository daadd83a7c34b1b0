use serde::{Deserialize, Serialize};

use crate::domain::common::{require, AggregateRoot, EntityId};

// ============================================================================
// Aggregate Root
// ============================================================================

/// Товар (позиция склада)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: EntityId,

    #[serde(rename = "codigo")]
    pub sku: String,

    #[serde(rename = "codigo_barras", default)]
    pub barcode: Option<String>,

    #[serde(rename = "nombre")]
    pub name: String,

    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,

    #[serde(rename = "categoria", default)]
    pub category: Option<String>,

    #[serde(rename = "precio_costo")]
    pub cost_price: f64,

    #[serde(rename = "precio_venta")]
    pub sale_price: f64,

    pub stock: i32,

    #[serde(rename = "stock_minimo", default)]
    pub min_stock: i32,

    #[serde(rename = "proveedor_id", default)]
    pub provider_id: Option<EntityId>,

    #[serde(rename = "activo", default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

/// Состояние остатка для бейджей и фильтров
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    Ok,
    Low,
    OutOfStock,
}

impl StockStatus {
    pub fn label(&self) -> &'static str {
        match self {
            StockStatus::Ok => "En stock",
            StockStatus::Low => "Stock bajo",
            StockStatus::OutOfStock => "Sin stock",
        }
    }
}

impl Product {
    pub fn stock_status(&self) -> StockStatus {
        if self.stock <= 0 {
            StockStatus::OutOfStock
        } else if self.stock <= self.min_stock {
            StockStatus::Low
        } else {
            StockStatus::Ok
        }
    }

    pub fn to_dto(&self) -> ProductDto {
        ProductDto {
            id: Some(self.id),
            sku: self.sku.clone(),
            barcode: self.barcode.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            category: self.category.clone(),
            cost_price: self.cost_price,
            sale_price: self.sale_price,
            stock: self.stock,
            min_stock: self.min_stock,
            provider_id: self.provider_id,
        }
    }

    /// Применить изменения формы (оптимистичное обновление списка)
    pub fn apply(&mut self, dto: &ProductDto) {
        self.sku = dto.sku.trim().to_string();
        self.barcode = dto.barcode.clone();
        self.name = dto.name.trim().to_string();
        self.description = dto.description.clone();
        self.category = dto.category.clone();
        self.cost_price = dto.cost_price;
        self.sale_price = dto.sale_price;
        self.stock = dto.stock;
        self.min_stock = dto.min_stock;
        self.provider_id = dto.provider_id;
    }
}

impl AggregateRoot for Product {
    fn id(&self) -> EntityId {
        self.id
    }

    fn collection_name() -> &'static str {
        "producto"
    }

    fn element_name() -> &'static str {
        "Producto"
    }

    fn list_name() -> &'static str {
        "Stock"
    }
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// DTO для создания/обновления товара
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ProductDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,

    #[serde(rename = "codigo")]
    pub sku: String,

    #[serde(rename = "codigo_barras")]
    pub barcode: Option<String>,

    #[serde(rename = "nombre")]
    pub name: String,

    #[serde(rename = "descripcion")]
    pub description: Option<String>,

    #[serde(rename = "categoria")]
    pub category: Option<String>,

    #[serde(rename = "precio_costo")]
    pub cost_price: f64,

    #[serde(rename = "precio_venta")]
    pub sale_price: f64,

    pub stock: i32,

    #[serde(rename = "stock_minimo")]
    pub min_stock: i32,

    #[serde(rename = "proveedor_id")]
    pub provider_id: Option<EntityId>,
}

impl ProductDto {
    pub fn is_edit(&self) -> bool {
        self.id.is_some()
    }

    /// Маржа на единицу товара
    pub fn margin(&self) -> f64 {
        self.sale_price - self.cost_price
    }

    /// Наценка в % к себестоимости (None при нулевой себестоимости)
    pub fn margin_percent(&self) -> Option<f64> {
        if self.cost_price > 0.0 {
            Some(self.margin() / self.cost_price * 100.0)
        } else {
            None
        }
    }

    /// Валидация формы; первая найденная ошибка возвращается как текст для UI
    pub fn validate(&self) -> Result<(), String> {
        require(&self.name, "El nombre es obligatorio")?;
        require(&self.sku, "El código es obligatorio")?;

        if let Some(barcode) = self.barcode.as_deref().map(str::trim) {
            if !barcode.is_empty() {
                let len = barcode.len();
                if !barcode.chars().all(|c| c.is_ascii_digit()) || !(8..=14).contains(&len) {
                    return Err("El código de barras debe tener entre 8 y 14 dígitos".into());
                }
            }
        }

        if !self.cost_price.is_finite() || self.cost_price < 0.0 {
            return Err("El precio de costo no puede ser negativo".into());
        }
        if !self.sale_price.is_finite() || self.sale_price <= self.cost_price {
            return Err("El precio de venta debe ser mayor al precio de costo".into());
        }
        if self.stock < 0 {
            return Err("El stock no puede ser negativo".into());
        }
        if self.min_stock < 0 {
            return Err("El stock mínimo no puede ser negativo".into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_dto() -> ProductDto {
        ProductDto {
            id: None,
            sku: "GAL-001".into(),
            barcode: Some("7790040123456".into()),
            name: "Galletitas de agua".into(),
            description: None,
            category: Some("Almacén".into()),
            cost_price: 500.0,
            sale_price: 750.0,
            stock: 12,
            min_stock: 3,
            provider_id: Some(4),
        }
    }

    fn product(stock: i32, min_stock: i32) -> Product {
        Product {
            id: 1,
            sku: "A".into(),
            barcode: None,
            name: "Yerba".into(),
            description: None,
            category: None,
            cost_price: 100.0,
            sale_price: 150.0,
            stock,
            min_stock,
            provider_id: None,
            active: true,
        }
    }

    #[test]
    fn test_valid_product_passes() {
        assert_eq!(valid_dto().validate(), Ok(()));
    }

    #[test]
    fn test_required_fields() {
        let mut dto = valid_dto();
        dto.name = "   ".into();
        assert_eq!(dto.validate().unwrap_err(), "El nombre es obligatorio");

        let mut dto = valid_dto();
        dto.sku = String::new();
        assert_eq!(dto.validate().unwrap_err(), "El código es obligatorio");
    }

    #[test]
    fn test_sale_price_must_exceed_cost() {
        let mut dto = valid_dto();
        dto.sale_price = dto.cost_price;
        assert!(dto.validate().is_err());

        dto.sale_price = dto.cost_price - 1.0;
        assert!(dto.validate().is_err());

        dto.sale_price = dto.cost_price + 0.01;
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_negative_stock_rejected() {
        let mut dto = valid_dto();
        dto.stock = -1;
        assert_eq!(dto.validate().unwrap_err(), "El stock no puede ser negativo");

        let mut dto = valid_dto();
        dto.min_stock = -5;
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_barcode_format() {
        let mut dto = valid_dto();
        dto.barcode = Some("12AB5678".into());
        assert!(dto.validate().is_err());

        dto.barcode = Some("1234567".into());
        assert!(dto.validate().is_err());

        dto.barcode = Some(String::new());
        assert!(dto.validate().is_ok());

        dto.barcode = None;
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_stock_status() {
        assert_eq!(product(0, 5).stock_status(), StockStatus::OutOfStock);
        assert_eq!(product(5, 5).stock_status(), StockStatus::Low);
        assert_eq!(product(6, 5).stock_status(), StockStatus::Ok);
        assert_eq!(product(1, 0).stock_status(), StockStatus::Ok);
    }

    #[test]
    fn test_margin_percent() {
        let mut dto = product(1, 0).to_dto();
        assert_eq!(dto.margin_percent(), Some(50.0));
        dto.cost_price = 0.0;
        assert_eq!(dto.margin_percent(), None);
    }

    #[test]
    fn test_deserialize_backend_json() {
        let json = r#"{
            "id": 7,
            "codigo": "YER-1",
            "nombre": "Yerba 1kg",
            "precio_costo": 1800.5,
            "precio_venta": 2500,
            "stock": 4
        }"#;
        let p: Product = serde_json::from_str(json).unwrap();
        assert_eq!(p.sku, "YER-1");
        assert_eq!(p.min_stock, 0);
        assert!(p.active);
        assert_eq!(p.barcode, None);
    }
}
