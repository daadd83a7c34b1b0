//! Корзина продажи.
//!
//! Чистая логика без сигналов: экран продажи держит `Cart` в `RwSignal`
//! и вызывает методы через `update`. Количество строки никогда не
//! превышает остаток товара на момент добавления.

use contracts::domain::a001_product::Product;
use contracts::domain::a003_sale::{CreateSaleRequest, PaymentMethod, SaleItemRequest};
use contracts::domain::common::EntityId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CartError {
    #[error("\"{0}\" no tiene stock")]
    OutOfStock(String),

    #[error("Solo hay {stock} unidades de \"{name}\"")]
    StockLimit { name: String, stock: i32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub product_id: EntityId,
    pub name: String,
    pub sku: String,
    pub unit_price: f64,
    pub quantity: i32,
    /// Остаток на момент добавления
    pub stock: i32,
}

impl CartLine {
    pub fn subtotal(&self) -> f64 {
        self.unit_price * self.quantity as f64
    }

    fn limit_error(&self) -> CartError {
        CartError::StockLimit {
            name: self.name.clone(),
            stock: self.stock,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Добавляет одну единицу товара; повторный товар увеличивает строку
    pub fn add(&mut self, product: &Product) -> Result<(), CartError> {
        if product.stock <= 0 {
            return Err(CartError::OutOfStock(product.name.clone()));
        }

        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product.id) {
            // Остаток мог измениться с момента первого добавления
            line.stock = product.stock;
            line.unit_price = product.sale_price;
            if line.quantity >= line.stock {
                line.quantity = line.stock;
                return Err(line.limit_error());
            }
            line.quantity += 1;
            return Ok(());
        }

        self.lines.push(CartLine {
            product_id: product.id,
            name: product.name.clone(),
            sku: product.sku.clone(),
            unit_price: product.sale_price,
            quantity: 1,
            stock: product.stock,
        });
        Ok(())
    }

    /// Устанавливает количество строки.
    /// 0 и меньше удаляет строку, больше остатка ограничивается остатком
    /// (с ошибкой `StockLimit`, строка при этом уже обновлена).
    pub fn set_quantity(&mut self, product_id: EntityId, quantity: i32) -> Result<(), CartError> {
        if quantity <= 0 {
            self.remove(product_id);
            return Ok(());
        }

        let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product_id) else {
            return Ok(());
        };
        if quantity > line.stock {
            line.quantity = line.stock;
            return Err(line.limit_error());
        }
        line.quantity = quantity;
        Ok(())
    }

    pub fn increment(&mut self, product_id: EntityId) -> Result<(), CartError> {
        let current = self.quantity_of(product_id);
        self.set_quantity(product_id, current + 1)
    }

    pub fn decrement(&mut self, product_id: EntityId) {
        let current = self.quantity_of(product_id);
        // set_quantity с меньшим значением не может упереться в остаток
        let _ = self.set_quantity(product_id, current - 1);
    }

    pub fn remove(&mut self, product_id: EntityId) {
        self.lines.retain(|l| l.product_id != product_id);
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn quantity_of(&self, product_id: EntityId) -> i32 {
        self.lines
            .iter()
            .find(|l| l.product_id == product_id)
            .map(|l| l.quantity)
            .unwrap_or(0)
    }

    /// Предварительный итог; сумму продажи считает бэкенд
    pub fn total(&self) -> f64 {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    pub fn units(&self) -> i32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    pub fn to_request(&self, payment_method: PaymentMethod) -> CreateSaleRequest {
        CreateSaleRequest {
            items: self
                .lines
                .iter()
                .map(|l| SaleItemRequest {
                    product_id: l.product_id,
                    quantity: l.quantity,
                })
                .collect(),
            payment_method,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: EntityId, name: &str, price: f64, stock: i32) -> Product {
        Product {
            id,
            sku: format!("P{id}"),
            barcode: None,
            name: name.to_string(),
            description: None,
            category: None,
            cost_price: price / 2.0,
            sale_price: price,
            stock,
            min_stock: 0,
            provider_id: None,
            active: true,
        }
    }

    #[test]
    fn test_add_merges_same_product() {
        let mut cart = Cart::new();
        let yerba = product(1, "Yerba", 2500.0, 10);
        cart.add(&yerba).unwrap();
        cart.add(&yerba).unwrap();
        cart.add(&product(2, "Galletitas", 800.0, 4)).unwrap();

        assert_eq!(cart.lines().len(), 2);
        assert_eq!(cart.quantity_of(1), 2);
        assert_eq!(cart.units(), 3);
        assert_eq!(cart.total(), 5800.0);
    }

    #[test]
    fn test_out_of_stock_is_refused() {
        let mut cart = Cart::new();
        let err = cart.add(&product(3, "Leche", 1200.0, 0)).unwrap_err();
        assert_eq!(err, CartError::OutOfStock("Leche".into()));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_quantity_capped_at_stock() {
        let mut cart = Cart::new();
        let soda = product(4, "Soda", 1000.0, 2);
        cart.add(&soda).unwrap();
        cart.add(&soda).unwrap();
        assert!(matches!(cart.add(&soda), Err(CartError::StockLimit { stock: 2, .. })));
        assert_eq!(cart.quantity_of(4), 2);

        assert!(cart.set_quantity(4, 7).is_err());
        assert_eq!(cart.quantity_of(4), 2);

        assert!(cart.increment(4).is_err());
        assert_eq!(cart.quantity_of(4), 2);
    }

    #[test]
    fn test_zero_quantity_removes_line() {
        let mut cart = Cart::new();
        cart.add(&product(5, "Pan", 1500.0, 5)).unwrap();
        cart.decrement(5);
        assert!(cart.is_empty());

        cart.add(&product(5, "Pan", 1500.0, 5)).unwrap();
        cart.set_quantity(5, 0).unwrap();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_to_request_and_clear() {
        let mut cart = Cart::new();
        cart.add(&product(6, "Arroz", 1100.0, 9)).unwrap();
        cart.set_quantity(6, 3).unwrap();

        let request = cart.to_request(PaymentMethod::Debito);
        assert_eq!(request.items, vec![SaleItemRequest { product_id: 6, quantity: 3 }]);
        assert_eq!(request.payment_method, PaymentMethod::Debito);
        assert!(request.validate().is_ok());

        cart.clear();
        assert_eq!(cart.total(), 0.0);
    }

    #[test]
    fn test_error_messages() {
        let err = CartError::StockLimit { name: "Soda".into(), stock: 2 };
        assert_eq!(err.to_string(), "Solo hay 2 unidades de \"Soda\"");
    }
}
