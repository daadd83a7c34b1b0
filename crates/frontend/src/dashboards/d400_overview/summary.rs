//! Расчёты для главной панели (без сигналов, покрыты тестами)

use contracts::domain::a001_product::{Product, StockStatus};
use contracts::domain::a003_sale::Sale;
use contracts::domain::a005_cash_closing::CashRegisterClosing;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TodaySales {
    pub count: usize,
    pub total: f64,
}

impl TodaySales {
    pub fn from_sales(sales: &[Sale]) -> Self {
        Self {
            count: sales.len(),
            total: sales.iter().map(|s| s.total).sum(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StockCounts {
    /// Мало, но есть
    pub low: usize,
    pub out: usize,
}

impl StockCounts {
    pub fn from_products(products: &[Product]) -> Self {
        products.iter().filter(|p| p.active).fold(Self::default(), |mut acc, p| {
            match p.stock_status() {
                StockStatus::Low => acc.low += 1,
                StockStatus::OutOfStock => acc.out += 1,
                StockStatus::Ok => {}
            }
            acc
        })
    }
}

/// Товары с низким остатком, по возрастанию остатка
pub fn low_stock_top(products: &[Product], limit: usize) -> Vec<Product> {
    let mut low: Vec<Product> = products
        .iter()
        .filter(|p| p.active && p.stock_status() != StockStatus::Ok)
        .cloned()
        .collect();
    low.sort_by(|a, b| a.stock.cmp(&b.stock).then_with(|| a.name.cmp(&b.name)));
    low.truncate(limit);
    low
}

/// Последние продажи, новые сверху
pub fn latest_sales(sales: &[Sale], limit: usize) -> Vec<Sale> {
    let mut sorted = sales.to_vec();
    sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
    sorted.truncate(limit);
    sorted
}

pub fn last_closing(closings: &[CashRegisterClosing]) -> Option<&CashRegisterClosing> {
    closings.iter().max_by(|a, b| a.date.cmp(&b.date).then(a.id.cmp(&b.id)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a003_sale::PaymentMethod;

    fn product(id: i64, name: &str, stock: i32, min_stock: i32) -> Product {
        Product {
            id,
            sku: format!("P{id}"),
            barcode: None,
            name: name.to_string(),
            description: None,
            category: None,
            cost_price: 10.0,
            sale_price: 15.0,
            stock,
            min_stock,
            provider_id: None,
            active: true,
        }
    }

    fn sale(id: i64, at: &str, total: f64) -> Sale {
        Sale {
            id,
            created_at: at.to_string(),
            items: Vec::new(),
            total,
            payment_method: PaymentMethod::Efectivo,
            cashier: None,
        }
    }

    #[test]
    fn test_stock_counts_and_top() {
        let products = vec![
            product(1, "Yerba", 50, 10),
            product(2, "Leche", 3, 10),
            product(3, "Yogur", 0, 5),
            product(4, "Pan", 1, 5),
        ];
        let counts = StockCounts::from_products(&products);
        assert_eq!(counts, StockCounts { low: 2, out: 1 });

        let top: Vec<i64> = low_stock_top(&products, 2).iter().map(|p| p.id).collect();
        assert_eq!(top, vec![3, 4]);
    }

    #[test]
    fn test_latest_sales_and_today() {
        let sales = vec![
            sale(1, "2024-06-10T09:00:00", 100.0),
            sale(2, "2024-06-10T18:00:00", 250.0),
            sale(3, "2024-06-10T12:00:00", 50.0),
        ];
        let ids: Vec<i64> = latest_sales(&sales, 2).iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![2, 3]);
        assert_eq!(TodaySales::from_sales(&sales), TodaySales { count: 3, total: 400.0 });
    }
}
