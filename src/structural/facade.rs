//! Pattern: Facade
//! Example: one `place_order` call hiding inventory, discount and payment subsystems

use std::collections::BTreeMap;

use crate::config::FacadeSettings;
use crate::error::{CatalogError, Result};

#[derive(Debug, Default)]
pub struct Inventory {
    stock: BTreeMap<u32, u32>,
}

impl Inventory {
    pub fn with_stock(stock: impl IntoIterator<Item = (u32, u32)>) -> Self {
        Self {
            stock: stock.into_iter().collect(),
        }
    }

    pub fn available(&self, product: u32, quantity: u32) -> bool {
        self.stock.get(&product).is_some_and(|&left| left >= quantity)
    }

    pub fn take(&mut self, product: u32, quantity: u32) -> Result<()> {
        match self.stock.get_mut(&product) {
            Some(left) if *left >= quantity => {
                *left -= quantity;
                Ok(())
            }
            _ => Err(CatalogError::OutOfStock { product }),
        }
    }

    pub fn quantity(&self, product: u32) -> u32 {
        self.stock.get(&product).copied().unwrap_or(0)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DiscountService {
    rate: f64,
}

impl DiscountService {
    pub fn new(rate: f64) -> Self {
        Self { rate }
    }

    pub fn apply(&self, price: f64) -> f64 {
        price * self.rate
    }
}

#[derive(Debug, Default)]
pub struct PaymentService {
    ledger: Vec<f64>,
}

impl PaymentService {
    pub fn charge(&mut self, amount: f64) {
        tracing::info!(amount, "processing payment");
        self.ledger.push(amount);
    }

    pub fn ledger(&self) -> &[f64] {
        &self.ledger
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Receipt {
    pub product: u32,
    pub quantity: u32,
    pub charged: f64,
}

pub struct OrderFacade {
    inventory: Inventory,
    discount: DiscountService,
    payments: PaymentService,
    unit_price: f64,
}

impl OrderFacade {
    pub fn new(inventory: Inventory, settings: &FacadeSettings) -> Self {
        Self {
            inventory,
            discount: DiscountService::new(settings.discount_rate),
            payments: PaymentService::default(),
            unit_price: settings.unit_price,
        }
    }

    /// Nothing is taken from stock and nothing is charged when the product is short.
    pub fn place_order(&mut self, product: u32, quantity: u32) -> Result<Receipt> {
        if quantity == 0 {
            return Err(CatalogError::invalid("quantity", "must be at least 1"));
        }
        if !self.inventory.available(product, quantity) {
            tracing::warn!(product, quantity, "product is not available");
            return Err(CatalogError::OutOfStock { product });
        }

        self.inventory.take(product, quantity)?;
        let charged = self.discount.apply(f64::from(quantity) * self.unit_price);
        self.payments.charge(charged);

        Ok(Receipt {
            product,
            quantity,
            charged,
        })
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn payments(&self) -> &PaymentService {
        &self.payments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn facade() -> OrderFacade {
        OrderFacade::new(
            Inventory::with_stock([(1, 10), (2, 0), (3, 5)]),
            &FacadeSettings::default(),
        )
    }

    #[test]
    fn test_order_applies_discount_and_takes_stock() {
        let mut shop = facade();
        let receipt = shop.place_order(1, 2).unwrap();

        assert!((receipt.charged - 18.0).abs() < 1e-9);
        assert_eq!(shop.inventory().quantity(1), 8);
        assert_eq!(shop.payments().ledger().len(), 1);
    }

    #[test]
    fn test_out_of_stock_charges_nothing() {
        let mut shop = facade();
        assert_eq!(shop.place_order(2, 1), Err(CatalogError::OutOfStock { product: 2 }));
        assert_eq!(shop.place_order(3, 6), Err(CatalogError::OutOfStock { product: 3 }));
        assert_eq!(shop.place_order(9, 1), Err(CatalogError::OutOfStock { product: 9 }));

        assert!(shop.payments().ledger().is_empty());
        assert_eq!(shop.inventory().quantity(3), 5);
    }

    #[test]
    fn test_zero_quantity_rejected() {
        assert!(matches!(facade().place_order(1, 0), Err(CatalogError::Invalid { .. })));
    }
}
