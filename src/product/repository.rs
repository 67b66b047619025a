use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::{invalid_expiration, parse_expiration, ConsumerPrice, Product};
use crate::error::ProductError;
use crate::store::Store;

/// Price factor applied to a consumer-price total, chosen by units consumed.
pub fn tier_multiplier(units: usize) -> f64 {
    match units {
        0..=10 => 1.21,
        11..=19 => 1.17,
        _ => 1.15,
    }
}

/// Business rules over a [`Store`]: code uniqueness, field validation and
/// consumer pricing.
#[derive(Clone)]
pub struct Repository {
    store: Arc<dyn Store>,
}

impl Repository {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn get_all(&self) -> Result<Vec<Product>, ProductError> {
        Ok(self.store.get_all().await?)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Product, ProductError> {
        self.store.get_one(id).await.map_err(ProductError::from_store(id))
    }

    /// Products priced strictly above `price`, in store order.
    pub async fn search_price_gt(&self, price: f64) -> Result<Vec<Product>, ProductError> {
        let products = self.store.get_all().await?;
        Ok(products.into_iter().filter(|p| p.price > price).collect())
    }

    /// Prices one unit per requested id, repeats included.
    ///
    /// Quantities in the returned products are what would remain after the
    /// purchase; nothing is written back to the store. The first unavailable
    /// product aborts the whole call.
    pub async fn consumer_price(&self, ids: &[i64]) -> Result<ConsumerPrice, ProductError> {
        let mut products: Vec<Product> = Vec::new();
        let mut total = 0.0;
        let mut units = 0usize;

        for &id in ids {
            match products.iter_mut().find(|p| p.id == id) {
                Some(product) => {
                    if product.quantity <= 0 {
                        return Err(ProductError::StockUnavailable(id));
                    }
                    product.quantity -= 1;
                    total += product.price;
                }
                None => {
                    let mut product = self.get_by_id(id).await?;
                    product.check_purchasable()?;
                    product.quantity -= 1;
                    total += product.price;
                    products.push(product);
                }
            }
            units += 1;
        }

        let multiplier = tier_multiplier(units);
        debug!(units, subtotal = total, multiplier, "Consumer price computed");
        Ok(ConsumerPrice {
            products,
            total_price: total * multiplier,
        })
    }

    pub async fn create(&self, product: Product) -> Result<Product, ProductError> {
        product.validate()?;
        self.ensure_unique_code(&product.code_value, None).await?;
        Ok(self.store.add_one(product).await?)
    }

    /// Full replacement of product `id`.
    pub async fn replace_product(&self, id: i64, product: Product) -> Result<Product, ProductError> {
        product.validate()?;
        self.get_by_id(id).await?;
        self.ensure_unique_code(&product.code_value, Some(id)).await?;
        self.store
            .replace_one(product.with_id(id))
            .await
            .map_err(ProductError::from_store(id))
    }

    /// Partial update of product `id`; empty and zero fields are left alone.
    pub async fn update_product(&self, id: i64, product: Product) -> Result<Product, ProductError> {
        if !product.expiration.is_empty() && parse_expiration(&product.expiration).is_none() {
            return Err(invalid_expiration(&product.expiration));
        }
        self.get_by_id(id).await?;
        if !product.code_value.is_empty() {
            self.ensure_unique_code(&product.code_value, Some(id)).await?;
        }
        self.store
            .update_one(product.with_id(id))
            .await
            .map_err(ProductError::from_store(id))
    }

    pub async fn delete(&self, id: i64) -> Result<(), ProductError> {
        self.store.delete_one(id).await.map_err(ProductError::from_store(id))
    }

    /// Scans the whole catalog for another product already using `code_value`.
    /// `owner` is the product being updated, whose own code is not a clash.
    async fn ensure_unique_code(&self, code_value: &str, owner: Option<i64>) -> Result<(), ProductError> {
        let products = self.store.get_all().await?;
        let clash = products
            .iter()
            .any(|p| p.code_value == code_value && Some(p.id) != owner);
        if clash {
            warn!(code_value, "Duplicate code value rejected");
            return Err(ProductError::Validation("code value already exists".into()));
        }
        Ok(())
    }
}
