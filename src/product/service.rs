use crate::domain::{ConsumerPrice, Product};
use crate::error::ProductError;
use super::Repository;

/// Caller-facing product operations.
///
/// Everything passes straight through to the [`Repository`] except search,
/// where an empty result is reported as [`ProductError::NoProductsFound`].
#[derive(Clone)]
pub struct ProductService {
    repository: Repository,
}

impl ProductService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn get_all(&self) -> Result<Vec<Product>, ProductError> {
        self.repository.get_all().await
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Product, ProductError> {
        self.repository.get_by_id(id).await
    }

    pub async fn search_price_gt(&self, price: f64) -> Result<Vec<Product>, ProductError> {
        let products = self.repository.search_price_gt(price).await?;
        if products.is_empty() {
            return Err(ProductError::NoProductsFound);
        }
        Ok(products)
    }

    pub async fn consumer_price(&self, ids: &[i64]) -> Result<ConsumerPrice, ProductError> {
        self.repository.consumer_price(ids).await
    }

    pub async fn create(&self, product: Product) -> Result<Product, ProductError> {
        self.repository.create(product).await
    }

    pub async fn update_product(&self, id: i64, product: Product) -> Result<Product, ProductError> {
        self.repository.update_product(id, product).await
    }

    pub async fn replace_product(&self, id: i64, product: Product) -> Result<Product, ProductError> {
        self.repository.replace_product(id, product).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ProductError> {
        self.repository.delete(id).await
    }
}
