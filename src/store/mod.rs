//! Persistence for the product collection.
//!
//! [`Store`] is the only seam between the business layer and the backing
//! medium. [`JsonStore`] keeps the whole catalog in one JSON file;
//! [`SqlStore`] keeps it in a SQLite `products` table. Both return the same
//! products and the same [`StoreError`] kinds for the same calls.

mod json_store;
mod sql_store;

pub use json_store::JsonStore;
pub use sql_store::SqlStore;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::{parse_expiration, Product};
use crate::error::StoreError;

#[async_trait]
pub trait Store: Send + Sync {
    /// All products, in store order.
    async fn get_all(&self) -> Result<Vec<Product>, StoreError>;

    async fn get_one(&self, id: i64) -> Result<Product, StoreError>;

    /// Persists `product` and returns it with the store-assigned id.
    async fn add_one(&self, product: Product) -> Result<Product, StoreError>;

    /// Merges the non-empty fields of `product` onto the record with the same
    /// id and returns the merged record.
    async fn update_one(&self, product: Product) -> Result<Product, StoreError>;

    /// Overwrites every field of the record with the same id.
    async fn replace_one(&self, product: Product) -> Result<Product, StoreError>;

    async fn delete_one(&self, id: i64) -> Result<(), StoreError>;
}

/// Written expirations must parse as `dd/mm/yyyy` in every store.
fn expiration_date(product: &Product) -> Result<NaiveDate, StoreError> {
    parse_expiration(&product.expiration)
        .ok_or_else(|| StoreError::InvalidDate(product.expiration.clone()))
}
