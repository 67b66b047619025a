use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, info};

use super::{expiration_date, Store};
use crate::domain::Product;
use crate::error::StoreError;

/// Keeps the whole catalog as a single JSON array in one file.
///
/// Every call reads the full file and writes it back whole. There is no file
/// locking, so two processes writing the same file can lose each other's
/// updates.
///
/// The highest id ever assigned is kept next to the catalog in
/// `<path>.seq`, so ids of deleted products are never handed out again.
pub struct JsonStore {
    path: PathBuf,
    sequence_path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mut sequence_path = path.clone().into_os_string();
        sequence_path.push(".seq");
        Self {
            path,
            sequence_path: sequence_path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Seeds an empty catalog when the file does not exist yet.
    pub async fn create_if_missing(&self) -> Result<(), StoreError> {
        if tokio::fs::try_exists(&self.path).await? {
            return Ok(());
        }
        info!(path = %self.path.display(), "Creating empty product file");
        self.save(&[]).await
    }

    async fn load(&self) -> Result<Vec<Product>, StoreError> {
        let bytes = tokio::fs::read(&self.path).await?;
        let products = serde_json::from_slice(&bytes)?;
        Ok(products)
    }

    async fn save(&self, products: &[Product]) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(products)?;
        tokio::fs::write(&self.path, bytes).await?;
        debug!(count = products.len(), "Product file written");
        Ok(())
    }

    /// Highest id handed out so far; 0 when nothing was ever added.
    async fn last_id(&self) -> Result<i64, StoreError> {
        match tokio::fs::read(&self.sequence_path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(0),
            Err(err) => Err(err.into()),
        }
    }

    async fn next_id(&self, products: &[Product]) -> Result<i64, StoreError> {
        let highest_stored = products.iter().map(|p| p.id).max().unwrap_or(0);
        let id = self.last_id().await?.max(highest_stored) + 1;
        tokio::fs::write(&self.sequence_path, serde_json::to_vec(&id)?).await?;
        Ok(id)
    }

    fn position(products: &[Product], id: i64) -> Result<usize, StoreError> {
        products
            .iter()
            .position(|p| p.id == id)
            .ok_or(StoreError::NotFound(id))
    }
}

#[async_trait]
impl Store for JsonStore {
    async fn get_all(&self) -> Result<Vec<Product>, StoreError> {
        self.load().await
    }

    async fn get_one(&self, id: i64) -> Result<Product, StoreError> {
        let mut products = self.load().await?;
        let index = Self::position(&products, id)?;
        Ok(products.swap_remove(index))
    }

    async fn add_one(&self, mut product: Product) -> Result<Product, StoreError> {
        expiration_date(&product)?;
        let mut products = self.load().await?;
        product.id = self.next_id(&products).await?;
        products.push(product.clone());
        self.save(&products).await?;
        Ok(product)
    }

    async fn update_one(&self, product: Product) -> Result<Product, StoreError> {
        let mut products = self.load().await?;
        let index = Self::position(&products, product.id)?;
        let mut merged = products[index].clone();
        merged.merge(&product);
        expiration_date(&merged)?;
        products[index] = merged.clone();
        self.save(&products).await?;
        Ok(merged)
    }

    async fn replace_one(&self, product: Product) -> Result<Product, StoreError> {
        expiration_date(&product)?;
        let mut products = self.load().await?;
        let index = Self::position(&products, product.id)?;
        products[index] = product.clone();
        self.save(&products).await?;
        Ok(product)
    }

    async fn delete_one(&self, id: i64) -> Result<(), StoreError> {
        let mut products = self.load().await?;
        let index = Self::position(&products, id)?;
        products.remove(index);
        self.save(&products).await
    }
}
