use std::sync::Arc;

use sqlx::sqlite::SqlitePoolOptions;
use tracing::{error, info, instrument};

use super::{AppConfig, StoreKind};
use crate::clients::ProductClient;
use crate::error::StoreError;
use crate::product::{ProductService, Repository};
use crate::product_actor::ProductActor;
use crate::store::{JsonStore, SqlStore, Store};

/// Opens the backend selected by `config`, preparing it for use.
#[instrument(skip(config), fields(store = ?config.store))]
pub async fn open_store(config: &AppConfig) -> Result<Arc<dyn Store>, StoreError> {
    match config.store {
        StoreKind::Json => {
            let store = JsonStore::new(config.json_path.clone());
            store.create_if_missing().await?;
            info!(path = %store.path().display(), "Using JSON product store");
            Ok(Arc::new(store))
        }
        StoreKind::Sql => {
            let pool = SqlitePoolOptions::new()
                .max_connections(5)
                .connect(&config.database_url)
                .await?;
            let store = SqlStore::new(pool);
            store.migrate().await?;
            info!("Using SQL product store");
            Ok(Arc::new(store))
        }
    }
}

/// Owns the running catalog: builds the service stack on top of a store,
/// starts the product actor and shuts it down.
pub struct CatalogSystem {
    pub product_client: ProductClient,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl CatalogSystem {
    /// Wires Store -> Repository -> Service -> actor and starts the actor.
    #[instrument(name = "catalog_system", skip(store))]
    pub fn new(store: Arc<dyn Store>) -> Self {
        info!("Starting catalog system");

        let service = ProductService::new(Repository::new(store));
        let (product_actor, product_client) = ProductActor::new(100, service);
        let handles = vec![tokio::spawn(product_actor.run())];

        info!("Catalog system started successfully");
        Self { product_client, handles }
    }

    #[instrument(skip(self))]
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down catalog system");

        let _ = self.product_client.shutdown().await;

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = ?e, "Actor shutdown error");
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("Catalog system shutdown complete");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::SocketAddr;

    fn config(store: StoreKind, dir: &tempfile::TempDir) -> AppConfig {
        AppConfig {
            token: "t".into(),
            store,
            json_path: dir.path().join("catalog.json"),
            database_url: "sqlite::memory:".into(),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
        }
    }

    #[tokio::test]
    async fn json_store_is_seeded_on_open() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&config(StoreKind::Json, &dir)).await.unwrap();
        assert!(store.get_all().await.unwrap().is_empty());
        assert!(dir.path().join("catalog.json").exists());
    }

    #[tokio::test]
    async fn system_starts_and_stops() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&config(StoreKind::Json, &dir)).await.unwrap();
        let system = CatalogSystem::new(store);

        assert!(system.product_client.get_all().await.unwrap().is_empty());
        system.shutdown().await.unwrap();
    }
}
