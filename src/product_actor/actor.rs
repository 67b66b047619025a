use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument};

use crate::clients::ProductClient;
use crate::domain::{ConsumerPrice, Product};
use crate::error::ProductError;
use crate::messages::{ProductRequest, ServiceResponse};
use crate::product::ProductService;

/// Owns the [`ProductService`] and answers [`ProductRequest`]s one at a time.
pub struct ProductActor {
    receiver: mpsc::Receiver<ProductRequest>,
    service: ProductService,
}

impl ProductActor {
    pub fn new(buffer_size: usize, service: ProductService) -> (Self, ProductClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self { receiver, service };
        let client = ProductClient::new(sender);
        (actor, client)
    }

    #[instrument(name = "product_actor", skip(self))]
    pub async fn run(mut self) {
        info!("ProductActor starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ProductRequest::GetAll { respond_to } => {
                    self.handle_get_all(respond_to).await;
                }
                ProductRequest::GetById { id, respond_to } => {
                    self.handle_get_by_id(id, respond_to).await;
                }
                ProductRequest::SearchPriceGt { price, respond_to } => {
                    self.handle_search_price_gt(price, respond_to).await;
                }
                ProductRequest::ConsumerPrice { ids, respond_to } => {
                    self.handle_consumer_price(ids, respond_to).await;
                }
                ProductRequest::Create { product, respond_to } => {
                    self.handle_create(product, respond_to).await;
                }
                ProductRequest::UpdateProduct { id, product, respond_to } => {
                    self.handle_update_product(id, product, respond_to).await;
                }
                ProductRequest::ReplaceProduct { id, product, respond_to } => {
                    self.handle_replace_product(id, product, respond_to).await;
                }
                ProductRequest::Delete { id, respond_to } => {
                    self.handle_delete(id, respond_to).await;
                }
                ProductRequest::Shutdown => {
                    info!("ProductActor shutting down");
                    break;
                }
            }
        }

        info!("ProductActor stopped");
    }

    #[instrument(skip(self, respond_to))]
    async fn handle_get_all(&self, respond_to: ServiceResponse<Vec<Product>, ProductError>) {
        debug!("Processing get_all request");
        let result = self.service.get_all().await;
        match &result {
            Ok(products) => info!(count = products.len(), "Products listed"),
            Err(e) => error!(error = %e, "Listing products failed"),
        }
        let _ = respond_to.send(result);
    }

    #[instrument(fields(product_id = %id), skip(self, respond_to))]
    async fn handle_get_by_id(&self, id: i64, respond_to: ServiceResponse<Product, ProductError>) {
        debug!("Processing get_by_id request");
        let result = self.service.get_by_id(id).await;
        match &result {
            Ok(product) => info!(product_name = %product.name, price = %product.price, "Product found"),
            Err(e) => debug!(error = %e, "Product lookup failed"),
        }
        let _ = respond_to.send(result);
    }

    #[instrument(skip(self, respond_to))]
    async fn handle_search_price_gt(
        &self,
        price: f64,
        respond_to: ServiceResponse<Vec<Product>, ProductError>,
    ) {
        debug!("Processing search_price_gt request");
        let result = self.service.search_price_gt(price).await;
        if let Ok(products) = &result {
            info!(matches = products.len(), "Search finished");
        }
        let _ = respond_to.send(result);
    }

    #[instrument(skip(self, respond_to))]
    async fn handle_consumer_price(
        &self,
        ids: Vec<i64>,
        respond_to: ServiceResponse<ConsumerPrice, ProductError>,
    ) {
        debug!("Processing consumer_price request");
        let result = self.service.consumer_price(&ids).await;
        match &result {
            Ok(priced) => info!(total_price = priced.total_price, "Consumer price computed"),
            Err(e) => error!(error = %e, "Consumer price rejected"),
        }
        let _ = respond_to.send(result);
    }

    #[instrument(fields(code_value = %product.code_value), skip(self, product, respond_to))]
    async fn handle_create(&self, product: Product, respond_to: ServiceResponse<Product, ProductError>) {
        debug!("Processing create request");
        let result = self.service.create(product).await;
        match &result {
            Ok(created) => info!(product_id = created.id, "Product created successfully"),
            Err(e) => error!(error = %e, "Product creation failed"),
        }
        let _ = respond_to.send(result);
    }

    #[instrument(fields(product_id = %id), skip(self, product, respond_to))]
    async fn handle_update_product(
        &self,
        id: i64,
        product: Product,
        respond_to: ServiceResponse<Product, ProductError>,
    ) {
        debug!("Processing update_product request");
        let result = self.service.update_product(id, product).await;
        match &result {
            Ok(_) => info!("Product updated successfully"),
            Err(e) => error!(error = %e, "Product update failed"),
        }
        let _ = respond_to.send(result);
    }

    #[instrument(fields(product_id = %id), skip(self, product, respond_to))]
    async fn handle_replace_product(
        &self,
        id: i64,
        product: Product,
        respond_to: ServiceResponse<Product, ProductError>,
    ) {
        debug!("Processing replace_product request");
        let result = self.service.replace_product(id, product).await;
        match &result {
            Ok(_) => info!("Product replaced successfully"),
            Err(e) => error!(error = %e, "Product replacement failed"),
        }
        let _ = respond_to.send(result);
    }

    #[instrument(fields(product_id = %id), skip(self, respond_to))]
    async fn handle_delete(&self, id: i64, respond_to: ServiceResponse<(), ProductError>) {
        debug!("Processing delete request");
        let result = self.service.delete(id).await;
        match &result {
            Ok(()) => info!("Product deleted"),
            Err(e) => error!(error = %e, "Product deletion failed"),
        }
        let _ = respond_to.send(result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::Repository;
    use crate::store::JsonStore;
    use std::sync::Arc;

    #[tokio::test]
    async fn actor_serves_requests_until_shutdown() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path().join("products.json"));
        store.create_if_missing().await.unwrap();
        let service = ProductService::new(Repository::new(Arc::new(store)));

        let (actor, client) = ProductActor::new(8, service);
        let handle = tokio::spawn(actor.run());

        let created = client
            .create(Product::new("Soap", 2, "SOAP", true, "01/01/2032", 3.0))
            .await
            .unwrap();
        assert_eq!(client.get_by_id(created.id).await.unwrap().name, "Soap");

        client.shutdown().await.unwrap();
        handle.await.unwrap();

        assert!(matches!(
            client.get_all().await,
            Err(ProductError::ActorCommunicationError(_))
        ));
    }
}
