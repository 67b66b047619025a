use tokio::sync::mpsc;
use tracing::{debug, instrument};

use crate::domain::{ConsumerPrice, Product};
use crate::error::ProductError;
use crate::messages::ProductRequest;

/// Cloneable handle to the product actor.
#[derive(Clone)]
pub struct ProductClient {
    sender: mpsc::Sender<ProductRequest>,
}

impl ProductClient {
    pub fn new(sender: mpsc::Sender<ProductRequest>) -> Self {
        Self { sender }
    }

    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), ProductError> {
        debug!("Sending shutdown request");
        self.sender
            .send(ProductRequest::Shutdown)
            .await
            .map_err(|e| ProductError::ActorCommunicationError(e.to_string()))
    }
}

client_method!(ProductClient => fn get_all() -> Vec<Product> as ProductRequest::GetAll, Error = ProductError);
client_method!(ProductClient => fn get_by_id(id: i64) -> Product as ProductRequest::GetById, Error = ProductError);
client_method!(ProductClient => fn search_price_gt(price: f64) -> Vec<Product> as ProductRequest::SearchPriceGt, Error = ProductError);
client_method!(ProductClient => fn consumer_price(ids: Vec<i64>) -> ConsumerPrice as ProductRequest::ConsumerPrice, Error = ProductError);
client_method!(ProductClient => fn create(product: Product) -> Product as ProductRequest::Create, Error = ProductError);
client_method!(ProductClient => fn update_product(id: i64, product: Product) -> Product as ProductRequest::UpdateProduct, Error = ProductError);
client_method!(ProductClient => fn replace_product(id: i64, product: Product) -> Product as ProductRequest::ReplaceProduct, Error = ProductError);
client_method!(ProductClient => fn delete(id: i64) -> () as ProductRequest::Delete, Error = ProductError);
