//! # Mock Framework
//!
//! Utilities for testing code that talks to the product actor without
//! running one.
//!
//! Use [`create_mock_client`] to get a client and a receiver, then the
//! `expect_*` helpers to assert the next request and answer it.

use tokio::sync::mpsc;

use crate::clients::ProductClient;
use crate::domain::{ConsumerPrice, Product};
use crate::error::ProductError;
use crate::messages::{ProductRequest, ServiceResponse};

/// Creates a client whose requests land on a receiver the test controls.
pub fn create_mock_client(buffer_size: usize) -> (ProductClient, mpsc::Receiver<ProductRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ProductClient::new(sender), receiver)
}

pub async fn expect_get_all(
    receiver: &mut mpsc::Receiver<ProductRequest>,
) -> Option<ServiceResponse<Vec<Product>, ProductError>> {
    match receiver.recv().await {
        Some(ProductRequest::GetAll { respond_to }) => Some(respond_to),
        _ => None,
    }
}

pub async fn expect_get_by_id(
    receiver: &mut mpsc::Receiver<ProductRequest>,
) -> Option<(i64, ServiceResponse<Product, ProductError>)> {
    match receiver.recv().await {
        Some(ProductRequest::GetById { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

pub async fn expect_search(
    receiver: &mut mpsc::Receiver<ProductRequest>,
) -> Option<(f64, ServiceResponse<Vec<Product>, ProductError>)> {
    match receiver.recv().await {
        Some(ProductRequest::SearchPriceGt { price, respond_to }) => Some((price, respond_to)),
        _ => None,
    }
}

pub async fn expect_consumer_price(
    receiver: &mut mpsc::Receiver<ProductRequest>,
) -> Option<(Vec<i64>, ServiceResponse<ConsumerPrice, ProductError>)> {
    match receiver.recv().await {
        Some(ProductRequest::ConsumerPrice { ids, respond_to }) => Some((ids, respond_to)),
        _ => None,
    }
}

pub async fn expect_create(
    receiver: &mut mpsc::Receiver<ProductRequest>,
) -> Option<(Product, ServiceResponse<Product, ProductError>)> {
    match receiver.recv().await {
        Some(ProductRequest::Create { product, respond_to }) => Some((product, respond_to)),
        _ => None,
    }
}

pub async fn expect_update(
    receiver: &mut mpsc::Receiver<ProductRequest>,
) -> Option<(i64, Product, ServiceResponse<Product, ProductError>)> {
    match receiver.recv().await {
        Some(ProductRequest::UpdateProduct { id, product, respond_to }) => Some((id, product, respond_to)),
        _ => None,
    }
}

pub async fn expect_delete(
    receiver: &mut mpsc::Receiver<ProductRequest>,
) -> Option<(i64, ServiceResponse<(), ProductError>)> {
    match receiver.recv().await {
        Some(ProductRequest::Delete { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_client() {
        let (client, mut receiver) = create_mock_client(10);

        let get_task = tokio::spawn(async move { client.get_by_id(4).await });

        let (id, responder) = expect_get_by_id(&mut receiver).await.expect("Expected GetById request");
        assert_eq!(id, 4);
        let product = Product::new("Tape", 1, "TP", true, "01/01/2030", 2.0).with_id(4);
        responder.send(Ok(product.clone())).unwrap();

        let result = get_task.await.unwrap();
        assert_eq!(result.unwrap(), product);
    }

    #[tokio::test]
    async fn dropped_responder_is_a_communication_error() {
        let (client, mut receiver) = create_mock_client(10);

        let delete_task = tokio::spawn(async move { client.delete(9).await });

        let (id, responder) = expect_delete(&mut receiver).await.expect("Expected Delete request");
        assert_eq!(id, 9);
        drop(responder);

        let result = delete_task.await.unwrap();
        assert!(matches!(result, Err(ProductError::ActorCommunicationError(_))));
    }
}
