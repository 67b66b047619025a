use tokio::sync::oneshot;
use crate::domain::{ConsumerPrice, Product};
use crate::error::ProductError;

/// Generic type aliases for service communication
pub type ServiceResult<T, E> = std::result::Result<T, E>;
pub type ServiceResponse<T, E> = oneshot::Sender<ServiceResult<T, E>>;

/// Messages understood by the product actor. Each variant carries its
/// parameters and a oneshot channel for the answer.
#[derive(Debug)]
pub enum ProductRequest {
    GetAll {
        respond_to: ServiceResponse<Vec<Product>, ProductError>,
    },
    GetById {
        id: i64,
        respond_to: ServiceResponse<Product, ProductError>,
    },
    SearchPriceGt {
        price: f64,
        respond_to: ServiceResponse<Vec<Product>, ProductError>,
    },
    ConsumerPrice {
        ids: Vec<i64>,
        respond_to: ServiceResponse<ConsumerPrice, ProductError>,
    },
    Create {
        product: Product,
        respond_to: ServiceResponse<Product, ProductError>,
    },
    UpdateProduct {
        id: i64,
        product: Product,
        respond_to: ServiceResponse<Product, ProductError>,
    },
    ReplaceProduct {
        id: i64,
        product: Product,
        respond_to: ServiceResponse<Product, ProductError>,
    },
    Delete {
        id: i64,
        respond_to: ServiceResponse<(), ProductError>,
    },
    Shutdown,
}
