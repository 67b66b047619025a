use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("product {0} not found")]
    NotFound(i64),
    #[error("store file error: {0}")]
    Io(#[from] std::io::Error),
    #[error("store file is not a valid product list: {0}")]
    Json(#[from] serde_json::Error),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("invalid expiration date {0:?}, must be in format: dd/mm/yyyy")]
    InvalidDate(String),
}

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("product {0} not found")]
    NotFound(i64),
    #[error("no products found")]
    NoProductsFound,
    #[error("{0}")]
    Validation(String),
    #[error("product({0}) stock not available")]
    StockUnavailable(i64),
    #[error("product({0}) is not published")]
    NotPublished(i64),
    #[error("storage failure{}: {source}", product_context(.id))]
    Storage {
        id: Option<i64>,
        #[source]
        source: StoreError,
    },
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

fn product_context(id: &Option<i64>) -> String {
    id.map(|id| format!(" for product {id}")).unwrap_or_default()
}

impl From<StoreError> for ProductError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => ProductError::NotFound(id),
            source => ProductError::Storage { id: None, source },
        }
    }
}

impl ProductError {
    /// Like the `From` conversion, but records which product the failed call touched.
    pub fn from_store(id: i64) -> impl FnOnce(StoreError) -> ProductError {
        move |err| match ProductError::from(err) {
            ProductError::Storage { source, .. } => ProductError::Storage { id: Some(id), source },
            other => other,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required setting: {0}")]
    Missing(&'static str),
    #[error("invalid value {value:?} for {key}")]
    Invalid { key: &'static str, value: String },
}
