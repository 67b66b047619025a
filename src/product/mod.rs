//! Product business logic: the repository rules and the service facade.

mod repository;
mod service;

pub use repository::Repository;
pub use service::ProductService;
