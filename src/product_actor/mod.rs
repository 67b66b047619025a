//! The product actor: hosts the service behind a message channel.

mod actor;

pub use actor::ProductActor;
