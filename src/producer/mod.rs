pub mod catalog;
pub mod types;

pub use catalog::{CatalogError, ProducerCatalog};
pub use types::{ManaProducer, ProducerId};
