//! Persisted catalog index: schema and durable storage.

mod schema;
mod store;

pub use schema::{CatalogIndex, SCHEMA_VERSION};
pub use store::IndexStore;
