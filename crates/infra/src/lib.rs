//! Infrastructure layer: in-memory stores, dataset loading and configuration.

pub mod config;
pub mod dataset;
pub mod store;

pub use config::WardenConfig;
pub use dataset::Dataset;
pub use store::{InMemoryAuthorityStore, TenantTable};
