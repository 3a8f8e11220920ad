//! Infrastructure layer: filesystem sources and sinks for the catalog pipeline.
//!
//! Everything here does I/O. Domain crates stay pure and receive already-loaded
//! values.

pub mod artifact;
pub mod config_source;
pub mod error;
pub mod paths;
pub mod shipping_source;

pub use artifact::{CatalogArtifact, FORMAT_VERSION, load_catalog, read_catalog, write_catalog};
pub use config_source::load_catalog_config;
pub use error::{InfraError, InfraResult};
pub use shipping_source::load_shipping_config;
