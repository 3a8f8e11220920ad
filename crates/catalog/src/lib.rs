//! Catalog domain module.
//!
//! Expands a compact product configuration into the full set of sellable variants,
//! validates the generated set, and serves it read-only at request time. Purely
//! deterministic domain logic (no IO, no HTTP, no storage).

pub mod cart;
pub mod catalog;
pub mod config;
pub mod generator;
pub mod image;
pub mod validator;
pub mod variant;

pub use cart::{CartLine, cart_bands, quote_cart};
pub use catalog::Catalog;
pub use config::{Axis, AxisValue, CatalogConfig, PackOption, ProductFamily};
pub use generator::generate;
pub use image::{display_image_url, is_placeholder_url};
pub use validator::{ValidationFailure, validate, validate_all};
pub use variant::{CatalogVariant, VariantOption};
