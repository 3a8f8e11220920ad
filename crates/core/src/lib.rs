//! `storefront-core` — shared catalog primitives.
//!
//! This crate contains **pure domain** primitives (no I/O): identifiers, money,
//! pack attributes, and the error model shared by the catalog and shipping crates.

pub mod entity;
pub mod error;
pub mod id;
pub mod money;
pub mod pack;

pub use entity::{Entity, id_set, repeated_positions};
pub use error::{DomainError, DomainResult, Invariant};
pub use id::{FamilyId, VariantId};
pub use money::{ExchangeRate, Multiplier, UsdCents};
pub use pack::PackQuantity;
