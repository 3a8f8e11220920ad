//! Domain error model.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::id::VariantId;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Structural or business invariant checked over a generated catalog.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Invariant {
    /// The catalog contains at least one variant.
    NonEmpty,
    /// No two variants share an id.
    UniqueId,
    /// Every variant has a strictly positive price.
    PositivePrice,
    /// Every variant's pack attribute belongs to the band-mapping domain.
    RecognizedPack,
    /// Every alternate pointer targets a variant in the same catalog.
    AlternateExists,
}

impl Invariant {
    pub fn as_str(self) -> &'static str {
        match self {
            Invariant::NonEmpty => "non_empty",
            Invariant::UniqueId => "unique_id",
            Invariant::PositivePrice => "positive_price",
            Invariant::RecognizedPack => "recognized_pack",
            Invariant::AlternateExists => "alternate_exists",
        }
    }
}

impl core::fmt::Display for Invariant {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Domain-level error.
///
/// Every variant is fatal to the operation in progress. Nothing here is meant to
/// be retried or defaulted: a pipeline step that sees one of these must stop.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The authoring input (catalog or shipping config) is malformed or incomplete.
    #[error("config error: {0}")]
    Config(String),

    /// A generated catalog violates an invariant.
    #[error("validation failed [{invariant}]{}: {detail}", fmt_variant(.variant_id))]
    Validation {
        invariant: Invariant,
        variant_id: Option<VariantId>,
        detail: String,
    },

    /// A band needed by a cart or catalog has no price entry.
    #[error("missing shipping rate for band {band}")]
    MissingRate { band: String },

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A cart references a variant the catalog does not contain.
    #[error("unknown variant: {0}")]
    UnknownVariant(VariantId),
}

fn fmt_variant(id: &Option<VariantId>) -> String {
    match id {
        Some(id) => format!(" variant {id}"),
        None => String::new(),
    }
}

impl DomainError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn validation(
        invariant: Invariant,
        variant_id: Option<VariantId>,
        detail: impl Into<String>,
    ) -> Self {
        Self::Validation {
            invariant,
            variant_id,
            detail: detail.into(),
        }
    }

    pub fn missing_rate(band: impl core::fmt::Display) -> Self {
        Self::MissingRate {
            band: band.to_string(),
        }
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }
}
