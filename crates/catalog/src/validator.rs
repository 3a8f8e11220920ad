//! Catalog Validator: structural and business invariants over a generated set.
//!
//! Read-only. Nothing here re-derives or repairs a variant; a catalog either
//! passes as a whole or is rejected.

use std::collections::HashSet;

use storefront_core::{DomainError, DomainResult, Invariant, VariantId, id_set, repeated_positions};
use storefront_shipping::is_recognized;

use crate::variant::CatalogVariant;

/// One violated invariant, attributed to a variant when there is one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    pub invariant: Invariant,
    pub variant_id: Option<VariantId>,
    pub detail: String,
}

impl ValidationFailure {
    fn new(invariant: Invariant, variant_id: Option<&VariantId>, detail: impl Into<String>) -> Self {
        Self {
            invariant,
            variant_id: variant_id.cloned(),
            detail: detail.into(),
        }
    }
}

impl From<ValidationFailure> for DomainError {
    fn from(value: ValidationFailure) -> Self {
        DomainError::validation(value.invariant, value.variant_id, value.detail)
    }
}

/// Collect every failure, in a fixed order.
///
/// The order is: emptiness, then each variant in sequence order (id uniqueness,
/// price, pack), then alternate references.
pub fn validate_all(variants: &[CatalogVariant]) -> Vec<ValidationFailure> {
    let mut failures = Vec::new();

    if variants.is_empty() {
        failures.push(ValidationFailure::new(
            Invariant::NonEmpty,
            None,
            "catalog has no variants",
        ));
        return failures;
    }

    let repeated: HashSet<usize> = repeated_positions(variants).into_iter().collect();
    for (pos, variant) in variants.iter().enumerate() {
        let id = &variant.id;
        if repeated.contains(&pos) {
            failures.push(ValidationFailure::new(
                Invariant::UniqueId,
                Some(id),
                "id appears more than once",
            ));
        }
        if !variant.price_usd_cents.is_positive() {
            failures.push(ValidationFailure::new(
                Invariant::PositivePrice,
                Some(id),
                format!("price must be positive, got {} cents", variant.price_usd_cents.get()),
            ));
        }
        if !is_recognized(variant.pack) {
            failures.push(ValidationFailure::new(
                Invariant::RecognizedPack,
                Some(id),
                format!("pack of {} has no shipping band", variant.pack),
            ));
        }
    }

    let known = id_set(variants);
    for variant in variants {
        if let Some(target) = &variant.alternate_id {
            if !known.contains(target) {
                failures.push(ValidationFailure::new(
                    Invariant::AlternateExists,
                    Some(&variant.id),
                    format!("alternate {target} is not in the catalog"),
                ));
            }
        }
    }

    for failure in &failures {
        tracing::warn!(
            invariant = %failure.invariant,
            variant_id = failure.variant_id.as_ref().map(VariantId::as_str).unwrap_or("-"),
            detail = %failure.detail,
            "catalog invariant violated"
        );
    }
    failures
}

/// All-or-nothing check: the first failure (in [`validate_all`] order) is returned
/// as a [`DomainError::Validation`].
pub fn validate(variants: &[CatalogVariant]) -> DomainResult<()> {
    match validate_all(variants).into_iter().next() {
        Some(failure) => Err(failure.into()),
        None => Ok(()),
    }
}
