//! Shipping Cost Calculator.
//!
//! A cart ships at the price of the most expensive band it needs, plus a flat
//! consolidation fee for every additional distinct band. Repeated occurrences of
//! one band never add cost.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use storefront_core::{DomainResult, UsdCents};

use crate::band::ShippingBand;
use crate::rates::PriceByBand;

/// Fee per distinct band beyond the first.
pub const ADDITIONAL_BAND_SURCHARGE: UsdCents = UsdCents(500);

/// Cost breakdown for one cart.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingQuote {
    pub base_price_usd_cents: UsdCents,
    pub surcharge_usd_cents: UsdCents,
    pub total_usd_cents: UsdCents,
}

/// Reduce the bands implied by a cart to a single shipping charge.
///
/// Fails with [`storefront_core::DomainError::MissingRate`] if any band in the
/// cart has no entry in `price_by_band`; a partial total is never returned.
pub fn compute_shipping(
    bands_in_cart: impl IntoIterator<Item = ShippingBand>,
    price_by_band: &PriceByBand,
) -> DomainResult<ShippingQuote> {
    let distinct: BTreeSet<ShippingBand> = bands_in_cart.into_iter().collect();
    if distinct.is_empty() {
        return Ok(ShippingQuote::default());
    }

    let mut base = UsdCents::ZERO;
    for band in &distinct {
        base = base.max(price_by_band.price_of(*band)?);
    }

    let extra = (distinct.len() - 1) as u64;
    let surcharge = ADDITIONAL_BAND_SURCHARGE.checked_mul(extra)?;
    let total = base.checked_add(surcharge)?;

    tracing::debug!(
        bands = distinct.len(),
        base = base.get(),
        surcharge = surcharge.get(),
        total = total.get(),
        "computed shipping quote"
    );

    Ok(ShippingQuote {
        base_price_usd_cents: base,
        surcharge_usd_cents: surcharge,
        total_usd_cents: total,
    })
}
