//! Cart → shipping quote.
//!
//! Resolves each line's variant to its band under the live schema, then defers to
//! the shipping calculator. Any failure (unknown variant, unmapped pack, missing
//! rate) propagates; checkout must never fall back to a zero charge.

use serde::{Deserialize, Serialize};

use storefront_core::{DomainResult, VariantId};
use storefront_shipping::{PriceByBand, ShippingBand, ShippingQuote, ShippingSchema, compute_shipping};

use crate::catalog::Catalog;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub variant_id: VariantId,
    pub quantity: u32,
}

impl CartLine {
    pub fn new(variant_id: VariantId, quantity: u32) -> Self {
        Self { variant_id, quantity }
    }
}

/// Bands implied by `lines`, one per line with a non-zero quantity.
pub fn cart_bands(
    catalog: &Catalog,
    lines: &[CartLine],
    schema: ShippingSchema,
) -> DomainResult<Vec<ShippingBand>> {
    lines
        .iter()
        .filter(|line| line.quantity > 0)
        .map(|line| catalog.require(&line.variant_id)?.band(schema))
        .collect()
}

pub fn quote_cart(
    catalog: &Catalog,
    lines: &[CartLine],
    schema: ShippingSchema,
    price_by_band: &PriceByBand,
) -> DomainResult<ShippingQuote> {
    let bands = cart_bands(catalog, lines, schema)?;
    compute_shipping(bands, price_by_band)
}
