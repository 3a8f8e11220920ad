//! Shipping Band Resolver: pack attribute → shipping band, per schema version.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use storefront_core::{DomainError, DomainResult, PackQuantity};

/// Pack quantities that have a band under every schema version.
pub const RECOGNIZED_PACKS: [PackQuantity; 4] = [
    PackQuantity(10),
    PackQuantity(20),
    PackQuantity(50),
    PackQuantity(100),
];

/// Which shipping-price schema is live.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShippingSchema {
    /// Flat two-band table.
    Legacy,
    /// Per-pack bands priced through zone rules.
    Current,
}

impl ShippingSchema {
    pub const ALL: [ShippingSchema; 2] = [ShippingSchema::Legacy, ShippingSchema::Current];

    /// Bands that belong to this schema.
    pub fn bands(self) -> &'static [ShippingBand] {
        match self {
            ShippingSchema::Legacy => &[ShippingBand::A, ShippingBand::B],
            ShippingSchema::Current => &[
                ShippingBand::A10Pcs,
                ShippingBand::B20Pcs,
                ShippingBand::C50Pcs,
                ShippingBand::D100Pcs,
            ],
        }
    }
}

impl core::fmt::Display for ShippingSchema {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ShippingSchema::Legacy => f.write_str("legacy"),
            ShippingSchema::Current => f.write_str("current"),
        }
    }
}

/// Shipping classification tag.
///
/// Derived from pack attributes on demand; never stored as ground truth.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ShippingBand {
    #[serde(rename = "BAND_A")]
    A,
    #[serde(rename = "BAND_B")]
    B,
    #[serde(rename = "BAND_A_10PCS")]
    A10Pcs,
    #[serde(rename = "BAND_B_20PCS")]
    B20Pcs,
    #[serde(rename = "BAND_C_50PCS")]
    C50Pcs,
    #[serde(rename = "BAND_D_100PCS")]
    D100Pcs,
}

impl ShippingBand {
    pub fn tag(self) -> &'static str {
        match self {
            ShippingBand::A => "BAND_A",
            ShippingBand::B => "BAND_B",
            ShippingBand::A10Pcs => "BAND_A_10PCS",
            ShippingBand::B20Pcs => "BAND_B_20PCS",
            ShippingBand::C50Pcs => "BAND_C_50PCS",
            ShippingBand::D100Pcs => "BAND_D_100PCS",
        }
    }

    pub fn schema(self) -> ShippingSchema {
        match self {
            ShippingBand::A | ShippingBand::B => ShippingSchema::Legacy,
            _ => ShippingSchema::Current,
        }
    }
}

impl core::fmt::Display for ShippingBand {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for ShippingBand {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ShippingSchema::ALL
            .iter()
            .flat_map(|schema| schema.bands())
            .copied()
            .find(|band| band.tag() == s)
            .ok_or_else(|| DomainError::config(format!("unknown shipping band {s:?}")))
    }
}

/// Whether `pack` belongs to the band-mapping domain.
pub fn is_recognized(pack: PackQuantity) -> bool {
    RECOGNIZED_PACKS.contains(&pack)
}

/// Map a pack attribute to its band under `schema`.
///
/// An unrecognized pack is a configuration error; there is no default band.
pub fn band_for(schema: ShippingSchema, pack: PackQuantity) -> DomainResult<ShippingBand> {
    let band = match (schema, pack.pieces()) {
        (ShippingSchema::Legacy, 10 | 20) => ShippingBand::A,
        (ShippingSchema::Legacy, 50 | 100) => ShippingBand::B,
        (ShippingSchema::Current, 10) => ShippingBand::A10Pcs,
        (ShippingSchema::Current, 20) => ShippingBand::B20Pcs,
        (ShippingSchema::Current, 50) => ShippingBand::C50Pcs,
        (ShippingSchema::Current, 100) => ShippingBand::D100Pcs,
        _ => {
            return Err(DomainError::config(format!(
                "pack of {pack} has no shipping band under the {schema} schema"
            )));
        }
    };
    Ok(band)
}
