//! The unit the rest of the storefront consumes.

use serde::{Deserialize, Serialize};

use storefront_core::{DomainResult, Entity, FamilyId, PackQuantity, UsdCents, VariantId};
use storefront_shipping::{ShippingBand, ShippingSchema, band_for};

/// One descriptive axis value picked for a variant (e.g. size = M).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantOption {
    pub axis: String,
    pub code: String,
    pub label: String,
}

/// One sellable variant. Immutable once generated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogVariant {
    pub id: VariantId,
    pub family_id: FamilyId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jis_standard: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<VariantOption>,
    pub pack: PackQuantity,
    pub price_usd_cents: UsdCents,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternate_id: Option<VariantId>,
}

impl Entity for CatalogVariant {
    type Id = VariantId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl CatalogVariant {
    /// Band under `schema`, derived from the pack attribute.
    pub fn band(&self, schema: ShippingSchema) -> DomainResult<ShippingBand> {
        band_for(schema, self.pack)
    }
}
