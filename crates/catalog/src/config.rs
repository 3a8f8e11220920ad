//! Catalog authoring input.
//!
//! A [`CatalogConfig`] is loaded once per generation run and never mutated. Each
//! product family declares the axes that expand into variants: zero or more
//! descriptive axes (size, grade, ...) and the mandatory pack axis that drives
//! shipping classification.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use storefront_core::id::slugify;
use storefront_core::{DomainError, DomainResult, ExchangeRate, FamilyId, Multiplier, PackQuantity, UsdCents};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogConfig {
    pub families: Vec<ProductFamily>,
    /// Optional single stored rate for display-currency prices.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exchange_rate: Option<ExchangeRate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProductFamily {
    pub id: FamilyId,
    pub name: String,
    /// JIS standard the family is certified against (e.g. "JIS T 9115").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jis_standard: Option<String>,
    /// Price of one pack before multipliers.
    pub base_price_usd_cents: UsdCents,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Family whose matching variant is offered as the alternate SKU.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternate_family: Option<FamilyId>,
    #[serde(default)]
    pub axes: Vec<Axis>,
    pub packs: Vec<PackOption>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Axis {
    pub name: String,
    pub values: Vec<AxisValue>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AxisValue {
    pub code: String,
    pub label: String,
    #[serde(default)]
    pub multiplier: Multiplier,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PackOption {
    pub quantity: PackQuantity,
    #[serde(default)]
    pub multiplier: Multiplier,
}

impl CatalogConfig {
    /// Structural checks; every failure is a [`DomainError::Config`].
    ///
    /// Whether a pack quantity is sellable is deliberately left to the validator.
    pub fn check(&self) -> DomainResult<()> {
        if self.families.is_empty() {
            return Err(DomainError::config("catalog config names no product families"));
        }

        let mut family_ids = HashSet::new();
        for family in &self.families {
            if !family_ids.insert(&family.id) {
                return Err(DomainError::config(format!(
                    "family {} is declared more than once",
                    family.id
                )));
            }
        }

        for family in &self.families {
            family.check()?;
            if let Some(alt) = &family.alternate_family {
                if alt == &family.id {
                    return Err(DomainError::config(format!(
                        "family {} names itself as alternate_family",
                        family.id
                    )));
                }
                if !family_ids.contains(alt) {
                    return Err(DomainError::config(format!(
                        "family {} names unknown alternate_family {alt}",
                        family.id
                    )));
                }
            }
        }

        if let Some(rate) = &self.exchange_rate {
            rate.check()?;
        }
        Ok(())
    }
}

impl ProductFamily {
    fn check(&self) -> DomainResult<()> {
        let id = &self.id;
        if self.name.trim().is_empty() {
            return Err(DomainError::config(format!("family {id}: name cannot be empty")));
        }
        if !self.base_price_usd_cents.is_positive() {
            return Err(DomainError::config(format!(
                "family {id}: base_price_usd_cents must be positive"
            )));
        }
        if self.packs.is_empty() {
            return Err(DomainError::config(format!("family {id}: packs cannot be empty")));
        }

        let mut quantities = HashSet::new();
        for pack in &self.packs {
            if !quantities.insert(pack.quantity) {
                return Err(DomainError::config(format!(
                    "family {id}: pack quantity {} is declared more than once",
                    pack.quantity.pieces()
                )));
            }
            pack.multiplier
                .checked_basis_points()
                .map_err(|e| DomainError::config(format!("family {id}, pack {}: {e}", pack.quantity)))?;
        }

        for axis in &self.axes {
            if axis.name.trim().is_empty() {
                return Err(DomainError::config(format!("family {id}: axis name cannot be empty")));
            }
            if axis.values.is_empty() {
                return Err(DomainError::config(format!(
                    "family {id}: axis {} has no values",
                    axis.name
                )));
            }
            let mut codes = HashSet::new();
            for value in &axis.values {
                let slug = slugify(&value.code);
                if slug.is_empty() {
                    return Err(DomainError::config(format!(
                        "family {id}: axis {} value code {:?} has no usable characters",
                        axis.name, value.code
                    )));
                }
                if !codes.insert(slug) {
                    return Err(DomainError::config(format!(
                        "family {id}: axis {} declares code {:?} more than once",
                        axis.name, value.code
                    )));
                }
                value.multiplier.checked_basis_points().map_err(|e| {
                    DomainError::config(format!("family {id}, axis {} {:?}: {e}", axis.name, value.code))
                })?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn axis_value(code: &str, label: &str, multiplier: f64) -> AxisValue {
        AxisValue {
            code: code.to_owned(),
            label: label.to_owned(),
            multiplier: Multiplier::from_f64(multiplier).unwrap(),
        }
    }

    pub fn pack(quantity: u32, multiplier: f64) -> PackOption {
        PackOption {
            quantity: PackQuantity(quantity),
            multiplier: Multiplier::from_f64(multiplier).unwrap(),
        }
    }

    pub fn family(id: &str) -> ProductFamily {
        ProductFamily {
            id: id.parse().unwrap(),
            name: "Nitrile Examination Gloves".to_owned(),
            jis_standard: Some("JIS T 9115".to_owned()),
            base_price_usd_cents: UsdCents(1200),
            image_url: None,
            alternate_family: None,
            axes: vec![Axis {
                name: "size".to_owned(),
                values: vec![axis_value("s", "S", 1.0), axis_value("m", "M", 1.0), axis_value("l", "L", 1.1)],
            }],
            packs: vec![pack(10, 1.0), pack(20, 1.9)],
        }
    }

    pub fn config() -> CatalogConfig {
        CatalogConfig {
            families: vec![family("nitrile-gloves")],
            exchange_rate: None,
        }
    }
}
