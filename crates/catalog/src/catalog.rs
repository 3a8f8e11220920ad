//! Validated, immutable catalog read model.
//!
//! Built once from a generated artifact and shared read-only by request-serving
//! code; no locking is needed because nothing mutates it after construction.

use std::collections::HashMap;

use storefront_core::{DomainError, DomainResult, ExchangeRate, FamilyId, VariantId};

use crate::validator::validate;
use crate::variant::CatalogVariant;

#[derive(Debug, Clone)]
pub struct Catalog {
    variants: Vec<CatalogVariant>,
    index: HashMap<VariantId, usize>,
    exchange_rate: Option<ExchangeRate>,
}

impl Catalog {
    /// Validate `variants` and index them by id.
    pub fn new(variants: Vec<CatalogVariant>) -> DomainResult<Self> {
        validate(&variants)?;
        let index = variants
            .iter()
            .enumerate()
            .map(|(i, v)| (v.id.clone(), i))
            .collect();
        Ok(Self {
            variants,
            index,
            exchange_rate: None,
        })
    }

    pub fn with_exchange_rate(mut self, rate: ExchangeRate) -> DomainResult<Self> {
        rate.check()?;
        self.exchange_rate = Some(rate);
        Ok(self)
    }

    pub fn get(&self, id: &VariantId) -> Option<&CatalogVariant> {
        self.index.get(id).map(|i| &self.variants[*i])
    }

    /// Like [`Catalog::get`], but an unknown id is an error.
    pub fn require(&self, id: &VariantId) -> DomainResult<&CatalogVariant> {
        self.get(id)
            .ok_or_else(|| DomainError::UnknownVariant(id.clone()))
    }

    /// Variants in generation order.
    pub fn variants(&self) -> &[CatalogVariant] {
        &self.variants
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    /// Distinct family ids in first-seen order.
    pub fn families(&self) -> Vec<&FamilyId> {
        let mut out: Vec<&FamilyId> = Vec::new();
        for v in &self.variants {
            if !out.contains(&&v.family_id) {
                out.push(&v.family_id);
            }
        }
        out
    }

    pub fn in_family<'a>(&'a self, family: &'a FamilyId) -> impl Iterator<Item = &'a CatalogVariant> + 'a {
        self.variants.iter().filter(move |v| &v.family_id == family)
    }

    /// Price in the display currency, when a rate is configured.
    ///
    /// Returns `(currency, minor units)`.
    pub fn display_price(&self, id: &VariantId) -> DomainResult<Option<(&str, u64)>> {
        let variant = self.require(id)?;
        match &self.exchange_rate {
            Some(rate) => Ok(Some((rate.currency.as_str(), rate.convert(variant.price_usd_cents)?))),
            None => Ok(None),
        }
    }
}
