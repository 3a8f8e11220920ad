//! Shipping price tables.
//!
//! Two schemas coexist: the legacy flat table (one row per band) and the zone/rule
//! table (rules scoped by destination zone, with carrier policy overrides). Both
//! flatten into a [`PriceByBand`] for one destination, which is the only thing the
//! calculator ever sees.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use serde::{Deserialize, Serialize};

use storefront_core::{DomainError, DomainResult, UsdCents};

use crate::band::{ShippingBand, ShippingSchema};

/// Resolved per-band price lookup for one checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceByBand(BTreeMap<ShippingBand, UsdCents>);

impl PriceByBand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, band: ShippingBand, price: UsdCents) -> Option<UsdCents> {
        self.0.insert(band, price)
    }

    pub fn get(&self, band: ShippingBand) -> Option<UsdCents> {
        self.0.get(&band).copied()
    }

    /// Price of `band`; a missing entry is a [`DomainError::MissingRate`].
    pub fn price_of(&self, band: ShippingBand) -> DomainResult<UsdCents> {
        self.get(band).ok_or_else(|| DomainError::missing_rate(band))
    }

    /// Fail on the first band in `bands` without a price entry.
    pub fn ensure_covers(&self, bands: impl IntoIterator<Item = ShippingBand>) -> DomainResult<()> {
        for band in bands {
            self.price_of(band)?;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ShippingBand, UsdCents)> + '_ {
        self.0.iter().map(|(band, price)| (*band, *price))
    }
}

impl FromIterator<(ShippingBand, UsdCents)> for PriceByBand {
    fn from_iter<I: IntoIterator<Item = (ShippingBand, UsdCents)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

fn ensure_schema(band: ShippingBand, schema: ShippingSchema, table: &str) -> DomainResult<()> {
    if band.schema() != schema {
        return Err(DomainError::config(format!(
            "{table} table lists {band}, which belongs to the {} schema",
            band.schema()
        )));
    }
    Ok(())
}

/// One row of the legacy flat table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LegacyRate {
    pub band: ShippingBand,
    pub price_usd_cents: UsdCents,
}

/// Legacy flat table: one row per band, no zones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LegacyRateTable {
    #[serde(default)]
    pub rows: Vec<LegacyRate>,
}

impl LegacyRateTable {
    pub fn price_by_band(&self) -> DomainResult<PriceByBand> {
        let mut out = BTreeMap::new();
        for row in &self.rows {
            ensure_schema(row.band, ShippingSchema::Legacy, "legacy")?;
            match out.entry(row.band) {
                Entry::Vacant(slot) => {
                    slot.insert(row.price_usd_cents);
                }
                Entry::Occupied(_) => {
                    return Err(DomainError::config(format!(
                        "legacy table lists {} more than once",
                        row.band
                    )));
                }
            }
        }
        Ok(PriceByBand(out))
    }
}

/// Destination zone for the rule table.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Zone {
    Domestic,
    NorthAmerica,
    International,
}

impl Zone {
    pub const ALL: [Zone; 3] = [Zone::Domestic, Zone::NorthAmerica, Zone::International];

    /// Wire name, identical to the serde spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Zone::Domestic => "domestic",
            Zone::NorthAmerica => "north_america",
            Zone::International => "international",
        }
    }
}

impl core::fmt::Display for Zone {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for Zone {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Zone::ALL.into_iter().find(|zone| zone.as_str() == s).ok_or_else(|| {
            let known: Vec<&str> = Zone::ALL.iter().map(|z| z.as_str()).collect();
            DomainError::config(format!("unknown zone {s:?} (expected one of {})", known.join(", ")))
        })
    }
}

/// Price rule for one band, optionally scoped to a zone.
///
/// A rule without a zone is the fallback for every zone lacking its own rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ZoneRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone: Option<Zone>,
    pub band: ShippingBand,
    pub price_usd_cents: UsdCents,
}

/// What a carrier override does to a matching band price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CarrierPolicy {
    /// Replace the price.
    Fixed { price_usd_cents: UsdCents },
    /// Add to the price.
    Surcharge { usd_cents: UsdCents },
    /// The carrier does not ship this band at all.
    Exclude,
}

/// Carrier-specific adjustment, optionally narrowed to a zone and/or band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CarrierOverride {
    pub carrier: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone: Option<Zone>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub band: Option<ShippingBand>,
    pub policy: CarrierPolicy,
}

impl CarrierOverride {
    fn matches(&self, carrier: &str, zone: Zone, band: ShippingBand) -> bool {
        self.carrier == carrier
            && self.zone.is_none_or(|z| z == zone)
            && self.band.is_none_or(|b| b == band)
    }
}

/// Where a cart ships and, optionally, which carrier handles it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destination {
    pub zone: Zone,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carrier: Option<String>,
}

impl Destination {
    pub fn new(zone: Zone) -> Self {
        Self { zone, carrier: None }
    }

    pub fn with_carrier(mut self, carrier: impl Into<String>) -> Self {
        self.carrier = Some(carrier.into());
        self
    }
}

/// Current rule/zone table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ZoneRateTable {
    #[serde(default)]
    pub rules: Vec<ZoneRule>,
    #[serde(default)]
    pub carrier_overrides: Vec<CarrierOverride>,
}

impl ZoneRateTable {
    /// Flatten the rules for one destination.
    ///
    /// Per band, a zone-specific rule beats the zone-less fallback. Matching
    /// carrier overrides then apply in declared order.
    pub fn price_by_band(&self, destination: &Destination) -> DomainResult<PriceByBand> {
        let mut specific = BTreeMap::new();
        let mut fallback = BTreeMap::new();
        for rule in &self.rules {
            ensure_schema(rule.band, ShippingSchema::Current, "zone")?;
            let (slot, scope) = match rule.zone {
                Some(zone) if zone == destination.zone => (&mut specific, "zone-specific"),
                Some(_) => continue,
                None => (&mut fallback, "fallback"),
            };
            if slot.insert(rule.band, rule.price_usd_cents).is_some() {
                return Err(DomainError::config(format!(
                    "zone table has more than one {scope} rule for {} in {:?}",
                    rule.band, destination.zone
                )));
            }
        }

        let mut prices = fallback;
        prices.extend(specific);

        if let Some(carrier) = destination.carrier.as_deref() {
            for ov in &self.carrier_overrides {
                if let Some(band) = ov.band {
                    ensure_schema(band, ShippingSchema::Current, "zone")?;
                }
                let bands: Vec<ShippingBand> = prices
                    .keys()
                    .copied()
                    .filter(|band| ov.matches(carrier, destination.zone, *band))
                    .collect();
                for band in bands {
                    match &ov.policy {
                        CarrierPolicy::Fixed { price_usd_cents } => {
                            prices.insert(band, *price_usd_cents);
                        }
                        CarrierPolicy::Surcharge { usd_cents } => {
                            let base = prices.get(&band).copied().unwrap_or_default();
                            prices.insert(band, base.checked_add(*usd_cents)?);
                        }
                        CarrierPolicy::Exclude => {
                            prices.remove(&band);
                        }
                    }
                }
            }
        }

        Ok(PriceByBand(prices))
    }
}

/// Admin-configured shipping pricing: both tables plus which one is live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ShippingConfig {
    pub active: ShippingSchema,
    #[serde(default)]
    pub legacy: LegacyRateTable,
    #[serde(default)]
    pub zoned: ZoneRateTable,
}

impl ShippingConfig {
    /// Flatten whichever schema is live into a price lookup for `destination`.
    pub fn price_table(&self, destination: &Destination) -> DomainResult<PriceByBand> {
        self.price_table_for(self.active, destination)
    }

    /// Flatten `schema`'s table, live or not. The legacy table ignores the destination.
    pub fn price_table_for(
        &self,
        schema: ShippingSchema,
        destination: &Destination,
    ) -> DomainResult<PriceByBand> {
        let table = match schema {
            ShippingSchema::Legacy => self.legacy.price_by_band()?,
            ShippingSchema::Current => self.zoned.price_by_band(destination)?,
        };
        tracing::debug!(
            schema = %schema,
            zone = %destination.zone,
            carrier = destination.carrier.as_deref().unwrap_or("-"),
            bands = table.len(),
            "resolved shipping price table"
        );
        Ok(table)
    }
}
