//! Shipping domain module.
//!
//! Band classification, price tables and the shipping cost calculator, implemented
//! purely as deterministic domain logic (no IO, no HTTP, no storage).

pub mod band;
pub mod calculator;
pub mod rates;

pub use band::{RECOGNIZED_PACKS, ShippingBand, ShippingSchema, band_for, is_recognized};
pub use calculator::{ADDITIONAL_BAND_SURCHARGE, ShippingQuote, compute_shipping};
pub use rates::{
    CarrierOverride, CarrierPolicy, Destination, LegacyRate, LegacyRateTable, PriceByBand,
    ShippingConfig, Zone, ZoneRateTable, ZoneRule,
};
