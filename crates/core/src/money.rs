//! Money value objects: USD cents, fixed-point multipliers, exchange rate.
//!
//! All arithmetic is integer. Multipliers authored as JSON numbers are snapped to
//! the nearest 1/10 000 once, at load time, and every later rounding step uses
//! round-half-up on whole units. Identical input therefore always yields identical
//! cents, no matter how many times the catalog is regenerated.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{DomainError, DomainResult};

/// Fixed-point scale used by [`Multiplier`] and [`ExchangeRate`].
pub const BASIS_POINTS: i64 = 10_000;

/// Integer division rounding half away from zero (i.e. half-up for non-negative input).
pub fn div_round_half_up(numerator: u128, denominator: u128) -> u128 {
    debug_assert!(denominator > 0);
    (numerator + denominator / 2) / denominator
}

/// Amount in US cents.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UsdCents(pub u64);

impl UsdCents {
    pub const ZERO: UsdCents = UsdCents(0);

    pub fn new(cents: u64) -> Self {
        Self(cents)
    }

    pub fn get(self) -> u64 {
        self.0
    }

    pub fn is_positive(self) -> bool {
        self.0 > 0
    }

    pub fn checked_add(self, other: UsdCents) -> DomainResult<UsdCents> {
        self.0
            .checked_add(other.0)
            .map(UsdCents)
            .ok_or_else(|| DomainError::config(format!("amount overflow: {self} + {other}")))
    }

    pub fn checked_mul(self, factor: u64) -> DomainResult<UsdCents> {
        self.0
            .checked_mul(factor)
            .map(UsdCents)
            .ok_or_else(|| DomainError::config(format!("amount overflow: {self} x {factor}")))
    }

    /// Apply a chain of multipliers and round once, half-up, to whole cents.
    ///
    /// Rounding happens after the full product so intermediate steps never lose
    /// precision.
    pub fn scaled<'a>(self, multipliers: impl IntoIterator<Item = &'a Multiplier>) -> DomainResult<UsdCents> {
        let mut numerator = u128::from(self.0);
        let mut denominator: u128 = 1;
        for m in multipliers {
            let bp = m.checked_basis_points()?;
            numerator = numerator
                .checked_mul(bp as u128)
                .ok_or_else(|| DomainError::config("price computation overflow"))?;
            denominator = denominator
                .checked_mul(BASIS_POINTS as u128)
                .ok_or_else(|| DomainError::config("price computation overflow"))?;
        }
        let cents = div_round_half_up(numerator, denominator);
        u64::try_from(cents)
            .map(UsdCents)
            .map_err(|_| DomainError::config("price computation overflow"))
    }
}

impl core::fmt::Display for UsdCents {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "${}.{:02}", self.0 / 100, self.0 % 100)
    }
}

/// Price multiplier in basis points (1.0 == 10 000).
///
/// Authored as a JSON number; serialized back as one.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Multiplier(i64);

impl Multiplier {
    pub const ONE: Multiplier = Multiplier(BASIS_POINTS);

    pub fn from_basis_points(bp: i64) -> Self {
        Self(bp)
    }

    /// Snap a float to the nearest basis point. Non-finite input is rejected.
    pub fn from_f64(value: f64) -> DomainResult<Self> {
        if !value.is_finite() {
            return Err(DomainError::config(format!("multiplier {value} is not finite")));
        }
        let scaled = (value * BASIS_POINTS as f64).round();
        if scaled.abs() > i64::MAX as f64 {
            return Err(DomainError::config(format!("multiplier {value} is out of range")));
        }
        Ok(Self(scaled as i64))
    }

    pub fn basis_points(self) -> i64 {
        self.0
    }

    pub fn as_f64(self) -> f64 {
        self.0 as f64 / BASIS_POINTS as f64
    }

    /// Basis points as an unsigned factor; zero or negative is a config error.
    pub fn checked_basis_points(self) -> DomainResult<u64> {
        if self.0 <= 0 {
            return Err(DomainError::config(format!(
                "multiplier {} must be positive",
                self.as_f64()
            )));
        }
        Ok(self.0 as u64)
    }
}

impl Default for Multiplier {
    fn default() -> Self {
        Self::ONE
    }
}

impl Serialize for Multiplier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_f64())
    }
}

impl<'de> Deserialize<'de> for Multiplier {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = f64::deserialize(deserializer)?;
        Multiplier::from_f64(raw).map_err(serde::de::Error::custom)
    }
}

/// The single stored USD → display-currency rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExchangeRate {
    /// ISO currency code of the display currency (e.g. "JPY").
    pub currency: String,
    /// Display-currency units per 1 USD.
    pub per_usd: Multiplier,
    /// Decimal places of the display currency (JPY: 0, EUR: 2).
    #[serde(default = "default_minor_units")]
    pub minor_units: u8,
}

fn default_minor_units() -> u8 {
    2
}

impl ExchangeRate {
    pub fn check(&self) -> DomainResult<()> {
        if self.currency.trim().is_empty() {
            return Err(DomainError::config("exchange_rate.currency cannot be empty"));
        }
        if self.minor_units > 4 {
            return Err(DomainError::config(format!(
                "exchange_rate.minor_units {} is out of range (0..=4)",
                self.minor_units
            )));
        }
        self.per_usd.checked_basis_points()?;
        Ok(())
    }

    /// Convert USD cents to minor units of the display currency, rounding half-up.
    pub fn convert(&self, amount: UsdCents) -> DomainResult<u64> {
        let bp = self.per_usd.checked_basis_points()?;
        let minor_scale = 10u128.pow(u32::from(self.minor_units));
        let numerator = u128::from(amount.get()) * u128::from(bp) * minor_scale;
        let denominator = 100u128 * BASIS_POINTS as u128;
        u64::try_from(div_round_half_up(numerator, denominator))
            .map_err(|_| DomainError::config("currency conversion overflow"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(v: f64) -> Multiplier {
        Multiplier::from_f64(v).unwrap()
    }

    #[test]
    fn display_formats_dollars() {
        assert_eq!(UsdCents(1800).to_string(), "$18.00");
        assert_eq!(UsdCents(5).to_string(), "$0.05");
    }

    #[test]
    fn scaled_rounds_half_up_once() {
        // 1234 * 1.5 = 1851.0
        assert_eq!(UsdCents(1234).scaled(&[m(1.5)]).unwrap(), UsdCents(1851));
        // 1001 * 0.5 = 500.5 -> 501
        assert_eq!(UsdCents(1001).scaled(&[m(0.5)]).unwrap(), UsdCents(501));
        // 999 * 0.3333 = 332.9667 -> 333
        assert_eq!(UsdCents(999).scaled(&[m(0.3333)]).unwrap(), UsdCents(333));
    }

    #[test]
    fn scaled_chains_without_intermediate_rounding() {
        // 1001 * 0.25 = 250.25 -> 250; rounding after each step would give 251.
        assert_eq!(UsdCents(1001).scaled(&[m(0.5), m(0.5)]).unwrap(), UsdCents(250));
    }

    #[test]
    fn scaled_with_no_multipliers_is_identity() {
        assert_eq!(UsdCents(1200).scaled(&Vec::<Multiplier>::new()).unwrap(), UsdCents(1200));
    }

    #[test]
    fn non_positive_multiplier_is_config_error() {
        let err = UsdCents(100).scaled(&[m(0.0)]).unwrap_err();
        match err {
            DomainError::Config(_) => {}
            _ => panic!("Expected Config error for zero multiplier"),
        }
        assert!(UsdCents(100).scaled(&[m(-1.0)]).is_err());
    }

    #[test]
    fn multiplier_snaps_to_basis_points() {
        assert_eq!(m(1.9).basis_points(), 19_000);
        assert_eq!(m(1.23456).basis_points(), 12_346);
        assert!(Multiplier::from_f64(f64::NAN).is_err());
    }

    #[test]
    fn multiplier_deserializes_from_json_number() {
        let parsed: Multiplier = serde_json::from_str("1.25").unwrap();
        assert_eq!(parsed.basis_points(), 12_500);
        assert_eq!(serde_json::to_string(&parsed).unwrap(), "1.25");
    }

    #[test]
    fn exchange_rate_converts_to_minor_units() {
        let jpy = ExchangeRate {
            currency: "JPY".into(),
            per_usd: m(150.0),
            minor_units: 0,
        };
        assert_eq!(jpy.convert(UsdCents(1200)).unwrap(), 1800);

        let eur = ExchangeRate {
            currency: "EUR".into(),
            per_usd: m(0.9215),
            minor_units: 2,
        };
        // 12.00 USD * 0.9215 = 11.058 EUR -> 1106 cents
        assert_eq!(eur.convert(UsdCents(1200)).unwrap(), 1106);
    }

    #[test]
    fn exchange_rate_check_rejects_bad_values() {
        let bad = ExchangeRate {
            currency: " ".into(),
            per_usd: Multiplier::ONE,
            minor_units: 2,
        };
        assert!(bad.check().is_err());

        let zero = ExchangeRate {
            currency: "EUR".into(),
            per_usd: m(0.0),
            minor_units: 2,
        };
        assert!(zero.check().is_err());
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: multiplying by 1.0 never changes the amount.
            #[test]
            fn scaled_by_one_is_identity(cents in 0u64..10_000_000) {
                prop_assert_eq!(UsdCents(cents).scaled(&[Multiplier::ONE]).unwrap(), UsdCents(cents));
            }

            /// Property: the rounded result is within half a cent of the exact product.
            #[test]
            fn scaled_is_within_half_a_cent(cents in 0u64..10_000_000, bp in 1i64..50_000) {
                let got = UsdCents(cents).scaled(&[Multiplier::from_basis_points(bp)]).unwrap().get();
                let exact_times_bp = u128::from(cents) * bp as u128;
                let got_times_bp = u128::from(got) * BASIS_POINTS as u128;
                let diff = exact_times_bp.abs_diff(got_times_bp);
                prop_assert!(diff * 2 <= BASIS_POINTS as u128);
            }
        }
    }
}
