//! Strongly-typed identifiers used across the catalog.
//!
//! Identifiers are lowercase slugs (`[a-z0-9-]`, no leading/trailing or doubled
//! hyphen). They are derived deterministically at generation time and referenced
//! by carts and orders placed against older generations, so they must never
//! depend on anything but the authoring input.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of a product family (authoring unit in the catalog config).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FamilyId(String);

/// Identifier of a sellable catalog variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VariantId(String);

fn check_slug(s: &str, name: &str) -> Result<(), DomainError> {
    if s.is_empty() {
        return Err(DomainError::invalid_id(format!("{name}: empty")));
    }
    if let Some(c) = s
        .chars()
        .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-'))
    {
        return Err(DomainError::invalid_id(format!(
            "{name}: {s:?} contains {c:?} (allowed: a-z, 0-9, '-')"
        )));
    }
    if s.starts_with('-') || s.ends_with('-') || s.contains("--") {
        return Err(DomainError::invalid_id(format!(
            "{name}: {s:?} has a stray hyphen"
        )));
    }
    Ok(())
}

macro_rules! impl_slug_newtype {
    ($t:ty, $name:literal) => {
        impl $t {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                check_slug(s, $name)?;
                Ok(Self(s.to_owned()))
            }
        }

        impl TryFrom<String> for $t {
            type Error = DomainError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                check_slug(&value, $name)?;
                Ok(Self(value))
            }
        }

        impl From<$t> for String {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl AsRef<str> for $t {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

impl_slug_newtype!(FamilyId, "FamilyId");
impl_slug_newtype!(VariantId, "VariantId");

impl VariantId {
    /// Derive a variant id from its family and the ordered axis codes of one
    /// combination (pack quantity last).
    ///
    /// Codes are lowercased; anything outside `[a-z0-9]` collapses into a single
    /// hyphen so the result is always a valid slug.
    pub fn derive<'a>(
        family: &FamilyId,
        codes: impl IntoIterator<Item = &'a str>,
    ) -> Result<Self, DomainError> {
        let mut out = family.as_str().to_owned();
        for code in codes {
            let slug = slugify(code);
            if slug.is_empty() {
                return Err(DomainError::invalid_id(format!(
                    "VariantId: axis code {code:?} has no usable characters"
                )));
            }
            out.push('-');
            out.push_str(&slug);
        }
        out.parse()
    }
}

/// Lowercase `s` and collapse runs of non-alphanumerics into one hyphen.
pub fn slugify(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut pending_hyphen = false;
    for c in s.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !out.is_empty() {
                out.push('-');
            }
            pending_hyphen = false;
            out.push(c.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }
    out
}
