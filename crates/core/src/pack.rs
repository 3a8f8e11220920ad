//! Pack attribute: how many pieces a sellable unit contains.

use serde::{Deserialize, Serialize};

/// Pieces per pack. Drives shipping-band classification.
///
/// Any `u32` can be authored; whether a quantity is sellable is decided by the
/// band mapping, not here.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackQuantity(pub u32);

impl PackQuantity {
    pub fn new(pieces: u32) -> Self {
        Self(pieces)
    }

    pub fn pieces(self) -> u32 {
        self.0
    }

    /// Axis code used when deriving variant ids (`10pcs`).
    pub fn code(self) -> String {
        format!("{}pcs", self.0)
    }
}

impl core::fmt::Display for PackQuantity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} pcs", self.0)
    }
}
