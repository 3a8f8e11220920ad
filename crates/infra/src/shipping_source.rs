//! Shipping config loader.

use std::path::Path;

use storefront_core::DomainError;
use storefront_shipping::ShippingConfig;

use crate::error::{InfraError, InfraResult};

pub fn load_shipping_config(path: &Path) -> InfraResult<ShippingConfig> {
    let raw = std::fs::read_to_string(path).map_err(|e| InfraError::io(path, e))?;
    let config: ShippingConfig = serde_json::from_str(&raw)
        .map_err(|e| DomainError::config(format!("{}: {e}", path.display())))?;
    tracing::info!(
        path = %path.display(),
        active = %config.active,
        legacy_rows = config.legacy.rows.len(),
        zone_rules = config.zoned.rules.len(),
        "loaded shipping config"
    );
    Ok(config)
}
