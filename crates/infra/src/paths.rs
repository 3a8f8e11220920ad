//! Default locations, overridable by environment variables.
//!
//! Precedence is: explicit path (CLI argument) > environment variable > default.

use std::path::{Path, PathBuf};

pub const CATALOG_CONFIG_ENV: &str = "STOREFRONT_CATALOG_CONFIG";
pub const CATALOG_PATH_ENV: &str = "STOREFRONT_CATALOG_PATH";
pub const SHIPPING_CONFIG_ENV: &str = "STOREFRONT_SHIPPING_CONFIG";

pub const DEFAULT_CATALOG_CONFIG: &str = "config/catalog.json";
pub const DEFAULT_CATALOG_PATH: &str = "generated/catalog.json";
pub const DEFAULT_SHIPPING_CONFIG: &str = "config/shipping.json";

fn resolve(explicit: Option<&Path>, env_key: &str, default: &str) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    match std::env::var_os(env_key) {
        Some(value) if !value.is_empty() => PathBuf::from(value),
        _ => PathBuf::from(default),
    }
}

pub fn catalog_config_path(explicit: Option<&Path>) -> PathBuf {
    resolve(explicit, CATALOG_CONFIG_ENV, DEFAULT_CATALOG_CONFIG)
}

pub fn catalog_path(explicit: Option<&Path>) -> PathBuf {
    resolve(explicit, CATALOG_PATH_ENV, DEFAULT_CATALOG_PATH)
}

pub fn shipping_config_path(explicit: Option<&Path>) -> PathBuf {
    resolve(explicit, SHIPPING_CONFIG_ENV, DEFAULT_SHIPPING_CONFIG)
}
