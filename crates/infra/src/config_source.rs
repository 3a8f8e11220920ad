//! Catalog config loader.

use std::path::Path;

use storefront_catalog::CatalogConfig;
use storefront_core::DomainError;

use crate::error::{InfraError, InfraResult};

/// Read and parse a [`CatalogConfig`].
///
/// Malformed JSON is reported as a [`DomainError::Config`], the same kind the
/// generator uses for structurally invalid input.
pub fn load_catalog_config(path: &Path) -> InfraResult<CatalogConfig> {
    let raw = std::fs::read_to_string(path).map_err(|e| InfraError::io(path, e))?;
    let config: CatalogConfig = serde_json::from_str(&raw)
        .map_err(|e| DomainError::config(format!("{}: {e}", path.display())))?;
    tracing::info!(
        path = %path.display(),
        families = config.families.len(),
        "loaded catalog config"
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_valid_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "families": [ {{ "id": "gloves", "name": "Gloves", "base_price_usd_cents": 900,
                "packs": [ {{ "quantity": 10 }} ] }} ] }}"#
        )
        .unwrap();
        let config = load_catalog_config(file.path()).unwrap();
        assert_eq!(config.families.len(), 1);
        assert_eq!(config.families[0].id.as_str(), "gloves");
    }

    #[test]
    fn malformed_json_is_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "families": [ "#).unwrap();
        match load_catalog_config(file.path()).unwrap_err() {
            InfraError::Domain(DomainError::Config(_)) => {}
            other => panic!("Expected Config error, got {other:?}"),
        }
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_catalog_config(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, InfraError::Io { .. }));
    }
}
