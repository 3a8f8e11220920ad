//! Generated catalog artifact: the file the storefront reads at request time.
//!
//! The writer refuses unvalidated input and replaces the target atomically (temp
//! file in the same directory, then rename), so a concurrent reader sees either
//! the previous generation or the new one, never a mix. Regenerations themselves
//! must still be serialized by the caller.

use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use storefront_catalog::{Catalog, CatalogVariant, validate};
use storefront_core::ExchangeRate;

use crate::error::{InfraError, InfraResult};

pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogArtifact {
    pub format_version: u32,
    pub generated_at: DateTime<Utc>,
    pub variant_count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exchange_rate: Option<ExchangeRate>,
    pub variants: Vec<CatalogVariant>,
}

impl CatalogArtifact {
    pub fn new(
        variants: Vec<CatalogVariant>,
        exchange_rate: Option<ExchangeRate>,
        generated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            format_version: FORMAT_VERSION,
            generated_at,
            variant_count: variants.len(),
            exchange_rate,
            variants,
        }
    }
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Validate `artifact` and atomically replace `path` with it.
pub fn write_catalog(path: &Path, artifact: &CatalogArtifact) -> InfraResult<()> {
    validate(&artifact.variants)?;
    if artifact.variant_count != artifact.variants.len() {
        return Err(InfraError::Corrupt {
            path: path.to_path_buf(),
            reason: format!(
                "variant_count {} does not match {} variants",
                artifact.variant_count,
                artifact.variants.len()
            ),
        });
    }

    let dir = parent_dir(path);
    std::fs::create_dir_all(&dir).map_err(|e| InfraError::io(&dir, e))?;

    let tmp = tempfile::NamedTempFile::new_in(&dir).map_err(|e| InfraError::io(&dir, e))?;
    {
        let mut writer = BufWriter::new(tmp.as_file());
        serde_json::to_writer_pretty(&mut writer, artifact).map_err(|e| InfraError::parse(path, e))?;
        writer.write_all(b"\n").map_err(|e| InfraError::io(tmp.path(), e))?;
        writer.flush().map_err(|e| InfraError::io(tmp.path(), e))?;
    }
    tmp.as_file().sync_all().map_err(|e| InfraError::io(tmp.path(), e))?;
    tmp.persist(path).map_err(|e| InfraError::io(path, e.error))?;

    tracing::info!(
        path = %path.display(),
        variants = artifact.variant_count,
        generated_at = %artifact.generated_at,
        "wrote catalog artifact"
    );
    Ok(())
}

/// Parse an artifact and check its envelope. Variants are not validated here.
pub fn read_catalog(path: &Path) -> InfraResult<CatalogArtifact> {
    let raw = std::fs::read_to_string(path).map_err(|e| InfraError::io(path, e))?;
    let artifact: CatalogArtifact = serde_json::from_str(&raw).map_err(|e| InfraError::parse(path, e))?;

    if artifact.format_version != FORMAT_VERSION {
        return Err(InfraError::Corrupt {
            path: path.to_path_buf(),
            reason: format!(
                "format_version {} is not supported (expected {FORMAT_VERSION})",
                artifact.format_version
            ),
        });
    }
    if artifact.variant_count != artifact.variants.len() {
        return Err(InfraError::Corrupt {
            path: path.to_path_buf(),
            reason: format!(
                "header says {} variants, file has {}",
                artifact.variant_count,
                artifact.variants.len()
            ),
        });
    }
    Ok(artifact)
}

/// Read, validate and index an artifact for request-time use.
pub fn load_catalog(path: &Path) -> InfraResult<Catalog> {
    let artifact = read_catalog(path)?;
    let catalog = Catalog::new(artifact.variants)?;
    let catalog = match artifact.exchange_rate {
        Some(rate) => catalog.with_exchange_rate(rate)?,
        None => catalog,
    };
    tracing::info!(path = %path.display(), variants = catalog.len(), "loaded catalog");
    Ok(catalog)
}
