//! End-to-end tests for `catalogctl` commands against the shipped sample configs.

use std::path::{Path, PathBuf};

use clap::Parser;

use storefront_cli::{Cli, run};
use storefront_infra::{read_catalog, write_catalog};

fn repo_config(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../config")
        .join(name)
}

fn run_args(args: &[&str]) -> anyhow::Result<String> {
    let mut argv = vec!["catalogctl"];
    argv.extend_from_slice(args);
    run(Cli::try_parse_from(argv)?)
}

fn path_str(path: &Path) -> &str {
    path.to_str().expect("utf-8 temp path")
}

/// Generate the sample catalog into a temp dir and return its path.
fn generated(dir: &tempfile::TempDir) -> PathBuf {
    let out = dir.path().join("catalog.json");
    let config = repo_config("catalog.json");
    run_args(&["generate", path_str(&config), path_str(&out)]).expect("generate sample catalog");
    out
}

#[test]
fn generate_prints_count_and_path() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out").join("catalog.json");
    let config = repo_config("catalog.json");

    let summary = run_args(&["generate", path_str(&config), path_str(&out)]).unwrap();
    assert_eq!(summary, format!("generated 28 variants -> {}", out.display()));

    let artifact = read_catalog(&out).unwrap();
    assert_eq!(artifact.variant_count, 28);
    assert_eq!(artifact.variants[0].id.as_str(), "nitrile-gloves-s-10pcs");
}

#[test]
fn generate_twice_yields_identical_variants() {
    let dir = tempfile::tempdir().unwrap();
    let out = generated(&dir);
    let first = read_catalog(&out).unwrap().variants;
    let out = generated(&dir);
    let second = read_catalog(&out).unwrap().variants;
    assert_eq!(first, second);
}

#[test]
fn sample_placeholder_image_is_dropped() {
    let dir = tempfile::tempdir().unwrap();
    let artifact = read_catalog(&generated(&dir)).unwrap();
    let latex = artifact
        .variants
        .iter()
        .find(|v| v.id.as_str() == "latex-gloves-m-10pcs")
        .unwrap();
    assert!(latex.image_url.is_none());
}

#[test]
fn validate_accepts_generated_catalog_and_sample_rates() {
    let dir = tempfile::tempdir().unwrap();
    let out = generated(&dir);
    let shipping = repo_config("shipping.json");

    let summary = run_args(&["validate", path_str(&out), "--shipping", path_str(&shipping)]).unwrap();
    assert_eq!(summary, format!("validated 28 variants in {}", out.display()));
}

#[test]
fn validate_rejects_tampered_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let out = generated(&dir);

    let mut artifact = read_catalog(&out).unwrap();
    let dup = artifact.variants[3].clone();
    artifact.variants.push(dup);
    artifact.variant_count += 1;
    std::fs::write(&out, serde_json::to_string(&artifact).unwrap()).unwrap();

    let err = run_args(&["validate", path_str(&out)]).unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("unique_id"), "{message}");
    assert!(message.contains("nitrile-gloves-s-100pcs"), "{message}");
}

#[test]
fn validate_reports_orphan_band() {
    let dir = tempfile::tempdir().unwrap();
    let out = generated(&dir);
    let shipping = dir.path().join("shipping.json");
    std::fs::write(
        &shipping,
        r#"{ "active": "legacy", "legacy": { "rows": [ { "band": "BAND_A", "price_usd_cents": 1800 } ] } }"#,
    )
    .unwrap();

    let err = run_args(&["validate", path_str(&out), "--shipping", path_str(&shipping)]).unwrap_err();
    assert!(format!("{err:#}").contains("missing shipping rate for band BAND_B"));
}

#[test]
fn validate_checks_the_inactive_schema_too() {
    let dir = tempfile::tempdir().unwrap();
    let out = generated(&dir);
    let shipping = dir.path().join("shipping.json");
    std::fs::write(
        &shipping,
        r#"{
            "active": "current",
            "legacy": { "rows": [ { "band": "BAND_A", "price_usd_cents": 1800 } ] },
            "zoned": { "rules": [
                { "band": "BAND_A_10PCS", "price_usd_cents": 1800 },
                { "band": "BAND_B_20PCS", "price_usd_cents": 2800 },
                { "band": "BAND_C_50PCS", "price_usd_cents": 3600 },
                { "band": "BAND_D_100PCS", "price_usd_cents": 5200 }
            ] }
        }"#,
    )
    .unwrap();

    let err = run_args(&["validate", path_str(&out), "--shipping", path_str(&shipping)]).unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("legacy shipping table"), "{message}");
    assert!(message.contains("missing shipping rate for band BAND_B"), "{message}");
}

#[test]
fn writer_never_persists_an_empty_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("catalog.json");
    let artifact = storefront_infra::CatalogArtifact::new(Vec::new(), None, chrono::Utc::now());
    assert!(write_catalog(&out, &artifact).is_err());
    assert!(!out.exists());
}

#[test]
fn generate_fails_on_malformed_config() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("catalog.json");
    let out = dir.path().join("generated.json");
    std::fs::write(&config, r#"{ "families": [] }"#).unwrap();

    let err = run_args(&["generate", path_str(&config), path_str(&out)]).unwrap_err();
    assert!(format!("{err:#}").contains("no product families"));
    assert!(!out.exists());
}

#[test]
fn generate_refuses_to_overwrite_its_config() {
    let config = repo_config("catalog.json");
    let err = run_args(&["generate", path_str(&config), path_str(&config)]).unwrap_err();
    assert!(format!("{err:#}").contains("is the config path"));
}

#[test]
fn quote_prices_cart_at_max_band_plus_surcharge() {
    let dir = tempfile::tempdir().unwrap();
    let out = generated(&dir);
    let shipping = repo_config("shipping.json");

    let summary = run_args(&[
        "quote",
        "--catalog",
        path_str(&out),
        "--shipping",
        path_str(&shipping),
        "nitrile-gloves-m-10pcs=3",
        "nitrile-gloves-m-20pcs",
        "latex-gloves-s-10pcs=2",
    ])
    .unwrap();
    assert_eq!(summary, "shipping: base 2800 surcharge 500 total 3300 (USD cents)");
}

#[test]
fn quote_applies_zone_and_carrier() {
    let dir = tempfile::tempdir().unwrap();
    let out = generated(&dir);
    let shipping = repo_config("shipping.json");

    let summary = run_args(&[
        "quote",
        "--catalog",
        path_str(&out),
        "--shipping",
        path_str(&shipping),
        "--zone",
        "international",
        "--carrier",
        "express",
        "--json",
        "surgical-masks-class-1-20pcs",
    ])
    .unwrap();
    let quote: serde_json::Value = serde_json::from_str(&summary).unwrap();
    assert_eq!(quote["base_price_usd_cents"], 6800);
    assert_eq!(quote["surcharge_usd_cents"], 0);
    assert_eq!(quote["total_usd_cents"], 6800);
}

#[test]
fn quote_fails_when_carrier_excludes_a_band() {
    let dir = tempfile::tempdir().unwrap();
    let out = generated(&dir);
    let shipping = repo_config("shipping.json");

    let err = run_args(&[
        "quote",
        "--catalog",
        path_str(&out),
        "--shipping",
        path_str(&shipping),
        "--carrier",
        "economy",
        "nitrile-gloves-l-100pcs",
    ])
    .unwrap_err();
    assert!(format!("{err:#}").contains("missing shipping rate for band BAND_D_100PCS"));
}

#[test]
fn quote_rejects_bad_arguments() {
    assert!(run_args(&["quote", "Not-A-Slug"]).is_err());
    assert!(run_args(&["quote", "--zone", "mars", "nitrile-gloves-m-10pcs"]).is_err());
    assert!(run_args(&["quote", "nitrile-gloves-m-10pcs=lots"]).is_err());
}

#[test]
fn binary_reports_a_failure_once_and_exits_non_zero() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.json");
    let out = dir.path().join("catalog.json");

    let output = std::process::Command::new(env!("CARGO_BIN_EXE_catalogctl"))
        .args(["generate", path_str(&missing), path_str(&out)])
        .env("RUST_LOG", "debug")
        .output()
        .expect("run catalogctl");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.matches("failed to load catalog config").count(), 1, "{stderr}");
    assert!(stderr.contains("error: failed to load catalog config"), "{stderr}");
}
