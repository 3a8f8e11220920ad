//! `catalogctl`: offline catalog pipeline and shipping quote commands.
//!
//! - `generate [CONFIG] [OUT]`: load config, generate, validate, write the artifact.
//! - `validate [CATALOG] [--shipping PATH]`: re-validate a written artifact,
//!   optionally checking every variant's band has a rate.
//! - `quote VARIANT[=QTY]...`: price a cart against the live shipping schema.
//!
//! Each command returns a one-line summary; any failure is an error and the
//! binary exits non-zero.

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use chrono::Utc;
use clap::{Args, Parser, Subcommand};

use storefront_catalog::{CartLine, Catalog, generate, quote_cart, validate_all};
use storefront_core::{DomainError, VariantId};
use storefront_infra::{CatalogArtifact, load_catalog, load_catalog_config, load_shipping_config, read_catalog, write_catalog};
use storefront_infra::paths;
use storefront_shipping::{Destination, ShippingConfig, ShippingSchema, Zone};

#[derive(Debug, Parser)]
#[command(name = "catalogctl")]
#[command(about = "Generate, validate and quote the storefront catalog")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Expand the catalog config into the generated catalog artifact
    Generate(GenerateArgs),
    /// Check a generated catalog artifact against the catalog invariants
    Validate(ValidateArgs),
    /// Compute the shipping charge for a cart
    Quote(QuoteArgs),
}

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Catalog config (default: $STOREFRONT_CATALOG_CONFIG or config/catalog.json)
    pub config: Option<PathBuf>,
    /// Output artifact (default: $STOREFRONT_CATALOG_PATH or generated/catalog.json)
    pub out: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Catalog artifact (default: $STOREFRONT_CATALOG_PATH or generated/catalog.json)
    pub catalog: Option<PathBuf>,
    /// Also check that every variant's band has a rate in this shipping config
    #[arg(long)]
    pub shipping: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct QuoteArgs {
    /// Catalog artifact (default: $STOREFRONT_CATALOG_PATH or generated/catalog.json)
    #[arg(long)]
    pub catalog: Option<PathBuf>,
    /// Shipping config (default: $STOREFRONT_SHIPPING_CONFIG or config/shipping.json)
    #[arg(long)]
    pub shipping: Option<PathBuf>,
    /// Destination zone: domestic, north_america or international
    #[arg(long, default_value = "domestic")]
    pub zone: Zone,
    /// Carrier whose overrides apply
    #[arg(long)]
    pub carrier: Option<String>,
    /// Print the quote as JSON instead of a summary line
    #[arg(long)]
    pub json: bool,
    /// Cart lines as VARIANT_ID or VARIANT_ID=QTY
    #[arg(required = true, value_parser = parse_cart_line)]
    pub lines: Vec<CartLine>,
}

fn parse_cart_line(raw: &str) -> Result<CartLine, String> {
    let (id, qty) = match raw.split_once('=') {
        Some((id, qty)) => {
            let qty = qty
                .parse::<u32>()
                .map_err(|e| format!("invalid quantity in {raw:?}: {e}"))?;
            (id, qty)
        }
        None => (raw, 1),
    };
    let id: VariantId = id.parse().map_err(|e: DomainError| e.to_string())?;
    Ok(CartLine::new(id, qty))
}

pub fn run(cli: Cli) -> anyhow::Result<String> {
    match cli.command {
        Command::Generate(args) => run_generate(args),
        Command::Validate(args) => run_validate(args),
        Command::Quote(args) => run_quote(args),
    }
}

pub fn run_generate(args: GenerateArgs) -> anyhow::Result<String> {
    let config_path = paths::catalog_config_path(args.config.as_deref());
    let out_path = paths::catalog_path(args.out.as_deref());
    ensure_distinct(&config_path, &out_path)?;

    let config = load_catalog_config(&config_path)
        .with_context(|| format!("failed to load catalog config {}", config_path.display()))?;
    let variants = generate(&config)
        .with_context(|| format!("failed to generate catalog from {}", config_path.display()))?;
    let count = variants.len();

    let artifact = CatalogArtifact::new(variants, config.exchange_rate.clone(), Utc::now());
    write_catalog(&out_path, &artifact)
        .with_context(|| format!("failed to write catalog {}", out_path.display()))?;

    Ok(format!("generated {count} variants -> {}", out_path.display()))
}

pub fn run_validate(args: ValidateArgs) -> anyhow::Result<String> {
    let catalog_path = paths::catalog_path(args.catalog.as_deref());
    let artifact = read_catalog(&catalog_path)
        .with_context(|| format!("failed to read catalog {}", catalog_path.display()))?;

    let failures = validate_all(&artifact.variants);
    if let Some(first) = failures.first().cloned() {
        for failure in failures.iter().skip(1) {
            eprintln!("  also: {}", DomainError::from(failure.clone()));
        }
        return Err(anyhow::Error::new(DomainError::from(first)).context(format!(
            "catalog {} failed validation ({} violation(s))",
            catalog_path.display(),
            failures.len()
        )));
    }

    let count = artifact.variants.len();
    if let Some(shipping) = args.shipping.as_deref() {
        let catalog = Catalog::new(artifact.variants)?;
        let shipping_config = load_shipping_config(shipping)
            .with_context(|| format!("failed to load shipping config {}", shipping.display()))?;
        check_rates_cover_catalog(&catalog, &shipping_config)
            .with_context(|| format!("catalog {} has bands without rates", catalog_path.display()))?;
    }

    Ok(format!("validated {count} variants in {}", catalog_path.display()))
}

/// Orphan-band check: under both schemas, live or not, every zone must price
/// every band the catalog can produce. Carrier overrides are not consulted, so a
/// carrier may still exclude a band on purpose.
pub fn check_rates_cover_catalog(catalog: &Catalog, shipping: &ShippingConfig) -> anyhow::Result<()> {
    for schema in ShippingSchema::ALL {
        let bands = catalog
            .variants()
            .iter()
            .map(|v| v.band(schema))
            .collect::<Result<Vec<_>, _>>()?;
        for zone in Zone::ALL {
            let prices = shipping.price_table_for(schema, &Destination::new(zone))?;
            prices
                .ensure_covers(bands.iter().copied())
                .with_context(|| format!("{schema} shipping table has no rate in zone {zone}"))?;
        }
    }
    Ok(())
}

pub fn run_quote(args: QuoteArgs) -> anyhow::Result<String> {
    let catalog_path = paths::catalog_path(args.catalog.as_deref());
    let shipping_path = paths::shipping_config_path(args.shipping.as_deref());

    let catalog = load_catalog(&catalog_path)
        .with_context(|| format!("failed to load catalog {}", catalog_path.display()))?;
    let shipping = load_shipping_config(&shipping_path)
        .with_context(|| format!("failed to load shipping config {}", shipping_path.display()))?;

    let mut destination = Destination::new(args.zone);
    if let Some(carrier) = args.carrier {
        destination = destination.with_carrier(carrier);
    }
    let prices = shipping.price_table(&destination)?;
    let quote = quote_cart(&catalog, &args.lines, shipping.active, &prices)
        .context("failed to compute shipping")?;

    if args.json {
        return Ok(serde_json::to_string(&quote)?);
    }
    Ok(format!(
        "shipping: base {} surcharge {} total {} (USD cents)",
        quote.base_price_usd_cents.get(),
        quote.surcharge_usd_cents.get(),
        quote.total_usd_cents.get()
    ))
}

/// Reject a path that would write the artifact over its own config.
pub fn ensure_distinct(config: &Path, out: &Path) -> anyhow::Result<()> {
    if config == out {
        bail!("output path {} is the config path", out.display());
    }
    Ok(())
}
