//! Catalog Generator: `CatalogConfig` → ordered variant sequence.
//!
//! Pure and deterministic. Families are expanded in config order; within a family
//! the Cartesian product runs with the first declared axis outermost and the pack
//! axis innermost, so listings stay visually stable across regenerations.

use storefront_core::{DomainError, DomainResult, Multiplier, PackQuantity, VariantId, repeated_positions};

use crate::config::{AxisValue, CatalogConfig, ProductFamily};
use crate::image::authored_image_url;
use crate::variant::{CatalogVariant, VariantOption};

/// Expand `config` into every sellable variant.
///
/// Malformed config fails with [`DomainError::Config`] before anything is
/// produced; there is no partial output.
pub fn generate(config: &CatalogConfig) -> DomainResult<Vec<CatalogVariant>> {
    config.check()?;

    let mut variants = Vec::new();
    for family in &config.families {
        let alternate = match &family.alternate_family {
            Some(alt_id) => config.families.iter().find(|f| &f.id == alt_id),
            None => None,
        };
        expand_family(family, alternate, &mut variants)?;
    }

    // Slug joins can make distinct combinations collide (family `a-b` with no
    // axes vs. family `a` with code `b`).
    if let Some(&pos) = repeated_positions(&variants).first() {
        let id = &variants[pos].id;
        let first = variants.iter().position(|v| &v.id == id).unwrap_or(pos);
        return Err(DomainError::config(format!(
            "variant id {id} is derived by more than one combination (families {} and {})",
            variants[first].family_id, variants[pos].family_id
        )));
    }

    tracing::debug!(
        families = config.families.len(),
        variants = variants.len(),
        "expanded catalog config"
    );
    Ok(variants)
}

fn expand_family(
    family: &ProductFamily,
    alternate: Option<&ProductFamily>,
    out: &mut Vec<CatalogVariant>,
) -> DomainResult<()> {
    let image_url = authored_image_url(family.image_url.as_deref());
    if family.image_url.is_some() && image_url.is_none() {
        tracing::debug!(family = %family.id, "dropping placeholder image url");
    }

    for combo in combinations(family) {
        for pack in &family.packs {
            let codes: Vec<String> = combo
                .iter()
                .map(|v| v.code.clone())
                .chain(std::iter::once(pack.quantity.code()))
                .collect();
            let id = VariantId::derive(&family.id, codes.iter().map(String::as_str))
                .map_err(|e| DomainError::config(format!("family {}: {e}", family.id)))?;
            let alternate_id = match alternate {
                Some(alt) => Some(
                    VariantId::derive(&alt.id, codes.iter().map(String::as_str))
                        .map_err(|e| DomainError::config(format!("family {}: {e}", alt.id)))?,
                ),
                None => None,
            };

            let multipliers: Vec<Multiplier> = combo
                .iter()
                .map(|v| v.multiplier)
                .chain(std::iter::once(pack.multiplier))
                .collect();
            let price = family
                .base_price_usd_cents
                .scaled(&multipliers)
                .map_err(|e| DomainError::config(format!("variant {id}: {e}")))?;

            let options = family
                .axes
                .iter()
                .zip(combo.iter())
                .map(|(axis, value)| VariantOption {
                    axis: axis.name.clone(),
                    code: value.code.clone(),
                    label: value.label.clone(),
                })
                .collect();

            out.push(CatalogVariant {
                name: variant_name(&family.name, &combo, pack.quantity),
                id,
                family_id: family.id.clone(),
                jis_standard: family.jis_standard.clone(),
                options,
                pack: pack.quantity,
                price_usd_cents: price,
                image_url: image_url.clone(),
                alternate_id,
            });
        }
    }
    Ok(())
}

/// Cartesian product of the family's descriptive axes, first axis outermost.
///
/// A family without descriptive axes yields one empty combination.
fn combinations(family: &ProductFamily) -> Vec<Vec<&AxisValue>> {
    let mut combos: Vec<Vec<&AxisValue>> = vec![Vec::new()];
    for axis in &family.axes {
        combos = combos
            .into_iter()
            .flat_map(|prefix| {
                axis.values.iter().map(move |value| {
                    let mut next = prefix.clone();
                    next.push(value);
                    next
                })
            })
            .collect();
    }
    combos
}

fn variant_name(family_name: &str, combo: &[&AxisValue], pack: PackQuantity) -> String {
    let mut parts: Vec<String> = combo.iter().map(|v| v.label.clone()).collect();
    parts.push(pack.to_string());
    format!("{} ({})", family_name.trim(), parts.join(", "))
}
