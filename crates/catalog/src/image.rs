//! Image URL fallback rule.
//!
//! Authored image URLs that point at a placeholder service are treated as absent.
//! The generator drops them; the display layer replaces absent URLs with the
//! per-variant generated asset path.

use crate::variant::CatalogVariant;

/// Hosts (and their subdomains) that only ever serve stand-in images.
pub const PLACEHOLDER_HOSTS: &[&str] = &[
    "placehold.co",
    "placehold.it",
    "placeholder.com",
    "dummyimage.com",
    "picsum.photos",
];

/// Generated asset path prefix for variants without a real image.
pub const GENERATED_IMAGE_PREFIX: &str = "/images/catalog/";

fn host_of(url: &str) -> Option<&str> {
    let rest = url.split_once("://").map(|(_, rest)| rest).or_else(|| url.strip_prefix("//"))?;
    let authority = rest.split(['/', '?', '#']).next()?;
    let host_port = authority.rsplit_once('@').map_or(authority, |(_, h)| h);
    let host = host_port.split(':').next()?;
    (!host.is_empty()).then_some(host)
}

/// Whether `url` points at a placeholder host. Relative paths never do.
pub fn is_placeholder_url(url: &str) -> bool {
    let Some(host) = host_of(url.trim()) else {
        return false;
    };
    let host = host.to_ascii_lowercase();
    PLACEHOLDER_HOSTS.iter().any(|p| {
        host == *p
            || host
                .strip_suffix(p)
                .is_some_and(|prefix| prefix.ends_with('.'))
    })
}

/// Keep an authored URL only if it is non-blank and not a placeholder.
pub fn authored_image_url(url: Option<&str>) -> Option<String> {
    let url = url?.trim();
    if url.is_empty() || is_placeholder_url(url) {
        return None;
    }
    Some(url.to_owned())
}

/// URL the storefront should render for `variant`.
pub fn display_image_url(variant: &CatalogVariant) -> String {
    match authored_image_url(variant.image_url.as_deref()) {
        Some(url) => url,
        None => format!("{GENERATED_IMAGE_PREFIX}{}.webp", variant.id),
    }
}
