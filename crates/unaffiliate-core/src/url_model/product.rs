//! Product identifier extraction from `/dp/` and `/gp/product/` paths.

use serde::{Deserialize, Serialize};

const DP_MARKER: &str = "/dp/";
const GP_MARKER: &str = "/gp/";
const GP_PRODUCT_PREFIX: &str = "/gp/product/";

/// How a `/gp/` path is sliced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GpMode {
    /// Skip `/gp/product/`.len() bytes from the first `/gp/`, whatever follows it.
    #[default]
    Positional,
    /// Only slice when the path really continues with `/gp/product/`.
    Strict,
}

/// A recognized product page and its identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductPath<'a> {
    Dp(&'a str),
    GpProduct(&'a str),
}

impl<'a> ProductPath<'a> {
    /// Path prefix the canonical URL is rebuilt with.
    pub fn prefix(&self) -> &'static str {
        match self {
            ProductPath::Dp(_) => DP_MARKER,
            ProductPath::GpProduct(_) => GP_PRODUCT_PREFIX,
        }
    }

    pub fn id(&self) -> &'a str {
        match *self {
            ProductPath::Dp(id) | ProductPath::GpProduct(id) => id,
        }
    }
}

/// Finds the product identifier in a URL path.
///
/// `/dp/` is checked first; when it is present `/gp/` is never consulted,
/// even if the `/dp/` identifier turns out empty.
pub fn product_path(path: &str, gp_mode: GpMode) -> Option<ProductPath<'_>> {
    if let Some(idx) = path.find(DP_MARKER) {
        let id = first_segment(&path[idx + DP_MARKER.len()..]);
        return (!id.is_empty()).then_some(ProductPath::Dp(id));
    }

    if let Some(idx) = path.find(GP_MARKER) {
        if gp_mode == GpMode::Strict && !path[idx..].starts_with(GP_PRODUCT_PREFIX) {
            return None;
        }
        let id = path
            .get(idx + GP_PRODUCT_PREFIX.len()..)
            .map(first_segment)
            .unwrap_or("");
        return (!id.is_empty()).then_some(ProductPath::GpProduct(id));
    }

    None
}

fn first_segment(rest: &str) -> &str {
    rest.split('/').next().unwrap_or("")
}
