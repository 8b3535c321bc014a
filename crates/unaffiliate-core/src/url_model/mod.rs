//! URL normalization: canonical product URLs and affiliate tag removal.
//!
//! The transform is pure. Callers compare the result with their input (or use
//! [`Normalization::changed`]) and record the change themselves.

mod product;
mod query;

pub use product::{product_path, GpMode, ProductPath};
pub use query::{strip_affiliate_tag, AFFILIATE_PARAM};

use url::Url;

use crate::error::parse_url;

/// Outcome of normalizing one URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalization {
    pub cleaned_url: String,
    /// `cleaned_url != input`.
    pub changed: bool,
}

/// Stateless URL cleaner. Copy it freely into every call site.
#[derive(Debug, Clone, Copy, Default)]
pub struct Normalizer {
    gp_mode: GpMode,
}

impl Normalizer {
    pub fn new(gp_mode: GpMode) -> Self {
        Self { gp_mode }
    }

    pub fn gp_mode(&self) -> GpMode {
        self.gp_mode
    }

    /// Cleans `url`:
    ///
    /// 1. unparseable input is returned as is;
    /// 2. a product path (`/dp/<id>` or `/gp/product/<id>`) becomes
    ///    `scheme://host/<prefix><id>/` with no query;
    /// 3. otherwise every `tag` query pair is removed;
    /// 4. otherwise the input is returned as is.
    ///
    /// # Examples
    ///
    /// - `https://www.amazon.com/Some-Product/dp/B08N5WRWNW/ref=sr_1_1?tag=a-20` → `https://www.amazon.com/dp/B08N5WRWNW/`
    /// - `https://www.amazon.de/some/other/path?tag=xyz-21&ref=abc` → `https://www.amazon.de/some/other/path?ref=abc`
    pub fn clean_url(&self, url: &str) -> String {
        let mut parsed = match parse_url(url) {
            Ok(u) => u,
            Err(e) => {
                tracing::debug!("clean_url: {}", e);
                return url.to_string();
            }
        };

        if let Some(product) = product_path(parsed.path(), self.gp_mode) {
            return format!(
                "{}://{}{}{}/",
                parsed.scheme(),
                host_with_port(&parsed),
                product.prefix(),
                product.id()
            );
        }

        if strip_affiliate_tag(&mut parsed) {
            return parsed.to_string();
        }

        url.to_string()
    }

    pub fn normalize(&self, url: &str) -> Normalization {
        let cleaned_url = self.clean_url(url);
        let changed = cleaned_url != url;
        if changed {
            tracing::debug!(from = url, to = %cleaned_url, "normalized url");
        }
        Normalization {
            cleaned_url,
            changed,
        }
    }
}

/// Host plus an explicit, non-default port.
fn host_with_port(url: &Url) -> String {
    match (url.host_str(), url.port()) {
        (Some(host), Some(port)) => format!("{host}:{port}"),
        (Some(host), None) => host.to_string(),
        (None, _) => String::new(),
    }
}

/// [`Normalizer::clean_url`] with positional `/gp/` handling.
pub fn clean_url(url: &str) -> String {
    Normalizer::default().clean_url(url)
}

/// [`Normalizer::normalize`] with positional `/gp/` handling.
pub fn normalize(url: &str) -> Normalization {
    Normalizer::default().normalize(url)
}
