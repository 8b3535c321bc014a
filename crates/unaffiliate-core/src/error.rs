//! URL parse error shared by the classifier and the normalizer.
//!
//! Neither caller propagates it: classification falls back to `false` and
//! normalization falls back to the unchanged input. The type exists so the
//! failure can be logged with its input and cause before it is swallowed.

use url::Url;

#[derive(Debug, thiserror::Error)]
pub enum UrlError {
    /// The input is not an absolute URL (relative hrefs, plain text, ...).
    #[error("invalid URL {input:?}: {source}")]
    Parse {
        input: String,
        #[source]
        source: url::ParseError,
    },
}

/// Parse `input` as an absolute URL.
pub fn parse_url(input: &str) -> Result<Url, UrlError> {
    Url::parse(input).map_err(|source| UrlError::Parse {
        input: input.to_string(),
        source,
    })
}
