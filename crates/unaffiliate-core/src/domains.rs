//! Marketplace and shortener host classification.
//!
//! Both sets are matched against the parsed host. The default match is a
//! plain substring test, so `amazon.com.evil.example` counts as a marketplace
//! host; `HostMatch::Suffix` must be selected explicitly to tighten it.

use serde::{Deserialize, Serialize};

use crate::error::parse_url;

/// Amazon storefront hosts.
pub const MARKETPLACE_DOMAINS: &[&str] = &[
    "amazon.com",
    "amazon.co.jp",
    "amazon.co.uk",
    "amazon.de",
    "amazon.fr",
    "amazon.it",
    "amazon.es",
    "amazon.ca",
];

/// Known URL shorteners. Links to these are flagged, never resolved.
pub const SHORTENER_DOMAINS: &[&str] = &[
    "bit.ly",
    "tinyurl.com",
    "goo.gl",
    "amzn.to",
    "amzn.asia",
    "t.co",
    "buff.ly",
    "rebrand.ly",
    "cutt.ly",
    "shorturl.at",
    "rb.gy",
    "tiny.cc",
];

/// How a host is compared with a domain entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HostMatch {
    /// `host.contains(domain)`.
    #[default]
    Substring,
    /// Host equals the domain or ends with `.domain`.
    Suffix,
}

impl HostMatch {
    fn matches(self, host: &str, domain: &str) -> bool {
        match self {
            HostMatch::Substring => host.contains(domain),
            HostMatch::Suffix => {
                host == domain
                    || host
                        .strip_suffix(domain)
                        .is_some_and(|rest| rest.ends_with('.'))
            }
        }
    }
}

/// What kind of link an href points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    Marketplace,
    Shortener,
    Other,
}

/// Immutable domain sets plus the matching mode. Built once at startup.
#[derive(Debug, Clone)]
pub struct DomainClassifier {
    marketplaces: Vec<String>,
    shorteners: Vec<String>,
    host_match: HostMatch,
}

impl Default for DomainClassifier {
    fn default() -> Self {
        Self::new(HostMatch::default(), &[], &[])
    }
}

impl DomainClassifier {
    /// Built-in sets extended with `extra_marketplaces` and `extra_shorteners`.
    pub fn new(
        host_match: HostMatch,
        extra_marketplaces: &[String],
        extra_shorteners: &[String],
    ) -> Self {
        Self {
            marketplaces: merge(MARKETPLACE_DOMAINS, extra_marketplaces),
            shorteners: merge(SHORTENER_DOMAINS, extra_shorteners),
            host_match,
        }
    }

    pub fn host_match(&self) -> HostMatch {
        self.host_match
    }

    pub fn is_marketplace_url(&self, url: &str) -> bool {
        self.host_in(url, &self.marketplaces)
    }

    pub fn is_shortener_url(&self, url: &str) -> bool {
        self.host_in(url, &self.shorteners)
    }

    /// Marketplace wins when a host would match both sets.
    pub fn classify(&self, url: &str) -> LinkKind {
        if self.is_marketplace_url(url) {
            LinkKind::Marketplace
        } else if self.is_shortener_url(url) {
            LinkKind::Shortener
        } else {
            LinkKind::Other
        }
    }

    fn host_in(&self, url: &str, domains: &[String]) -> bool {
        let parsed = match parse_url(url) {
            Ok(u) => u,
            Err(e) => {
                tracing::debug!("classify: {}", e);
                return false;
            }
        };
        let Some(host) = parsed.host_str() else {
            return false;
        };
        domains
            .iter()
            .any(|domain| self.host_match.matches(host, domain))
    }
}

fn merge(builtin: &[&str], extra: &[String]) -> Vec<String> {
    let mut out: Vec<String> = builtin.iter().map(|d| d.to_string()).collect();
    for d in extra {
        let d = d.trim().to_ascii_lowercase();
        if !d.is_empty() && !out.contains(&d) {
            out.push(d);
        }
    }
    out
}

/// Marketplace check against the built-in set with substring matching.
pub fn is_marketplace_url(url: &str) -> bool {
    DomainClassifier::default().is_marketplace_url(url)
}

/// Shortener check against the built-in set with substring matching.
pub fn is_shortener_url(url: &str) -> bool {
    DomainClassifier::default().is_shortener_url(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_storefronts() {
        assert!(is_marketplace_url("https://www.amazon.com/dp/B08N5WRWNW"));
        assert!(is_marketplace_url("https://smile.amazon.co.uk/"));
        assert!(is_marketplace_url("http://amazon.de/some/path?tag=x-21"));
        assert!(!is_marketplace_url("https://www.example.com/dp/B08N5WRWNW"));
    }

    #[test]
    fn recognizes_shorteners() {
        assert!(is_shortener_url("https://amzn.to/3abcDEF"));
        assert!(is_shortener_url("https://bit.ly/xyz"));
        assert!(!is_shortener_url("https://www.amazon.com/"));
    }

    #[test]
    fn malformed_input_is_never_classified() {
        assert!(!is_marketplace_url("not a url"));
        assert!(!is_shortener_url("not a url"));
        assert!(!is_marketplace_url(""));
        assert!(!is_marketplace_url("/dp/B08N5WRWNW"));
    }

    #[test]
    fn hostless_urls_are_never_classified() {
        assert!(!is_marketplace_url("mailto:someone@amazon.com"));
    }

    #[test]
    fn substring_match_over_matches_unrelated_hosts() {
        assert!(is_marketplace_url("https://notamazon.com.evil.example/"));
        // "t.co" is contained in plenty of hosts.
        assert!(is_shortener_url("https://gist.co.example/"));
    }

    #[test]
    fn suffix_match_only_accepts_the_domain_and_its_subdomains() {
        let c = DomainClassifier::new(HostMatch::Suffix, &[], &[]);
        assert!(c.is_marketplace_url("https://www.amazon.com/"));
        assert!(c.is_marketplace_url("https://amazon.com/"));
        assert!(!c.is_marketplace_url("https://notamazon.com.evil.example/"));
        assert!(!c.is_marketplace_url("https://notamazon.com/"));
        assert!(c.is_shortener_url("https://t.co/abc"));
        assert!(!c.is_shortener_url("https://gist.co.example/"));
    }

    #[test]
    fn extra_domains_extend_builtin_sets() {
        let c = DomainClassifier::new(
            HostMatch::Substring,
            &["amazon.com.au".to_string()],
            &[" S.Example ".to_string()],
        );
        assert!(c.is_marketplace_url("https://www.amazon.com.au/"));
        assert!(c.is_marketplace_url("https://www.amazon.fr/"));
        assert!(c.is_shortener_url("https://s.example/abc"));
    }

    #[test]
    fn classify_prefers_marketplace() {
        let c = DomainClassifier::default();
        assert_eq!(c.classify("https://www.amazon.it/dp/X"), LinkKind::Marketplace);
        assert_eq!(c.classify("https://amzn.to/abc"), LinkKind::Shortener);
        assert_eq!(c.classify("https://example.org/"), LinkKind::Other);
        assert_eq!(c.classify("garbage"), LinkKind::Other);
    }
}
