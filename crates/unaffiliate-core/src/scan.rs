//! Page link scan using lol_html for streaming HTML rewriting.
//!
//! Page load, DOM mutation batches, timer ticks and explicit requests all go
//! through the same [`LinkScanner::reconcile`]. Running it over its own output
//! rewrites nothing, so triggers can overlap freely.

use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::{anyhow, Context, Result};
use lol_html::{element, HtmlRewriter, Settings};

use crate::config::{MarkerConfig, UnaffiliateConfig};
use crate::domains::{DomainClassifier, LinkKind};
use crate::url_model::Normalizer;

/// Why a reconcile pass ran. Only used for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Load,
    Mutation,
    TimerTick,
    Explicit,
}

/// Result of one reconcile pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanReport {
    /// The rewritten document.
    pub html: String,
    /// Marketplace links whose href changed.
    pub cleaned: usize,
    /// Shortener links that were marked.
    pub flagged: usize,
}

/// Classifier, normalizer and marker names shared by every link-facing caller.
#[derive(Debug, Clone, Default)]
pub struct LinkScanner {
    classifier: DomainClassifier,
    normalizer: Normalizer,
    markers: MarkerConfig,
}

impl LinkScanner {
    pub fn new(
        classifier: DomainClassifier,
        normalizer: Normalizer,
        markers: MarkerConfig,
    ) -> Self {
        Self {
            classifier,
            normalizer,
            markers,
        }
    }

    pub fn from_config(cfg: &UnaffiliateConfig) -> Self {
        Self::new(cfg.classifier(), cfg.normalizer(), cfg.markers.clone())
    }

    pub fn classifier(&self) -> &DomainClassifier {
        &self.classifier
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    pub fn markers(&self) -> &MarkerConfig {
        &self.markers
    }

    /// Cleaned URL for a marketplace href, or None when the href is not a
    /// marketplace URL or is already clean.
    pub(crate) fn clean_marketplace_href(&self, href: &str) -> Option<String> {
        if !self.classifier.is_marketplace_url(href) {
            return None;
        }
        let n = self.normalizer.normalize(href);
        n.changed.then_some(n.cleaned_url)
    }

    /// Rewrites every `<a href>` in `html`.
    ///
    /// Marketplace links get the cleaned href and the `cleaned` marker;
    /// shortener links only get the `shortened` marker. Relative and
    /// unparseable hrefs are left alone.
    pub fn reconcile(&self, html: &str, trigger: Trigger) -> Result<ScanReport> {
        let mut output = Vec::with_capacity(html.len());
        let cleaned = AtomicUsize::new(0);
        let flagged = AtomicUsize::new(0);

        let mut rewriter = HtmlRewriter::new(
            Settings {
                element_content_handlers: vec![element!("a[href]", |el| {
                    let Some(raw) = el.get_attribute("href") else {
                        return Ok(());
                    };
                    let href = html_escape::decode_html_entities(&raw);
                    match self.classifier.classify(&href) {
                        LinkKind::Marketplace => {
                            if let Some(clean) = self.clean_marketplace_href(&href) {
                                el.set_attribute("href", &clean)?;
                                el.set_attribute(&self.markers.cleaned, "true")?;
                                cleaned.fetch_add(1, Ordering::Relaxed);
                                tracing::info!(from = %href, to = %clean, "cleaned link");
                            }
                        }
                        LinkKind::Shortener => {
                            el.set_attribute(&self.markers.shortened, "true")?;
                            flagged.fetch_add(1, Ordering::Relaxed);
                        }
                        LinkKind::Other => {}
                    }
                    Ok(())
                })],
                ..Settings::default()
            },
            |c: &[u8]| output.extend_from_slice(c),
        );

        rewriter
            .write(html.as_bytes())
            .map_err(|e| anyhow!("HTML rewrite error: {}", e))?;
        rewriter
            .end()
            .map_err(|e| anyhow!("HTML rewrite finalization error: {}", e))?;

        let html = String::from_utf8(output).context("Invalid UTF-8 in rewritten HTML")?;
        let report = ScanReport {
            html,
            cleaned: cleaned.load(Ordering::Relaxed),
            flagged: flagged.load(Ordering::Relaxed),
        };
        tracing::debug!(
            ?trigger,
            cleaned = report.cleaned,
            flagged = report.flagged,
            "reconciled page links"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html><body>
<a id="p" href="https://www.amazon.com/Some-Product/dp/B08N5WRWNW/ref=sr_1_1?tag=associate-20">buy</a>
<a id="s" href="https://amzn.to/3abcDEF">short</a>
<a id="o" href="https://example.org/?tag=keep">other</a>
<a id="r" href="/dp/B08N5WRWNW?tag=relative">relative</a>
<a id="c" href="https://www.amazon.com/dp/B000000001/">clean</a>
<a name="no-href">anchor</a>
</body></html>"#;

    #[test]
    fn rewrites_marketplace_links_and_flags_shorteners() {
        let scanner = LinkScanner::default();
        let report = scanner.reconcile(PAGE, Trigger::Load).unwrap();

        assert_eq!(report.cleaned, 1);
        assert_eq!(report.flagged, 1);
        assert!(report
            .html
            .contains(r#"href="https://www.amazon.com/dp/B08N5WRWNW/""#));
        assert!(report.html.contains(r#"data-unaffiliated="true""#));
        assert!(report.html.contains(r#"data-shortened="true""#));
        assert!(report.html.contains(r#"href="https://amzn.to/3abcDEF""#));
        assert!(report.html.contains(r#"href="https://example.org/?tag=keep""#));
        assert!(report.html.contains(r#"href="/dp/B08N5WRWNW?tag=relative""#));
        assert!(!report.html.contains("associate-20"));
    }

    #[test]
    fn already_clean_links_are_not_marked() {
        let scanner = LinkScanner::default();
        let html = r#"<a href="https://www.amazon.com/dp/B000000001/">x</a>"#;
        let report = scanner.reconcile(html, Trigger::Explicit).unwrap();
        assert_eq!(report.cleaned, 0);
        assert_eq!(report.html, html);
    }

    #[test]
    fn reconcile_is_idempotent() {
        let scanner = LinkScanner::default();
        let first = scanner.reconcile(PAGE, Trigger::Load).unwrap();
        let second = scanner.reconcile(&first.html, Trigger::TimerTick).unwrap();
        assert_eq!(second.cleaned, 0);
        assert_eq!(second.flagged, 1);
        assert_eq!(second.html, first.html);
    }

    #[test]
    fn entity_encoded_hrefs_are_decoded_before_cleaning() {
        let scanner = LinkScanner::default();
        let html = r#"<a href="https://www.amazon.de/s?k=ssd&amp;tag=xyz-21">x</a>"#;
        let report = scanner.reconcile(html, Trigger::Mutation).unwrap();
        assert_eq!(report.cleaned, 1);
        assert!(report.html.contains("https://www.amazon.de/s?k=ssd"));
        assert!(!report.html.contains("xyz-21"));
    }

    #[test]
    fn custom_marker_names_are_used() {
        let scanner = LinkScanner::new(
            DomainClassifier::default(),
            Normalizer::default(),
            MarkerConfig {
                cleaned: "data-clean".to_string(),
                shortened: "data-short".to_string(),
            },
        );
        let report = scanner.reconcile(PAGE, Trigger::Load).unwrap();
        assert!(report.html.contains(r#"data-clean="true""#));
        assert!(report.html.contains(r#"data-short="true""#));
        assert!(!report.html.contains("data-unaffiliated"));
    }

    #[test]
    fn document_without_links_is_passed_through() {
        let scanner = LinkScanner::default();
        let html = "<p>nothing to see</p>";
        let report = scanner.reconcile(html, Trigger::Load).unwrap();
        assert_eq!(report, ScanReport { html: html.to_string(), cleaned: 0, flagged: 0 });
    }
}
