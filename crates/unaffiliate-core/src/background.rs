//! Background context: owns the scanner and the stats store and routes every
//! event that can clean a link or touch the counters.
//!
//! One `Background` lives for the whole process and is passed by reference to
//! whichever caller needs it; there is no global counter state.

use anyhow::Result;

use crate::config::UnaffiliateConfig;
use crate::intercept::ClickDecision;
use crate::message::{Request, Response};
use crate::scan::{LinkScanner, ScanReport, Trigger};
use crate::stats::{Counters, StatsStore};

pub struct Background {
    scanner: LinkScanner,
    stats: StatsStore,
}

impl Background {
    pub fn new(scanner: LinkScanner, stats: StatsStore) -> Self {
        Self { scanner, stats }
    }

    pub fn from_config(cfg: &UnaffiliateConfig, stats: StatsStore) -> Self {
        Self::new(LinkScanner::from_config(cfg), stats)
    }

    pub fn scanner(&self) -> &LinkScanner {
        &self.scanner
    }

    pub fn counters(&self) -> Counters {
        self.stats.counters()
    }

    /// Count `amount` cleaned links.
    pub fn record_cleaned(&mut self, amount: u64) {
        self.stats.increment(amount);
    }

    pub fn handle(&mut self, request: Request) -> Response {
        match request {
            Request::CleanUrl { url } => {
                let n = self.scanner.normalizer().normalize(&url);
                if n.changed {
                    self.record_cleaned(1);
                    tracing::info!("cleaned url: {}", n.cleaned_url);
                }
                Response::CleanUrl {
                    clean_url: n.cleaned_url,
                }
            }
            Request::LinkCleaned => {
                self.record_cleaned(1);
                Response::ack()
            }
            Request::GetStats => Response::Stats(self.counters()),
            Request::NavigationStarted => {
                self.on_before_navigate();
                Response::ack()
            }
            Request::RuleMatched => {
                self.on_rule_matched();
                Response::ack()
            }
        }
    }

    /// Parse and handle one JSON request line. Malformed lines get an error
    /// response; they never end the session.
    pub fn handle_line(&mut self, line: &str) -> Response {
        match Request::from_json(line) {
            Ok(request) => self.handle(request),
            Err(e) => {
                tracing::warn!("rejected message {:?}: {}", line, e);
                Response::Error {
                    error: e.to_string(),
                }
            }
        }
    }

    /// A new page is loading: the per-page counter starts over.
    pub fn on_before_navigate(&mut self) {
        self.stats.reset_page_counter();
    }

    /// A background network rule rewrote a request.
    pub fn on_rule_matched(&mut self) {
        tracing::debug!("network rule matched");
        self.record_cleaned(1);
    }

    /// Reconcile a document's links and count what was cleaned.
    pub fn reconcile(&mut self, html: &str, trigger: Trigger) -> Result<ScanReport> {
        let report = self.scanner.reconcile(html, trigger)?;
        self.record_cleaned(report.cleaned as u64);
        Ok(report)
    }

    pub fn intercept_click(&mut self, href: &str) -> ClickDecision {
        let decision = self.scanner.intercept_click(href);
        if let ClickDecision::Redirect { url } = &decision {
            tracing::info!("redirecting click to {}", url);
            self.record_cleaned(1);
        }
        decision
    }

    pub fn clean_location(&mut self, location: &str) -> Option<String> {
        let cleaned = self.scanner.clean_location(location);
        if cleaned.is_some() {
            self.record_cleaned(1);
        }
        cleaned
    }
}
