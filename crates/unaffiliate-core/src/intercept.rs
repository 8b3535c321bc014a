//! Click interception and current-location cleaning.

use crate::scan::LinkScanner;

/// What to do with a clicked link before navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickDecision {
    /// Let the default navigation happen.
    Proceed,
    /// Suppress the default navigation and go to `url` instead.
    Redirect { url: String },
}

impl LinkScanner {
    /// Decide on a clicked link's href. Only marketplace links are rewritten.
    pub fn intercept_click(&self, href: &str) -> ClickDecision {
        match self.clean_marketplace_href(href) {
            Some(url) => ClickDecision::Redirect { url },
            None => ClickDecision::Proceed,
        }
    }

    /// Cleaned replacement for the page's own location, applied without a
    /// reload. None when the page is not a marketplace page or already clean.
    pub fn clean_location(&self, location: &str) -> Option<String> {
        self.clean_marketplace_href(location)
    }
}
