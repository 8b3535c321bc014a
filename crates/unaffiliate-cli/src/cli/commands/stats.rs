//! `unaffiliate stats` – show cleaned-link counters.

use unaffiliate_core::background::Background;

pub fn run_stats(bg: &mut Background, reset_page: bool, url: Option<&str>) {
    if reset_page {
        bg.on_before_navigate();
    }
    let c = bg.counters();
    println!("{:<22} {}", "Total links cleaned:", c.total);
    println!("{:<22} {}", "Cleaned on this page:", c.page);
    if let Some(url) = url {
        println!("{:<22} {}", "Status:", status_line(bg, url));
    }
}

/// Status for the page at `url`.
pub fn status_line(bg: &Background, url: &str) -> &'static str {
    if bg.scanner().classifier().is_marketplace_url(url) {
        "Active (Amazon page detected)"
    } else {
        "Active"
    }
}
