//! `unaffiliate click <href>` – show the interception decision for a link.

use unaffiliate_core::background::Background;
use unaffiliate_core::intercept::ClickDecision;

pub fn run_click(bg: &mut Background, href: &str) {
    match bg.intercept_click(href) {
        ClickDecision::Proceed => println!("proceed {href}"),
        ClickDecision::Redirect { url } => println!("redirect {url}"),
    }
}
