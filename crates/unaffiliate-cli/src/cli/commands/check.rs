//! `unaffiliate check <url>` – classify a URL.

use unaffiliate_core::background::Background;
use unaffiliate_core::domains::LinkKind;

pub fn run_check(bg: &Background, url: &str) {
    let scanner = bg.scanner();
    match scanner.classifier().classify(url) {
        LinkKind::Marketplace => {
            println!("marketplace");
            println!("Active (Amazon page detected)");
            match scanner.clean_location(url) {
                Some(clean) => println!("clean: {clean}"),
                None => println!("clean: (already clean)"),
            }
        }
        LinkKind::Shortener => println!("shortener (flagged, not resolved)"),
        LinkKind::Other => println!("other"),
    }
}
