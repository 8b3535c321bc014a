//! `unaffiliate clean [url...]` – clean URLs given as arguments or on stdin.

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use unaffiliate_core::background::Background;
use unaffiliate_core::message::{Request, Response};

pub async fn run_clean(bg: &mut Background, urls: &[String]) -> Result<()> {
    if !urls.is_empty() {
        for url in urls {
            println!("{}", clean_one(bg, url));
        }
        return Ok(());
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let url = line.trim();
        if url.is_empty() {
            continue;
        }
        println!("{}", clean_one(bg, url));
    }
    Ok(())
}

fn clean_one(bg: &mut Background, url: &str) -> String {
    match bg.handle(Request::CleanUrl {
        url: url.to_string(),
    }) {
        Response::CleanUrl { clean_url } => clean_url,
        _ => url.to_string(),
    }
}
