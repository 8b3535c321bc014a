//! `unaffiliate scan <file>` – reconcile the links of an HTML document.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;
use unaffiliate_core::background::Background;
use unaffiliate_core::scan::{ScanReport, Trigger};

#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub path: PathBuf,
    pub output: Option<PathBuf>,
    pub in_place: bool,
    pub watch: bool,
    pub interval_ms: u64,
}

impl ScanOptions {
    fn destination(&self) -> Option<&Path> {
        if self.in_place {
            Some(&self.path)
        } else {
            self.output.as_deref()
        }
    }
}

pub async fn run_scan(bg: &mut Background, opts: &ScanOptions) -> Result<()> {
    let html = read_html(&opts.path).await?;

    // Scanning a document is a fresh page load.
    bg.on_before_navigate();
    let report = bg.reconcile(&html, Trigger::Load)?;

    match opts.destination() {
        Some(dest) => {
            write_html(dest, &report.html).await?;
            print_summary(&report, dest);
        }
        None => print!("{}", report.html),
    }

    if opts.watch {
        let interval = Duration::from_millis(opts.interval_ms.max(1));
        watch_file(bg, &opts.path, interval, None).await?;
    }
    Ok(())
}

/// Re-scan `path` every `interval` and write it back when a pass changed
/// the document (cleaned or newly flagged links). Returns the cleaned count.
/// Stops on Ctrl-C or after `max_ticks` passes.
pub async fn watch_file(
    bg: &mut Background,
    path: &Path,
    interval: Duration,
    max_ticks: Option<usize>,
) -> Result<usize> {
    let mut ticker = tokio::time::interval(interval);
    // The first tick completes immediately; the initial scan already ran.
    ticker.tick().await;
    tracing::info!(path = %path.display(), ?interval, "watching for new links");

    let mut total = 0;
    let mut ticks = 0;
    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("watch interrupted");
                break;
            }
        }

        let html = read_html(path).await?;
        let report = bg.reconcile(&html, Trigger::TimerTick)?;
        if report.html != html {
            write_html(path, &report.html).await?;
            print_summary(&report, path);
            total += report.cleaned;
        }

        ticks += 1;
        if max_ticks.is_some_and(|max| ticks >= max) {
            break;
        }
    }
    Ok(total)
}

async fn read_html(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("read HTML: {}", path.display()))
}

async fn write_html(path: &Path, html: &str) -> Result<()> {
    tokio::fs::write(path, html)
        .await
        .with_context(|| format!("write HTML: {}", path.display()))
}

fn print_summary(report: &ScanReport, dest: &Path) {
    println!(
        "{}: cleaned {} link(s), flagged {} shortened link(s)",
        dest.display(),
        report.cleaned,
        report.flagged
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use unaffiliate_core::config::UnaffiliateConfig;
    use unaffiliate_core::stats::StatsStore;

    fn background() -> Background {
        Background::from_config(&UnaffiliateConfig::default(), StatsStore::in_memory())
    }

    #[tokio::test]
    async fn scan_in_place_rewrites_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("page.html");
        std::fs::write(
            &path,
            r#"<a href="https://www.amazon.com/x/dp/B08N5WRWNW?tag=a-20">x</a>"#,
        )
        .unwrap();

        let mut bg = background();
        let opts = ScanOptions {
            path: path.clone(),
            output: None,
            in_place: true,
            watch: false,
            interval_ms: 1000,
        };
        run_scan(&mut bg, &opts).await.unwrap();

        let html = std::fs::read_to_string(&path).unwrap();
        assert!(html.contains(r#"href="https://www.amazon.com/dp/B08N5WRWNW/""#));
        assert_eq!(bg.counters().page, 1);
    }

    #[tokio::test]
    async fn scan_to_output_leaves_source_alone() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("in.html");
        let out = dir.path().join("out.html");
        let original = r#"<a href="https://www.amazon.de/p?tag=x-21&amp;ref=abc">x</a>"#;
        std::fs::write(&src, original).unwrap();

        let mut bg = background();
        let opts = ScanOptions {
            path: src.clone(),
            output: Some(out.clone()),
            in_place: false,
            watch: false,
            interval_ms: 1000,
        };
        run_scan(&mut bg, &opts).await.unwrap();

        assert_eq!(std::fs::read_to_string(&src).unwrap(), original);
        let cleaned = std::fs::read_to_string(&out).unwrap();
        assert!(cleaned.contains("https://www.amazon.de/p?ref=abc"));
    }

    #[tokio::test]
    async fn watch_picks_up_links_added_later() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("page.html");
        std::fs::write(
            &path,
            r#"<a href="https://www.amazon.it/gp/product/B000000001?tag=it-21">x</a>"#,
        )
        .unwrap();

        let mut bg = background();
        let cleaned = watch_file(&mut bg, &path, Duration::from_millis(10), Some(2))
            .await
            .unwrap();

        assert_eq!(cleaned, 1);
        let html = std::fs::read_to_string(&path).unwrap();
        assert!(html.contains("https://www.amazon.it/gp/product/B000000001/"));
        assert_eq!(bg.counters().total, 1);
    }

    #[tokio::test]
    async fn watch_flags_shortener_only_pages_on_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("page.html");
        std::fs::write(&path, r#"<a href="https://amzn.to/abc">s</a>"#).unwrap();

        let mut bg = background();
        let cleaned = watch_file(&mut bg, &path, Duration::from_millis(10), Some(2))
            .await
            .unwrap();

        assert_eq!(cleaned, 0);
        let html = std::fs::read_to_string(&path).unwrap();
        assert!(html.contains(r#"data-shortened="true""#), "file was: {html}");
        assert!(html.contains(r#"href="https://amzn.to/abc""#));
        assert_eq!(bg.counters().total, 0);
    }
}
