//! Tests for the scan subcommand.

use super::parse;
use crate::cli::{Cli, CliCommand};
use clap::Parser;
use std::path::Path;

#[test]
fn cli_parse_scan_to_stdout() {
    match parse(&["unaffiliate", "scan", "page.html"]) {
        CliCommand::Scan {
            path,
            output,
            in_place,
            watch,
            interval_ms,
        } => {
            assert_eq!(path, Path::new("page.html"));
            assert!(output.is_none());
            assert!(!in_place);
            assert!(!watch);
            assert!(interval_ms.is_none());
        }
        _ => panic!("expected Scan"),
    }
}

#[test]
fn cli_parse_scan_output() {
    match parse(&["unaffiliate", "scan", "in.html", "-o", "out.html"]) {
        CliCommand::Scan { output, .. } => {
            assert_eq!(output.as_deref(), Some(Path::new("out.html")));
        }
        _ => panic!("expected Scan with --output"),
    }
}

#[test]
fn cli_parse_scan_watch_in_place() {
    match parse(&[
        "unaffiliate",
        "scan",
        "page.html",
        "--in-place",
        "--watch",
        "--interval-ms",
        "250",
    ]) {
        CliCommand::Scan {
            in_place,
            watch,
            interval_ms,
            ..
        } => {
            assert!(in_place);
            assert!(watch);
            assert_eq!(interval_ms, Some(250));
        }
        _ => panic!("expected Scan with --watch"),
    }
}

#[test]
fn cli_scan_watch_requires_in_place() {
    assert!(Cli::try_parse_from(["unaffiliate", "scan", "page.html", "--watch"]).is_err());
}

#[test]
fn cli_scan_output_conflicts_with_in_place() {
    assert!(Cli::try_parse_from([
        "unaffiliate",
        "scan",
        "page.html",
        "--in-place",
        "-o",
        "out.html"
    ])
    .is_err());
}
