use clap::Parser;
use std::path::PathBuf;

use crate::args::{CliArgs, OutputFormat};

#[test]
fn parses_defaults() {
    let args = CliArgs::try_parse_from(["suspect", "snapshots"]).expect("default args should parse");

    assert!(args.config.is_none());
    assert_eq!(args.report_convertible, None);
    assert_eq!(args.format, OutputFormat::Text);
    assert!(!args.no_color);
    assert_eq!(args.inputs, vec![PathBuf::from("snapshots")]);
}

#[test]
fn parses_common_flags() {
    let args = CliArgs::try_parse_from([
        "suspect",
        "--config",
        "configs/suspect.json",
        "--reportConvertible",
        "false",
        "--format",
        "JSON",
        "--no-color",
        "a.snapshot.json",
        "more",
    ])
    .expect("flagged args should parse");

    assert_eq!(
        args.config.as_deref(),
        Some(std::path::Path::new("configs/suspect.json"))
    );
    assert_eq!(args.report_convertible, Some(false));
    assert_eq!(args.format, OutputFormat::Json);
    assert!(args.no_color);
    assert_eq!(
        args.inputs,
        vec![PathBuf::from("a.snapshot.json"), PathBuf::from("more")]
    );
}

#[test]
fn accepts_kebab_case_alias() {
    let args = CliArgs::try_parse_from(["suspect", "--report-convertible", "true", "x"])
        .expect("alias should parse");
    assert_eq!(args.report_convertible, Some(true));
}

#[test]
fn requires_at_least_one_input() {
    assert!(CliArgs::try_parse_from(["suspect"]).is_err());
}

#[test]
fn rejects_unknown_format() {
    assert!(CliArgs::try_parse_from(["suspect", "--format", "xml", "x"]).is_err());
}
