//! Tests for CLI subcommand parsing.
//!
//! The binary's CLI struct is not importable from an integration test, so
//! these tests exercise a minimal mirror of it built from the same library
//! types.

use clap::Parser;
use std::path::PathBuf;

use seo_monitor::{ExportFormat, LogFormat, LogLevel};

#[derive(Debug, clap::Parser)]
#[command(name = "seo_monitor")]
struct TestCli {
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    log_format: LogFormat,
    #[arg(long, default_value = "./seo-history.json")]
    history_path: PathBuf,
    #[command(subcommand)]
    command: TestCommand,
}

#[derive(Debug, clap::Subcommand)]
enum TestCommand {
    Monitor {
        url: String,
    },
    Export {
        #[arg(value_enum)]
        format: ExportFormat,
        output: PathBuf,
    },
    Report {
        #[arg(default_value_t = 30)]
        days: i64,
    },
    Alerts,
}

#[test]
fn test_cli_monitor_command_parsing() {
    let args = ["seo_monitor", "monitor", "https://example.com"];
    let cli = TestCli::try_parse_from(args).expect("Should parse monitor command");

    match cli.command {
        TestCommand::Monitor { url } => assert_eq!(url, "https://example.com"),
        other => panic!("Should parse as Monitor command, got {other:?}"),
    }
    assert_eq!(cli.history_path, PathBuf::from("./seo-history.json"));
    assert_eq!(
        log::LevelFilter::from(cli.log_level),
        log::LevelFilter::Info
    );
    match cli.log_format {
        LogFormat::Plain => {}
        LogFormat::Json => panic!("Default format should be Plain"),
    }
}

#[test]
fn test_cli_monitor_missing_url_fails() {
    let args = ["seo_monitor", "monitor"];
    assert!(TestCli::try_parse_from(args).is_err());
}

#[test]
fn test_cli_export_command_parsing() {
    let args = ["seo_monitor", "export", "csv", "out.csv"];
    let cli = TestCli::try_parse_from(args).expect("Should parse export command");

    match cli.command {
        TestCommand::Export { format, output } => {
            assert_eq!(format, ExportFormat::Csv);
            assert_eq!(output, PathBuf::from("out.csv"));
        }
        other => panic!("Should parse as Export command, got {other:?}"),
    }
}

#[test]
fn test_cli_export_rejects_unknown_format() {
    let args = ["seo_monitor", "export", "xml", "out.xml"];
    assert!(TestCli::try_parse_from(args).is_err());
}

#[test]
fn test_cli_export_missing_path_fails() {
    let args = ["seo_monitor", "export", "json"];
    assert!(TestCli::try_parse_from(args).is_err());
}

#[test]
fn test_cli_report_default_days() {
    let args = ["seo_monitor", "report"];
    let cli = TestCli::try_parse_from(args).expect("Should parse report command");
    match cli.command {
        TestCommand::Report { days } => assert_eq!(days, 30),
        other => panic!("Should parse as Report command, got {other:?}"),
    }
}

#[test]
fn test_cli_report_explicit_days() {
    let args = ["seo_monitor", "report", "7"];
    let cli = TestCli::try_parse_from(args).expect("Should parse report command");
    match cli.command {
        TestCommand::Report { days } => assert_eq!(days, 7),
        other => panic!("Should parse as Report command, got {other:?}"),
    }
}

#[test]
fn test_cli_alerts_command_parsing() {
    let args = ["seo_monitor", "alerts"];
    let cli = TestCli::try_parse_from(args).expect("Should parse alerts command");
    assert!(matches!(cli.command, TestCommand::Alerts));
}

#[test]
fn test_cli_unknown_command_fails() {
    let args = ["seo_monitor", "audit-everything"];
    assert!(TestCli::try_parse_from(args).is_err());
}

#[test]
fn test_cli_global_options() {
    let args = [
        "seo_monitor",
        "--log-level",
        "debug",
        "--log-format",
        "json",
        "--history-path",
        "/tmp/h.json",
        "alerts",
    ];
    let cli = TestCli::try_parse_from(args).expect("Should parse global options");
    assert_eq!(
        log::LevelFilter::from(cli.log_level),
        log::LevelFilter::Debug
    );
    match cli.log_format {
        LogFormat::Json => {}
        LogFormat::Plain => panic!("Should be Json format"),
    }
    assert_eq!(cli.history_path, PathBuf::from("/tmp/h.json"));
}
