//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `seo_monitor` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use std::path::PathBuf;
use std::process;

use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use colored::Colorize;

use seo_monitor::app::validate_and_normalize_url;
use seo_monitor::config::DEFAULT_REPORT_DAYS;
use seo_monitor::initialization::init_logger_with;
use seo_monitor::{
    generate_historical_summary, Alert, ExportFormat, HistoricalSummary, HttpAuditor, LogFormat,
    LogLevel, MonitorConfig, MonitorOutcome, MonitorRun, PerformanceMonitor, Severity, TrendLabel,
    Trends,
};

#[derive(Debug, Parser)]
#[command(
    name = "seo_monitor",
    version,
    about = "Monitors SEO audit scores over time and raises threshold alerts"
)]
struct Cli {
    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    log_format: LogFormat,

    /// Path of the JSON history file
    #[arg(long, default_value = "./seo-history.json")]
    history_path: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Audit a URL and record the run in the history file
    Monitor {
        /// The URL to audit
        url: String,
    },
    /// Export the recorded history
    Export {
        /// Output format
        #[arg(value_enum)]
        format: ExportFormat,
        /// Output file path
        output: PathBuf,
    },
    /// Summarize the recorded history over a recent window
    Report {
        /// Days of history to cover
        #[arg(default_value_t = DEFAULT_REPORT_DAYS)]
        days: i64,
    },
    /// Re-evaluate alerts for the most recent recorded run
    Alerts,
}

#[tokio::main]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            let _ = e.print();
            process::exit(code);
        }
    };

    if let Err(e) = init_logger_with(cli.log_level.clone().into(), cli.log_format.clone()) {
        eprintln!("seo_monitor error: {e}");
        process::exit(1);
    }

    let config = MonitorConfig {
        history_path: cli.history_path.clone(),
        ..Default::default()
    };
    let monitor = PerformanceMonitor::new(config.clone());

    match cli.command {
        Command::Monitor { url } => {
            let Some(url) = validate_and_normalize_url(&url) else {
                eprintln!("seo_monitor error: invalid URL");
                process::exit(1);
            };
            let auditor = match HttpAuditor::new(&config) {
                Ok(auditor) => auditor,
                Err(e) => {
                    eprintln!("seo_monitor error: {e}");
                    process::exit(1);
                }
            };
            match monitor.monitor_url(&url, &auditor).await {
                MonitorOutcome::Completed(run) => print_run(&run),
                MonitorOutcome::Failed(failure) => {
                    eprintln!(
                        "seo_monitor error: audit failed for {}: {}",
                        failure.url, failure.error
                    );
                    process::exit(1);
                }
            }
        }
        Command::Export { format, output } => match monitor.export_data(format, &output).await {
            Ok(count) => {
                println!(
                    "✅ Exported {} record{} to {}",
                    count,
                    if count == 1 { "" } else { "s" },
                    output.display()
                );
            }
            Err(e) => {
                eprintln!("seo_monitor error: {e}");
                process::exit(1);
            }
        },
        Command::Report { days } => print_report(&monitor, days).await,
        Command::Alerts => print_alerts(&monitor.latest_alerts().await),
    }
}

fn score_colored(score: i64) -> colored::ColoredString {
    let text = score.to_string();
    if score >= 80 {
        text.green()
    } else if score >= 50 {
        text.yellow()
    } else {
        text.red()
    }
}

fn severity_colored(severity: Severity) -> colored::ColoredString {
    match severity {
        Severity::High => severity.to_string().red(),
        Severity::Medium => severity.to_string().yellow(),
        Severity::Low => severity.to_string().normal(),
    }
}

fn print_run(run: &MonitorRun) {
    let summary = &run.report.summary;
    println!(
        "✅ Audited {} in {}ms - history saved with {} record(s)",
        summary.url,
        summary.response_time_ms,
        run.historical.len()
    );

    let scores = &run.report.score_breakdown;
    println!(
        "Scores: overall {} | meta {} | schema {} | social {} | sitemap {} | performance {} | accessibility {} | security {}",
        score_colored(scores.overall),
        score_colored(scores.meta),
        score_colored(scores.schema),
        score_colored(scores.social),
        score_colored(scores.sitemap),
        score_colored(scores.performance),
        score_colored(scores.accessibility),
        score_colored(scores.security),
    );

    match &run.report.trends {
        Trends::FirstRun(first) => println!("{}", first.message.dimmed()),
        Trends::Computed(set) => {
            if let Some(overall) = set.scores.get(&seo_monitor::ScoreCategory::Overall) {
                println!(
                    "Overall moved {:+} point(s) vs the previous run ({}%)",
                    overall.change, overall.percentage
                );
            }
        }
    }

    print_alerts(&run.alerts);

    if !run.report.top_issues.is_empty() {
        println!("Top issues:");
        for issue in &run.report.top_issues {
            println!("  [{}] {}: {}", issue.kind, issue.component, issue.message);
        }
    }

    if !run.report.recommendations.is_empty() {
        println!("Recommendations:");
        for rec in &run.report.recommendations {
            println!("  ({}) {}", rec.priority, rec.message);
        }
    }
}

fn print_alerts(alerts: &[Alert]) {
    if alerts.is_empty() {
        println!("No alerts.");
        return;
    }
    println!("{}:", format!("{} alert(s)", alerts.len()).bold());
    for alert in alerts {
        println!(
            "  [{}] {}: {}",
            severity_colored(alert.severity),
            alert.category,
            alert.message
        );
    }
}

async fn print_report(monitor: &PerformanceMonitor, days: i64) {
    let history = monitor.history().await;
    let cutoff = chrono::Utc::now() - chrono::Duration::days(days);
    let window: Vec<_> = history
        .into_iter()
        .filter(|r| r.timestamp >= cutoff)
        .collect();

    println!("{}", format!("SEO report, last {days} day(s)").bold());
    match generate_historical_summary(&window) {
        HistoricalSummary::Empty { message, .. } => println!("{message}"),
        HistoricalSummary::Present(stats) => {
            println!(
                "{} run(s) from {} to {}",
                stats.data_points,
                stats.first_recorded.format("%Y-%m-%d"),
                stats.last_recorded.format("%Y-%m-%d")
            );
            println!(
                "Overall score: avg {:.1}, best {}, worst {}",
                stats.average_score,
                score_colored(stats.best_score),
                score_colored(stats.worst_score)
            );
            let label = stats.trend.to_string();
            let label = match stats.trend {
                TrendLabel::Improving => label.green(),
                TrendLabel::Declining => label.red(),
                _ => label.normal(),
            };
            println!("Trend: {label}");
        }
    }

    for record in window.iter().rev().take(10) {
        println!(
            "  {}  overall {}  {}ms  {} error(s), {} warning(s)",
            record.timestamp.format("%Y-%m-%d %H:%M"),
            score_colored(record.scores.overall),
            record.response_time_ms,
            record.errors.len(),
            record.warnings.len()
        );
    }
}
