//! bucketsweep - find duplicate and stale objects in an S3 bucket.
//!
//! Usage:
//!   bucketsweep --bucket NAME [--prefix PREFIX]   Scan, classify and report
//!   bucketsweep --config sweep.toml               Read settings from a file
//!   bucketsweep --bucket NAME --format json       Print the summary as JSON
//!   bucketsweep --help                            Show help

mod cli;
mod logging;
mod settings;

use chrono::{DateTime, Utc};
use clap::Parser;
use color_eyre::eyre::{Context, Result, eyre};

use bucketsweep_analyze::{
    AgeAnalyzer, AgeConfig, AgeReport, DuplicateConfig, DuplicateFinder, DuplicateReport,
    format_age,
};
use bucketsweep_core::{ObjectRecord, SweepConfig};
use bucketsweep_report::{
    ScanSummary, SweepDocument, TierCost, render_cost_report, write_cost_report,
    write_record_report_file,
};
use bucketsweep_scan::{BucketScanner, ObjectSource, S3Source};

use cli::{Cli, OutputFormat};
use settings::{FileConfig, Settings};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    logging::init(cli.verbose);

    let file = FileConfig::load(cli.config.as_deref()).context("Invalid configuration")?;
    let settings = settings::resolve(&cli, file).context("Invalid configuration")?;

    run_sweep(settings, cli.format).await
}

/// Everything one sweep produced, after both report files are written.
struct SweepOutcome {
    records: Vec<ObjectRecord>,
    duplicates: DuplicateReport,
    age: AgeReport,
    summary: ScanSummary,
    costs: Vec<TierCost>,
    cost_report: String,
}

/// Scan the bucket, classify every object and write both reports.
async fn run_sweep(settings: Settings, format: OutputFormat) -> Result<()> {
    let Settings {
        sweep: config,
        s3,
        duplicates: duplicate_config,
    } = settings;
    let now = Utc::now();

    eprintln!("Scanning s3://{}/{}...", config.bucket, config.prefix);

    let scanner = BucketScanner::new(S3Source::connect(&s3).await);
    let outcome = sweep(&scanner, &config, duplicate_config, now).await?;

    match format {
        OutputFormat::Text => {
            println!();
            println!("{}", "─".repeat(70));
            println!(" Storage Sweep Report");
            println!("{}", "─".repeat(70));
            println!();
            print!("{}", outcome.cost_report);
            println!();
            print_findings(&outcome.duplicates, &outcome.age, now);
            println!();
            println!(" Reports generated:");
            println!("   - Detailed file analysis: {}", config.outputs.csv.display());
            println!("   - Storage cost analysis:  {}", config.outputs.cost_report.display());
        }
        OutputFormat::Json => {
            let document = SweepDocument {
                bucket: &config.bucket,
                prefix: &config.prefix,
                generated_at: now,
                objects_scanned: outcome.records.len(),
                summary: outcome.summary,
                costs: &outcome.costs,
                duplicates: &outcome.duplicates,
                age: &outcome.age,
            };
            println!("{}", serde_json::to_string_pretty(&document)?);
        }
    }

    Ok(())
}

/// Scan, classify and report against any listing source.
///
/// `now` is the single reference instant for staleness, `AgeDays` and the
/// age report.
async fn sweep<S: ObjectSource>(
    scanner: &BucketScanner<S>,
    config: &SweepConfig,
    duplicate_config: DuplicateConfig,
    now: DateTime<Utc>,
) -> Result<SweepOutcome> {
    config.validate().map_err(|e| eyre!("Invalid configuration: {e}"))?;

    let listing = scanner.scan(config, now).await.context("Scan failed")?;

    eprintln!(
        "Scanned {} objects ({}) in {:.2}s",
        listing.len(),
        format_size(listing.total_bytes),
        listing.progress.elapsed.as_secs_f64()
    );

    let total_gb = listing.total_gb();
    let mut records = listing.records;

    eprintln!("Finding duplicates...");

    let duplicates = DuplicateFinder::with_config(duplicate_config).find_duplicates(&mut records);
    let age = AgeAnalyzer::with_config(AgeConfig {
        reference_time: now,
        threshold_days: config.age_threshold_days,
    })
    .analyze(&records);

    let counts = write_record_report_file(&config.outputs.csv, &records, now)
        .context("Failed to write record report")?;
    tracing::info!(duplicates = counts.duplicates, old = counts.old, "Record report written");

    let summary = ScanSummary::new(total_gb, duplicates.duplicate_size_gb);
    let costs = summary.project_costs(&config.tiers);
    let cost_report = render_cost_report(&summary, &costs);
    write_cost_report(&config.outputs.cost_report, &cost_report)
        .context("Failed to write cost report")?;

    Ok(SweepOutcome {
        records,
        duplicates,
        age,
        summary,
        costs,
        cost_report,
    })
}

/// Print duplicate and age findings below the cost summary.
fn print_findings(duplicates: &DuplicateReport, age: &AgeReport, now: DateTime<Utc>) {
    if duplicates.has_duplicates() {
        println!(
            " Found {} duplicate groups ({} deletable copies)",
            duplicates.group_count, duplicates.copy_count
        );
    } else {
        println!(" No duplicate objects found.");
    }

    if age.has_stale_objects() {
        println!(
            " {} objects not modified in {} days ({}), {} to review for archival",
            age.stale_count,
            age.threshold_days,
            format_size(age.stale_bytes),
            age.archival_candidates
        );
    } else {
        println!(" No objects older than {} days.", age.threshold_days);
    }

    if let Some(oldest) = &age.oldest {
        println!(
            " Oldest object: {} ({} old)",
            oldest.key,
            format_age(now - oldest.last_modified)
        );
    }
}

/// Format size in human-readable form.
fn format_size(bytes: u64) -> String {
    humansize::format_size(bytes, humansize::BINARY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bucketsweep_core::OutputPaths;
    use bucketsweep_scan::{ObjectPage, PageRequest, RawObject, ScanError};
    use chrono::TimeZone;
    use tempfile::TempDir;

    const MB: i64 = 1024 * 1024;

    /// Serves a fixed set of objects as a single page.
    struct FixedSource(Vec<RawObject>);

    impl ObjectSource for FixedSource {
        async fn list_page(&self, _request: PageRequest<'_>) -> Result<ObjectPage, ScanError> {
            Ok(ObjectPage {
                objects: self.0.clone(),
                next_token: None,
            })
        }
    }

    fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_cli_parses_format() {
        let cli = Cli::parse_args_only(&["--bucket", "b", "--format", "json", "-vv"]).unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.bucket.as_deref(), Some("b"));
    }

    #[test]
    fn test_cli_rejects_bad_page_size() {
        assert!(Cli::parse_args_only(&["--page-size", "5000"]).is_err());
        assert!(Cli::parse_args_only(&["--page-size", "0"]).is_err());
    }

    #[tokio::test]
    async fn test_sweep_writes_both_reports() {
        let temp = TempDir::new().unwrap();
        let outputs = OutputPaths {
            csv: temp.path().join("records.csv"),
            cost_report: temp.path().join("costs.txt"),
        };
        let config = SweepConfig::builder()
            .bucket("archive")
            .outputs(outputs.clone())
            .build()
            .unwrap();
        let scanner = BucketScanner::new(FixedSource(vec![
            RawObject::new("/x/a.txt", 10 * MB, at(2024, 1, 1), "\"X\""),
            RawObject::new("/a.txt", 10 * MB, at(2024, 1, 2), "\"X\""),
            RawObject::new("/y/z/a.txt", 10 * MB, at(2024, 1, 3), "\"X\""),
            RawObject::new("old/report.pdf", MB, at(2019, 5, 4), "\"P\""),
        ]));
        let now = at(2025, 1, 1);

        let outcome = sweep(&scanner, &config, DuplicateConfig::default(), now)
            .await
            .unwrap();

        let csv = std::fs::read_to_string(&outputs.csv).unwrap();
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(
            lines,
            [
                "Type,FileName,Size_MB,LastModified,AgeDays,Path,DuplicateGroupID,Status",
                "=== DUPLICATE FILES ===,,,,,,,",
                "Duplicate,a.txt,10.00,2024-01-01,366,/x/a.txt,DUP-001,Can be deleted",
                "Duplicate,a.txt,10.00,2024-01-03,364,/y/z/a.txt,DUP-001,Can be deleted",
                "=== OLD FILES ===,,,,,,,",
                "Old,report.pdf,1.00,2019-05-04,2069,old/report.pdf,,Review for archival",
            ]
        );

        let costs = std::fs::read_to_string(&outputs.cost_report).unwrap();
        assert_eq!(costs, outcome.cost_report);
        let cost_lines: Vec<_> = costs.lines().collect();
        assert_eq!(cost_lines[1], "   Total Size Scanned         : 0.03 GB");
        assert_eq!(cost_lines[2], "   Duplicate Size to Delete   : 0.02 GB");
        assert_eq!(cost_lines[3], "   Remaining Size After Clean : 0.01 GB");
        assert_eq!(cost_lines[5], "   - S3 Standard                   : $0.00");
        assert_eq!(cost_lines.len(), 5 + 7);

        assert_eq!(outcome.records.len(), 4);
        assert_eq!(outcome.duplicates.group_count, 1);
        assert_eq!(outcome.age.stale_count, 1);
        assert_eq!(
            outcome.age.oldest.as_ref().map(|o| o.key.as_str()),
            Some("old/report.pdf")
        );
    }

    #[tokio::test]
    async fn test_sweep_rejects_invalid_config() {
        let temp = TempDir::new().unwrap();
        let mut config = SweepConfig::new("archive");
        config.outputs.csv = temp.path().join("records.csv");
        config.tiers.clear();
        let scanner = BucketScanner::new(FixedSource(Vec::new()));

        let result = sweep(&scanner, &config, DuplicateConfig::default(), Utc::now()).await;

        assert!(result.is_err());
        assert!(!config.outputs.csv.exists());
    }
}
