//! Command-line interface definition.

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};

use bucketsweep_scan::MAX_PAGE_SIZE;

#[derive(Debug, Parser)]
#[command(
    name = "bucketsweep",
    version,
    about = "Find duplicate and stale objects in an S3 bucket",
    long_about = "bucketsweep lists every object under a bucket prefix, groups \
                  duplicate copies by name, size and ETag, flags objects older \
                  than an age threshold, and writes a CSV cleanup report plus a \
                  monthly storage cost projection.\n\n\
                  Nothing is deleted or moved; the bucket is only listed."
)]
pub struct Cli {
    /// Bucket to analyze
    #[arg(short, long, env = "BUCKETSWEEP_BUCKET")]
    pub bucket: Option<String>,

    /// Key prefix to analyze (defaults to the whole bucket)
    #[arg(short, long, env = "BUCKETSWEEP_PREFIX")]
    pub prefix: Option<String>,

    /// Flag objects not modified for this many days [default: 1000]
    #[arg(short, long)]
    pub days: Option<u32>,

    /// Path of the CSV record report [default: file_analysis_report.csv]
    #[arg(long, value_name = "PATH")]
    pub csv: Option<PathBuf>,

    /// Path of the storage cost report [default: storage_cost_report.txt]
    #[arg(long, value_name = "PATH")]
    pub cost_report: Option<PathBuf>,

    /// AWS region (otherwise taken from the environment or profile)
    #[arg(long)]
    pub region: Option<String>,

    /// Custom endpoint for S3-compatible stores
    #[arg(long, value_name = "URL")]
    pub endpoint_url: Option<String>,

    /// Use path-style bucket addressing
    #[arg(long)]
    pub path_style: bool,

    /// Maximum keys requested per listing page
    #[arg(long, value_parser = clap::value_parser!(i32).range(1..=i64::from(MAX_PAGE_SIZE)))]
    pub page_size: Option<i32>,

    /// Compare file names case-sensitively when grouping duplicates
    #[arg(long)]
    pub case_sensitive: bool,

    /// Never group objects that have no ETag
    #[arg(long)]
    pub require_hash: bool,

    /// TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output format for the summary printed to stdout
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[cfg(test)]
impl Cli {
    /// Parse `args` as flags only, ignoring `BUCKETSWEEP_*` variables.
    pub(crate) fn parse_args_only(args: &[&str]) -> Result<Self, clap::Error> {
        use clap::{CommandFactory, FromArgMatches};

        let command = Self::command()
            .mut_arg("bucket", |arg| arg.env(None::<&'static str>))
            .mut_arg("prefix", |arg| arg.env(None::<&'static str>));
        let argv = std::iter::once("bucketsweep").chain(args.iter().copied());
        let matches = command.try_get_matches_from(argv)?;
        Self::from_arg_matches(&matches)
    }
}
