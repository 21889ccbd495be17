//! Configuration file loading and merging with command-line flags.
//!
//! Precedence: command-line flags, then the config file, then defaults.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use bucketsweep_analyze::DuplicateConfig;
use bucketsweep_core::{StorageTier, SweepConfig};
use bucketsweep_scan::{MAX_PAGE_SIZE, S3Options};

use crate::cli::Cli;

/// Errors from loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Contents of a `config.toml`. Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub bucket: Option<String>,
    pub prefix: Option<String>,
    pub age_threshold_days: Option<u32>,
    #[serde(default)]
    pub outputs: FileOutputs,
    pub tiers: Option<Vec<StorageTier>>,
    #[serde(default)]
    pub s3: FileS3,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileOutputs {
    pub csv: Option<PathBuf>,
    pub cost_report: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileS3 {
    pub region: Option<String>,
    pub endpoint_url: Option<String>,
    pub path_style: Option<bool>,
    pub page_size: Option<i32>,
}

impl FileConfig {
    /// Parse a config file.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load the explicit config file, or the per-user default if it exists.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::from_path(path),
            None => match default_config_path().filter(|p| p.is_file()) {
                Some(path) => {
                    tracing::debug!(path = %path.display(), "Using default config file");
                    Self::from_path(&path)
                }
                None => Ok(Self::default()),
            },
        }
    }
}

/// `<config dir>/bucketsweep/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("bucketsweep").join("config.toml"))
}

/// Everything a run needs, resolved from flags and file.
#[derive(Debug)]
pub struct Settings {
    pub sweep: SweepConfig,
    pub s3: S3Options,
    pub duplicates: DuplicateConfig,
}

/// Merge command-line flags over the config file.
pub fn resolve(cli: &Cli, file: FileConfig) -> Result<Settings, ConfigError> {
    let bucket = cli
        .bucket
        .clone()
        .or(file.bucket)
        .ok_or_else(|| ConfigError::Invalid("a bucket is required (--bucket or config file)".into()))?;

    let mut builder = SweepConfig::builder();
    builder.bucket(bucket);

    if let Some(prefix) = cli.prefix.clone().or(file.prefix) {
        builder.prefix(prefix);
    }
    if let Some(days) = cli.days.or(file.age_threshold_days) {
        builder.age_threshold_days(days);
    }
    if let Some(tiers) = file.tiers {
        builder.tiers(tiers);
    }

    let mut sweep = builder
        .build()
        .map_err(|e| ConfigError::Invalid(e.to_string()))?;

    if let Some(csv) = cli.csv.clone().or(file.outputs.csv) {
        sweep.outputs.csv = csv;
    }
    if let Some(cost_report) = cli.cost_report.clone().or(file.outputs.cost_report) {
        sweep.outputs.cost_report = cost_report;
    }

    let page_size = cli.page_size.or(file.s3.page_size);
    if let Some(size) = page_size.filter(|size| !(1..=MAX_PAGE_SIZE).contains(size)) {
        return Err(ConfigError::Invalid(format!(
            "page size must be between 1 and {MAX_PAGE_SIZE}, got {size}"
        )));
    }

    let s3 = S3Options {
        region: cli.region.clone().or(file.s3.region),
        endpoint_url: cli.endpoint_url.clone().or(file.s3.endpoint_url),
        force_path_style: cli.path_style || file.s3.path_style.unwrap_or(false),
        page_size,
    };

    let duplicates = DuplicateConfig {
        ignore_case: !cli.case_sensitive,
        require_hash: cli.require_hash,
    };

    Ok(Settings {
        sweep,
        s3,
        duplicates,
    })
}
