//! Scan summary and storage cost projection.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use bucketsweep_core::StorageTier;
use bucketsweep_core::units::round2;

use crate::error::ReportError;

/// Width the tier names are padded to in the cost summary.
const TIER_NAME_WIDTH: usize = 30;

/// Aggregate sizes for one run, all in gigabytes rounded to two decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScanSummary {
    /// Total size of all listed objects.
    pub total_gb: f64,
    /// Size held by duplicate copies.
    pub duplicate_gb: f64,
    /// What would remain after deleting the copies.
    pub remaining_gb: f64,
}

impl ScanSummary {
    /// Build a summary. The remaining size never goes below zero.
    pub fn new(total_gb: f64, duplicate_gb: f64) -> Self {
        let remaining = round2(total_gb - duplicate_gb);
        if remaining < 0.0 {
            // Copies are summed from rounded per-object sizes
            warn!(total_gb, duplicate_gb, "Duplicate size exceeds total size, clamping to zero");
        }
        Self {
            total_gb,
            duplicate_gb,
            remaining_gb: remaining.max(0.0),
        }
    }

    /// Project the monthly cost of the remaining data in every tier.
    pub fn project_costs(&self, tiers: &[StorageTier]) -> Vec<TierCost> {
        tiers
            .iter()
            .map(|tier| TierCost {
                tier: tier.name.clone(),
                price_per_gb: tier.price,
                monthly_cost: round2(self.remaining_gb * tier.price),
            })
            .collect()
    }
}

/// Projected monthly cost in one storage tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierCost {
    pub tier: String,
    /// USD per GB-month.
    pub price_per_gb: f64,
    /// USD per month, rounded to cents.
    pub monthly_cost: f64,
}

/// Render the plain-text cost summary.
pub fn render_cost_report(summary: &ScanSummary, costs: &[TierCost]) -> String {
    let mut lines = vec![
        "Storage Summary:".to_string(),
        format!("   Total Size Scanned         : {:.2} GB", summary.total_gb),
        format!("   Duplicate Size to Delete   : {:.2} GB", summary.duplicate_gb),
        format!("   Remaining Size After Clean : {:.2} GB", summary.remaining_gb),
        "   Monthly Storage Costs:".to_string(),
    ];
    lines.extend(costs.iter().map(|cost| {
        format!(
            "   - {:<width$}: ${:.2}",
            cost.tier,
            cost.monthly_cost,
            width = TIER_NAME_WIDTH
        )
    }));

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Write the rendered cost summary to `path`.
pub fn write_cost_report(path: &Path, report: &str) -> Result<(), ReportError> {
    std::fs::write(path, report).map_err(|e| ReportError::io(path, e))
}
