//! Core data types for dependency health reporting

use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Weekly download count for a package
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadStat {
    pub package: String,
    pub weekly_downloads: u64,
}

/// Repository metrics used for the maintenance inspection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryHealth {
    /// `owner/repo` as reported by the host
    pub full_name: String,
    pub pushed_at: DateTime<Utc>,
    pub stars: u64,
    pub open_issues: u64,
    pub is_archived: bool,
}

/// Popularity tier assigned from a weekly download count
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DownloadTier {
    /// Fewer than 1,000 weekly downloads
    Low,
    /// At least 1,000 weekly downloads
    Normal,
    /// At least 10,000 weekly downloads
    WidelyUsed,
    /// At least 100,000 weekly downloads
    VeryPopular,
}

impl std::fmt::Display for DownloadTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::VeryPopular => write!(f, "very popular"),
            Self::WidelyUsed => write!(f, "widely used"),
            Self::Normal => write!(f, "normal usage"),
            Self::Low => write!(f, "low usage - use with caution"),
        }
    }
}

/// Severity of a reported line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Info,
    Warning,
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
        }
    }
}

/// A single message emitted for a package
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportLine {
    pub level: Level,
    pub message: String,
}

/// Outcome of the maintenance inspection for one package
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MaintenanceStatus {
    /// Pushed to within the staleness window
    Maintained {
        months_since_push: i32,
        stars: u64,
        open_issues: u64,
    },
    /// Last push is older than the staleness window, or the repository is archived
    Stale { months_since_push: i32, archived: bool },
    /// The registry document carries no usable GitHub repository
    NoRepository,
    /// A lookup failed; the reason is kept for the report
    Unavailable { reason: String },
}

/// Everything observed for one package during the run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageReport {
    pub name: String,
    /// Present when the download statistics lookup succeeded
    pub downloads: Option<DownloadStat>,
    pub tier: Option<DownloadTier>,
    /// `owner/repo` when one could be derived
    pub repository: Option<String>,
    pub maintenance: MaintenanceStatus,
    /// Lines emitted for this package, in order
    pub lines: Vec<ReportLine>,
}

impl PackageReport {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            downloads: None,
            tier: None,
            repository: None,
            maintenance: MaintenanceStatus::Unavailable {
                reason: "not inspected".to_string(),
            },
            lines: Vec::new(),
        }
    }

    /// Number of warning lines emitted for this package
    pub fn warning_count(&self) -> usize {
        self.lines.iter().filter(|l| l.level == Level::Warning).count()
    }
}

/// Complete result of a check run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckReport {
    /// Timestamp when the run started
    pub timestamp: DateTime<Utc>,
    pub packages: Vec<PackageReport>,
    pub summary: CheckSummary,
}

/// Summary statistics for a check run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckSummary {
    pub total_packages: usize,
    pub warnings: usize,
    pub very_popular: usize,
    pub widely_used: usize,
    pub normal: usize,
    pub low_usage: usize,
    pub download_lookups_failed: usize,
    pub maintained: usize,
    pub stale: usize,
    pub without_repository: usize,
}

impl CheckReport {
    pub fn new() -> Self {
        Self {
            timestamp: Utc::now(),
            packages: Vec::new(),
            summary: CheckSummary::default(),
        }
    }

    /// Compute summary statistics from package reports
    pub fn compute_summary(&mut self) {
        let mut summary = CheckSummary {
            total_packages: self.packages.len(),
            ..CheckSummary::default()
        };

        for pkg in &self.packages {
            summary.warnings += pkg.warning_count();

            match pkg.tier {
                Some(DownloadTier::VeryPopular) => summary.very_popular += 1,
                Some(DownloadTier::WidelyUsed) => summary.widely_used += 1,
                Some(DownloadTier::Normal) => summary.normal += 1,
                Some(DownloadTier::Low) => summary.low_usage += 1,
                None => summary.download_lookups_failed += 1,
            }

            match pkg.maintenance {
                MaintenanceStatus::Maintained { .. } => summary.maintained += 1,
                MaintenanceStatus::Stale { .. } => summary.stale += 1,
                MaintenanceStatus::NoRepository => summary.without_repository += 1,
                MaintenanceStatus::Unavailable { .. } => {}
            }
        }

        self.summary = summary;
    }

    /// Whether any package produced a warning
    pub fn has_warnings(&self) -> bool {
        self.packages.iter().any(|p| p.warning_count() > 0)
    }

    /// Pretty-printed JSON for the report file
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Default for CheckReport {
    fn default() -> Self {
        Self::new()
    }
}
