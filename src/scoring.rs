//! Classification rules for download counts and repository activity

use crate::config::MaintenanceConfig;
use crate::types::{DownloadTier, Level, MaintenanceStatus, RepositoryHealth};
use chrono::{DateTime, Datelike, Utc};

/// Lower bounds (inclusive) for each tier above `Low`, highest first
const TIER_THRESHOLDS: [(u64, DownloadTier); 3] = [
    (100_000, DownloadTier::VeryPopular),
    (10_000, DownloadTier::WidelyUsed),
    (1_000, DownloadTier::Normal),
];

/// Assign a popularity tier to a weekly download count
pub fn classify_downloads(downloads: u64) -> DownloadTier {
    TIER_THRESHOLDS
        .iter()
        .find(|(min, _)| downloads >= *min)
        .map(|(_, tier)| *tier)
        .unwrap_or(DownloadTier::Low)
}

/// Level at which a tier is reported
pub fn tier_level(tier: DownloadTier) -> Level {
    match tier {
        DownloadTier::Low => Level::Warning,
        _ => Level::Info,
    }
}

/// Whole calendar months between two instants.
///
/// Only the year and month components count, so 2023-01-31 to 2023-02-01 is
/// one month. Negative when `from` is after `to`.
pub fn months_between(from: DateTime<Utc>, to: DateTime<Utc>) -> i32 {
    (to.year() - from.year()) * 12 + (to.month() as i32 - from.month() as i32)
}

/// Whether a push this many months ago exceeds the staleness threshold
pub fn exceeds_stale_threshold(months_since_push: i32, config: &MaintenanceConfig) -> bool {
    i64::from(months_since_push) > i64::from(config.stale_after_months)
}

/// Decide the maintenance status of a repository as of `now`.
///
/// `archived` is only set when archived repositories are configured to warn.
pub fn assess_maintenance(
    repo: &RepositoryHealth,
    now: DateTime<Utc>,
    config: &MaintenanceConfig,
) -> MaintenanceStatus {
    let months = months_between(repo.pushed_at, now);
    let archived = repo.is_archived && config.warn_on_archived;

    if exceeds_stale_threshold(months, config) || archived {
        MaintenanceStatus::Stale {
            months_since_push: months,
            archived,
        }
    } else {
        MaintenanceStatus::Maintained {
            months_since_push: months,
            stars: repo.stars,
            open_issues: repo.open_issues,
        }
    }
}

/// Format a count with `,` thousands separators
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    out
}
