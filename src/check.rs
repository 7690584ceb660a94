//! Main check orchestration logic

use crate::config::CheckConfig;
use crate::error::Result;
use crate::metadata::{build_client, fetch_download_stat, fetch_package_document, fetch_repository_health};
use crate::report::Reporter;
use crate::repository::normalize_repository;
use crate::scoring::{
    assess_maintenance, classify_downloads, exceeds_stale_threshold, format_count, tier_level,
};
use crate::types::{CheckReport, DownloadTier, Level, MaintenanceStatus, PackageReport, ReportLine};
use chrono::{DateTime, Utc};
use reqwest::Client;
use tracing::{debug, info};

/// Check every package in order and report the findings.
///
/// Lookup failures for a package are reported as warnings and the run moves
/// on. Only a failing reporter aborts the run.
pub async fn check_packages<R: Reporter + ?Sized>(
    packages: &[String],
    config: &CheckConfig,
    reporter: &mut R,
) -> Result<CheckReport> {
    let mut report = CheckReport::new();

    if packages.is_empty() {
        reporter.info("No packages to check.")?;
        return Ok(report);
    }

    info!("Checking {} packages", packages.len());

    let client = build_client(&config.network)?;
    let now = report.timestamp;

    for name in packages {
        let mut pkg = PackageReport::new(name.as_str());
        let mut sink = LineSink {
            pkg: &mut pkg,
            reporter: &mut *reporter,
        };

        check_downloads(&client, name, config, &mut sink).await?;
        inspect_maintenance(&client, name, config, now, &mut sink).await?;

        report.packages.push(pkg);
    }

    report.compute_summary();

    info!(
        "Check complete: {} packages, {} warnings, {} stale repositories",
        report.summary.total_packages, report.summary.warnings, report.summary.stale,
    );
    reporter.info(&format!(
        "Checked {} packages: {} warnings.",
        report.summary.total_packages, report.summary.warnings
    ))?;

    Ok(report)
}

/// Records a line on the package report and forwards it to the reporter
struct LineSink<'a, R: Reporter + ?Sized> {
    pkg: &'a mut PackageReport,
    reporter: &'a mut R,
}

impl<R: Reporter + ?Sized> LineSink<'_, R> {
    fn push(&mut self, level: Level, message: String) -> Result<()> {
        let line = ReportLine { level, message };
        self.reporter.emit(&line)?;
        self.pkg.lines.push(line);
        Ok(())
    }
}

/// Classify last week's download count
async fn check_downloads<R: Reporter + ?Sized>(
    client: &Client,
    name: &str,
    config: &CheckConfig,
    sink: &mut LineSink<'_, R>,
) -> Result<()> {
    let stat = match fetch_download_stat(client, name, &config.network).await {
        Ok(stat) => stat,
        Err(e) if e.is_http_status() => {
            debug!("Download lookup for {} failed: {}", name, e);
            return sink.push(
                Level::Warning,
                format!("❌ \"{}\": package lookup failed or the package does not exist", name),
            );
        }
        Err(e) => {
            return sink.push(
                Level::Warning,
                format!("❌ \"{}\": could not check weekly downloads: {}", name, e),
            );
        }
    };

    let tier = classify_downloads(stat.weekly_downloads);
    let icon = match tier {
        DownloadTier::VeryPopular => "🌟",
        DownloadTier::WidelyUsed => "✅",
        DownloadTier::Normal => "✔️",
        DownloadTier::Low => "⚠️",
    };
    let message = format!(
        "{} \"{}\": {} weekly downloads ({})",
        icon,
        name,
        format_count(stat.weekly_downloads),
        tier
    );

    sink.pkg.downloads = Some(stat);
    sink.pkg.tier = Some(tier);
    sink.push(tier_level(tier), message)
}

/// Look up the package's repository and judge how recently it was pushed to
async fn inspect_maintenance<R: Reporter + ?Sized>(
    client: &Client,
    name: &str,
    config: &CheckConfig,
    now: DateTime<Utc>,
    sink: &mut LineSink<'_, R>,
) -> Result<()> {
    let document = match fetch_package_document(client, name, &config.network).await {
        Ok(doc) => doc,
        Err(e) => {
            sink.pkg.maintenance = MaintenanceStatus::Unavailable { reason: e.to_string() };
            return sink.push(
                Level::Warning,
                format!("❌ \"{}\": registry lookup failed, cannot assess maintenance ({})", name, e),
            );
        }
    };

    let Some(repo_path) = normalize_repository(document.repository.as_ref()) else {
        sink.pkg.maintenance = MaintenanceStatus::NoRepository;
        return sink.push(
            Level::Warning,
            format!("⚠️ \"{}\": no repository info, cannot assess maintenance", name),
        );
    };
    sink.pkg.repository = Some(repo_path.clone());

    let health = match fetch_repository_health(client, &repo_path, &config.network).await {
        Ok(health) => health,
        Err(e) => {
            sink.pkg.maintenance = MaintenanceStatus::Unavailable { reason: e.to_string() };
            return sink.push(
                Level::Warning,
                format!("❌ \"{}\": repository {} lookup failed ({})", name, repo_path, e),
            );
        }
    };

    let status = assess_maintenance(&health, now, &config.maintenance);
    let (level, message) = match &status {
        MaintenanceStatus::Stale { months_since_push, archived }
            if exceeds_stale_threshold(*months_since_push, &config.maintenance) =>
        {
            let archived_note = if *archived { ", repository is archived" } else { "" };
            (
                Level::Warning,
                format!(
                    "⚠️ \"{}\": last push {} months ago, maintenance may be insufficient{}",
                    name, months_since_push, archived_note
                ),
            )
        }
        MaintenanceStatus::Stale { months_since_push, .. } => (
            Level::Warning,
            format!(
                "⚠️ \"{}\": repository {} is archived (last push {} months ago)",
                name, repo_path, months_since_push
            ),
        ),
        MaintenanceStatus::Maintained {
            months_since_push,
            stars,
            open_issues,
        } => (
            Level::Info,
            format!(
                "🛠️ \"{}\": last push {} months ago, {} stars, {} open issues",
                name,
                months_since_push,
                format_count(*stars),
                format_count(*open_issues)
            ),
        ),
        MaintenanceStatus::NoRepository | MaintenanceStatus::Unavailable { .. } => (
            Level::Warning,
            format!("⚠️ \"{}\": cannot assess maintenance", name),
        ),
    };

    sink.pkg.maintenance = status;
    sink.push(level, message)
}
