//! # npm_dependency_health
//!
//! A CI helper that checks a project's npm dependencies for:
//! - **Popularity**: weekly download counts sorted into four tiers
//! - **Maintenance**: months since the GitHub repository was last pushed to,
//!   plus stars and open issues
//!
//! Findings are emitted as info/warning lines through a [`Reporter`], which
//! speaks GitHub Actions workflow commands when running under Actions.
//!
//! ## Quick Start
//!
//! ```no_run
//! use npm_dependency_health::{check_packages, parse_package_list, CheckConfig, MemoryReporter};
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let config = CheckConfig::default();
//! let packages = parse_package_list("react, left-pad");
//! let mut reporter = MemoryReporter::new();
//!
//! let report = check_packages(&packages, &config, &mut reporter).await?;
//! for pkg in &report.packages {
//!     println!("{}: {:?}", pkg.name, pkg.tier);
//! }
//! # Ok(())
//! # }
//! ```

mod check;
mod config;
mod error;
mod metadata;
mod parser;
mod report;
mod repository;
mod scoring;
mod types;

// Re-export public API
pub use check::check_packages;
pub use config::{CheckConfig, CheckConfigBuilder, MaintenanceConfig, NetworkConfig};
pub use error::{CheckError, Result};
pub use parser::{collect_packages, parse_package_list, read_manifest};
pub use report::{
    escape_command_data, running_in_github_actions, ConsoleReporter, GithubActionsReporter,
    MemoryReporter, Reporter,
};
pub use repository::{normalize_repository, RepositoryDescriptor};
pub use scoring::{assess_maintenance, classify_downloads, format_count, months_between};
pub use types::{
    CheckReport, CheckSummary, DownloadStat, DownloadTier, Level, MaintenanceStatus, PackageReport,
    ReportLine, RepositoryHealth,
};
