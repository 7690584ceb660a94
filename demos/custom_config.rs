//! Example showing custom configuration

use npm_dependency_health::{
    check_packages, parse_package_list, CheckConfig, MaintenanceConfig, MaintenanceStatus,
    MemoryReporter, NetworkConfig,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Create custom configuration
    let config = CheckConfig::builder()
        .maintenance(MaintenanceConfig {
            stale_after_months: 6, // 6 months instead of 1 year
            warn_on_archived: true,
        })
        .network(NetworkConfig {
            timeout_secs: 10,
            max_retries: 5,
            ..NetworkConfig::default()
        })
        .ignore_package("some-dev-tool")
        .build();
    config.validate()?;

    let packages = parse_package_list("express, lodash, some-dev-tool, left-pad");
    let packages: Vec<String> = packages
        .into_iter()
        .filter(|p| !config.ignored_packages.contains(p))
        .collect();

    println!("Checking with custom configuration...\n");

    // Collect lines in memory instead of printing them as they arrive
    let mut reporter = MemoryReporter::new();
    let report = check_packages(&packages, &config, &mut reporter).await?;

    println!("=== Custom Check Results ===");
    println!("Warnings: {}", report.summary.warnings);

    let stale: Vec<_> = report
        .packages
        .iter()
        .filter(|p| matches!(p.maintenance, MaintenanceStatus::Stale { .. }))
        .collect();

    if !stale.is_empty() {
        println!("\n⚠  Stale packages:");
        for pkg in stale {
            println!("  - {} ({})", pkg.name, pkg.repository.as_deref().unwrap_or("unknown"));
        }
    }

    for line in &reporter.lines {
        println!("[{}] {}", line.level, line.message);
    }

    Ok(())
}
