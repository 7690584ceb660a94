//! Basic example of checking a package.json with the library API

use npm_dependency_health::{check_packages, read_manifest, CheckConfig, ConsoleReporter, DownloadTier};
use std::path::Path;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Use default configuration
    let config = CheckConfig::default();

    // Check the dependencies of the project in the current directory
    let manifest = Path::new("package.json");
    println!("Checking dependencies from: {}", manifest.display());

    let packages = read_manifest(manifest)?;
    let mut reporter = ConsoleReporter::stdout();
    let report = check_packages(&packages, &config, &mut reporter).await?;

    println!("\n=== Check Results ===");
    println!("Total packages: {}", report.summary.total_packages);
    println!("  Very popular: {}", report.summary.very_popular);
    println!("  Widely used: {}", report.summary.widely_used);
    println!("  Normal usage: {}", report.summary.normal);
    println!("  Low usage: {}", report.summary.low_usage);
    println!("  Stale repositories: {}", report.summary.stale);
    println!();

    let low: Vec<_> = report
        .packages
        .iter()
        .filter(|p| p.tier == Some(DownloadTier::Low))
        .collect();

    if !low.is_empty() {
        println!("Low-usage packages:");
        for pkg in low {
            let downloads = pkg.downloads.as_ref().map(|d| d.weekly_downloads).unwrap_or(0);
            println!("  - {}: {} weekly downloads", pkg.name, downloads);
        }
    } else {
        println!("✓ No low-usage packages found!");
    }

    Ok(())
}
