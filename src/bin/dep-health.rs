//! CLI for checking npm dependency health in CI

use anyhow::Context;
use clap::{Parser, ValueEnum};
use npm_dependency_health::{
    check_packages, collect_packages, running_in_github_actions, CheckConfig, CheckReport,
    ConsoleReporter, GithubActionsReporter, Reporter,
};
use std::path::{Path, PathBuf};
use std::process;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "dep-health")]
#[command(about = "Check npm dependencies for download popularity and repository maintenance", long_about = None)]
#[command(version)]
struct Cli {
    /// Comma-separated package names to check (takes precedence over the manifest)
    #[arg(short = 'p', long, env = "INPUT_PACKAGES")]
    packages: Option<String>,

    /// Path to the package.json whose dependencies are checked
    #[arg(short = 'm', long, default_value = "package.json")]
    manifest: PathBuf,

    /// Path to custom configuration file (TOML)
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Packages to skip (can be specified multiple times)
    #[arg(long = "ignore")]
    ignore_packages: Vec<String>,

    /// Months without a push after which a repository is reported as stale
    #[arg(long)]
    stale_after_months: Option<u32>,

    /// Exit with a failure when any warning was reported
    #[arg(long)]
    fail_on_warning: bool,

    /// Write the full JSON report to this file
    #[arg(long)]
    report: Option<PathBuf>,

    /// Output style for reported lines
    #[arg(long, value_enum, default_value = "auto")]
    output: OutputMode,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputMode {
    /// GitHub Actions workflow commands when GITHUB_ACTIONS=true, console otherwise
    Auto,
    /// GitHub Actions workflow commands
    Github,
    /// Colored console output
    Console,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let mut reporter: Box<dyn Reporter> = match cli.output {
        OutputMode::Github => Box::new(GithubActionsReporter::stdout()),
        OutputMode::Console => Box::new(ConsoleReporter::stdout()),
        OutputMode::Auto if running_in_github_actions() => Box::new(GithubActionsReporter::stdout()),
        OutputMode::Auto => Box::new(ConsoleReporter::stdout()),
    };

    match run(&cli, reporter.as_mut()).await {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            if reporter.failure(&format!("{:#}", e)).is_err() {
                eprintln!("Error: {:#}", e);
            }
            process::exit(1);
        }
    }
}

/// Run the checks. Returns whether the run passed.
async fn run(cli: &Cli, reporter: &mut dyn Reporter) -> anyhow::Result<bool> {
    let config = load_config(cli)?;

    let packages = collect_packages(
        cli.packages.as_deref(),
        &cli.manifest,
        &config.ignored_packages,
    )?;
    debug!("Packages to check: {:?}", packages);

    let report = check_packages(&packages, &config, &mut *reporter).await?;

    if let Some(path) = &cli.report {
        write_report(&report, path)?;
        info!("Report written to: {}", path.display());
    }

    if config.fail_on_warning && report.has_warnings() {
        reporter.failure(&format!(
            "{} warnings reported and fail-on-warning is enabled",
            report.summary.warnings
        ))?;
        return Ok(false);
    }

    Ok(true)
}

fn load_config(cli: &Cli) -> anyhow::Result<CheckConfig> {
    let mut config = match &cli.config {
        Some(path) => CheckConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => CheckConfig::default(),
    };

    // CLI flags override the config file
    config
        .ignored_packages
        .extend(cli.ignore_packages.iter().cloned());
    if let Some(months) = cli.stale_after_months {
        config.maintenance.stale_after_months = months;
    }
    if cli.fail_on_warning {
        config.fail_on_warning = true;
    }

    Ok(config)
}

fn write_report(report: &CheckReport, path: &Path) -> anyhow::Result<()> {
    let content = report.to_json().context("Failed to serialize report")?;
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write report to {}", path.display()))
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
