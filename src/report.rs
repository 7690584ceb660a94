//! Reporting of leveled lines and the failure signal to the CI host

use crate::types::{Level, ReportLine};
use colored::Colorize;
use std::io::{self, Stdout, Write};

/// Destination for the lines a check run emits
pub trait Reporter {
    /// An informational line
    fn info(&mut self, message: &str) -> io::Result<()>;

    /// A warning line. The run continues.
    fn warning(&mut self, message: &str) -> io::Result<()>;

    /// The terminal failure signal for the run
    fn failure(&mut self, message: &str) -> io::Result<()>;

    /// Emit a line at the given level
    fn emit(&mut self, line: &ReportLine) -> io::Result<()> {
        match line.level {
            Level::Info => self.info(&line.message),
            Level::Warning => self.warning(&line.message),
        }
    }
}

/// Writes GitHub Actions workflow commands
pub struct GithubActionsReporter<W: Write> {
    out: W,
}

impl GithubActionsReporter<Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> GithubActionsReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Reporter for GithubActionsReporter<W> {
    fn info(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.out, "{}", message)
    }

    fn warning(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.out, "::warning::{}", escape_command_data(message))
    }

    fn failure(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.out, "::error::{}", escape_command_data(message))
    }
}

/// Escape message data for a workflow command
pub fn escape_command_data(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Human-oriented output for local runs
pub struct ConsoleReporter<W: Write> {
    out: W,
}

impl ConsoleReporter<Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn info(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.out, "{} {}", "info:".cyan(), message)
    }

    fn warning(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.out, "{} {}", "warning:".yellow().bold(), message)
    }

    fn failure(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.out, "{} {}", "error:".red().bold(), message)
    }
}

/// Keeps every line in memory
#[derive(Debug, Default)]
pub struct MemoryReporter {
    pub lines: Vec<ReportLine>,
    pub failure: Option<String>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages of the given level, in emission order
    pub fn messages(&self, level: Level) -> Vec<&str> {
        self.lines
            .iter()
            .filter(|l| l.level == level)
            .map(|l| l.message.as_str())
            .collect()
    }
}

impl Reporter for MemoryReporter {
    fn info(&mut self, message: &str) -> io::Result<()> {
        self.lines.push(ReportLine {
            level: Level::Info,
            message: message.to_string(),
        });
        Ok(())
    }

    fn warning(&mut self, message: &str) -> io::Result<()> {
        self.lines.push(ReportLine {
            level: Level::Warning,
            message: message.to_string(),
        });
        Ok(())
    }

    fn failure(&mut self, message: &str) -> io::Result<()> {
        self.failure = Some(message.to_string());
        Ok(())
    }
}

/// Whether the process runs inside a GitHub Actions job
pub fn running_in_github_actions() -> bool {
    std::env::var("GITHUB_ACTIONS").map(|v| v == "true").unwrap_or(false)
}
