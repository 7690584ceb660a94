//! Collect the package names to check from an explicit list or package.json

use crate::error::{CheckError, Result};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::path::Path;

/// Dependency fields of a package.json manifest
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Manifest {
    #[serde(default)]
    dependencies: Map<String, Value>,
    #[serde(default)]
    dev_dependencies: Map<String, Value>,
}

/// Split a comma-separated package list.
///
/// Entries are trimmed, blanks dropped and duplicates removed, keeping the
/// first occurrence.
pub fn parse_package_list(input: &str) -> Vec<String> {
    dedup(input.split(',').map(str::trim).filter(|s| !s.is_empty()))
}

/// Read `dependencies` and `devDependencies` from a package.json.
///
/// Runtime dependencies come first, then development dependencies not
/// already listed, each in declaration order.
pub fn read_manifest(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| CheckError::manifest(path.display().to_string(), e.to_string()))?;

    let manifest: Manifest = serde_json::from_str(&content)
        .map_err(|e| CheckError::manifest(path.display().to_string(), e.to_string()))?;

    Ok(dedup(
        manifest
            .dependencies
            .keys()
            .chain(manifest.dev_dependencies.keys())
            .map(String::as_str),
    ))
}

/// Resolve the packages for a run.
///
/// A non-blank explicit list wins over the manifest. Ignored names are
/// removed afterwards.
pub fn collect_packages(
    explicit: Option<&str>,
    manifest_path: &Path,
    ignored: &HashSet<String>,
) -> Result<Vec<String>> {
    let packages = match explicit.filter(|s| !s.trim().is_empty()) {
        Some(list) => parse_package_list(list),
        None => read_manifest(manifest_path)?,
    };

    Ok(packages
        .into_iter()
        .filter(|name| !ignored.contains(name))
        .collect())
}

fn dedup<'a>(names: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    names
        .filter(|name| seen.insert(*name))
        .map(String::from)
        .collect()
}
