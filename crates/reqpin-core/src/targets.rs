use std::{fs, path::Path, vec};

use anyhow::{Context, Result};
use reqpin_domain::name_from_raw_file;

/// Names derived lazily from `requirements-<name>-raw.txt` files, in the order
/// the filesystem lists them.
#[derive(Debug)]
pub struct TargetNames {
    entries: fs::ReadDir,
}

impl Iterator for TargetNames {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.entries.next()? {
                Ok(entry) => entry,
                Err(err) => {
                    return Some(Err(err).context("failed to read requirements directory entry"))
                }
            };
            let file_name = entry.file_name();
            let Some(file_name) = file_name.to_str() else {
                continue;
            };
            if let Some(name) = name_from_raw_file(file_name) {
                if entry.path().is_file() {
                    return Some(Ok(name.to_string()));
                }
            }
        }
    }
}

/// Scan `dir` for raw manifests.
pub fn discover_targets(dir: &Path) -> Result<TargetNames> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("failed to read requirements directory {}", dir.display()))?;
    Ok(TargetNames { entries })
}

#[derive(Debug)]
pub enum Targets {
    Explicit(vec::IntoIter<String>),
    Discovered(TargetNames),
}

impl Iterator for Targets {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Targets::Explicit(names) => names.next().map(Ok),
            Targets::Discovered(names) => names.next(),
        }
    }
}

/// Explicit names win; with none given every raw manifest in `dir` is a target.
pub fn enumerate_targets(names: Vec<String>, dir: &Path) -> Result<Targets> {
    if names.is_empty() {
        Ok(Targets::Discovered(discover_targets(dir)?))
    } else {
        Ok(Targets::Explicit(names.into_iter()))
    }
}
