use std::{
    fs,
    io::{BufRead, BufReader},
    path::Path,
};

use anyhow::{Context, Result};
use indexmap::IndexMap;

/// Comment key whose value lists packages to drop from the generated manifest.
pub const IGNORE_KEY: &str = "ignore";

/// Metadata collected from `# key: value` comments in a raw manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentTable {
    annotations: IndexMap<String, String>,
    ignored: Vec<String>,
}

impl CommentTable {
    /// Record a `key: comment` pair. Later keys overwrite earlier ones, and the
    /// `ignore` key replaces the ignore set rather than annotating a package.
    pub fn insert(&mut self, key: impl Into<String>, comment: impl Into<String>) {
        let key = key.into();
        let comment = comment.into();
        if key == IGNORE_KEY {
            self.ignored = parse_ignore_list(&comment);
        } else {
            self.annotations.insert(key, comment);
        }
    }

    #[must_use]
    pub fn annotation(&self, package: &str) -> Option<&str> {
        self.annotations.get(package).map(String::as_str)
    }

    #[must_use]
    pub fn is_ignored(&self, package: &str) -> bool {
        self.ignored.iter().any(|name| name == package)
    }

    #[must_use]
    pub fn ignored(&self) -> &[String] {
        &self.ignored
    }

    pub fn annotations(&self) -> impl Iterator<Item = (&str, &str)> {
        self.annotations
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty() && self.ignored.is_empty()
    }
}

fn parse_ignore_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

/// Scan a raw manifest for comment metadata.
///
/// Only lines starting with `#` and containing a colon contribute; everything
/// else is skipped.
pub fn read_comments<R: BufRead>(reader: R) -> Result<CommentTable> {
    let mut table = CommentTable::default();
    for line in reader.lines() {
        let line = line.context("failed to read raw manifest line")?;
        if let Some((key, comment)) = parse_comment_line(&line) {
            table.insert(key, comment);
        }
    }
    Ok(table)
}

pub fn read_comments_file(path: &Path) -> Result<CommentTable> {
    let file = fs::File::open(path)
        .with_context(|| format!("failed to open raw manifest {}", path.display()))?;
    read_comments(BufReader::new(file))
        .with_context(|| format!("failed to read comments from {}", path.display()))
}

fn parse_comment_line(line: &str) -> Option<(&str, &str)> {
    if !line.starts_with('#') {
        return None;
    }
    let (key, comment) = line.split_once(':')?;
    let key = key.trim_start_matches(['#', ' ']).trim();
    Some((key, comment.trim()))
}
