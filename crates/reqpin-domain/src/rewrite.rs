use std::{borrow::Cow, fmt, str::FromStr};

use anyhow::{bail, Context, Result};
use regex::Regex;

/// Drops the `@<commit>` part of an SCM pin while keeping the `#` that follows
/// it (and the whitespace in front of that `#`).
const COMMIT_SUFFIX_PATTERN: &str = r"@[^#]*?(\s*#)";
const COMMIT_SUFFIX_REPLACEMENT: &str = "$1";

/// A package whose pinned entry is swapped for a path inside the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalOverride {
    pub package: String,
    pub path: String,
}

impl LocalOverride {
    pub fn new(package: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            path: path.into(),
        }
    }

    /// The in-tree pylint checkers are installed from a local path, never
    /// from an index.
    #[must_use]
    pub fn defaults() -> Vec<Self> {
        vec![Self::new("qute-pylint", "./scripts/dev/pylint_checkers")]
    }
}

impl FromStr for LocalOverride {
    type Err = anyhow::Error;

    fn from_str(raw: &str) -> Result<Self> {
        let Some((package, path)) = raw.split_once('=') else {
            bail!("local override `{raw}` must look like PACKAGE=PATH");
        };
        let package = package.trim();
        let path = path.trim();
        if package.is_empty() || path.is_empty() {
            bail!("local override `{raw}` must name both a package and a path");
        }
        Ok(Self::new(package, path))
    }
}

impl fmt::Display for LocalOverride {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.package, self.path)
    }
}

#[derive(Debug, Clone)]
pub struct RewriteRule {
    pattern: Regex,
    replacement: String,
}

impl RewriteRule {
    /// `replacement` may reference capture groups with `$n`.
    pub fn new(pattern: &str, replacement: impl Into<String>) -> Result<Self> {
        let pattern =
            Regex::new(pattern).with_context(|| format!("invalid rewrite pattern `{pattern}`"))?;
        Ok(Self {
            pattern,
            replacement: replacement.into(),
        })
    }

    pub fn commit_suffix() -> Result<Self> {
        Self::new(COMMIT_SUFFIX_PATTERN, COMMIT_SUFFIX_REPLACEMENT)
    }

    pub fn local_override(entry: &LocalOverride) -> Result<Self> {
        let pattern = format!("^{}==.*$", regex::escape(&entry.package));
        Self::new(&pattern, entry.path.replace('$', "$$"))
    }

    pub fn apply<'a>(&self, line: &'a str) -> Cow<'a, str> {
        self.pattern.replace_all(line, self.replacement.as_str())
    }

    #[must_use]
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

/// Rules applied to every resolved line, in order: the commit-suffix strip
/// first, then one rule per local override in configuration order.
#[derive(Debug, Clone)]
pub struct RewriteRules {
    rules: Vec<RewriteRule>,
}

impl RewriteRules {
    pub fn new(overrides: &[LocalOverride]) -> Result<Self> {
        let mut rules = Vec::with_capacity(overrides.len() + 1);
        rules.push(RewriteRule::commit_suffix()?);
        for entry in overrides {
            rules.push(RewriteRule::local_override(entry)?);
        }
        Ok(Self { rules })
    }

    pub fn standard() -> Result<Self> {
        Self::new(&LocalOverride::defaults())
    }

    #[must_use]
    pub fn apply(&self, line: &str) -> String {
        self.rules
            .iter()
            .fold(line.to_string(), |current, rule| {
                rule.apply(&current).into_owned()
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = &RewriteRule> {
        self.rules.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
