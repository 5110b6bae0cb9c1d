use std::path::{Path, PathBuf};

use reqpin_domain::{output_file_name, raw_file_name, LocalOverride, DEFAULT_GENERATOR};

pub const DEFAULT_REQUIREMENTS_DIR: &str = "misc/requirements";
pub const DEFAULT_VIRTUALENV: &str = "virtualenv";

/// Everything a regeneration run needs to know up front.
#[derive(Debug, Clone)]
pub struct RegenConfig {
    pub requirements_dir: PathBuf,
    pub virtualenv: String,
    pub generator: String,
    pub local_overrides: Vec<LocalOverride>,
}

impl Default for RegenConfig {
    fn default() -> Self {
        Self {
            requirements_dir: PathBuf::from(DEFAULT_REQUIREMENTS_DIR),
            virtualenv: DEFAULT_VIRTUALENV.to_string(),
            generator: DEFAULT_GENERATOR.to_string(),
            local_overrides: LocalOverride::defaults(),
        }
    }
}

impl RegenConfig {
    #[must_use]
    pub fn with_requirements_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.requirements_dir = dir.into();
        self
    }

    #[must_use]
    pub fn requirements_dir(&self) -> &Path {
        &self.requirements_dir
    }

    #[must_use]
    pub fn raw_path(&self, name: &str) -> PathBuf {
        self.requirements_dir.join(raw_file_name(name))
    }

    #[must_use]
    pub fn output_path(&self, name: &str) -> PathBuf {
        self.requirements_dir.join(output_file_name(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_misc_requirements() {
        let config = RegenConfig::default();
        assert_eq!(config.requirements_dir(), Path::new("misc/requirements"));
        assert_eq!(config.virtualenv, "virtualenv");
        assert_eq!(config.generator, "reqpin");
        assert_eq!(config.local_overrides, LocalOverride::defaults());
    }

    #[test]
    fn paths_derive_from_name() {
        let config = RegenConfig::default().with_requirements_dir("/repo/reqs");
        assert_eq!(
            config.raw_path("docs"),
            PathBuf::from("/repo/reqs/requirements-docs-raw.txt")
        );
        assert_eq!(
            config.output_path("docs"),
            PathBuf::from("/repo/reqs/requirements-docs.txt")
        );
    }
}
