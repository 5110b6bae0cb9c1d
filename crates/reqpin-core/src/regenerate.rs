use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use reqpin_domain::{read_comments_file, render_manifest, RewriteRules};
use tracing::debug;

use crate::{
    config::RegenConfig,
    environment::{
        PackageResolver, PipResolver, Provisioner, ScopedEnvironment, VirtualenvProvisioner,
    },
    errors::RegenError,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegenerationReport {
    pub name: String,
    pub output: PathBuf,
    pub written: usize,
    pub omitted: usize,
}

/// Turns raw manifests into pinned ones, one target at a time.
pub struct Regenerator<P, R> {
    config: RegenConfig,
    rules: RewriteRules,
    provisioner: P,
    resolver: R,
}

impl Regenerator<VirtualenvProvisioner, PipResolver> {
    /// Regenerator backed by `virtualenv` and the environment's `pip`.
    pub fn system(config: RegenConfig) -> Result<Self> {
        let provisioner = VirtualenvProvisioner::new(config.virtualenv.clone());
        Self::new(config, provisioner, PipResolver)
    }
}

impl<P: Provisioner, R: PackageResolver> Regenerator<P, R> {
    pub fn new(config: RegenConfig, provisioner: P, resolver: R) -> Result<Self> {
        let rules = RewriteRules::new(&config.local_overrides)?;
        Ok(Self {
            config,
            rules,
            provisioner,
            resolver,
        })
    }

    #[must_use]
    pub fn config(&self) -> &RegenConfig {
        &self.config
    }

    /// Regenerate `requirements-<name>.txt` from `requirements-<name>-raw.txt`.
    pub fn regenerate(&self, name: &str) -> Result<RegenerationReport> {
        let raw = self.config.raw_path(name);
        let output = self.config.output_path(name);
        if !raw.is_file() {
            return Err(RegenError::MissingManifest { path: raw }.into());
        }

        let frozen = self.resolve(&raw)?;
        let comments = read_comments_file(&raw)?;
        debug!(
            annotations = comments.annotations().count(),
            ignored = comments.ignored().len(),
            "read raw manifest comments"
        );

        let manifest = render_manifest(&self.config.generator, &frozen, &comments, &self.rules);
        write_manifest(&output, &manifest.contents)?;
        debug!(
            output = %output.display(),
            written = manifest.written,
            omitted = manifest.omitted,
            "wrote pinned requirements"
        );
        Ok(RegenerationReport {
            name: name.to_string(),
            output,
            written: manifest.written,
            omitted: manifest.omitted,
        })
    }

    /// Install `raw` into a throwaway environment and return its freeze output.
    /// The environment is gone by the time this returns, on success or error.
    fn resolve(&self, raw: &Path) -> Result<String> {
        let scoped = ScopedEnvironment::create(&self.provisioner)?;
        self.resolver.install(scoped.env(), raw)?;
        let frozen = self.resolver.freeze(scoped.env())?;
        scoped.close()?;
        Ok(frozen)
    }
}

fn write_manifest(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))
}
