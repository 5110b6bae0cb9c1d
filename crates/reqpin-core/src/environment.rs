use std::{
    ffi::OsStr,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use tempfile::TempDir;
use tracing::{debug, info};

use crate::{
    errors::{RegenError, ToolStep},
    process::{run_command, run_command_passthrough, RunOutput},
};

/// A virtualenv-style environment rooted at a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionedEnv {
    root: PathBuf,
}

impl ProvisionedEnv {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn bin_dir(&self) -> PathBuf {
        if cfg!(windows) {
            self.root.join("Scripts")
        } else {
            self.root.join("bin")
        }
    }

    #[must_use]
    pub fn executable(&self, name: &str) -> PathBuf {
        if cfg!(windows) {
            self.bin_dir().join(format!("{name}.exe"))
        } else {
            self.bin_dir().join(name)
        }
    }

    #[must_use]
    pub fn pip(&self) -> PathBuf {
        self.executable("pip")
    }
}

/// Creates an isolated environment inside a directory it does not own.
pub trait Provisioner {
    fn provision(&self, root: &Path) -> Result<ProvisionedEnv>;
}

/// Installs requirements into an environment and reports what ended up there.
pub trait PackageResolver {
    fn install(&self, env: &ProvisionedEnv, requirements: &Path) -> Result<()>;
    fn freeze(&self, env: &ProvisionedEnv) -> Result<String>;
}

/// Runs `<program> <root>`, e.g. `virtualenv /tmp/reqpin-xyz`.
#[derive(Debug, Clone)]
pub struct VirtualenvProvisioner {
    program: String,
}

impl VirtualenvProvisioner {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Provisioner for VirtualenvProvisioner {
    fn provision(&self, root: &Path) -> Result<ProvisionedEnv> {
        let program = which::which(&self.program).map_err(|_| RegenError::ProvisionerNotFound {
            program: self.program.clone(),
        })?;
        info!(path = %root.display(), "creating virtualenv");
        let output = run_command_passthrough(&program, &[root.as_os_str()], Path::new("."))?;
        check_status(ToolStep::Provision, &program, output)?;
        Ok(ProvisionedEnv::new(root))
    }
}

/// Uses the environment's own `pip`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PipResolver;

impl PackageResolver for PipResolver {
    fn install(&self, env: &ProvisionedEnv, requirements: &Path) -> Result<()> {
        let pip = env.pip();
        info!(requirements = %requirements.display(), "installing requirements");
        let output = run_command_passthrough(
            &pip,
            &[OsStr::new("install"), OsStr::new("-r"), requirements.as_os_str()],
            Path::new("."),
        )?;
        check_status(ToolStep::Install, &pip, output)?;
        Ok(())
    }

    fn freeze(&self, env: &ProvisionedEnv) -> Result<String> {
        let pip = env.pip();
        let output = run_command(&pip, &["freeze"], Path::new("."))?;
        let output = check_status(ToolStep::Freeze, &pip, output)?;
        debug!(lines = output.stdout.lines().count(), "pip freeze finished");
        Ok(output.stdout)
    }
}

fn check_status(step: ToolStep, program: &Path, output: RunOutput) -> Result<RunOutput> {
    if output.success() {
        return Ok(output);
    }
    Err(RegenError::ToolFailed {
        step,
        program: program.display().to_string(),
        code: output.code,
        stderr: output.stderr,
    }
    .into())
}

/// A provisioned environment living in a temporary directory.
///
/// The directory is deleted recursively when this value is dropped, whether
/// regeneration finished or bailed out early.
#[derive(Debug)]
pub struct ScopedEnvironment {
    env: ProvisionedEnv,
    dir: TempDir,
}

impl ScopedEnvironment {
    pub fn create(provisioner: &dyn Provisioner) -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix("reqpin-")
            .tempdir()
            .context("failed to create temporary environment directory")?;
        debug!(path = %dir.path().display(), "temporary environment directory");
        let env = provisioner.provision(dir.path())?;
        Ok(Self { env, dir })
    }

    #[must_use]
    pub fn env(&self) -> &ProvisionedEnv {
        &self.env
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Remove the directory now and report failures instead of ignoring them.
    pub fn close(self) -> Result<()> {
        let path = self.dir.path().to_path_buf();
        self.dir
            .close()
            .with_context(|| format!("failed to remove {}", path.display()))
    }
}
