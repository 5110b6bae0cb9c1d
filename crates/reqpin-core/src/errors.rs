use std::{fmt, path::PathBuf};

/// External step of a regeneration that runs a subprocess.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolStep {
    Provision,
    Install,
    Freeze,
}

impl ToolStep {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ToolStep::Provision => "environment provisioning",
            ToolStep::Install => "package installation",
            ToolStep::Freeze => "package freeze",
        }
    }
}

impl fmt::Display for ToolStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RegenError {
    #[error("raw requirements file not found: {}", .path.display())]
    MissingManifest { path: PathBuf },
    #[error("environment provisioner `{program}` not found on PATH")]
    ProvisionerNotFound { program: String },
    #[error("{step} failed: `{program}` exited with status {code}{}", stderr_suffix(.stderr))]
    ToolFailed {
        step: ToolStep,
        program: String,
        code: i32,
        stderr: String,
    },
}

fn stderr_suffix(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("\n{trimmed}")
    }
}
