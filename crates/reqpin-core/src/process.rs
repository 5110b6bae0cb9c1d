use std::{
    ffi::OsStr,
    path::Path,
    process::{Command, Stdio},
};

use anyhow::{Context, Result};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct RunOutput {
    pub code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl RunOutput {
    #[must_use]
    pub fn success(&self) -> bool {
        self.code == 0
    }
}

/// Execute a program and capture stdout/stderr in full.
///
/// # Errors
///
/// Returns an error when the program cannot be spawned or waited on, or when
/// its stdout is not valid UTF-8.
pub fn run_command<S: AsRef<OsStr>>(program: &Path, args: &[S], cwd: &Path) -> Result<RunOutput> {
    let mut command = configured_command(program, args, cwd);
    command.stdin(Stdio::null());
    let output = command
        .output()
        .with_context(|| format!("failed to start {}", program.display()))?;
    let code = output.status.code().unwrap_or(-1);
    let stdout = String::from_utf8(output.stdout)
        .with_context(|| format!("{} output is not UTF-8", program.display()))?;
    Ok(RunOutput {
        code,
        stdout,
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    })
}

/// Execute a program with inherited stdout/stderr so its progress stays
/// visible.
///
/// # Errors
///
/// Returns an error when the program cannot be spawned or waited on.
pub fn run_command_passthrough<S: AsRef<OsStr>>(
    program: &Path,
    args: &[S],
    cwd: &Path,
) -> Result<RunOutput> {
    let mut command = configured_command(program, args, cwd);
    command.stdin(Stdio::null());
    command.stdout(Stdio::inherit());
    command.stderr(Stdio::inherit());

    let status = command
        .status()
        .with_context(|| format!("failed to start {}", program.display()))?;
    Ok(RunOutput {
        code: status.code().unwrap_or(-1),
        stdout: String::new(),
        stderr: String::new(),
    })
}

fn configured_command<S: AsRef<OsStr>>(program: &Path, args: &[S], cwd: &Path) -> Command {
    debug!(
        program = %program.display(),
        args = ?args.iter().map(|arg| arg.as_ref().to_string_lossy()).collect::<Vec<_>>(),
        "running"
    );
    let mut command = Command::new(program);
    command.args(args);
    command.current_dir(cwd);
    // keep pip output free of self-upgrade notices
    command.env("PIP_DISABLE_PIP_VERSION_CHECK", "1");
    command
}
