#![deny(clippy::all, warnings)]

mod config;
mod environment;
mod errors;
mod process;
mod regenerate;
mod targets;

pub use crate::config::{RegenConfig, DEFAULT_REQUIREMENTS_DIR, DEFAULT_VIRTUALENV};
pub use crate::environment::{
    PackageResolver, PipResolver, ProvisionedEnv, Provisioner, ScopedEnvironment,
    VirtualenvProvisioner,
};
pub use crate::errors::{RegenError, ToolStep};
pub use crate::process::{run_command, run_command_passthrough, RunOutput};
pub use crate::regenerate::{RegenerationReport, Regenerator};
pub use crate::targets::{discover_targets, enumerate_targets, TargetNames, Targets};

pub use reqpin_domain::{CommentTable, LocalOverride, RewriteRules};
