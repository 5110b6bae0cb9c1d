use std::path::PathBuf;

use clap::{value_parser, ArgAction, Parser};
use reqpin_core::{LocalOverride, RegenConfig, DEFAULT_REQUIREMENTS_DIR, DEFAULT_VIRTUALENV};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Regenerate pinned requirements files from their raw counterparts",
    long_about = "Installs each requirements-<NAME>-raw.txt into a throwaway virtualenv, \
                  freezes it, and writes requirements-<NAME>.txt with comment annotations \
                  and ignore directives applied.",
    after_help = "Examples:\n  reqpin\n  reqpin tests docs\n  reqpin --requirements-dir misc/requirements --virtualenv ./venv/bin/virtualenv pylint"
)]
pub struct ReqpinCli {
    #[arg(
        value_name = "NAME",
        help = "Targets to regenerate (defaults to every raw file in the requirements directory)"
    )]
    pub names: Vec<String>,
    #[arg(
        long,
        env = "REQPIN_REQUIREMENTS_DIR",
        value_parser = value_parser!(PathBuf),
        default_value = DEFAULT_REQUIREMENTS_DIR,
        help = "Directory holding requirements-*-raw.txt files"
    )]
    pub requirements_dir: PathBuf,
    #[arg(
        long,
        env = "REQPIN_VIRTUALENV",
        value_name = "PROGRAM",
        default_value = DEFAULT_VIRTUALENV,
        help = "Program invoked as `PROGRAM DIR` to create the temporary environment"
    )]
    pub virtualenv: String,
    #[arg(long, value_name = "TEXT", help = "Generator name written into the file header")]
    pub generator: Option<String>,
    #[arg(
        long = "local-override",
        value_name = "PACKAGE=PATH",
        help = "Replace PACKAGE's pin with a local PATH (repeatable; replaces the built-in set)"
    )]
    pub local_overrides: Vec<LocalOverride>,
    #[arg(short, long, help = "Suppress titles and summaries (errors still print to stderr)")]
    pub quiet: bool,
    #[arg(short, long, action = ArgAction::Count, help = "Increase logging (-vv reaches trace)")]
    pub verbose: u8,
    #[arg(long, help = "Force trace logging regardless of -v/-q")]
    pub trace: bool,
    #[arg(long, help = "Disable colored human output")]
    pub no_color: bool,
}

impl ReqpinCli {
    pub fn config(&self) -> RegenConfig {
        let mut config = RegenConfig::default().with_requirements_dir(&self.requirements_dir);
        config.virtualenv.clone_from(&self.virtualenv);
        if let Some(generator) = &self.generator {
            config.generator.clone_from(generator);
        }
        if !self.local_overrides.is_empty() {
            config.local_overrides.clone_from(&self.local_overrides);
        }
        config
    }
}
