use atty::Stream;
use clap::Parser;
use color_eyre::{eyre::eyre, Result};
use reqpin_core::{enumerate_targets, RegenerationReport, Regenerator};

mod cli;
mod style;

use cli::ReqpinCli;
use style::Style;

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = ReqpinCli::parse();
    init_tracing(cli.trace, cli.verbose);

    let config = cli.config();
    let style = Style::new(cli.no_color, atty::is(Stream::Stdout));
    let regenerator = Regenerator::system(config).map_err(|err| eyre!("{err:?}"))?;
    let targets = enumerate_targets(cli.names.clone(), regenerator.config().requirements_dir())
        .map_err(|err| eyre!("{err:?}"))?;

    for name in targets {
        let name = name.map_err(|err| eyre!("{err:?}"))?;
        if !cli.quiet {
            println!();
            println!("{}", style.title(&name));
        }
        let report = regenerator
            .regenerate(&name)
            .map_err(|err| eyre!("{err:?}"))?;
        if !cli.quiet {
            println!("{}", style.success(&summary(&report)));
        }
    }

    Ok(())
}

fn summary(report: &RegenerationReport) -> String {
    let mut line = format!(
        "wrote {} pinned requirement{} to {}",
        report.written,
        if report.written == 1 { "" } else { "s" },
        report.output.display()
    );
    if report.omitted > 0 {
        line.push_str(&format!(" ({} ignored)", report.omitted));
    }
    line
}

fn init_tracing(trace: bool, verbose: u8) {
    let level = if trace {
        "trace"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = format!("reqpin={level},reqpin_core={level},reqpin_cli={level}");
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
