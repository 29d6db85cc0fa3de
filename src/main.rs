use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use owo_colors::{OwoColorize, Stream};
use tracing::{info, warn};

use crate::{
    cli::Cli,
    config::Config,
    loader::LoadError,
    record::{Buckets, Section},
};

mod cli;
mod config;
mod loader;
mod logging;
mod markup;
mod page;
mod record;
mod render;

fn main() -> ExitCode {
    let args = Cli::parse();
    logging::init_logging(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}

/// Load, render, write. Nothing touches the output file until the whole page
/// has been rendered in memory.
fn run(args: &Cli) -> anyhow::Result<()> {
    let config = Config::resolve(args)?;
    info!(input = %config.input.display(), output = %config.output.display(), "generating");

    let records = loader::load(&config.input)?;
    let buckets = Buckets::partition(records);
    if buckets.is_empty() {
        warn!(input = %config.input.display(), "no publications found; sections will be empty");
    }
    for section in Section::ALL {
        info!(section = section.anchor(), papers = buckets.get(section).len(), "partitioned");
    }

    let document = page::assemble(&buckets, &config.site)?;
    page::write(&document, &config.output)
        .with_context(|| format!("could not update {}", config.output.display()))?;

    println!(
        "Wrote {} ({} items).",
        config.output.display(),
        document.items
    );
    Ok(())
}

fn report(err: &anyhow::Error) {
    let label = "error:".if_supports_color(Stream::Stderr, |t| t.red());
    if let Some(LoadError::MissingInput { path }) = err.downcast_ref::<LoadError>() {
        eprintln!("{label} {} not found", path.display());
        eprintln!("Create the CSV (see template) and run again.");
    } else {
        eprintln!("{label} {err:#}");
    }
}
