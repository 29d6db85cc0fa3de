use std::path::PathBuf;

use clap::Parser;

/// Generate a static publications page from a CSV table.
///
/// With no arguments, reads `publications.csv` and writes `publications.html`
/// in the current directory.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// CSV table of publications [default: publications.csv]
    #[arg(short, long, value_name = "CSV")]
    pub input: Option<PathBuf>,

    /// Where to write the page [default: publications.html]
    #[arg(short, long, value_name = "HTML")]
    pub output: Option<PathBuf>,

    /// TOML config file [default: pubpage.toml, if present]
    #[arg(short, long, value_name = "TOML")]
    pub config: Option<PathBuf>,

    /// Log more (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
