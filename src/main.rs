use std::env;
use std::ffi::OsString;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use pileup_tally::{init_tracing, process_pileup, RunConfig, RunSummary};
use tracing::info;

const USAGE_EXIT_CODE: i32 = 2;
const EXPECTED_ARGS: usize = 2;

#[derive(Parser, Debug)]
#[command(
    name = "pileup-tally",
    about = "Count A/T/C/G/N, insertions and deletions per pileup position",
    disable_help_flag = true,
    disable_version_flag = true
)]
struct Cli {
    /// Pileup text file (`<ref>\t<pos>\t<base>\t<depth>\t<bases>...` per line).
    input: PathBuf,
    /// Tally table to write.
    output: PathBuf,
}

fn main() -> Result<()> {
    let cli = parse_cli(env::args_os().collect()).unwrap_or_else(|| {
        println!("{}", Cli::command().render_usage());
        process::exit(USAGE_EXIT_CODE);
    });

    init_tracing();
    let config = RunConfig::new(cli.input, cli.output);
    let summary = run_tally(&config)?;
    info!(
        input = %config.input.display(),
        output = %config.output.display(),
        rows = summary.rows_written,
        "wrote tally table"
    );

    Ok(())
}

/// Accept exactly two arguments, taken verbatim as paths.
///
/// The count is checked on the raw argv, and the paths are handed to clap
/// behind `--` so values such as `-reads.pileup` or `--` stay positional.
fn parse_cli(argv: Vec<OsString>) -> Option<Cli> {
    let mut argv = argv.into_iter();
    let program = argv.next()?;
    let paths: Vec<OsString> = argv.collect();
    if paths.len() != EXPECTED_ARGS {
        return None;
    }

    let escaped = [program, OsString::from("--")].into_iter().chain(paths);
    Cli::try_parse_from(escaped).ok()
}

fn run_tally(config: &RunConfig) -> Result<RunSummary> {
    let reader = BufReader::new(File::open(&config.input).with_context(|| {
        format!("failed to open pileup file {}", config.input.display())
    })?);
    let mut writer = BufWriter::new(File::create(&config.output).with_context(|| {
        format!("failed to create output file {}", config.output.display())
    })?);

    process_pileup(reader, &mut writer)
        .with_context(|| format!("failed to tally {}", config.input.display()))
}
