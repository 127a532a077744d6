mod cli;

use awsipcheck::{CheckResult, MatchMode, RangeStoreBuilder};
use clap::Parser;
use cli::{CliResult, OutputFormat};
use std::process::ExitCode;

/*-------------------------------------------------------------------------------------------------
  Exit Codes
-------------------------------------------------------------------------------------------------*/

const EXIT_FOUND: u8 = 0;
const EXIT_NOT_FOUND: u8 = 1;
const EXIT_ERROR: u8 = 2;

/*-------------------------------------------------------------------------------------------------
  Main
-------------------------------------------------------------------------------------------------*/

fn main() -> ExitCode {
    let args = cli::Args::parse();

    if let Err(error) = cli::log::init(&args.verbose) {
        eprintln!("Unable to initialize logging: {error}");
    }

    match run(&args) {
        Ok(check_result) if check_result.found => ExitCode::from(EXIT_FOUND),
        Ok(_) => ExitCode::from(EXIT_NOT_FOUND),
        Err(error) => {
            log::error!("{error}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/*--------------------------------------------------------------------------------------
  Run
--------------------------------------------------------------------------------------*/

fn run(args: &cli::Args) -> CliResult<CheckResult> {
    // Environment configuration first, then explicit CLI arguments
    let mut builder = RangeStoreBuilder::new();
    if let Some(url) = &args.url {
        builder.url(url);
    }
    if let Some(cache_file) = &args.cache_file {
        builder.cache_file(cache_file);
    }
    if args.no_cache {
        builder.no_cache_file();
    }
    if let Some(cache_ttl) = args.cache_ttl {
        builder.cache_ttl(cache_ttl);
    }

    let mode = if args.all {
        MatchMode::All
    } else {
        MatchMode::First
    };

    let check_result = builder.build().check(&args.ip, mode)?;
    cli::log::check_result(&check_result);

    match args.output {
        OutputFormat::Text => println!("{}", cli::output::text(&check_result, args.extra)?),
        OutputFormat::Json => println!("{}", cli::output::json(&check_result)?),
        OutputFormat::Table => println!("{}", cli::output::range_table(&check_result)),
    }

    if let Some(csv_file) = &args.csv_file {
        cli::csv::save(&check_result, csv_file)?;
    }

    Ok(check_result)
}
