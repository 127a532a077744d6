use awsipcheck::CheckResult;
use clap_verbosity_flag::Verbosity;
use log::{info, warn, Level};

/*-------------------------------------------------------------------------------------------------
  Logging Functions
-------------------------------------------------------------------------------------------------*/

/*--------------------------------------------------------------------------------------
  Initialize Logging
--------------------------------------------------------------------------------------*/

/// Install `stderrlog` at the level selected with `-v`/`-q`.
pub fn init(verbose: &Verbosity) -> Result<(), log::SetLoggerError> {
    let (quiet, verbosity): (bool, usize) = match verbose.log_level() {
        None => (true, 0),
        Some(Level::Error) => (false, 0),
        Some(Level::Warn) => (false, 1),
        Some(Level::Info) => (false, 2),
        Some(Level::Debug) => (false, 3),
        Some(Level::Trace) => (false, 4),
    };

    stderrlog::new()
        .module("awsipcheck")
        .quiet(quiet)
        .verbosity(verbosity)
        .init()
}

/*--------------------------------------------------------------------------------------
  Check Result
--------------------------------------------------------------------------------------*/

pub fn check_result(check_result: &CheckResult) {
    info!(
        "Checked {} against the AWS IP Ranges (sync token {})",
        check_result.address, check_result.sync_token
    );

    let count_matches = check_result.matches.len();
    if check_result.found {
        info!("Found {count_matches} matching AWS IP range(s)");
    } else {
        warn!("{} not found in the AWS IP Ranges", check_result.address);
    }

    let count_skipped = check_result.skipped.len();
    if count_skipped > 0 {
        warn!("Skipped {count_skipped} malformed AWS IP range(s)");
    };
}
