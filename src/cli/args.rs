use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/*-------------------------------------------------------------------------------------------------
  Command Line Interface (CLI) Arguments
-------------------------------------------------------------------------------------------------*/

#[derive(Parser, Debug)]
#[command(author, version, about = "Check whether an IP address belongs to the AWS IP ranges.", long_about = None)]
pub struct Args {
    /// IP address to check (IPv4 or IPv6)
    #[arg(env = "AWSIPCHECK_IP")]
    pub ip: String,

    /// File path used to cache the AWS IP ranges JSON [default: ~/.aws/ip-ranges.json]
    #[arg(short = 'p', long = "path", conflicts_with = "no_cache")]
    pub cache_file: Option<PathBuf>,

    /// Do not read or write the cache file
    #[arg(long)]
    pub no_cache: bool,

    /// Seconds the cached AWS IP ranges stay fresh; 0 never expires [default: 86400]
    #[arg(short = 't', long = "ttl", value_name = "SECONDS")]
    pub cache_ttl: Option<u64>,

    /// URL used to retrieve the AWS IP ranges
    #[arg(long)]
    pub url: Option<String>,

    /// Print the matching AWS IP range details
    #[arg(short = 'e', long, env = "AWSIPCHECK_EXTRA")]
    pub extra: bool,

    /// Report every matching AWS IP range instead of the first
    #[arg(short = 'a', long, env = "AWSIPCHECK_ALL")]
    pub all: bool,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value_t = OutputFormat::Text, env = "AWSIPCHECK_OUTPUT")]
    pub output: OutputFormat,

    /// Save the matching AWS IP ranges to a CSV file
    #[arg(long = "csv", value_name = "FILE")]
    pub csv_file: Option<PathBuf>,

    /// Logging verbosity
    #[command(flatten)]
    pub verbose: clap_verbosity_flag::Verbosity,
}

/*--------------------------------------------------------------------------------------
  Output Format
--------------------------------------------------------------------------------------*/

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// One-line summary
    Text,

    /// JSON document
    Json,

    /// Table of matching ranges
    Table,
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
