/*-------------------------------------------------------------------------------------------------
  Command Line Interface (CLI) Modules
-------------------------------------------------------------------------------------------------*/

mod args;

pub mod csv;
pub mod log;
pub mod output;

/*--------------------------------------------------------------------------------------
  CLI Module Interface
--------------------------------------------------------------------------------------*/

pub use args::Args;
pub use args::OutputFormat;

// Error type alias for CLI-only failures (output and CSV writing).
pub type CliError = Box<dyn std::error::Error + Send + Sync + 'static>;
pub type CliResult<T> = std::result::Result<T, CliError>;
