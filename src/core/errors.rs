use std::path::PathBuf;
use thiserror::Error;

/*-------------------------------------------------------------------------------------------------
  Errors and Results
-------------------------------------------------------------------------------------------------*/

/// Errors raised while loading the AWS IP Ranges or checking an IP address against them.
///
/// [Error::CacheUnavailable] and [Error::RangeParseSkipped] are recoverable and are handled
/// inside the crate (see [Error::is_fatal]); every other kind propagates to the caller.
#[derive(Debug, Error)]
pub enum Error {
    /// The checked value is not a well-formed IPv4 or IPv6 address.
    #[error("malformed IP provided [{input}]")]
    InvalidInput { input: String },

    /// The cache file does not exist; the ranges are fetched from the URL instead.
    #[error("cache file not found [{}]", .path.display())]
    CacheUnavailable { path: PathBuf },

    /// The cache file exists but cannot be used (directory, permissions, malformed JSON).
    #[error("cache file unreadable [{}]: {reason}", .path.display())]
    CacheUnreadable { path: PathBuf, reason: String },

    /// The AWS IP Ranges could not be retrieved from the URL.
    #[error("wrong server response from [{url}]: {reason}")]
    RemoteFetchFailed { url: String, reason: String },

    /// A single range entry carries a CIDR that cannot be parsed.
    #[error("skipped malformed CIDR [{cidr}]: {reason}")]
    RangeParseSkipped { cidr: String, reason: String },
}

impl Error {
    /// Fatal errors abort the current operation and are returned to the caller.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            Error::CacheUnavailable { .. } | Error::RangeParseSkipped { .. }
        )
    }
}

// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/*--------------------------------------------------------------------------------------
  Log Error Function
--------------------------------------------------------------------------------------*/

#[cfg(test)]
pub(crate) fn log_error(error: &Error) {
    log::error!("{}", error);
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_message() {
        let error = Error::InvalidInput {
            input: "a.a.a.a".to_string(),
        };
        assert_eq!(error.to_string(), "malformed IP provided [a.a.a.a]");
        assert!(error.is_fatal());
    }

    #[test]
    fn test_cache_unreadable_names_path() {
        let error = Error::CacheUnreadable {
            path: PathBuf::from("/tmp/ranges"),
            reason: "path is a directory".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "cache file unreadable [/tmp/ranges]: path is a directory"
        );
        assert!(error.is_fatal());
    }

    #[test]
    fn test_remote_fetch_failed_names_url() {
        let error = Error::RemoteFetchFailed {
            url: "https://ip-ranges.amazonaws.com/ip-ranges.json.wrong".to_string(),
            reason: "HTTP status 404 Not Found".to_string(),
        };
        assert!(error
            .to_string()
            .contains("[https://ip-ranges.amazonaws.com/ip-ranges.json.wrong]"));
        assert!(error.is_fatal());
    }

    #[test]
    fn test_non_fatal_kinds() {
        let unavailable = Error::CacheUnavailable {
            path: PathBuf::from("/tmp/missing.json"),
        };
        let skipped = Error::RangeParseSkipped {
            cidr: "10.0.0.0/33".to_string(),
            reason: "invalid prefix".to_string(),
        };
        assert!(!unavailable.is_fatal());
        assert!(!skipped.is_fatal());
    }
}
