use crate::core::address_range_set::AddressRangeSet;
use crate::core::checker::{self, CheckResult, MatchMode, MembershipChecker};
use crate::core::errors::{Error, Result};
use chrono::{DateTime, Utc};
use log::{info, warn};
use reqwest::StatusCode;
use std::env;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/*-------------------------------------------------------------------------------------------------
  Simple Interface
-------------------------------------------------------------------------------------------------*/

/// _**Simple library interface**_ checks whether an IP address belongs to the AWS IP Ranges
/// using the default (environment-aware) [RangeStore] configuration.
///
/// ```no_run
/// let result = awsipcheck::check("13.32.91.219").unwrap();
/// if let Some(range) = result.first_match() {
///     println!("{} {} {}", range.cidr, range.region, range.service);
/// }
/// ```
pub fn check(ip: &str) -> Result<CheckResult> {
    RangeStore::new().check(ip, MatchMode::First)
}

/*-------------------------------------------------------------------------------------------------
  Cache State
-------------------------------------------------------------------------------------------------*/

/// When the in-memory AWS IP Ranges were last refreshed and how long they stay fresh.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CacheState {
    /// Time of the last successful refresh.
    pub last_refreshed: DateTime<Utc>,

    /// Seconds the data stays fresh; `0` never expires once loaded.
    pub ttl_seconds: u64,
}

impl CacheState {
    /// Data refreshed at `last_refreshed` is fresh at `now` while `now < last_refreshed + ttl`.
    pub fn is_fresh_at(&self, now: DateTime<Utc>) -> bool {
        !is_stale(self.last_refreshed, now, self.ttl_seconds)
    }
}

/*-------------------------------------------------------------------------------------------------
  Range Store Builder
-------------------------------------------------------------------------------------------------*/

/// A builder for the [RangeStore] struct that allows you to customize the store configuration.
///
/// ```
/// let store = awsipcheck::RangeStoreBuilder::new()
///     .url("https://ip-ranges.amazonaws.com/ip-ranges.json")
///     .cache_file("/tmp/aws-ip-ranges.json")
///     .cache_ttl(60 * 60) // 1 hour
///     .build();
/// ```
///
/// The [RangeStoreBuilder::new] method attempts to source configuration values from environment
/// variables when set and uses default values when the environment variables are not set.
///
/// If you want to use the default configuration values, ignoring any environment variables, use
/// the [RangeStoreBuilder::default] method to create a new [RangeStoreBuilder] instance.
#[derive(Debug, Clone)]
pub struct RangeStoreBuilder {
    url: String,
    cache_file: Option<PathBuf>,
    cache_ttl: u64,
}

/*--------------------------------------------------------------------------------------
  Range Store Builder Implementation
--------------------------------------------------------------------------------------*/

impl Default for RangeStoreBuilder {
    /// Create a new [RangeStoreBuilder] with default configuration values.
    ///
    /// ```
    /// let store = awsipcheck::RangeStoreBuilder::default().build();
    ///
    /// assert_eq!(store.url(), "https://ip-ranges.amazonaws.com/ip-ranges.json");
    /// assert!(store.cache_file().is_some());
    /// assert_eq!(store.cache_ttl(), 86400);
    /// ```
    fn default() -> Self {
        Self {
            url: "https://ip-ranges.amazonaws.com/ip-ranges.json".to_string(),
            cache_file: Some(default_cache_file()),
            cache_ttl: 24 * 60 * 60, // 24 hours
        }
    }
}

impl RangeStoreBuilder {
    /// Create a new [RangeStoreBuilder] reading initial configuration values from
    /// environment variables when set and default values when the environment
    /// variables are not set.
    ///
    /// The environment variables used to set the initial configuration values
    /// are:
    /// - `AWSIPCHECK_URL`
    /// - `AWSIPCHECK_CACHE_FILE` (an empty value disables the cache file)
    /// - `AWSIPCHECK_CACHE_TTL`
    pub fn new() -> Self {
        let default = RangeStoreBuilder::default();

        let cache_file = match env::var_os("AWSIPCHECK_CACHE_FILE") {
            Some(value) if value.is_empty() => {
                info!("Using AWSIPCHECK_CACHE_FILE: <disabled>");
                None
            }
            Some(value) => {
                info!("Using AWSIPCHECK_CACHE_FILE: {:?}", value);
                Some(PathBuf::from(value))
            }
            None => default.cache_file,
        };

        Self {
            url: get_env_var("AWSIPCHECK_URL", default.url),
            cache_file,
            cache_ttl: get_env_var("AWSIPCHECK_CACHE_TTL", default.cache_ttl),
        }
    }

    /*-------------------------------------------------------------------------
      Setters
    -------------------------------------------------------------------------*/

    /// Set the URL used to retrieve the AWS IP Ranges; defaults to
    /// `https://ip-ranges.amazonaws.com/ip-ranges.json` - see
    /// [AWS IP address ranges](https://docs.aws.amazon.com/vpc/latest/userguide/aws-ip-ranges.html)
    /// in the Amazon Virtual Private Cloud (VPC) User Guide for details.
    pub fn url(&mut self, url: &str) -> &mut Self {
        self.url = url.to_string();
        self
    }

    /// Set the file path used to cache the AWS IP Ranges JSON; defaults to
    /// `${HOME}/.aws/ip-ranges.json`.
    pub fn cache_file<P: AsRef<Path>>(&mut self, cache_file: P) -> &mut Self {
        self.cache_file = Some(cache_file.as_ref().to_path_buf());
        self
    }

    /// Do not read or write a cache file; every refresh requests the URL.
    pub fn no_cache_file(&mut self) -> &mut Self {
        self.cache_file = None;
        self
    }

    /// Set the time-to-live (in seconds) of the AWS IP Ranges, both in memory and in the
    /// cache file; defaults to 24 hours (`86400` seconds). `0` never expires once loaded.
    pub fn cache_ttl(&mut self, cache_ttl: u64) -> &mut Self {
        self.cache_ttl = cache_ttl;
        self
    }

    /*-------------------------------------------------------------------------
      Build Method
    -------------------------------------------------------------------------*/

    /// Build the [RangeStore]. No data is loaded until the first
    /// [RangeStore::ensure_fresh] (or [RangeStore::check]).
    pub fn build(&self) -> RangeStore {
        RangeStore {
            url: self.url.clone(),
            cache_file: self.cache_file.clone(),
            cache_ttl: self.cache_ttl,
            ranges: None,
            cache_state: None,
        }
    }
}

/*-------------------------------------------------------------------------------------------------
  Range Store
-------------------------------------------------------------------------------------------------*/

/// Owns the AWS IP Ranges, loaded from the cache file when it is available and fresh, or from
/// the URL when the cache is stale or unavailable.
///
/// A single staleness rule applies to both the in-memory ranges (age since the last refresh)
/// and the cache file (age since it was last modified): data is stale when the TTL is non-zero
/// and the age is at least the TTL.
///
/// ```no_run
/// let mut store = awsipcheck::RangeStore::new();
/// let result = store.check("13.32.91.219", awsipcheck::MatchMode::All).unwrap();
/// println!("found: {}", result.found);
/// ```
#[derive(Debug, Clone)]
pub struct RangeStore {
    url: String,
    cache_file: Option<PathBuf>,
    cache_ttl: u64,

    ranges: Option<AddressRangeSet>,
    cache_state: Option<CacheState>,
}

/*--------------------------------------------------------------------------------------
  Range Store Implementation
--------------------------------------------------------------------------------------*/

impl Default for RangeStore {
    /// Create a new [RangeStore] with default configuration values.
    fn default() -> Self {
        RangeStoreBuilder::default().build()
    }
}

impl RangeStore {
    pub fn new() -> Self {
        RangeStoreBuilder::new().build()
    }

    /*-------------------------------------------------------------------------
      Getters
    -------------------------------------------------------------------------*/

    /// Get the URL used to retrieve the AWS IP Ranges.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get the file path used to cache the AWS IP Ranges JSON, if any.
    pub fn cache_file(&self) -> Option<&Path> {
        self.cache_file.as_deref()
    }

    /// Get the time-to-live (in seconds) of the AWS IP Ranges.
    pub fn cache_ttl(&self) -> u64 {
        self.cache_ttl
    }

    /// Get the refresh state of the loaded AWS IP Ranges; `None` until the first successful
    /// refresh.
    pub fn cache_state(&self) -> Option<&CacheState> {
        self.cache_state.as_ref()
    }

    /// Get the time of the last successful refresh.
    pub fn last_refreshed(&self) -> Option<DateTime<Utc>> {
        self.cache_state.map(|cache_state| cache_state.last_refreshed)
    }

    /// Get the current snapshot of the AWS IP Ranges without refreshing it.
    pub fn ranges(&self) -> Option<&AddressRangeSet> {
        self.ranges.as_ref()
    }

    /*-------------------------------------------------------------------------
      Check
    -------------------------------------------------------------------------*/

    /// Validate `ip`, make sure the AWS IP Ranges are fresh, and check the address against
    /// them. An invalid address fails before any cache or network access.
    pub fn check(&mut self, ip: &str, mode: MatchMode) -> Result<CheckResult> {
        let address = checker::parse_ip(ip)?;
        let ranges = self.ensure_fresh()?;
        Ok(MembershipChecker::new(ranges)
            .mode(mode)
            .check_address(address))
    }

    /*-------------------------------------------------------------------------
      Ensure Fresh
    -------------------------------------------------------------------------*/

    /// Return the AWS IP Ranges, refreshing them first when nothing is loaded yet or the
    /// loaded data has expired. A failed refresh leaves any previously loaded ranges in place
    /// and returns the error.
    pub fn ensure_fresh(&mut self) -> Result<&AddressRangeSet> {
        self.ensure_fresh_at(Utc::now())
    }

    pub(crate) fn ensure_fresh_at(&mut self, now: DateTime<Utc>) -> Result<&AddressRangeSet> {
        let is_fresh = self
            .cache_state
            .is_some_and(|cache_state| cache_state.is_fresh_at(now));

        let ranges = match self.ranges.take() {
            Some(ranges) if is_fresh => ranges,
            previous => match self.refresh(now) {
                Ok(ranges) => {
                    self.cache_state = Some(CacheState {
                        last_refreshed: now,
                        ttl_seconds: self.cache_ttl,
                    });
                    ranges
                }
                Err(error) => {
                    self.ranges = previous;
                    return Err(error);
                }
            },
        };

        Ok(self.ranges.insert(ranges))
    }

    /*-------------------------------------------------------------------------
      Private Methods
    -------------------------------------------------------------------------*/

    /// Load a complete [AddressRangeSet] from the cache file or the URL.
    fn refresh(&self, now: DateTime<Utc>) -> Result<AddressRangeSet> {
        info!("Cache TTL {} seconds", self.cache_ttl);

        if let Some(cache_file) = &self.cache_file {
            info!("Cache file path: {:?}", cache_file);
            match self.get_ranges_from_file(cache_file, now) {
                Ok(Some(ranges)) => return Ok(ranges),
                Ok(None) => info!("No usable cache data; refresh cache"),
                Err(error) if !error.is_fatal() => warn!("{error}; refresh cache"),
                Err(error) => return Err(error),
            }
        }

        let json = self.get_json_from_url()?;
        let ranges = AddressRangeSet::from_json(&json).map_err(|error| {
            Error::RemoteFetchFailed {
                url: self.url.clone(),
                reason: format!("invalid JSON: {error}"),
            }
        })?;

        if let Some(cache_file) = &self.cache_file {
            // The fetched ranges are still usable when the cache cannot be written.
            if let Err(error) = cache_json_to_file(cache_file, &json) {
                warn!("Unable to cache AWS IP Ranges to {:?}: {}", cache_file, error);
            }
        }

        Ok(ranges)
    }

    /// Get the AWS IP Ranges from the cache file; `Ok(None)` when the file is stale or empty.
    fn get_ranges_from_file(
        &self,
        cache_file: &Path,
        now: DateTime<Utc>,
    ) -> Result<Option<AddressRangeSet>> {
        let unreadable = |reason: String| Error::CacheUnreadable {
            path: cache_file.to_path_buf(),
            reason,
        };

        let metadata = match fs::metadata(cache_file) {
            Ok(metadata) => metadata,
            Err(error) if error.kind() == ErrorKind::NotFound => {
                return Err(Error::CacheUnavailable {
                    path: cache_file.to_path_buf(),
                })
            }
            Err(error) => return Err(unreadable(error.to_string())),
        };

        if metadata.is_dir() {
            return Err(unreadable("path is a directory".to_string()));
        }

        let modified: DateTime<Utc> = metadata
            .modified()
            .map_err(|error| unreadable(error.to_string()))?
            .into();
        if is_stale(modified, now, self.cache_ttl) {
            return Ok(None);
        }
        info!("Cache file is fresh");

        let json = fs::read(cache_file).map_err(|error| unreadable(error.to_string()))?;
        if json.is_empty() {
            warn!("Cache file is empty: {:?}", cache_file);
            return Ok(None);
        }

        AddressRangeSet::from_json(&json)
            .map_err(|error| unreadable(format!("invalid JSON: {error}")))
            .map(Some)
            .inspect(|_| info!("Successfully read AWS IP Ranges from: {:?}", cache_file))
            .inspect_err(|error| log::error!("Failed to read AWS IP Ranges: {}", error))
    }

    /// Get the AWS IP Ranges JSON from the URL.
    fn get_json_from_url(&self) -> Result<Vec<u8>> {
        info!("Get AWS IP Ranges from URL: GET {}", self.url);

        let fetch_failed = |reason: String| Error::RemoteFetchFailed {
            url: self.url.clone(),
            reason,
        };

        let response = reqwest::blocking::get(&self.url)
            .map_err(|error| fetch_failed(error.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(fetch_failed(format!("HTTP status {status}")));
        }

        response
            .bytes()
            .map(|bytes| bytes.to_vec())
            .map_err(|error| fetch_failed(error.to_string()))
            .inspect(|_| info!("Get AWS IP Ranges from URL: Ok"))
            .inspect_err(|error| log::error!("Get AWS IP Ranges from URL: FAILED: {}", error))
    }
}

/*-------------------------------------------------------------------------------------------------
  Helper Functions
-------------------------------------------------------------------------------------------------*/

/// `${HOME}/.aws/ip-ranges.json`, or `<temp dir>/aws-ip-ranges.json` without a home directory.
fn default_cache_file() -> PathBuf {
    match dirs::home_dir() {
        Some(home_dir) => home_dir.join(".aws").join("ip-ranges.json"),
        None => env::temp_dir().join("aws-ip-ranges.json"),
    }
}

/// Data timestamped `since` is stale at `now` when `ttl` is non-zero and at least `ttl` seconds
/// have elapsed.
fn is_stale(since: DateTime<Utc>, now: DateTime<Utc>, ttl: u64) -> bool {
    if ttl == 0 {
        return false;
    }
    let ttl = i64::try_from(ttl).unwrap_or(i64::MAX);
    (now - since).num_seconds() >= ttl
}

/// Write the AWS IP Ranges JSON to the cache file.
fn cache_json_to_file(cache_file: &Path, json: &[u8]) -> std::io::Result<()> {
    // Ensure parent directories exist
    if let Some(parent) = cache_file.parent() {
        let _ = fs::create_dir_all(parent);
    }

    fs::write(cache_file, json)
        .inspect(|_| info!("Successfully cached AWS IP Ranges to: {:?}", cache_file))
}

/// Get and parse an environment variable value or return a default value.
fn get_env_var<T: std::str::FromStr>(env_var: &str, default: T) -> T {
    env::var(env_var)
        .ok()
        .and_then(|value| {
            value
                .parse::<T>()
                .inspect(|_| info!("Using {}: {}", env_var, value))
                .inspect_err(|_| warn!("Invalid {}: {}", env_var, value))
                .ok()
        })
        .unwrap_or(default)
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
