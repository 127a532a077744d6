use crate::core::address_range::AddressRange;
use crate::core::address_range_set::AddressRangeSet;
use crate::core::errors::{Error, Result};
use chrono::{DateTime, Utc};
use log::{trace, warn};
use serde::Serialize;
use std::net::IpAddr;

/*-------------------------------------------------------------------------------------------------
  Match Mode
-------------------------------------------------------------------------------------------------*/

/// Controls how far a membership check scans the address ranges.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum MatchMode {
    /// Stop at the first range (in document order) that contains the address.
    #[default]
    First,

    /// Collect every range that contains the address.
    All,
}

/*-------------------------------------------------------------------------------------------------
  Check Result
-------------------------------------------------------------------------------------------------*/

/// Outcome of a membership check.
#[derive(Clone, Debug, Serialize)]
pub struct CheckResult {
    /// The checked IP address.
    pub address: IpAddr,

    /// `true` when at least one range contains the address.
    pub found: bool,

    /// Matching ranges in document order; at most one unless [MatchMode::All] was used.
    pub matches: Vec<AddressRange>,

    /// CIDRs skipped during the scan because they could not be parsed.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<String>,

    /// Sync token of the range set the address was checked against.
    pub sync_token: String,

    /// Publication date of the range set the address was checked against.
    #[serde(with = "crate::core::datetime")]
    pub create_date: DateTime<Utc>,
}

impl CheckResult {
    /// The first matching range, if any.
    pub fn first_match(&self) -> Option<&AddressRange> {
        self.matches.first()
    }
}

/*-------------------------------------------------------------------------------------------------
  Membership Checker
-------------------------------------------------------------------------------------------------*/

/// Checks IP addresses against a snapshot of the AWS IP Ranges.
///
/// ```
/// # fn main() -> awsipcheck::Result<()> {
/// let ranges: awsipcheck::AddressRangeSet = [awsipcheck::AddressRange {
///     cidr: "13.32.0.0/15".to_string(),
///     region: "GLOBAL".to_string(),
///     service: "AMAZON".to_string(),
///     network_border_group: None,
/// }]
/// .into_iter()
/// .collect();
///
/// let checker = awsipcheck::MembershipChecker::new(&ranges);
/// let result = checker.check("13.32.91.219")?;
/// assert!(result.found);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Copy, Debug)]
pub struct MembershipChecker<'r> {
    ranges: &'r AddressRangeSet,
    mode: MatchMode,
}

impl<'r> MembershipChecker<'r> {
    pub fn new(ranges: &'r AddressRangeSet) -> Self {
        Self {
            ranges,
            mode: MatchMode::First,
        }
    }

    /// Set the [MatchMode] used by [MembershipChecker::check].
    pub fn mode(mut self, mode: MatchMode) -> Self {
        self.mode = mode;
        self
    }

    /// Check whether an IP address falls within the AWS IP Ranges.
    ///
    /// Fails with [Error::InvalidInput] when `ip` is not a well-formed IPv4 or IPv6 address.
    pub fn check(&self, ip: &str) -> Result<CheckResult> {
        let address = parse_ip(ip)?;
        Ok(self.check_address(address))
    }

    /// Check an already parsed IP address. Ranges with malformed CIDRs are logged, recorded
    /// in [CheckResult::skipped], and otherwise ignored.
    pub fn check_address(&self, address: IpAddr) -> CheckResult {
        let mut matches = Vec::new();
        let mut skipped = Vec::new();

        // TODO: Replace the linear scan with a prefix trie ordered by insertion index.
        for range in self.ranges.ranges() {
            match range.contains(address) {
                Ok(true) => {
                    trace!("{address} matched {}", range.cidr);
                    matches.push(range.clone());
                    if self.mode == MatchMode::First {
                        break;
                    }
                }
                Ok(false) => {}
                Err(error) => {
                    warn!("{error}");
                    skipped.push(range.cidr.clone());
                }
            }
        }

        CheckResult {
            address,
            found: !matches.is_empty(),
            matches,
            skipped,
            sync_token: self.ranges.sync_token().to_string(),
            create_date: *self.ranges.create_date(),
        }
    }
}

/*-------------------------------------------------------------------------------------------------
  Helper Functions
-------------------------------------------------------------------------------------------------*/

/// Parse an IPv4 or IPv6 address.
pub(crate) fn parse_ip(ip: &str) -> Result<IpAddr> {
    ip.parse::<IpAddr>().map_err(|_| Error::InvalidInput {
        input: ip.to_string(),
    })
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
