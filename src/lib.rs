//! Check whether an IP address belongs to the published AWS IP Ranges.
//!
//! The ranges are loaded by a [RangeStore], which reuses a local cache file while it is fresh
//! and requests `https://ip-ranges.amazonaws.com/ip-ranges.json` otherwise. A
//! [MembershipChecker] scans a snapshot of the ranges for the address.
//!
//! ```no_run
//! # fn main() -> awsipcheck::Result<()> {
//! let mut store = awsipcheck::RangeStoreBuilder::new()
//!     .cache_file("/tmp/aws-ip-ranges.json")
//!     .cache_ttl(60 * 60)
//!     .build();
//!
//! let result = store.check("13.32.91.219", awsipcheck::MatchMode::First)?;
//! if let Some(range) = result.first_match() {
//!     println!("{} {} {}", range.cidr, range.region, range.service);
//! }
//! # Ok(())
//! # }
//! ```

/*-------------------------------------------------------------------------------------------------
  Modules
-------------------------------------------------------------------------------------------------*/

mod core;

/*-------------------------------------------------------------------------------------------------
  Library Interface
-------------------------------------------------------------------------------------------------*/

pub use crate::core::address_range::AddressRange;
pub use crate::core::address_range_set::AddressRangeSet;
pub use crate::core::checker::{CheckResult, MatchMode, MembershipChecker};
pub use crate::core::errors::{Error, Result};
pub use crate::core::range_store::{check, CacheState, RangeStore, RangeStoreBuilder};

/// Date helpers for the `createDate` format of the published document.
pub mod datetime {
    pub use crate::core::datetime::{format, parse};
}

pub use ipnetwork;
