use crate::core::errors::{Error, Result};
use ipnetwork::IpNetwork;
use serde::Serialize;
use std::net::IpAddr;

/*-------------------------------------------------------------------------------------------------
  Address Range
-------------------------------------------------------------------------------------------------*/

/// A single published AWS IP range: the CIDR prefix and the region and service it is assigned
/// to. Serializes with the field names used in the published JSON document.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct AddressRange {
    /// IPv4 or IPv6 prefix in CIDR notation, exactly as published.
    #[serde(rename = "ip_prefix")]
    pub cidr: String,

    /// AWS region the prefix is associated with.
    pub region: String,

    /// AWS service that uses the prefix.
    pub service: String,

    /// Network border group the prefix is associated with, when published.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_border_group: Option<String>,
}

impl AddressRange {
    /// Parse the range's CIDR notation.
    pub fn network(&self) -> Result<IpNetwork> {
        self.cidr
            .parse::<IpNetwork>()
            .map_err(|error| Error::RangeParseSkipped {
                cidr: self.cidr.clone(),
                reason: error.to_string(),
            })
    }

    /// Check whether the range contains an address. IPv4-mapped IPv6 addresses
    /// (`::ffff:a.b.c.d`) are checked against IPv4 ranges; other addresses of the other family
    /// are never contained.
    pub fn contains(&self, address: IpAddr) -> Result<bool> {
        let network = self.network()?;
        let address = match (network, address) {
            (IpNetwork::V4(_), IpAddr::V6(v6)) => match v6.to_ipv4_mapped() {
                Some(v4) => IpAddr::V4(v4),
                None => address,
            },
            _ => address,
        };
        Ok(network.contains(address))
    }
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
