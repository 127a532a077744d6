use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/*-------------------------------------------------------------------------------------------------
  Parse JSON
-------------------------------------------------------------------------------------------------*/

pub fn parse(json: &[u8]) -> serde_json::Result<JsonIpRanges> {
    serde_json::from_slice(json)
}

/*-------------------------------------------------------------------------------------------------
  JSON Data Structures
-------------------------------------------------------------------------------------------------*/

/*--------------------------------------------------------------------------------------
  JSON IP Ranges
--------------------------------------------------------------------------------------*/

#[derive(Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct JsonIpRanges {
    #[serde(rename = "syncToken")]
    pub sync_token: String,

    #[serde(rename = "createDate", with = "crate::core::datetime")]
    pub create_date: DateTime<Utc>,

    pub prefixes: Vec<JsonIpPrefix>,

    // Older and hand-seeded documents only carry IPv4 prefixes.
    #[serde(default)]
    pub ipv6_prefixes: Vec<JsonIpv6Prefix>,
}

/*--------------------------------------------------------------------------------------
  JSON IP (IPv4) Prefix
--------------------------------------------------------------------------------------*/

// Prefixes stay as text; malformed entries are skipped when the ranges are scanned.
#[derive(Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct JsonIpPrefix {
    pub ip_prefix: String,
    pub region: String,
    pub service: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_border_group: Option<String>,
}

/*--------------------------------------------------------------------------------------
  JSON IPv6 Prefix
--------------------------------------------------------------------------------------*/

#[derive(Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct JsonIpv6Prefix {
    pub ipv6_prefix: String,
    pub region: String,
    pub service: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_border_group: Option<String>,
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
