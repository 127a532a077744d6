use crate::core::address_range::AddressRange;
use crate::core::json::{self, JsonIpRanges};
use chrono::{DateTime, Utc};

/*-------------------------------------------------------------------------------------------------
  Address Range Set
-------------------------------------------------------------------------------------------------*/

/// The full collection of published AWS IP ranges with its publication metadata.
///
/// Ranges keep document order: all IPv4 `prefixes` followed by all `ipv6_prefixes`. Membership
/// checks report the first match in this order.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct AddressRangeSet {
    pub(crate) sync_token: String,
    pub(crate) create_date: DateTime<Utc>,
    pub(crate) ranges: Vec<AddressRange>,
}

/*--------------------------------------------------------------------------------------
  Address Range Set Implementation
--------------------------------------------------------------------------------------*/

impl AddressRangeSet {
    /*-------------------------------------------------------------------------
      Getters
    -------------------------------------------------------------------------*/

    /// Publication time of the current set of AWS IP Ranges in Unix epoch time format.
    pub fn sync_token(&self) -> &str {
        &self.sync_token
    }

    /// Publication time of the current set of AWS IP Ranges in UTC `DateTime` format.
    pub fn create_date(&self) -> &DateTime<Utc> {
        &self.create_date
    }

    /// Address ranges in document order.
    pub fn ranges(&self) -> &[AddressRange] {
        &self.ranges
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /*-------------------------------------------------------------------------
      (Internal) Address Range Set from JSON
    -------------------------------------------------------------------------*/

    /// Deserialize a complete set from the published JSON bytes. Nothing is returned unless the
    /// whole document parses.
    pub(crate) fn from_json(json: &[u8]) -> serde_json::Result<AddressRangeSet> {
        json::parse(json).map(AddressRangeSet::from)
    }
}

/*--------------------------------------------------------------------------------------
  Create Address Range Set from JSON IP Ranges
--------------------------------------------------------------------------------------*/

impl From<JsonIpRanges> for AddressRangeSet {
    fn from(value: JsonIpRanges) -> Self {
        let ipv4_ranges = value.prefixes.into_iter().map(|prefix| AddressRange {
            cidr: prefix.ip_prefix,
            region: prefix.region,
            service: prefix.service,
            network_border_group: prefix.network_border_group,
        });

        let ipv6_ranges = value.ipv6_prefixes.into_iter().map(|prefix| AddressRange {
            cidr: prefix.ipv6_prefix,
            region: prefix.region,
            service: prefix.service,
            network_border_group: prefix.network_border_group,
        });

        Self {
            sync_token: value.sync_token,
            create_date: value.create_date,
            ranges: ipv4_ranges.chain(ipv6_ranges).collect(),
        }
    }
}

/*--------------------------------------------------------------------------------------
  Create Address Range Set from Address Ranges
--------------------------------------------------------------------------------------*/

impl FromIterator<AddressRange> for AddressRangeSet {
    fn from_iter<I: IntoIterator<Item = AddressRange>>(iter: I) -> Self {
        Self {
            ranges: iter.into_iter().collect(),
            ..Default::default()
        }
    }
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::core::address_range::tests::test_range;
    use chrono::TimeZone;

    /*----------------------------------------------------------------------------------
      Test Helper Functions
    ----------------------------------------------------------------------------------*/

    pub(crate) const TEST_JSON: &str = r#"{
      "syncToken": "1709845985",
      "createDate": "2024-03-07-21-13-05",
      "prefixes": [
        {
          "ip_prefix": "3.5.140.0/22",
          "region": "ap-northeast-2",
          "service": "AMAZON",
          "network_border_group": "ap-northeast-2"
        },
        {
          "ip_prefix": "13.32.0.0/15",
          "region": "GLOBAL",
          "service": "AMAZON",
          "network_border_group": "GLOBAL"
        },
        {
          "ip_prefix": "13.32.0.0/15",
          "region": "GLOBAL",
          "service": "CLOUDFRONT",
          "network_border_group": "GLOBAL"
        },
        {
          "ip_prefix": "52.94.76.0/22",
          "region": "us-west-2",
          "service": "AMAZON",
          "network_border_group": "us-west-2"
        }
      ],
      "ipv6_prefixes": [
        {
          "ipv6_prefix": "2600:9000::/28",
          "region": "GLOBAL",
          "service": "AMAZON",
          "network_border_group": "GLOBAL"
        }
      ]
    }"#;

    pub(crate) fn test_range_set() -> AddressRangeSet {
        AddressRangeSet::from_json(TEST_JSON.as_bytes()).unwrap()
    }

    /*----------------------------------------------------------------------------------
      AddressRangeSet
    ----------------------------------------------------------------------------------*/

    #[test]
    fn test_from_json_metadata() {
        let range_set = test_range_set();

        assert_eq!(range_set.sync_token(), "1709845985");
        assert_eq!(
            range_set.create_date(),
            &Utc.with_ymd_and_hms(2024, 3, 7, 21, 13, 5).unwrap()
        );
        assert_eq!(range_set.len(), 5);
        assert!(!range_set.is_empty());
    }

    #[test]
    fn test_from_json_preserves_document_order() {
        let range_set = test_range_set();
        let cidrs: Vec<&str> = range_set
            .ranges()
            .iter()
            .map(|range| range.cidr.as_str())
            .collect();

        assert_eq!(
            cidrs,
            vec![
                "3.5.140.0/22",
                "13.32.0.0/15",
                "13.32.0.0/15",
                "52.94.76.0/22",
                "2600:9000::/28",
            ]
        );
        assert_eq!(range_set.ranges()[1].service, "AMAZON");
        assert_eq!(range_set.ranges()[2].service, "CLOUDFRONT");
    }

    #[test]
    fn test_from_json_rejects_partial_document() {
        let truncated = &TEST_JSON.as_bytes()[..TEST_JSON.len() / 2];
        assert!(AddressRangeSet::from_json(truncated).is_err());
    }

    #[test]
    fn test_from_json_keeps_malformed_cidr_text() {
        let json = br#"{
          "syncToken": "1",
          "createDate": "2024-01-01-00-00-00",
          "prefixes": [
            { "ip_prefix": "10.0.0.0/33", "region": "us-east-1", "service": "EC2" }
          ]
        }"#;

        let range_set = AddressRangeSet::from_json(json).unwrap();
        assert_eq!(range_set.ranges()[0].cidr, "10.0.0.0/33");
    }

    #[test]
    fn test_from_iterator() {
        let range_set: AddressRangeSet = [
            test_range("10.0.0.0/8", "us-east-1", "EC2"),
            test_range("2001:db8::/32", "us-east-1", "EC2"),
        ]
        .into_iter()
        .collect();

        assert_eq!(range_set.len(), 2);
        assert_eq!(range_set.sync_token(), "");
    }
}
