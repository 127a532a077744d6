use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{self, Deserialize, Deserializer, Serializer};

/*-------------------------------------------------------------------------------------------------
  Create Date Format
-------------------------------------------------------------------------------------------------*/

// `createDate` is published as UTC `YYYY-MM-DD-hh-mm-ss`.
const CREATE_DATE_FORMAT: &str = "%Y-%m-%d-%H-%M-%S";

pub fn format(date: &DateTime<Utc>) -> String {
    date.format(CREATE_DATE_FORMAT).to_string()
}

pub fn parse(value: &str) -> chrono::ParseResult<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(value, CREATE_DATE_FORMAT)
        .map(|naive_date_time| naive_date_time.and_utc())
}

/*--------------------------------------------------------------------------------------
  Serde `with` Functions
--------------------------------------------------------------------------------------*/

pub fn serialize<S>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format(date))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse(&s).map_err(serde::de::Error::custom)
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
