use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::ops::Deref;

/// Format of timestamps sent as query parameters (`start_time`, `end_time`)
pub const PARAM_LAYOUT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// UTC timestamp as used by the v2 API.
///
/// Deserializes from RFC 3339 strings such as `2019-06-04T23:12:08.000Z`
/// and serializes back with millisecond precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Time(pub DateTime<Utc>);

impl Time {
    /// Create a new Time from a DateTime
    pub fn new(dt: DateTime<Utc>) -> Self {
        Time(dt)
    }

    /// Create a Time from a unix timestamp in seconds
    pub fn from_unix(unix: i64) -> Option<Self> {
        Utc.timestamp_opt(unix, 0).single().map(Time)
    }

    /// Parse an RFC 3339 timestamp
    pub fn parse(s: &str) -> Result<Self, chrono::ParseError> {
        DateTime::parse_from_rfc3339(s).map(|dt| Time(dt.with_timezone(&Utc)))
    }

    /// Get the unix timestamp in seconds
    pub fn unix(&self) -> i64 {
        self.0.timestamp()
    }

    /// Render for a query parameter, e.g. `2023-01-02T03:04:05Z`
    pub fn param(&self) -> String {
        self.0.format(PARAM_LAYOUT).to_string()
    }

    /// Render as the API does, e.g. `2023-01-02T03:04:05.000Z`
    pub fn iso(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

impl Deref for Time {
    type Target = DateTime<Utc>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<DateTime<Utc>> for Time {
    fn from(dt: DateTime<Utc>) -> Self {
        Time(dt)
    }
}

impl From<Time> for DateTime<Utc> {
    fn from(t: Time) -> Self {
        t.0
    }
}

impl Serialize for Time {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.iso())
    }
}

impl<'de> Deserialize<'de> for Time {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Time::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_param() {
        let time = Time(Utc.with_ymd_and_hms(2023, 1, 2, 3, 4, 5).unwrap());
        assert_eq!(time.param(), "2023-01-02T03:04:05Z");
    }

    #[test]
    fn test_time_deserialization() {
        let time: Time = serde_json::from_str(r#""2019-06-04T23:12:08.000Z""#).unwrap();
        assert_eq!(time.unix(), 1559689928);
        assert_eq!(time.iso(), "2019-06-04T23:12:08.000Z");
    }

    #[test]
    fn test_time_offset_normalized_to_utc() {
        let time = Time::parse("2023-01-02T05:04:05+02:00").unwrap();
        assert_eq!(time.param(), "2023-01-02T03:04:05Z");
    }

    #[test]
    fn test_time_null() {
        let result: Result<Option<Time>, _> = serde_json::from_str("null");
        assert!(result.unwrap().is_none());
    }

    #[test]
    fn test_time_invalid() {
        assert!(serde_json::from_str::<Time>(r#""yesterday""#).is_err());
    }
}
