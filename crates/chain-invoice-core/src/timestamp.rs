use crate::{ValidationError, constants::MILLIS_PER_SECOND};
use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Unix timestamp in seconds, as stored by the invoice contract
#[derive(Copy, Debug, Clone, PartialEq, Eq, Serialize, Deserialize, PartialOrd, Ord, Hash)]
#[serde(try_from = "u64", into = "u64")]
pub struct Timestamp(u64);

impl Timestamp {
    pub fn new(timestamp: u64) -> Result<Timestamp, ValidationError> {
        let valid = i64::try_from(timestamp)
            .ok()
            .and_then(|ts| Utc.timestamp_opt(ts, 0).single())
            .is_some();
        if !valid {
            return Err(ValidationError::InvalidTimestamp(timestamp));
        }
        Ok(Timestamp(timestamp))
    }

    /// Milliseconds since the epoch, safe from overflow, since the seconds are bounded by chrono
    pub fn as_millis(&self) -> u64 {
        self.0 * MILLIS_PER_SECOND
    }

    pub fn to_datetime(&self) -> DateTime<Utc> {
        // safe, since we check bounds during creation
        match Utc.timestamp_opt(self.0 as i64, 0).single() {
            Some(dt) => dt,
            None => panic!("invalid timestamp"),
        }
    }

    pub fn to_rfc3339(&self) -> String {
        self.to_datetime().to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

/// Current time in milliseconds, used for generated file names
pub fn now_millis() -> u64 {
    Utc::now().timestamp_millis().max(0) as u64
}

impl TryFrom<u64> for Timestamp {
    type Error = ValidationError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Timestamp::new(value)
    }
}

impl From<Timestamp> for u64 {
    fn from(value: Timestamp) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_to_millis() {
        let ts = Timestamp::new(1700000000).unwrap();
        assert_eq!(ts.as_millis(), 1700000000000);
    }

    #[test]
    fn formats_as_rfc3339() {
        let ts = Timestamp::new(1700000000).unwrap();
        assert_eq!(ts.to_rfc3339(), "2023-11-14T22:13:20Z");
    }

    #[test]
    fn rejects_out_of_range() {
        assert_eq!(
            Timestamp::new(u64::MAX),
            Err(ValidationError::InvalidTimestamp(u64::MAX))
        );
        assert!(serde_json::from_str::<Timestamp>("18446744073709551615").is_err());
    }
}
