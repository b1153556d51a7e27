//! User-account records as served by `GET /api/users`, and their display form.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Deserializer};

const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid ISO date: {0:?}")]
pub struct InvalidDate(pub String);

/// A date string together with the instant it denotes.
///
/// Date-only values (`YYYY-MM-DD`) mean UTC midnight. Full RFC 3339 timestamps are
/// accepted too. The original string is kept so it can be shown unformatted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IsoDate {
    raw: String,
    instant: DateTime<Utc>,
}

impl IsoDate {
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn instant(&self) -> DateTime<Utc> {
        self.instant
    }
}

impl FromStr for IsoDate {
    type Err = InvalidDate;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let instant = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map(|date| date.and_time(NaiveTime::MIN).and_utc())
            .or_else(|_| DateTime::parse_from_rfc3339(raw).map(|dt| dt.with_timezone(&Utc)))
            .map_err(|_| InvalidDate(raw.to_owned()))?;

        Ok(Self {
            raw: raw.to_owned(),
            instant,
        })
    }
}

impl fmt::Display for IsoDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for IsoDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// One user account exactly as received from the API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawRecord {
    pub name: String,
    /// Only ever displayed, so it is not parsed.
    pub create_date: String,
    pub password_changed_date: IsoDate,
    pub last_access_date: IsoDate,
    pub mfa_enabled: bool,
}

/// A record plus its "days since" metrics, frozen at fetch time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRecord {
    pub raw: RawRecord,
    pub days_since_password_change: i64,
    pub days_since_last_access: i64,
}

impl DisplayRecord {
    pub fn derive(raw: RawRecord, now: DateTime<Utc>) -> Self {
        Self {
            days_since_password_change: days_since(raw.password_changed_date.instant(), now),
            days_since_last_access: days_since(raw.last_access_date.instant(), now),
            raw,
        }
    }

    pub fn name(&self) -> &str {
        &self.raw.name
    }

    pub fn mfa_enabled(&self) -> bool {
        self.raw.mfa_enabled
    }
}

/// Whole days from `date` to `now`, rounded down.
///
/// Dates after `now` give negative values; they are not clamped.
pub fn days_since(date: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - date).num_milliseconds().div_euclid(MS_PER_DAY)
}
