use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::CoreError;

/// Calendar month token in `YYYY-MM` form. Ordering follows the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Month {
    year: i32,
    month: u32,
}

impl Month {
    pub fn new(year: i32, month: u32) -> Result<Self, CoreError> {
        if !(1..=12).contains(&month) || !(1900..=9999).contains(&year) {
            return Err(CoreError::InvalidInput(format!(
                "invalid month token {year:04}-{month:02}"
            )));
        }
        Ok(Self { year, month })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// First calendar day of the month.
    pub fn first_day(&self) -> NaiveDate {
        // Fields are validated on construction.
        NaiveDate::from_ymd_opt(self.year, self.month, 1).expect("month fields validated")
    }

    pub fn next(&self) -> Month {
        if self.month == 12 {
            Month {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Month {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    pub fn prev(&self) -> Month {
        if self.month == 1 {
            Month {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Month {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// Half-open UTC range `[first day of month, first day of next month)`.
    ///
    /// Transaction timestamps are matched against this range so month
    /// boundaries neither duplicate nor drop rows across time zones.
    pub fn utc_range(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        let start =
            DateTime::from_naive_utc_and_offset(self.first_day().and_time(NaiveTime::MIN), Utc);
        let end = DateTime::from_naive_utc_and_offset(
            self.next().first_day().and_time(NaiveTime::MIN),
            Utc,
        );
        (start, end)
    }

    pub fn contains(&self, timestamp: DateTime<Utc>) -> bool {
        let (start, end) = self.utc_range();
        timestamp >= start && timestamp < end
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for Month {
    type Err = CoreError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let invalid = || CoreError::InvalidInput(format!("invalid month token `{token}`"));
        let (year, month) = token.split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Month::new(year, month)
    }
}

impl Serialize for Month {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Month {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;
        token.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_and_displays_token() {
        let month: Month = "2024-02".parse().expect("valid token");
        assert_eq!(month.year(), 2024);
        assert_eq!(month.month(), 2);
        assert_eq!(month.to_string(), "2024-02");
    }

    #[test]
    fn rejects_malformed_tokens() {
        for token in ["2024", "2024-13", "2024-0", "24-01", "2024-1", "abcd-ef"] {
            assert!(token.parse::<Month>().is_err(), "accepted `{token}`");
        }
    }

    #[test]
    fn utc_range_is_half_open() {
        let month: Month = "2024-01".parse().unwrap();
        let (start, end) = month.utc_range();
        assert_eq!(start, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap());
        assert!(month.contains(start));
        assert!(!month.contains(end));
        let last_instant = Utc.with_ymd_and_hms(2024, 1, 31, 23, 59, 59).unwrap();
        assert!(month.contains(last_instant));
    }

    #[test]
    fn next_and_prev_cross_year_boundaries() {
        let december: Month = "2023-12".parse().unwrap();
        assert_eq!(december.next().to_string(), "2024-01");
        let january: Month = "2024-01".parse().unwrap();
        assert_eq!(january.prev().to_string(), "2023-12");
    }

    #[test]
    fn serde_uses_the_token_form() {
        let month: Month = "2024-03".parse().unwrap();
        let json = serde_json::to_string(&month).unwrap();
        assert_eq!(json, "\"2024-03\"");
        let back: Month = serde_json::from_str(&json).unwrap();
        assert_eq!(back, month);
    }
}
