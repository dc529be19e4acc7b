//! Parsing of `HH:MM~HH:MM` time ranges into durations.
//!
//! Operators enter maintenance and downtime windows as two 24-hour clock
//! times. The duration is the forward distance from start to end; an end
//! earlier than the start is read as falling on the next day, so the result
//! is always in `0..1440` minutes.
//!
//! ## Examples
//!
//! ```rust
//! use mest::libs::time_range::{parse_range, TimeRange};
//!
//! assert_eq!(parse_range("08:00", "08:30").unwrap(), 30);
//! assert_eq!(parse_range("23:30", "00:10").unwrap(), 40);
//!
//! let range = TimeRange::find_in("22:00~06:00 night clean").unwrap();
//! assert_eq!(range.minutes(), 480);
//! ```

use crate::libs::error::EntryError;
use chrono::{NaiveTime, Timelike};
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

const MINUTES_PER_DAY: u32 = 24 * 60;

static CLOCK_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^([01]\d|2[0-3]):([0-5]\d)$").unwrap());

static EMBEDDED_RANGE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|[^\d])((?:[01]\d|2[0-3]):[0-5]\d)\s*~\s*((?:[01]\d|2[0-3]):[0-5]\d)(?:$|[^\d])").unwrap());

/// A validated start/end pair of clock times.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl TimeRange {
    /// Validates both clock strings and builds the range.
    ///
    /// Blank fields are reported before malformed ones so the operator sees
    /// the most basic problem first.
    pub fn parse(start: &str, end: &str) -> Result<Self, EntryError> {
        if start.trim().is_empty() {
            return Err(EntryError::MissingField("start"));
        }
        if end.trim().is_empty() {
            return Err(EntryError::MissingField("end"));
        }

        Ok(Self {
            start: parse_clock("start", start)?,
            end: parse_clock("end", end)?,
        })
    }

    /// Minutes from start to end, wrapping past midnight when end < start.
    pub fn minutes(&self) -> u32 {
        let start = minute_of_day(self.start);
        let end = minute_of_day(self.end);
        if end >= start {
            end - start
        } else {
            end + MINUTES_PER_DAY - start
        }
    }

    /// Locates the first `HH:MM~HH:MM` range embedded in free text.
    ///
    /// Descriptions of records created from a time range start with the
    /// range itself; this recovers it for records stored without a duration.
    pub fn find_in(text: &str) -> Option<Self> {
        let caps = EMBEDDED_RANGE_REGEX.captures(text)?;
        Self::parse(caps.get(1)?.as_str(), caps.get(2)?.as_str()).ok()
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}~{}", self.start.format("%H:%M"), self.end.format("%H:%M"))
    }
}

impl FromStr for TimeRange {
    type Err = EntryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('~') {
            Some((start, end)) => Self::parse(start, end),
            None if s.trim().is_empty() => Err(EntryError::MissingField("range")),
            None => Err(EntryError::InvalidTimeFormat {
                field: "range",
                value: s.to_string(),
            }),
        }
    }
}

/// Duration in minutes between two `HH:MM` clock strings.
pub fn parse_range(start: &str, end: &str) -> Result<u32, EntryError> {
    Ok(TimeRange::parse(start, end)?.minutes())
}

fn parse_clock(field: &'static str, value: &str) -> Result<NaiveTime, EntryError> {
    let invalid = || EntryError::InvalidTimeFormat {
        field,
        value: value.to_string(),
    };

    let caps = CLOCK_REGEX.captures(value.trim()).ok_or_else(invalid)?;
    let hour: u32 = caps[1].parse().map_err(|_| invalid())?;
    let minute: u32 = caps[2].parse().map_err(|_| invalid())?;
    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(invalid)
}

fn minute_of_day(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_start_and_end_is_zero() {
        assert_eq!(parse_range("08:00", "08:00").unwrap(), 0);
    }

    #[test]
    fn wraps_past_midnight() {
        assert_eq!(parse_range("23:30", "00:10").unwrap(), 40);
        assert_eq!(parse_range("08:01", "08:00").unwrap(), 1439);
    }

    #[test]
    fn plain_forward_range() {
        assert_eq!(parse_range("08:00", "08:30").unwrap(), 30);
        assert_eq!(parse_range("00:00", "23:59").unwrap(), 1439);
    }

    #[test]
    fn rejects_single_digit_hour() {
        assert_eq!(
            parse_range("8:00", "08:00"),
            Err(EntryError::InvalidTimeFormat {
                field: "start",
                value: "8:00".to_string()
            })
        );
    }

    #[test]
    fn rejects_out_of_range_clock_values() {
        assert!(matches!(parse_range("24:00", "08:00"), Err(EntryError::InvalidTimeFormat { field: "start", .. })));
        assert!(matches!(parse_range("08:00", "08:60"), Err(EntryError::InvalidTimeFormat { field: "end", .. })));
        assert!(matches!(parse_range("08-00", "09:00"), Err(EntryError::InvalidTimeFormat { .. })));
    }

    #[test]
    fn blank_fields_are_missing() {
        assert_eq!(parse_range("", "08:00"), Err(EntryError::MissingField("start")));
        assert_eq!(parse_range("08:00", "  "), Err(EntryError::MissingField("end")));
    }

    #[test]
    fn every_valid_pair_stays_within_a_day() {
        for start in (0..MINUTES_PER_DAY).step_by(37) {
            for end in (0..MINUTES_PER_DAY).step_by(41) {
                let s = format!("{:02}:{:02}", start / 60, start % 60);
                let e = format!("{:02}:{:02}", end / 60, end % 60);
                let minutes = parse_range(&s, &e).unwrap();
                assert!(minutes < MINUTES_PER_DAY, "{s}~{e} gave {minutes}");
            }
        }
    }

    #[test]
    fn finds_range_embedded_in_description() {
        let range = TimeRange::find_in("08:00~08:30 clean nozzle").unwrap();
        assert_eq!(range.to_string(), "08:00~08:30");
        assert_eq!(range.minutes(), 30);

        assert_eq!(TimeRange::find_in("belt swap 13:15 ~ 13:45").unwrap().minutes(), 30);
        assert!(TimeRange::find_in("no range here").is_none());
        assert!(TimeRange::find_in("8:00~9:00").is_none());
    }

    #[test]
    fn parses_whole_range_string() {
        let range: TimeRange = "22:00~06:00".parse().unwrap();
        assert_eq!(range.minutes(), 480);
        assert_eq!("".parse::<TimeRange>(), Err(EntryError::MissingField("range")));
        assert!(matches!("0800".parse::<TimeRange>(), Err(EntryError::InvalidTimeFormat { field: "range", .. })));
    }
}
