//! Parsing and formatting of appointment timestamps.
//!
//! Input is accepted in one strict short form, `M/d/yyyy h:mm a` with an
//! English meridiem (`3/1/2024 9:00 AM`). Output comes in three forms: the
//! short form (which always parses back to the same instant), a pretty form
//! naming the time zone, and a date-only form.

use chrono::{DateTime, LocalResult, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{ApptBookError, ApptBookResult};

const DATE_PATTERN: &str = r"(0?[1-9]|1[012])/(0?[1-9]|[12][0-9]|3[01])/([0-9]{4})";
const TIME_PATTERN: &str = r"([0]?[0-9]|1[0-2]):([0-5]?[0-9])";
const MERIDIEM_PATTERN: &str = r"(am|AM|pm|PM)";

static DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!("^{DATE_PATTERN}$")).expect("valid date regex"));
static TIME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!("^{TIME_PATTERN}$")).expect("valid time regex"));
static MERIDIEM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!("^{MERIDIEM_PATTERN}$")).expect("valid meridiem regex"));
static DATE_TIME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!("^{DATE_PATTERN} {TIME_PATTERN} {MERIDIEM_PATTERN}$"))
        .expect("valid date-time regex")
});

const SHORT_FORMAT: &str = "%m/%d/%Y %I:%M %p";
const PRETTY_FORMAT: &str = "%m/%d/%Y at %I:%M %p %Z";
const DATE_ONLY_FORMAT: &str = "%m/%d/%Y";

/// A point in time with minute resolution.
///
/// Only [`TimeCodec::parse`] produces instants, so the seconds field is
/// always zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Instant(DateTime<Utc>);

impl Instant {
    #[cfg(test)]
    pub(crate) fn from_utc(datetime: DateTime<Utc>) -> Self {
        Instant(datetime)
    }

    pub fn as_utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Converts between timestamp text and [`Instant`]s in one time zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeCodec {
    zone: Tz,
}

impl Default for TimeCodec {
    fn default() -> Self {
        TimeCodec { zone: Tz::UTC }
    }
}

impl TimeCodec {
    /// Build a codec from an IANA zone name such as `America/Los_Angeles`.
    pub fn from_zone_name(name: &str) -> ApptBookResult<Self> {
        let zone = name
            .parse::<Tz>()
            .map_err(|_| ApptBookError::UnknownTimeZone(name.to_string()))?;
        Ok(TimeCodec { zone })
    }

    /// The system's zone, or UTC when it cannot be determined.
    pub fn system_default() -> Self {
        let zone = iana_time_zone::get_timezone()
            .ok()
            .and_then(|name| name.parse::<Tz>().ok())
            .unwrap_or(Tz::UTC);
        TimeCodec { zone }
    }

    pub fn zone(&self) -> Tz {
        self.zone
    }

    /// Parse `M/d/yyyy h:mm a` text into an instant.
    ///
    /// The whole text must match the date-time grammar and name a real
    /// calendar day. Wall-clock times skipped by a DST transition are
    /// rejected; repeated ones resolve to the earlier instant.
    pub fn parse(&self, text: &str) -> ApptBookResult<Instant> {
        let caps = DATE_TIME_RE.captures(text).ok_or_else(|| {
            ApptBookError::format(text, "expected M/d/yyyy h:mm am|pm")
        })?;

        let number = |i: usize| {
            caps[i]
                .parse::<u32>()
                .map_err(|_| ApptBookError::format(text, "malformed number"))
        };
        let (month, day, hour, minute) = (number(1)?, number(2)?, number(4)?, number(5)?);
        let year = number(3)? as i32;

        let hour = match &caps[6] {
            "pm" | "PM" => hour % 12 + 12,
            _ => hour % 12,
        };

        let naive = NaiveDate::from_ymd_opt(year, month, day)
            .ok_or_else(|| ApptBookError::format(text, "no such calendar day"))?
            .and_hms_opt(hour, minute, 0)
            .ok_or_else(|| ApptBookError::format(text, "no such time of day"))?;

        match self.zone.from_local_datetime(&naive) {
            LocalResult::Single(dt) => Ok(Instant(dt.with_timezone(&Utc))),
            LocalResult::Ambiguous(earliest, _) => Ok(Instant(earliest.with_timezone(&Utc))),
            LocalResult::None => Err(ApptBookError::format(
                text,
                format!("time does not exist in {}", self.zone.name()),
            )),
        }
    }

    /// `03/01/2024 09:00 AM`
    pub fn format_short(&self, instant: &Instant) -> String {
        self.local(instant).format(SHORT_FORMAT).to_string()
    }

    /// `03/01/2024 at 09:00 AM PST`
    pub fn format_pretty(&self, instant: &Instant) -> String {
        self.local(instant).format(PRETTY_FORMAT).to_string()
    }

    /// `03/01/2024`
    pub fn format_date_only(&self, instant: &Instant) -> String {
        self.local(instant).format(DATE_ONLY_FORMAT).to_string()
    }

    fn local(&self, instant: &Instant) -> DateTime<Tz> {
        instant.0.with_timezone(&self.zone)
    }
}

/// Whole minutes from `begin` to `end`, truncated toward zero.
pub fn minutes_between(begin: &Instant, end: &Instant) -> i64 {
    (end.0 - begin.0).num_milliseconds() / 60_000
}

/// `M/d/yyyy`, month 1-12 and day 1-31.
pub fn check_date_format(date: &str) -> bool {
    DATE_RE.is_match(date)
}

/// `h:mm`, hour 0-12 and minute 0-59; either may drop its leading zero.
pub fn check_time_format(time: &str) -> bool {
    TIME_RE.is_match(time)
}

/// One of `am`, `AM`, `pm`, `PM`.
pub fn check_meridiem(token: &str) -> bool {
    MERIDIEM_RE.is_match(token)
}

/// Date, time and meridiem separated by single spaces.
pub fn check_date_time_format(datetime: &str) -> bool {
    DATE_TIME_RE.is_match(datetime)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;
    use rstest::rstest;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> Instant {
        Instant::from_utc(Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap())
    }

    #[rstest]
    #[case("3/1/2024", true)]
    #[case("03/01/2024", true)]
    #[case("12/31/1999", true)]
    #[case("13/01/2024", false)]
    #[case("0/1/2024", false)]
    #[case("3/32/2024", false)]
    #[case("3/1/24", false)]
    #[case("3-1-2024", false)]
    #[case(" 3/1/2024", false)]
    fn test_check_date_format(#[case] input: &str, #[case] expected: bool) {
        assert_eq!(check_date_format(input), expected);
    }

    #[rstest]
    #[case("9:05", true)]
    #[case("09:05", true)]
    #[case("12:59", true)]
    #[case("0:0", true)]
    #[case("25:00", false)]
    #[case("13:00", false)]
    #[case("9:60", false)]
    #[case("9", false)]
    #[case("9:05 AM", false)]
    fn test_check_time_format(#[case] input: &str, #[case] expected: bool) {
        assert_eq!(check_time_format(input), expected);
    }

    #[rstest]
    #[case("am", true)]
    #[case("AM", true)]
    #[case("pm", true)]
    #[case("PM", true)]
    #[case("Am", false)]
    #[case("a.m.", false)]
    #[case("", false)]
    fn test_check_meridiem(#[case] input: &str, #[case] expected: bool) {
        assert_eq!(check_meridiem(input), expected);
    }

    #[test]
    fn test_check_date_time_format_requires_single_spaces() {
        assert!(check_date_time_format("3/1/2024 9:00 AM"));
        assert!(!check_date_time_format("3/1/2024  9:00 AM"));
        assert!(!check_date_time_format("3/1/2024 9:00"));
    }

    #[test]
    fn test_parse_short_form() {
        let codec = TimeCodec::default();
        let instant = codec.parse("3/1/2024 09:30 PM").unwrap();
        assert_eq!(instant, utc(2024, 3, 1, 21, 30, 0));
        assert_eq!(instant.as_utc().second(), 0);
    }

    #[test]
    fn test_parse_twelve_o_clock() {
        let codec = TimeCodec::default();
        assert_eq!(codec.parse("1/1/2024 12:00 AM").unwrap(), utc(2024, 1, 1, 0, 0, 0));
        assert_eq!(codec.parse("1/1/2024 12:00 pm").unwrap(), utc(2024, 1, 1, 12, 0, 0));
        assert_eq!(codec.parse("1/1/2024 0:15 PM").unwrap(), utc(2024, 1, 1, 12, 15, 0));
    }

    #[test]
    fn test_parse_rejects_invalid_month_and_day() {
        let err = TimeCodec::default().parse("13/40/2024 09:00 AM").unwrap_err();
        assert!(matches!(err, ApptBookError::Format { .. }), "got {err:?}");
    }

    #[test]
    fn test_parse_rejects_impossible_calendar_day() {
        let err = TimeCodec::default().parse("2/30/2024 09:00 AM").unwrap_err();
        assert!(matches!(err, ApptBookError::Format { .. }));
        assert!(TimeCodec::default().parse("2/29/2024 09:00 AM").is_ok());
    }

    #[test]
    fn test_parse_rejects_trailing_text() {
        assert!(TimeCodec::default().parse("3/1/2024 9:00 AM extra").is_err());
        assert!(TimeCodec::default().parse("").is_err());
    }

    #[test]
    fn test_parse_in_zone() {
        let codec = TimeCodec::from_zone_name("America/Los_Angeles").unwrap();
        let instant = codec.parse("3/1/2024 9:00 AM").unwrap();
        assert_eq!(instant, utc(2024, 3, 1, 17, 0, 0));
        assert_eq!(codec.format_pretty(&instant), "03/01/2024 at 09:00 AM PST");
    }

    #[test]
    fn test_parse_rejects_skipped_wall_time() {
        let codec = TimeCodec::from_zone_name("America/New_York").unwrap();
        let err = codec.parse("3/10/2024 2:30 AM").unwrap_err();
        assert!(matches!(err, ApptBookError::Format { .. }));
    }

    #[test]
    fn test_unknown_zone_name() {
        let err = TimeCodec::from_zone_name("Mars/Olympus_Mons").unwrap_err();
        assert!(matches!(err, ApptBookError::UnknownTimeZone(_)));
    }

    #[test]
    fn test_formats() {
        let codec = TimeCodec::default();
        let instant = codec.parse("3/1/2024 9:05 PM").unwrap();
        assert_eq!(codec.format_short(&instant), "03/01/2024 09:05 PM");
        assert_eq!(codec.format_pretty(&instant), "03/01/2024 at 09:05 PM UTC");
        assert_eq!(codec.format_date_only(&instant), "03/01/2024");
    }

    #[test]
    fn test_short_format_round_trips() {
        let codec = TimeCodec::from_zone_name("Europe/Berlin").unwrap();
        for text in ["1/1/2024 12:00 AM", "7/4/2023 11:59 PM", "10/27/2024 4:00 AM"] {
            let instant = codec.parse(text).unwrap();
            assert_eq!(codec.parse(&codec.format_short(&instant)).unwrap(), instant, "{text}");
        }
    }

    #[test]
    fn test_minutes_between() {
        let begin = utc(2024, 3, 1, 8, 0, 0);
        let end = utc(2024, 3, 1, 8, 45, 0);
        assert_eq!(minutes_between(&begin, &end), 45);
        assert_eq!(minutes_between(&end, &begin), -45);
    }

    #[test]
    fn test_minutes_between_truncates_toward_zero() {
        let begin = utc(2024, 3, 1, 8, 0, 0);
        let end = utc(2024, 3, 1, 8, 1, 30);
        assert_eq!(minutes_between(&begin, &end), 1);
        assert_eq!(minutes_between(&end, &begin), -1);
    }
}
