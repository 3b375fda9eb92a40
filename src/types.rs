use crate::consts::{
    CENTURY_CYCLE, DATE_SEPARATOR, DAYS_IN_MONTH, FEBRUARY, FEBRUARY_DAYS_LEAP, GREGORIAN_CYCLE,
    LEAP_YEAR_CYCLE, MAX_MONTH, MAX_YEAR, MIN_DAY,
};
use crate::prelude::*;
use crate::{ConversionError, ParseError};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// A Gregorian calendar date.
///
/// Fields are public so callers can build dates from whatever their clock
/// hands them; every conversion re-validates. Use [`SolarDate::new`] to
/// validate up front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{:04}-{:02}-{:02}", year, month, day)]
pub struct SolarDate {
    pub year: u16,
    pub month: u8,
    pub day: u8,
}

impl SolarDate {
    /// Creates a new solar date, validating it against the Gregorian calendar.
    ///
    /// A valid date may still fall outside the lunar table; that is reported
    /// by the conversion functions, not here.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidYear`, `ParseError::InvalidMonth` or
    /// `ParseError::InvalidDay` for an impossible date.
    pub fn new(year: u16, month: u8, day: u8) -> Result<Self, ParseError> {
        if year == 0 || year > MAX_YEAR {
            return Err(ParseError::InvalidYear(year));
        }
        if month == 0 || month > MAX_MONTH {
            return Err(ParseError::InvalidMonth(month));
        }
        if day < MIN_DAY || day > days_in_month(year, month) {
            return Err(ParseError::InvalidDay { year, month, day });
        }
        Ok(Self { year, month, day })
    }

    /// Re-checks a date whose fields may have been set directly.
    pub(crate) fn validate(self) -> Result<Self, ParseError> {
        Self::new(self.year, self.month, self.day)
    }

    /// Helper to parse a numeric component with better error messages
    fn parse_component<T: FromStr>(s: &str) -> Result<T, ParseError> {
        s.parse::<T>()
            .map_err(|_| ParseError::InvalidFormat(s.to_owned()))
    }
}

impl FromStr for SolarDate {
    type Err = ParseError;

    /// Parses an ISO `YYYY-MM-DD` date.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        let parts: Vec<&str> = trimmed.split(DATE_SEPARATOR).map(str::trim).collect();
        match parts.as_slice() {
            [year, month, day] => {
                let year = Self::parse_component::<u16>(year)?;
                let month = Self::parse_component::<u8>(month)?;
                let day = Self::parse_component::<u8>(day)?;
                Self::new(year, month, day)
            }
            _ => Err(ParseError::InvalidFormat(format!(
                "Expected YYYY{DATE_SEPARATOR}MM{DATE_SEPARATOR}DD, found {} component(s): {trimmed}",
                parts.len()
            ))),
        }
    }
}

impl Serialize for SolarDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for SolarDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A date in the Chinese lunisolar calendar.
///
/// `is_leap_month` marks the inserted month that repeats `month`; it is only
/// meaningful in years whose table entry has a leap month equal to `month`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawLunarDate")]
pub struct LunarDate {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub is_leap_month: bool,
}

/// Unchecked wire form of [`LunarDate`]; deserialized values go through
/// [`LunarDate::new`].
#[derive(Deserialize)]
struct RawLunarDate {
    year: u16,
    month: u8,
    day: u8,
    is_leap_month: bool,
}

impl TryFrom<RawLunarDate> for LunarDate {
    type Error = ConversionError;

    fn try_from(raw: RawLunarDate) -> Result<Self, Self::Error> {
        Self::new(raw.year, raw.month, raw.day, raw.is_leap_month)
    }
}

impl LunarDate {
    /// Creates a lunar date, validating it against the year table.
    ///
    /// # Errors
    /// Returns `ConversionError::DateOutOfRange` if `year` is not covered by
    /// the table and `ConversionError::InvalidLunarDate` if the month does not
    /// exist in that year or `day` exceeds its length.
    pub fn new(year: u16, month: u8, day: u8, is_leap_month: bool) -> Result<Self, ConversionError> {
        let date = Self {
            year,
            month,
            day,
            is_leap_month,
        };
        crate::day_count::lunar_to_offset(date)?;
        Ok(date)
    }

    /// Sort key placing a leap month right after the month it repeats.
    const fn sort_key(&self) -> (u16, u8, bool, u8) {
        (self.year, self.month, self.is_leap_month, self.day)
    }
}

impl PartialOrd for LunarDate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LunarDate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl fmt::Display for LunarDate {
    /// Renders the date with [`crate::lunar_to_text`].
    ///
    /// # Panics
    /// Panics if month or day are outside the label tables; dates returned
    /// by the conversion functions never are.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::fmt::lunar_to_text(*self))
    }
}

/// Day of the week, indexed from Sunday (0) to Saturday (6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Weekday {
    Sunday = 0,
    Monday = 1,
    Tuesday = 2,
    Wednesday = 3,
    Thursday = 4,
    Friday = 5,
    Saturday = 6,
}

impl Weekday {
    /// Returns the Sunday-based index (0..=6)
    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Looks up a weekday by its Sunday-based index
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Self::Sunday),
            1 => Some(Self::Monday),
            2 => Some(Self::Tuesday),
            3 => Some(Self::Wednesday),
            4 => Some(Self::Thursday),
            5 => Some(Self::Friday),
            6 => Some(Self::Saturday),
            _ => None,
        }
    }

    /// The weekday `days` days after `self` (negative counts go backwards).
    pub const fn add_days(self, days: i32) -> Self {
        match (self.index() as i32 + days).rem_euclid(7) {
            0 => Self::Sunday,
            1 => Self::Monday,
            2 => Self::Tuesday,
            3 => Self::Wednesday,
            4 => Self::Thursday,
            5 => Self::Friday,
            _ => Self::Saturday,
        }
    }
}

impl TryFrom<u8> for Weekday {
    type Error = ConversionError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_index(value).ok_or(ConversionError::InvalidWeekday(value))
    }
}

impl From<Weekday> for u8 {
    fn from(weekday: Weekday) -> Self {
        weekday.index()
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(crate::fmt::weekday_label(*self))
    }
}

// Helper functions

pub const fn is_leap_year(year: u16) -> bool {
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || (year % GREGORIAN_CYCLE == 0)
}

pub const fn days_in_month(year: u16, month: u8) -> u8 {
    debug_assert!(month != 0 && month <= MAX_MONTH);

    if month == FEBRUARY && is_leap_year(year) {
        FEBRUARY_DAYS_LEAP
    } else {
        DAYS_IN_MONTH[month as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solar_new_valid() {
        assert!(SolarDate::new(2016, 11, 28).is_ok());
        assert!(SolarDate::new(1, 1, 1).is_ok());
        assert!(SolarDate::new(9999, 12, 31).is_ok());
        assert!(SolarDate::new(2024, 2, 29).is_ok());
    }

    #[test]
    fn test_solar_new_invalid_year() {
        assert!(matches!(
            SolarDate::new(0, 1, 1),
            Err(ParseError::InvalidYear(0))
        ));
        assert!(matches!(
            SolarDate::new(10000, 1, 1),
            Err(ParseError::InvalidYear(10000))
        ));
    }

    #[test]
    fn test_solar_new_invalid_month() {
        assert!(matches!(
            SolarDate::new(2016, 0, 1),
            Err(ParseError::InvalidMonth(0))
        ));
        assert!(matches!(
            SolarDate::new(2016, 13, 1),
            Err(ParseError::InvalidMonth(13))
        ));
    }

    #[test]
    fn test_solar_new_invalid_day() {
        assert!(matches!(
            SolarDate::new(2023, 2, 29),
            Err(ParseError::InvalidDay {
                year: 2023,
                month: 2,
                day: 29
            })
        ));
        assert!(matches!(
            SolarDate::new(2016, 4, 31),
            Err(ParseError::InvalidDay { .. })
        ));
        assert!(matches!(
            SolarDate::new(2016, 4, 0),
            Err(ParseError::InvalidDay { .. })
        ));
    }

    #[test]
    fn test_solar_display() {
        let date = SolarDate::new(2016, 11, 8).unwrap();
        assert_eq!(date.to_string(), "2016-11-08");
    }

    #[test]
    fn test_solar_parse() {
        let date = "2016-11-28".parse::<SolarDate>().unwrap();
        assert_eq!(
            date,
            SolarDate {
                year: 2016,
                month: 11,
                day: 28
            }
        );

        let date = " 2016 - 1 - 5 ".parse::<SolarDate>().unwrap();
        assert_eq!(date, SolarDate::new(2016, 1, 5).unwrap());
    }

    #[test]
    fn test_solar_parse_errors() {
        assert!(matches!(
            "".parse::<SolarDate>(),
            Err(ParseError::EmptyInput)
        ));
        assert!(matches!(
            "2016-11".parse::<SolarDate>(),
            Err(ParseError::InvalidFormat(_))
        ));
        assert!(matches!(
            "11/28/2016".parse::<SolarDate>(),
            Err(ParseError::InvalidFormat(_))
        ));
        assert!(matches!(
            "2016-xx-28".parse::<SolarDate>(),
            Err(ParseError::InvalidFormat(_))
        ));
        assert!(matches!(
            "2021-02-29".parse::<SolarDate>(),
            Err(ParseError::InvalidDay { .. })
        ));
    }

    #[test]
    fn test_solar_ordering() {
        let d1 = SolarDate::new(2016, 11, 28).unwrap();
        let d2 = SolarDate::new(2016, 12, 1).unwrap();
        let d3 = SolarDate::new(2017, 1, 1).unwrap();
        assert!(d1 < d2);
        assert!(d2 < d3);
    }

    #[test]
    fn test_solar_serde() {
        let date = SolarDate::new(2016, 11, 28).unwrap();
        let json = serde_json::to_string(&date).unwrap();
        assert_eq!(json, "\"2016-11-28\"");

        let parsed: SolarDate = serde_json::from_str(&json).unwrap();
        assert_eq!(date, parsed);

        let result: Result<SolarDate, _> = serde_json::from_str("\"2016-02-30\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_lunar_new() {
        assert!(LunarDate::new(2016, 10, 29, false).is_ok());
        assert!(LunarDate::new(2017, 6, 30, true).is_ok());
        assert!(matches!(
            LunarDate::new(2016, 6, 1, true),
            Err(ConversionError::InvalidLunarDate { .. })
        ));
        assert!(matches!(
            LunarDate::new(1899, 1, 1, false),
            Err(ConversionError::DateOutOfRange { .. })
        ));
    }

    #[test]
    fn test_lunar_ordering_places_leap_month_after_base_month() {
        let june_end = LunarDate::new(2017, 6, 29, false).unwrap();
        let leap_june = LunarDate::new(2017, 6, 1, true).unwrap();
        let july = LunarDate::new(2017, 7, 1, false).unwrap();
        assert!(june_end < leap_june);
        assert!(leap_june < july);
    }

    #[test]
    fn test_lunar_serde() {
        let date = LunarDate::new(2017, 6, 1, true).unwrap();
        let json = serde_json::to_string(&date).unwrap();
        assert_eq!(
            json,
            r#"{"year":2017,"month":6,"day":1,"is_leap_month":true}"#
        );

        let parsed: LunarDate = serde_json::from_str(&json).unwrap();
        assert_eq!(date, parsed);
    }

    #[test]
    fn test_lunar_serde_rejects_invalid_dates() {
        for json in [
            r#"{"year":2016,"month":13,"day":40,"is_leap_month":true}"#,
            r#"{"year":2016,"month":10,"day":31,"is_leap_month":false}"#,
            r#"{"year":2016,"month":6,"day":1,"is_leap_month":true}"#,
            r#"{"year":2101,"month":1,"day":1,"is_leap_month":false}"#,
        ] {
            let result: Result<LunarDate, _> = serde_json::from_str(json);
            assert!(result.is_err(), "{json} should be rejected");
        }
    }

    #[test]
    fn test_weekday_index_round_trip() {
        for index in 0..7 {
            let weekday = Weekday::from_index(index).unwrap();
            assert_eq!(weekday.index(), index);
        }
        assert_eq!(Weekday::from_index(7), None);
    }

    #[test]
    fn test_weekday_try_from_u8() {
        let weekday: Weekday = 1.try_into().unwrap();
        assert_eq!(weekday, Weekday::Monday);

        let result: Result<Weekday, _> = 7.try_into();
        assert!(matches!(result, Err(ConversionError::InvalidWeekday(7))));
    }

    #[test]
    fn test_weekday_add_days() {
        assert_eq!(Weekday::Wednesday.add_days(0), Weekday::Wednesday);
        assert_eq!(Weekday::Saturday.add_days(1), Weekday::Sunday);
        assert_eq!(Weekday::Sunday.add_days(-1), Weekday::Saturday);
        assert_eq!(Weekday::Wednesday.add_days(42_670), Weekday::Monday);
    }

    #[test]
    fn test_weekday_serde() {
        let json = serde_json::to_string(&Weekday::Friday).unwrap();
        assert_eq!(json, "5");

        let parsed: Weekday = serde_json::from_str("0").unwrap();
        assert_eq!(parsed, Weekday::Sunday);

        let result: Result<Weekday, _> = serde_json::from_str("9");
        assert!(result.is_err());
    }

    #[test]
    fn test_is_leap_year_cases() {
        struct TestCase {
            year: u16,
            is_leap: bool,
            description: &'static str,
        }

        let cases = [
            TestCase {
                year: 2016,
                is_leap: true,
                description: "divisible by 4",
            },
            TestCase {
                year: 2023,
                is_leap: false,
                description: "not divisible by 4",
            },
            TestCase {
                year: 1900,
                is_leap: false,
                description: "century not divisible by 400",
            },
            TestCase {
                year: 2100,
                is_leap: false,
                description: "century not divisible by 400",
            },
            TestCase {
                year: 2000,
                is_leap: true,
                description: "divisible by 400",
            },
        ];

        for case in &cases {
            assert_eq!(
                is_leap_year(case.year),
                case.is_leap,
                "Year {} ({})",
                case.year,
                case.description,
            );
        }
    }

    #[test]
    fn test_days_in_month_february() {
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(1900, 2), 28, "Century year not divisible by 400");
        assert_eq!(days_in_month(2000, 2), 29, "Century year divisible by 400");
    }

    #[test]
    fn test_all_months_have_valid_days() {
        let expected = [0, 31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
        for month in 1..=12 {
            assert_eq!(
                days_in_month(2023, month),
                expected[month as usize],
                "Month {month} has incorrect day count"
            );
        }
    }
}
