use crate::types::{SolarDate, Weekday};

/// Largest year a `SolarDate` accepts. Only 1900-2101 converts; the rest
/// are still valid for `SolarDate::weekday` and parsing.
pub const MAX_YEAR: u16 = 9999;

/// Months are numbered `1..=MAX_MONTH` in both calendars. A lunar leap month
/// reuses the number of the month it follows.
pub const MAX_MONTH: u8 = 12;

/// Day numbering starts at 1 in both calendars.
pub const MIN_DAY: u8 = 1;

pub const FEBRUARY: u8 = 2;
/// February length in a leap year
pub const FEBRUARY_DAYS_LEAP: u8 = 29;

/// Gregorian month lengths indexed by month number, with a filler at 0.
/// February is stored as 28; `days_in_month` adds the leap day.
#[rustfmt::skip]
pub const DAYS_IN_MONTH: [u8; 13] = [
    0,
    31, 28, 31, 30, 31, 30, // Jan-Jun
    31, 31, 30, 31, 30, 31, // Jul-Dec
];

// Gregorian leap rule: every 4th year, except every 100th, except every 400th.
pub(crate) const LEAP_YEAR_CYCLE: u16 = 4;
pub(crate) const CENTURY_CYCLE: u16 = 100;
pub(crate) const GREGORIAN_CYCLE: u16 = 400;

/// Separator of `YYYY-MM-DD` solar date strings
pub const DATE_SEPARATOR: char = '-';

/// First lunar year covered by the year table
pub const FIRST_LUNAR_YEAR: u16 = 1900;
/// Last lunar year covered by the year table (inclusive)
pub const LAST_LUNAR_YEAR: u16 = 2100;

/// Length of a short ("small") lunar month
pub const SHORT_MONTH_DAYS: u8 = 29;
/// Length of a long ("big") lunar month
pub const LONG_MONTH_DAYS: u8 = 30;

/// Solar date of lunar `FIRST_LUNAR_YEAR`, month 1, day 1. Day offset 0.
pub const EPOCH: SolarDate = SolarDate {
    year: 1900,
    month: 1,
    day: 31,
};

/// Solar date of the last day of lunar `LAST_LUNAR_YEAR`
pub const LAST_SUPPORTED_DATE: SolarDate = SolarDate {
    year: 2101,
    month: 1,
    day: 28,
};

/// Day of the week of `EPOCH`
pub const EPOCH_WEEKDAY: Weekday = Weekday::Wednesday;

/// Separator between the lunar date text and the weekday label
pub const WEEKDAY_SEPARATOR: char = ' ';
