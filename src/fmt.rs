//! Lunar dates as display text.
//!
//! A date renders as `{year}{month}{day}` with no separators: the
//! sexagenary year name followed by 年, the month name followed by 月
//! (prefixed with 闰 for a leap month), and the traditional day name.
//! Lunar 2016-10-29 renders as `丙申年十月廿九`.

use log::debug;

use crate::consts::WEEKDAY_SEPARATOR;
use crate::convert::{solar_to_lunar, ConversionError};
use crate::types::{LunarDate, SolarDate, Weekday};

/// Chinese numerals. Index 0 is 十 so that `day % 10` indexes day names.
const NUMERALS: [&str; 10] = ["十", "一", "二", "三", "四", "五", "六", "七", "八", "九"];

/// Heavenly stems, 甲 first
const STEMS: [&str; 10] = ["甲", "乙", "丙", "丁", "戊", "己", "庚", "辛", "壬", "癸"];

/// Earthly branches, 子 first
const BRANCHES: [&str; 12] = [
    "子", "丑", "寅", "卯", "辰", "巳", "午", "未", "申", "酉", "戌", "亥",
];

/// Zodiac animals in branch order
const ZODIAC: [&str; 12] = [
    "鼠", "牛", "虎", "兔", "龙", "蛇", "马", "羊", "猴", "鸡", "狗", "猪",
];

/// Month names, month 1 first. 11 and 12 have their own names.
const MONTHS: [&str; 12] = [
    "正", "二", "三", "四", "五", "六", "七", "八", "九", "十", "冬", "腊",
];

const WEEKDAYS: [&str; 7] = [
    "星期日", "星期一", "星期二", "星期三", "星期四", "星期五", "星期六",
];

const LEAP_MARKER: &str = "闰";
const YEAR_SUFFIX: &str = "年";
const MONTH_SUFFIX: &str = "月";

/// Year 4 CE opened a sexagenary cycle (甲子).
const CYCLE_ORIGIN_YEAR: u16 = 4;
const CYCLE_YEARS: u16 = 60;

/// Position of `year` within the 60-year cycle, 0 = 甲子.
const fn cycle_index(year: u16) -> u16 {
    (year % CYCLE_YEARS + CYCLE_YEARS - CYCLE_ORIGIN_YEAR) % CYCLE_YEARS
}

/// Stem-branch name of a lunar year.
///
/// ```
/// assert_eq!(nongli::fmt::sexagenary_year(2016), "丙申");
/// assert_eq!(nongli::fmt::sexagenary_year(1984), "甲子");
/// ```
pub fn sexagenary_year(year: u16) -> String {
    let index = usize::from(cycle_index(year));
    STEMS[index % STEMS.len()].to_owned() + BRANCHES[index % BRANCHES.len()]
}

/// Zodiac animal (生肖) of a lunar year.
pub fn zodiac(year: u16) -> &'static str {
    ZODIAC[usize::from(cycle_index(year)) % ZODIAC.len()]
}

pub fn year_label(year: u16) -> String {
    sexagenary_year(year) + YEAR_SUFFIX
}

/// Month name including 月, e.g. 正月, 冬月, 闰六月.
///
/// # Panics
/// Panics if `month` is not in `1..=12`.
pub fn month_label(month: u8, is_leap: bool) -> String {
    let name = match month {
        1..=12 => MONTHS[usize::from(month - 1)],
        _ => panic!("month {month} not in 1..=12"),
    };
    let mut label = String::new();
    if is_leap {
        label += LEAP_MARKER;
    }
    label + name + MONTH_SUFFIX
}

/// Day name: 初一..初十, 十一..十九, 二十, 廿一..廿九, 三十.
///
/// # Panics
/// Panics if `day` is not in `1..=30`.
pub fn day_label(day: u8) -> String {
    let tens = match day {
        1..=10 => "初",
        11..=19 => "十",
        20 => "二",
        21..=29 => "廿",
        30 => "三",
        _ => panic!("day {day} not in 1..=30"),
    };
    tens.to_owned() + NUMERALS[usize::from(day % 10)]
}

pub const fn weekday_label(weekday: Weekday) -> &'static str {
    WEEKDAYS[weekday.index() as usize]
}

/// Renders a lunar date, e.g. `丙申年十月廿九` or `癸卯年闰二月初一`.
///
/// # Panics
/// Panics if the month or day is outside the label tables. Dates produced by
/// the conversion functions always fit.
pub fn lunar_to_text(date: LunarDate) -> String {
    year_label(date.year) + &month_label(date.month, date.is_leap_month) + &day_label(date.day)
}

/// Converts a solar date and renders it followed by the weekday label, e.g.
/// `丙申年十月廿九 星期一`.
///
/// `weekday` is taken as given (0 = Sunday), the way a host clock reports it;
/// it is not cross-checked against the date.
///
/// # Errors
/// Returns `ConversionError::InvalidWeekday` if `weekday > 6`, and the errors
/// of [`solar_to_lunar`] for the date.
pub fn solar_to_lunar_text(
    year: u16,
    month: u8,
    day: u8,
    weekday: u8,
) -> Result<String, ConversionError> {
    let log_failure = |err: ConversionError| {
        debug!(
            "event=solar_to_lunar_text module=fmt status=error reason={} input={year}-{month:02}-{day:02} weekday={weekday}",
            err.reason()
        );
        err
    };
    let weekday = Weekday::try_from(weekday).map_err(log_failure)?;
    let date = SolarDate::new(year, month, day).map_err(|err| log_failure(err.into()))?;
    let lunar = solar_to_lunar(date)?;
    let mut text = lunar_to_text(lunar);
    text.push(WEEKDAY_SEPARATOR);
    text += weekday_label(weekday);
    Ok(text)
}
