//! Compiled-in structure of the lunar years `FIRST_LUNAR_YEAR..=LAST_LUNAR_YEAR`.
//!
//! Month lengths and leap-month placement follow the astronomical new moons
//! and solar terms at the meridian of Beijing; there is no closed form, so
//! every year is stored as one packed word:
//!
//! * bits 15..4: months 1..12, a set bit is a 30-day month, a clear bit 29 days
//! * bits 3..0: the leap month (0 if the year has none)
//! * bit 16: length of the leap month, same encoding
//!
//! The first month of `FIRST_LUNAR_YEAR` starts on [`EPOCH`](crate::EPOCH).

use crate::consts::{
    FIRST_LUNAR_YEAR, LAST_LUNAR_YEAR, LONG_MONTH_DAYS, MAX_MONTH, SHORT_MONTH_DAYS,
};

/// Months in a year with a leap month
const MAX_MONTHS_PER_YEAR: usize = 13;

const LEAP_MONTH_MASK: u32 = 0xf;
const LONG_LEAP_MONTH_BIT: u32 = 0x1_0000;
/// Bit of month 1; month `n` sits `n - 1` bits lower.
const FIRST_MONTH_BIT: u32 = 0x8000;

/// Packed year rows, indexed by `year - FIRST_LUNAR_YEAR`.
#[rustfmt::skip]
const LUNAR_YEAR_INFO: [u32; (LAST_LUNAR_YEAR - FIRST_LUNAR_YEAR + 1) as usize] = [
    0x04bd8, 0x04ae0, 0x0a570, 0x054d5, 0x0d260, // 1900-1904
    0x0d950, 0x16554, 0x056a0, 0x09ad0, 0x055d2, // 1905-1909
    0x04ae0, 0x0a5b6, 0x0a4d0, 0x0d250, 0x1d255, // 1910-1914
    0x0b540, 0x0d6a0, 0x0ada2, 0x095b0, 0x14977, // 1915-1919
    0x04970, 0x0a4b0, 0x0b4b5, 0x06a50, 0x06d40, // 1920-1924
    0x1ab54, 0x02b60, 0x09570, 0x052f2, 0x04970, // 1925-1929
    0x06566, 0x0d4a0, 0x0ea50, 0x16a95, 0x05ad0, // 1930-1934
    0x02b60, 0x186e3, 0x092e0, 0x1c8d7, 0x0c950, // 1935-1939
    0x0d4a0, 0x1d8a6, 0x0b550, 0x056a0, 0x1a5b4, // 1940-1944
    0x025d0, 0x092d0, 0x0d2b2, 0x0a950, 0x0b557, // 1945-1949
    0x06ca0, 0x0b550, 0x15355, 0x04da0, 0x0a5b0, // 1950-1954
    0x14573, 0x052b0, 0x0a9a8, 0x0e950, 0x06aa0, // 1955-1959
    0x0aea6, 0x0ab50, 0x04b60, 0x0aae4, 0x0a570, // 1960-1964
    0x05260, 0x0f263, 0x0d950, 0x05b57, 0x056a0, // 1965-1969
    0x096d0, 0x04dd5, 0x04ad0, 0x0a4d0, 0x0d4d4, // 1970-1974
    0x0d250, 0x0d558, 0x0b540, 0x0b6a0, 0x195a6, // 1975-1979
    0x095b0, 0x049b0, 0x0a974, 0x0a4b0, 0x0b27a, // 1980-1984
    0x06a50, 0x06d40, 0x0af46, 0x0ab60, 0x09570, // 1985-1989
    0x04af5, 0x04970, 0x064b0, 0x074a3, 0x0ea50, // 1990-1994
    0x06b58, 0x05ac0, 0x0ab60, 0x096d5, 0x092e0, // 1995-1999
    0x0c960, 0x0d954, 0x0d4a0, 0x0da50, 0x07552, // 2000-2004
    0x056a0, 0x0abb7, 0x025d0, 0x092d0, 0x0cab5, // 2005-2009
    0x0a950, 0x0b4a0, 0x0baa4, 0x0ad50, 0x055d9, // 2010-2014
    0x04ba0, 0x0a5b0, 0x15176, 0x052b0, 0x0a930, // 2015-2019
    0x07954, 0x06aa0, 0x0ad50, 0x05b52, 0x04b60, // 2020-2024
    0x0a6e6, 0x0a4e0, 0x0d260, 0x0ea65, 0x0d530, // 2025-2029
    0x05aa0, 0x076a3, 0x096d0, 0x04afb, 0x04ad0, // 2030-2034
    0x0a4d0, 0x1d0b6, 0x0d250, 0x0d520, 0x0dd45, // 2035-2039
    0x0b5a0, 0x056d0, 0x055b2, 0x049b0, 0x0a577, // 2040-2044
    0x0a4b0, 0x0aa50, 0x1b255, 0x06d20, 0x0ada0, // 2045-2049
    0x14b63, 0x09370, 0x049f8, 0x04970, 0x064b0, // 2050-2054
    0x168a6, 0x0ea50, 0x06b20, 0x1a6c4, 0x0aae0, // 2055-2059
    0x092e0, 0x0d2e3, 0x0c960, 0x0d557, 0x0d4a0, // 2060-2064
    0x0da50, 0x05d55, 0x056a0, 0x0a6d0, 0x055d4, // 2065-2069
    0x052d0, 0x0a9b8, 0x0a950, 0x0b4a0, 0x0b6a6, // 2070-2074
    0x0ad50, 0x055a0, 0x0aba4, 0x0a5b0, 0x052b0, // 2075-2079
    0x0b273, 0x06930, 0x07337, 0x06aa0, 0x0ad50, // 2080-2084
    0x14b55, 0x04b60, 0x0a570, 0x054e4, 0x0d160, // 2085-2089
    0x0e968, 0x0d520, 0x0daa0, 0x16aa6, 0x056d0, // 2090-2094
    0x04ae0, 0x0a9d4, 0x0a2d0, 0x0d150, 0x0f252, // 2095-2099
    0x0d520, // 2100-2100
];

/// Number of days covered by the table, from `EPOCH` to the last day of
/// `LAST_LUNAR_YEAR`.
pub(crate) const SPAN_DAYS: i32 = span_days();

const fn span_days() -> i32 {
    let mut total = 0;
    let mut i = 0;
    while i < LUNAR_YEAR_INFO.len() {
        total += LunarYearEntry::decode(LUNAR_YEAR_INFO[i]).total_days() as i32;
        i += 1;
    }
    total
}

/// Error type for year table lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    /// The lunar year is not covered by the table.
    #[error("Lunar year {year} is out of range (must be {}-{})", FIRST_LUNAR_YEAR, LAST_LUNAR_YEAR)]
    YearOutOfRange { year: u16 },

    /// The year has no such month (or no such leap month).
    #[error("Lunar year {year} has no month {month} (leap: {is_leap})")]
    MonthOutOfRange { year: u16, month: u8, is_leap: bool },
}

/// One month of a lunar year, as yielded by [`LunarYearEntry::months`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LunarMonth {
    /// Month number, 1..=12. A leap month carries the number it repeats.
    pub number: u8,
    pub is_leap: bool,
    /// 29 or 30
    pub days: u8,
}

/// Decoded table row for one lunar year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LunarYearEntry {
    leap_month: u8,
    lengths: [u8; MAX_MONTHS_PER_YEAR],
    len: usize,
}

impl LunarYearEntry {
    const fn decode(info: u32) -> Self {
        let leap_month = (info & LEAP_MONTH_MASK) as u8;
        let mut lengths = [0; MAX_MONTHS_PER_YEAR];
        let mut len = 0;
        let mut month = 1;
        while month <= MAX_MONTH {
            lengths[len] = month_days(info & (FIRST_MONTH_BIT >> (month - 1)) != 0);
            len += 1;
            if month == leap_month {
                lengths[len] = month_days(info & LONG_LEAP_MONTH_BIT != 0);
                len += 1;
            }
            month += 1;
        }
        Self {
            leap_month,
            lengths,
            len,
        }
    }

    /// The leap month of this year, or 0 if there is none
    #[inline]
    pub const fn leap_month(&self) -> u8 {
        self.leap_month
    }

    /// Month lengths in calendar order, leap month included (12 or 13 values)
    pub fn month_lengths(&self) -> &[u8] {
        &self.lengths[..self.len]
    }

    /// Sum of all month lengths
    pub const fn total_days(&self) -> u16 {
        let mut total = 0;
        let mut i = 0;
        while i < self.len {
            total += self.lengths[i] as u16;
            i += 1;
        }
        total
    }

    /// Months in calendar order, the leap month directly after its base month
    pub fn months(&self) -> impl Iterator<Item = LunarMonth> + '_ {
        let leap_month = self.leap_month;
        (1..=MAX_MONTH)
            .flat_map(move |number| {
                let leap = (number == leap_month).then_some((number, true));
                std::iter::once((number, false)).chain(leap)
            })
            .zip(self.month_lengths().iter().copied())
            .map(|((number, is_leap), days)| LunarMonth {
                number,
                is_leap,
                days,
            })
    }

    /// Zero-based position of a month within `month_lengths`
    pub fn position(&self, month: u8, is_leap: bool) -> Option<usize> {
        if month == 0 || month > MAX_MONTH {
            return None;
        }
        if is_leap {
            return (month == self.leap_month).then_some(usize::from(month));
        }
        if self.leap_month != 0 && month > self.leap_month {
            Some(usize::from(month))
        } else {
            Some(usize::from(month) - 1)
        }
    }

    /// Length of a month, or `None` if the year has no such month
    pub fn month_length(&self, month: u8, is_leap: bool) -> Option<u8> {
        self.position(month, is_leap)
            .map(|position| self.lengths[position])
    }
}

const fn month_days(long: bool) -> u8 {
    if long { LONG_MONTH_DAYS } else { SHORT_MONTH_DAYS }
}

/// Read-only view over the compiled-in year table.
#[derive(Debug, Clone, Copy, Default)]
pub struct LunarYearTable;

impl LunarYearTable {
    /// First year covered
    pub const fn first_year() -> u16 {
        FIRST_LUNAR_YEAR
    }

    /// Last year covered (inclusive)
    pub const fn last_year() -> u16 {
        LAST_LUNAR_YEAR
    }

    pub const fn contains(year: u16) -> bool {
        year >= FIRST_LUNAR_YEAR && year <= LAST_LUNAR_YEAR
    }

    /// Decoded entry for `year`
    ///
    /// # Errors
    /// Returns `TableError::YearOutOfRange` if the year is not covered.
    pub fn entry(year: u16) -> Result<LunarYearEntry, TableError> {
        if !Self::contains(year) {
            return Err(TableError::YearOutOfRange { year });
        }
        Ok(LunarYearEntry::decode(
            LUNAR_YEAR_INFO[usize::from(year - FIRST_LUNAR_YEAR)],
        ))
    }

    /// All covered years with their entries, in ascending order
    pub fn iter() -> impl Iterator<Item = (u16, LunarYearEntry)> {
        (FIRST_LUNAR_YEAR..=LAST_LUNAR_YEAR)
            .zip(LUNAR_YEAR_INFO.into_iter().map(LunarYearEntry::decode))
    }

    /// Leap month of `year`, 0 if none
    ///
    /// # Errors
    /// Returns `TableError::YearOutOfRange` if the year is not covered.
    pub fn leap_month(year: u16) -> Result<u8, TableError> {
        Self::entry(year).map(|entry| entry.leap_month())
    }

    /// Number of days in lunar `year`
    ///
    /// # Errors
    /// Returns `TableError::YearOutOfRange` if the year is not covered.
    pub fn year_total_days(year: u16) -> Result<u16, TableError> {
        Self::entry(year).map(|entry| entry.total_days())
    }

    /// Number of days in a month of `year`
    ///
    /// # Errors
    /// Returns `TableError::YearOutOfRange` if the year is not covered and
    /// `TableError::MonthOutOfRange` if the year has no such month.
    pub fn month_length(year: u16, month: u8, is_leap: bool) -> Result<u8, TableError> {
        Self::entry(year)?
            .month_length(month, is_leap)
            .ok_or(TableError::MonthOutOfRange {
                year,
                month,
                is_leap,
            })
    }
}
