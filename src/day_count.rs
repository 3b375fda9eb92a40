//! Day offsets from [`EPOCH`], the common currency of both calendars.
//!
//! Offset 0 is solar 1900-01-31, which is lunar 1900-01-01. Valid offsets
//! run up to the last day of the last table year.

use crate::consts::{EPOCH, EPOCH_WEEKDAY, MIN_DAY};
use crate::table::{LunarYearTable, SPAN_DAYS};
use crate::types::{LunarDate, SolarDate, Weekday};
use crate::{ConversionError, ParseError};
use log::debug;

/// Days from 1970-01-01 to 0000-03-01 in the proleptic Gregorian calendar.
const CIVIL_SHIFT: i32 = 719_468;
const DAYS_PER_ERA: i32 = 146_097;
const YEARS_PER_ERA: i32 = 400;

/// Gregorian day number of `EPOCH`, counted from 1970-01-01
const EPOCH_DAY_NUMBER: i32 = days_from_civil(EPOCH.year, EPOCH.month, EPOCH.day);

/// Weekday of 1970-01-01
const CIVIL_ZERO_WEEKDAY: Weekday = Weekday::Thursday;

/// Proleptic Gregorian day number (days since 1970-01-01), computed over
/// years starting in March so the leap day falls last.
const fn days_from_civil(year: u16, month: u8, day: u8) -> i32 {
    let month = month as i32;
    let year = if month <= 2 {
        year as i32 - 1
    } else {
        year as i32
    };
    let era = year.div_euclid(YEARS_PER_ERA);
    let year_of_era = year - era * YEARS_PER_ERA;
    let shifted_month = (month + 9) % 12;
    let day_of_year = (153 * shifted_month + 2) / 5 + day as i32 - 1;
    let day_of_era = year_of_era * 365 + year_of_era / 4 - year_of_era / 100 + day_of_year;
    era * DAYS_PER_ERA + day_of_era - CIVIL_SHIFT
}

/// Inverse of [`days_from_civil`].
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
const fn civil_from_days(days: i32) -> (i32, u8, u8) {
    let days = days + CIVIL_SHIFT;
    let era = days.div_euclid(DAYS_PER_ERA);
    let day_of_era = days - era * DAYS_PER_ERA;
    let year_of_era =
        (day_of_era - day_of_era / 1460 + day_of_era / 36_524 - day_of_era / 146_096) / 365;
    let day_of_year = day_of_era - (365 * year_of_era + year_of_era / 4 - year_of_era / 100);
    let shifted_month = (5 * day_of_year + 2) / 153;
    let day = day_of_year - (153 * shifted_month + 2) / 5 + 1;
    let month = if shifted_month < 10 {
        shifted_month + 3
    } else {
        shifted_month - 9
    };
    let year = year_of_era + era * YEARS_PER_ERA;
    let year = if month <= 2 { year + 1 } else { year };
    (year, month as u8, day as u8)
}

fn out_of_range(input: impl ToString, op: &str) -> ConversionError {
    let input = input.to_string();
    debug!("event={op} module=day_count status=error reason=date_out_of_range input={input}");
    ConversionError::DateOutOfRange { input }
}

fn check_span(offset: i32, op: &str) -> Result<(), ConversionError> {
    if (0..SPAN_DAYS).contains(&offset) {
        Ok(())
    } else {
        Err(out_of_range(format!("day offset {offset}"), op))
    }
}

/// Days from `EPOCH` to `date`.
///
/// # Errors
/// Returns `ConversionError::InvalidSolarDate` for an impossible Gregorian
/// date and `ConversionError::DateOutOfRange` if the date is not covered by
/// the lunar table.
pub fn solar_to_offset(date: SolarDate) -> Result<i32, ConversionError> {
    let date = date.validate().map_err(|err| {
        debug!(
            "event=solar_to_offset module=day_count status=error reason=invalid_solar_date input={date}"
        );
        ConversionError::from(err)
    })?;
    let offset = days_from_civil(date.year, date.month, date.day) - EPOCH_DAY_NUMBER;
    if !(0..SPAN_DAYS).contains(&offset) {
        return Err(out_of_range(date, "solar_to_offset"));
    }
    Ok(offset)
}

/// Solar date `offset` days after `EPOCH`.
///
/// # Errors
/// Returns `ConversionError::DateOutOfRange` if the offset is outside the span.
pub fn offset_to_solar(offset: i32) -> Result<SolarDate, ConversionError> {
    check_span(offset, "offset_to_solar")?;
    let (year, month, day) = civil_from_days(offset + EPOCH_DAY_NUMBER);
    let year = u16::try_from(year).map_err(|_| out_of_range(year, "offset_to_solar"))?;
    Ok(SolarDate { year, month, day })
}

/// Days from `EPOCH` (lunar 1900-01-01) to `date`.
///
/// Adds every table year before `date.year`, then every month before the
/// target month (a leap month sits right after the month it repeats), then
/// `day - 1`.
///
/// # Errors
/// Returns `ConversionError::DateOutOfRange` if the year is not in the table
/// and `ConversionError::InvalidLunarDate` if the month does not exist in that
/// year or the day is not within it.
pub fn lunar_to_offset(date: LunarDate) -> Result<i32, ConversionError> {
    count_lunar_days(date).inspect_err(|err| {
        debug!(
            "event=lunar_to_offset module=day_count status=error reason={} year={} month={} day={} leap={}",
            err.reason(),
            date.year,
            date.month,
            date.day,
            date.is_leap_month
        );
    })
}

fn count_lunar_days(date: LunarDate) -> Result<i32, ConversionError> {
    let entry = LunarYearTable::entry(date.year)
        .map_err(|err| ConversionError::from_table(err, date))?;
    let position = entry
        .position(date.month, date.is_leap_month)
        .ok_or(ConversionError::invalid_lunar(date))?;
    let lengths = entry.month_lengths();
    if date.day < MIN_DAY || date.day > lengths[position] {
        return Err(ConversionError::invalid_lunar(date));
    }

    let preceding_years: i32 = LunarYearTable::iter()
        .take_while(|&(year, _)| year < date.year)
        .map(|(_, entry)| i32::from(entry.total_days()))
        .sum();
    let preceding_months: i32 = lengths[..position].iter().copied().map(i32::from).sum();
    Ok(preceding_years + preceding_months + i32::from(date.day - MIN_DAY))
}

/// Lunar date `offset` days after `EPOCH`.
///
/// Walks the table year by year, then month by month; what remains is the
/// zero-based day.
///
/// # Errors
/// Returns `ConversionError::DateOutOfRange` if the offset is outside the span.
pub fn offset_to_lunar(offset: i32) -> Result<LunarDate, ConversionError> {
    check_span(offset, "offset_to_lunar")?;

    let mut remaining = offset;
    for (year, entry) in LunarYearTable::iter() {
        let year_days = i32::from(entry.total_days());
        if remaining >= year_days {
            remaining -= year_days;
            continue;
        }
        for month in entry.months() {
            let month_days = i32::from(month.days);
            if remaining < month_days {
                let day = u8::try_from(remaining)
                    .map_err(|_| out_of_range(offset, "offset_to_lunar"))?;
                return Ok(LunarDate {
                    year,
                    month: month.number,
                    day: day + MIN_DAY,
                    is_leap_month: month.is_leap,
                });
            }
            remaining -= month_days;
        }
    }
    Err(out_of_range(offset, "offset_to_lunar"))
}

/// Day of the week for a day offset. Defined for any offset, inside the span
/// or not.
pub const fn weekday_of_offset(offset: i32) -> Weekday {
    EPOCH_WEEKDAY.add_days(offset)
}

impl SolarDate {
    /// Day of the week of this date. Works for every valid Gregorian date,
    /// including those outside the lunar table.
    ///
    /// # Errors
    /// Returns `ParseError` if the date is not a valid Gregorian date.
    pub fn weekday(self) -> Result<Weekday, ParseError> {
        let date = self.validate()?;
        Ok(CIVIL_ZERO_WEEKDAY.add_days(days_from_civil(date.year, date.month, date.day)))
    }
}
