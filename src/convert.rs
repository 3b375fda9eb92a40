use crate::consts::{EPOCH, LAST_SUPPORTED_DATE};
use crate::day_count::{lunar_to_offset, offset_to_lunar, offset_to_solar, solar_to_offset};
use crate::table::TableError;
use crate::types::{LunarDate, SolarDate};
use crate::ParseError;

/// Error type for calendar conversions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    /// The date, or its day offset, is not covered by the lunar year table.
    #[error("{input} is outside the supported range ({} to {})", EPOCH, LAST_SUPPORTED_DATE)]
    DateOutOfRange { input: String },

    /// The lunar month does not exist in that year, or the day is not in it.
    #[error("Invalid lunar date {year}-{month:02}-{day:02} (leap month: {is_leap_month})")]
    InvalidLunarDate {
        year: u16,
        month: u8,
        day: u8,
        is_leap_month: bool,
    },

    /// The solar date is not a valid Gregorian date.
    #[error(transparent)]
    InvalidSolarDate(#[from] ParseError),

    /// Weekday index outside `0..=6`.
    #[error("Invalid weekday index: {0} (must be 0-6, Sunday first)")]
    InvalidWeekday(u8),
}

impl ConversionError {
    /// Short snake_case name of the error kind, used as the `reason=` log field.
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::DateOutOfRange { .. } => "date_out_of_range",
            Self::InvalidLunarDate { .. } => "invalid_lunar_date",
            Self::InvalidSolarDate(_) => "invalid_solar_date",
            Self::InvalidWeekday(_) => "invalid_weekday",
        }
    }

    pub(crate) const fn invalid_lunar(date: LunarDate) -> Self {
        Self::InvalidLunarDate {
            year: date.year,
            month: date.month,
            day: date.day,
            is_leap_month: date.is_leap_month,
        }
    }

    /// Maps a table lookup failure for `date` onto the conversion error kinds.
    pub(crate) fn from_table(err: TableError, date: LunarDate) -> Self {
        match err {
            TableError::YearOutOfRange { year } => Self::DateOutOfRange {
                input: format!("lunar year {year}"),
            },
            TableError::MonthOutOfRange { .. } => Self::invalid_lunar(date),
        }
    }
}

/// Converts a Gregorian date to the Chinese lunisolar calendar.
///
/// # Errors
/// Returns `ConversionError::InvalidSolarDate` for an impossible Gregorian
/// date and `ConversionError::DateOutOfRange` outside `EPOCH..=LAST_SUPPORTED_DATE`.
pub fn solar_to_lunar(date: SolarDate) -> Result<LunarDate, ConversionError> {
    solar_to_offset(date).and_then(offset_to_lunar)
}

/// Converts a lunar date to the Gregorian calendar.
///
/// # Errors
/// Returns `ConversionError::InvalidLunarDate` if the month or day does not
/// exist and `ConversionError::DateOutOfRange` if the year is not covered.
pub fn lunar_to_solar(date: LunarDate) -> Result<SolarDate, ConversionError> {
    lunar_to_offset(date).and_then(offset_to_solar)
}

impl SolarDate {
    /// Shorthand for [`solar_to_lunar`].
    ///
    /// # Errors
    /// See [`solar_to_lunar`].
    pub fn to_lunar(self) -> Result<LunarDate, ConversionError> {
        solar_to_lunar(self)
    }
}

impl LunarDate {
    /// Shorthand for [`lunar_to_solar`].
    ///
    /// # Errors
    /// See [`lunar_to_solar`].
    pub fn to_solar(self) -> Result<SolarDate, ConversionError> {
        lunar_to_solar(self)
    }
}
