//! Conversion between the Gregorian calendar and the Chinese lunisolar
//! calendar for lunar years 1900 to 2100, plus rendering of lunar dates as
//! Chinese text.
//!
//! ```
//! use nongli::{lunar_to_text, solar_to_lunar, LunarDate, SolarDate};
//!
//! let lunar = solar_to_lunar(SolarDate::new(2016, 11, 28)?)?;
//! assert_eq!(
//!     lunar,
//!     LunarDate { year: 2016, month: 10, day: 29, is_leap_month: false }
//! );
//! assert_eq!(lunar_to_text(lunar), "丙申年十月廿九");
//! # Ok::<(), nongli::ConversionError>(())
//! ```

mod consts;
mod convert;
pub mod day_count;
pub mod fmt;
mod prelude;
pub mod table;
#[cfg(test)]
mod test_log;
mod types;

pub use consts::*;
pub use convert::{lunar_to_solar, solar_to_lunar, ConversionError};
pub use fmt::{lunar_to_text, solar_to_lunar_text};
pub use table::{LunarMonth, LunarYearEntry, LunarYearTable, TableError};
pub use types::{days_in_month, is_leap_year, LunarDate, SolarDate, Weekday};

use crate::prelude::*;

/// Why a Gregorian date was rejected before any lunar lookup happened.
///
/// Raised by `SolarDate::new`, `str::parse::<SolarDate>` and deserialization,
/// and carried inside `ConversionError::InvalidSolarDate`.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    /// The text is not `YYYY-MM-DD`, or a component is not a number.
    #[display(fmt = "Malformed solar date: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Solar year {} outside 1..={}", "_0", MAX_YEAR)]
    InvalidYear(u16),
    #[display(fmt = "Solar month {} outside 1..={}", "_0", MAX_MONTH)]
    InvalidMonth(u8),
    /// The day does not exist in that Gregorian month, e.g. February 29 of a
    /// common year.
    #[display(fmt = "{year:04}-{month:02} has no day {day}")]
    InvalidDay { year: u16, month: u8, day: u8 },
    #[display(fmt = "Solar date string is empty")]
    EmptyInput,
}

impl std::error::Error for ParseError {}
