//! Wikibase time string parsing and formatting.
//!
//! Wikibase stores times as ISO 8601-like strings with an explicit sign and
//! a year of at least four digits: `+2001-12-31T00:00:00Z`,
//! `-0044-03-15T00:00:00Z`, `+13798000000-00-00T00:00:00Z`. Month and day
//! are `00` when the precision is coarser than a month or a day.

use std::fmt;

/// Error type for time string parsing failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WbTimeParseError {
    pub message: String,
}

impl fmt::Display for WbTimeParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for WbTimeParseError {}

fn err(input: &str, what: &str) -> WbTimeParseError {
    WbTimeParseError {
        message: format!("Invalid Wikibase time {:?}: {}", input, what),
    }
}

/// Components of a Wikibase time string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WbTimestamp {
    /// Signed year; negative for BCE. Year 0 is allowed by the format.
    pub year: i64,
    /// Month 1..=12, or 0 when unknown.
    pub month: u8,
    /// Day 1..=31, or 0 when unknown.
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl WbTimestamp {
    /// Parses a time string such as `+2001-12-31T00:00:00Z`.
    pub fn parse(input: &str) -> Result<Self, WbTimeParseError> {
        let negative = match input.as_bytes().first() {
            Some(b'+') => false,
            Some(b'-') => true,
            _ => return Err(err(input, "missing sign")),
        };
        let rest = &input[1..];

        let body = rest
            .strip_suffix('Z')
            .ok_or_else(|| err(input, "missing trailing Z"))?;
        let (date, time) = body
            .split_once('T')
            .ok_or_else(|| err(input, "missing T separator"))?;

        // Year may be arbitrarily long, so split the date from the right.
        let mut date_parts = date.rsplitn(3, '-');
        let day = date_parts.next().ok_or_else(|| err(input, "missing day"))?;
        let month = date_parts.next().ok_or_else(|| err(input, "missing month"))?;
        let year = date_parts.next().ok_or_else(|| err(input, "missing year"))?;

        if year.len() < 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
            return Err(err(input, "year must have at least four digits"));
        }
        let year: i64 = year.parse().map_err(|_| err(input, "year out of range"))?;

        let month = two_digits(month).ok_or_else(|| err(input, "month must be two digits"))?;
        let day = two_digits(day).ok_or_else(|| err(input, "day must be two digits"))?;
        if month > 12 {
            return Err(err(input, "month out of range"));
        }
        if day > 31 {
            return Err(err(input, "day out of range"));
        }

        let mut time_parts = time.split(':');
        let mut next_field = |name: &str, max: u8| -> Result<u8, WbTimeParseError> {
            let v = time_parts
                .next()
                .and_then(two_digits)
                .ok_or_else(|| err(input, &format!("{} must be two digits", name)))?;
            if v > max {
                return Err(err(input, &format!("{} out of range", name)));
            }
            Ok(v)
        };
        let hour = next_field("hour", 23)?;
        let minute = next_field("minute", 59)?;
        let second = next_field("second", 60)?;
        if time_parts.next().is_some() {
            return Err(err(input, "trailing time fields"));
        }

        Ok(Self {
            year: if negative { -year } else { year },
            month,
            day,
            hour,
            minute,
            second,
        })
    }

    /// Returns true if the year is before the common era.
    pub fn is_bce(&self) -> bool {
        self.year < 0
    }
}

fn two_digits(s: &str) -> Option<u8> {
    if s.len() != 2 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

impl fmt::Display for WbTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.year < 0 { '-' } else { '+' };
        write!(
            f,
            "{}{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
            sign,
            self.year.unsigned_abs(),
            self.month,
            self.day,
            self.hour,
            self.minute,
            self.second
        )
    }
}
