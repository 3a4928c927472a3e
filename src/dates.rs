// ⏰ Date Normalizer - permissive date/timestamp parsing into canonical forms
//
// Dirty input is expected: anything that cannot be parsed becomes None.
// Numeric dates are read month-first (03/10/2024 = March 10).

use crate::error::InputError;
use chrono::{
    DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc,
};
use chrono_tz::Tz;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ============================================================================
// ACCEPTED INPUT FORMATS
// ============================================================================

/// Datetime formats carrying an explicit offset
///
/// `%#z` also takes hour-only offsets (`+00`, `-06`), as PostgreSQL prints them.
const ZONED_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%#z",
    "%Y-%m-%dT%H:%M:%S%.f %#z",
    "%Y-%m-%d %H:%M:%S%.f%#z",
    "%Y-%m-%d %H:%M:%S%.f %#z",
    "%Y-%m-%dT%H:%M%#z",
    "%Y-%m-%d %H:%M%#z",
    "%Y-%m-%d %H:%M %#z",
    "%m/%d/%Y %H:%M:%S %#z",
];

/// Datetime formats without zone information
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %I:%M:%S %p",
    "%Y-%m-%d %I:%M %p",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%y %H:%M:%S",
    "%m/%d/%y %H:%M",
    "%m/%d/%Y %H:%M:%S%.f",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %I:%M %p",
    "%B %d, %Y %H:%M:%S",
    "%B %d, %Y %H:%M",
    "%B %d, %Y %I:%M %p",
    "%d %B %Y %H:%M:%S",
    "%d %B %Y %H:%M",
];

/// Date-only formats (each %y variant precedes its %Y twin)
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%m/%d/%y",
    "%m/%d/%Y",
    "%m-%d-%y",
    "%m-%d-%Y",
    "%m.%d.%Y",
    "%B %d, %Y",
    "%B %d %Y",
    "%b %d, %Y",
    "%b %d %Y",
    "%d %B %Y",
    "%d %b %Y",
    "%d-%b-%y",
    "%d-%b-%Y",
    "%A, %B %d, %Y",
    "%a, %b %d, %Y",
];

/// Smallest year accepted from a `%Y` field; anything lower is a short year read wrongly
const MIN_YEAR: i32 = 1000;

/// Cell contents that mean "no value"
const NULL_TOKENS: &[&str] = &["nan", "nat", "null", "none", "n/a"];

/// Suffixes meaning UTC that chrono's `%z` does not understand (with or without a space before)
const UTC_SUFFIXES: &[&str] = &["Z", "z", "UTC", "GMT", "utc", "gmt"];

// ============================================================================
// PARSED VALUE
// ============================================================================

/// Result of permissive parsing: either an absolute instant or a wall-clock reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parsed {
    Zoned(DateTime<FixedOffset>),
    Naive(NaiveDateTime),
}

/// Parse free-form date/time text. Date-only values come back as midnight.
pub fn parse_loose(raw: &str) -> Option<Parsed> {
    let s = raw.trim();
    if s.is_empty() || NULL_TOKENS.iter().any(|t| s.eq_ignore_ascii_case(t)) {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(Parsed::Zoned(dt));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(Parsed::Zoned(dt));
    }
    for fmt in ZONED_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(Parsed::Zoned(dt));
        }
    }

    // "2024-03-10 08:00:00 UTC", "2024-03-10T08:00:00UTC", "2024-03-10T08:00Z"
    for suffix in UTC_SUFFIXES {
        if let Some(stripped) = s.strip_suffix(suffix) {
            if let Some(naive) = parse_naive(stripped.trim_end()) {
                return Some(Parsed::Zoned(Utc.from_utc_datetime(&naive).fixed_offset()));
            }
        }
    }

    parse_naive(s).map(Parsed::Naive)
}

fn parse_naive(s: &str) -> Option<NaiveDateTime> {
    let naive = NAIVE_FORMATS
        .iter()
        .filter_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .find(|dt| dt.year() >= MIN_YEAR);

    naive.or_else(|| parse_date_only(s).map(|d| d.and_time(NaiveTime::MIN)))
}

fn parse_date_only(s: &str) -> Option<NaiveDate> {
    // Compact 20240310; chrono's %Y would swallow all eight digits
    if s.len() == 8 && s.bytes().all(|b| b.is_ascii_digit()) {
        let year = s[0..4].parse().ok()?;
        let month = s[4..6].parse().ok()?;
        let day = s[6..8].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    DATE_FORMATS
        .iter()
        .filter_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .find(|d| d.year() >= MIN_YEAR)
}

// ============================================================================
// DATE NORMALIZER
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateNormalizer {
    tz: Tz,
}

impl DateNormalizer {
    pub fn new(tz: Tz) -> Self {
        DateNormalizer { tz }
    }

    /// Build from an IANA zone name such as "America/Mexico_City"
    pub fn from_name(name: &str) -> Result<Self, InputError> {
        let tz: Tz = name
            .parse()
            .map_err(|_| InputError::UnknownTimezone(name.to_string()))?;
        Ok(Self::new(tz))
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }

    /// Calendar date of the parsed value, read in its own offset (no conversion)
    pub fn normalize_date(&self, raw: &str) -> Option<NaiveDate> {
        match parse_loose(raw)? {
            Parsed::Zoned(dt) => Some(dt.date_naive()),
            Parsed::Naive(dt) => Some(dt.date()),
        }
    }

    /// Wall-clock time in the configured zone
    ///
    /// Naive input is taken to already be local to the zone, so its reading is kept as-is.
    /// Input with an offset is converted into the zone.
    pub fn localize(&self, raw: &str) -> Option<NaiveDateTime> {
        match parse_loose(raw)? {
            Parsed::Zoned(dt) => Some(dt.with_timezone(&self.tz).naive_local()),
            Parsed::Naive(dt) => Some(dt),
        }
    }

    /// `localize` rendered as `YYYY-MM-DD HH:MM:SS` (no zone suffix, no sub-seconds)
    pub fn normalize_timestamp(&self, raw: &str) -> Option<String> {
        self.localize(raw)
            .map(|dt| dt.format(TIMESTAMP_FORMAT).to_string())
    }
}

impl Default for DateNormalizer {
    fn default() -> Self {
        Self::new(chrono_tz::America::Mexico_City)
    }
}

// ============================================================================
// TESTS
// ============================================================================
