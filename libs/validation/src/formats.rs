//! Field format checks shared by every record kind

use bestiary_types::ValidationError;
use chrono::{DateTime, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

static IMAGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[A-Za-z0-9_,\s-]+\.(jpg|gif|png|webp)$").expect("image pattern compiles")
});

static SOUND_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[A-Za-z0-9_,\s-]+\.(mp3|wav)$").expect("sound pattern compiles")
});

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

const PASSWORD_SPECIALS: &str = "!@#$%^&*";
const PASSWORD_MIN_LEN: usize = 8;

/// Non-empty after trimming
pub fn is_non_blank(value: &str) -> bool {
    !value.trim().is_empty()
}

/// `name.ext` with a word/space/comma/hyphen file name and an image extension
pub fn validate_image(value: &str) -> bool {
    is_non_blank(value) && IMAGE_RE.is_match(value)
}

/// `name.ext` with a word/space/comma/hyphen file name and a sound extension
pub fn validate_sound(value: &str) -> bool {
    is_non_blank(value) && SOUND_RE.is_match(value)
}

pub fn validate_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

/// At least eight characters from `[A-Za-z0-9!@#$%^&*]`, including an
/// uppercase letter, a digit and one of the special characters
pub fn validate_password(value: &str) -> bool {
    let allowed = value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || PASSWORD_SPECIALS.contains(c));

    allowed
        && value.chars().count() >= PASSWORD_MIN_LEN
        && value.chars().any(|c| c.is_ascii_uppercase())
        && value.chars().any(|c| c.is_ascii_digit())
        && value.chars().any(|c| PASSWORD_SPECIALS.contains(c))
}

/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

/// Optional `limit`/`offset` window over a listing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pagination {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

impl Pagination {
    pub fn new(limit: Option<usize>, offset: Option<usize>) -> Self {
        Self { limit, offset }
    }

    /// Fill in a limit when the caller gave none
    pub fn with_default_limit(mut self, limit: usize) -> Self {
        self.limit.get_or_insert(limit);
        self
    }

    pub fn apply<T>(&self, rows: impl IntoIterator<Item = T>) -> Vec<T> {
        rows.into_iter()
            .skip(self.offset.unwrap_or(0))
            .take(self.limit.unwrap_or(usize::MAX))
            .collect()
    }
}

/// Parse query-string `limit`/`offset`; empty values count as absent
pub fn validate_limit_offset(
    limit: Option<&str>,
    offset: Option<&str>,
) -> Result<Pagination, ValidationError> {
    fn parse(raw: Option<&str>) -> Result<Option<usize>, ValidationError> {
        match raw.map(str::trim).filter(|s| !s.is_empty()) {
            None => Ok(None),
            Some(s) => s.parse::<usize>().map(Some).map_err(|_| {
                ValidationError::wrong_type("Limit and offset must be valid integers")
            }),
        }
    }

    Ok(Pagination {
        limit: parse(limit)?,
        offset: parse(offset)?,
    })
}
