//! Building blocks for rule groups
//!
//! A rule group runs in three phases, stopping at the first failure:
//!
//! 1. requiredness (group-specific, done by the caller)
//! 2. numeric type checks (`check_types`)
//! 3. per-field checks in declaration order (`run_checks`)
//!
//! In update mode phases 2 and 3 only look at fields the payload actually carries.

use bestiary_types::{FieldSet, ValidationError};

use crate::formats::{is_non_blank, validate_image, validate_sound};

/// Whether a payload creates a record or patches an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Create,
    Update,
}

/// Interval of validity for a numeric field; the upper bound is always inclusive
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f64,
    pub max: f64,
    pub min_exclusive: bool,
}

impl Interval {
    /// `[min, max]`
    pub const fn closed(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            min_exclusive: false,
        }
    }

    /// `(min, max]`
    pub const fn left_open(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            min_exclusive: true,
        }
    }

    /// `[min, ∞)`
    pub const fn at_least(min: f64) -> Self {
        Self::closed(min, f64::INFINITY)
    }

    pub fn contains(&self, value: f64) -> bool {
        let above_min = if self.min_exclusive {
            value > self.min
        } else {
            value >= self.min
        };
        above_min && value <= self.max
    }
}

/// A single field-level check
#[derive(Debug, Clone, Copy)]
pub enum Check {
    Range {
        field: &'static str,
        interval: Interval,
        message: &'static str,
    },
    Image {
        field: &'static str,
        message: &'static str,
    },
    Sound {
        field: &'static str,
        message: &'static str,
    },
    Text {
        field: &'static str,
        message: &'static str,
    },
}

impl Check {
    pub fn field(&self) -> &'static str {
        match self {
            Check::Range { field, .. }
            | Check::Image { field, .. }
            | Check::Sound { field, .. }
            | Check::Text { field, .. } => field,
        }
    }

    pub fn apply(&self, fields: &FieldSet) -> Result<(), ValidationError> {
        match *self {
            Check::Range {
                field,
                interval,
                message,
            } => match fields.number(field) {
                Some(value) if interval.contains(value) => Ok(()),
                Some(_) => Err(ValidationError::out_of_range(message)),
                None => Err(ValidationError::wrong_type(format!(
                    "{} must be a number",
                    field
                ))),
            },
            Check::Image { field, message } => match fields.text(field) {
                Some(value) if validate_image(value) => Ok(()),
                _ => Err(ValidationError::invalid_format(message)),
            },
            Check::Sound { field, message } => match fields.text(field) {
                Some(value) if validate_sound(value) => Ok(()),
                _ => Err(ValidationError::invalid_format(message)),
            },
            Check::Text { field, message } => match fields.text(field) {
                Some(value) if is_non_blank(value) => Ok(()),
                _ => Err(ValidationError::wrong_type(message)),
            },
        }
    }
}

/// Numeric type checks
///
/// On create one combined message covers the whole group; on update each
/// supplied field is reported by name.
pub fn check_types(
    fields: &FieldSet,
    mode: Mode,
    numeric: &[&str],
    create_message: &str,
) -> Result<(), ValidationError> {
    match mode {
        Mode::Create => {
            if numeric.iter().all(|name| fields.is_number(name)) {
                Ok(())
            } else {
                Err(ValidationError::wrong_type(create_message))
            }
        }
        Mode::Update => {
            for name in numeric {
                if fields.is_present(name) && !fields.is_number(name) {
                    return Err(ValidationError::wrong_type(format!(
                        "{} must be a number",
                        name
                    )));
                }
            }
            Ok(())
        }
    }
}

/// Run checks in order; on update, checks for absent fields are skipped
pub fn run_checks(fields: &FieldSet, mode: Mode, checks: &[Check]) -> Result<(), ValidationError> {
    checks
        .iter()
        .filter(|check| mode == Mode::Create || fields.is_present(check.field()))
        .try_for_each(|check| check.apply(fields))
}

/// Static description of an all-or-nothing capability group
#[derive(Debug)]
pub struct GroupRules {
    pub kind: bestiary_types::CapabilityKind,
    pub numeric: &'static [&'static str],
    pub create_type_message: &'static str,
    pub checks: &'static [Check],
}

/// Gate, requiredness, types, then field checks
///
/// A group whose members are all null, zero, blank or `false` was not supplied
/// and passes untouched.
pub fn check_group(
    rules: &GroupRules,
    fields: &FieldSet,
    mode: Mode,
    allow_partial: bool,
) -> Result<(), ValidationError> {
    let names = rules.kind.field_names();
    if !fields.any_set(names) {
        return Ok(());
    }

    if (mode == Mode::Create || !allow_partial) && !fields.all_filled(names) {
        return Err(ValidationError::missing(rules.kind.incomplete_message()));
    }

    check_types(fields, mode, rules.numeric, rules.create_type_message)?;
    run_checks(fields, mode, rules.checks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bestiary_types::ErrorCode;
    use serde_json::json;

    #[test]
    fn test_interval_bounds() {
        let closed = Interval::closed(0.0, 10.0);
        assert!(closed.contains(0.0));
        assert!(closed.contains(10.0));
        assert!(!closed.contains(-0.001));
        assert!(!closed.contains(10.001));

        let left_open = Interval::left_open(0.0, 100.0);
        assert!(!left_open.contains(0.0));
        assert!(left_open.contains(0.001));
        assert!(left_open.contains(100.0));

        assert!(Interval::at_least(0.0).contains(1e12));
    }

    #[test]
    fn test_type_messages_differ_by_mode() {
        let fields = FieldSet::from_value(json!({"a": "1", "b": 2})).unwrap();
        let err = check_types(&fields, Mode::Create, &["a", "b"], "a and b must be numbers")
            .unwrap_err();
        assert_eq!(err.message(), "a and b must be numbers");

        let err = check_types(&fields, Mode::Update, &["a", "b"], "unused").unwrap_err();
        assert_eq!(err.message(), "a must be a number");
        assert_eq!(err.code(), ErrorCode::WrongType);
    }

    #[test]
    fn test_update_skips_absent_fields() {
        const CHECKS: &[Check] = &[
            Check::Image {
                field: "sprite",
                message: "sprite must be a valid image reference",
            },
            Check::Range {
                field: "speed",
                interval: Interval::closed(0.0, 10.0),
                message: "speed must be between 0 and 10",
            },
        ];
        let fields = FieldSet::from_value(json!({"speed": 11})).unwrap();
        let err = run_checks(&fields, Mode::Update, CHECKS).unwrap_err();
        assert_eq!(err.message(), "speed must be between 0 and 10");

        let err = run_checks(&fields, Mode::Create, CHECKS).unwrap_err();
        assert_eq!(err.message(), "sprite must be a valid image reference");
    }
}
