use bestiary_types::enemy::CORE_FIELDS;
use bestiary_types::{FieldSet, ValidationError};

use crate::formats::validate_sound;
use crate::rules::{check_types, run_checks, Check, Interval, Mode};

const NUMERIC: [&str; 5] = ["health", "speed", "damage", "score", "attack_speed"];

const CHECKS: &[Check] = &[
    Check::Text {
        field: "name",
        message: "name must be a valid string",
    },
    Check::Range {
        field: "attack_speed",
        interval: Interval::closed(0.0, 10.0),
        message: "attack_speed must be between 0 and 10",
    },
    Check::Range {
        field: "speed",
        interval: Interval::closed(0.0, 10.0),
        message: "speed must be between 0 and 10",
    },
    Check::Range {
        field: "score",
        interval: Interval::at_least(0.0),
        message: "score must be a positive number",
    },
    Check::Range {
        field: "health",
        interval: Interval::at_least(0.0),
        message: "health must be a positive number",
    },
    Check::Range {
        field: "damage",
        interval: Interval::at_least(0.0),
        message: "damage must be a positive number",
    },
    Check::Image {
        field: "sprite",
        message: "sprite must be a valid image reference",
    },
];

/// Core group: all seven fields on create, supplied fields only on update.
/// The optional `sound` is checked whenever it is supplied.
pub fn validate_core(fields: &FieldSet, mode: Mode) -> Result<(), ValidationError> {
    if mode == Mode::Create && !fields.all_filled(&CORE_FIELDS) {
        return Err(ValidationError::missing("Missing required fields"));
    }

    check_types(
        fields,
        mode,
        &NUMERIC,
        "Health, speed, and damage must be numbers",
    )?;
    run_checks(fields, mode, CHECKS)?;

    if fields.is_present("sound") && !fields.text("sound").is_some_and(validate_sound) {
        return Err(ValidationError::invalid_format(
            "sound must be a valid sound reference",
        ));
    }
    Ok(())
}
