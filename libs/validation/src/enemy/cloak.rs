use bestiary_types::{CapabilityKind, FieldSet, ValidationError};
use serde_json::Value;

use crate::rules::{check_types, run_checks, Check, Interval, Mode};

const KIND: CapabilityKind = CapabilityKind::Cloak;
const MEASURES: [&str; 3] = ["cloak_duration", "cloak_radius", "cloak_cooldown"];
const TRIGGERS: [&str; 2] = ["timer_based", "proximity_based"];

const CHECKS: &[Check] = &[
    Check::Range {
        field: "cloak_duration",
        interval: Interval::left_open(0.0, 30.0),
        message: "cloak_duration must be a positive number and less than or equal to 30",
    },
    Check::Range {
        field: "cloak_radius",
        interval: Interval::left_open(0.0, 1920.0),
        message: "cloak_radius must be a positive number and less than or equal to 1920",
    },
    Check::Range {
        field: "cloak_cooldown",
        interval: Interval::left_open(0.0, 60.0),
        message: "cloak_cooldown must be a positive number and less than or equal to 60",
    },
];

const INACTIVE: &str = "At least one of timer_based or proximity_based must be true";

/// Cloak group
///
/// The group counts as supplied only when some member is set (non-zero, non-blank
/// or `true`). Completeness means all three measures plus at least one trigger flag. When the
/// group is being introduced (create, or update without allowance) one trigger must
/// be `true`. A payload that explicitly turns both triggers off is refused in every
/// mode; in partial updates the remaining cases are covered by the transition check,
/// which sees the stored flags.
pub fn validate_cloak(
    fields: &FieldSet,
    mode: Mode,
    allow_partial: bool,
) -> Result<(), ValidationError> {
    if !fields.any_set(KIND.field_names()) {
        return Ok(());
    }

    let introducing = mode == Mode::Create || !allow_partial;
    if introducing && !(fields.all_filled(&MEASURES) && fields.any_present(&TRIGGERS)) {
        return Err(ValidationError::missing(KIND.incomplete_message()));
    }

    check_types(
        fields,
        mode,
        &MEASURES,
        "cloak_duration, cloak_radius, and cloak_cooldown must be numbers",
    )?;
    run_checks(fields, mode, CHECKS)?;

    let non_boolean = TRIGGERS
        .iter()
        .any(|name| matches!(fields.get(name), Some(v) if !matches!(v, Value::Bool(_))));
    if non_boolean {
        return Err(ValidationError::wrong_type(
            "timer_based and proximity_based must be boolean values when provided",
        ));
    }

    let timer = fields.boolean("timer_based");
    let proximity = fields.boolean("proximity_based");
    let switched_off = timer == Some(false) && proximity == Some(false);
    let none_on = timer != Some(true) && proximity != Some(true);
    if switched_off || (introducing && none_on) {
        return Err(ValidationError::inactive_cloak(INACTIVE));
    }
    Ok(())
}
