use bestiary_types::{CapabilityKind, FieldSet, ValidationError};

use crate::rules::{check_group, Check, GroupRules, Interval, Mode};

const RULES: GroupRules = GroupRules {
    kind: CapabilityKind::Spawner,
    numeric: &["spawn_rate"],
    create_type_message: "spawn_rate must be a number",
    checks: &[Check::Range {
        field: "spawn_rate",
        interval: Interval::left_open(0.0, 10.0),
        message: "spawn_rate must be a positive number and less than or equal to 10",
    }],
};

/// Spawner is a single-field group, so the partial allowance never changes the outcome
pub fn validate_spawner(
    fields: &FieldSet,
    mode: Mode,
    allow_partial: bool,
) -> Result<(), ValidationError> {
    check_group(&RULES, fields, mode, allow_partial)
}
