use bestiary_types::{CapabilityKind, FieldSet, ValidationError};

use crate::rules::{check_group, Check, GroupRules, Interval, Mode};

const RULES: GroupRules = GroupRules {
    kind: CapabilityKind::Healer,
    numeric: &["heal_amount", "heal_rate", "heal_range"],
    create_type_message: "heal_amount, heal_rate, and heal_range must be numbers",
    checks: &[
        Check::Range {
            field: "heal_amount",
            interval: Interval::left_open(0.0, 100.0),
            message: "heal_amount must be a positive number and less than or equal to 100",
        },
        Check::Range {
            field: "heal_rate",
            interval: Interval::left_open(0.0, 10000.0),
            message: "heal_rate must be a positive number and less than or equal to 10000",
        },
        Check::Range {
            field: "heal_range",
            interval: Interval::left_open(0.0, 1000.0),
            message: "heal_range must be a positive number and less than or equal to 1000",
        },
    ],
};

pub fn validate_healer(
    fields: &FieldSet,
    mode: Mode,
    allow_partial: bool,
) -> Result<(), ValidationError> {
    check_group(&RULES, fields, mode, allow_partial)
}
