use bestiary_types::{CapabilityKind, FieldSet, ValidationError};

use crate::rules::{check_group, Check, GroupRules, Interval, Mode};

const RULES: GroupRules = GroupRules {
    kind: CapabilityKind::Barrier,
    numeric: &[
        "barrier_health",
        "barrier_cooldown",
        "barrier_regen",
        "barrier_regen_cooldown",
        "barrier_radius",
    ],
    create_type_message: "barrier_health, barrier_cooldown, barrier_regen, barrier_regen_cooldown, and barrier_radius must be numbers",
    checks: &[
        Check::Range {
            field: "barrier_health",
            interval: Interval::left_open(0.0, 10000.0),
            message: "barrier_health must be a positive number and less than or equal to 10000 hitpoints",
        },
        Check::Range {
            field: "barrier_cooldown",
            interval: Interval::left_open(0.0, 60.0),
            message: "barrier_cooldown must be a positive number and less than or equal to 60 seconds",
        },
        Check::Range {
            field: "barrier_regen",
            interval: Interval::left_open(0.0, 2500.0),
            message: "barrier_regen must be a positive number and less than or equal to 2500 hitpoints per regen cycle",
        },
        Check::Range {
            field: "barrier_regen_cooldown",
            interval: Interval::left_open(0.0, 300.0),
            message: "barrier_regen_cooldown must be a positive number and less than or equal to 300 seconds",
        },
        Check::Range {
            field: "barrier_radius",
            interval: Interval::left_open(0.0, 1920.0),
            message: "barrier_radius must be a positive number and less than or equal to 1920 pixels",
        },
    ],
};

pub fn validate_barrier(
    fields: &FieldSet,
    mode: Mode,
    allow_partial: bool,
) -> Result<(), ValidationError> {
    check_group(&RULES, fields, mode, allow_partial)
}
