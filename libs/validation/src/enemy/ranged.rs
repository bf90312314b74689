use bestiary_types::{CapabilityKind, FieldSet, ValidationError};

use crate::rules::{check_group, Check, GroupRules, Interval, Mode};

const RULES: GroupRules = GroupRules {
    kind: CapabilityKind::Ranged,
    numeric: &["projectile_speed", "range", "fire_rate"],
    create_type_message: "projectile_speed, range, and fire_rate must be numbers",
    checks: &[
        Check::Image {
            field: "projectile_sprite",
            message: "projectile_sprite must be a valid image reference",
        },
        Check::Sound {
            field: "projectile_sound",
            message: "projectile_sound must be a valid sound reference",
        },
        Check::Range {
            field: "projectile_speed",
            interval: Interval::closed(0.0, 10.0),
            message: "projectile_speed must be between 0 and 10",
        },
        Check::Range {
            field: "range",
            interval: Interval::closed(0.0, 1920.0),
            message: "range must be a positive number and smaller than 1920",
        },
        Check::Range {
            field: "fire_rate",
            interval: Interval::closed(0.0, 10.0),
            message: "fire_rate must be between 0 and 10",
        },
    ],
};

pub fn validate_ranged(
    fields: &FieldSet,
    mode: Mode,
    allow_partial: bool,
) -> Result<(), ValidationError> {
    check_group(&RULES, fields, mode, allow_partial)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bestiary_types::ErrorCode;
    use serde_json::json;

    fn archer() -> FieldSet {
        FieldSet::from_value(json!({
            "projectile_sprite": "arrow.png",
            "projectile_sound": "twang.wav",
            "projectile_speed": 6,
            "range": 400,
            "fire_rate": 2
        }))
        .unwrap()
    }

    #[test]
    fn test_absent_group_passes() {
        assert!(validate_ranged(&FieldSet::new(), Mode::Create, false).is_ok());
        let nulls = FieldSet::from_value(json!({"range": null, "fire_rate": null})).unwrap();
        assert!(validate_ranged(&nulls, Mode::Create, false).is_ok());
    }

    #[test]
    fn test_missing_fire_rate_rejected() {
        let mut fields = archer();
        fields.remove("fire_rate");
        let err = validate_ranged(&fields, Mode::Create, false).unwrap_err();
        assert_eq!(err.code(), ErrorCode::MissingRequiredField);
        assert!(err.message().contains("must all be provided"));
    }

    #[test]
    fn test_partial_update_only_with_allowance() {
        let patch = FieldSet::from_value(json!({"range": 800})).unwrap();
        assert!(validate_ranged(&patch, Mode::Update, false).is_err());
        assert!(validate_ranged(&patch, Mode::Update, true).is_ok());

        let patch = FieldSet::from_value(json!({"range": 5000})).unwrap();
        let err = validate_ranged(&patch, Mode::Update, true).unwrap_err();
        assert_eq!(err.code(), ErrorCode::OutOfRange);
    }

    #[test]
    fn test_formats_checked_before_ranges() {
        let mut fields = archer();
        fields.insert("projectile_sound", "twang.png");
        fields.insert("range", 99999);
        let err = validate_ranged(&fields, Mode::Create, false).unwrap_err();
        assert_eq!(err.message(), "projectile_sound must be a valid sound reference");
    }

    #[test]
    fn test_boundaries() {
        let mut fields = archer();
        fields.insert("projectile_speed", 0);
        fields.insert("range", 1920);
        fields.insert("fire_rate", 10);
        assert!(validate_ranged(&fields, Mode::Create, false).is_ok());
        fields.insert("range", 1921);
        assert!(validate_ranged(&fields, Mode::Create, false).is_err());
    }
}
