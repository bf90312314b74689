//! End-to-end create/update flows through the enemy validator

use bestiary_types::{CapabilityKind, EnemyRecord, ErrorCode, FieldSet};
use bestiary_validation::enemy::{validate_create, validate_update};
use chrono::Utc;
use serde_json::{json, Value};

fn fields(value: Value) -> FieldSet {
    FieldSet::from_value(value).unwrap()
}

fn goblin() -> Value {
    json!({
        "name": "Goblin", "health": 100, "speed": 5, "damage": 10,
        "score": 50, "attack_speed": 2, "sprite": "goblin.png"
    })
}

fn archer() -> Value {
    json!({
        "name": "Archer", "health": 60, "speed": 4, "damage": 8, "score": 30,
        "attack_speed": 1, "sprite": "archer.png",
        "projectile_sprite": "arrow.png", "projectile_sound": "twang.wav",
        "projectile_speed": 6, "range": 400, "fire_rate": 2
    })
}

fn timer_cloaked() -> Value {
    json!({
        "name": "Shade", "health": 80, "speed": 6, "damage": 12, "score": 70,
        "attack_speed": 3, "sprite": "shade.png",
        "cloak_duration": 5, "cloak_radius": 200, "cloak_cooldown": 15,
        "timer_based": true, "proximity_based": false
    })
}

fn stored(value: Value) -> EnemyRecord {
    let payload = fields(value);
    validate_create(&payload).unwrap();
    let now = Utc::now();
    EnemyRecord::assemble(1, &payload, now, now).unwrap()
}

#[test]
fn test_core_only_enemy_is_accepted() {
    assert!(validate_create(&fields(goblin())).is_ok());
}

#[test]
fn test_switched_off_groups_count_as_absent() {
    let mut payload = goblin();
    payload["timer_based"] = json!(false);
    payload["proximity_based"] = json!(false);
    payload["spawn_rate"] = json!(0);
    assert!(validate_create(&fields(payload.clone())).is_ok());
    assert!(stored(payload).capabilities.kinds().is_empty());
}

#[test]
fn test_full_ranged_enemy_is_accepted() {
    let record = stored(archer());
    assert_eq!(record.capabilities.kinds(), vec![CapabilityKind::Ranged]);
}

#[test]
fn test_missing_fire_rate_reports_ranged_group() {
    let mut payload = archer();
    payload["fire_rate"] = Value::Null;
    let err = validate_create(&fields(payload)).unwrap_err();
    assert_eq!(err.code(), ErrorCode::MissingRequiredField);
    assert_eq!(err.message(), CapabilityKind::Ranged.incomplete_message());
}

#[test]
fn test_core_failure_wins_over_group_failure() {
    let mut payload = archer();
    payload["speed"] = json!(50);
    payload["fire_rate"] = Value::Null;
    let err = validate_create(&fields(payload)).unwrap_err();
    assert_eq!(err.message(), "speed must be between 0 and 10");
}

#[test]
fn test_groups_run_in_canonical_order() {
    let mut payload = goblin();
    payload["heal_amount"] = json!(5);
    payload["spawn_rate"] = json!(50);
    let err = validate_create(&fields(payload)).unwrap_err();
    assert_eq!(err.message(), CapabilityKind::Healer.incomplete_message());
}

#[test]
fn test_switching_off_the_only_trigger_is_refused() {
    let record = stored(timer_cloaked());
    let err = validate_update(&fields(json!({"timer_based": false})), &record).unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidCloakTransition);
}

#[test]
fn test_swapping_triggers_is_allowed() {
    let record = stored(timer_cloaked());
    let patch = fields(json!({"timer_based": false, "proximity_based": true}));
    let allowance = validate_update(&patch, &record).unwrap();
    assert!(allowance.allows(CapabilityKind::Cloak));

    let updated = record.merged_with(&patch, Utc::now()).unwrap();
    let cloak = updated.capabilities.cloak.unwrap();
    assert!(!cloak.timer_based);
    assert!(cloak.proximity_based);
}

#[test]
fn test_partial_edit_of_stored_group() {
    let record = stored(archer());
    assert!(validate_update(&fields(json!({"range": 800})), &record).is_ok());

    let err = validate_update(&fields(json!({"range": 2000})), &record).unwrap_err();
    assert_eq!(err.code(), ErrorCode::OutOfRange);
}

#[test]
fn test_new_group_on_update_must_be_whole() {
    let record = stored(goblin());
    let err = validate_update(&fields(json!({"range": 800})), &record).unwrap_err();
    assert_eq!(err.message(), CapabilityKind::Ranged.incomplete_message());

    let patch = fields(json!({"heal_amount": 10, "heal_rate": 200, "heal_range": 300}));
    assert!(validate_update(&patch, &record).is_ok());
    let updated = record.merged_with(&patch, Utc::now()).unwrap();
    assert!(updated.capabilities.is_present(CapabilityKind::Healer));
}

#[test]
fn test_empty_patch_is_a_no_op() {
    let record = stored(archer());
    assert!(validate_update(&FieldSet::new(), &record).is_ok());
    let updated = record.merged_with(&FieldSet::new(), record.updated_at).unwrap();
    assert_eq!(updated, record);
}
