//! # Bestiary Validation
//!
//! Pure, deterministic validation for everything the service writes.
//!
//! ## Enemy records
//!
//! An enemy payload is checked by six rule groups, in a fixed order:
//!
//! ```text
//! Core -> Ranged -> Healer -> Barrier -> Cloak -> Spawner
//! ```
//!
//! The first failing check wins; there is no error aggregation. On create every
//! group is all-or-nothing. On update, the stored record decides per group whether
//! individual fields may be edited (`detect_allowed_partial_updates`), and the cloak
//! trigger transition is checked before any field-level rule runs.
//!
//! ```rust
//! use bestiary_types::FieldSet;
//! use bestiary_validation::enemy::validate_create;
//! use serde_json::json;
//!
//! let payload = FieldSet::from_value(json!({
//!     "name": "Archer", "health": 60, "speed": 4, "damage": 8, "score": 30,
//!     "attack_speed": 1, "sprite": "archer.png",
//!     "projectile_sprite": "arrow.png", "projectile_sound": "twang.wav",
//!     "projectile_speed": 6, "range": 400
//! })).unwrap();
//!
//! // fire_rate is missing, so the ranged group is incomplete
//! let err = validate_create(&payload).unwrap_err();
//! assert!(err.message().contains("must all be provided"));
//! ```
//!
//! ## Users and profiles
//!
//! `user::validate_user` and `profile::ProfileValidator` follow the same
//! create/update split. Profile text goes through an injected `ProfanityChecker`.

pub mod enemy;
pub mod formats;
pub mod profanity;
pub mod profile;
pub mod rules;
pub mod user;

pub use enemy::{
    check_cloak_transition, detect_allowed_partial_updates, validate_barrier, validate_cloak,
    validate_cloak_transition, validate_core, validate_create, validate_healer, validate_ranged,
    validate_spawner, validate_update, PartialUpdateAllowance,
};
pub use formats::{validate_limit_offset, Pagination};
pub use profanity::{ProfanityChecker, WordListFilter};
pub use profile::ProfileValidator;
pub use rules::{Interval, Mode};
pub use user::validate_user;
