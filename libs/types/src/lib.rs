//! # Bestiary Types Library
//!
//! Shared record types for the Bestiary records service.
//!
//! ## Design Philosophy
//!
//! - **Flat at the edges**: request bodies and responses are flat JSON objects
//!   (`FieldSet`), mirroring the column layout clients already know
//! - **Typed at rest**: stored records are strongly typed; an enemy's optional
//!   behaviours are a sum type, so a half-filled capability group cannot be stored
//! - **One error taxonomy**: every rejection is a `ValidationError` carrying the
//!   exact user-facing message plus a machine-readable code
//!
//! ## Quick Start
//!
//! ```rust
//! use bestiary_types::{CapabilityKind, EnemyRecord, FieldSet};
//! use chrono::Utc;
//! use serde_json::json;
//!
//! let fields = FieldSet::from_value(json!({
//!     "name": "Goblin", "health": 100, "speed": 5, "damage": 10,
//!     "score": 50, "attack_speed": 2, "sprite": "goblin.png"
//! })).unwrap();
//!
//! let now = Utc::now();
//! let goblin = EnemyRecord::assemble(1, &fields, now, now).unwrap();
//! assert!(!goblin.capabilities.is_present(CapabilityKind::Ranged));
//! ```

pub mod common;
pub mod enemy;
pub mod profile;
pub mod user;

pub use common::errors::{ErrorCode, ValidationError};
pub use common::fields::FieldSet;
pub use enemy::{
    BarrierCapability, Capabilities, Capability, CapabilityKind, CloakCapability, CoreStats,
    EnemyRecord, HealerCapability, RangedCapability, SpawnerCapability,
};
pub use profile::{ProfileRecord, UserWithProfile};
pub use user::UserRecord;
