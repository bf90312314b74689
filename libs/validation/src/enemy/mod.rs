//! Enemy record rules
//!
//! Six independent rule groups plus the two update-only gates:
//!
//! - `core_group`: name, stats and sprite
//! - `ranged`, `healer`, `barrier`, `spawner`: all-or-nothing numeric groups
//! - `cloak`: all-or-nothing, plus the trigger activation rule
//! - `detector`: which groups the stored record lets an update edit field by field
//! - `transition`: refuses updates that switch off the only cloak trigger

mod barrier;
mod cloak;
mod core_group;
mod detector;
mod healer;
mod ranged;
mod spawner;
mod transition;
mod validator;

pub use self::barrier::validate_barrier;
pub use self::cloak::validate_cloak;
pub use self::core_group::validate_core;
pub use self::detector::{detect_allowed_partial_updates, PartialUpdateAllowance};
pub use self::healer::validate_healer;
pub use self::ranged::validate_ranged;
pub use self::spawner::validate_spawner;
pub use self::transition::{check_cloak_transition, validate_cloak_transition};
pub use self::validator::{validate_create, validate_update};
