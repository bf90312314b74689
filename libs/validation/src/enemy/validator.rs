use bestiary_types::{CapabilityKind, EnemyRecord, FieldSet, ValidationError};
use tracing::debug;

use super::{
    check_cloak_transition, detect_allowed_partial_updates, validate_barrier, validate_cloak,
    validate_core, validate_healer, validate_ranged, validate_spawner, PartialUpdateAllowance,
};
use crate::rules::Mode;

/// Full creation payload: core, then every capability group, all-or-nothing
pub fn validate_create(fields: &FieldSet) -> Result<(), ValidationError> {
    run_groups(fields, Mode::Create, PartialUpdateAllowance::default()).map_err(|err| {
        debug!(code = %err.code(), "enemy create rejected: {}", err);
        err
    })
}

/// Partial update payload against the stored record
///
/// Returns the allowance that was applied so callers can log or inspect it.
pub fn validate_update(
    patch: &FieldSet,
    existing: &EnemyRecord,
) -> Result<PartialUpdateAllowance, ValidationError> {
    let allowance = detect_allowed_partial_updates(existing);

    check_cloak_transition(existing, patch)
        .and_then(|_| run_groups(patch, Mode::Update, allowance))
        .map(|_| allowance)
        .map_err(|err| {
            debug!(
                id = existing.id,
                code = %err.code(),
                "enemy update rejected: {}",
                err
            );
            err
        })
}

fn run_groups(
    fields: &FieldSet,
    mode: Mode,
    allowance: PartialUpdateAllowance,
) -> Result<(), ValidationError> {
    validate_core(fields, mode)?;
    validate_ranged(fields, mode, allowance.allows(CapabilityKind::Ranged))?;
    validate_healer(fields, mode, allowance.allows(CapabilityKind::Healer))?;
    validate_barrier(fields, mode, allowance.allows(CapabilityKind::Barrier))?;
    validate_cloak(fields, mode, allowance.allows(CapabilityKind::Cloak))?;
    validate_spawner(fields, mode, allowance.allows(CapabilityKind::Spawner))
}
