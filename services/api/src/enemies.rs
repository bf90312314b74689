//! Enemy catalogue operations
//!
//! Creates run the full rules engine, then the name-uniqueness check and the
//! insert under one table lock. Updates run the detector, the cloak transition
//! check and the rule groups against the row as it is at write time, then merge.

use bestiary_types::{EnemyRecord, FieldSet, ValidationError};
use bestiary_validation::enemy::{validate_create, validate_update};
use chrono::Utc;
use tracing::{debug, info};

use crate::error::{ApiError, Result};
use crate::state::AppState;

const DUPLICATE_NAME: &str = "An enemy with this name already exists";

pub fn list_enemies(state: &AppState) -> Vec<EnemyRecord> {
    state.db.enemies.all()
}

pub fn get_enemy(state: &AppState, id: u64) -> Result<EnemyRecord> {
    Ok(state.db.enemies.get(id)?)
}

pub fn create_enemy(state: &AppState, fields: FieldSet) -> Result<EnemyRecord> {
    validate_create(&fields)?;
    let name = fields.text("name").unwrap_or_default().to_string();

    let now = Utc::now();
    let enemy = state.db.enemies.insert_checked(
        |other| distinct_name(other, &name),
        |id| EnemyRecord::assemble(id, &fields, now, now),
    )?;
    info!(id = enemy.id, name = %enemy.core.name, "enemy created");
    Ok(enemy)
}

pub fn update_enemy(state: &AppState, id: u64, patch: FieldSet) -> Result<EnemyRecord> {
    let enemy = state.db.enemies.update(
        id,
        |other, candidate| distinct_name(other, &candidate.core.name).map_err(ApiError::from),
        |current| {
            let allowance = validate_update(&patch, current)?;
            debug!(id, flags = ?allowance.flags(), "enemy update accepted");
            Ok::<_, ApiError>(current.merged_with(&patch, Utc::now())?)
        },
    )?;
    info!(id, "enemy updated");
    Ok(enemy)
}

pub fn delete_enemy(state: &AppState, id: u64) -> Result<EnemyRecord> {
    let enemy = state.db.enemies.remove(id)?;
    info!(id, "enemy deleted");
    Ok(enemy)
}

/// Names compare case-insensitively, ignoring surrounding whitespace
fn distinct_name(other: &EnemyRecord, name: &str) -> std::result::Result<(), ValidationError> {
    if other.core.name.trim().to_lowercase() == name.trim().to_lowercase() {
        Err(ValidationError::duplicate_name(DUPLICATE_NAME))
    } else {
        Ok(())
    }
}
