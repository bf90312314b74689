//! User account operations

use bestiary_types::{FieldSet, UserRecord, UserWithProfile, ValidationError};
use bestiary_validation::{validate_user, Mode, Pagination};
use chrono::Utc;
use tracing::info;

use crate::error::Result;
use crate::state::AppState;

/// Page through users; the configured default limit applies when none is given
pub fn list_users(state: &AppState, page: Pagination) -> Vec<UserRecord> {
    page.with_default_limit(state.default_user_limit)
        .apply(state.db.users.all())
}

pub fn get_user(state: &AppState, id: u64) -> Result<UserRecord> {
    Ok(state.db.users.get(id)?)
}

pub fn create_user(state: &AppState, mut fields: FieldSet) -> Result<UserRecord> {
    fields.set_default("is_admin", false);
    fields.set_default("blacklisted", false);
    validate_user(&fields, Mode::Create)?;

    let (email, password) = match (fields.text("email"), fields.text("password")) {
        (Some(email), Some(password)) => (email.to_string(), password),
        _ => return Err(ValidationError::missing("Email and password are required").into()),
    };
    let password_hash = state.hasher.hash(password)?;
    let is_admin = fields.boolean("is_admin").unwrap_or(false);
    let blacklisted = fields.boolean("blacklisted").unwrap_or(false);

    let now = Utc::now();
    let user = state.db.users.insert(|id| {
        Ok::<_, ValidationError>(UserRecord {
            id,
            email,
            password_hash,
            is_admin,
            blacklisted,
            created_at: now,
            updated_at: now,
        })
    })?;
    info!(id = user.id, "user created");
    Ok(user)
}

/// COALESCE update: supplied fields replace stored ones, the rest stay
pub fn update_user(state: &AppState, id: u64, patch: FieldSet) -> Result<UserRecord> {
    validate_user(&patch, Mode::Update)?;
    let password_hash = patch
        .text("password")
        .map(|p| state.hasher.hash(p))
        .transpose()?;

    let user = state.db.users.update(
        id,
        |_, _| Ok(()),
        |current| {
            let mut next = current.clone();
            if let Some(email) = patch.text("email") {
                next.email = email.to_string();
            }
            if let Some(hash) = &password_hash {
                next.password_hash = hash.clone();
            }
            if let Some(flag) = patch.boolean("is_admin") {
                next.is_admin = flag;
            }
            if let Some(flag) = patch.boolean("blacklisted") {
                next.blacklisted = flag;
            }
            next.updated_at = Utc::now();
            Ok::<_, crate::ApiError>(next)
        },
    )?;
    info!(id, "user updated");
    Ok(user)
}

/// Removes the user together with its profile
pub fn delete_user(state: &AppState, id: u64) -> Result<UserRecord> {
    let user = state.db.remove_user(id)?;
    info!(id, "user deleted");
    Ok(user)
}

pub fn list_admins(state: &AppState) -> Vec<UserRecord> {
    state.db.users.filter(|u| u.is_admin)
}

pub fn list_blacklisted(state: &AppState) -> Vec<UserRecord> {
    state.db.users.filter(|u| u.blacklisted)
}

pub fn user_with_profile(state: &AppState, id: u64) -> Result<UserWithProfile> {
    Ok(state.db.user_with_profile(id)?)
}
