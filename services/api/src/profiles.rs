//! Profile operations

use bestiary_types::{FieldSet, ProfileRecord, ValidationError};
use bestiary_validation::formats::{is_non_blank, parse_date};
use bestiary_validation::{Mode, Pagination};
use chrono::{NaiveDate, Utc};
use tracing::info;

use crate::error::{ApiError, Result};
use crate::state::AppState;

pub fn list_profiles(state: &AppState, page: Pagination) -> Vec<ProfileRecord> {
    page.apply(state.db.profiles.all())
}

pub fn get_profile(state: &AppState, id: u64) -> Result<ProfileRecord> {
    Ok(state.db.profiles.get(id)?)
}

pub fn get_profile_by_username(state: &AppState, username: &str) -> Result<ProfileRecord> {
    if !is_non_blank(username) {
        return Err(ValidationError::invalid_format("Invalid username").into());
    }
    state
        .db
        .profiles
        .find(|p| p.username == username)
        .ok_or_else(|| ValidationError::not_found("Profile not found").into())
}

/// One profile per user, and the user must exist
pub fn create_profile(state: &AppState, fields: FieldSet) -> Result<ProfileRecord> {
    state.profiles.validate(&fields, Mode::Create)?;

    let user_id = fields
        .get("user_id")
        .and_then(|v| v.as_u64())
        .ok_or_else(|| ValidationError::wrong_type("user_id must be a valid integer"))?;
    if state.db.users.get(user_id).is_err() {
        return Err(
            ValidationError::not_found("user_id does not reference an existing user").into(),
        );
    }

    let now = Utc::now();
    let profile = state.db.profiles.insert_checked(
        |other| {
            if other.user_id == user_id {
                Err(ValidationError::conflict("This user already has a profile linked"))
            } else {
                Ok(())
            }
        },
        |id| {
            Ok(ProfileRecord {
                id,
                user_id,
                username: text(&fields, "username")?,
                birthday: birthday(&fields)?,
                pfp: text(&fields, "pfp")?,
                about_me: text(&fields, "about_me")?,
                created_at: now,
                updated_at: now,
            })
        },
    )?;
    info!(id = profile.id, user_id, "profile created");
    Ok(profile)
}

/// COALESCE update; `user_id` is never changed
pub fn update_profile(state: &AppState, id: u64, patch: FieldSet) -> Result<ProfileRecord> {
    state.profiles.validate(&patch, Mode::Update)?;

    let profile = state.db.profiles.update(
        id,
        |_, _| Ok(()),
        |current| {
            let mut next = current.clone();
            if patch.is_present("username") {
                next.username = text(&patch, "username")?;
            }
            if patch.is_present("birthday") {
                next.birthday = birthday(&patch)?;
            }
            if patch.is_present("pfp") {
                next.pfp = text(&patch, "pfp")?;
            }
            if patch.is_present("about_me") {
                next.about_me = text(&patch, "about_me")?;
            }
            next.updated_at = Utc::now();
            Ok::<_, ApiError>(next)
        },
    )?;
    info!(id, "profile updated");
    Ok(profile)
}

pub fn delete_profile(state: &AppState, id: u64) -> Result<ProfileRecord> {
    let profile = state.db.profiles.remove(id)?;
    info!(id, "profile deleted");
    Ok(profile)
}

fn text(fields: &FieldSet, name: &str) -> std::result::Result<String, ValidationError> {
    fields
        .text(name)
        .map(str::to_string)
        .ok_or_else(|| ValidationError::wrong_type(format!("{} must be a valid string", name)))
}

fn birthday(fields: &FieldSet) -> std::result::Result<NaiveDate, ValidationError> {
    fields
        .text("birthday")
        .and_then(parse_date)
        .ok_or_else(|| ValidationError::invalid_format("birthday must be a valid date"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::users::{create_user, delete_user, user_with_profile};
    use bestiary_config::ServiceConfig;
    use bestiary_types::ErrorCode;
    use serde_json::json;

    fn fields(value: serde_json::Value) -> FieldSet {
        FieldSet::from_value(value).unwrap()
    }

    fn setup() -> (AppState, u64) {
        let mut config = ServiceConfig::default();
        config.security.bcrypt_cost = 4;
        let state = AppState::from_config(&config);
        let user = create_user(
            &state,
            fields(json!({"email": "ada@example.com", "password": "Secret1!"})),
        )
        .unwrap();
        (state, user.id)
    }

    fn payload(user_id: u64) -> FieldSet {
        fields(json!({
            "user_id": user_id,
            "username": "ada",
            "birthday": "1990-04-12",
            "pfp": "ada.png",
            "about_me": "Hunts goblins on weekends"
        }))
    }

    fn code(err: ApiError) -> ErrorCode {
        match err {
            ApiError::Validation(err) => err.code(),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_one_profile_per_user() {
        let (state, user_id) = setup();
        let profile = create_profile(&state, payload(user_id)).unwrap();
        assert_eq!(profile.birthday, NaiveDate::from_ymd_opt(1990, 4, 12).unwrap());

        let err = create_profile(&state, payload(user_id)).unwrap_err();
        assert_eq!(err.to_string(), "This user already has a profile linked");
        assert_eq!(code(err), ErrorCode::Conflict);
    }

    #[test]
    fn test_unknown_user() {
        let (state, user_id) = setup();
        let err = create_profile(&state, payload(user_id + 1)).unwrap_err();
        assert_eq!(err.to_string(), "user_id does not reference an existing user");
        assert_eq!(code(err), ErrorCode::NotFound);
    }

    #[test]
    fn test_update_and_lookup_by_username() {
        let (state, user_id) = setup();
        let profile = create_profile(&state, payload(user_id)).unwrap();
        let updated = update_profile(
            &state,
            profile.id,
            fields(json!({"username": "countess", "pfp": null})),
        )
        .unwrap();
        assert_eq!(updated.pfp, "ada.png");
        assert_eq!(updated.user_id, user_id);

        assert_eq!(get_profile_by_username(&state, "countess").unwrap().id, profile.id);
        assert_eq!(
            code(get_profile_by_username(&state, "ada").unwrap_err()),
            ErrorCode::NotFound
        );
        assert_eq!(
            code(get_profile_by_username(&state, " ").unwrap_err()),
            ErrorCode::InvalidFormat
        );
    }

    #[test]
    fn test_aggregate_and_cascade() {
        let (state, user_id) = setup();
        create_profile(&state, payload(user_id)).unwrap();
        let joined = user_with_profile(&state, user_id).unwrap();
        assert_eq!(joined.profile.unwrap().username, "ada");

        delete_user(&state, user_id).unwrap();
        assert!(list_profiles(&state, Pagination::default()).is_empty());
    }
}
