//! Profile rules

use std::sync::Arc;

use bestiary_types::{FieldSet, ValidationError};

use crate::formats::{is_non_blank, parse_date, validate_image};
use crate::profanity::ProfanityChecker;
use crate::rules::Mode;

const REQUIRED: [&str; 5] = ["user_id", "username", "birthday", "pfp", "about_me"];

/// Validates profile payloads; the content filter is injected
#[derive(Clone)]
pub struct ProfileValidator {
    profanity: Arc<dyn ProfanityChecker>,
}

impl ProfileValidator {
    pub fn new(profanity: Arc<dyn ProfanityChecker>) -> Self {
        Self { profanity }
    }

    /// `user_id` is only read on create; a profile never moves between users
    pub fn validate(&self, fields: &FieldSet, mode: Mode) -> Result<(), ValidationError> {
        let creating = mode == Mode::Create;

        if creating && !fields.all_filled(&REQUIRED) {
            return Err(ValidationError::missing(
                "user_id, username, birthday, pfp and about_me are required",
            ));
        }

        if creating && !fields.get("user_id").and_then(|v| v.as_u64()).is_some_and(|id| id > 0) {
            return Err(ValidationError::wrong_type("user_id must be a valid integer"));
        }

        if (creating || fields.is_present("username"))
            && !fields.text("username").is_some_and(is_non_blank)
        {
            return Err(ValidationError::wrong_type("username must be a valid string"));
        }

        if (creating || fields.is_present("birthday"))
            && fields.text("birthday").and_then(parse_date).is_none()
        {
            return Err(ValidationError::invalid_format("birthday must be a valid date"));
        }

        if (creating || fields.is_present("pfp")) && !fields.text("pfp").is_some_and(validate_image)
        {
            return Err(ValidationError::invalid_format(
                "pfp must be a valid image reference",
            ));
        }

        if creating || fields.is_present("about_me") {
            let about_me = fields.text("about_me").filter(|s| is_non_blank(s));
            match about_me {
                None => {
                    return Err(ValidationError::wrong_type(
                        "about_me must be a valid string",
                    ))
                }
                Some(text) if self.profanity.is_profane(text) => {
                    return Err(ValidationError::inappropriate(
                        "about_me contains inappropriate language",
                    ))
                }
                Some(_) => {}
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for ProfileValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfileValidator").finish_non_exhaustive()
    }
}
