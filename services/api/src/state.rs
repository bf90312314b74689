//! Shared request state

use std::sync::Arc;

use bestiary_config::ServiceConfig;
use bestiary_store::Database;
use bestiary_validation::{ProfanityChecker, ProfileValidator, WordListFilter};

use crate::password::{BcryptHasher, PasswordHasher};

/// Everything a request handler needs; cheap to clone
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub profiles: ProfileValidator,
    pub hasher: Arc<dyn PasswordHasher>,
    pub default_user_limit: usize,
}

impl AppState {
    pub fn new(
        db: Arc<Database>,
        profanity: Arc<dyn ProfanityChecker>,
        hasher: Arc<dyn PasswordHasher>,
        default_user_limit: usize,
    ) -> Self {
        Self {
            db,
            profiles: ProfileValidator::new(profanity),
            hasher,
            default_user_limit,
        }
    }

    /// Fresh empty database wired up from configuration
    pub fn from_config(config: &ServiceConfig) -> Self {
        let words = &config.moderation.blocked_words;
        let filter = if words.is_empty() {
            WordListFilter::default()
        } else {
            WordListFilter::new(words)
        };

        Self::new(
            Arc::new(Database::new()),
            Arc::new(filter),
            Arc::new(BcryptHasher::new(config.security.bcrypt_cost)),
            config.pagination.default_user_limit,
        )
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("db", &self.db)
            .field("default_user_limit", &self.default_user_limit)
            .finish_non_exhaustive()
    }
}
