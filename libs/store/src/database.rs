use bestiary_types::{EnemyRecord, ProfileRecord, UserRecord, UserWithProfile};

use crate::error::StoreError;
use crate::table::Table;

/// All tables of the service
#[derive(Debug)]
pub struct Database {
    pub users: Table<UserRecord>,
    pub profiles: Table<ProfileRecord>,
    pub enemies: Table<EnemyRecord>,
}

impl Database {
    pub fn new() -> Self {
        Self {
            users: Table::new("User"),
            profiles: Table::new("Profile"),
            enemies: Table::new("Enemy"),
        }
    }

    pub fn profile_of(&self, user_id: u64) -> Option<ProfileRecord> {
        self.profiles.find(|p| p.user_id == user_id)
    }

    /// User joined with its profile, if it has one
    pub fn user_with_profile(&self, user_id: u64) -> Result<UserWithProfile, StoreError> {
        let user = self.users.get(user_id)?;
        Ok(UserWithProfile {
            profile: self.profile_of(user.id),
            user,
        })
    }

    /// Remove a user and the profile linked to it
    pub fn remove_user(&self, user_id: u64) -> Result<UserRecord, StoreError> {
        let user = self.users.remove(user_id)?;
        self.profiles.remove_where(|p| p.user_id == user_id);
        Ok(user)
    }
}

impl Default for Database {
    fn default() -> Self {
        Self::new()
    }
}
