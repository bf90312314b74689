//! User profiles and the joined user + profile view

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::user::UserRecord;

/// Public profile; at most one per user
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileRecord {
    pub id: u64,
    pub user_id: u64,
    pub username: String,
    pub birthday: NaiveDate,
    pub pfp: String,
    pub about_me: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserWithProfile {
    pub user: UserRecord,
    pub profile: Option<ProfileRecord>,
}
