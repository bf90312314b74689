//! User accounts

use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserRecord {
    pub id: u64,
    pub email: String,
    /// Salted digest; never leaves the service
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub is_admin: bool,
    pub blacklisted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_is_not_serialized() {
        let now = Utc::now();
        let user = UserRecord {
            id: 1,
            email: "ada@example.com".to_string(),
            password_hash: "$2b$04$abcdefghijklmnopqrstuu".to_string(),
            is_admin: false,
            blacklisted: false,
            created_at: now,
            updated_at: now,
        };
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["email"], "ada@example.com");
    }
}
