//! User Entity
//!
//! Core user profile entity. The password hash deliberately lives outside
//! this type so a `User` can never leak credentials into a response.

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::domain::value_object::{email::Email, user_name::UserName};

/// User entity
#[derive(Debug, Clone)]
pub struct User {
    /// Internal UUID identifier, also the public API id
    pub user_id: UserId,
    /// Display name (not unique)
    pub user_name: UserName,
    /// Login identifier (unique)
    pub email: Email,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user
    pub fn new(user_name: UserName, email: Email) -> Self {
        let now = Utc::now();

        Self {
            user_id: UserId::new(),
            user_name,
            email,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_gets_fresh_id() {
        let a = User::new(
            UserName::new("alice").unwrap(),
            Email::new("alice@example.com").unwrap(),
        );
        let b = User::new(
            UserName::new("bob").unwrap(),
            Email::new("bob@example.com").unwrap(),
        );
        assert_ne!(a.user_id, b.user_id);
        assert_eq!(a.created_at, a.updated_at);
    }
}
