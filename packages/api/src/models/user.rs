//! # User models
//!
//! ## [`User`]
//!
//! The signed-in identity as returned by `GET /auth/me` and `PUT /users/{id}`.
//! It is the session snapshot: the session holds exactly the server's copy and
//! replaces it wholesale after a profile update.
//!
//! ## [`UserProfile`]
//!
//! The public view of any user (`GET /users/{id}`): no role, plus
//! contribution counters.
//!
//! ## [`ProfileUpdate`]
//!
//! A partial update. Unset fields are not serialised, and
//! [`ProfileUpdate::changes_from`] strips fields that already match the current
//! snapshot so only real changes go over the wire.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::timestamp;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    Student,
    Admin,
}

/// The authenticated user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub faculty: Option<String>,
    #[serde(default)]
    pub year_of_study: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    /// Public URL of the avatar on the media host.
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub role: UserRole,
    #[serde(default)]
    pub reputation: i64,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// First letter of the name, for avatar placeholders.
    pub fn initial(&self) -> char {
        self.name
            .chars()
            .next()
            .or_else(|| self.email.chars().next())
            .map(|c| c.to_ascii_uppercase())
            .unwrap_or('?')
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

/// Public profile of any user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub faculty: Option<String>,
    #[serde(default)]
    pub year_of_study: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub reputation: i64,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub resources_count: u64,
    #[serde(default)]
    pub discussions_count: u64,
    #[serde(default)]
    pub comments_count: u64,
}

/// Partial profile update for `PUT /users/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub faculty: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year_of_study: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Drop every field whose value equals the one already in `current`.
    pub fn changes_from(self, current: &User) -> Self {
        fn keep(new: Option<String>, old: Option<&str>) -> Option<String> {
            new.filter(|value| Some(value.as_str()) != old)
        }

        Self {
            name: keep(self.name, Some(&current.name)),
            bio: keep(self.bio, current.bio.as_deref()),
            department: keep(self.department, current.department.as_deref()),
            faculty: keep(self.faculty, current.faculty.as_deref()),
            year_of_study: keep(self.year_of_study, current.year_of_study.as_deref()),
            avatar: keep(self.avatar, current.avatar.as_deref()),
        }
    }
}

/// Body of `POST /auth/login` and `POST /auth/register` responses.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_user;
    use serde_json::json;

    #[test]
    fn test_user_defaults() {
        let user = sample_user();
        assert_eq!(user.role, UserRole::Student);
        assert_eq!(user.reputation, 12);
        assert!(user.avatar.is_none());
        assert_eq!(user.initial(), 'A');
        assert!(!user.is_admin());
    }

    #[test]
    fn test_changes_from_keeps_only_differences() {
        let user = sample_user();
        let update = ProfileUpdate {
            name: Some("Amina".into()),
            department: Some("Mathématiques".into()),
            faculty: Some("Sciences".into()),
            ..ProfileUpdate::default()
        };

        let changes = update.changes_from(&user);
        assert!(changes.name.is_none());
        assert_eq!(changes.department.as_deref(), Some("Mathématiques"));
        assert_eq!(changes.faculty.as_deref(), Some("Sciences"));

        let body = serde_json::to_value(&changes).unwrap();
        assert_eq!(
            body,
            json!({"department": "Mathématiques", "faculty": "Sciences"})
        );
    }

    #[test]
    fn test_no_op_update_is_empty() {
        let user = sample_user();
        let update = ProfileUpdate {
            name: Some("Amina".into()),
            department: Some("Informatique".into()),
            ..ProfileUpdate::default()
        };
        assert!(update.changes_from(&user).is_empty());
    }
}
