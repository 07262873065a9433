use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::timestamp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Resource,
    Discussion,
    Comment,
    Like,
    Quiz,
    Flashcard,
}

/// An in-app notification addressed to the signed-in user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Notification {
    pub id: String,
    pub user_id: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub read: bool,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

/// Platform-wide counters shown on the landing page.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Statistics {
    pub total_users: u64,
    pub total_resources: u64,
    pub total_discussions: u64,
    pub total_quizzes: u64,
    pub total_flashcards: u64,
    pub total_subjects: u64,
}
