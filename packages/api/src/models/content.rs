//! Shared-content records: subjects, resources, discussions, quizzes and
//! flashcards, with the payloads used to create and update them.
//!
//! Engagement counters (`views`, `likes`, `attempts`) default to zero when the
//! server omits them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::timestamp;

fn default_color() -> String {
    "#3B82F6".to_string()
}

/// A subject (course) that resources, quizzes and flashcards are filed under.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Subject {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default)]
    pub is_custom: bool,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewSubject {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub color: String,
    pub is_custom: bool,
}

impl NewSubject {
    /// A user-defined subject with the default colour.
    pub fn custom(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            icon: None,
            color: default_color(),
            is_custom: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Pdf,
    Video,
    Image,
    Document,
    #[default]
    Other,
}

impl ResourceType {
    /// Guess the type from a file name's extension.
    pub fn from_file_name(name: &str) -> Self {
        let ext = name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "pdf" => ResourceType::Pdf,
            "mp4" | "webm" | "mov" | "avi" | "mkv" => ResourceType::Video,
            "png" | "jpg" | "jpeg" | "gif" | "webp" | "svg" => ResourceType::Image,
            "doc" | "docx" | "odt" | "ppt" | "pptx" | "xls" | "xlsx" | "txt" | "md" => {
                ResourceType::Document
            }
            _ => ResourceType::Other,
        }
    }

    /// Images go to the host's image pipeline, everything else is stored raw.
    pub fn is_image(self) -> bool {
        self == ResourceType::Image
    }
}

/// A shared file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Resource {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub subject_id: String,
    pub author_id: String,
    pub author_name: String,
    #[serde(default)]
    pub author_avatar: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: ResourceType,
    pub file_url: String,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub likes: i64,
    #[serde(default)]
    pub views: i64,
    #[serde(default)]
    pub liked_by: Vec<String>,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl Resource {
    pub fn is_liked_by(&self, user_id: &str) -> bool {
        self.liked_by.iter().any(|id| id == user_id)
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewResource {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub subject_id: String,
    #[serde(rename = "type")]
    pub kind: ResourceType,
    pub file_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct ResourceUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject_id: Option<String>,
}

/// Answer to `POST /resources/{id}/like`, which toggles the like.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
pub struct LikeOutcome {
    pub liked: bool,
    pub likes: i64,
}

/// Audience a discussion is posted to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupType {
    #[default]
    Global,
    Faculty,
    Department,
    Year,
}

impl GroupType {
    pub fn as_str(self) -> &'static str {
        match self {
            GroupType::Global => "global",
            GroupType::Faculty => "faculty",
            GroupType::Department => "department",
            GroupType::Year => "year",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Comment {
    pub id: String,
    pub author_id: String,
    pub author_name: String,
    #[serde(default)]
    pub author_avatar: Option<String>,
    pub content: String,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Discussion {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub subject_id: Option<String>,
    #[serde(default)]
    pub subject_name: Option<String>,
    pub author_id: String,
    pub author_name: String,
    #[serde(default)]
    pub author_avatar: Option<String>,
    #[serde(default)]
    pub author_department: Option<String>,
    #[serde(default)]
    pub author_faculty: Option<String>,
    #[serde(default)]
    pub author_year: Option<String>,
    #[serde(default)]
    pub group_type: GroupType,
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub views: i64,
    #[serde(default)]
    pub solved: bool,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl Discussion {
    /// Number of replies, the discussion's engagement counter.
    pub fn replies(&self) -> usize {
        self.comments.len()
    }

    /// Case-insensitive match on title or body.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        term.is_empty()
            || self.title.to_lowercase().contains(&term)
            || self.content.to_lowercase().contains(&term)
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewDiscussion {
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject_id: Option<String>,
    pub group_type: GroupType,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct DiscussionUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solved: Option<bool>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewComment {
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    /// Index into `options`.
    pub correct_answer: usize,
    #[serde(default)]
    pub explanation: Option<String>,
}

impl QuizQuestion {
    pub fn is_correct(&self, answer: usize) -> bool {
        answer == self.correct_answer
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Quiz {
    pub id: String,
    pub title: String,
    pub subject_id: String,
    #[serde(default)]
    pub subject_name: Option<String>,
    pub author_id: String,
    pub author_name: String,
    pub questions: Vec<QuizQuestion>,
    /// Minutes allowed.
    pub duration: u32,
    pub difficulty: String,
    #[serde(default)]
    pub attempts: i64,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl Quiz {
    /// Number of correct answers. `answers[i]` is the chosen option for
    /// question `i`; unanswered questions are `None`.
    pub fn score(&self, answers: &[Option<usize>]) -> usize {
        self.questions
            .iter()
            .zip(answers)
            .filter(|(question, answer)| answer.is_some_and(|a| question.is_correct(a)))
            .count()
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewQuiz {
    pub title: String,
    pub subject_id: String,
    pub questions: Vec<QuizQuestion>,
    pub duration: u32,
    pub difficulty: String,
}

impl NewQuiz {
    /// A quiz with the default 30 minute duration and medium difficulty.
    pub fn new(title: impl Into<String>, subject_id: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subject_id: subject_id.into(),
            questions: Vec::new(),
            duration: 30,
            difficulty: "Moyen".to_string(),
        }
    }

    pub fn question(mut self, question: QuizQuestion) -> Self {
        self.questions.push(question);
        self
    }
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct QuizUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FlashcardItem {
    pub front: String,
    pub back: String,
}

/// A deck of flashcards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Flashcard {
    pub id: String,
    pub title: String,
    pub subject_id: String,
    #[serde(default)]
    pub subject_name: Option<String>,
    pub author_id: String,
    pub author_name: String,
    pub cards: Vec<FlashcardItem>,
    #[serde(default)]
    pub views: i64,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewFlashcard {
    pub title: String,
    pub subject_id: String,
    pub cards: Vec<FlashcardItem>,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct FlashcardUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cards: Option<Vec<FlashcardItem>>,
}
