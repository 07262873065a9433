//! Records exchanged with the backend.

mod content;
mod notification;
pub(crate) mod timestamp;
mod user;

pub use content::{
    Comment, Discussion, DiscussionUpdate, Flashcard, FlashcardItem, FlashcardUpdate, GroupType,
    LikeOutcome, NewComment, NewDiscussion, NewFlashcard, NewQuiz, NewResource, NewSubject, Quiz,
    QuizQuestion, QuizUpdate, Resource, ResourceType, ResourceUpdate, Subject,
};
pub use notification::{Notification, NotificationKind, Statistics};
pub(crate) use user::{LoginRequest, TokenResponse};
pub use user::{ProfileUpdate, User, UserProfile, UserRole};
