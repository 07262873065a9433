use super::Collection;
use crate::error::ApiError;
use crate::filters::Filters;
use crate::models::{Comment, Discussion, GroupType, NewComment, User};

impl Collection<'_, Discussion> {
    /// Reply to a discussion. Blank replies are rejected locally.
    pub async fn add_comment(&self, id: &str, content: &str) -> Result<Comment, ApiError> {
        let content = content.trim();
        if content.is_empty() {
            return Err(ApiError::Validation("A comment cannot be empty".into()));
        }
        self.client.require_session()?;
        let body = NewComment {
            content: content.to_string(),
        };
        self.client.post(&self.action(id, "comments"), &body).await
    }
}

/// Filters for the community feed.
///
/// Outside the global group the feed is scoped to the viewer's own cohort:
/// `group_type` is sent along with whichever of department, faculty and year
/// the user has on their profile. `subject_id` narrows to one subject.
pub fn community_filters(group: GroupType, user: Option<&User>, subject_id: Option<&str>) -> Filters {
    let mut filters = Filters::new();
    if group != GroupType::Global {
        filters.insert("group_type", group.as_str());
        if let Some(user) = user {
            filters = filters
                .with_opt("department", user.department.as_deref())
                .with_opt("faculty", user.faculty.as_deref())
                .with_opt("year", user.year_of_study.as_deref());
        }
    }
    filters.with_opt("subject_id", subject_id.filter(|s| !s.is_empty()))
}
