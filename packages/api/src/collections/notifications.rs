use super::{Acknowledgement, Collection};
use crate::error::ApiError;
use crate::filters::Filters;
use crate::models::Notification;

impl Collection<'_, Notification> {
    /// The signed-in user's notifications, newest first.
    pub async fn mine(&self) -> Result<Vec<Notification>, ApiError> {
        self.client.require_session()?;
        self.list(&Filters::new()).await
    }

    pub async fn mark_as_read(&self, id: &str) -> Result<Acknowledgement, ApiError> {
        self.client.require_session()?;
        self.client.put_empty(&self.action(id, "read")).await
    }
}

pub fn unread_count(notifications: &[Notification]) -> usize {
    notifications.iter().filter(|n| !n.read).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{anonymous_client, signed_in_client};
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn notification_json(id: &str, read: bool) -> serde_json::Value {
        json!({
            "id": id,
            "user_id": "u-1",
            "type": "comment",
            "title": "New reply",
            "message": "Karim replied to your discussion",
            "link": "/discussions/d-1",
            "read": read,
            "created_at": "2025-02-02T10:00:00Z"
        })
    }

    #[tokio::test]
    async fn test_mine_and_unread_count() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/notifications"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                notification_json("n-1", false),
                notification_json("n-2", true),
                notification_json("n-3", false),
            ])))
            .mount(&server)
            .await;

        let client = signed_in_client(&server, "t-1");
        let notifications = client.notifications().mine().await.unwrap();
        assert_eq!(notifications.len(), 3);
        assert_eq!(unread_count(&notifications), 2);
    }

    #[tokio::test]
    async fn test_mine_needs_a_session() {
        let server = MockServer::start().await;
        let client = anonymous_client(&server);
        let err = client.notifications().mine().await.unwrap_err();
        assert_eq!(err, ApiError::NotSignedIn);
    }

    #[tokio::test]
    async fn test_mark_as_read() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/notifications/n-1/read"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "Marked as read"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = signed_in_client(&server, "t-1");
        client.notifications().mark_as_read("n-1").await.unwrap();
    }
}
