use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{ProfileUpdate, User, UserProfile};

/// Handle on `/users`. Unlike the content collections, reads return the
/// public [`UserProfile`] while updates answer with the full [`User`].
///
/// To edit the signed-in user's own profile go through
/// `SessionManager::update_profile`, which also refreshes the session.
pub struct Users<'a> {
    client: &'a ApiClient,
}

impl<'a> Users<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    fn member(id: &str) -> String {
        format!("/users/{}", urlencoding::encode(id))
    }

    pub async fn get(&self, id: &str) -> Result<UserProfile, ApiError> {
        self.client.get(&Self::member(id)).await
    }

    pub async fn update(&self, id: &str, changes: &ProfileUpdate) -> Result<User, ApiError> {
        self.client.require_session()?;
        self.client.put(&Self::member(id), changes).await
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::anonymous_client;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_public_profile() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/users/u-2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "u-2",
                "name": "Karim",
                "email": "karim@campus.example",
                "reputation": 40,
                "created_at": "2024-10-01T08:00:00",
                "resources_count": 5,
                "discussions_count": 2,
                "comments_count": 17
            })))
            .mount(&server)
            .await;

        let client = anonymous_client(&server);
        let profile = client.users().get("u-2").await.unwrap();
        assert_eq!(profile.name, "Karim");
        assert_eq!(profile.comments_count, 17);
        assert!(profile.department.is_none());
    }
}
