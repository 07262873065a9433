use super::Collection;
use crate::error::ApiError;
use crate::models::{LikeOutcome, Resource};

impl Collection<'_, Resource> {
    /// Toggle the signed-in user's like. The server answers with the new state
    /// and the updated counter.
    pub async fn like(&self, id: &str) -> Result<LikeOutcome, ApiError> {
        self.client.require_session()?;
        self.client.post_empty(&self.action(id, "like")).await
    }
}

#[cfg(test)]
mod tests {
    use crate::error::ApiError;
    use crate::test_support::{anonymous_client, signed_in_client};
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_like_toggles() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/resources/r-1/like"))
            .and(header("authorization", "Bearer t-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"liked": true, "likes": 3})))
            .expect(1)
            .mount(&server)
            .await;

        let client = signed_in_client(&server, "t-1");
        let outcome = client.resources().like("r-1").await.unwrap();
        assert!(outcome.liked);
        assert_eq!(outcome.likes, 3);
    }

    #[tokio::test]
    async fn test_like_needs_a_session() {
        let server = MockServer::start().await;
        let client = anonymous_client(&server);
        let err = client.resources().like("r-1").await.unwrap_err();
        assert_eq!(err, ApiError::NotSignedIn);
        assert!(server.received_requests().await.unwrap().is_empty());
    }
}
