use super::{Acknowledgement, Collection};
use crate::error::ApiError;
use crate::models::Quiz;

impl Collection<'_, Quiz> {
    /// Count one attempt against the quiz. Scoring happens client side with
    /// [`Quiz::score`]; the server only keeps the counter.
    pub async fn record_attempt(&self, id: &str) -> Result<Acknowledgement, ApiError> {
        self.client.require_session()?;
        self.client.post_empty(&self.action(id, "attempt")).await
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::signed_in_client;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_record_attempt() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/quizzes/q-1/attempt"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "Attempt recorded"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = signed_in_client(&server, "t-1");
        let ack = client.quizzes().record_attempt("q-1").await.unwrap();
        assert_eq!(ack.message.as_deref(), Some("Attempt recorded"));
    }
}
