use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use serde_json::Value;

use super::error::ApiError;
use super::request::ApiRequest;
use super::ApiTransport;

struct MockReply {
    result: Result<Value, ApiError>,
    delay: Option<Duration>,
}

/// Scripted transport for testing — replies are queued per route key
/// (`"GET /api/doctors"`, `"GET /api/appointments/slots/D1?range=week"`).
///
/// Unscripted routes answer HTTP 404 with a descriptive message.
#[derive(Default)]
pub struct MockApiClient {
    replies: Mutex<HashMap<String, VecDeque<MockReply>>>,
    sent: Mutex<Vec<ApiRequest>>,
}

impl MockApiClient {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, route: &str, reply: MockReply) {
        if let Ok(mut replies) = self.replies.lock() {
            replies.entry(route.to_string()).or_default().push_back(reply);
        }
    }

    /// Queue a successful JSON reply.
    pub fn respond(self, route: &str, body: Value) -> Self {
        self.push(route, MockReply { result: Ok(body), delay: None });
        self
    }

    /// Queue a successful reply delivered after `delay`.
    pub fn respond_after(self, route: &str, body: Value, delay: Duration) -> Self {
        self.push(route, MockReply { result: Ok(body), delay: Some(delay) });
        self
    }

    /// Queue a failure.
    pub fn fail(self, route: &str, error: ApiError) -> Self {
        self.push(route, MockReply { result: Err(error), delay: None });
        self
    }

    /// Queue a failure delivered after `delay`.
    pub fn fail_after(self, route: &str, error: ApiError, delay: Duration) -> Self {
        self.push(route, MockReply { result: Err(error), delay: Some(delay) });
        self
    }

    /// Every request received so far, in order.
    pub fn sent(&self) -> Vec<ApiRequest> {
        self.sent.lock().map(|s| s.clone()).unwrap_or_default()
    }

    pub fn sent_routes(&self) -> Vec<String> {
        self.sent().iter().map(ApiRequest::route_key).collect()
    }
}

impl ApiTransport for MockApiClient {
    async fn send(&self, request: ApiRequest) -> Result<Value, ApiError> {
        let route = request.route_key();
        if let Ok(mut sent) = self.sent.lock() {
            sent.push(request);
        }

        let reply = self
            .replies
            .lock()
            .ok()
            .and_then(|mut replies| replies.get_mut(&route).and_then(VecDeque::pop_front));

        match reply {
            Some(MockReply { result, delay }) => {
                if let Some(delay) = delay {
                    tokio::time::sleep(delay).await;
                }
                result
            }
            None => Err(ApiError::Http {
                status: 404,
                message: Some(format!("No mock reply for {route}")),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn replies_are_consumed_in_order() {
        let mock = MockApiClient::new()
            .respond("GET /api/doctors", json!([1]))
            .respond("GET /api/doctors", json!([2]));

        assert_eq!(mock.send(ApiRequest::get("/api/doctors")).await.unwrap(), json!([1]));
        assert_eq!(mock.send(ApiRequest::get("/api/doctors")).await.unwrap(), json!([2]));
        let err = mock.send(ApiRequest::get("/api/doctors")).await.unwrap_err();
        assert_eq!(err.status(), Some(404));
        assert_eq!(mock.sent_routes().len(), 3);
    }
}
