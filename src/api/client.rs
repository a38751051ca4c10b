use std::time::Duration;

use reqwest::multipart::{Form, Part};
use serde_json::Value;

use super::error::ApiError;
use super::request::{ApiRequest, MultipartBody, RequestBody};
use super::ApiTransport;
use crate::config::ClientConfig;

/// HTTP client for the clinic backend.
///
/// Credentialed requests go through a client with a cookie store, so the
/// session cookie set by login is replayed on every later call.
pub struct HttpApiClient {
    base_url: String,
    session_client: reqwest::Client,
    anonymous_client: reqwest::Client,
    timeout_secs: u64,
}

impl HttpApiClient {
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, ApiError> {
        let timeout = Duration::from_secs(timeout_secs);
        let session_client = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Client(e.to_string()))?;
        let anonymous_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Client(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            session_client,
            anonymous_client,
            timeout_secs,
        })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, ApiError> {
        Self::new(&config.api_base_url, config.request_timeout_secs)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn map_send_error(&self, e: reqwest::Error) -> ApiError {
        if e.is_connect() {
            ApiError::Connection(self.base_url.clone())
        } else if e.is_timeout() {
            ApiError::Timeout(self.timeout_secs)
        } else {
            ApiError::Client(e.to_string())
        }
    }
}

fn multipart_form(body: MultipartBody) -> Result<Form, ApiError> {
    let mut form = Form::new();
    for (name, value) in body.fields {
        form = form.text(name, value);
    }
    if let Some(file) = body.file {
        let part = Part::bytes(file.bytes)
            .file_name(file.file_name)
            .mime_str(&file.mime)
            .map_err(|e| ApiError::Client(e.to_string()))?;
        form = form.part(file.field, part);
    }
    Ok(form)
}

impl ApiTransport for HttpApiClient {
    async fn send(&self, request: ApiRequest) -> Result<Value, ApiError> {
        let url = format!("{}{}", self.base_url, request.path);
        let client = if request.with_credentials {
            &self.session_client
        } else {
            &self.anonymous_client
        };

        tracing::debug!(route = %request.route_key(), "API request");

        let mut builder = client.request(request.method.clone(), &url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(body) => builder.json(&body),
            RequestBody::Multipart(body) => builder.multipart(multipart_form(body)?),
        };

        let response = builder.send().await.map_err(|e| self.map_send_error(e))?;
        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| self.map_send_error(e))?;

        if !status.is_success() {
            let err = ApiError::from_body(status.as_u16(), &bytes);
            tracing::debug!(status = status.as_u16(), error = %err, "API request rejected");
            return Err(err);
        }

        if bytes.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::endpoints;
    use crate::api::request::FilePart;
    use axum::extract::{Multipart, Path, Query};
    use axum::http::{header, HeaderMap, StatusCode};
    use axum::response::IntoResponse;
    use axum::routing::{get, post, put};
    use axum::{Json, Router};
    use serde_json::json;
    use std::collections::HashMap;

    async fn login() -> impl IntoResponse {
        (
            [(header::SET_COOKIE, "session=abc123; Path=/; HttpOnly")],
            Json(json!({ "message": "Logged in", "user": { "_id": "U1", "role": "patient" } })),
        )
    }

    async fn check_auth(headers: HeaderMap) -> axum::response::Response {
        let has_session = headers
            .get(header::COOKIE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|c| c.contains("session=abc123"));
        if has_session {
            Json(json!({ "user": { "_id": "U1", "name": "Ada" } })).into_response()
        } else {
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "message": "Not authenticated" })),
            )
                .into_response()
        }
    }

    async fn slots(
        Path(doctor): Path<String>,
        Query(params): Query<HashMap<String, String>>,
    ) -> Json<Value> {
        Json(json!({ "doctor": doctor, "range": params.get("range") }))
    }

    async fn profile(mut multipart: Multipart) -> Json<Value> {
        let mut names = Vec::new();
        while let Ok(Some(field)) = multipart.next_field().await {
            names.push(field.name().unwrap_or_default().to_string());
        }
        Json(json!({ "fields": names }))
    }

    async fn spawn_backend() -> String {
        let app = Router::new()
            .route("/api/auth/login", post(login))
            .route("/api/auth/check-auth", get(check_auth))
            .route("/api/auth/update-profile", put(profile))
            .route("/api/appointments/slots/:doctor", get(slots))
            .route("/api/plain", get(|| async { "not json" }));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn session_cookie_is_replayed() {
        let base = spawn_backend().await;
        let client = HttpApiClient::new(&base, 5).unwrap();

        let err = client.send(endpoints::check_session()).await.unwrap_err();
        assert_eq!(err.status(), Some(401));
        assert_eq!(err.server_message(), Some("Not authenticated"));

        client.send(endpoints::login("ada@example.org", "pw")).await.unwrap();
        let body = client.send(endpoints::check_session()).await.unwrap();
        assert_eq!(body["user"]["name"], "Ada");
    }

    #[tokio::test]
    async fn anonymous_requests_skip_cookie() {
        let base = spawn_backend().await;
        let client = HttpApiClient::new(&base, 5).unwrap();
        client.send(endpoints::login("ada@example.org", "pw")).await.unwrap();

        let err = client
            .send(endpoints::check_session().without_credentials())
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(401));
    }

    #[tokio::test]
    async fn query_parameters_reach_backend() {
        let base = spawn_backend().await;
        let client = HttpApiClient::new(&base, 5).unwrap();
        let body = client
            .send(endpoints::available_slots("D1", crate::models::SlotRange::Week))
            .await
            .unwrap();
        assert_eq!(body, json!({ "doctor": "D1", "range": "week" }));
    }

    #[tokio::test]
    async fn multipart_profile_update() {
        let base = spawn_backend().await;
        let client = HttpApiClient::new(&base, 5).unwrap();
        let form = MultipartBody {
            fields: vec![("name".into(), "Ada".into()), ("phone".into(), "0800".into())],
            file: Some(FilePart {
                field: "image".into(),
                file_name: "me.png".into(),
                mime: "image/png".into(),
                bytes: vec![0x89, 0x50, 0x4e, 0x47],
            }),
        };
        let body = client.send(endpoints::update_profile(form)).await.unwrap();
        assert_eq!(body["fields"], json!(["name", "phone", "image"]));
    }

    #[tokio::test]
    async fn non_json_success_is_decode_error() {
        let base = spawn_backend().await;
        let client = HttpApiClient::new(&base, 5).unwrap();
        let err = client.send(ApiRequest::get("/api/plain")).await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[tokio::test]
    async fn unreachable_backend_is_connection_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = HttpApiClient::new(&format!("http://{addr}/"), 5).unwrap();
        assert_eq!(client.base_url(), format!("http://{addr}"));
        let err = client.send(endpoints::list_doctors()).await.unwrap_err();
        assert!(matches!(err, ApiError::Connection(_)));
    }
}
