use async_trait::async_trait;
use reqwest::Client;
use scout_core::Candidate;
use tracing::{debug, warn};

use super::{
    ApiError, ApiResult, RolesResponse, SendMessageError, SendMessageRequest, SendMessageResponse,
};
use crate::config::ScoutConfig;

/// Remote calls the application depends on
#[async_trait]
pub trait CandidateApi: Send + Sync {
    /// `GET /userlist`
    async fn get_user_list(&self) -> ApiResult<Vec<Candidate>>;

    /// `GET /roleslist`
    async fn get_roles_list(&self) -> ApiResult<RolesResponse>;

    /// `POST /messages`
    async fn send_message(&self, request: &SendMessageRequest) -> ApiResult<SendMessageResponse>;
}

/// reqwest-backed CandidateApi
#[derive(Debug, Clone)]
pub struct HttpCandidateApi {
    http: Client,
    base_url: String,
}

impl HttpCandidateApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Use a preconfigured reqwest client (timeouts, proxies, ...)
    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn from_config(config: &ScoutConfig) -> Self {
        Self::new(&config.api.base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let url = self.url(path);
        debug!("GET {}", url);

        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!("GET {} returned {}", url, status);
            return Err(ApiError::Status {
                endpoint: path.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl CandidateApi for HttpCandidateApi {
    async fn get_user_list(&self) -> ApiResult<Vec<Candidate>> {
        self.get_json("/userlist").await
    }

    async fn get_roles_list(&self) -> ApiResult<RolesResponse> {
        self.get_json("/roleslist").await
    }

    async fn send_message(&self, request: &SendMessageRequest) -> ApiResult<SendMessageResponse> {
        let url = self.url("/messages");
        debug!("POST {} role={}", url, request.role);

        let response = self.http.post(&url).json(request).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let body = response.bytes().await?;
        match serde_json::from_slice::<SendMessageError>(&body) {
            Ok(rejection) => {
                warn!("Message rejected ({}): {}", rejection.error, rejection.message);
                Err(ApiError::Rejected(rejection))
            }
            Err(_) => Err(ApiError::Status {
                endpoint: "/messages".to_string(),
                status: status.as_u16(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Json, Router,
        http::StatusCode,
        routing::{get, post},
    };
    use serde_json::{Value, json};
    use tokio::net::TcpListener;

    async fn user_list() -> Json<Value> {
        Json(json!([
            {
                "username": "ana",
                "joined_at": "2023-01-10T00:00:00Z",
                "skills": [{"language": "Go", "level": "Advanced"}],
                "score": 10
            },
            {
                "username": "bob",
                "joined_at": "2022-06-01T00:00:00Z",
                "skills": [],
                "score": 5.5
            }
        ]))
    }

    async fn roles_list() -> Json<Value> {
        Json(json!({"roles": ["Backend", "Frontend"]}))
    }

    async fn messages(Json(body): Json<SendMessageRequest>) -> (StatusCode, Json<Value>) {
        match body.role.as_str() {
            "Backend" => (
                StatusCode::CREATED,
                Json(json!({
                    "id": 42,
                    "role": body.role,
                    "status": "sent",
                    "msj": body.msj,
                    "submitted_at": "2024-05-01T12:00:00Z"
                })),
            ),
            "Boom" => (StatusCode::INTERNAL_SERVER_ERROR, Json(json!("oops"))),
            _ => (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": "invalid_role", "message": "Role is not valid"})),
            ),
        }
    }

    async fn spawn_server(app: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        format!("http://{addr}/")
    }

    async fn api_for(app: Router) -> HttpCandidateApi {
        let base_url = spawn_server(app).await;
        let http = Client::builder().no_proxy().build().unwrap();
        HttpCandidateApi::with_client(http, base_url)
    }

    fn full_app() -> Router {
        Router::new()
            .route("/userlist", get(user_list))
            .route("/roleslist", get(roles_list))
            .route("/messages", post(messages))
    }

    fn request(role: &str) -> SendMessageRequest {
        SendMessageRequest {
            role: role.to_string(),
            msj: "We'd love to talk to you".to_string(),
            email: "recruiter@coto.com".to_string(),
        }
    }

    #[tokio::test]
    async fn test_get_user_list() {
        let api = api_for(full_app()).await;
        assert!(!api.base_url().ends_with('/'));

        let candidates = api.get_user_list().await.unwrap();
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].username, "ana");
        assert_eq!(candidates[0].score, 10.0);
        assert!(candidates[1].skills.is_empty());
    }

    #[tokio::test]
    async fn test_get_roles_list() {
        let api = api_for(full_app()).await;
        let roles = api.get_roles_list().await.unwrap();
        assert_eq!(roles.roles, vec!["Backend", "Frontend"]);
    }

    #[tokio::test]
    async fn test_non_success_list_is_status_error() {
        let api = api_for(Router::new()).await;
        let err = api.get_user_list().await.unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_send_message_success() {
        let api = api_for(full_app()).await;
        let response = api.send_message(&request("Backend")).await.unwrap();
        assert_eq!(response.id, 42);
        assert_eq!(response.status, "sent");
        assert_eq!(response.msj, "We'd love to talk to you");
    }

    #[tokio::test]
    async fn test_send_message_invalid_role() {
        let api = api_for(full_app()).await;
        let err = api.send_message(&request("Astronaut")).await.unwrap_err();
        assert!(err.is_invalid_role());
        assert_eq!(err.to_string(), "Role is not valid");
    }

    #[tokio::test]
    async fn test_send_message_unstructured_failure() {
        let api = api_for(full_app()).await;
        let err = api.send_message(&request("Boom")).await.unwrap_err();
        assert!(!err.is_invalid_role());
        assert!(matches!(err, ApiError::Status { status: 500, .. }));
    }
}
