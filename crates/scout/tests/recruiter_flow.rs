use axum::{
    Json, Router,
    http::StatusCode,
    routing::{get, post},
};
use scout::api::{HttpCandidateApi, SendMessageRequest};
use scout::contact::{ContactError, ContactForm};
use scout::session::Credentials;
use scout::storage::FileKeyValueStore;
use scout::{ScoutApp, ScoutConfig, SortColumn};
use serde_json::{Value, json};
use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpListener;

async fn user_list() -> Json<Value> {
    let candidates: Vec<Value> = (0..25)
        .map(|i| {
            let level = if i % 5 == 0 { "Advanced" } else { "Beginner" };
            json!({
                "username": format!("dev{i:02}"),
                "joined_at": format!("2023-01-{:02}T00:00:00Z", i + 1),
                "skills": [{"language": "Rust", "level": level}],
                "score": i
            })
        })
        .collect();
    Json(Value::Array(candidates))
}

async fn roles_list() -> Json<Value> {
    Json(json!({"roles": ["Backend", "Frontend"]}))
}

async fn messages(Json(body): Json<SendMessageRequest>) -> (StatusCode, Json<Value>) {
    if body.role == "Backend" {
        (
            StatusCode::OK,
            Json(json!({
                "id": 7,
                "role": body.role,
                "status": "sent",
                "msj": body.msj,
                "submitted_at": "2024-05-01T12:00:00Z"
            })),
        )
    } else {
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({"error": "invalid_role", "message": "Unknown role"})),
        )
    }
}

async fn spawn_api() -> String {
    let app = Router::new()
        .route("/userlist", get(user_list))
        .route("/roleslist", get(roles_list))
        .route("/messages", post(messages));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}")
}

async fn build_app(data_dir: &Path, base_url: &str) -> ScoutApp {
    let mut config = ScoutConfig::default();
    config.storage.data_dir = Some(data_dir.to_path_buf());
    config.api.base_url = base_url.to_string();

    let http = reqwest::Client::builder().no_proxy().build().unwrap();
    ScoutApp::builder(config.clone())
        .storage(Arc::new(FileKeyValueStore::from_config(&config)))
        .api(Arc::new(HttpCandidateApi::with_client(http, base_url)))
        .build()
        .await
        .unwrap()
}

#[tokio::test]
async fn test_login_browse_contact_and_restore() {
    let base_url = spawn_api().await;
    let data_dir = tempfile::tempdir().unwrap();

    let app = build_app(data_dir.path(), &base_url).await;
    assert!(app.require_session().is_err());
    assert!(
        app.session()
            .login(&Credentials::new("recruiter@coto.com", "123456"))
            .await
    );

    // Browse: Advanced only, highest score first
    let candidates = app.api().get_user_list().await.unwrap();
    let mut table = app.new_table().unwrap();
    table.toggle_level("Advanced");
    table.handle_sort(SortColumn::Score);
    table.handle_sort(SortColumn::Score);
    let page = table.view(&candidates);

    let names: Vec<_> = page.items.iter().map(|c| c.username.as_str()).collect();
    assert_eq!(names, vec!["dev20", "dev15", "dev10", "dev05", "dev00"]);
    assert_eq!(page.total_pages, 1);

    // Unfiltered pagination
    table.clear_filters();
    table.go_to_page(3);
    let page = table.view(&candidates);
    assert_eq!(page.items.len(), 5);
    assert_eq!(page.total_pages, 3);

    // Contact with a bad role, then a good one
    let err = app
        .contact()
        .contact("dev20", &ContactForm::new("Pilot", "Let's talk about a role", "me@coto.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, ContactError::InvalidRole { .. }));
    assert!(!app.contacted().is_contacted("dev20"));

    let response = app
        .contact()
        .contact("dev20", &ContactForm::new("Backend", "Let's talk about a role", "me@coto.com"))
        .await
        .unwrap();
    assert_eq!(response.id, 7);
    assert!(app.contacted().is_contacted("dev20"));

    // A second process over the same data directory sees the persisted state
    let restored = build_app(data_dir.path(), &base_url).await;
    assert!(restored.require_session().is_ok());
    assert!(restored.contacted().is_contacted("dev20"));
    assert_eq!(restored.history().list().await.len(), 1);

    restored.session().logout().await;
    let after_logout = build_app(data_dir.path(), &base_url).await;
    assert!(after_logout.require_session().is_err());
}

#[tokio::test]
async fn test_corrupt_storage_recovers_on_next_write() {
    let base_url = spawn_api().await;
    let data_dir = tempfile::tempdir().unwrap();
    std::fs::write(data_dir.path().join("storage.json"), "{not json").unwrap();

    let app = build_app(data_dir.path(), &base_url).await;
    assert!(app.require_session().is_err());
    assert!(app.contacted().is_empty());

    assert!(
        app.session()
            .login(&Credentials::new("recruiter@coto.com", "123456"))
            .await
    );
    app.contacted().mark_as_contacted("ana").await;

    let restarted = build_app(data_dir.path(), &base_url).await;
    assert!(restarted.require_session().is_ok());
    assert!(restarted.contacted().is_contacted("ana"));
}
