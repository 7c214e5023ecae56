use scout::{ScoutApp, ScoutConfig};
use scout_cli::commands::{run_contacted, run_history, run_login, run_logout, run_status};
use scout_cli::error::CliError;
use std::path::Path;

async fn app_in(dir: &Path) -> ScoutApp {
    let mut config = ScoutConfig::default();
    config.storage.data_dir = Some(dir.to_path_buf());
    config.api.base_url = "http://127.0.0.1:9".to_string();
    ScoutApp::from_config(config).await.unwrap()
}

#[tokio::test]
async fn test_login_persists_across_invocations() {
    let dir = tempfile::tempdir().unwrap();

    let app = app_in(dir.path()).await;
    assert!(app.require_session().is_err());
    run_login(&app, "recruiter@coto.com".to_string(), Some("123456".to_string()))
        .await
        .unwrap();

    let next = app_in(dir.path()).await;
    assert!(next.require_session().is_ok());
    run_status(&next).await.unwrap();
    run_history(&next).await.unwrap();

    run_logout(&next).await.unwrap();
    assert!(app_in(dir.path()).await.require_session().is_err());
}

#[tokio::test]
async fn test_login_rejects_bad_input() {
    let dir = tempfile::tempdir().unwrap();
    let app = app_in(dir.path()).await;

    let err = run_login(&app, "not-an-email".to_string(), Some("123".to_string()))
        .await
        .unwrap_err();
    assert!(matches!(err, CliError::InvalidInput(_)));

    let err = run_login(&app, "recruiter@coto.com".to_string(), Some("wrong-pass".to_string()))
        .await
        .unwrap_err();
    assert!(matches!(err, CliError::InvalidInput(_)));
    assert!(app.require_session().is_err());
}

#[tokio::test]
async fn test_clear_contacted() {
    let dir = tempfile::tempdir().unwrap();
    let app = app_in(dir.path()).await;
    app.contacted().mark_as_contacted("ana").await;

    run_contacted(&app, false).await.unwrap();
    run_contacted(&app, true).await.unwrap();

    assert!(app.contacted().is_empty());
    assert!(app_in(dir.path()).await.contacted().is_empty());
}
