//! Session persistence scenarios across simulated restarts.

use todosync::{Controller, SessionStore, SyncClient, User, ViewState};

fn controller_over(dir: &std::path::Path) -> Controller {
    // Endpoint is never contacted in these scenarios.
    let client = SyncClient::new("http://127.0.0.1:9/graphql").unwrap();
    Controller::new(client, SessionStore::new(dir))
}

#[test]
fn fresh_state_dir_starts_logged_out_login() {
    let dir = tempfile::tempdir().unwrap();
    let controller = controller_over(dir.path());
    assert_eq!(controller.view(), ViewState::logged_out());
}

#[test]
fn persisted_token_and_profile_restore_the_logged_in_view() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("auth_token"), "abc").unwrap();
    std::fs::write(
        dir.path().join("user_info"),
        r#"{"id":1,"email":"a@b.com"}"#,
    )
    .unwrap();

    let controller = controller_over(dir.path());

    assert_eq!(controller.view(), ViewState::LoggedIn);
    assert_eq!(controller.user_email(), Some("a@b.com"));
}

#[test]
fn session_round_trips_across_store_instances() {
    let dir = tempfile::tempdir().unwrap();
    let user: User = serde_json::from_str(r#"{"id":"u7","email":"seven@example.com"}"#).unwrap();
    SessionStore::new(dir.path()).set("tok-7", &user).unwrap();

    let restored = SessionStore::new(dir.path()).load();

    assert_eq!(restored.token(), Some("tok-7"));
    assert_eq!(restored.user().unwrap().id, "u7");
    assert_eq!(restored.user().unwrap().email, "seven@example.com");
}

#[test]
fn corrupt_profile_still_counts_as_logged_in() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("auth_token"), "abc").unwrap();
    std::fs::write(dir.path().join("user_info"), "garbage!").unwrap();

    let controller = controller_over(dir.path());

    // The token survives a broken profile; only the email display is lost.
    assert_eq!(controller.view(), ViewState::LoggedIn);
    assert!(controller.user_email().is_none());
}
