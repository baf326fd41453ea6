//! Endpoint contract tests.
//!
//! Exercises the controller against a mock endpoint, verifying the exact
//! query shapes on the wire, the `{data}` / `{errors}` envelope handling,
//! and the session/view transitions each response is allowed to cause.

use todosync::{AuthMode, Controller, Notice, SessionStore, SyncClient, ViewState};
use wiremock::matchers::{method, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn seeded_store(dir: &std::path::Path, token: &str) -> SessionStore {
    let store = SessionStore::new(dir);
    let user = serde_json::from_str(r#"{"id":"u1","email":"a@b.com"}"#).unwrap();
    store.set(token, &user).unwrap();
    store
}

async fn controller_for(server: &MockServer, store: SessionStore) -> Controller {
    let client = SyncClient::new(server.uri()).unwrap();
    Controller::new(client, store)
}

#[tokio::test]
async fn list_replaces_the_entire_visible_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param(
            "query",
            r#"{todoList(token:"abc"){id,text,done}}"#,
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": {"todoList": [
                {"id": "a", "text": "first", "done": false},
                {"id": "b", "text": "second", "done": true},
            ]}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let mut controller = controller_for(&server, seeded_store(dir.path(), "abc")).await;

    let notice = controller.refresh_tasks().await;

    assert!(notice.is_none());
    let rows = controller.list().rows();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].id, "a");
    assert!(rows[1].done);
    assert!(controller.list().placeholder().is_none());
}

#[tokio::test]
async fn empty_list_shows_the_placeholder_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"data": {"todoList": []}})),
        )
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let mut controller = controller_for(&server, seeded_store(dir.path(), "abc")).await;

    controller.refresh_tasks().await;

    assert_eq!(
        controller.list().placeholder(),
        Some("There are no tasks for you today")
    );
}

#[tokio::test]
async fn unauthorized_response_clears_session_and_forces_logged_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "errors": [{"message": "request Unauthorized: token expired"}]
        })))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let mut controller = controller_for(&server, seeded_store(dir.path(), "stale")).await;
    assert_eq!(controller.view(), ViewState::LoggedIn);

    let notice = controller.refresh_tasks().await;

    // Forced transition, no alert.
    assert!(notice.is_none());
    assert_eq!(controller.view(), ViewState::logged_out());
    assert!(!SessionStore::new(dir.path()).load().is_authenticated());
}

#[tokio::test]
async fn non_authorization_error_is_surfaced_without_state_change() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "errors": [{"message": "invalid session token"}]
        })))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let mut controller = controller_for(&server, seeded_store(dir.path(), "abc")).await;

    let notice = controller.refresh_tasks().await;

    assert_eq!(notice, Some(Notice::Alert("invalid session token".into())));
    assert_eq!(controller.view(), ViewState::LoggedIn);
    assert!(SessionStore::new(dir.path()).load().is_authenticated());
}

#[tokio::test]
async fn create_appends_exactly_the_created_task() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param(
            "query",
            r#"{todoList(token:"abc"){id,text,done}}"#,
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": {"todoList": [{"id": "a", "text": "existing", "done": false}]}
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(query_param(
            "query",
            r#"mutation _{createTodo(text:"buy milk",token:"abc"){id,text,done}}"#,
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": {"createTodo": {"id": "z", "text": "buy milk", "done": false}}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let mut controller = controller_for(&server, seeded_store(dir.path(), "abc")).await;
    controller.refresh_tasks().await;

    let notice = controller.add_task("buy milk").await;

    // Appended without re-fetching: the list mock only allows one call.
    assert!(notice.is_none());
    let rows = controller.list().rows();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1].id, "z");
    assert_eq!(rows[1].text, "buy milk");
}

#[tokio::test]
async fn blank_create_never_reaches_the_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"data": {}})))
        .expect(0)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let mut controller = controller_for(&server, seeded_store(dir.path(), "abc")).await;

    assert_eq!(
        controller.add_task("").await,
        Some(Notice::Alert("Please specify a task".into()))
    );
    assert_eq!(
        controller.add_task("   ").await,
        Some(Notice::Alert("Please specify a task".into()))
    );
    assert!(controller.list().rows().is_empty());
}

#[tokio::test]
async fn update_patches_only_the_target_row() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param(
            "query",
            r#"{todoList(token:"abc"){id,text,done}}"#,
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": {"todoList": [
                {"id": "41", "text": "before", "done": false},
                {"id": "42", "text": "target", "done": false},
                {"id": "43", "text": "after", "done": false},
            ]}
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(query_param(
            "query",
            r#"mutation _{updateTodo(id:"42",done:true,token:"abc"){id,text,done}}"#,
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": {"updateTodo": {"id": "42", "text": "target", "done": true}}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let mut controller = controller_for(&server, seeded_store(dir.path(), "abc")).await;
    controller.refresh_tasks().await;

    let notice = controller.toggle_task("42", true).await;

    assert!(notice.is_none());
    let rows = controller.list().rows();
    assert!(!rows[0].done);
    assert!(rows[1].done);
    assert!(!rows[2].done);
}

#[tokio::test]
async fn login_persists_the_returned_session_and_fetches_tasks() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param(
            "query",
            r#"mutation _{login(email:"a@b.com",password:"pw"){token,user{id,email}}}"#,
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": {"login": {
                "token": "fresh-token",
                "user": {"id": "u1", "email": "a@b.com"},
            }}
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(query_param(
            "query",
            r#"{todoList(token:"fresh-token"){id,text,done}}"#,
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": {"todoList": [{"id": "a", "text": "hello", "done": false}]}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let mut controller = controller_for(&server, SessionStore::new(dir.path())).await;
    assert_eq!(controller.view(), ViewState::logged_out());

    let notice = controller.authenticate(AuthMode::Login, "a@b.com", "pw").await;

    assert!(notice.is_none());
    assert_eq!(controller.view(), ViewState::LoggedIn);
    assert_eq!(controller.user_email(), Some("a@b.com"));
    assert_eq!(controller.list().rows().len(), 1);

    // Persisted session exactly mirrors the response payload.
    let stored = SessionStore::new(dir.path()).load();
    assert_eq!(stored.token(), Some("fresh-token"));
    assert_eq!(stored.user().unwrap().email, "a@b.com");
}

#[tokio::test]
async fn failed_signup_surfaces_the_message_and_changes_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "errors": [{"message": "email already registered"}]
        })))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let mut controller = controller_for(&server, SessionStore::new(dir.path())).await;
    controller.show_signup();

    let notice = controller
        .authenticate(AuthMode::Signup, "a@b.com", "pw")
        .await;

    assert_eq!(
        notice,
        Some(Notice::Alert("Signup failed: email already registered".into()))
    );
    assert!(!controller.view().is_logged_in());
    assert!(!SessionStore::new(dir.path()).load().is_authenticated());
}

#[tokio::test]
async fn quoted_task_text_arrives_escaped() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param(
            "query",
            r#"mutation _{createTodo(text:"say \"hi\"",token:"abc"){id,text,done}}"#,
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": {"createTodo": {"id": "q", "text": "say \"hi\"", "done": false}}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let mut controller = controller_for(&server, seeded_store(dir.path(), "abc")).await;

    let notice = controller.add_task(r#"say "hi""#).await;

    assert!(notice.is_none());
    assert_eq!(controller.list().rows()[0].text, r#"say "hi""#);
}

#[tokio::test]
async fn transport_failure_is_dropped_silently() {
    // Closed port: the connection is refused outright.
    let dir = tempfile::tempdir().unwrap();
    let client = SyncClient::new("http://127.0.0.1:9/graphql").unwrap();
    let mut controller = Controller::new(client, seeded_store(dir.path(), "abc"));

    let notice = controller.refresh_tasks().await;

    assert!(notice.is_none());
    assert_eq!(controller.view(), ViewState::LoggedIn);
    assert!(controller.list().rows().is_empty());
}
