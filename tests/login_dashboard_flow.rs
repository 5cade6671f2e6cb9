//! End-to-end tests for the session-gated dashboard flow
//!
//! These cover the whole path a user takes: login against a mock server,
//! token persistence across an app restart, and the dashboard screen's
//! render states, with the UI shell stubbed by recording fakes.

use app_state::{DashboardScreen, LoginScreen, Navigator, Notifier, Route, Severity};
use lms_client::{
    ApiClient, ApiClientConfig, Authenticator, DashboardLoader, DashboardState, LoginOutcome,
};
use serde_json::json;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use storage::{KvConfig, KvStore, SledTokenStore, TokenStore};
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Navigator fake that records every route change
#[derive(Default)]
struct RecordingNavigator {
    routes: Mutex<Vec<Route>>,
    backs: Mutex<usize>,
}

impl RecordingNavigator {
    fn routes(&self) -> Vec<Route> {
        self.routes.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn replace(&self, route: Route) {
        self.routes.lock().unwrap().push(route);
    }

    fn back(&self) {
        *self.backs.lock().unwrap() += 1;
    }
}

/// Notifier fake that swallows toasts
struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _message: &str, _severity: Severity, _duration: Duration) {}
}

fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new(ApiClientConfig::new(server.uri()))
}

async fn mount_login(server: &MockServer, token: &str, role: &str) {
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": token,
            "role": role,
        })))
        .mount(server)
        .await;
}

async fn mount_dashboard(server: &MockServer, token: &str) {
    Mock::given(method("GET"))
        .and(path("/api/dashboard"))
        .and(header("Authorization", format!("Bearer {}", token)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "stats": {
                "books": 10,
                "availableBooks": 4,
                "members": 50,
                "activeMembers": 12,
                "issuedToday": 2,
                "overdueBooks": 1,
            },
            "recentIssues": [
                { "bookTitle": "Dune", "memberName": "Alice", "date": "2025-01-01" },
            ],
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_login_then_dashboard_round_trip() {
    let mock_server = MockServer::start().await;
    mount_login(&mock_server, "tok-e2e", "librarian").await;
    mount_dashboard(&mock_server, "tok-e2e").await;

    let tokens = Arc::new(SledTokenStore::in_memory().unwrap());

    let auth = Authenticator::new(client_for(&mock_server), tokens.clone());
    let outcome = auth.login("staff@library.example", "hunter2").await;
    assert!(matches!(outcome, LoginOutcome::Authorized(_)));

    let loader = DashboardLoader::new(client_for(&mock_server), tokens);
    match loader.load().await {
        DashboardState::Loaded { stats, recent_issues } => {
            assert_eq!(stats.books, 10);
            assert_eq!(stats.available_books, 4);
            assert_eq!(stats.members, 50);
            assert_eq!(stats.active_members, 12);
            assert_eq!(stats.issued_today, 2);
            assert_eq!(stats.overdue_books, 1);

            assert_eq!(recent_issues.len(), 1);
            assert_eq!(recent_issues[0].book_title, "Dune");
            assert_eq!(recent_issues[0].member_name, "Alice");
            assert_eq!(recent_issues[0].date, "2025-01-01");
        }
        other => panic!("expected Loaded, got {:?}", other),
    }
}

#[tokio::test]
async fn test_token_survives_an_app_restart() {
    let mock_server = MockServer::start().await;
    mount_login(&mock_server, "tok-persist", "librarian").await;
    mount_dashboard(&mock_server, "tok-persist").await;

    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("kv.db");

    // First launch: log in and persist the token.
    {
        let kv = Arc::new(KvStore::new(KvConfig::new(db_path.to_string_lossy())).unwrap());
        let tokens = Arc::new(SledTokenStore::new(kv.clone()));

        let auth = Authenticator::new(client_for(&mock_server), tokens);
        let outcome = auth.login("staff@library.example", "hunter2").await;
        assert!(matches!(outcome, LoginOutcome::Authorized(_)));

        kv.flush().unwrap();
    }

    // Second launch: the stored token alone gates the dashboard.
    {
        let kv = Arc::new(KvStore::new(KvConfig::new(db_path.to_string_lossy())).unwrap());
        let tokens = Arc::new(SledTokenStore::new(kv));

        assert_eq!(tokens.get().await, Some("tok-persist".to_string()));

        let loader = DashboardLoader::new(client_for(&mock_server), tokens);
        assert!(matches!(loader.load().await, DashboardState::Loaded { .. }));
    }
}

#[tokio::test]
async fn test_full_screen_flow_login_dashboard_logout() {
    let mock_server = MockServer::start().await;
    mount_login(&mock_server, "tok-flow", "librarian").await;
    mount_dashboard(&mock_server, "tok-flow").await;

    let tokens = Arc::new(SledTokenStore::in_memory().unwrap());
    let navigator = Arc::new(RecordingNavigator::default());

    // Login screen submits and navigates to the dashboard.
    let login = LoginScreen::new(
        Authenticator::new(client_for(&mock_server), tokens.clone()),
        navigator.clone(),
        Arc::new(NullNotifier),
    );
    let outcome = login.submit("staff@library.example", "hunter2").await;
    assert!(matches!(outcome, LoginOutcome::Authorized(_)));
    assert_eq!(navigator.routes(), vec![Route::Dashboard]);

    // Dashboard screen loads with the persisted token.
    let dashboard = DashboardScreen::new(
        DashboardLoader::new(client_for(&mock_server), tokens.clone()),
        tokens.clone(),
        navigator.clone(),
    );
    assert_eq!(dashboard.state(), DashboardState::Loading);
    dashboard.refresh().await;
    assert!(matches!(dashboard.state(), DashboardState::Loaded { .. }));

    // Logout clears the token and returns to the login screen.
    dashboard.logout().await;
    assert_eq!(tokens.get().await, None);
    assert_eq!(navigator.routes(), vec![Route::Dashboard, Route::Login]);

    // A reload after logout lands in NoToken, not an empty dashboard.
    dashboard.refresh().await;
    assert_eq!(dashboard.state(), DashboardState::NoToken);
}

#[tokio::test]
async fn test_expired_session_is_surfaced_not_cleared() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/dashboard"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "Unauthorized",
        })))
        .mount(&mock_server)
        .await;

    let tokens = Arc::new(SledTokenStore::in_memory().unwrap());
    tokens.set("tok-expired").await;

    let navigator = Arc::new(RecordingNavigator::default());
    let dashboard = DashboardScreen::new(
        DashboardLoader::new(client_for(&mock_server), tokens.clone()),
        tokens.clone(),
        navigator.clone(),
    );

    dashboard.refresh().await;

    // The screen reports Unauthorized; only an explicit logout clears the
    // token and navigates away.
    assert_eq!(dashboard.state(), DashboardState::Unauthorized);
    assert_eq!(tokens.get().await, Some("tok-expired".to_string()));
    assert!(navigator.routes().is_empty());

    dashboard.logout().await;
    assert_eq!(tokens.get().await, None);
    assert_eq!(navigator.routes(), vec![Route::Login]);
}
