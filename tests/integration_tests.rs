//! End-to-end tests over the application facade.
//!
//! Each test wires a real `App` to a mock collaborator server and a
//! file-backed store in a temporary directory, then exercises a full user
//! flow. Process restarts are simulated by building a fresh `App` over the
//! same directory.

use iptrack::app::{Access, App, Route};
use iptrack::config::TrackerConfig;
use iptrack::history::MAX_HISTORY_ENTRIES;
use iptrack::storage::{FileStore, KeyValueStore};
use std::sync::Arc;
use tempfile::TempDir;

fn config_for(server: &mockito::ServerGuard) -> TrackerConfig {
    TrackerConfig {
        api_base_url: server.url(),
        geo_base_url: server.url(),
        ..Default::default()
    }
}

fn storage_in(dir: &TempDir) -> Arc<dyn KeyValueStore> {
    Arc::new(FileStore::new(dir.path()).unwrap())
}

fn app_over(server: &mockito::ServerGuard, dir: &TempDir) -> App {
    App::new(&config_for(server), storage_in(dir)).unwrap()
}

async fn mock_login_success(server: &mut mockito::ServerGuard) -> mockito::Mock {
    server
        .mock("POST", "/api/login")
        .with_status(200)
        .with_body(
            r#"{"success": true,
                "user": {"name": "Ada", "email": "ada@example.com"},
                "token": "tok-123"}"#,
        )
        .create_async()
        .await
}

async fn mock_lookup(server: &mut mockito::ServerGuard, ip: &str, city: &str) -> mockito::Mock {
    server
        .mock("GET", format!("/{}/geo", ip).as_str())
        .with_status(200)
        .with_body(format!(
            r#"{{"ip": "{}", "city": "{}", "country": "US"}}"#,
            ip, city
        ))
        .create_async()
        .await
}

#[tokio::test]
async fn login_session_survives_restart() {
    let mut server = mockito::Server::new_async().await;
    mock_login_success(&mut server).await;
    let dir = TempDir::new().unwrap();

    {
        let mut app = app_over(&server, &dir);
        assert_eq!(app.guard(Route::Home), Access::RedirectTo(Route::Login));

        app.login("ada@example.com", "secret").await.unwrap();
        assert!(app.session().is_authenticated());
    }

    // Fresh process over the same storage.
    let app = app_over(&server, &dir);
    assert!(app.session().is_authenticated());
    assert_eq!(app.session().token(), Some("tok-123"));
    assert_eq!(app.session().user().unwrap().display_name(), "Ada");
    assert_eq!(app.guard(Route::Home), Access::Allow);
    assert_eq!(app.guard(Route::Login), Access::RedirectTo(Route::Home));
}

#[tokio::test]
async fn logout_clears_persisted_session() {
    let mut server = mockito::Server::new_async().await;
    mock_login_success(&mut server).await;
    let dir = TempDir::new().unwrap();

    {
        let mut app = app_over(&server, &dir);
        app.login("ada@example.com", "secret").await.unwrap();
        // Logout immediately after login, in the same run.
        app.logout();
        assert!(!app.session().is_authenticated());
    }

    let app = app_over(&server, &dir);
    assert!(!app.session().is_authenticated());
}

#[tokio::test]
async fn rejected_login_keeps_session_anonymous() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/login")
        .with_status(401)
        .with_body(r#"{"success": false, "message": "Invalid password"}"#)
        .create_async()
        .await;
    let dir = TempDir::new().unwrap();

    let mut app = app_over(&server, &dir);
    let err = app.login("ada@example.com", "nope").await.unwrap_err();

    assert_eq!(format!("{}", err), "Invalid password");
    assert!(!app.session().is_authenticated());

    // Nothing was persisted either.
    let restarted = app_over(&server, &dir);
    assert!(!restarted.session().is_authenticated());
}

#[tokio::test]
async fn lookups_accumulate_and_survive_restart() {
    let mut server = mockito::Server::new_async().await;
    mock_lookup(&mut server, "8.8.8.8", "Mountain View").await;
    mock_lookup(&mut server, "1.1.1.1", "Sydney").await;
    let dir = TempDir::new().unwrap();

    {
        let mut app = app_over(&server, &dir);
        app.search("8.8.8.8").await.unwrap();
        app.search("1.1.1.1").await.unwrap();
        assert_eq!(app.history().len(), 2);
    }

    let app = app_over(&server, &dir);
    assert_eq!(app.history().len(), 2);
    // Most recent first.
    assert_eq!(app.history().entries()[0].ip, "1.1.1.1");
    assert_eq!(app.history().entries()[1].ip, "8.8.8.8");
    assert_eq!(
        app.history().entries()[0].location.city.as_deref(),
        Some("Sydney")
    );
}

#[tokio::test]
async fn history_cap_evicts_oldest_across_eleven_lookups() {
    let mut server = mockito::Server::new_async().await;
    let dir = TempDir::new().unwrap();

    // Eleven distinct addresses, each with its own mock.
    let ips: Vec<String> = (0..11).map(|i| format!("10.0.0.{}", i)).collect();
    for ip in &ips {
        mock_lookup(&mut server, ip, "Testville").await;
    }

    let mut app = app_over(&server, &dir);
    for ip in &ips {
        app.search(ip).await.unwrap();
    }

    assert_eq!(app.history().len(), MAX_HISTORY_ENTRIES);
    let recorded: Vec<&str> = app.history().entries().iter().map(|e| e.ip.as_str()).collect();
    let expected: Vec<&str> = ips[1..].iter().rev().map(String::as_str).collect();
    assert_eq!(recorded, expected);

    // The eviction is what got persisted, too.
    let restarted = app_over(&server, &dir);
    assert_eq!(restarted.history().len(), MAX_HISTORY_ENTRIES);
    assert!(restarted.history().entries().iter().all(|e| e.ip != "10.0.0.0"));
}

#[tokio::test]
async fn failed_lookup_creates_no_entry() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/999.1.1.1/geo")
        .with_status(200)
        .with_body(r#"{"error": {"title": "wrong ip format"}}"#)
        .create_async()
        .await;
    let dir = TempDir::new().unwrap();

    let mut app = app_over(&server, &dir);
    let err = app.search("999.1.1.1").await.unwrap_err();

    assert_eq!(format!("{}", err), "wrong ip format");
    assert!(app.history().is_empty());

    let restarted = app_over(&server, &dir);
    assert!(restarted.history().is_empty());
}

#[tokio::test]
async fn delete_selected_persists_and_preserves_order() {
    let mut server = mockito::Server::new_async().await;
    let dir = TempDir::new().unwrap();
    for i in 0..4 {
        mock_lookup(&mut server, &format!("10.0.0.{}", i), "Testville").await;
    }

    let survivors = {
        let mut app = app_over(&server, &dir);
        let mut ids = Vec::new();
        for i in 0..4 {
            ids.push(app.search(&format!("10.0.0.{}", i)).await.unwrap().id);
        }

        app.toggle_selected(ids[0]);
        app.toggle_selected(ids[2]);
        let removed = app.delete_selected();
        assert_eq!(removed, 2);
        assert!(app.selection().is_empty());

        vec![ids[3], ids[1]]
    };

    let app = app_over(&server, &dir);
    let remaining: Vec<i64> = app.history().entries().iter().map(|e| e.id).collect();
    assert_eq!(remaining, survivors);
}

#[tokio::test]
async fn masking_is_display_only_and_transient() {
    let mut server = mockito::Server::new_async().await;
    mock_lookup(&mut server, "203.0.113.42", "Testville").await;
    let dir = TempDir::new().unwrap();

    {
        let mut app = app_over(&server, &dir);
        app.search("203.0.113.42").await.unwrap();

        // Masked by default, revealed after a toggle.
        assert_eq!(app.display_ip("203.0.113.42"), "203.0.***.***");
        app.toggle_visibility("203.0.113.42");
        assert_eq!(app.display_ip("203.0.113.42"), "203.0.113.42");

        // The stored entry always keeps the true value.
        assert_eq!(app.history().entries()[0].ip, "203.0.113.42");
    }

    // Visibility is not persisted: a fresh process starts masked again,
    // while the stored value is untouched.
    let app = app_over(&server, &dir);
    assert_eq!(app.display_ip("203.0.113.42"), "203.0.***.***");
    assert_eq!(app.history().entries()[0].ip, "203.0.113.42");
}

#[tokio::test]
async fn recall_resurfaces_cached_lookup_without_network() {
    let mut server = mockito::Server::new_async().await;
    let mock = mock_lookup(&mut server, "8.8.8.8", "Mountain View").await;
    let dir = TempDir::new().unwrap();

    let mut app = app_over(&server, &dir);
    let id = app.search("8.8.8.8").await.unwrap().id;

    let recalled = app.recall(id).unwrap();
    assert_eq!(recalled.location.city.as_deref(), Some("Mountain View"));

    // Exactly one collaborator call: recall served from the cache.
    mock.assert_async().await;
}

#[tokio::test]
async fn corrupt_history_data_fails_open() {
    let server = mockito::Server::new_async().await;
    let dir = TempDir::new().unwrap();

    let storage = storage_in(&dir);
    storage
        .set(iptrack::history::HISTORY_KEY, "{definitely not json")
        .unwrap();

    let app = App::new(&config_for(&server), storage).unwrap();
    assert!(app.history().is_empty());
}
