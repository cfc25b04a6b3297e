//! End-to-end tests against a server bound to an ephemeral port

use std::{path::PathBuf, sync::Arc};

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use tokio::net::TcpListener;

use fieldbook::{
    AppState, Config,
    config::{BookingConfig, JwtConfig, LogFormat, ServerConfig, StorageConfig},
    create_router,
    db::{MemoryPersistence, Store, repositories::UserRepository},
    models::{Role, User},
    utils::{FixedClock, hash_password},
};

struct TestServer {
    base: String,
    client: Client,
}

fn test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            rust_log: "warn".to_string(),
            log_format: LogFormat::Text,
        },
        storage: StorageConfig {
            db_file: PathBuf::from("unused.json"),
        },
        jwt: JwtConfig {
            secret: "integration_test_secret".to_string(),
            expiry_hours: 1,
        },
        booking: BookingConfig {
            admin_password: "admin".to_string(),
            auto_reset_hour: None,
        },
    }
}

/// Accounts: `admin` and `admin2` (admins), `ombrellone5` with 3 credits,
/// `ombrellone6` with 1 credit. Every password equals the username.
async fn spawn_app() -> TestServer {
    let store = Store::open(Arc::new(MemoryPersistence::new())).await.unwrap();

    let mut accounts = Vec::new();
    for (name, role, credits) in [
        ("admin", Role::Admin, 0),
        ("admin2", Role::Admin, 0),
        ("ombrellone5", Role::User, 3),
        ("ombrellone6", Role::User, 1),
    ] {
        let mut user = User::new(hash_password(name).unwrap(), role);
        user.credits = credits;
        accounts.push((name, user));
    }
    store
        .transaction(|db| {
            for (name, user) in accounts {
                UserRepository::upsert(db, name, user);
            }
            Ok(())
        })
        .await
        .unwrap();

    let clock = FixedClock::at("2025-06-30 10:00").unwrap();
    let state = AppState::with_clock(store, test_config(), Arc::new(clock));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, create_router(state)).await.unwrap();
    });

    TestServer {
        base: format!("http://{addr}/api"),
        client: Client::new(),
    }
}

impl TestServer {
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    async fn login(&self, username: &str, password: &str) -> reqwest::Response {
        self.client
            .post(self.url("/login"))
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await
            .unwrap()
    }

    async fn token(&self, username: &str) -> String {
        let body: Value = self.login(username, username).await.json().await.unwrap();
        body["access_token"].as_str().unwrap().to_string()
    }

    async fn book(&self, token: &str, field: &str, date: &str, time: &str) -> reqwest::Response {
        self.client
            .post(self.url("/reservations"))
            .bearer_auth(token)
            .json(&json!({ "field": field, "date": date, "time": time }))
            .send()
            .await
            .unwrap()
    }
}

async fn error_code(response: reqwest::Response) -> String {
    let body: Value = response.json().await.unwrap();
    body["error"]["code"].as_str().unwrap_or_default().to_string()
}

#[tokio::test]
async fn test_ping_and_health() {
    let app = spawn_app().await;

    let ping = app.client.get(app.url("/ping")).send().await.unwrap();
    assert_eq!(ping.status(), StatusCode::OK);

    let health: Value = app
        .client
        .get(app.url("/health"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(health["status"], "healthy");
    assert_eq!(health["users"], 4);
}

#[tokio::test]
async fn test_login_errors() {
    let app = spawn_app().await;

    let missing = app
        .client
        .post(app.url("/login"))
        .json(&json!({ "username": "ombrellone5" }))
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::BAD_REQUEST);

    let unknown = app.login("nobody", "x").await;
    assert_eq!(unknown.status(), StatusCode::NOT_FOUND);

    let wrong = app.login("ombrellone5", "nope").await;
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
    let body: Value = wrong.json().await.unwrap();
    assert_eq!(body["error"]["code"], "WRONG_PASSWORD");
}

#[tokio::test]
async fn test_admin_lockout_and_reenable() {
    let app = spawn_app().await;

    for expected in [2, 1, 0] {
        let response = app.login("admin2", "bad").await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["error"]["details"]["remaining"], expected);
    }

    let locked = app.login("admin2", "admin2").await;
    assert_eq!(locked.status(), StatusCode::FORBIDDEN);
    assert_eq!(error_code(locked).await, "USER_DISABLED");

    let admin = app.token("admin").await;
    let enabled = app
        .client
        .patch(app.url("/users/admin2/status"))
        .bearer_auth(&admin)
        .json(&json!({ "disabled": false }))
        .send()
        .await
        .unwrap();
    assert_eq!(enabled.status(), StatusCode::OK);

    assert_eq!(app.login("admin2", "admin2").await.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_booking_flow() {
    let app = spawn_app().await;
    let guest = app.token("ombrellone5").await;
    let other = app.token("ombrellone6").await;

    let unauthenticated = app
        .client
        .post(app.url("/reservations"))
        .json(&json!({ "field": "BeachVolley", "date": "2025-07-01", "time": "09:30" }))
        .send()
        .await
        .unwrap();
    assert_eq!(unauthenticated.status(), StatusCode::UNAUTHORIZED);

    let created = app.book(&guest, "BeachVolley", "2025-07-01", "09:30").await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let body: Value = created.json().await.unwrap();
    assert_eq!(body["credits"], 2);
    assert_eq!(body["reservation"]["user"], "ombrellone5");
    let id = body["reservation"]["id"].as_str().unwrap().to_string();

    let taken = app.book(&other, "BeachVolley", "2025-07-01", "09:30").await;
    assert_eq!(taken.status(), StatusCode::CONFLICT);
    assert_eq!(error_code(taken).await, "SLOT_ALREADY_BOOKED");

    let past = app.book(&other, "Calcio", "2025-06-29", "09:30").await;
    assert_eq!(past.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let listed: Vec<Value> = app
        .client
        .get(app.url("/reservations?date=2025-07-01"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);

    let foreign = app
        .client
        .delete(app.url(&format!("/reservations/{id}")))
        .bearer_auth(&other)
        .send()
        .await
        .unwrap();
    assert_eq!(foreign.status(), StatusCode::FORBIDDEN);

    let cancelled = app
        .client
        .delete(app.url(&format!("/reservations/{id}")))
        .bearer_auth(&guest)
        .send()
        .await
        .unwrap();
    assert_eq!(cancelled.status(), StatusCode::OK);
    let body: Value = cancelled.json().await.unwrap();
    assert_eq!(body["refunded"], true);
    assert_eq!(body["credits"], 3);
}

#[tokio::test]
async fn test_same_day_cancel_needs_confirmation() {
    let app = spawn_app().await;
    let guest = app.token("ombrellone5").await;

    let body: Value = app
        .book(&guest, "Multi", "2025-06-30", "18:30")
        .await
        .json()
        .await
        .unwrap();
    let id = body["reservation"]["id"].as_str().unwrap().to_string();

    let unconfirmed = app
        .client
        .delete(app.url(&format!("/reservations/{id}")))
        .bearer_auth(&guest)
        .send()
        .await
        .unwrap();
    assert_eq!(unconfirmed.status(), StatusCode::PRECONDITION_REQUIRED);

    let confirmed: Value = app
        .client
        .delete(app.url(&format!("/reservations/{id}?confirm_forfeit=true")))
        .bearer_auth(&guest)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(confirmed["refunded"], false);
    assert_eq!(confirmed["credits"], 2);
}

#[tokio::test]
async fn test_logout_revokes_token() {
    let app = spawn_app().await;
    let guest = app.token("ombrellone5").await;

    let logout = app
        .client
        .post(app.url("/logout"))
        .bearer_auth(&guest)
        .send()
        .await
        .unwrap();
    assert_eq!(logout.status(), StatusCode::OK);

    let after = app
        .client
        .get(app.url("/users/ombrellone5/credits"))
        .bearer_auth(&guest)
        .send()
        .await
        .unwrap();
    assert_eq!(after.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_user_endpoints_authorization() {
    let app = spawn_app().await;
    let guest = app.token("ombrellone5").await;
    let admin = app.token("admin").await;

    let list = app
        .client
        .get(app.url("/users"))
        .bearer_auth(&guest)
        .send()
        .await
        .unwrap();
    assert_eq!(list.status(), StatusCode::FORBIDDEN);

    let other = app
        .client
        .get(app.url("/users/ombrellone6/credits"))
        .bearer_auth(&guest)
        .send()
        .await
        .unwrap();
    assert_eq!(other.status(), StatusCode::FORBIDDEN);

    let adjusted: Value = app
        .client
        .patch(app.url("/users/ombrellone6/credits"))
        .bearer_auth(&admin)
        .json(&json!({ "delta": -5 }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(adjusted["credits"], 0);

    let created = app
        .client
        .put(app.url("/users/ospite1"))
        .bearer_auth(&admin)
        .json(&json!({ "password": "ospite1", "credits": 4 }))
        .send()
        .await
        .unwrap();
    assert_eq!(created.status(), StatusCode::OK);
    assert_eq!(app.login("ospite1", "ospite1").await.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_admin_content() {
    let app = spawn_app().await;
    let admin = app.token("admin").await;
    let guest = app.token("ombrellone5").await;

    let fields: Value = app
        .client
        .get(app.url("/admin/fields"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(fields["fields"].as_array().unwrap().len(), 3);

    let forbidden = app
        .client
        .put(app.url("/admin/notes"))
        .bearer_auth(&guest)
        .json(&json!({ "text": "hello" }))
        .send()
        .await
        .unwrap();
    assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);

    let unknown = app
        .client
        .put(app.url("/admin/images"))
        .bearer_auth(&admin)
        .json(&json!({ "image99URL": "x" }))
        .send()
        .await
        .unwrap();
    assert_eq!(unknown.status(), StatusCode::BAD_REQUEST);

    let not_array = app
        .client
        .put(app.url("/admin/fields"))
        .bearer_auth(&admin)
        .json(&json!({ "fields": "Padel" }))
        .send()
        .await
        .unwrap();
    assert_eq!(not_array.status(), StatusCode::BAD_REQUEST);

    let config = app
        .client
        .put(app.url("/admin/config"))
        .bearer_auth(&admin)
        .json(&json!({ "maxBookingsPerUser": 1 }))
        .send()
        .await
        .unwrap();
    assert_eq!(config.status(), StatusCode::OK);

    app.book(&guest, "Calcio", "2025-07-02", "08:00").await;
    let capped = app.book(&guest, "Calcio", "2025-07-02", "08:45").await;
    assert_eq!(capped.status(), StatusCode::CONFLICT);
    assert_eq!(error_code(capped).await, "BOOKING_LIMIT_REACHED");
}

#[tokio::test]
async fn test_malformed_bodies_use_error_envelope() {
    let app = spawn_app().await;
    let admin = app.token("admin").await;

    let broken_login = app
        .client
        .post(app.url("/login"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(broken_login.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_code(broken_login).await, "VALIDATION_ERROR");

    let fractional = app
        .client
        .patch(app.url("/users/ombrellone5/credits"))
        .bearer_auth(&admin)
        .json(&json!({ "delta": 1.5 }))
        .send()
        .await
        .unwrap();
    assert_eq!(fractional.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_code(fractional).await, "VALIDATION_ERROR");

    let bad_flag = app
        .client
        .delete(app.url("/reservations/6f1c2d3e-4a5b-4c6d-8e7f-9a0b1c2d3e4f"))
        .bearer_auth(&admin)
        .query(&[("confirm_forfeit", "maybe")])
        .send()
        .await
        .unwrap();
    assert_eq!(bad_flag.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_code(bad_flag).await, "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_status_without_flag_enables_account() {
    let app = spawn_app().await;
    let admin = app.token("admin").await;

    let disable = app
        .client
        .patch(app.url("/users/ombrellone5/status"))
        .bearer_auth(&admin)
        .json(&json!({ "disabled": true }))
        .send()
        .await
        .unwrap();
    assert_eq!(disable.status(), StatusCode::OK);

    let enable = app
        .client
        .patch(app.url("/users/ombrellone5/status"))
        .bearer_auth(&admin)
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(enable.status(), StatusCode::OK);
    let body: Value = enable.json().await.unwrap();
    assert_eq!(body["disabled"], false);

    assert_eq!(app.login("ombrellone5", "ombrellone5").await.status(), StatusCode::OK);
}
