#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use event_buddy::config::UploadConfig;
use event_buddy::routes::{router, AppState};
use event_buddy::session::SessionStore;
use http_body_util::BodyExt;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tower::util::ServiceExt;

pub const TEST_PEPPER: &str = "integration-test-pepper-value";

/// In-memory database with all migrations applied. A single connection
/// because each `:memory:` connection is its own database.
pub async fn setup_test_db() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();

    sqlx::migrate!("./migrations").run(&pool).await.unwrap();

    pool
}

pub struct TestApp {
    pub router: Router,
    pub pool: SqlitePool,
}

pub async fn create_test_app() -> TestApp {
    let pool = setup_test_db().await;

    let upload_dir = std::env::temp_dir()
        .join(format!("event-buddy-test-{}", uuid::Uuid::new_v4()))
        .to_string_lossy()
        .into_owned();

    let state = AppState {
        pool: pool.clone(),
        sessions: SessionStore::new(),
        pepper: TEST_PEPPER.to_string(),
        upload: UploadConfig {
            dir: upload_dir,
            max_bytes: 1024 * 1024,
        },
    };

    TestApp {
        router: router(state),
        pool,
    }
}

impl TestApp {
    async fn send(&self, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> (StatusCode, serde_json::Value) {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header("cookie", cookie);
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    pub async fn post_json(
        &self,
        uri: &str,
        body: serde_json::Value,
        cookie: Option<&str>,
    ) -> (StatusCode, serde_json::Value) {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json");
        if let Some(cookie) = cookie {
            builder = builder.header("cookie", cookie);
        }
        self.send(builder.body(Body::from(body.to_string())).unwrap())
            .await
    }

    pub async fn post_raw(
        &self,
        uri: &str,
        content_type: &str,
        body: Vec<u8>,
        cookie: Option<&str>,
    ) -> (StatusCode, serde_json::Value) {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", content_type);
        if let Some(cookie) = cookie {
            builder = builder.header("cookie", cookie);
        }
        self.send(builder.body(Body::from(body)).unwrap()).await
    }

    /// Sign up and sign in one user, returning the session cookie to send on
    /// protected calls.
    pub async fn signup_and_signin(&self, email: &str, password: &str) -> String {
        let (status, body) = self
            .get(&format!("/signup?email={email}&pass={password}"), None)
            .await;
        assert_eq!(status, StatusCode::OK, "signup failed: {body}");

        self.signin(email, password).await
    }

    pub async fn signin(&self, email: &str, password: &str) -> String {
        let request = Request::builder()
            .method("GET")
            .uri(format!("/signin?email={email}&pass={password}"))
            .body(Body::empty())
            .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let set_cookie = response
            .headers()
            .get("set-cookie")
            .expect("signin should set a session cookie")
            .to_str()
            .unwrap();

        set_cookie
            .split(';')
            .next()
            .expect("cookie pair")
            .to_string()
    }
}
