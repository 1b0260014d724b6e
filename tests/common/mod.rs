#![allow(dead_code)]

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response, header},
};
use axum_extra::extract::cookie::Key;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde_json::Value;
use spinwheel::config::Config;
use spinwheel::router::{WheelState, wheel_router};
use spinwheel::service::bootstrap::seed_admin;
use spinwheel::{SpinEngine, WheelStorage};
use std::{
    fs,
    path::PathBuf,
    sync::atomic::{AtomicU32, Ordering},
    time::{SystemTime, UNIX_EPOCH},
};
use tower::ServiceExt;

pub const ADMIN_USER: &str = "admin";
pub const ADMIN_PASSWORD: &str = "admin123";

static DB_COUNTER: AtomicU32 = AtomicU32::new(0);

/// A router over a throwaway SQLite file, seeded with the default admin.
pub struct TestApp {
    pub app: Router,
    pub storage: WheelStorage,
    db_path: PathBuf,
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.db_path);
    }
}

pub async fn temp_storage(tag: &str) -> (WheelStorage, PathBuf) {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before UNIX_EPOCH")
        .as_nanos();

    let mut temp_path = std::env::temp_dir();
    temp_path.push(format!(
        "spinwheel-{tag}-{}-{}-{}.sqlite",
        std::process::id(),
        nanos,
        DB_COUNTER.fetch_add(1, Ordering::Relaxed)
    ));

    let database_url = format!("sqlite:{}", temp_path.display());
    let storage = WheelStorage::connect(&database_url)
        .await
        .expect("failed to open test database");
    (storage, temp_path)
}

pub async fn spawn_app(tag: &str) -> TestApp {
    spawn_app_with(tag, |_| {}).await
}

pub async fn spawn_app_with(tag: &str, configure: impl FnOnce(&mut Config)) -> TestApp {
    let (storage, db_path) = temp_storage(tag).await;

    let mut cfg = Config::default();
    cfg.basic.insecure_cookie = true;
    configure(&mut cfg);
    seed_admin(&storage, &cfg.admin)
        .await
        .expect("failed to seed admin");

    let spinner = SpinEngine::with_rng(storage.clone(), StdRng::seed_from_u64(7));
    let state = WheelState::with_spinner(storage.clone(), spinner, Key::generate(), &cfg);

    TestApp {
        app: wheel_router(state),
        storage,
        db_path,
    }
}

impl TestApp {
    pub async fn send(&self, req: Request<Body>) -> Response<Body> {
        self.app
            .clone()
            .oneshot(req)
            .await
            .expect("request failed")
    }

    /// Logs in and returns the `name=value` pair to send back as a cookie.
    pub async fn login(&self, username: &str, password: &str) -> Option<String> {
        let resp = self
            .send(
                Request::builder()
                    .method("POST")
                    .uri("/login")
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from(format!("username={username}&password={password}")))
                    .expect("failed to build request"),
            )
            .await;
        session_cookie(&resp)
    }

    pub async fn admin_cookie(&self) -> String {
        self.login(ADMIN_USER, ADMIN_PASSWORD)
            .await
            .expect("admin login did not set a session cookie")
    }

    pub async fn json(
        &self,
        method: &str,
        uri: &str,
        body: Value,
        cookie: Option<&str>,
    ) -> Response<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(
            builder
                .body(Body::from(body.to_string()))
                .expect("failed to build request"),
        )
        .await
    }

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> Response<Body> {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::empty()).expect("failed to build request"))
            .await
    }

    pub async fn spin(&self) -> Value {
        let resp = self
            .send(
                Request::builder()
                    .method("POST")
                    .uri("/api/spin")
                    .body(Body::empty())
                    .expect("failed to build request"),
            )
            .await;
        assert!(resp.status().is_success());
        body_json(resp).await["result"].clone()
    }

    pub async fn names(&self) -> Vec<String> {
        let resp = self.get("/api/names", None).await;
        serde_json::from_value(body_json(resp).await).expect("names were not a string array")
    }

    pub async fn upload(&self, filename: Option<&str>, content: &[u8]) -> Response<Body> {
        match filename {
            Some(name) => {
                self.upload_part(&format!(r#"name="file"; filename="{name}""#), content)
                    .await
            }
            None => self.upload_part(r#"name="note""#, content).await,
        }
    }

    /// Sends one multipart part with the given `Content-Disposition` parameters.
    pub async fn upload_part(&self, disposition: &str, content: &[u8]) -> Response<Body> {
        let boundary = "----spinwheel-test-boundary";
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; {disposition}\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(content);
        body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

        self.send(
            Request::builder()
                .method("POST")
                .uri("/upload")
                .header(
                    header::CONTENT_TYPE,
                    format!("multipart/form-data; boundary={boundary}"),
                )
                .body(Body::from(body))
                .expect("failed to build request"),
        )
        .await
    }
}

pub fn session_cookie(resp: &Response<Body>) -> Option<String> {
    resp.headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("wheel_session="))
        .and_then(|v| v.split(';').next())
        .map(str::to_string)
}

pub async fn body_json(resp: Response<Body>) -> Value {
    let body = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    serde_json::from_slice(&body).expect("response body was not JSON")
}

pub async fn body_text(resp: Response<Body>) -> String {
    let body = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    String::from_utf8(body.to_vec()).expect("response body was not utf-8")
}
