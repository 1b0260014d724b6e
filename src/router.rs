use axum::{
    Router,
    extract::{DefaultBodyLimit, FromRef},
    routing::{get, post},
};
use axum_extra::extract::cookie::Key;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::db::WheelStorage;
use crate::handlers::{admin, names, pages, session, spin, upload};
use crate::service::spin::SpinEngine;

#[derive(Clone)]
pub struct WheelState {
    pub storage: WheelStorage,
    pub spinner: SpinEngine,
    pub cookie_key: Key,
    pub insecure_cookie: bool,
    pub session_ttl: time::Duration,
    pub max_upload_bytes: usize,
}

impl WheelState {
    pub fn new(storage: WheelStorage, cookie_key: Key, cfg: &Config) -> Self {
        let spinner = SpinEngine::new(storage.clone());
        Self::with_spinner(storage, spinner, cookie_key, cfg)
    }

    pub fn with_spinner(
        storage: WheelStorage,
        spinner: SpinEngine,
        cookie_key: Key,
        cfg: &Config,
    ) -> Self {
        Self {
            storage,
            spinner,
            cookie_key,
            insecure_cookie: cfg.basic.insecure_cookie,
            session_ttl: cfg.session_ttl(),
            max_upload_bytes: cfg.upload.max_bytes,
        }
    }
}

impl FromRef<WheelState> for Key {
    fn from_ref(state: &WheelState) -> Self {
        state.cookie_key.clone()
    }
}

pub fn wheel_router(state: WheelState) -> Router {
    let upload_limit = DefaultBodyLimit::max(state.max_upload_bytes);

    Router::new()
        .route("/", get(pages::index))
        .route("/static/js/wheel.js", get(pages::wheel_js))
        .route("/admin", get(pages::admin))
        .route("/login", get(session::login_page).post(session::login))
        .route("/logout", get(session::logout))
        .route(
            "/api/names",
            get(names::list_names).delete(names::delete_name_by_value),
        )
        .route("/api/spin", post(spin::spin))
        .route(
            "/api/admin/names",
            post(admin::add_name)
                .put(admin::rename_name)
                .delete(admin::delete_name),
        )
        .route("/api/admin/lock-result", post(admin::lock_result))
        .route("/upload", post(upload::upload_file).layer(upload_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
