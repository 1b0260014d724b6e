use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, Key, PrivateCookieJar, SameSite};
use tracing::debug;

use crate::router::WheelState;

pub const SESSION_COOKIE: &str = "wheel_session";

/// Proof of a logged-in admin. Extracting it from a request without a valid
/// session cookie redirects the caller to `/login`.
#[derive(Debug, Clone, Copy)]
pub struct AdminSession {
    pub user_id: i64,
}

impl FromRequestParts<WheelState> for AdminSession {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &WheelState,
    ) -> Result<Self, Self::Rejection> {
        let jar = match PrivateCookieJar::<Key>::from_request_parts(parts, state).await {
            Ok(jar) => jar,
            Err(never) => match never {},
        };

        let Some(user_id) = jar
            .get(SESSION_COOKIE)
            .and_then(|c| c.value().parse::<i64>().ok())
        else {
            return Err(Redirect::to("/login").into_response());
        };

        match state.storage.get_user_by_id(user_id).await {
            Ok(Some(_)) => Ok(Self { user_id }),
            Ok(None) => {
                debug!(user_id, "session names a user that no longer exists");
                Err(Redirect::to("/login").into_response())
            }
            Err(err) => Err(err.into_response()),
        }
    }
}

pub fn session_cookie(user_id: i64, state: &WheelState) -> Cookie<'static> {
    Cookie::build(Cookie::new(SESSION_COOKIE, user_id.to_string()))
        .path("/")
        .http_only(true)
        .secure(!state.insecure_cookie)
        .same_site(SameSite::Lax)
        .max_age(state.session_ttl)
        .build()
}

pub fn clear_session_cookie() -> Cookie<'static> {
    Cookie::build(Cookie::new(SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}
