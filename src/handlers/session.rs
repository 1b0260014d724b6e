use axum::{
    Form,
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::PrivateCookieJar;
use tracing::info;

use crate::handlers::pages::LOGIN_HTML;
use crate::middleware::auth::{AdminSession, clear_session_cookie, session_cookie};
use crate::service::password::verify_password;
use crate::types::api::LoginForm;
use crate::{WheelError, router::WheelState};

pub async fn login_page() -> Html<&'static str> {
    Html(LOGIN_HTML)
}

/// POST /login -> sets the session cookie and redirects to /admin, or shows the form again.
pub async fn login(
    State(state): State<WheelState>,
    jar: PrivateCookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response, WheelError> {
    let user = state.storage.find_user_by_username(&form.username).await?;

    if let Some(user) = user
        && verify_password(&form.password, &user.password_hash).await?
    {
        info!(user_id = user.id, username = %user.username, "admin logged in");
        let jar = jar.add(session_cookie(user.id, &state));
        return Ok((jar, Redirect::to("/admin")).into_response());
    }

    info!(username = %form.username, "login rejected");
    Ok(Html(LOGIN_HTML).into_response())
}

pub async fn logout(session: AdminSession, jar: PrivateCookieJar) -> impl IntoResponse {
    info!(user_id = session.user_id, "admin logged out");
    (jar.remove(clear_session_cookie()), Redirect::to("/"))
}
