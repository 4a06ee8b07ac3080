use super::{
    db_ops,
    errors::ServerError,
    models::{self, AppState, Identifiable},
    session,
};
use async_trait::async_trait;
use axum::{
    extract::{FromRef, FromRequestParts},
    http::{request::Parts, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use regex::Regex;

/// Extractor for routes that require an authenticated user. The session
/// cookie is verified and the embedded user id re-resolved against the
/// database on every request, so a stale cookie for a deleted user is
/// treated as anonymous. An anonymous request is redirected to the login
/// page with no side effects; a store failure during the lookup is a
/// server error, not a redirect.
pub struct AuthenticatedUser(pub models::User);

fn redirect_to_login() -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(
        "Location",
        HeaderValue::from_str("/login").expect("that is ascii, I promise"),
    );

    (StatusCode::FOUND, headers).into_response()
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(
        req: &mut Parts,
        state: &S,
    ) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);
        let cookie = req
            .headers
            .get("Cookie")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");
        let re = Regex::new(r"session=([^;]*)").expect("regex compiles");
        let captures = match re.captures(cookie) {
            Some(c) => c,
            None => return Err(redirect_to_login()),
        };
        let token = &captures[1];
        let session = match session::deserialize_session(
            token,
            &state.config.session_secret,
        ) {
            Ok(s) => s,
            Err(_) => return Err(redirect_to_login()),
        };

        match db_ops::get_user_by_id(&state.db, session.user.identity()).await
        {
            Ok(Some(user)) => Ok(AuthenticatedUser(user)),
            Ok(None) => Err(redirect_to_login()),
            Err(e) => Err(ServerError::from(e).into_response()),
        }
    }
}
