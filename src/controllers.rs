use super::{
    auth, components,
    components::Component,
    errors::{AppError, ServerError},
    extractors::AuthenticatedUser,
    flash,
    models::AppState,
    notes, session,
};
use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Form,
};
use serde::Deserialize;

/// Redirect with a one-time flash message attached.
fn redirect(to: &str, message: &str) -> (StatusCode, HeaderMap) {
    let mut headers = HeaderMap::new();
    headers.insert(
        "Location",
        HeaderValue::from_str(to)
            .unwrap_or(HeaderValue::from_static("/")),
    );
    flash::set(&mut headers, message);

    (StatusCode::FOUND, headers)
}

/// Expected domain outcomes become a redirect plus flash message;
/// anything else is a real server error.
fn domain_redirect(err: AppError) -> Result<Response, ServerError> {
    match err {
        AppError::Internal(e) => Err(e.into()),
        AppError::Forbidden => Ok(redirect(
            "/",
            "you do not have permission to do that",
        )
        .into_response()),
        AppError::NotFound => {
            Ok(redirect("/", "that note does not exist").into_response())
        }
        AppError::Validation(msg) | AppError::Duplicate(msg) => {
            Ok(redirect("/", msg).into_response())
        }
        AppError::BadCredentials => {
            Ok(redirect("/login", "wrong email or password").into_response())
        }
    }
}

fn render_page(
    request_headers: &HeaderMap,
    title: &str,
    children: Box<dyn Component + '_>,
) -> Response {
    let (message, clear) = flash::take(request_headers);
    let mut response_headers = HeaderMap::new();
    response_headers.insert("Set-Cookie", clear);
    let body = components::Page {
        title,
        flash: message,
        children,
    }
    .render();

    (response_headers, body).into_response()
}

pub async fn get_registration_form(headers: HeaderMap) -> impl IntoResponse {
    render_page(
        &headers,
        "Register",
        Box::new(components::RegisterForm {}),
    )
}

#[derive(Deserialize)]
pub struct RegistrationForm {
    pub username: String,
    pub email: String,
    pub password: String,
}

pub async fn handle_registration(
    State(AppState { db, .. }): State<AppState>,
    Form(form): Form<RegistrationForm>,
) -> Result<Response, ServerError> {
    match auth::register(&db, &form.username, &form.email, &form.password)
        .await
    {
        Ok(_) => Ok(redirect("/login", "account created; you can now log in")
            .into_response()),
        Err(AppError::Duplicate(msg)) | Err(AppError::Validation(msg)) => {
            Ok(redirect("/register", msg).into_response())
        }
        Err(e) => domain_redirect(e),
    }
}

pub async fn get_login_form(headers: HeaderMap) -> impl IntoResponse {
    render_page(&headers, "Log in", Box::new(components::LoginForm {}))
}

#[derive(Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

pub async fn handle_login(
    State(AppState { db, config }): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Response, ServerError> {
    match auth::authenticate(&db, &form.email, &form.password).await {
        Ok(new_session) => {
            let token = session::serialize_session(
                &new_session,
                &config.session_secret,
            );
            let mut headers = HeaderMap::new();
            headers.insert("Location", HeaderValue::from_static("/"));
            headers.insert(
                "Set-Cookie",
                HeaderValue::from_str(&format!(
                    "session={token}; Path=/; HttpOnly"
                ))?,
            );
            flash::set(&mut headers, "you are now logged in");

            Ok((StatusCode::FOUND, headers).into_response())
        }
        Err(e) => domain_redirect(e),
    }
}

pub async fn logout(
    AuthenticatedUser(_user): AuthenticatedUser,
) -> impl IntoResponse {
    let mut headers = HeaderMap::new();
    headers.insert("Location", HeaderValue::from_static("/login"));
    headers.append(
        "Set-Cookie",
        HeaderValue::from_static("session=; Path=/; Max-Age=0"),
    );
    flash::set(&mut headers, "you have logged out");

    (StatusCode::FOUND, headers)
}

#[derive(Deserialize)]
pub struct HomeParams {
    sort: Option<String>,
    q: Option<String>,
}

pub async fn home(
    State(AppState { db, .. }): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Query(params): Query<HomeParams>,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    let sort = notes::NoteSort::from_param(params.sort.as_deref());
    let note_list =
        notes::list(&db, &user, params.q.as_deref(), sort).await?;

    Ok(render_page(
        &headers,
        "Your notes",
        Box::new(components::NoteList {
            notes: &note_list,
            search: params.q.as_deref().unwrap_or(""),
            sort: params.sort.as_deref().unwrap_or("date"),
        }),
    ))
}

pub async fn get_add_form(
    AuthenticatedUser(_user): AuthenticatedUser,
    headers: HeaderMap,
) -> impl IntoResponse {
    render_page(
        &headers,
        "Add a note",
        Box::new(components::NoteForm { note: None }),
    )
}

#[derive(Deserialize)]
pub struct NoteFormSubmission {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub tags: String,
}

pub async fn handle_add(
    State(AppState { db, .. }): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Form(form): Form<NoteFormSubmission>,
) -> Result<Response, ServerError> {
    match notes::create(&db, &user, &form.title, &form.content, &form.tags)
        .await
    {
        Ok(_) => Ok(redirect("/", "note added").into_response()),
        Err(e) => domain_redirect(e),
    }
}

pub async fn get_edit_form(
    State(AppState { db, .. }): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    match notes::get_owned(&db, &user, id).await {
        Ok(note) => Ok(render_page(
            &headers,
            "Edit note",
            Box::new(components::NoteForm { note: Some(&note) }),
        )),
        Err(e) => domain_redirect(e),
    }
}

pub async fn handle_edit(
    State(AppState { db, .. }): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<i64>,
    Form(form): Form<NoteFormSubmission>,
) -> Result<Response, ServerError> {
    match notes::update(
        &db,
        &user,
        id,
        &form.title,
        &form.content,
        &form.tags,
    )
    .await
    {
        Ok(_) => Ok(redirect("/", "note updated").into_response()),
        Err(e) => domain_redirect(e),
    }
}

pub async fn handle_delete(
    State(AppState { db, .. }): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<i64>,
) -> Result<Response, ServerError> {
    match notes::delete(&db, &user, id).await {
        Ok(()) => Ok(redirect("/", "note deleted").into_response()),
        Err(e) => domain_redirect(e),
    }
}
