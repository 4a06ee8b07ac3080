use super::{controllers, models};
use axum::routing::{get, post, Router};

#[rustfmt::skip]
pub fn get_routes() -> Router<models::AppState> {
    Router::new()
        .route("/", get(controllers::home))
        .route("/register", get(controllers::get_registration_form))
        .route("/register", post(controllers::handle_registration))
        .route("/login", get(controllers::get_login_form))
        .route("/login", post(controllers::handle_login))
        .route("/logout", get(controllers::logout))
        .route("/add", get(controllers::get_add_form))
        .route("/add", post(controllers::handle_add))
        .route("/edit/:id", get(controllers::get_edit_form))
        .route("/edit/:id", post(controllers::handle_edit))
        .route("/delete/:id", post(controllers::handle_delete))
}
