use axum::middleware::from_fn;
use dotenvy::dotenv;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::{net::SocketAddr, str::FromStr};

mod auth;
mod components;
mod config;
mod controllers;
mod crypto;
mod db_ops;
mod errors;
mod extractors;
mod flash;
mod middleware;
mod models;
mod notes;
mod pw;
mod routes;
mod session;

#[tokio::main]
async fn main() {
    dotenv().ok();

    let config = config::Config::from_env()
        .expect("config can be loaded from the environment");
    let db = create_sqlite_pool(&config.database_url).await;
    db_ops::create_schema(&db)
        .await
        .expect("schema can be created");

    let port = config.port;
    let state = models::AppState { db, config };
    let app = routes::get_routes()
        .layer(from_fn(middleware::set_html_content_type))
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    println!("listening on {}", addr);
    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await
        .unwrap();
}

async fn create_sqlite_pool(url: &str) -> sqlx::SqlitePool {
    let options = SqliteConnectOptions::from_str(url)
        .expect("database url to be a valid sqlite connection string")
        .create_if_missing(true);

    SqlitePoolOptions::new()
        .max_connections(8)
        .connect_with(options)
        .await
        .expect("pool to be able to connect")
}
