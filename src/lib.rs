pub mod config;
pub mod err;
pub mod fees;
pub mod models;
pub mod repo;
pub mod students;
pub mod validate;

use axum::handler::Handler;
use axum::routing::{delete, get, post, put};
use axum::{Extension, Router};
use sqlx::PgPool;
use tower_http::cors::CorsLayer;

pub type RefStr = &'static str;

/// Assemble the application router. The pool is the one shared resource;
/// every handler receives it through the `Extension` layer.
pub fn app(pool: PgPool) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/register", post(students::register_student))
        .route("/api/students", get(students::list_students))
        .route("/api/students/:id", delete(students::delete_student))
        .route("/api/students_with_fees", get(students::students_with_fees))
        .route("/add_fee", post(fees::add_fee))
        .route("/update_fee/:fee_id", put(fees::update_fee))
        .route("/unpaid_fees", get(fees::unpaid_fees))
        .route("/all_fees", get(fees::all_fees))
        .fallback(err::handler404.into_service())
        .layer(Extension(pool))
        .layer(CorsLayer::permissive())
}

async fn index() -> RefStr {
    "FeeBook backend is up"
}
