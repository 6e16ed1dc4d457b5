use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;

use crate::api::handlers;
use crate::model::{Document, User};
use crate::store::traits::Store;

pub fn create_router<S: Store + 'static>() -> Router<Arc<S>> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Account holder records
        .route("/api/users", get(handlers::list_records::<User, S>))
        .route("/api/users", post(handlers::create_record::<User, S>))
        .route("/api/users/find", get(handlers::find_records::<User, S>))
        .route("/api/users/:id", get(handlers::get_record::<User, S>))
        .route("/api/users/:id", put(handlers::update_record::<User, S>))
        .route("/api/users/:id", delete(handlers::delete_record::<User, S>))
        // Archived bank report records
        .route("/api/documents", get(handlers::list_records::<Document, S>))
        .route("/api/documents", post(handlers::create_record::<Document, S>))
        .route(
            "/api/documents/find",
            get(handlers::find_records::<Document, S>),
        )
        .route("/api/documents/:id", get(handlers::get_record::<Document, S>))
        .route(
            "/api/documents/:id",
            put(handlers::update_record::<Document, S>),
        )
        .route(
            "/api/documents/:id",
            delete(handlers::delete_record::<Document, S>),
        )
}
