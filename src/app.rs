use crate::handlers;
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route(
            "/api/data",
            get(handlers::list_reports)
                .post(handlers::create_report)
                .put(handlers::update_report)
                .delete(handlers::delete_report),
        )
        .route("/api/dashboard", get(handlers::get_dashboard))
        .with_state(state)
}
