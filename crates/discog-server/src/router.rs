use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use discog_records::Catalog;

use crate::handler;

/// Build the axum router with all catalog endpoints.
pub fn build_router(catalog: Catalog) -> Router {
    Router::new()
        .route("/v1/health", get(handler::health_handler))
        .route("/v1/info", get(handler::info_handler))
        .route(
            "/v1/albums",
            get(handler::list_albums).post(handler::create_album),
        )
        .route(
            "/v1/albums/:id",
            get(handler::get_album)
                .put(handler::update_album)
                .delete(handler::delete_album),
        )
        .route("/v1/users", post(handler::register_user))
        .route("/v1/login", post(handler::login))
        .layer(TraceLayer::new_for_http())
        .with_state(catalog)
}
