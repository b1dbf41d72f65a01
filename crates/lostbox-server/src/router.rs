use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::handlers::{self, AppState};

/// Build the axum router with every lostbox endpoint under `/api`.
pub fn build_router(state: AppState, config: &ServerConfig) -> Router {
    let api = Router::new()
        .route("/health", get(handlers::health))
        .route("/lists", post(handlers::create_list).get(handlers::all_lists))
        .route(
            "/lists/:id",
            get(handlers::get_list)
                .patch(handlers::rename_list)
                .delete(handlers::delete_list),
        )
        .route(
            "/lists/:id/items",
            get(handlers::list_items).post(handlers::register_item),
        )
        .route(
            "/lists/:id/items/:itemId",
            axum::routing::patch(handlers::update_comment).delete(handlers::soft_delete_item),
        )
        .route("/lists/:id/items/:itemId/restore", post(handlers::restore_item))
        .route("/images/:listId/:name", get(handlers::get_image));

    let mut router = Router::new()
        .nest("/api", api)
        .layer(DefaultBodyLimit::max(config.max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    if config.allow_cross_origin {
        router = router.layer(CorsLayer::permissive());
    }
    router
}
