pub mod health;
pub mod posts;

use crate::{
    AppState,
    error::{catch_panic, route_not_found, shape_errors},
};
use axum::{
    Router,
    extract::Request,
    middleware::{self, Next},
    response::Response,
    routing::{get, patch},
};
use std::time::Instant;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/posts", post_routes())
        .route("/health", get(health::health).fallback(route_not_found))
        .fallback(route_not_found)
        .layer(middleware::from_fn(catch_panic))
        .layer(middleware::from_fn_with_state(state.clone(), shape_errors))
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

pub fn post_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(posts::get_posts)
                .post(posts::create_post)
                .fallback(route_not_found),
        )
        .route(
            "/{id}",
            get(posts::get_one_post)
                .put(posts::update_post)
                .delete(posts::delete_post)
                .fallback(route_not_found),
        )
        .route(
            "/{id}/publish",
            patch(posts::toggle_publish).fallback(route_not_found),
        )
}

async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(request).await;

    tracing::info!(
        %method,
        %path,
        status = response.status().as_u16(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "request"
    );
    response
}
