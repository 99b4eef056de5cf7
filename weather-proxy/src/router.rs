//! Router configuration: routes plus CORS and request tracing.

use axum::{Router, routing::get};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // Browser front ends on other origins call these routes directly; GET only.
    let cors = CorsLayer::new().allow_origin(Any).allow_methods([axum::http::Method::GET]);

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/weather", get(handlers::weather_by_city))
        .route("/weather/coords", get(handlers::weather_by_coords))
        .route("/forecast", get(handlers::forecast_by_coords))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
