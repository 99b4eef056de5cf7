//! HTTP handlers. Each one makes at most one outbound provider call.

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use serde_json::Value;
use weather_core::{Coordinates, model::FORECAST_COUNT};

use crate::dto::{CityQuery, CoordsQuery, ForecastQuery, HealthResponse, WeatherEnvelope};
use crate::error::ProxyError;
use crate::state::AppState;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, ProxyError>;

/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// GET /weather?city=<name>
///
/// Current weather by city name, wrapped in the success envelope.
pub async fn weather_by_city(
    State(state): State<AppState>,
    query: Result<Query<CityQuery>, QueryRejection>,
) -> HandlerResult<WeatherEnvelope> {
    let provider = state.provider()?;
    let Query(query) = query?;
    let city = query.city_or_default();

    tracing::info!(%city, "relaying current weather");
    let weather = provider.current_by_name(&city).await?;

    Ok(Json(WeatherEnvelope::new(city, weather)))
}

/// GET /weather/coords?lat=&lon=&units=
pub async fn weather_by_coords(
    State(state): State<AppState>,
    query: Result<Query<CoordsQuery>, QueryRejection>,
) -> HandlerResult<Value> {
    let provider = state.provider()?;
    let Query(query) = query?;
    let coords = Coordinates { lat: query.lat, lon: query.lon };

    tracing::info!(%coords, units = %query.units, "relaying current weather by coordinates");
    let body = provider.current_by_coords(coords, query.units).await?;

    Ok(Json(body))
}

/// GET /forecast?lat=&lon=&units=&cnt=
pub async fn forecast_by_coords(
    State(state): State<AppState>,
    query: Result<Query<ForecastQuery>, QueryRejection>,
) -> HandlerResult<Value> {
    let provider = state.provider()?;
    let Query(query) = query?;
    let coords = Coordinates { lat: query.lat, lon: query.lon };
    let count = query.cnt.unwrap_or(FORECAST_COUNT);

    tracing::info!(%coords, units = %query.units, count, "relaying forecast");
    let body = provider.forecast_by_coords(coords, query.units, count).await?;

    Ok(Json(body))
}
