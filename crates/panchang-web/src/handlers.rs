//! `/api/panchang` and `/health` handlers.

use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::Json;
use panchang_core::{
    AlmanacRecord, CoreError, ObservationConfig, PanchangRequest, ValidationError,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{info_span, Instrument};
use uuid::Uuid;

use crate::error::ApiError;
use crate::AppState;

/// POST body. Everything is optional so missing fields can be named in the
/// error instead of failing deserialization.
#[derive(Debug, Default, Deserialize)]
pub struct PanchangBody {
    pub year: Option<i64>,
    pub month: Option<i64>,
    pub date: Option<i64>,
    pub hours: Option<i64>,
    pub minutes: Option<i64>,
    pub seconds: Option<i64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub timezone: Option<f64>,
    pub config: Option<ObservationConfig>,
}

impl PanchangBody {
    fn into_request(self) -> Result<PanchangRequest, ApiError> {
        let year = required("year", self.year)?;
        let month = required("month", self.month)?;
        let date = required("date", self.date)?;
        let latitude = required("latitude", self.latitude)?;
        let longitude = required("longitude", self.longitude)?;

        let request = PanchangRequest::new(
            narrow("year", year)?,
            narrow("month", month)?,
            narrow("date", date)?,
            latitude,
            longitude,
        )?;

        let hours = narrow("hours", self.hours.unwrap_or(6))?;
        let minutes = narrow("minutes", self.minutes.unwrap_or(0))?;
        let seconds = narrow("seconds", self.seconds.unwrap_or(0))?;

        let mut request = request.with_time(hours, minutes, seconds)?;
        if let Some(timezone) = self.timezone {
            request = request.with_timezone(timezone)?;
        }
        if let Some(config) = self.config {
            request = request.with_config(config);
        }
        Ok(request)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct PanchangQuery {
    pub date: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl PanchangQuery {
    fn into_request(self) -> Result<PanchangRequest, ApiError> {
        let date = required("date", self.date)?;
        let latitude = required("latitude", self.latitude)?;
        let longitude = required("longitude", self.longitude)?;
        Ok(PanchangRequest::from_iso_date(&date, latitude, longitude)?)
    }
}

fn required<T>(field: &'static str, value: Option<T>) -> Result<T, ApiError> {
    value.ok_or(ApiError::Validation(ValidationError::MissingField { field }))
}

fn narrow<T: TryFrom<i64>>(field: &'static str, value: i64) -> Result<T, ApiError> {
    T::try_from(value).map_err(|_| ApiError::OutOfRange { field, value })
}

fn record_json(record: &AlmanacRecord) -> Result<Value, ApiError> {
    serde_json::to_value(record)
        .map_err(CoreError::from)
        .map_err(ApiError::from)
}

/// Full aggregation with fallback.
///
/// POST /api/panchang
pub async fn post_panchang(
    State(state): State<Arc<AppState>>,
    body: Result<Json<PanchangBody>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(body) = body.map_err(|rejection| ApiError::Malformed(rejection.body_text()))?;
    let request = body.into_request()?;

    let span = info_span!("panchang", request_id = %Uuid::new_v4(), method = "POST");
    let resolved = state.service.resolve(&request).instrument(span).await;

    Ok(Json(json!({
        "success": true,
        "data": record_json(&resolved.record)?,
        "source": "api",
        "tier": resolved.tier,
    })))
}

/// Offline calculation only.
///
/// GET /api/panchang?date=YYYY-MM-DD&latitude=..&longitude=..
pub async fn get_panchang(
    State(state): State<Arc<AppState>>,
    query: Result<Query<PanchangQuery>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let Query(query) = query.map_err(|rejection| ApiError::Malformed(rejection.body_text()))?;
    let request = query.into_request()?;

    let resolved = info_span!("panchang", request_id = %Uuid::new_v4(), method = "GET")
        .in_scope(|| state.service.fallback_only(&request));

    Ok(Json(json!({
        "success": true,
        "data": record_json(&resolved.record)?,
    })))
}

/// GET /health
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
