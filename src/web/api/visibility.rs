use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::astro::AstroObject;
use crate::input::{parse_step_minutes, validate_site_configs};
use crate::predict::{
    compute_visibility, quick_check as check, QuickCheck, TimeRange, VisibilityInfo,
};
use crate::site::SiteConfig;
use crate::web::api::error::{ApiError, ApiResult, ErrorResponse};
use crate::web::server::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct VisibilityRequest {
    pub objects: Vec<AstroObject>,
    /// Falls back to the server's default sites when empty.
    #[serde(default)]
    pub configs: Vec<SiteConfig>,
    #[serde(deserialize_with = "deserialize_datetime")]
    pub start: DateTime<Utc>,
    #[serde(deserialize_with = "deserialize_datetime")]
    pub end: DateTime<Utc>,
    /// Duration such as `5m`; falls back to the server's scan step.
    #[serde(default)]
    pub step: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VisibilityResponse {
    pub results: Vec<VisibilityInfo>,
}

#[utoipa::path(
    post,
    path = "/api/visibility",
    tag = "visibility",
    request_body = VisibilityRequest,
    responses(
        (status = 200, description = "Merged visibility windows per object", body = VisibilityResponse),
        (status = 400, description = "Invalid configs, time range or step", body = ErrorResponse)
    )
)]
pub async fn visibility(
    State(state): State<AppState>,
    Json(request): Json<VisibilityRequest>,
) -> ApiResult<impl IntoResponse> {
    let configs = if request.configs.is_empty() {
        state.config.sites.clone()
    } else {
        request.configs
    };
    if configs.is_empty() {
        return Err(ApiError::Validation("No site configs given".into()));
    }
    validate_site_configs(&configs)?;

    let step_minutes = match request.step.as_deref() {
        Some(step) => parse_step_minutes(step)?,
        None => state.config.scan.step_minutes,
    };
    let range = TimeRange::new(request.start, request.end, step_minutes)?;

    log::info!(
        "Visibility request: {} objects, {} configs",
        request.objects.len(),
        configs.len()
    );
    let results = compute_visibility(&request.objects, &configs, &range);

    Ok((StatusCode::OK, Json(VisibilityResponse { results })))
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct QuickCheckRequest {
    pub objects: Vec<AstroObject>,
    pub config: SiteConfig,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct QuickCheckResponse {
    pub results: Vec<QuickCheck>,
}

#[utoipa::path(
    post,
    path = "/api/quick-check",
    tag = "visibility",
    request_body = QuickCheckRequest,
    responses(
        (status = 200, description = "Go/no-go per object", body = QuickCheckResponse),
        (status = 400, description = "Invalid site config", body = ErrorResponse)
    )
)]
pub async fn quick_check(Json(request): Json<QuickCheckRequest>) -> ApiResult<impl IntoResponse> {
    validate_site_configs(std::slice::from_ref(&request.config))?;

    let results = request
        .objects
        .iter()
        .map(|object| check(object, &request.config))
        .collect();

    Ok((StatusCode::OK, Json(QuickCheckResponse { results })))
}

fn deserialize_datetime<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    DateTime::parse_from_rfc3339(&s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(serde::de::Error::custom)
}
