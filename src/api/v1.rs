use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    api::error::ApiError,
    flow::{FlowMap, Reading},
    poller::{AppState, LinkStatus},
    render::{svg_scene, Layout},
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/flows", get(get_flows))
        .route("/svg", get(get_svg))
        .route("/reading", post(set_reading))
        .route("/healthz", get(healthz))
        .with_state(state)
}

pub async fn healthz() -> impl IntoResponse {
    StatusCode::OK
}

/// Link status as the panels show it.
#[derive(Debug, Serialize)]
pub struct StatusInfo {
    pub state: LinkStatus,
    pub label: &'static str,
    pub color: &'static str,
}

impl From<LinkStatus> for StatusInfo {
    fn from(state: LinkStatus) -> Self {
        Self { state, label: state.label(), color: state.color() }
    }
}

#[derive(Debug, Serialize)]
pub struct FlowsResponse {
    pub status: StatusInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reading: Option<Reading>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub received_at: Option<DateTime<Utc>>,
    /// Absent until the first successful poll.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flows: Option<FlowMap>,
}

/// GET /api/v1/flows - current reading, link status and the derived
/// edge states.
pub async fn get_flows(State(st): State<AppState>) -> Json<FlowsResponse> {
    let snap = st.dashboard.snapshot().await;
    let flows = snap.reading.as_ref().map(FlowMap::derive);
    Json(FlowsResponse {
        status: snap.status.into(),
        reading: snap.reading,
        received_at: snap.received_at,
        flows,
    })
}

#[derive(Debug, Deserialize)]
pub struct ViewportQuery {
    pub width: Option<f64>,
    pub height: Option<f64>,
}

impl ViewportQuery {
    pub fn layout(&self) -> Layout {
        Layout::for_viewport(self.width.unwrap_or(1024.0), self.height.unwrap_or(600.0))
    }
}

/// GET /api/v1/svg - the SVG scene alone, sized to the requested
/// viewport.
pub async fn get_svg(
    State(st): State<AppState>,
    Query(viewport): Query<ViewportQuery>,
) -> impl IntoResponse {
    let snap = st.dashboard.snapshot().await;
    let fallback = Reading::default();
    let reading = snap.reading.as_ref();
    let flows = FlowMap::derive(reading.unwrap_or(&fallback));
    let svg = svg_scene(&flows, reading, &viewport.layout());

    ([(header::CONTENT_TYPE, "image/svg+xml")], svg)
}

/// POST /api/v1/reading - replace the editable reading. Only available
/// when the test source is configured; the HTTP source is read-only.
pub async fn set_reading(
    State(st): State<AppState>,
    Json(reading): Json<Reading>,
) -> Result<StatusCode, ApiError> {
    let source = st
        .test_source
        .as_ref()
        .ok_or_else(|| ApiError::Conflict("reading source is not editable".to_string()))?;

    source.set(reading).await;
    // Fold the edit into the snapshot right away instead of waiting out
    // the polling interval.
    st.dashboard.refresh().await;
    Ok(StatusCode::NO_CONTENT)
}
