pub mod error;
pub mod v1;

use axum::{
    extract::{Query, State},
    response::Html,
    routing::get,
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::{config::Config, poller::AppState, render};
use v1::ViewportQuery;

pub fn router(state: AppState, cfg: &Config) -> Router {
    let mut router = Router::new()
        .route("/", get(dashboard))
        .with_state(state.clone())
        .nest("/api/v1", v1::router(state));

    if cfg.server.enable_cors {
        use tower_http::cors::{Any, CorsLayer};
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([axum::http::Method::GET, axum::http::Method::POST])
            .allow_headers([axum::http::header::CONTENT_TYPE]);
        router = router.layer(cors);
    }

    router
        .layer(
            ServiceBuilder::new()
                .layer(axum::extract::DefaultBodyLimit::max(64 * 1024))
                .layer(TimeoutLayer::new(Duration::from_secs(cfg.server.request_timeout_secs))),
        )
        .layer(TraceLayer::new_for_http())
}

/// GET / - the dashboard page itself.
pub async fn dashboard(
    State(st): State<AppState>,
    Query(viewport): Query<ViewportQuery>,
) -> Html<String> {
    let snap = st.dashboard.snapshot().await;
    let layout = viewport.layout();
    Html(render::dashboard_page(&snap, &layout, st.cfg.source.poll_seconds))
}
