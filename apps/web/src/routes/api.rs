//! JSON endpoints and the panel workflows shared with the HTML form handlers.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::dashboard::DashboardView;
use crate::errors::AppError;
use crate::models::{GroundedInfo, RoadmapNode};
use crate::session::SessionState;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RoadmapRequest {
    #[serde(default)]
    pub interests: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub state: SessionState,
}

pub(crate) async fn require_signed_in(state: &AppState) -> Result<(), AppError> {
    if state.session.current().await.is_signed_in() {
        Ok(())
    } else {
        Err(AppError::Unauthorized)
    }
}

/// Validate, mark loading, make one provider call, then store the outcome in the panel.
///
/// If the caller goes away mid-call the ticket is dropped and the panel is released.
pub(crate) async fn run_roadmap(state: &AppState, interests: &str) -> Result<RoadmapNode, AppError> {
    require_signed_in(state).await?;
    let ticket = state.dashboard.begin_roadmap(interests)?;
    let outcome = state.advisor.generate_roadmap(interests).await;
    ticket.finish(&outcome);
    Ok(outcome?)
}

pub(crate) async fn run_search(state: &AppState, query: &str) -> Result<GroundedInfo, AppError> {
    require_signed_in(state).await?;
    let ticket = state.dashboard.begin_search(query)?;
    let outcome = state.advisor.grounded_info(query).await;
    ticket.finish(&outcome);
    Ok(outcome?)
}

/// GET /api/v1/session
pub async fn handle_get_session(State(state): State<AppState>) -> Json<SessionResponse> {
    Json(SessionResponse {
        state: state.session.current().await,
    })
}

/// POST /api/v1/session/login
pub async fn handle_api_login(
    State(state): State<AppState>,
) -> Result<Json<SessionResponse>, AppError> {
    let session = state.session.handle_login().await.map_err(AppError::Session)?;
    Ok(Json(SessionResponse { state: session }))
}

/// POST /api/v1/session/logout
pub async fn handle_api_logout(
    State(state): State<AppState>,
) -> Result<Json<SessionResponse>, AppError> {
    let session = state.session.handle_logout().await.map_err(AppError::Session)?;
    state.dashboard.reset();
    Ok(Json(SessionResponse { state: session }))
}

/// GET /api/v1/dashboard
///
/// Current panel state, including loading flags of in-flight requests.
pub async fn handle_get_dashboard(
    State(state): State<AppState>,
) -> Result<Json<DashboardView>, AppError> {
    require_signed_in(&state).await?;
    Ok(Json(state.dashboard.view()))
}

/// POST /api/v1/roadmap
pub async fn handle_generate_roadmap(
    State(state): State<AppState>,
    Json(request): Json<RoadmapRequest>,
) -> Result<Json<RoadmapNode>, AppError> {
    Ok(Json(run_roadmap(&state, &request.interests).await?))
}

/// POST /api/v1/search
pub async fn handle_search(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<GroundedInfo>, AppError> {
    Ok(Json(run_search(&state, &request.query).await?))
}
