//! Browser-facing handlers. Forms post, the handler updates state, and the browser
//! is redirected back to `/` so a reload never re-submits.

use axum::{
    extract::State,
    response::{Html, Redirect},
    Form,
};
use chrono::Datelike;

use crate::errors::AppError;
use crate::render::page::{render_shell, ShellContext};
use crate::routes::api::{run_roadmap, run_search, RoadmapRequest, SearchRequest};
use crate::state::AppState;

/// GET /
pub async fn handle_index(State(state): State<AppState>) -> Html<String> {
    let session = state.session.current().await;
    let view = if session.is_signed_in() {
        Some(state.dashboard.view())
    } else {
        None
    };
    let (roadmap_model, search_model) = state.advisor.models();

    Html(render_shell(&ShellContext {
        session,
        dashboard: view.as_ref(),
        roadmap_model,
        search_model,
        year: chrono::Local::now().year(),
    }))
}

/// POST /login
///
/// Whatever the form carries is accepted; nothing is checked.
pub async fn handle_login(State(state): State<AppState>) -> Result<Redirect, AppError> {
    state.session.handle_login().await.map_err(AppError::Session)?;
    Ok(Redirect::to("/"))
}

/// POST /logout
pub async fn handle_logout(State(state): State<AppState>) -> Result<Redirect, AppError> {
    state.session.handle_logout().await.map_err(AppError::Session)?;
    state.dashboard.reset();
    Ok(Redirect::to("/"))
}

/// POST /roadmap
pub async fn handle_roadmap_form(
    State(state): State<AppState>,
    Form(form): Form<RoadmapRequest>,
) -> Result<Redirect, AppError> {
    back_to_index(run_roadmap(&state, &form.interests).await)
}

/// POST /search
pub async fn handle_search_form(
    State(state): State<AppState>,
    Form(form): Form<SearchRequest>,
) -> Result<Redirect, AppError> {
    back_to_index(run_search(&state, &form.query).await)
}

/// Panel-level failures are already recorded in the dashboard and show up on the
/// next render; only infrastructure errors escape as an error response.
fn back_to_index<T>(outcome: Result<T, AppError>) -> Result<Redirect, AppError> {
    match outcome {
        Ok(_)
        | Err(AppError::Validation(_))
        | Err(AppError::Request(_))
        | Err(AppError::Busy)
        | Err(AppError::Unauthorized) => Ok(Redirect::to("/")),
        Err(e) => Err(e),
    }
}
