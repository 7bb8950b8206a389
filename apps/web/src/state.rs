use std::sync::Arc;

use crate::advisor::CareerAdvisor;
use crate::dashboard::Dashboard;
use crate::session::SessionController;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Provider-backed operations. `GeminiAdvisor` in production, a fake in tests.
    pub advisor: Arc<dyn CareerAdvisor>,
    pub session: Arc<SessionController>,
    pub dashboard: Arc<Dashboard>,
}
