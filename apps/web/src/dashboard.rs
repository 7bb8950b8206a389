//! Dashboard view state: one independent panel per advisor operation.
//!
//! Each panel sits behind its own lock, so a roadmap request and a search request
//! can be in flight at once. Locks are only taken for the state transitions, never
//! across a provider call.

use parking_lot::Mutex;
use serde::Serialize;
use tracing::debug;

use crate::errors::AppError;
use crate::models::{GroundedInfo, RoadmapNode};

pub const INTERESTS_REQUIRED: &str = "Please enter your interests and hobbies.";
pub const QUERY_REQUIRED: &str = "Please enter a search query.";

/// What one panel currently shows.
#[derive(Debug, Clone, Serialize)]
pub struct Panel<T> {
    pub input: String,
    pub loading: bool,
    pub result: Option<T>,
    pub error: Option<String>,
    /// Bumped by every started request and every reset. An outcome is only
    /// applied while its generation is still current.
    #[serde(skip)]
    generation: u64,
}

impl<T> Default for Panel<T> {
    fn default() -> Self {
        Self {
            input: String::new(),
            loading: false,
            result: None,
            error: None,
            generation: 0,
        }
    }
}

impl<T> Panel<T> {
    /// Starts a request for `input`, or rejects it without touching the network.
    ///
    /// Blank input sets the inline error and keeps whatever result is on screen.
    /// A valid start clears the previous result and error and returns the
    /// generation the request belongs to.
    fn begin(&mut self, input: &str, required: &str) -> Result<u64, AppError> {
        if self.loading {
            return Err(AppError::Busy);
        }
        self.input = input.to_string();
        if input.trim().is_empty() {
            self.error = Some(required.to_string());
            return Err(AppError::Validation(required.to_string()));
        }
        self.generation += 1;
        self.loading = true;
        self.result = None;
        self.error = None;
        Ok(self.generation)
    }

    fn settle<E: ToString>(&mut self, generation: u64, outcome: &Result<T, E>)
    where
        T: Clone,
    {
        if generation != self.generation {
            debug!(generation, current = self.generation, "Discarding stale panel outcome");
            return;
        }
        self.loading = false;
        match outcome {
            Ok(value) => self.result = Some(value.clone()),
            Err(e) => self.error = Some(e.to_string()),
        }
    }

    fn abandon(&mut self, generation: u64) {
        if generation == self.generation && self.loading {
            debug!(generation, "Request dropped before completion");
            self.loading = false;
        }
    }

    fn reset(&mut self) {
        *self = Self {
            generation: self.generation + 1,
            ..Self::default()
        };
    }
}

/// A started request on one panel.
///
/// `finish` stores the outcome. Dropping the ticket without finishing (the
/// handler future was cancelled) releases the panel so it can be used again.
#[must_use = "an unfinished ticket releases its panel when dropped"]
pub struct PanelTicket<'a, T> {
    panel: &'a Mutex<Panel<T>>,
    generation: u64,
    settled: bool,
}

impl<T: Clone> PanelTicket<'_, T> {
    pub fn finish<E: ToString>(mut self, outcome: &Result<T, E>) {
        self.panel.lock().settle(self.generation, outcome);
        self.settled = true;
    }
}

impl<T> Drop for PanelTicket<'_, T> {
    fn drop(&mut self) {
        if !self.settled {
            self.panel.lock().abandon(self.generation);
        }
    }
}

#[derive(Default)]
pub struct Dashboard {
    roadmap: Mutex<Panel<RoadmapNode>>,
    search: Mutex<Panel<GroundedInfo>>,
}

/// Point-in-time copy of both panels for rendering.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub roadmap: Panel<RoadmapNode>,
    pub search: Panel<GroundedInfo>,
}

fn start<'a, T>(
    panel: &'a Mutex<Panel<T>>,
    input: &str,
    required: &str,
) -> Result<PanelTicket<'a, T>, AppError> {
    let generation = panel.lock().begin(input, required)?;
    Ok(PanelTicket {
        panel,
        generation,
        settled: false,
    })
}

impl Dashboard {
    pub fn view(&self) -> DashboardView {
        DashboardView {
            roadmap: self.roadmap.lock().clone(),
            search: self.search.lock().clone(),
        }
    }

    pub fn begin_roadmap(&self, interests: &str) -> Result<PanelTicket<'_, RoadmapNode>, AppError> {
        start(&self.roadmap, interests, INTERESTS_REQUIRED)
    }

    pub fn begin_search(&self, query: &str) -> Result<PanelTicket<'_, GroundedInfo>, AppError> {
        start(&self.search, query, QUERY_REQUIRED)
    }

    /// Drops everything on screen. Used when the user signs out; requests still
    /// in flight finish into nothing.
    pub fn reset(&self) {
        self.roadmap.lock().reset();
        self.search.lock().reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roadmap() -> RoadmapNode {
        RoadmapNode::new("Data Scientist", "Numbers to insight")
    }

    #[test]
    fn test_blank_input_is_validation_error_and_keeps_result() {
        let dashboard = Dashboard::default();
        dashboard
            .begin_roadmap("ml")
            .unwrap()
            .finish::<String>(&Ok(roadmap()));

        let err = dashboard.begin_roadmap("   ").err().unwrap();
        assert!(matches!(err, AppError::Validation(ref m) if m == INTERESTS_REQUIRED));

        let view = dashboard.view();
        assert_eq!(view.roadmap.error.as_deref(), Some(INTERESTS_REQUIRED));
        assert!(view.roadmap.result.is_some());
        assert!(!view.roadmap.loading);
    }

    #[test]
    fn test_begin_clears_previous_result() {
        let dashboard = Dashboard::default();
        dashboard
            .begin_roadmap("ml")
            .unwrap()
            .finish::<String>(&Ok(roadmap()));

        let _ticket = dashboard.begin_roadmap("art").unwrap();
        let view = dashboard.view();
        assert!(view.roadmap.loading);
        assert!(view.roadmap.result.is_none());
        assert_eq!(view.roadmap.input, "art");
    }

    #[test]
    fn test_failure_leaves_no_result() {
        let dashboard = Dashboard::default();
        dashboard
            .begin_search("jobs")
            .unwrap()
            .finish(&Err::<GroundedInfo, _>("search failed"));

        let view = dashboard.view();
        assert!(!view.search.loading);
        assert!(view.search.result.is_none());
        assert_eq!(view.search.error.as_deref(), Some("search failed"));
    }

    #[test]
    fn test_loading_panel_rejects_second_request() {
        let dashboard = Dashboard::default();
        let _first = dashboard.begin_search("first").unwrap();
        assert!(matches!(dashboard.begin_search("second"), Err(AppError::Busy)));
        assert_eq!(dashboard.view().search.input, "first");
    }

    #[test]
    fn test_panels_are_independent() {
        let dashboard = Dashboard::default();
        let _roadmap = dashboard.begin_roadmap("ml").unwrap();
        dashboard
            .begin_search("jobs")
            .unwrap()
            .finish(&Err::<GroundedInfo, _>("boom"));

        let view = dashboard.view();
        assert!(view.roadmap.loading);
        assert!(view.roadmap.error.is_none());
        assert!(!view.search.loading);
    }

    #[test]
    fn test_dropped_ticket_releases_panel() {
        let dashboard = Dashboard::default();
        let ticket = dashboard.begin_roadmap("ml").unwrap();
        drop(ticket);

        let view = dashboard.view();
        assert!(!view.roadmap.loading);
        assert!(view.roadmap.result.is_none());
        assert!(view.roadmap.error.is_none());
        assert!(dashboard.begin_roadmap("ml again").is_ok());
    }

    #[test]
    fn test_outcome_after_reset_is_discarded() {
        let dashboard = Dashboard::default();
        let ticket = dashboard.begin_roadmap("ml").unwrap();

        dashboard.reset();
        ticket.finish::<String>(&Ok(roadmap()));

        let view = dashboard.view();
        assert!(view.roadmap.result.is_none());
        assert!(!view.roadmap.loading);
        assert_eq!(view.roadmap.input, "");
    }

    #[test]
    fn test_stale_ticket_does_not_touch_newer_request() {
        let dashboard = Dashboard::default();
        let stale = dashboard.begin_search("old").unwrap();
        dashboard.reset();
        let current = dashboard.begin_search("new").unwrap();

        drop(stale);
        assert!(dashboard.view().search.loading);

        current.finish::<String>(&Ok(GroundedInfo {
            text: "fresh".to_string(),
            sources: Vec::new(),
        }));
        let view = dashboard.view();
        assert!(!view.search.loading);
        assert!(view.search.result.is_some());
    }
}
