use std::collections::HashMap;

use crate::quiz::engine::{QuizPhase, SharedEngine};
use crate::scene::Vec3;

/// Where the quiz canvas sits relative to its image target, in meters.
pub const DEFAULT_CANVAS_OFFSET: Vec3 = Vec3::new(0.0, 0.05, 0.1);

/// Status reported by the image tracker for one target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum TrackingStatus {
    NoPose,
    Limited,
    Detected,
    Tracked,
    ExtendedTracked,
}

impl TrackingStatus {
    pub fn is_visible(self) -> bool {
        matches!(
            self,
            TrackingStatus::Detected | TrackingStatus::Tracked | TrackingStatus::ExtendedTracked
        )
    }
}

/// World-space canvas anchored to one image target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuizCanvas {
    pub visible: bool,
    pub local_position: Vec3,
    /// Yaw around the target's up axis, radians. Zero faces forward.
    pub local_yaw: f32,
}

impl Default for QuizCanvas {
    fn default() -> Self {
        Self {
            visible: false,
            local_position: Vec3::ZERO,
            local_yaw: 0.0,
        }
    }
}

/// Turns tracker callbacks into quiz sessions and canvas visibility.
#[derive(Debug)]
pub struct TrackingBridge {
    engine: SharedEngine,
    canvas_offset: Vec3,
    canvases: HashMap<String, QuizCanvas>,
}

impl TrackingBridge {
    pub fn new(engine: SharedEngine) -> Self {
        Self {
            engine,
            canvas_offset: DEFAULT_CANVAS_OFFSET,
            canvases: HashMap::new(),
        }
    }

    pub fn with_canvas_offset(mut self, offset: Vec3) -> Self {
        self.canvas_offset = offset;
        self
    }

    pub fn engine(&self) -> &SharedEngine {
        &self.engine
    }

    pub fn canvas(&self, target: &str) -> Option<&QuizCanvas> {
        self.canvases.get(target)
    }

    pub fn on_status_changed(&mut self, target: &str, previous: TrackingStatus, status: TrackingStatus) {
        log::trace!("{}: {:?} -> {:?}", target, previous, status);
        self.on_visibility_changed(target, status.is_visible());
    }

    pub fn on_visibility_changed(&mut self, target: &str, visible: bool) {
        let canvas = self.canvases.entry(target.to_string()).or_default();

        if visible {
            // Tracked -> ExtendedTracked and the like are the same visibility
            // period: keep the running quiz.
            let owns_session = self
                .engine
                .borrow()
                .session()
                .is_some_and(|session| session.target_id() == target);
            if canvas.visible && owns_session {
                log::trace!("{} still visible", target);
                return;
            }

            log::info!("Image target {} detected", target);
            canvas.local_position = self.canvas_offset;
            canvas.local_yaw = 0.0;
            canvas.visible = true;
            self.engine.borrow_mut().start_session(target);
            return;
        }

        log::info!("Lost tracking of {}", target);
        canvas.visible = false;

        // Another target may have taken over in the meantime.
        let mut engine = self.engine.borrow_mut();
        let owns_session = engine
            .session()
            .is_some_and(|session| session.target_id() == target);
        if owns_session {
            engine.reset();
        }
    }

    /// Target whose session is currently live, if any.
    pub fn active_target(&self) -> Option<String> {
        let engine = self.engine.borrow();
        match engine.phase() {
            QuizPhase::Idle => None,
            _ => engine.session().map(|s| s.target_id().to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::engine::QuizEngine;
    use crate::quiz::QuestionBank;

    fn bridge() -> TrackingBridge {
        TrackingBridge::new(QuizEngine::new(QuestionBank::builtin()).into_shared())
    }

    #[test]
    fn visible_statuses() {
        assert!(TrackingStatus::Detected.is_visible());
        assert!(TrackingStatus::Tracked.is_visible());
        assert!(TrackingStatus::ExtendedTracked.is_visible());
        assert!(!TrackingStatus::Limited.is_visible());
        assert!(!TrackingStatus::NoPose.is_visible());
    }

    #[test]
    fn detection_places_canvas_and_starts_quiz() {
        let mut bridge = bridge();
        bridge.on_status_changed("Colosseum", TrackingStatus::NoPose, TrackingStatus::Tracked);

        let canvas = bridge.canvas("Colosseum").copied().unwrap();
        assert!(canvas.visible);
        assert_eq!(canvas.local_position, DEFAULT_CANVAS_OFFSET);
        assert_eq!(canvas.local_yaw, 0.0);
        assert_eq!(
            bridge.engine().borrow().phase(),
            QuizPhase::InProgress { index: 0 }
        );
        assert_eq!(bridge.active_target().as_deref(), Some("Colosseum"));
    }

    #[test]
    fn losing_target_hides_canvas_and_resets() {
        let mut bridge = bridge().with_canvas_offset(Vec3::new(0.0, 0.1, 0.0));
        bridge.on_visibility_changed("Pyramid", true);
        assert_eq!(
            bridge.canvas("Pyramid").unwrap().local_position,
            Vec3::new(0.0, 0.1, 0.0)
        );

        bridge.on_visibility_changed("Pyramid", false);
        assert!(!bridge.canvas("Pyramid").unwrap().visible);
        assert_eq!(bridge.engine().borrow().phase(), QuizPhase::Idle);
        assert_eq!(bridge.active_target(), None);
    }

    #[test]
    fn losing_stale_target_keeps_new_session() {
        let mut bridge = bridge();
        bridge.on_visibility_changed("TajMahal", true);
        bridge.on_visibility_changed("AbulHol", true);
        bridge.on_visibility_changed("TajMahal", false);

        assert_eq!(bridge.active_target().as_deref(), Some("AbulHol"));
        assert!(bridge.canvas("AbulHol").unwrap().visible);
    }

    #[test]
    fn tracking_quality_change_keeps_progress() {
        let mut bridge = bridge();
        bridge.on_status_changed("TajMahal", TrackingStatus::NoPose, TrackingStatus::Tracked);
        {
            let mut engine = bridge.engine().borrow_mut();
            engine.submit_answer(0);
            engine.advance();
        }

        bridge.on_status_changed("TajMahal", TrackingStatus::Tracked, TrackingStatus::ExtendedTracked);
        bridge.on_status_changed("TajMahal", TrackingStatus::ExtendedTracked, TrackingStatus::Detected);
        assert_eq!(
            bridge.engine().borrow().phase(),
            QuizPhase::InProgress { index: 1 }
        );
        assert!(bridge.canvas("TajMahal").unwrap().visible);
    }

    #[test]
    fn hide_then_show_restarts_from_first_question() {
        let mut bridge = bridge();
        bridge.on_visibility_changed("TajMahal", true);
        {
            let mut engine = bridge.engine().borrow_mut();
            engine.submit_answer(0);
            engine.advance();
        }
        bridge.on_visibility_changed("TajMahal", false);
        bridge.on_visibility_changed("TajMahal", true);
        assert_eq!(
            bridge.engine().borrow().phase(),
            QuizPhase::InProgress { index: 0 }
        );
    }

    #[test]
    fn visible_target_without_session_starts_again() {
        let mut bridge = bridge();
        bridge.on_visibility_changed("TajMahal", true);
        bridge.on_visibility_changed("AbulHol", true);
        bridge.on_visibility_changed("AbulHol", false);

        // TajMahal never left the view; its next report takes the quiz back.
        bridge.on_visibility_changed("TajMahal", true);
        assert_eq!(bridge.active_target().as_deref(), Some("TajMahal"));
    }
}
