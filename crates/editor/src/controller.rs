//! Trim-range controller.
//!
//! Holds the ephemeral editing state for one loaded source: playhead,
//! start/end markers, total duration, and whether the preview is playing.
//!
//! Invariants kept by every operation:
//! - `0 <= playhead <= total` once the duration is known
//! - `start < end` once an end marker exists (`end == 0` means unset)
//! - playback never resumes from outside `[start, end)`
//!
//! Marker changes that would break the ordering are rejected without any
//! state change instead of being clamped, so a handle being dragged past
//! the other one simply stops.

use cliptrim_clip_model::TrimSelection;

/// Preview playback state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Paused,
    Playing,
}

/// Result of feeding a playback tick into the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Playhead moved, playback continues.
    Continue,
    /// The end marker was reached: playback stopped and the playhead was
    /// rewound to the start marker.
    ReachedEnd,
}

/// Editing state for the trim scrubber.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TrimController {
    playhead: f64,
    start: f64,
    end: f64,
    total: f64,
    state: PlaybackState,
    /// Position the player should jump to, set whenever the controller
    /// moves the playhead on its own.
    pending_seek: Option<f64>,
}

impl TrimController {
    /// Controller for a source whose duration is not known yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Controller opened on an existing selection (e.g. a saved clip).
    ///
    /// The playhead starts at `selection.start`. A `total_secs` that does
    /// not cover the selection leaves the duration unset, to be filled by
    /// [`TrimController::load_source`] later.
    pub fn with_range(selection: TrimSelection, total_secs: f64) -> Self {
        let total = if total_secs.is_finite() && total_secs >= selection.end_secs() {
            total_secs
        } else {
            0.0
        };
        Self {
            playhead: selection.start_secs(),
            start: selection.start_secs(),
            end: selection.end_secs(),
            total,
            state: PlaybackState::Paused,
            pending_seek: Some(selection.start_secs()),
        }
    }

    /// Adopt the probed duration of the loaded source.
    ///
    /// Only an unset duration is initialized; an unset end marker follows
    /// it. An end marker the user already placed is left alone. Returns
    /// whether the hint was adopted.
    pub fn load_source(&mut self, duration_hint: f64) -> bool {
        if !duration_hint.is_finite() || duration_hint <= 0.0 {
            return false;
        }
        if self.total > 0.0 {
            tracing::debug!(
                total = self.total,
                hint = duration_hint,
                "Duration already known, ignoring hint"
            );
            return false;
        }

        self.total = duration_hint;
        if self.end <= 0.0 {
            self.end = duration_hint;
        }
        if self.playhead > self.total {
            self.move_playhead(self.total);
        }
        tracing::debug!(total = self.total, end = self.end, "Source duration loaded");
        true
    }

    /// Move the start marker. Accepted only if `0 <= t < end`.
    ///
    /// If the playhead is before the new start it is advanced to it.
    pub fn set_start_marker(&mut self, t: f64) -> bool {
        if !t.is_finite() || t < 0.0 || t >= self.end {
            return false;
        }
        self.start = t;
        if self.playhead < t {
            self.move_playhead(t);
        }
        true
    }

    /// Move the end marker. Accepted only if `start < t <= total`.
    ///
    /// If the playhead is past the new end it is rewound to the start marker.
    pub fn set_end_marker(&mut self, t: f64) -> bool {
        if !t.is_finite() || t <= self.start || t > self.total {
            return false;
        }
        self.end = t;
        if self.playhead > t {
            self.move_playhead(self.start);
        }
        true
    }

    /// Feed a playback position report.
    pub fn advance_playhead(&mut self, t: f64) -> TickOutcome {
        if !t.is_finite() {
            return TickOutcome::Continue;
        }
        self.playhead = self.clamp_to_source(t);
        if self.end > 0.0 && t >= self.end {
            self.state = PlaybackState::Paused;
            self.move_playhead(self.start);
            return TickOutcome::ReachedEnd;
        }
        TickOutcome::Continue
    }

    /// Play/pause. Resuming from at or past the end marker rewinds to the
    /// start marker first. Returns the new state.
    pub fn toggle_playback(&mut self) -> PlaybackState {
        self.state = match self.state {
            PlaybackState::Playing => PlaybackState::Paused,
            PlaybackState::Paused => {
                if self.playhead >= self.end {
                    self.move_playhead(self.start);
                }
                PlaybackState::Playing
            }
        };
        self.state
    }

    /// Scrub directly. Clamped to the source, not to the markers.
    pub fn seek(&mut self, t: f64) {
        if !t.is_finite() {
            return;
        }
        self.playhead = self.clamp_to_source(t);
    }

    /// Take the position the player should seek to, if the controller
    /// moved the playhead since the last call.
    pub fn take_player_seek(&mut self) -> Option<f64> {
        self.pending_seek.take()
    }

    pub fn playhead(&self) -> f64 {
        self.playhead
    }

    pub fn start_marker(&self) -> f64 {
        self.start
    }

    pub fn end_marker(&self) -> f64 {
        self.end
    }

    pub fn total_duration(&self) -> f64 {
        self.total
    }

    pub fn playback_state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    /// Whether a duration has been loaded.
    pub fn has_duration(&self) -> bool {
        self.total > 0.0
    }

    /// Current markers as a validated selection.
    pub fn selection(&self) -> Option<TrimSelection> {
        TrimSelection::new(self.start, self.end).ok()
    }

    /// Selected range as `(offset, width)` fractions of the total duration,
    /// for drawing the highlighted band under the slider.
    pub fn selected_fraction(&self) -> Option<(f64, f64)> {
        if self.total <= 0.0 || self.end <= self.start {
            return None;
        }
        Some((self.start / self.total, (self.end - self.start) / self.total))
    }

    fn move_playhead(&mut self, t: f64) {
        self.playhead = t;
        self.pending_seek = Some(t);
    }

    fn clamp_to_source(&self, t: f64) -> f64 {
        let upper = if self.total > 0.0 {
            self.total
        } else {
            self.end.max(0.0)
        };
        t.clamp(0.0, upper)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded(total: f64) -> TrimController {
        let mut ctrl = TrimController::new();
        assert!(ctrl.load_source(total));
        ctrl
    }

    #[test]
    fn test_late_duration_fills_unset_end() {
        let mut ctrl = TrimController::new();
        assert!(!ctrl.load_source(0.0));
        assert!(ctrl.load_source(120.0));
        assert_eq!(ctrl.total_duration(), 120.0);
        assert_eq!(ctrl.end_marker(), 120.0);
    }

    #[test]
    fn test_known_duration_is_not_replaced() {
        let mut ctrl = loaded(60.0);
        assert!(ctrl.set_end_marker(30.0));
        assert!(!ctrl.load_source(90.0));
        assert_eq!(ctrl.total_duration(), 60.0);
        assert_eq!(ctrl.end_marker(), 30.0);
    }

    #[test]
    fn test_explicit_end_is_not_clamped_by_late_duration() {
        let selection = TrimSelection::new(2.0, 8.0).unwrap();
        let mut ctrl = TrimController::with_range(selection, 0.0);
        assert!(!ctrl.has_duration());
        assert!(ctrl.load_source(4.0));
        assert_eq!(ctrl.total_duration(), 4.0);
        assert_eq!(ctrl.end_marker(), 8.0);
        assert_eq!(ctrl.playhead(), 2.0);
    }

    #[test]
    fn test_start_past_end_is_rejected() {
        let mut ctrl = loaded(60.0);
        assert!(ctrl.set_end_marker(5.0));
        assert!(!ctrl.set_start_marker(10.0));
        assert_eq!(ctrl.start_marker(), 0.0);
        assert!(!ctrl.set_start_marker(5.0));
        assert!(!ctrl.set_start_marker(-1.0));
    }

    #[test]
    fn test_start_marker_pulls_playhead_forward() {
        let mut ctrl = loaded(60.0);
        ctrl.seek(1.0);
        assert!(ctrl.set_start_marker(4.0));
        assert_eq!(ctrl.playhead(), 4.0);
        assert_eq!(ctrl.take_player_seek(), Some(4.0));
        assert_eq!(ctrl.take_player_seek(), None);

        ctrl.seek(20.0);
        assert!(ctrl.set_start_marker(6.0));
        assert_eq!(ctrl.playhead(), 20.0);
    }

    #[test]
    fn test_end_marker_bounds() {
        let mut ctrl = loaded(60.0);
        assert!(ctrl.set_start_marker(10.0));
        assert!(!ctrl.set_end_marker(10.0));
        assert!(!ctrl.set_end_marker(60.5));
        assert!(ctrl.set_end_marker(60.0));
        assert!(ctrl.set_end_marker(11.0));
    }

    #[test]
    fn test_end_marker_before_playhead_rewinds_to_start() {
        let mut ctrl = loaded(60.0);
        assert!(ctrl.set_start_marker(5.0));
        ctrl.seek(40.0);
        assert!(ctrl.set_end_marker(30.0));
        assert_eq!(ctrl.playhead(), 5.0);
    }

    #[test]
    fn test_reaching_end_stops_and_rewinds() {
        let mut ctrl = loaded(60.0);
        assert!(ctrl.set_start_marker(3.0));
        assert!(ctrl.set_end_marker(9.0));
        assert_eq!(ctrl.toggle_playback(), PlaybackState::Playing);

        assert_eq!(ctrl.advance_playhead(8.5), TickOutcome::Continue);
        assert_eq!(ctrl.playhead(), 8.5);
        assert!(ctrl.is_playing());

        assert_eq!(ctrl.advance_playhead(9.02), TickOutcome::ReachedEnd);
        assert_eq!(ctrl.playhead(), 3.0);
        assert!(!ctrl.is_playing());
    }

    #[test]
    fn test_toggle_from_end_restarts_inside_range() {
        let mut ctrl = loaded(60.0);
        assert!(ctrl.set_start_marker(2.0));
        assert!(ctrl.set_end_marker(10.0));
        ctrl.seek(12.0);
        let _ = ctrl.take_player_seek();

        assert_eq!(ctrl.toggle_playback(), PlaybackState::Playing);
        assert_eq!(ctrl.playhead(), 2.0);
        assert_eq!(ctrl.take_player_seek(), Some(2.0));

        assert_eq!(ctrl.toggle_playback(), PlaybackState::Paused);
        assert_eq!(ctrl.playhead(), 2.0);
    }

    #[test]
    fn test_seek_clamps_to_source_only() {
        let mut ctrl = loaded(60.0);
        assert!(ctrl.set_start_marker(10.0));
        assert!(ctrl.set_end_marker(20.0));
        ctrl.seek(45.0);
        assert_eq!(ctrl.playhead(), 45.0);
        ctrl.seek(75.0);
        assert_eq!(ctrl.playhead(), 60.0);
        ctrl.seek(-3.0);
        assert_eq!(ctrl.playhead(), 0.0);
    }

    #[test]
    fn test_selection_and_fraction() {
        let mut ctrl = TrimController::new();
        assert!(ctrl.selection().is_none());
        assert!(ctrl.selected_fraction().is_none());

        assert!(ctrl.load_source(100.0));
        assert!(ctrl.set_start_marker(25.0));
        assert!(ctrl.set_end_marker(75.0));
        let sel = ctrl.selection().unwrap();
        assert_eq!((sel.start_secs(), sel.end_secs()), (25.0, 75.0));
        assert_eq!(ctrl.selected_fraction(), Some((0.25, 0.5)));
    }
}
