//! Bounded playback of a saved clip.
//!
//! List items play a clip inside `[start, end]` of its media. The end can
//! be open, in which case the clip plays to the end of the media.

use cliptrim_clip_model::ClipRecord;

use crate::controller::{PlaybackState, TickOutcome};

/// Preview player state for one list item.
#[derive(Debug, Clone, PartialEq)]
pub struct ClipPreview {
    start: f64,
    end: Option<f64>,
    position: f64,
    state: PlaybackState,
    pending_seek: Option<f64>,
}

impl ClipPreview {
    /// Preview starting at `start`, stopping at `end` if given.
    pub fn new(start: f64, end: Option<f64>) -> Self {
        let start = if start.is_finite() { start.max(0.0) } else { 0.0 };
        let end = end.filter(|e| e.is_finite() && *e > start);
        Self {
            start,
            end,
            position: start,
            state: PlaybackState::Paused,
            pending_seek: Some(start),
        }
    }

    /// Preview of a clip's playable media. A clip cut to its own file plays
    /// that file from the top; one that reuses its source plays the stored range.
    pub fn for_clip(clip: &ClipRecord) -> Self {
        let range = clip.media_range();
        Self::new(range.start_secs(), Some(range.end_secs()))
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> Option<f64> {
        self.end
    }

    /// Feed a status report from the player.
    pub fn on_status(&mut self, position: f64, is_playing: bool) -> TickOutcome {
        if position.is_finite() {
            self.position = position.max(0.0);
        }
        self.state = if is_playing {
            PlaybackState::Playing
        } else {
            PlaybackState::Paused
        };
        if self.past_end() {
            self.state = PlaybackState::Paused;
            self.rewind();
            return TickOutcome::ReachedEnd;
        }
        TickOutcome::Continue
    }

    /// Play/pause, rewinding first if the position is at or past the end.
    pub fn toggle(&mut self) -> PlaybackState {
        self.state = match self.state {
            PlaybackState::Playing => PlaybackState::Paused,
            PlaybackState::Paused => {
                if self.past_end() {
                    self.rewind();
                }
                PlaybackState::Playing
            }
        };
        self.state
    }

    /// Take the position the player should seek to, if any.
    pub fn take_player_seek(&mut self) -> Option<f64> {
        self.pending_seek.take()
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    fn past_end(&self) -> bool {
        self.end.is_some_and(|end| self.position >= end)
    }

    fn rewind(&mut self) {
        self.position = self.start;
        self.pending_seek = Some(self.start);
    }
}
