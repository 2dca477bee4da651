//! Validated time ranges.

use crate::clip::ValidationError;

/// A `[start, end)` range in seconds with `0 <= start < end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrimSelection {
    start_secs: f64,
    end_secs: f64,
}

impl TrimSelection {
    /// Build a selection, rejecting negative, non-finite, or empty ranges.
    pub fn new(start_secs: f64, end_secs: f64) -> Result<Self, ValidationError> {
        if !start_secs.is_finite() || !end_secs.is_finite() {
            return Err(ValidationError::InvalidRange {
                message: format!("times must be finite (start={start_secs}, end={end_secs})"),
            });
        }
        if start_secs < 0.0 {
            return Err(ValidationError::InvalidRange {
                message: format!("start time must not be negative (start={start_secs})"),
            });
        }
        if end_secs <= start_secs {
            return Err(ValidationError::InvalidRange {
                message: "End time must be greater than start time.".to_string(),
            });
        }
        Ok(Self {
            start_secs,
            end_secs,
        })
    }

    /// Like [`TrimSelection::new`], additionally requiring `end <= duration`.
    pub fn within(
        start_secs: f64,
        end_secs: f64,
        duration_secs: f64,
    ) -> Result<Self, ValidationError> {
        let selection = Self::new(start_secs, end_secs)?;
        if end_secs > duration_secs {
            return Err(ValidationError::InvalidRange {
                message: format!(
                    "end time {end_secs}s exceeds source duration {duration_secs}s"
                ),
            });
        }
        Ok(selection)
    }

    /// `[0, duration)` for a clip already cut to `duration`. Same as
    /// [`TrimSelection::new`]`(0.0, duration)`.
    pub fn from_origin(duration_secs: f64) -> Self {
        Self {
            start_secs: 0.0,
            end_secs: duration_secs,
        }
    }

    pub fn start_secs(&self) -> f64 {
        self.start_secs
    }

    pub fn end_secs(&self) -> f64 {
        self.end_secs
    }

    /// Length of the selection in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.end_secs - self.start_secs
    }

    /// Whether `t` falls inside `[start, end)`.
    pub fn contains(&self, t: f64) -> bool {
        t >= self.start_secs && t < self.end_secs
    }
}
