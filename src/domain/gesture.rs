//! Drag gesture classification.
//!
//! Classification is a pure function of the horizontal displacement, so it can
//! be exercised without any rendering layer. The rotation and opacity helpers
//! only drive presentation.

use super::Decision;
use crate::error::{JswpError, Result};

/// Nominal on-screen width of a card, in the same units as displacement.
pub const NOMINAL_CARD_WIDTH: f64 = 500.0;

/// Default commit threshold: one fifth of the nominal card width.
pub const DEFAULT_SWIPE_THRESHOLD: f64 = NOMINAL_CARD_WIDTH / 5.0;

/// Synthetic displacement used for the exit motion of a committed card.
pub const EXIT_OFFSET: f64 = 1000.0;

const ROTATION_RANGE: f64 = 200.0;
const MAX_ROTATION_DEG: f64 = 25.0;
const FADE_START: f64 = 150.0;
const FADE_END: f64 = 200.0;
const MIN_OPACITY: f64 = 0.5;

/// Classifies a released drag.
///
/// Returns `Some(Accept)` for a positive displacement whose magnitude exceeds
/// `threshold`, `Some(Reject)` for a negative one, and `None` otherwise. A
/// displacement exactly at the threshold does not commit.
pub fn classify(displacement: f64, threshold: f64) -> Option<Decision> {
    if displacement.is_nan() || displacement.abs() <= threshold {
        return None;
    }

    if displacement > 0.0 {
        Some(Decision::Accept)
    } else {
        Some(Decision::Reject)
    }
}

/// Settings for gesture handling
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureConfig {
    /// Minimum displacement magnitude that commits a decision
    pub threshold: f64,
}

impl GestureConfig {
    /// Builds a config, rejecting thresholds that are not positive and finite.
    pub fn new(threshold: f64) -> Result<Self> {
        if !is_valid_threshold(threshold) {
            return Err(JswpError::ConfigError(format!(
                "Invalid swipe threshold {}: must be a positive number",
                threshold
            )));
        }
        Ok(Self { threshold })
    }
}

/// Whether `threshold` is usable as a commit threshold.
///
/// A non-positive threshold would commit a release that never moved.
pub fn is_valid_threshold(threshold: f64) -> bool {
    threshold.is_finite() && threshold > 0.0
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_SWIPE_THRESHOLD,
        }
    }
}

/// In-progress drag state
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GestureState {
    pub active: bool,
    pub displacement: f64,
}

impl GestureState {
    /// The neutral, returned position
    pub fn neutral() -> Self {
        Self::default()
    }

    pub fn is_neutral(&self) -> bool {
        !self.active && self.displacement == 0.0
    }

    /// Whether releasing now would commit a decision
    pub fn crosses(&self, threshold: f64) -> bool {
        classify(self.displacement, threshold).is_some()
    }

    /// The decision the current displacement leans towards, if any
    pub fn leaning(&self) -> Option<Decision> {
        if self.displacement > 0.0 {
            Some(Decision::Accept)
        } else if self.displacement < 0.0 {
            Some(Decision::Reject)
        } else {
            None
        }
    }

    /// Card tilt in degrees.
    pub fn rotation(&self) -> f64 {
        let clamped = self.displacement.clamp(-ROTATION_RANGE, ROTATION_RANGE);
        clamped / ROTATION_RANGE * MAX_ROTATION_DEG
    }

    /// Card opacity, fading out towards the edges of the drag range.
    pub fn opacity(&self) -> f64 {
        let magnitude = self.displacement.abs();
        if magnitude <= FADE_START {
            1.0
        } else if magnitude >= FADE_END {
            MIN_OPACITY
        } else {
            let t = (magnitude - FADE_START) / (FADE_END - FADE_START);
            1.0 - t * (1.0 - MIN_OPACITY)
        }
    }

    /// Intensity in `[0, 1]` of the APPLY/PASS indicator, reaching 1 at the threshold.
    pub fn indicator_strength(&self, threshold: f64) -> f64 {
        if threshold <= 0.0 {
            return if self.displacement == 0.0 { 0.0 } else { 1.0 };
        }
        (self.displacement.abs() / threshold).min(1.0)
    }
}

/// The exit motion of the most recently committed card
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExitMotion {
    pub decision: Decision,
    pub offset: f64,
}

impl ExitMotion {
    pub fn for_decision(decision: Decision) -> Self {
        let offset = match decision {
            Decision::Accept => EXIT_OFFSET,
            Decision::Reject => -EXIT_OFFSET,
        };
        Self { decision, offset }
    }
}
