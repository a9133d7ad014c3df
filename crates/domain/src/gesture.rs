//! Gesture pulses — map pre-computed hand landmarks onto action kinds.
//!
//! Landmarks arrive already extracted by an external hand tracker, in
//! normalized image coordinates. Only four points are consumed:
//!
//! | Gesture | Points | Action |
//! |---------|--------|--------|
//! | index pinch | index tip ↔ thumb tip | [`ActionKind::ScrollForward`] |
//! | middle pinch | middle tip ↔ thumb tip | [`ActionKind::ScrollBackward`] |
//! | index curl | index tip ↔ index PIP joint | [`ActionKind::Tap`] |

use serde::{Deserialize, Serialize};

use crate::action::ActionKind;
use crate::error::ValidationError;

/// A normalized 3D landmark position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Landmark {
    #[must_use]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

/// The subset of a tracked hand used for classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HandLandmarks {
    pub thumb_tip: Landmark,
    pub index_pip: Landmark,
    pub index_tip: Landmark,
    pub middle_tip: Landmark,
}

/// Distance thresholds below which a gesture counts as performed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureThresholds {
    /// Fingertip to thumb-tip distance for both pinches.
    pub pinch: f64,
    /// Index tip to index PIP distance for the curl.
    pub curl: f64,
}

impl Default for GestureThresholds {
    fn default() -> Self {
        Self {
            pinch: 0.050_906_282_163_080_734,
            curl: 0.050_756_146_802_556_01,
        }
    }
}

impl GestureThresholds {
    /// Check that both thresholds are positive and finite.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidThreshold`] naming the bad field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (name, value) in [("pinch", self.pinch), ("curl", self.curl)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ValidationError::InvalidThreshold { name });
            }
        }
        Ok(())
    }
}

/// Classify one hand into the action kinds it requests, in evaluation order.
#[must_use]
pub fn classify(hand: &HandLandmarks, thresholds: &GestureThresholds) -> Vec<ActionKind> {
    ActionKind::ALL
        .into_iter()
        .filter(|kind| {
            let distance = match kind {
                ActionKind::ScrollForward => hand.index_tip.distance(&hand.thumb_tip),
                ActionKind::ScrollBackward => hand.middle_tip.distance(&hand.thumb_tip),
                ActionKind::Tap => hand.index_tip.distance(&hand.index_pip),
            };
            let limit = match kind {
                ActionKind::Tap => thresholds.curl,
                _ => thresholds.pinch,
            };
            distance < limit
        })
        .collect()
}
