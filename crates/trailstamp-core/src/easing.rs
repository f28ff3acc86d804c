//! Easing curves used by stamp and spotlight tweens.
//!
//! Names follow the usual "powerN" family; every curve here is the
//! ease-out variant since that is what pointer-driven effects want.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    Linear,
    /// Quadratic ease out.
    #[default]
    Power1,
    /// Cubic ease out.
    Power2,
    /// Quartic ease out.
    Power3,
}

impl Ease {
    /// Evaluates the curve at `t`, clamped to `[0, 1]`.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::Power1 => 1.0 - (1.0 - t).powi(2),
            Ease::Power2 => 1.0 - (1.0 - t).powi(3),
            Ease::Power3 => 1.0 - (1.0 - t).powi(4),
        }
    }
}
