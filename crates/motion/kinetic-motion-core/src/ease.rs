//! Easing functions: pure, stateless remapping of linear progress.
//!
//! Every variant satisfies the boundary law `ease(0) = 0`, `ease(1) = 1`.
//! The ease-in-out curve is piecewise quadratic with a matching derivative
//! direction at the midpoint.

use log::debug;
use serde::{Deserialize, Serialize};

/// Progress curve applied to the visual callback only; termination of an
/// animation is always judged on raw (pre-easing) progress.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    Linear,
    EaseIn,
    EaseOut,
    #[default]
    EaseInOut,
}

impl Easing {
    /// Parse the wire name used by callers ("linear", "ease-in", ...).
    /// Unknown names fall back to `Linear` (no transform); the fallback is
    /// logged so typos stay observable.
    pub fn from_name(name: &str) -> Self {
        match name {
            "linear" => Easing::Linear,
            "ease-in" => Easing::EaseIn,
            "ease-out" => Easing::EaseOut,
            "ease-in-out" => Easing::EaseInOut,
            other => {
                debug!("unknown easing type {other:?}, falling back to linear");
                Easing::Linear
            }
        }
    }

    /// Map linear progress `p` in [0,1] to eased progress in [0,1].
    #[inline]
    pub fn apply(self, p: f32) -> f32 {
        match self {
            Easing::Linear => p,
            Easing::EaseIn => p * p,
            Easing::EaseOut => p.sqrt(),
            Easing::EaseInOut => {
                if p <= 0.5 {
                    2.0 * p * p
                } else {
                    let u = 1.0 - p;
                    1.0 - 2.0 * u * u
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 4] = [
        Easing::Linear,
        Easing::EaseIn,
        Easing::EaseOut,
        Easing::EaseInOut,
    ];

    #[test]
    fn boundary_law() {
        for e in ALL {
            assert_eq!(e.apply(0.0), 0.0, "{e:?} at 0");
            assert_eq!(e.apply(1.0), 1.0, "{e:?} at 1");
        }
    }

    #[test]
    fn ease_in_out_continuous_at_midpoint() {
        let below = Easing::EaseInOut.apply(0.5);
        let above = Easing::EaseInOut.apply(0.500001);
        assert!((below - 0.5).abs() < 1e-6);
        assert!((above - below).abs() < 1e-4);
    }

    #[test]
    fn unknown_name_falls_back_to_linear() {
        assert_eq!(Easing::from_name("ease-in-ou"), Easing::Linear);
        assert_eq!(Easing::from_name(""), Easing::Linear);
    }
}
