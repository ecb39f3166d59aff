//! Score value object (fraction between 0 and 1).

use serde::{Deserialize, Serialize};
use std::fmt;

/// A value between 0.0 and 1.0 inclusive, as reported by the backend for
/// precision, accuracy and faithfulness.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Score(f64);

impl Score {
    /// Creates a new Score.
    ///
    /// Returns `None` for non-finite input or anything outside `0.0..=1.0`.
    pub fn new(value: f64) -> Option<Self> {
        if !value.is_finite() || !(0.0..=1.0).contains(&value) {
            return None;
        }
        Some(Self(value))
    }

    /// Returns the value as a fraction.
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Returns the value on a 0-100 scale.
    pub fn as_percent(&self) -> f64 {
        self.0 * 100.0
    }

    /// Formats as a percentage with the given number of decimals.
    pub fn percent_label(&self, decimals: usize) -> String {
        format!("{:.*}%", decimals, self.as_percent())
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.percent_label(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_new_accepts_valid_values() {
        assert_eq!(Score::new(0.0).unwrap().value(), 0.0);
        assert_eq!(Score::new(0.5).unwrap().value(), 0.5);
        assert_eq!(Score::new(1.0).unwrap().value(), 1.0);
    }

    #[test]
    fn score_new_rejects_out_of_range() {
        assert!(Score::new(1.7).is_none());
        assert!(Score::new(-0.2).is_none());
        assert!(Score::new(1.000_001).is_none());
    }

    #[test]
    fn score_new_rejects_non_finite() {
        assert!(Score::new(f64::NAN).is_none());
        assert!(Score::new(f64::INFINITY).is_none());
    }

    #[test]
    fn score_percent_label_uses_decimals() {
        let score = Score::new(0.875).unwrap();
        assert_eq!(score.percent_label(0), "88%");
        assert_eq!(score.percent_label(1), "87.5%");
    }

    #[test]
    fn score_displays_whole_percent() {
        assert_eq!(format!("{}", Score::new(0.25).unwrap()), "25%");
    }
}
