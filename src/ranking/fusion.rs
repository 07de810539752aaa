//! Weighted fusion of two normalized signals into one ranking score

/// Outcome of one scoring signal for one candidate. Failure is an explicit,
/// testable branch: fusion substitutes the signal's defined floor and the
/// reason surfaces on the candidate's result.
#[derive(Debug, Clone, PartialEq)]
pub enum Signal {
    Score(f32),
    Failed(String),
}

impl Signal {
    /// The signal value, or the given floor when the signal failed.
    pub fn value_or(&self, floor: f32) -> f32 {
        match self {
            Signal::Score(value) => *value,
            Signal::Failed(_) => floor,
        }
    }

    pub fn failure(&self) -> Option<&str> {
        match self {
            Signal::Score(_) => None,
            Signal::Failed(reason) => Some(reason.as_str()),
        }
    }
}

/// Linear blend of two signals already in [0, 1]:
/// `weight_a * a + (1 - weight_a) * b`. Both fusion modes are instances of
/// this one formula; the output needs no further clamping.
pub fn blend(a: f32, b: f32, weight_a: f32) -> f32 {
    weight_a * a + (1.0 - weight_a) * b
}

/// Rounds to 4 decimal digits for presentation stability. Sort comparisons
/// use the unrounded value to avoid rank instability from repeated rounding.
pub fn round4(score: f32) -> f32 {
    (score * 10_000.0).round() / 10_000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blend_endpoints() {
        // Weight 1.0 passes signal a through exactly; 0.0 passes b.
        assert_eq!(blend(0.83, 0.21, 1.0), 0.83);
        assert_eq!(blend(0.83, 0.21, 0.0), 0.21);
    }

    #[test]
    fn test_blend_default_alpha() {
        let fused = blend(0.8, 0.4, 0.7);
        assert!((fused - 0.68).abs() < 1e-6);
    }

    #[test]
    fn test_blend_stays_in_unit_range() {
        for &(a, b, w) in &[(0.0, 0.0, 0.5), (1.0, 1.0, 0.3), (1.0, 0.0, 0.7), (0.0, 1.0, 0.7)] {
            let fused = blend(a, b, w);
            assert!((0.0..=1.0).contains(&fused));
        }
    }

    #[test]
    fn test_round4() {
        assert_eq!(round4(0.123_456), 0.1235);
        assert_eq!(round4(0.699_99), 0.7);
        assert_eq!(round4(0.0), 0.0);
    }

    #[test]
    fn test_signal_floor_substitution() {
        let failed = Signal::Failed("timeout".to_string());
        assert_eq!(failed.value_or(0.0), 0.0);
        assert_eq!(failed.failure(), Some("timeout"));

        let ok = Signal::Score(0.42);
        assert_eq!(ok.value_or(0.0), 0.42);
        assert!(ok.failure().is_none());
    }
}
