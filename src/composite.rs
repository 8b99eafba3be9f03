//! Weighted composites with missing-signal renormalization
//!
//! A composite score blends several component scores by weight. Components
//! whose underlying signal is missing are excluded and the divisor shrinks to
//! the weights that remain, so a missing signal neither drags the score down
//! nor needs a made-up value.

use serde::{Deserialize, Serialize};

/// One input to a weighted composite
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightedComponent {
    pub weight: f64,
    /// Component score on the composite's scale
    pub value: f64,
    /// Whether the underlying signal was observed
    pub present: bool,
}

impl WeightedComponent {
    pub fn new(weight: f64, value: f64, present: bool) -> Self {
        Self {
            weight,
            value,
            present,
        }
    }

    /// Component that is present only when `raw` is a positive reading.
    ///
    /// `score` maps the raw reading onto the composite scale and is not called
    /// for missing readings.
    pub fn from_reading(weight: f64, raw: Option<f64>, score: impl FnOnce(f64) -> f64) -> Self {
        match raw {
            Some(r) if r > 0.0 => Self::new(weight, score(r), true),
            _ => Self::new(weight, 0.0, false),
        }
    }
}

/// `Σ(weight·value) / Σ(weight)` over present components.
///
/// Returns `None` when nothing is present or the present weights sum to zero.
pub fn weighted_average(components: &[WeightedComponent]) -> Option<f64> {
    let divisor: f64 = components
        .iter()
        .filter(|c| c.present)
        .map(|c| c.weight)
        .sum();

    if divisor <= 0.0 {
        return None;
    }

    // A lone present component must come back exactly as its value
    Some(
        components
            .iter()
            .filter(|c| c.present)
            .map(|c| (c.weight / divisor) * c.value)
            .sum(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_present() {
        let components = [
            WeightedComponent::new(0.4, 88.0, true),
            WeightedComponent::new(0.4, 100.0, true),
            WeightedComponent::new(0.2, 100.0, true),
        ];
        assert!((weighted_average(&components).unwrap() - 95.2).abs() < 1e-9);
    }

    #[test]
    fn test_missing_component_renormalizes() {
        let components = [
            WeightedComponent::new(0.4, 80.0, true),
            WeightedComponent::new(0.4, 0.0, false),
            WeightedComponent::new(0.2, 50.0, true),
        ];
        // (0.4*80 + 0.2*50) / 0.6
        assert!((weighted_average(&components).unwrap() - 70.0).abs() < 1e-9);
    }

    #[test]
    fn test_nothing_present() {
        let components = [WeightedComponent::new(0.4, 90.0, false)];
        assert_eq!(weighted_average(&components), None);
        assert_eq!(weighted_average(&[]), None);
    }

    #[test]
    fn test_from_reading() {
        let present = WeightedComponent::from_reading(0.4, Some(40.0), |v| v * 2.0);
        assert!(present.present);
        assert_eq!(present.value, 80.0);

        assert!(!WeightedComponent::from_reading(0.4, Some(0.0), |v| v).present);
        assert!(!WeightedComponent::from_reading(0.4, None, |v| v).present);
    }

    #[test]
    fn test_single_component_is_exact() {
        for value in [21.5, 40.5, 88.5, 93.5] {
            let components = [
                WeightedComponent::new(0.4, value, true),
                WeightedComponent::new(0.4, 0.0, false),
                WeightedComponent::new(0.2, 0.0, false),
            ];
            assert_eq!(weighted_average(&components), Some(value));
        }
    }
}
