//! Probability-of-free-spot buckets and the mock forecast table.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::error::{Result, StudioError};

/// Probability used for unknown segments or hours.
pub const NEUTRAL_PROBABILITY: f64 = 0.5;

pub const HOURS_PER_DAY: u8 = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AvailabilityLevel {
    Low,
    Medium,
    High,
}

impl AvailabilityLevel {
    /// `p <= 0.3` is low, `p >= 0.7` is high, anything between is medium.
    pub fn from_probability(p: f64) -> Self {
        if p <= 0.3 {
            Self::Low
        } else if p >= 0.7 {
            Self::High
        } else {
            Self::Medium
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Self::Low => "#dc2626",
            Self::Medium => "#2563eb",
            Self::High => "#16a34a",
        }
    }

    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            Self::Low => (0xdc, 0x26, 0x26),
            Self::Medium => (0x25, 0x63, 0xeb),
            Self::High => (0x16, 0xa3, 0x4a),
        }
    }
}

/// Line style of one street segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SegmentStyle {
    pub level: AvailabilityLevel,
    pub color: &'static str,
    /// Stroke width in pixels, 2.5 to 4.
    pub weight: f64,
    /// 0.35 to 0.7.
    pub opacity: f64,
}

impl SegmentStyle {
    pub fn for_probability(p: f64) -> Self {
        let level = AvailabilityLevel::from_probability(p);
        Self {
            level,
            color: level.color(),
            weight: 2.5 + p * 1.5,
            opacity: 0.35 + p * 0.35,
        }
    }
}

static MOCK_PROBABILITIES: Lazy<HashMap<&'static str, [f64; 24]>> = Lazy::new(|| {
    HashMap::from([
        ("walther_haeberl_tumblinger_n", [0.75; 24]),
        ("walther_tumblinger_maistra_n", [0.5; 24]),
    ])
});

/// Mock forecast of the chance to find a free spot on `segment_id` at `hour`.
pub fn probability(segment_id: &str, hour: u8) -> f64 {
    MOCK_PROBABILITIES
        .get(segment_id)
        .and_then(|hours| hours.get(hour as usize))
        .copied()
        .unwrap_or(NEUTRAL_PROBABILITY)
}

pub fn validate_hour(hour: u8) -> Result<u8> {
    if hour < HOURS_PER_DAY {
        Ok(hour)
    } else {
        Err(StudioError::validation(format!(
            "hour must be between 0 and 23, got {hour}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_boundaries() {
        assert_eq!(AvailabilityLevel::from_probability(0.0), AvailabilityLevel::Low);
        assert_eq!(AvailabilityLevel::from_probability(0.3), AvailabilityLevel::Low);
        assert_eq!(AvailabilityLevel::from_probability(0.31), AvailabilityLevel::Medium);
        assert_eq!(AvailabilityLevel::from_probability(0.69), AvailabilityLevel::Medium);
        assert_eq!(AvailabilityLevel::from_probability(0.7), AvailabilityLevel::High);
        assert_eq!(AvailabilityLevel::High.color(), "#16a34a");
    }

    #[test]
    fn test_style_range() {
        let empty = SegmentStyle::for_probability(0.0);
        assert_eq!(empty.weight, 2.5);
        assert_eq!(empty.opacity, 0.35);
        assert_eq!(empty.color, "#dc2626");

        let full = SegmentStyle::for_probability(1.0);
        assert_eq!(full.weight, 4.0);
        assert!((full.opacity - 0.7).abs() < 1e-12);
    }

    #[test]
    fn test_mock_probabilities() {
        assert_eq!(probability("walther_haeberl_tumblinger_n", 8), 0.75);
        assert_eq!(probability("walther_tumblinger_maistra_n", 23), 0.5);
        assert_eq!(probability("unknown", 3), NEUTRAL_PROBABILITY);
        assert_eq!(probability("walther_haeberl_tumblinger_n", 24), NEUTRAL_PROBABILITY);
    }

    #[test]
    fn test_validate_hour() {
        assert_eq!(validate_hour(0).unwrap(), 0);
        assert_eq!(validate_hour(23).unwrap(), 23);
        assert!(validate_hour(24).unwrap_err().is_validation());
    }
}
