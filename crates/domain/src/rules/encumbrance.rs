//! Encumbrance thresholds and status
//!
//! Carrying capacity starts from fixed base weights (encumbered 75, heavily
//! encumbered 150, maximum 300) and shifts by bracketed strength and
//! constitution deltas. The heavy threshold moves by double the combined
//! threshold delta. Floors: encumbered never below 40, heavy never below 60,
//! maximum never below 100.

use serde::{Deserialize, Serialize};

const BASE_ENCUMBERED: f64 = 75.0;
const BASE_HEAVY_ENCUMBERED: f64 = 150.0;
const BASE_MAXIMUM_CAPACITY: f64 = 300.0;

const FLOOR_ENCUMBERED: f64 = 40.0;
const FLOOR_HEAVY_ENCUMBERED: f64 = 60.0;
const FLOOR_MAXIMUM_CAPACITY: f64 = 100.0;

/// Weights at which the encumbrance effects set in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EncumbranceThresholds {
    /// Movement is reduced above this weight
    pub encumbered: f64,
    /// Heavy penalties above this weight
    pub heavy_encumbered: f64,
    /// Cannot carry more than this
    pub maximum_capacity: f64,
}

/// (threshold delta, maximum-capacity delta) for a strength score.
fn strength_deltas(strength: u8) -> (f64, f64) {
    match strength {
        ..=6 => (-25.0, -100.0),
        7..=8 => (-15.0, -50.0),
        9..=12 => (0.0, 0.0),
        13..=14 => (15.0, 50.0),
        15..=16 => (25.0, 100.0),
        17 => (35.0, 150.0),
        _ => (50.0, 200.0),
    }
}

/// (threshold delta, maximum-capacity delta) for a constitution score.
fn constitution_deltas(constitution: u8) -> (f64, f64) {
    match constitution {
        ..=6 => (-10.0, -25.0),
        7..=8 => (-5.0, -15.0),
        9..=12 => (0.0, 0.0),
        13..=14 => (5.0, 15.0),
        15..=16 => (10.0, 25.0),
        _ => (15.0, 35.0),
    }
}

impl EncumbranceThresholds {
    /// Thresholds for a character with the given strength and constitution.
    pub fn for_scores(strength: u8, constitution: u8) -> Self {
        let (str_delta, str_max_delta) = strength_deltas(strength);
        let (con_delta, con_max_delta) = constitution_deltas(constitution);

        let combined = str_delta + con_delta;
        Self {
            encumbered: (BASE_ENCUMBERED + combined).max(FLOOR_ENCUMBERED),
            heavy_encumbered: (BASE_HEAVY_ENCUMBERED + combined * 2.0)
                .max(FLOOR_HEAVY_ENCUMBERED),
            maximum_capacity: (BASE_MAXIMUM_CAPACITY + str_max_delta + con_max_delta)
                .max(FLOOR_MAXIMUM_CAPACITY),
        }
    }
}

/// A character's current encumbrance state against their thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EncumbranceStatus {
    pub encumbered: bool,
    pub heavy_encumbered: bool,
    /// Cannot move normally
    pub overloaded: bool,
    pub current_weight: f64,
    pub maximum_capacity: f64,
    pub weight_remaining: f64,
    /// How full the inventory is, 0-100
    pub percent_full: u8,
}

impl EncumbranceStatus {
    pub fn evaluate(current_weight: f64, thresholds: EncumbranceThresholds) -> Self {
        let percent_full = if thresholds.maximum_capacity > 0.0 {
            ((current_weight / thresholds.maximum_capacity) * 100.0)
                .round()
                .min(100.0) as u8
        } else {
            0
        };

        Self {
            encumbered: current_weight > thresholds.encumbered,
            heavy_encumbered: current_weight > thresholds.heavy_encumbered,
            overloaded: current_weight > thresholds.maximum_capacity,
            current_weight,
            maximum_capacity: thresholds.maximum_capacity,
            weight_remaining: thresholds.maximum_capacity - current_weight,
            percent_full,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn average_scores_keep_base_thresholds() {
        let t = EncumbranceThresholds::for_scores(10, 10);
        assert_eq!(t.encumbered, 75.0);
        assert_eq!(t.heavy_encumbered, 150.0);
        assert_eq!(t.maximum_capacity, 300.0);
    }

    #[test]
    fn strong_tough_character_carries_more() {
        let t = EncumbranceThresholds::for_scores(18, 17);
        // 75 + 50 + 15, 150 + 2*(50+15), 300 + 200 + 35
        assert_eq!(t.encumbered, 140.0);
        assert_eq!(t.heavy_encumbered, 280.0);
        assert_eq!(t.maximum_capacity, 535.0);
    }

    #[test]
    fn floors_hold_for_minimum_scores() {
        let t = EncumbranceThresholds::for_scores(3, 3);
        // 75 - 35 = 40, 150 - 70 = 80, 300 - 125 = 175 (only the first hits a floor)
        assert_eq!(t.encumbered, 40.0);
        assert!(t.encumbered >= 40.0);
        assert!(t.heavy_encumbered >= 60.0);
        assert!(t.maximum_capacity >= 100.0);
    }

    #[test]
    fn thresholds_are_monotonic_in_strength() {
        let mut prev = EncumbranceThresholds::for_scores(3, 10);
        for strength in 4..=18u8 {
            let t = EncumbranceThresholds::for_scores(strength, 10);
            assert!(t.encumbered >= prev.encumbered);
            assert!(t.heavy_encumbered >= prev.heavy_encumbered);
            assert!(t.maximum_capacity >= prev.maximum_capacity);
            prev = t;
        }
    }

    #[test]
    fn status_implication_chain() {
        let thresholds = EncumbranceThresholds::for_scores(10, 10);
        for weight in [0.0, 50.0, 80.0, 160.0, 301.0, 1000.0] {
            let status = EncumbranceStatus::evaluate(weight, thresholds);
            if status.overloaded {
                assert!(status.heavy_encumbered);
            }
            if status.heavy_encumbered {
                assert!(status.encumbered);
            }
        }
    }

    #[test]
    fn weight_over_encumbered_threshold_only() {
        let thresholds = EncumbranceThresholds::for_scores(10, 10);
        let status = EncumbranceStatus::evaluate(80.0, thresholds);
        assert!(status.encumbered);
        assert!(!status.heavy_encumbered);
        assert!(!status.overloaded);
    }

    #[test]
    fn percent_full_clamps_at_100() {
        let thresholds = EncumbranceThresholds::for_scores(10, 10);
        let status = EncumbranceStatus::evaluate(450.0, thresholds);
        assert_eq!(status.percent_full, 100);
        let half = EncumbranceStatus::evaluate(150.0, thresholds);
        assert_eq!(half.percent_full, 50);
    }
}
