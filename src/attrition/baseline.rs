//! Session baseline for percentage mode
//!
//! The denominator for casualty percentage is everything a team brought to
//! the field: active troops plus reinforcements still queued. It is captured
//! once, after deployment, and then frozen for the rest of the session.

use serde::{Deserialize, Serialize};

use crate::attrition::sampler::TeamPair;
use crate::core::types::Side;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BaselineCounts {
    pub initial_attacker_total: u32,
    pub initial_defender_total: u32,
    pub has_baseline: bool,
}

impl BaselineCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture from an attacker/defender pair if not captured yet.
    ///
    /// Waits until deployment has finished and both teams have troops on the
    /// field. Returns `true` only on the refresh that captured.
    pub fn try_capture(&mut self, field: &TeamPair, deployment_complete: bool) -> bool {
        if self.has_baseline || !deployment_complete {
            return false;
        }
        if field.first.active == 0 || field.second.active == 0 {
            return false;
        }

        self.initial_attacker_total = field.first.total_strength();
        self.initial_defender_total = field.second.total_strength();
        self.has_baseline = true;
        true
    }

    /// Baseline of the team backing `side`
    ///
    /// `None` before capture, when the topology is unknown, or when the
    /// captured total is zero.
    pub fn initial_total_for(&self, side: Side, player_is_attacker: Option<bool>) -> Option<u32> {
        if !self.has_baseline {
            return None;
        }
        let side_attacks = match side {
            Side::Player => player_is_attacker?,
            Side::Enemy => !player_is_attacker?,
        };
        let total = if side_attacks {
            self.initial_attacker_total
        } else {
            self.initial_defender_total
        };
        (total > 0).then_some(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attrition::host::TeamReport;

    fn pair(attacker: u32, attacker_pending: u32, defender: u32, defender_pending: u32) -> TeamPair {
        TeamPair {
            first: TeamReport {
                pending_reinforcements: attacker_pending,
                ..TeamReport::new(attacker)
            },
            second: TeamReport {
                pending_reinforcements: defender_pending,
                ..TeamReport::new(defender)
            },
        }
    }

    #[test]
    fn test_capture_includes_reinforcements() {
        let mut baseline = BaselineCounts::new();
        assert!(baseline.try_capture(&pair(150, 50, 100, 0), true));
        assert_eq!(baseline.initial_attacker_total, 200);
        assert_eq!(baseline.initial_defender_total, 100);
    }

    #[test]
    fn test_no_capture_while_a_side_is_empty() {
        let mut baseline = BaselineCounts::new();
        assert!(!baseline.try_capture(&pair(150, 0, 0, 300), true));
        assert!(!baseline.has_baseline);
    }

    #[test]
    fn test_no_capture_during_deployment() {
        let mut baseline = BaselineCounts::new();
        assert!(!baseline.try_capture(&pair(150, 0, 100, 0), false));
        assert!(baseline.try_capture(&pair(150, 0, 100, 0), true));
    }

    #[test]
    fn test_captured_once() {
        let mut baseline = BaselineCounts::new();
        baseline.try_capture(&pair(150, 0, 100, 0), true);
        assert!(!baseline.try_capture(&pair(500, 0, 500, 0), true));
        assert_eq!(baseline.initial_attacker_total, 150);
    }

    #[test]
    fn test_side_maps_through_topology() {
        let mut baseline = BaselineCounts::new();
        baseline.try_capture(&pair(200, 0, 120, 0), true);

        assert_eq!(baseline.initial_total_for(Side::Player, Some(true)), Some(200));
        assert_eq!(baseline.initial_total_for(Side::Enemy, Some(true)), Some(120));
        assert_eq!(baseline.initial_total_for(Side::Player, Some(false)), Some(120));
        assert_eq!(baseline.initial_total_for(Side::Enemy, None), None);
    }
}
