//! Confirmation debouncer
//!
//! Turns a noisy per-sample "below" signal into a sticky verdict.
//!
//! Absolute mode watches a live headcount that reinforcements can raise, so
//! it needs a window of consecutive qualifying samples and reverts the moment
//! the count goes up. Percentage mode watches cumulative casualties, which
//! only grow; the first qualifying sample latches for the whole session.
//!
//! ```text
//! Normal --below--> Watching(1) --below--> ... Watching(W-1) --below--> Confirmed
//!   ^                   |                                                 |
//!   +--- rise / clear --+------------------- rise / clear ----------------+
//! ```

use serde::{Deserialize, Serialize};

use crate::attrition::evaluator::Signal;
use crate::attrition::side_state::SideState;
use crate::core::config::ThresholdMode;

/// Observable debounce state of one side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DebounceState {
    Normal,
    Watching(u32),
    Confirmed,
}

/// Change in the latched verdict caused by one step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Transition {
    #[default]
    Unchanged,
    Confirmed,
    Revoked,
}

impl Transition {
    fn between(was: bool, now: bool) -> Self {
        match (was, now) {
            (false, true) => Transition::Confirmed,
            (true, false) => Transition::Revoked,
            _ => Transition::Unchanged,
        }
    }
}

impl SideState {
    pub fn debounce_state(&self) -> DebounceState {
        if self.confirmed {
            DebounceState::Confirmed
        } else if self.below_streak > 0 {
            DebounceState::Watching(self.below_streak)
        } else {
            DebounceState::Normal
        }
    }
}

/// Advance one side by one sample.
///
/// `count` is the side's live headcount at this sample. The last observed
/// count is updated unconditionally.
pub fn step(
    state: &mut SideState,
    count: u32,
    signal: Signal,
    mode: ThresholdMode,
    window: u32,
) -> Transition {
    let was_confirmed = state.confirmed;

    match (mode, signal) {
        (ThresholdMode::Absolute, Signal::Below | Signal::Clear) => {
            step_absolute(state, count, signal.is_below(), window)
        }
        (ThresholdMode::Percentage, Signal::Below) => {
            if !state.is_permanently_latched() {
                state.below_streak = 0;
                state.latch(ThresholdMode::Percentage);
            }
        }
        // Absolute streaks only span consecutive absolute samples
        (_, Signal::NoBaseline) | (ThresholdMode::Percentage, Signal::Clear) => {
            if !state.confirmed {
                state.below_streak = 0;
            }
        }
    }

    state.last_observed_count = count;
    Transition::between(was_confirmed, state.confirmed)
}

fn step_absolute(state: &mut SideState, count: u32, below: bool, window: u32) {
    // From Normal there is nothing to revert, so the first dip counts even if
    // the headcount rose since the previous sample.
    if !state.is_idle() && count > state.last_observed_count {
        if !state.is_permanently_latched() {
            state.clear();
        }
        return;
    }

    if below {
        if !state.confirmed {
            state.below_streak += 1;
            if state.below_streak >= window {
                state.latch(ThresholdMode::Absolute);
            }
        }
    } else if !state.is_permanently_latched() {
        state.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn absolute(state: &mut SideState, count: u32, threshold: u32, window: u32) -> Transition {
        let signal = if count < threshold { Signal::Below } else { Signal::Clear };
        step(state, count, signal, ThresholdMode::Absolute, window)
    }

    #[test]
    fn test_window_of_one_confirms_immediately() {
        let mut state = SideState::new();
        assert_eq!(absolute(&mut state, 50, 100, 1), Transition::Confirmed);
        assert_eq!(state.debounce_state(), DebounceState::Confirmed);
    }

    #[test]
    fn test_debounce_floor() {
        let mut state = SideState::new();
        absolute(&mut state, 150, 100, 5);
        for (i, count) in [90, 88, 86, 84].into_iter().enumerate() {
            absolute(&mut state, count, 100, 5);
            assert_eq!(state.debounce_state(), DebounceState::Watching(i as u32 + 1));
        }
        assert!(!state.confirmed);

        assert_eq!(absolute(&mut state, 82, 100, 5), Transition::Confirmed);
    }

    #[test]
    fn test_rise_resets_watch() {
        let mut state = SideState::new();
        absolute(&mut state, 90, 100, 5);
        absolute(&mut state, 85, 100, 5);
        assert_eq!(state.debounce_state(), DebounceState::Watching(2));

        absolute(&mut state, 95, 100, 5);
        assert_eq!(state.debounce_state(), DebounceState::Normal);
        assert_eq!(state.last_observed_count, 95);
    }

    #[test]
    fn test_rise_revokes_confirmation() {
        let mut state = SideState::new();
        absolute(&mut state, 60, 100, 2);
        absolute(&mut state, 55, 100, 2);
        assert!(state.confirmed);

        assert_eq!(absolute(&mut state, 70, 100, 2), Transition::Revoked);
        assert_eq!(state.below_streak, 0);

        // Full window needed again
        absolute(&mut state, 65, 100, 2);
        assert!(!state.confirmed);
        assert_eq!(absolute(&mut state, 64, 100, 2), Transition::Confirmed);
    }

    #[test]
    fn test_steady_count_keeps_confirmation() {
        let mut state = SideState::new();
        absolute(&mut state, 60, 100, 1);
        for _ in 0..10 {
            assert_eq!(absolute(&mut state, 60, 100, 1), Transition::Unchanged);
        }
        assert!(state.confirmed);
    }

    #[test]
    fn test_recovery_above_threshold_clears() {
        let mut state = SideState::new();
        absolute(&mut state, 90, 100, 5);
        absolute(&mut state, 90, 100, 5);

        // Threshold lowered by a settings change: same count is now clear
        absolute(&mut state, 90, 80, 5);
        assert_eq!(state.debounce_state(), DebounceState::Normal);
    }

    #[test]
    fn test_first_dip_counts_after_rise_from_normal() {
        let mut state = SideState::new();
        absolute(&mut state, 20, 100, 3);
        assert_eq!(state.debounce_state(), DebounceState::Watching(1));

        let mut state = SideState {
            last_observed_count: 10,
            ..SideState::new()
        };
        absolute(&mut state, 40, 100, 3);
        assert_eq!(state.debounce_state(), DebounceState::Watching(1));
    }

    #[test]
    fn test_percentage_latches_without_window() {
        let mut state = SideState::new();
        let t = step(&mut state, 90, Signal::Below, ThresholdMode::Percentage, 50);
        assert_eq!(t, Transition::Confirmed);
        assert!(state.is_permanently_latched());
    }

    #[test]
    fn test_percentage_latch_survives_absolute_rise() {
        let mut state = SideState::new();
        step(&mut state, 40, Signal::Below, ThresholdMode::Percentage, 20);

        // Settings flipped back to absolute, reinforcements arrive
        let t = step(&mut state, 400, Signal::Clear, ThresholdMode::Absolute, 20);
        assert_eq!(t, Transition::Unchanged);
        assert!(state.confirmed);
    }

    #[test]
    fn test_absolute_latch_survives_switch_to_percentage() {
        let mut state = SideState::new();
        absolute(&mut state, 30, 100, 1);
        let t = step(&mut state, 30, Signal::Clear, ThresholdMode::Percentage, 1);
        assert_eq!(t, Transition::Unchanged);
        assert!(state.confirmed);
    }

    #[test]
    fn test_no_baseline_drops_unconfirmed_streak() {
        let mut state = SideState {
            below_streak: 3,
            ..SideState::new()
        };
        let t = step(&mut state, 77, Signal::NoBaseline, ThresholdMode::Percentage, 5);
        assert_eq!(t, Transition::Unchanged);
        assert_eq!(state.debounce_state(), DebounceState::Normal);
        assert_eq!(state.last_observed_count, 77);
    }

    #[test]
    fn test_streak_does_not_carry_across_percentage_detour() {
        let mut state = SideState::new();
        absolute(&mut state, 90, 100, 3);
        absolute(&mut state, 85, 100, 3);
        assert_eq!(state.debounce_state(), DebounceState::Watching(2));

        // Reinforcements arrive and leave again while in percentage mode
        step(&mut state, 300, Signal::Clear, ThresholdMode::Percentage, 3);
        step(&mut state, 80, Signal::Clear, ThresholdMode::Percentage, 3);
        assert_eq!(state.below_streak, 0);

        assert_eq!(absolute(&mut state, 79, 100, 3), Transition::Unchanged);
        assert!(!state.confirmed);
        assert_eq!(state.debounce_state(), DebounceState::Watching(1));
    }

    #[test]
    fn test_percentage_clear_keeps_absolute_latch_and_streak() {
        let mut state = SideState::new();
        absolute(&mut state, 40, 100, 2);
        absolute(&mut state, 30, 100, 2);
        assert!(state.confirmed);

        step(&mut state, 30, Signal::NoBaseline, ThresholdMode::Percentage, 2);
        step(&mut state, 30, Signal::Clear, ThresholdMode::Percentage, 2);
        assert!(state.confirmed);
        assert_eq!(state.below_streak, 2);
    }
}
