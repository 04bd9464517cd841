//! Per-side mutable counters

use serde::{Deserialize, Serialize};

use crate::core::config::ThresholdMode;
use crate::core::types::PerSide;

/// Debounce bookkeeping for one side, scoped to one session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SideState {
    /// Headcount at the previous refresh
    pub last_observed_count: u32,
    /// Consecutive below-threshold samples while not yet confirmed
    pub below_streak: u32,
    /// Latched verdict
    pub confirmed: bool,
    /// Mode that set the latch; percentage latches never revert
    pub latched_by: Option<ThresholdMode>,
}

impl SideState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Drop the streak and the latch, keeping the last observation
    pub fn clear(&mut self) {
        self.below_streak = 0;
        self.confirmed = false;
        self.latched_by = None;
    }

    pub fn latch(&mut self, mode: ThresholdMode) {
        self.confirmed = true;
        self.latched_by = Some(mode);
    }

    /// Confirmed by casualty percentage; sticky for the session
    pub fn is_permanently_latched(&self) -> bool {
        self.confirmed && self.latched_by == Some(ThresholdMode::Percentage)
    }

    pub fn is_idle(&self) -> bool {
        self.below_streak == 0 && !self.confirmed
    }
}

pub type SideStates = PerSide<SideState>;
