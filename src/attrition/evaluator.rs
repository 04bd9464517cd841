//! Instantaneous threshold evaluation
//!
//! Answers "is this side below threshold right now" for one sample. Holds no
//! state; the debouncer decides what a run of answers means.

use serde::{Deserialize, Serialize};

use crate::attrition::host::TeamReport;
use crate::core::config::{AttritionConfig, ThresholdMode};
use crate::core::types::Side;

/// Result of evaluating one sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Signal {
    Below,
    Clear,
    /// Percentage mode before a baseline exists; must not touch any latch
    NoBaseline,
}

impl Signal {
    pub fn is_below(self) -> bool {
        matches!(self, Signal::Below)
    }
}

/// Casualties as a percentage of the baseline total
pub fn casualty_percentage(casualties: u32, initial_total: u32) -> Option<f32> {
    if initial_total == 0 {
        return None;
    }
    Some(casualties as f32 / initial_total as f32 * 100.0)
}

pub fn evaluate_absolute(count: u32, threshold: u32) -> Signal {
    if count < threshold {
        Signal::Below
    } else {
        Signal::Clear
    }
}

pub fn evaluate_percentage(casualties: u32, initial_total: Option<u32>, threshold: f32) -> Signal {
    match initial_total.and_then(|total| casualty_percentage(casualties, total)) {
        Some(pct) if pct >= threshold => Signal::Below,
        Some(_) => Signal::Clear,
        None => Signal::NoBaseline,
    }
}

/// Evaluate a side's report under the currently configured mode
pub fn evaluate(
    side: Side,
    report: &TeamReport,
    config: &AttritionConfig,
    initial_total: Option<u32>,
) -> Signal {
    match config.mode {
        ThresholdMode::Absolute => evaluate_absolute(report.active, config.absolute_threshold[side]),
        ThresholdMode::Percentage => evaluate_percentage(
            report.casualties(),
            initial_total,
            config.percentage_threshold[side],
        ),
    }
}
