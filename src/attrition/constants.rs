//! Attrition engine constants - all tunable values in one place

// Sampling
pub const UPDATE_INTERVAL: f32 = 1.0; // simulated seconds between count refreshes

// Absolute mode (headcount below which a side starts being watched)
pub const ABSOLUTE_THRESHOLD_MIN: u32 = 10;
pub const ABSOLUTE_THRESHOLD_MAX: u32 = 500;
pub const DEFAULT_ENEMY_ABSOLUTE_THRESHOLD: u32 = 100;
pub const DEFAULT_PLAYER_ABSOLUTE_THRESHOLD: u32 = 50;

// Percentage mode (casualties as share of the captured baseline)
pub const PERCENTAGE_THRESHOLD_MIN: f32 = 5.0;
pub const PERCENTAGE_THRESHOLD_MAX: f32 = 100.0;
pub const DEFAULT_ENEMY_PERCENTAGE_THRESHOLD: f32 = 50.0;
pub const DEFAULT_PLAYER_PERCENTAGE_THRESHOLD: f32 = 50.0;

// Debounce (consecutive qualifying samples, one sample per UPDATE_INTERVAL)
pub const CONFIRMATION_WINDOW_MIN: u32 = 1;
pub const CONFIRMATION_WINDOW_MAX: u32 = 100;
pub const DEFAULT_CONFIRMATION_WINDOW: u32 = 20;
