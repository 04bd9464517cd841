pub mod config;
pub mod error;
pub mod types;

pub use config::{AttritionConfig, ThresholdMode};
pub use types::{PerSide, SessionId, Side, SimTime, TeamRole};
