//! Attrition confirmation - "low enough, for long enough"
//!
//! Decides per side whether its headcount has dropped far enough, and stayed
//! there long enough, to let the host's panic and retreat behavior back in.
//!
//! Data flow per poll:
//! session check -> throttled sample -> baseline -> evaluate -> debounce

pub mod baseline;
pub mod constants;
pub mod debounce;
pub mod encounter;
pub mod engine;
pub mod evaluator;
pub mod host;
pub mod morale_gate;
pub mod sampler;
pub mod scripted;
pub mod session;
pub mod side_state;

// Re-exports for convenient access
pub use baseline::BaselineCounts;
pub use constants::*;
pub use debounce::{step, DebounceState, Transition};
pub use encounter::{
    is_non_siege_battle, is_siege_battle, is_valid_field_battle, Encounter, EncounterKind,
};
pub use engine::{AttritionEngine, PollReport};
pub use evaluator::{casualty_percentage, evaluate, Signal};
pub use host::{BattleHost, TeamReport};
pub use morale_gate::{MoraleOverrides, TeamRelation};
pub use sampler::{CountSnapshot, Sampler};
pub use scripted::ScriptedBattle;
pub use session::{SessionChange, SessionTracker};
pub use side_state::{SideState, SideStates};
