//! Attrition Watch - debounced "fight to the last man" gating for battle hosts

pub mod attrition;
pub mod core;
