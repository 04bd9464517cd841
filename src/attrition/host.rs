//! What the engine reads from the host simulation
//!
//! Every method is a read. Absent data is `None`, never a panic: a team that
//! has not spawned yet or a battle that already ended simply reports nothing.

use serde::{Deserialize, Serialize};

use crate::attrition::encounter::Encounter;
use crate::core::types::{SessionId, SimTime, TeamRole};

/// Per-team troop figures as the host currently sees them
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamReport {
    /// Troops alive and on the field
    pub active: u32,
    /// Troops still waiting to spawn as reinforcements
    pub pending_reinforcements: u32,
    /// Casualty ledger, one entry per formation, when the host keeps one
    pub formation_casualties: Option<Vec<u32>>,
    /// Raw death counter
    pub raw_deaths: u32,
}

impl TeamReport {
    pub fn new(active: u32) -> Self {
        Self {
            active,
            ..Self::default()
        }
    }

    /// Active troops plus everything still to spawn
    pub fn total_strength(&self) -> u32 {
        self.active.saturating_add(self.pending_reinforcements)
    }

    /// Known deaths, preferring the formation ledger over the raw counter.
    ///
    /// An empty ledger means no formation has reported yet and falls back to
    /// the raw counter.
    pub fn casualties(&self) -> u32 {
        match &self.formation_casualties {
            Some(ledger) if !ledger.is_empty() => {
                ledger.iter().fold(0u32, |acc, &n| acc.saturating_add(n))
            }
            _ => self.raw_deaths,
        }
    }
}

/// The host side of the engine's contract.
///
/// Implemented by whatever owns the battle; the engine calls in, never the
/// other way round.
pub trait BattleHost {
    /// Current battle, or `None` between battles
    fn session(&self) -> Option<SessionId>;

    /// Simulation clock; must not go backwards within a session
    fn current_time(&self) -> SimTime;

    fn team(&self, role: TeamRole) -> Option<TeamReport>;

    /// Whether initial deployment has finished spawning
    fn is_deployment_complete(&self) -> bool {
        true
    }

    /// `None` when either the player or attacker team is missing
    fn player_is_attacker(&self) -> Option<bool>;

    fn encounter(&self) -> Option<Encounter>;
}
