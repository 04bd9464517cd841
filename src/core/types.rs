//! Core type definitions used throughout the codebase

use std::ops::{Index, IndexMut};

use derive_more::Display;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity of one continuous battle.
///
/// The host creates a fresh id whenever a battle starts; the engine only ever
/// compares ids, it never mints or mutates them on the host's behalf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[display(fmt = "{}", _0)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

/// Simulated battle time, in host seconds
pub type SimTime = f32;

/// The two sides tracked by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    #[display(fmt = "enemy")]
    Enemy,
    #[display(fmt = "player")]
    Player,
}

impl Side {
    pub fn all() -> &'static [Side] {
        &[Side::Enemy, Side::Player]
    }

    /// Host team that backs this side
    pub fn team_role(self) -> TeamRole {
        match self {
            Side::Enemy => TeamRole::Enemy,
            Side::Player => TeamRole::Player,
        }
    }
}

/// How the host addresses its teams.
///
/// Attacker/defender and player/enemy are two framings of the same two
/// teams; which attacker maps to which side is a topology fact from the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
pub enum TeamRole {
    #[display(fmt = "attacker")]
    Attacker,
    #[display(fmt = "defender")]
    Defender,
    #[display(fmt = "player")]
    Player,
    #[display(fmt = "enemy")]
    Enemy,
}

/// One value per tracked side
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PerSide<T> {
    pub enemy: T,
    pub player: T,
}

impl<T> PerSide<T> {
    pub fn new(enemy: T, player: T) -> Self {
        Self { enemy, player }
    }
}

impl<T> Index<Side> for PerSide<T> {
    type Output = T;

    fn index(&self, side: Side) -> &T {
        match side {
            Side::Enemy => &self.enemy,
            Side::Player => &self.player,
        }
    }
}

impl<T> IndexMut<Side> for PerSide<T> {
    fn index_mut(&mut self, side: Side) -> &mut T {
        match side {
            Side::Enemy => &mut self.enemy,
            Side::Player => &mut self.player,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_ids_are_distinct() {
        assert_ne!(SessionId::new(), SessionId::new());
    }

    #[test]
    fn test_per_side_indexing() {
        let mut values = PerSide::new(100, 50);
        assert_eq!(values[Side::Enemy], 100);
        assert_eq!(values[Side::Player], 50);

        values[Side::Player] = 75;
        assert_eq!(values.player, 75);
    }

    #[test]
    fn test_side_display_matches_serde_name() {
        assert_eq!(Side::Enemy.to_string(), "enemy");
        assert_eq!(serde_json::to_string(&Side::Player).unwrap(), "\"player\"");
        assert_eq!(TeamRole::Attacker.to_string(), "attacker");
    }
}
