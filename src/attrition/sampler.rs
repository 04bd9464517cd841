//! Throttled count sampling
//!
//! Host queries can arrive many times per tick. Counts are refreshed at most
//! once per `UPDATE_INTERVAL` of simulated time; in between, every caller sees
//! the previous snapshot.

use serde::{Deserialize, Serialize};

use crate::attrition::constants::UPDATE_INTERVAL;
use crate::attrition::host::{BattleHost, TeamReport};
use crate::core::types::{Side, SimTime, TeamRole};

/// Four-way headcount as of the last refresh
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CountSnapshot {
    pub attacker: u32,
    pub defender: u32,
    pub player: u32,
    pub enemy: u32,
}

impl CountSnapshot {
    pub fn side(&self, side: Side) -> u32 {
        match side {
            Side::Enemy => self.enemy,
            Side::Player => self.player,
        }
    }
}

/// A team pair that was either fully present or not at all
#[derive(Debug, Clone, PartialEq)]
pub struct TeamPair {
    pub first: TeamReport,
    pub second: TeamReport,
}

fn read_pair(host: &dyn BattleHost, first: TeamRole, second: TeamRole) -> Option<TeamPair> {
    Some(TeamPair {
        first: host.team(first)?,
        second: host.team(second)?,
    })
}

/// Reports gathered by one refresh
#[derive(Debug, Clone, PartialEq)]
pub struct Refresh {
    pub time: SimTime,
    /// Attacker, defender
    pub field: Option<TeamPair>,
    /// Player, enemy
    pub sides: Option<TeamPair>,
}

#[derive(Debug, Clone, Default)]
pub struct Sampler {
    last_sample_time: SimTime,
    counts: CountSnapshot,
}

impl Sampler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn counts(&self) -> CountSnapshot {
        self.counts
    }

    pub fn last_sample_time(&self) -> SimTime {
        self.last_sample_time
    }

    pub fn is_due(&self, now: SimTime) -> bool {
        now - self.last_sample_time >= UPDATE_INTERVAL
    }

    /// Refresh from the host if the interval has elapsed.
    ///
    /// Returns `None` when throttled. A missing team zeroes its pair in the
    /// cache; it never fails.
    pub fn sample(&mut self, host: &dyn BattleHost, now: SimTime) -> Option<Refresh> {
        if !self.is_due(now) {
            return None;
        }
        self.last_sample_time = now;

        let field = read_pair(host, TeamRole::Attacker, TeamRole::Defender);
        let sides = read_pair(host, TeamRole::Player, TeamRole::Enemy);

        let (attacker, defender) = field
            .as_ref()
            .map_or((0, 0), |p| (p.first.active, p.second.active));
        let (player, enemy) = sides
            .as_ref()
            .map_or((0, 0), |p| (p.first.active, p.second.active));

        self.counts = CountSnapshot {
            attacker,
            defender,
            player,
            enemy,
        };
        tracing::trace!(
            "Sampled at {:.1}: attacker={} defender={} player={} enemy={}",
            now,
            attacker,
            defender,
            player,
            enemy
        );

        Some(Refresh { time: now, field, sides })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attrition::scripted::ScriptedBattle;

    #[test]
    fn test_first_sample_waits_one_interval() {
        let battle = ScriptedBattle::field_battle(200, 150);
        let mut sampler = Sampler::new();

        assert!(sampler.sample(&battle, 0.5).is_none());
        assert!(sampler.sample(&battle, 1.0).is_some());
    }

    #[test]
    fn test_throttle_returns_cached_snapshot() {
        let mut battle = ScriptedBattle::field_battle(200, 150);
        let mut sampler = Sampler::new();
        sampler.sample(&battle, 1.0);
        let before = sampler.counts();

        battle.set_active(TeamRole::Enemy, 10);
        assert!(sampler.sample(&battle, 1.9).is_none());
        assert_eq!(sampler.counts(), before);

        assert!(sampler.sample(&battle, 2.0).is_some());
        assert_eq!(sampler.counts().enemy, 10);
    }

    #[test]
    fn test_missing_team_zeroes_pair() {
        let mut battle = ScriptedBattle::field_battle(200, 150);
        let mut sampler = Sampler::new();
        sampler.sample(&battle, 1.0);
        assert_eq!(sampler.counts().attacker, 200);

        // The enemy is also the defender here, so both pairs drop out
        battle.remove_team(TeamRole::Enemy);
        let refresh = sampler.sample(&battle, 2.0).unwrap();
        assert!(refresh.sides.is_none());
        assert!(refresh.field.is_none());
        assert_eq!(sampler.counts(), CountSnapshot::default());
    }

    #[test]
    fn test_snapshot_side_lookup() {
        let snapshot = CountSnapshot {
            attacker: 1,
            defender: 2,
            player: 3,
            enemy: 4,
        };
        assert_eq!(snapshot.side(Side::Player), 3);
        assert_eq!(snapshot.side(Side::Enemy), 4);
    }
}
