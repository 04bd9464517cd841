//! Morale overrides driven by attrition verdicts
//!
//! While a side has not been confirmed below threshold it "holds the line":
//! no panic, no casualty-driven morale loss, no coordinated retreat. Once its
//! verdict latches, the host's own values pass through again.
//!
//! Every override takes the host's value and returns the value the host
//! should use. Outside a valid field battle the host value is returned as is.

use serde::{Deserialize, Serialize};

use crate::attrition::encounter::is_valid_field_battle;
use crate::attrition::engine::AttritionEngine;
use crate::attrition::host::BattleHost;
use crate::core::config::AttritionConfig;
use crate::core::types::{Side, TeamRole};

/// How a team relates to the local player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TeamRelation {
    Hostile,
    Friendly,
}

impl TeamRelation {
    /// Resolve a host team role; `None` if the topology is unknown
    pub fn of(role: TeamRole, player_is_attacker: Option<bool>) -> Option<Self> {
        let friendly = match role {
            TeamRole::Player => true,
            TeamRole::Enemy => false,
            TeamRole::Attacker => player_is_attacker?,
            TeamRole::Defender => !player_is_attacker?,
        };
        Some(if friendly {
            TeamRelation::Friendly
        } else {
            TeamRelation::Hostile
        })
    }

    pub fn side(self) -> Side {
        match self {
            TeamRelation::Hostile => Side::Enemy,
            TeamRelation::Friendly => Side::Player,
        }
    }
}

pub struct MoraleOverrides<'a> {
    engine: &'a mut AttritionEngine,
    host: &'a dyn BattleHost,
    config: &'a AttritionConfig,
}

impl<'a> MoraleOverrides<'a> {
    pub fn new(
        engine: &'a mut AttritionEngine,
        host: &'a dyn BattleHost,
        config: &'a AttritionConfig,
    ) -> Self {
        Self {
            engine,
            host,
            config,
        }
    }

    fn in_scope(&self) -> bool {
        self.config.enabled && is_valid_field_battle(self.host.encounter().as_ref())
    }

    fn confirmed(&mut self, side: Side) -> bool {
        self.engine
            .is_side_confirmed_below_threshold(side, self.host, self.config)
    }

    /// Whether the hold-the-line effect applies to a team
    pub fn holds_the_line(&mut self, relation: TeamRelation) -> bool {
        if !self.in_scope() {
            return false;
        }
        match relation {
            TeamRelation::Hostile => !self.confirmed(Side::Enemy),
            TeamRelation::Friendly => {
                self.config.apply_to_player_side && !self.confirmed(Side::Player)
            }
        }
    }

    pub fn can_panic(&mut self, relation: TeamRelation, host_value: bool) -> bool {
        if self.holds_the_line(relation) {
            false
        } else {
            host_value
        }
    }

    /// Scaling the host applies to morale loss from side casualties
    pub fn casualties_factor(&mut self, relation: TeamRelation, host_value: f32) -> f32 {
        if self.holds_the_line(relation) {
            0.0
        } else {
            host_value
        }
    }

    /// Morale change applied to a single combatant
    pub fn morale_change(&mut self, relation: TeamRelation, host_value: f32) -> f32 {
        if self.holds_the_line(relation) {
            0.0
        } else {
            host_value
        }
    }

    /// Maximum morale change caused by a comrade being incapacitated
    pub fn incapacitation_morale_change(
        &mut self,
        relation: TeamRelation,
        host_value: (f32, f32),
    ) -> (f32, f32) {
        if self.holds_the_line(relation) {
            (0.0, 0.0)
        } else {
            host_value
        }
    }

    /// Weight of the coordinated-retreat tactic.
    ///
    /// Only hostile teams are gated: their retreat is suppressed until the
    /// enemy side is confirmed. Friendly tactics are the player's business.
    pub fn retreat_tactic_weight(&mut self, relation: TeamRelation, host_value: f32) -> f32 {
        if !self.in_scope() || relation == TeamRelation::Friendly {
            return host_value;
        }
        if self.confirmed(Side::Enemy) {
            host_value
        } else {
            0.0
        }
    }
}
