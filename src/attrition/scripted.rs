//! In-memory battle host
//!
//! A plain-data `BattleHost` for headless runs and tests. Teams are stored as
//! player/enemy; attacker/defender are derived from `player_attacks`.

use serde::{Deserialize, Serialize};

use crate::attrition::encounter::Encounter;
use crate::attrition::host::{BattleHost, TeamReport};
use crate::core::types::{SessionId, SimTime, TeamRole};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptedBattle {
    pub session: Option<SessionId>,
    pub time: SimTime,
    pub player: Option<TeamReport>,
    pub enemy: Option<TeamReport>,
    pub player_attacks: bool,
    pub deployment_complete: bool,
    pub encounter: Option<Encounter>,
}

impl ScriptedBattle {
    /// Initialized field battle with the player attacking
    pub fn field_battle(player: u32, enemy: u32) -> Self {
        Self {
            session: Some(SessionId::new()),
            time: 0.0,
            player: Some(TeamReport::new(player)),
            enemy: Some(TeamReport::new(enemy)),
            player_attacks: true,
            deployment_complete: true,
            encounter: Some(Encounter::field_battle()),
        }
    }

    fn slot(&self, role: TeamRole) -> &Option<TeamReport> {
        match role {
            TeamRole::Player => &self.player,
            TeamRole::Enemy => &self.enemy,
            TeamRole::Attacker if self.player_attacks => &self.player,
            TeamRole::Attacker => &self.enemy,
            TeamRole::Defender if self.player_attacks => &self.enemy,
            TeamRole::Defender => &self.player,
        }
    }

    fn slot_mut(&mut self, role: TeamRole) -> &mut Option<TeamReport> {
        let player_slot = match role {
            TeamRole::Player => true,
            TeamRole::Enemy => false,
            TeamRole::Attacker => self.player_attacks,
            TeamRole::Defender => !self.player_attacks,
        };
        if player_slot {
            &mut self.player
        } else {
            &mut self.enemy
        }
    }

    /// Start a new battle with the same teams
    pub fn new_session(&mut self) -> SessionId {
        let id = SessionId::new();
        self.session = Some(id);
        self.time = 0.0;
        id
    }

    pub fn end_session(&mut self) {
        self.session = None;
    }

    pub fn set_time(&mut self, time: SimTime) {
        self.time = time;
    }

    pub fn advance(&mut self, dt: SimTime) {
        self.time += dt;
    }

    pub fn set_team(&mut self, role: TeamRole, report: TeamReport) {
        *self.slot_mut(role) = Some(report);
    }

    pub fn remove_team(&mut self, role: TeamRole) {
        *self.slot_mut(role) = None;
    }

    pub fn set_active(&mut self, role: TeamRole, active: u32) {
        if let Some(team) = self.slot_mut(role) {
            team.active = active;
        }
    }

    pub fn set_reinforcements(&mut self, role: TeamRole, pending: u32) {
        if let Some(team) = self.slot_mut(role) {
            team.pending_reinforcements = pending;
        }
    }

    /// Remove `n` troops and record them on the raw death counter
    pub fn kill(&mut self, role: TeamRole, n: u32) {
        if let Some(team) = self.slot_mut(role) {
            let dead = n.min(team.active);
            team.active -= dead;
            team.raw_deaths += dead;
        }
    }

    /// Spawn up to `n` queued reinforcements
    pub fn reinforce(&mut self, role: TeamRole, n: u32) -> u32 {
        let Some(team) = self.slot_mut(role) else {
            return 0;
        };
        let spawned = n.min(team.pending_reinforcements);
        team.pending_reinforcements -= spawned;
        team.active += spawned;
        spawned
    }
}

impl BattleHost for ScriptedBattle {
    fn session(&self) -> Option<SessionId> {
        self.session
    }

    fn current_time(&self) -> SimTime {
        self.time
    }

    fn team(&self, role: TeamRole) -> Option<TeamReport> {
        self.slot(role).clone()
    }

    fn is_deployment_complete(&self) -> bool {
        self.deployment_complete
    }

    fn player_is_attacker(&self) -> Option<bool> {
        self.player.as_ref()?;
        Some(self.player_attacks)
    }

    fn encounter(&self) -> Option<Encounter> {
        self.encounter
    }
}
