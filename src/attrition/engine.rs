//! Attrition engine and query façade
//!
//! One engine per host. Each poll runs, in order: session check (reset on a
//! new battle), throttled sample, baseline capture, then one debounce step
//! per side. Queries are total; missing host data reads as `false` / `0`.

use serde::{Deserialize, Serialize};

use crate::attrition::baseline::BaselineCounts;
use crate::attrition::debounce::{self, Transition};
use crate::attrition::evaluator;
use crate::attrition::host::{BattleHost, TeamReport};
use crate::attrition::sampler::{CountSnapshot, Sampler};
use crate::attrition::session::{SessionChange, SessionTracker};
use crate::attrition::side_state::{SideState, SideStates};
use crate::core::config::AttritionConfig;
use crate::core::types::{PerSide, SessionId, Side, SimTime, TeamRole};

/// What a refreshing poll did
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PollReport {
    pub session: SessionId,
    pub time: SimTime,
    pub counts: CountSnapshot,
    pub transitions: PerSide<Transition>,
    pub baseline_captured: bool,
}

#[derive(Debug, Clone, Default)]
pub struct AttritionEngine {
    tracker: SessionTracker,
    /// Whether the host reported a session on the last poll
    session_present: bool,
    sampler: Sampler,
    sides: SideStates,
    baseline: BaselineCounts,
}

impl AttritionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> Option<SessionId> {
        self.tracker.current()
    }

    pub fn side_state(&self, side: Side) -> &SideState {
        &self.sides[side]
    }

    pub fn baseline(&self) -> &BaselineCounts {
        &self.baseline
    }

    /// Snapshot from the last refresh, without polling
    pub fn cached_counts(&self) -> CountSnapshot {
        self.sampler.counts()
    }

    fn reset(&mut self) {
        self.sampler = Sampler::new();
        self.sides = SideStates::default();
        self.baseline = BaselineCounts::new();
    }

    /// Run one throttled refresh.
    ///
    /// Returns `None` when there is no session or the sample interval has not
    /// elapsed yet; in both cases no counter moves.
    pub fn poll(&mut self, host: &dyn BattleHost, config: &AttritionConfig) -> Option<PollReport> {
        let change = self.tracker.observe(host.session());
        self.session_present = change != SessionChange::Absent;
        let session = match change {
            SessionChange::Absent => return None,
            SessionChange::Unchanged(id) => id,
            SessionChange::Started(id) => {
                tracing::info!("New battle session {}, resetting attrition state", id);
                self.reset();
                id
            }
        };

        let refresh = self.sampler.sample(host, host.current_time())?;

        let mut baseline_captured = false;
        if let Some(field) = &refresh.field {
            if self.baseline.try_capture(field, host.is_deployment_complete()) {
                baseline_captured = true;
                tracing::info!(
                    "Baseline captured: attacker={} defender={}",
                    self.baseline.initial_attacker_total,
                    self.baseline.initial_defender_total
                );
            }
        }

        let mut transitions = PerSide::<Transition>::default();
        if let Some(sides) = &refresh.sides {
            let player_is_attacker = host.player_is_attacker();
            transitions.player =
                self.update_side(Side::Player, &sides.first, config, player_is_attacker);
            transitions.enemy =
                self.update_side(Side::Enemy, &sides.second, config, player_is_attacker);
        }

        Some(PollReport {
            session,
            time: refresh.time,
            counts: self.sampler.counts(),
            transitions,
            baseline_captured,
        })
    }

    fn update_side(
        &mut self,
        side: Side,
        report: &TeamReport,
        config: &AttritionConfig,
        player_is_attacker: Option<bool>,
    ) -> Transition {
        let state = &mut self.sides[side];

        if !config.applies_to(side) {
            let was_confirmed = state.confirmed;
            state.reset();
            return if was_confirmed {
                tracing::debug!("{} side disabled, verdict cleared", side);
                Transition::Revoked
            } else {
                Transition::Unchanged
            };
        }

        let initial_total = self.baseline.initial_total_for(side, player_is_attacker);
        let signal = evaluator::evaluate(side, report, config, initial_total);
        let transition = debounce::step(
            state,
            report.active,
            signal,
            config.mode,
            config.confirmation_window,
        );

        match transition {
            Transition::Confirmed => tracing::debug!(
                "{} side confirmed below threshold at {} troops ({:?} mode)",
                side,
                report.active,
                config.mode
            ),
            Transition::Revoked => tracing::debug!(
                "{} side recovered to {} troops, verdict revoked",
                side,
                report.active
            ),
            Transition::Unchanged if state.below_streak > 0 && !state.confirmed => tracing::trace!(
                "{} side below threshold: {}/{}",
                side,
                state.below_streak,
                config.confirmation_window
            ),
            Transition::Unchanged => {}
        }

        transition
    }

    /// Latched verdict without polling
    pub fn verdict(&self, side: Side, config: &AttritionConfig) -> bool {
        self.session_present && config.applies_to(side) && self.sides[side].confirmed
    }

    /// Poll (throttled), then report whether `side` is confirmed below
    /// threshold for the current battle
    pub fn is_side_confirmed_below_threshold(
        &mut self,
        side: Side,
        host: &dyn BattleHost,
        config: &AttritionConfig,
    ) -> bool {
        if host.session().is_none() {
            return false;
        }
        self.poll(host, config);
        self.verdict(side, config)
    }

    /// Poll (throttled), then return `(attacker, defender)` headcounts
    pub fn active_counts(&mut self, host: &dyn BattleHost, config: &AttritionConfig) -> (u32, u32) {
        if host.team(TeamRole::Attacker).is_none() || host.team(TeamRole::Defender).is_none() {
            return (0, 0);
        }
        self.poll(host, config);
        let counts = self.sampler.counts();
        (counts.attacker, counts.defender)
    }

    /// Poll (throttled), then return `(player, enemy)` headcounts
    pub fn side_counts(&mut self, host: &dyn BattleHost, config: &AttritionConfig) -> (u32, u32) {
        if host.team(TeamRole::Player).is_none() || host.team(TeamRole::Enemy).is_none() {
            return (0, 0);
        }
        self.poll(host, config);
        let counts = self.sampler.counts();
        (counts.player, counts.enemy)
    }

    pub fn is_local_side_attacker(&self, host: &dyn BattleHost) -> bool {
        host.player_is_attacker().unwrap_or(false)
    }
}
