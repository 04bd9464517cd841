//! Encounter classification
//!
//! Verdicts only mean something in an open-field engagement. Sieges and
//! sally-outs are excluded before any override is considered.

use serde::{Deserialize, Serialize};

/// Kind of battle the host is running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EncounterKind {
    #[default]
    FieldBattle,
    Siege,
    SallyOut,
    Other,
}

/// Encounter facts reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Encounter {
    pub kind: EncounterKind,
    /// Spawn paths are laid out and the battle has begun
    pub initialized: bool,
}

impl Encounter {
    pub fn new(kind: EncounterKind, initialized: bool) -> Self {
        Self { kind, initialized }
    }

    pub fn field_battle() -> Self {
        Self::new(EncounterKind::FieldBattle, true)
    }
}

/// Siege or sally-out
pub fn is_siege_battle(encounter: Option<&Encounter>) -> bool {
    matches!(
        encounter.map(|e| e.kind),
        Some(EncounterKind::Siege | EncounterKind::SallyOut)
    )
}

pub fn is_non_siege_battle(encounter: Option<&Encounter>) -> bool {
    encounter.is_some() && !is_siege_battle(encounter)
}

/// Initialized, explicitly a field battle, and not siege-related
pub fn is_valid_field_battle(encounter: Option<&Encounter>) -> bool {
    let Some(e) = encounter else {
        return false;
    };
    e.initialized && e.kind == EncounterKind::FieldBattle && is_non_siege_battle(encounter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialized_field_battle_is_valid() {
        assert!(is_valid_field_battle(Some(&Encounter::field_battle())));
    }

    #[test]
    fn test_uninitialized_field_battle_is_not_valid() {
        let e = Encounter::new(EncounterKind::FieldBattle, false);
        assert!(!is_valid_field_battle(Some(&e)));
    }

    #[test]
    fn test_sieges_excluded() {
        for kind in [EncounterKind::Siege, EncounterKind::SallyOut] {
            let e = Encounter::new(kind, true);
            assert!(is_siege_battle(Some(&e)));
            assert!(!is_non_siege_battle(Some(&e)));
            assert!(!is_valid_field_battle(Some(&e)));
        }
    }

    #[test]
    fn test_other_encounters_are_non_siege_but_not_field() {
        let e = Encounter::new(EncounterKind::Other, true);
        assert!(is_non_siege_battle(Some(&e)));
        assert!(!is_valid_field_battle(Some(&e)));
    }

    #[test]
    fn test_no_encounter() {
        assert!(!is_siege_battle(None));
        assert!(!is_non_siege_battle(None));
        assert!(!is_valid_field_battle(None));
    }
}
