//! Session tracking
//!
//! Detects that the host moved on to a different battle so per-battle state
//! can be wiped before anything else reads it.

use crate::core::types::SessionId;

/// Outcome of comparing the host's session against the last one seen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionChange {
    /// Host reports no battle
    Absent,
    /// Same battle as the previous poll
    Unchanged(SessionId),
    /// A battle we have not seen before; caller must reset
    Started(SessionId),
}

#[derive(Debug, Clone, Default)]
pub struct SessionTracker {
    current: Option<SessionId>,
}

impl SessionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<SessionId> {
        self.current
    }

    /// Record the host's session.
    ///
    /// An absent session leaves the stored handle alone, so a one-poll gap in
    /// host data does not masquerade as a new battle.
    pub fn observe(&mut self, session: Option<SessionId>) -> SessionChange {
        match session {
            None => SessionChange::Absent,
            Some(id) if self.current == Some(id) => SessionChange::Unchanged(id),
            Some(id) => {
                self.current = Some(id);
                SessionChange::Started(id)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_session_is_a_start() {
        let mut tracker = SessionTracker::new();
        let id = SessionId::new();
        assert_eq!(tracker.observe(Some(id)), SessionChange::Started(id));
        assert_eq!(tracker.current(), Some(id));
    }

    #[test]
    fn test_same_session_unchanged() {
        let mut tracker = SessionTracker::new();
        let id = SessionId::new();
        tracker.observe(Some(id));
        assert_eq!(tracker.observe(Some(id)), SessionChange::Unchanged(id));
    }

    #[test]
    fn test_new_session_detected() {
        let mut tracker = SessionTracker::new();
        tracker.observe(Some(SessionId::new()));
        let next = SessionId::new();
        assert_eq!(tracker.observe(Some(next)), SessionChange::Started(next));
    }

    #[test]
    fn test_absent_session_keeps_handle() {
        let mut tracker = SessionTracker::new();
        let id = SessionId::new();
        tracker.observe(Some(id));

        assert_eq!(tracker.observe(None), SessionChange::Absent);
        assert_eq!(tracker.current(), Some(id));
        assert_eq!(tracker.observe(Some(id)), SessionChange::Unchanged(id));
    }
}
