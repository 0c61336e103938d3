use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::analysis::PatternKind;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum EmergencyStatus {
    Idle,
    Active,
}

impl Default for EmergencyStatus {
    fn default() -> Self {
        EmergencyStatus::Idle
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyState {
    pub status: EmergencyStatus,
    /// Classification behind the currently shown screen; Normal while idle.
    pub classification: PatternKind,
    pub activated_at: Option<DateTime<Utc>>,
    pub dismiss_after_ms: u64,
    /// Monotonic anchor for the auto-dismiss countdown.
    #[serde(skip)]
    pub activation_anchor: Option<Instant>,
}

impl Default for EmergencyState {
    fn default() -> Self {
        Self {
            status: EmergencyStatus::Idle,
            classification: PatternKind::Normal,
            activated_at: None,
            dismiss_after_ms: 0,
            activation_anchor: None,
        }
    }
}

impl EmergencyState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn remaining_ms(&self) -> u64 {
        match (self.status, self.activation_anchor) {
            (EmergencyStatus::Active, Some(anchor)) => self
                .dismiss_after_ms
                .saturating_sub(anchor.elapsed().as_millis() as u64),
            _ => 0,
        }
    }

    /// Re-activation replaces the previous screen and restarts the countdown.
    pub fn activate(
        &mut self,
        classification: PatternKind,
        activated_at: DateTime<Utc>,
        dismiss_after_ms: u64,
        now: Instant,
    ) {
        *self = Self {
            status: EmergencyStatus::Active,
            classification,
            activated_at: Some(activated_at),
            dismiss_after_ms,
            activation_anchor: Some(now),
        };
    }

    pub fn dismiss(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_state_has_no_remaining_time() {
        let state = EmergencyState::new();
        assert_eq!(state.status, EmergencyStatus::Idle);
        assert_eq!(state.remaining_ms(), 0);
    }

    #[test]
    fn activate_starts_countdown() {
        let mut state = EmergencyState::new();
        state.activate(PatternKind::Excessive, Utc::now(), 10_000, Instant::now());

        assert_eq!(state.status, EmergencyStatus::Active);
        assert_eq!(state.classification, PatternKind::Excessive);
        assert!(state.remaining_ms() <= 10_000);
        assert!(state.remaining_ms() > 9_000);
    }

    #[test]
    fn remaining_clamps_at_zero() {
        let mut state = EmergencyState::new();
        state.activate(PatternKind::Normal, Utc::now(), 0, Instant::now());
        assert_eq!(state.remaining_ms(), 0);
    }

    #[test]
    fn reactivation_replaces_classification_and_deadline() {
        let mut state = EmergencyState::new();
        state.activate(PatternKind::Normal, Utc::now(), 1, Instant::now());
        state.activate(PatternKind::Obsessive, Utc::now(), 10_000, Instant::now());

        assert_eq!(state.classification, PatternKind::Obsessive);
        assert!(state.remaining_ms() > 9_000);
    }

    #[test]
    fn dismiss_resets_to_idle() {
        let mut state = EmergencyState::new();
        state.activate(PatternKind::Excessive, Utc::now(), 10_000, Instant::now());
        state.dismiss();

        assert_eq!(state.status, EmergencyStatus::Idle);
        assert_eq!(state.classification, PatternKind::Normal);
        assert!(state.activated_at.is_none());
        assert_eq!(state.remaining_ms(), 0);
    }
}
