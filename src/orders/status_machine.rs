use serde::Serialize;
use std::fmt;

/// Progress of one order placement attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionState {
    Idle,
    Submitting,
    Confirmed,
    Failed,
}

impl SubmissionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionState::Idle => "idle",
            SubmissionState::Submitting => "submitting",
            SubmissionState::Confirmed => "confirmed",
            SubmissionState::Failed => "failed",
        }
    }
}

impl Default for SubmissionState {
    fn default() -> Self {
        SubmissionState::Idle
    }
}

impl fmt::Display for SubmissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Rules for moving an attempt between submission states
pub struct StatusMachine;

impl StatusMachine {
    /// Check if a transition is valid
    ///
    /// # Valid Transitions
    /// - Idle → Submitting
    /// - Submitting → Confirmed, Failed
    /// - Confirmed, Failed → (none; start a new attempt instead)
    pub fn is_valid_transition(from: SubmissionState, to: SubmissionState) -> bool {
        matches!(
            (from, to),
            (SubmissionState::Idle, SubmissionState::Submitting)
                | (SubmissionState::Submitting, SubmissionState::Confirmed)
                | (SubmissionState::Submitting, SubmissionState::Failed)
        )
    }

    /// Attempt to transition from one state to another
    ///
    /// # Returns
    /// `Ok(to)` if the transition is valid, `Err(message)` otherwise
    pub fn transition(from: SubmissionState, to: SubmissionState) -> Result<SubmissionState, String> {
        if Self::is_valid_transition(from, to) {
            Ok(to)
        } else {
            Err(format!("Invalid submission transition from {} to {}", from, to))
        }
    }
}

/// Tracks the state of a single placement attempt
#[derive(Debug, Default)]
pub struct SubmissionTracker {
    state: SubmissionState,
}

impl SubmissionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    /// Move to the next state, refusing invalid transitions
    pub fn advance(&mut self, to: SubmissionState) -> Result<SubmissionState, String> {
        let next = StatusMachine::transition(self.state, to)?;
        tracing::debug!("Order submission {} -> {}", self.state, next);
        self.state = next;
        Ok(next)
    }
}
