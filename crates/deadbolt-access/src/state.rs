//! Entry-attempt state machine.
//!
//! This module provides the state machine for the two-factor entry flow:
//! card phase, password phase, administrative master mode, and the
//! wrong-password alarm escalation.
//!
//! # States
//!
//! - `AwaitingCard`: initial state, polling the card reader
//! - `AwaitingPassword`: card phase satisfied, accumulating keypad input
//! - `MasterMode`: master key accepted, next submission sets a new password
//! - `Alarm`: wrong password, timed beep escalation in progress
//!
//! # Valid Transitions
//!
//! - AwaitingCard → AwaitingPassword (registered card)
//! - AwaitingPassword → AwaitingCard (correct password, session complete)
//! - AwaitingPassword → MasterMode (master key)
//! - AwaitingPassword → Alarm (wrong password)
//! - MasterMode → AwaitingCard (password set or aborted)
//! - Alarm → AwaitingPassword (escalation complete; the card phase stays
//!   satisfied, so the alarm does not fall back to AwaitingCard)
//!
//! # Examples
//!
//! ```
//! use deadbolt_access::{AccessState, StateMachine};
//!
//! let mut machine = StateMachine::new();
//! assert_eq!(machine.current_state(), AccessState::AwaitingCard);
//!
//! // Valid transitions
//! machine.transition_to(AccessState::AwaitingPassword).unwrap();
//! machine.transition_to(AccessState::Alarm).unwrap();
//!
//! // Invalid transition: an alarm resolves to the password phase only
//! assert!(machine.transition_to(AccessState::MasterMode).is_err());
//! ```

use std::collections::VecDeque;
use std::fmt;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use deadbolt_core::{Error, Result};

/// Maximum number of state transitions to keep in history.
///
/// A complete entry attempt is 2-4 transitions, so this retains on the
/// order of twenty recent attempts for debugging without unbounded growth.
const MAX_HISTORY_SIZE: usize = 64;

/// Represents all possible states of an entry attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessState {
    /// Waiting for a proximity card; initial state.
    AwaitingCard,

    /// Card accepted, accumulating password input from the keypad.
    AwaitingPassword,

    /// Master key accepted; the next submission sets a new password.
    MasterMode,

    /// Wrong password; timed beep escalation in progress.
    Alarm,
}

impl fmt::Display for AccessState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state_str = match self {
            AccessState::AwaitingCard => "AwaitingCard",
            AccessState::AwaitingPassword => "AwaitingPassword",
            AccessState::MasterMode => "MasterMode",
            AccessState::Alarm => "Alarm",
        };
        write!(f, "{}", state_str)
    }
}

impl AccessState {
    /// Check if transition to target state is valid from this state.
    ///
    /// # Examples
    ///
    /// ```
    /// use deadbolt_access::AccessState;
    ///
    /// assert!(AccessState::AwaitingCard.can_transition_to(AccessState::AwaitingPassword));
    /// assert!(!AccessState::AwaitingCard.can_transition_to(AccessState::Alarm));
    /// ```
    #[must_use]
    pub fn can_transition_to(&self, target: AccessState) -> bool {
        matches!(
            (self, target),
            // From AwaitingCard
            (AccessState::AwaitingCard, AccessState::AwaitingPassword)
            // From AwaitingPassword
            | (
                AccessState::AwaitingPassword,
                AccessState::AwaitingCard | AccessState::MasterMode | AccessState::Alarm
            )
            // From MasterMode
            | (AccessState::MasterMode, AccessState::AwaitingCard)
            // From Alarm: back to the password phase, not the card phase
            | (AccessState::Alarm, AccessState::AwaitingPassword)
        )
    }
}

/// Represents a single state transition with timestamp.
///
/// # Serialization Note
///
/// The `timestamp` field is not serialized as `Instant` is process-specific.
/// When deserializing, the timestamp is set to the time of deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateTransition {
    /// The state transitioned from.
    pub from: AccessState,

    /// The state transitioned to.
    pub to: AccessState,

    /// When the transition occurred.
    #[serde(skip, default = "Instant::now")]
    pub timestamp: Instant,
}

impl StateTransition {
    /// Create a new state transition record with the current timestamp.
    pub fn new(from: AccessState, to: AccessState) -> Self {
        Self {
            from,
            to,
            timestamp: Instant::now(),
        }
    }

    /// Get the duration since this transition occurred.
    pub fn elapsed(&self) -> Duration {
        self.timestamp.elapsed()
    }
}

/// State machine for the entry-attempt flow.
///
/// Enforces valid state transitions and tracks a bounded transition history.
///
/// # Thread Safety
///
/// This struct is not thread-safe by design: exactly one control loop
/// mutates it. A multi-threaded embedding must wrap it in a mutex.
#[derive(Debug)]
pub struct StateMachine {
    /// Current state of the entry attempt.
    current_state: AccessState,

    /// When the current state was entered.
    state_entered_at: Instant,

    /// History of state transitions (limited to MAX_HISTORY_SIZE).
    history: VecDeque<StateTransition>,
}

impl StateMachine {
    /// Create a new state machine in the AwaitingCard state.
    pub fn new() -> Self {
        Self {
            current_state: AccessState::AwaitingCard,
            state_entered_at: Instant::now(),
            history: VecDeque::with_capacity(MAX_HISTORY_SIZE),
        }
    }

    /// Get the current state of the machine.
    #[must_use]
    pub fn current_state(&self) -> AccessState {
        self.current_state
    }

    /// Get the time elapsed in the current state.
    pub fn time_in_current_state(&self) -> Duration {
        self.state_entered_at.elapsed()
    }

    /// Get a reference to the state transition history, oldest first.
    pub fn history(&self) -> &VecDeque<StateTransition> {
        &self.history
    }

    /// Transition to a new state, validating the transition.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidStateTransition` if the requested transition
    /// is not valid for the current state.
    ///
    /// # Examples
    ///
    /// ```
    /// use deadbolt_access::{AccessState, StateMachine};
    ///
    /// let mut machine = StateMachine::new();
    ///
    /// let transition = machine.transition_to(AccessState::AwaitingPassword).unwrap();
    /// assert_eq!(transition.from, AccessState::AwaitingCard);
    /// assert_eq!(transition.to, AccessState::AwaitingPassword);
    /// ```
    pub fn transition_to(&mut self, new_state: AccessState) -> Result<StateTransition> {
        if !self.current_state.can_transition_to(new_state) {
            return Err(Error::InvalidStateTransition {
                from: self.current_state.to_string(),
                to: new_state.to_string(),
            });
        }

        let transition = StateTransition::new(self.current_state, new_state);
        self.perform_state_change(new_state, transition.clone());

        Ok(transition)
    }

    /// Reset the state machine to AwaitingCard regardless of current state.
    ///
    /// For error recovery; returns a transition record for the reset.
    pub fn reset(&mut self) -> StateTransition {
        let transition = StateTransition::new(self.current_state, AccessState::AwaitingCard);
        self.perform_state_change(AccessState::AwaitingCard, transition.clone());
        transition
    }

    fn perform_state_change(&mut self, new_state: AccessState, transition: StateTransition) {
        self.current_state = new_state;
        self.state_entered_at = Instant::now();

        self.history.push_back(transition);
        if self.history.len() > MAX_HISTORY_SIZE {
            self.history.pop_front();
        }
    }
}

impl Default for StateMachine {
    fn default() -> Self {
        Self::new()
    }
}
