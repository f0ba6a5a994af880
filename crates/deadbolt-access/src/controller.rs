//! Access controller: the entry-flow decision core.
//!
//! The controller owns the state machine, the entry session, the credential
//! store and the card registry. It consumes card and keypad events from the
//! poll loop and returns [`Command`]s for the loop to execute against the
//! annunciator and the lock actuator, keeping the core itself free of
//! device I/O and fully deterministic under test.
//!
//! All timing flows through an explicit `now: Instant` argument: the alarm
//! escalation and the post-grant re-lock are timed sub-states driven by
//! [`AccessController::tick`], so the poll loop is never blocked and card
//! or keypad input is never starved while an alarm is sounding.
//!
//! # Examples
//!
//! ```
//! use std::time::Instant;
//! use deadbolt_access::{AccessController, AccessState, CardRegistry, CredentialStore};
//!
//! let registry = CardRegistry::single("52C31C2F".parse().unwrap());
//! let mut controller = AccessController::new(registry, CredentialStore::volatile());
//!
//! let commands = controller.on_card(&"52C31C2F".parse().unwrap(), Instant::now());
//! assert!(!commands.is_empty());
//! assert_eq!(controller.state(), AccessState::AwaitingPassword);
//! ```

use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{debug, info, warn};

use deadbolt_core::{
    CardId, KeyEvent, LockPosition, Password,
    constants::{
        ALARM_PULSE_COUNT, ALARM_PULSE_INTERVAL_MS, MAX_PASSWORD_LENGTH, MSG_ACCESS_GRANTED,
        MSG_CANCELLED, MSG_CARD_OK, MSG_CLEARED, MSG_ENTER_PASSWORD, MSG_INVALID_CARD,
        MSG_MASTER_MODE, MSG_NEW_PASSWORD, MSG_PASSWORD_RESET, MSG_PASSWORD_SET, MSG_PRESENT_CARD,
        MSG_STORAGE_ERROR, MSG_UNCHANGED, MSG_WRONG_PASSWORD, UNLOCK_HOLD_MS,
    },
};

use crate::credentials::{CredentialStore, Verdict};
use crate::registry::CardRegistry;
use crate::session::EntrySession;
use crate::state::{AccessState, StateMachine};

/// Side effect for the composition loop to execute on the devices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    /// Emit one annunciator beep pulse.
    Beep,

    /// Render text on a display line.
    Show { line: usize, text: String },

    /// Command the lock actuator to a position.
    SetLock(LockPosition),
}

impl Command {
    fn show(line: usize, text: &str) -> Self {
        Self::Show {
            line,
            text: text.to_string(),
        }
    }
}

/// Tunable timings for the controller's timed sub-states.
///
/// Defaults come from the firmware constants; tests shrink them to keep
/// scenarios fast.
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Number of beep pulses in a wrong-password alarm.
    pub alarm_pulse_count: u8,

    /// Spacing between alarm pulses.
    pub alarm_pulse_interval: Duration,

    /// How long the lock stays fully open after a grant.
    pub unlock_hold: Duration,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            alarm_pulse_count: ALARM_PULSE_COUNT,
            alarm_pulse_interval: Duration::from_millis(ALARM_PULSE_INTERVAL_MS),
            unlock_hold: Duration::from_millis(UNLOCK_HOLD_MS),
        }
    }
}

/// In-flight alarm escalation: the timed sub-state behind
/// [`AccessState::Alarm`].
#[derive(Debug, Clone, Copy)]
struct AlarmEscalation {
    /// Pulses still to emit.
    pulses_remaining: u8,

    /// When the next pulse is due.
    next_pulse_at: Instant,
}

/// The entry-flow decision core.
///
/// See the [module documentation](self) for the event/command model.
#[derive(Debug)]
pub struct AccessController {
    machine: StateMachine,
    session: EntrySession,
    store: CredentialStore,
    registry: CardRegistry,
    config: ControllerConfig,

    /// Active alarm escalation, present exactly while in `Alarm`.
    alarm: Option<AlarmEscalation>,

    /// When the lock should return to `LOCKED` after a grant.
    relock_at: Option<Instant>,
}

impl AccessController {
    /// Create a controller with the default timings.
    pub fn new(registry: CardRegistry, store: CredentialStore) -> Self {
        Self::with_config(registry, store, ControllerConfig::default())
    }

    /// Create a controller with custom timings.
    pub fn with_config(
        registry: CardRegistry,
        store: CredentialStore,
        config: ControllerConfig,
    ) -> Self {
        Self {
            machine: StateMachine::new(),
            session: EntrySession::new(),
            store,
            registry,
            config,
            alarm: None,
            relock_at: None,
        }
    }

    /// Commands to bring the system to its power-on posture: door locked,
    /// idle prompt on the display.
    pub fn boot(&self) -> Vec<Command> {
        vec![
            Command::SetLock(LockPosition::LOCKED),
            Command::show(0, MSG_PRESENT_CARD),
            Command::show(1, ""),
        ]
    }

    /// Current state of the entry flow.
    #[must_use]
    pub fn state(&self) -> AccessState {
        self.machine.current_state()
    }

    /// Number of characters currently in the entry buffer.
    #[must_use]
    pub fn entered_len(&self) -> usize {
        self.session.len()
    }

    /// Returns `true` while an alarm escalation is in progress.
    #[must_use]
    pub fn alarm_active(&self) -> bool {
        self.alarm.is_some()
    }

    /// The state transition history, oldest first.
    pub fn history(&self) -> &std::collections::VecDeque<crate::state::StateTransition> {
        self.machine.history()
    }

    /// Handle a card presentation.
    ///
    /// Only the card phase reads the card reader; presentations in any
    /// other state are ignored without side effects.
    pub fn on_card(&mut self, card: &CardId, _now: Instant) -> Vec<Command> {
        if self.state() != AccessState::AwaitingCard {
            debug!(state = %self.state(), "card presented outside card phase, ignored");
            return Vec::new();
        }

        if self.registry.contains(card) {
            info!(card = %card, "card accepted");
            self.session.clear();
            // A pending re-lock belongs to the previous session; the new
            // session owns the lock from here.
            self.relock_at = None;
            self.transition(AccessState::AwaitingPassword);
            vec![
                Command::Beep,
                Command::show(0, MSG_CARD_OK),
                Command::show(1, MSG_ENTER_PASSWORD),
                Command::SetLock(LockPosition::PARTIAL_OPEN),
            ]
        } else {
            warn!(card = %card, "invalid card rejected");
            Self::reject_card()
        }
    }

    /// Handle a card read that could not produce a well-formed identifier.
    ///
    /// Malformed reads get the same feedback as unregistered cards; the
    /// state does not change.
    pub fn on_unreadable_card(&mut self, _now: Instant) -> Vec<Command> {
        if self.state() != AccessState::AwaitingCard {
            return Vec::new();
        }
        warn!("unreadable card rejected");
        Self::reject_card()
    }

    fn reject_card() -> Vec<Command> {
        vec![
            Command::Beep,
            Command::Beep,
            Command::show(0, MSG_INVALID_CARD),
            Command::show(1, ""),
        ]
    }

    /// Handle a keypad event.
    ///
    /// Keys are only meaningful in the password phase and in master mode;
    /// everywhere else they are ignored without side effects.
    pub fn on_key(&mut self, key: KeyEvent, now: Instant) -> Vec<Command> {
        match self.state() {
            AccessState::AwaitingPassword => self.on_password_key(key, now),
            AccessState::MasterMode => self.on_master_key(key),
            state => {
                debug!(%state, %key, "key press outside input phase, ignored");
                Vec::new()
            }
        }
    }

    /// Drive the timed sub-states: alarm pulses and the post-grant re-lock.
    ///
    /// Call once per poll cycle. Never blocks; emits whatever is due at
    /// `now` and reschedules the rest.
    pub fn tick(&mut self, now: Instant) -> Vec<Command> {
        let mut commands = Vec::new();

        if let Some(alarm) = &mut self.alarm {
            while alarm.pulses_remaining > 0 && now >= alarm.next_pulse_at {
                commands.push(Command::Beep);
                alarm.pulses_remaining -= 1;
                alarm.next_pulse_at += self.config.alarm_pulse_interval;
            }

            if alarm.pulses_remaining == 0 {
                info!("alarm escalation complete, returning to password phase");
                self.alarm = None;
                self.session.clear();
                self.transition(AccessState::AwaitingPassword);
                commands.push(Command::show(0, MSG_ENTER_PASSWORD));
                commands.push(Command::show(1, ""));
            }
        }

        if let Some(at) = self.relock_at
            && now >= at
        {
            info!("unlock hold expired, re-locking");
            self.relock_at = None;
            commands.push(Command::SetLock(LockPosition::LOCKED));
            commands.push(Command::show(0, MSG_PRESENT_CARD));
            commands.push(Command::show(1, ""));
        }

        commands
    }

    /// Restore the factory default password and report it on the display.
    pub fn reset_credentials(&mut self) -> Vec<Command> {
        match self.store.reset_password() {
            Ok(()) => vec![Command::show(0, MSG_PASSWORD_RESET), Command::show(1, "")],
            Err(e) => {
                warn!(error = %e, "credential reset failed to persist");
                vec![Command::show(0, MSG_STORAGE_ERROR), Command::show(1, "")]
            }
        }
    }

    fn on_password_key(&mut self, key: KeyEvent, now: Instant) -> Vec<Command> {
        // Every key press is acknowledged audibly.
        let mut commands = vec![Command::Beep];

        match key {
            KeyEvent::Clear => {
                self.session.clear();
                commands.push(Command::show(0, MSG_CLEARED));
                commands.push(Command::show(1, ""));
            }
            KeyEvent::Enter => {
                let candidate = self.session.take();
                let verdict = self.store.verify(&candidate);
                debug!(%verdict, "password submitted");

                match verdict {
                    Verdict::Master => {
                        info!("master key accepted, entering master mode");
                        self.transition(AccessState::MasterMode);
                        commands.push(Command::show(0, MSG_MASTER_MODE));
                        commands.push(Command::show(1, MSG_NEW_PASSWORD));
                    }
                    Verdict::Correct => {
                        info!("access granted");
                        self.transition(AccessState::AwaitingCard);
                        self.relock_at = Some(now + self.config.unlock_hold);
                        commands.push(Command::show(0, MSG_ACCESS_GRANTED));
                        commands.push(Command::show(1, ""));
                        commands.push(Command::SetLock(LockPosition::FULL_OPEN));
                    }
                    Verdict::Wrong => {
                        warn!("wrong password, starting alarm escalation");
                        self.transition(AccessState::Alarm);
                        self.alarm = Some(AlarmEscalation {
                            pulses_remaining: self.config.alarm_pulse_count,
                            next_pulse_at: now,
                        });
                        commands.push(Command::show(0, MSG_WRONG_PASSWORD));
                        commands.push(Command::show(1, ""));
                    }
                }
            }
            key => {
                if let Some(c) = key.as_entry_char() {
                    if self.session.push(c) {
                        commands.push(Command::show(1, &self.session.masked()));
                    } else {
                        // Entry buffer at its bound: the press is ignored
                        debug!("entry buffer full, key ignored");
                    }
                }
            }
        }

        commands
    }

    fn on_master_key(&mut self, key: KeyEvent) -> Vec<Command> {
        let mut commands = vec![Command::Beep];

        match key {
            KeyEvent::Clear => {
                info!("master mode aborted");
                self.session.clear();
                self.transition(AccessState::AwaitingCard);
                commands.push(Command::show(0, MSG_CANCELLED));
                commands.push(Command::show(1, ""));
            }
            KeyEvent::Enter => {
                let candidate = self.session.take();
                self.transition(AccessState::AwaitingCard);

                if candidate.is_empty() {
                    info!("master mode exited without changing the password");
                    commands.push(Command::show(0, MSG_UNCHANGED));
                    commands.push(Command::show(1, ""));
                } else {
                    match Password::new(&candidate) {
                        Ok(password) => match self.store.set_password(password) {
                            Ok(()) => {
                                info!("new password stored");
                                commands.push(Command::show(0, MSG_PASSWORD_SET));
                                commands.push(Command::show(1, ""));
                            }
                            Err(e) => {
                                warn!(error = %e, "new password failed to persist");
                                commands.push(Command::show(0, MSG_STORAGE_ERROR));
                                commands.push(Command::show(1, ""));
                            }
                        },
                        Err(e) => {
                            // The master-mode entry bound keeps candidates
                            // within the password rules, so this is
                            // unreachable in practice.
                            warn!(error = %e, "rejected password candidate");
                            commands.push(Command::show(0, MSG_UNCHANGED));
                            commands.push(Command::show(1, ""));
                        }
                    }
                }
            }
            key => {
                if let Some(c) = key.as_entry_char() {
                    // New passwords are bounded tighter than the entry
                    // buffer, so the master key namespace stays unreachable.
                    if self.session.len() < MAX_PASSWORD_LENGTH && self.session.push(c) {
                        commands.push(Command::show(1, &self.session.masked()));
                    } else {
                        debug!("password length bound reached, key ignored");
                    }
                }
            }
        }

        commands
    }

    /// Apply a transition that the calling state match has already
    /// validated. A rejection here is a logic bug; it is logged and the
    /// loop keeps running rather than crashing the controller.
    fn transition(&mut self, to: AccessState) {
        if let Err(e) = self.machine.transition_to(to) {
            warn!(error = %e, "state transition rejected");
        }
    }
}
