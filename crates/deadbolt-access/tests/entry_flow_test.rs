//! Integration tests for end-to-end entry flows.
//!
//! These drive the controller the way the poll loop does: card and keypad
//! events in, commands out, with `tick` advancing the timed sub-states
//! through fabricated instants so no test ever sleeps.

use std::time::{Duration, Instant};

use deadbolt_access::{
    AccessController, AccessState, CardRegistry, Command, ControllerConfig, CredentialStore,
};
use deadbolt_core::{CardId, KeyEvent, LockPosition};
use rstest::rstest;

// ============================================================================
// Test Data Constants
// ============================================================================

/// The one registered card of the minimal deployment.
const REGISTERED_CARD: &str = "52C31C2F";

/// Factory default password as keycap characters.
const FACTORY_PASSWORD: &str = "00000000";

/// The master override key as keycap characters.
const MASTER_KEY: &str = "A1B2C3D4DD";

fn card(id: &str) -> CardId {
    id.parse().unwrap()
}

fn new_controller() -> AccessController {
    AccessController::new(
        CardRegistry::single(card(REGISTERED_CARD)),
        CredentialStore::volatile(),
    )
}

/// Press each keycap character of `code`, then `ENT`.
fn submit(controller: &mut AccessController, code: &str, now: Instant) -> Vec<Command> {
    for c in code.chars() {
        let key = KeyEvent::from_char(c).expect("test code uses keypad characters");
        controller.on_key(key, now);
    }
    controller.on_key(KeyEvent::Enter, now)
}

fn beeps(commands: &[Command]) -> usize {
    commands.iter().filter(|c| **c == Command::Beep).count()
}

fn shown_texts(commands: &[Command]) -> Vec<&str> {
    commands
        .iter()
        .filter_map(|c| match c {
            Command::Show { text, .. } => Some(text.as_str()),
            _ => None,
        })
        .collect()
}

// ============================================================================
// Card Phase
// ============================================================================

#[rstest]
#[case("00000000")]
#[case("DEADBEEF")]
#[case("52C31C20")]
fn test_unregistered_cards_stay_in_card_phase(#[case] id: &str) {
    let mut controller = new_controller();

    let commands = controller.on_card(&card(id), Instant::now());

    assert_eq!(controller.state(), AccessState::AwaitingCard);
    assert_eq!(beeps(&commands), 2);
    assert!(shown_texts(&commands).contains(&"Invalid Card"));
}

#[test]
fn test_registered_card_transitions_exactly_once() {
    let mut controller = new_controller();
    let now = Instant::now();

    let commands = controller.on_card(&card(REGISTERED_CARD), now);
    assert_eq!(controller.state(), AccessState::AwaitingPassword);
    assert!(commands.contains(&Command::SetLock(LockPosition::PARTIAL_OPEN)));

    // A second tap while the password phase is active does nothing
    let commands = controller.on_card(&card(REGISTERED_CARD), now);
    assert!(commands.is_empty());
    assert_eq!(controller.history().len(), 1);
}

// ============================================================================
// Full Grant Scenario
// ============================================================================

#[test]
fn test_grant_scenario_card_then_factory_password() {
    let mut controller = new_controller();
    let now = Instant::now();

    controller.on_card(&card(REGISTERED_CARD), now);
    assert_eq!(controller.state(), AccessState::AwaitingPassword);

    let commands = submit(&mut controller, FACTORY_PASSWORD, now);

    assert_eq!(controller.state(), AccessState::AwaitingCard);
    assert_eq!(controller.entered_len(), 0);
    assert!(shown_texts(&commands).contains(&"Access Granted"));
    assert!(commands.contains(&Command::SetLock(LockPosition::FULL_OPEN)));
}

#[test]
fn test_grant_then_relock_then_next_session() {
    let mut controller = new_controller();
    let start = Instant::now();
    let hold = ControllerConfig::default().unlock_hold;

    controller.on_card(&card(REGISTERED_CARD), start);
    submit(&mut controller, FACTORY_PASSWORD, start);

    // The hold expires, the door re-locks, and the idle prompt returns
    let commands = controller.tick(start + hold);
    assert!(commands.contains(&Command::SetLock(LockPosition::LOCKED)));
    assert!(shown_texts(&commands).contains(&"Present Card"));

    // The system is re-armed for the next entry
    let commands = controller.on_card(&card(REGISTERED_CARD), start + hold);
    assert_eq!(controller.state(), AccessState::AwaitingPassword);
    assert!(commands.contains(&Command::SetLock(LockPosition::PARTIAL_OPEN)));
}

// ============================================================================
// Full Alarm Scenario
// ============================================================================

#[test]
fn test_alarm_scenario_card_then_wrong_password() {
    let mut controller = new_controller();
    let start = Instant::now();
    let interval = ControllerConfig::default().alarm_pulse_interval;

    controller.on_card(&card(REGISTERED_CARD), start);
    let commands = submit(&mut controller, "9999", start);

    assert_eq!(controller.state(), AccessState::Alarm);
    assert!(shown_texts(&commands).contains(&"Wrong Password"));

    // Fixed 10-pulse escalation driven by the poll clock
    let mut pulses = 0;
    for i in 0..10 {
        pulses += beeps(&controller.tick(start + interval * i));
    }
    assert_eq!(pulses, 10);

    // Back to the password phase with a cleared buffer: the card check
    // already passed, so the session does not restart from the card phase.
    assert_eq!(controller.state(), AccessState::AwaitingPassword);
    assert_eq!(controller.entered_len(), 0);

    // The attempt can be retried without a new card tap
    let commands = submit(&mut controller, FACTORY_PASSWORD, start + interval * 10);
    assert!(shown_texts(&commands).contains(&"Access Granted"));
}

#[test]
fn test_alarm_does_not_starve_inputs() {
    let mut controller = new_controller();
    let start = Instant::now();

    controller.on_card(&card(REGISTERED_CARD), start);
    submit(&mut controller, "1111", start);
    assert!(controller.alarm_active());

    // The loop keeps polling during the escalation; inputs are consumed
    // (and ignored) rather than queueing up behind a blocking beep loop.
    let commands = controller.on_key(KeyEvent::Digit(5), start);
    assert!(commands.is_empty());
    let commands = controller.on_card(&card(REGISTERED_CARD), start);
    assert!(commands.is_empty());
}

// ============================================================================
// Verification Precedence
// ============================================================================

#[test]
fn test_master_key_beats_current_password() {
    let mut controller = new_controller();
    let now = Instant::now();

    controller.on_card(&card(REGISTERED_CARD), now);
    let commands = submit(&mut controller, MASTER_KEY, now);

    assert_eq!(controller.state(), AccessState::MasterMode);
    assert!(shown_texts(&commands).contains(&"Master Mode"));
}

#[test]
fn test_password_change_end_to_end() {
    let mut controller = new_controller();
    let now = Instant::now();

    // Enter master mode and set "1234"
    controller.on_card(&card(REGISTERED_CARD), now);
    submit(&mut controller, MASTER_KEY, now);
    let commands = submit(&mut controller, "1234", now);
    assert_eq!(controller.state(), AccessState::AwaitingCard);
    assert!(shown_texts(&commands).contains(&"Password Set"));

    // Old password now alarms
    controller.on_card(&card(REGISTERED_CARD), now);
    submit(&mut controller, FACTORY_PASSWORD, now);
    assert_eq!(controller.state(), AccessState::Alarm);

    // Drain the escalation, then the new password grants access
    let interval = ControllerConfig::default().alarm_pulse_interval;
    for i in 0..10 {
        controller.tick(now + interval * i);
    }
    assert_eq!(controller.state(), AccessState::AwaitingPassword);

    let commands = submit(&mut controller, "1234", now + interval * 10);
    assert!(shown_texts(&commands).contains(&"Access Granted"));

    // The master key still works after the change
    let after_relock = now + interval * 10 + ControllerConfig::default().unlock_hold;
    controller.tick(after_relock);
    controller.on_card(&card(REGISTERED_CARD), after_relock);
    let commands = submit(&mut controller, MASTER_KEY, after_relock);
    assert!(shown_texts(&commands).contains(&"Master Mode"));
}

// ============================================================================
// Input Robustness
// ============================================================================

#[test]
fn test_overflowing_entry_is_silently_bounded() {
    let mut controller = new_controller();
    let now = Instant::now();

    controller.on_card(&card(REGISTERED_CARD), now);
    for _ in 0..50 {
        controller.on_key(KeyEvent::Digit(7), now);
    }

    assert_eq!(
        controller.entered_len(),
        deadbolt_core::constants::MAX_ENTRY_LENGTH
    );
    assert_eq!(controller.state(), AccessState::AwaitingPassword);
}

#[test]
fn test_clear_is_idempotent() {
    let mut controller = new_controller();
    let now = Instant::now();

    controller.on_card(&card(REGISTERED_CARD), now);
    controller.on_key(KeyEvent::Digit(3), now);

    controller.on_key(KeyEvent::Clear, now);
    assert_eq!(controller.entered_len(), 0);
    assert_eq!(controller.state(), AccessState::AwaitingPassword);

    controller.on_key(KeyEvent::Clear, now);
    assert_eq!(controller.entered_len(), 0);
    assert_eq!(controller.state(), AccessState::AwaitingPassword);
}

#[test]
fn test_custom_timings_shrink_the_escalation() {
    let config = ControllerConfig {
        alarm_pulse_count: 3,
        alarm_pulse_interval: Duration::from_millis(10),
        unlock_hold: Duration::from_millis(50),
    };
    let mut controller = AccessController::with_config(
        CardRegistry::single(card(REGISTERED_CARD)),
        CredentialStore::volatile(),
        config,
    );
    let start = Instant::now();

    controller.on_card(&card(REGISTERED_CARD), start);
    submit(&mut controller, "42", start);

    let commands = controller.tick(start + Duration::from_millis(100));
    assert_eq!(beeps(&commands), 3);
    assert_eq!(controller.state(), AccessState::AwaitingPassword);
}
