//! Core constants for the deadbolt access controller.
//!
//! These values come from the controller firmware: credential formats, the
//! servo positions of the lock, the alarm cadence, and the polling interval
//! that bounds input latency. They are centralized here so the control logic,
//! the device layer, and the tests all agree on them.

// ============================================================================
// Card Format
// ============================================================================

/// Card identifier length in characters.
///
/// The reader yields fixed-width 4-byte UIDs rendered as 8 uppercase hex
/// digits (e.g. `52C31C2F`). Identifiers of any other length are rejected.
pub const CARD_ID_LENGTH: usize = 8;

// ============================================================================
// Passwords and Master Key
// ============================================================================

/// Maximum length of a user-settable password (characters).
///
/// Passwords are accumulated from keypad presses, so the alphabet is the
/// keypad legend: digits `0-9` and letters `A-D`.
pub const MAX_PASSWORD_LENGTH: usize = 8;

/// Maximum number of characters accepted into the entry buffer.
///
/// This must be at least [`MASTER_KEY`]`.len()` so the master key can be
/// typed at all. Presses beyond this bound are silently ignored.
pub const MAX_ENTRY_LENGTH: usize = 10;

/// Factory default password, restored by a credential reset and used when
/// the persistence backend has nothing stored at boot.
pub const FACTORY_DEFAULT_PASSWORD: &str = "00000000";

/// Master override key.
///
/// Always grants administrative access regardless of the current password.
/// Its length (10) exceeds [`MAX_PASSWORD_LENGTH`], so no user-settable
/// password can ever collide with it.
pub const MASTER_KEY: &str = "A1B2C3D4DD";

// ============================================================================
// Lock Actuator
// ============================================================================

/// Maximum servo angle accepted by the lock actuator.
pub const MAX_LOCK_ANGLE: u8 = 180;

/// Servo angle for the fully locked position.
pub const LOCKED_ANGLE: u8 = 0;

/// Servo angle commanded after a valid card read (card phase satisfied,
/// password still pending).
pub const PARTIAL_OPEN_ANGLE: u8 = 90;

/// Servo angle commanded after a correct password (door fully open).
pub const FULL_OPEN_ANGLE: u8 = 180;

// ============================================================================
// Timing
// ============================================================================

/// Poll loop sleep between iterations (milliseconds).
///
/// The loop's only timing primitive; it bounds input latency for both the
/// card reader and the keypad.
pub const POLL_INTERVAL_MS: u64 = 100;

/// Duration of a single annunciator beep pulse (milliseconds).
pub const BEEP_DURATION_MS: u64 = 100;

/// Number of beep pulses in a wrong-password alarm escalation.
pub const ALARM_PULSE_COUNT: u8 = 10;

/// Spacing between alarm pulses (milliseconds).
pub const ALARM_PULSE_INTERVAL_MS: u64 = 200;

/// How long the lock stays fully open after a grant before re-locking
/// (milliseconds).
pub const UNLOCK_HOLD_MS: u64 = 5000;

// ============================================================================
// Display Geometry
// ============================================================================

/// Number of display lines (standard 1602-style character LCD).
pub const DISPLAY_LINES: usize = 2;

/// Number of characters per display line.
pub const DISPLAY_COLUMNS: usize = 16;

// ============================================================================
// Display Messages
// ============================================================================

/// Idle prompt shown while waiting for a card.
pub const MSG_PRESENT_CARD: &str = "Present Card";

/// Shown when a registered card is accepted.
pub const MSG_CARD_OK: &str = "Card OK";

/// Prompt for the password phase.
pub const MSG_ENTER_PASSWORD: &str = "Enter Password";

/// Shown when an unregistered or malformed card is read.
pub const MSG_INVALID_CARD: &str = "Invalid Card";

/// Shown when the entry buffer is cleared.
pub const MSG_CLEARED: &str = "Cleared";

/// Shown when the correct password is submitted.
pub const MSG_ACCESS_GRANTED: &str = "Access Granted";

/// Shown when a wrong password triggers the alarm.
pub const MSG_WRONG_PASSWORD: &str = "Wrong Password";

/// Shown when the master key is submitted.
pub const MSG_MASTER_MODE: &str = "Master Mode";

/// Second-line prompt while in master mode.
pub const MSG_NEW_PASSWORD: &str = "New Password?";

/// Shown when master mode stores a new password.
pub const MSG_PASSWORD_SET: &str = "Password Set";

/// Shown when master mode exits without changing the password.
pub const MSG_UNCHANGED: &str = "Unchanged";

/// Shown when master mode is aborted with CLR.
pub const MSG_CANCELLED: &str = "Cancelled";

/// Shown after a factory credential reset.
pub const MSG_PASSWORD_RESET: &str = "Password Reset";

/// Shown when the persistence backend rejects a credential write.
pub const MSG_STORAGE_ERROR: &str = "Storage Error";
