use crate::{
    Result,
    constants::{CARD_ID_LENGTH, FACTORY_DEFAULT_PASSWORD, MAX_LOCK_ANGLE, MAX_PASSWORD_LENGTH},
    error::Error,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use subtle::ConstantTimeEq;

/// Proximity card identifier (8 uppercase hex digits).
///
/// # Security
/// This type implements constant-time comparison to prevent timing attacks
/// when matching card identifiers against the registry.
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
pub struct CardId(String);

impl CardId {
    /// Create a new card identifier with validation.
    ///
    /// The identifier is normalized (trimmed and converted to uppercase)
    /// before validation.
    ///
    /// # Errors
    /// Returns `Error::InvalidCardFormat` if:
    /// - The identifier is not exactly 8 characters long
    /// - The identifier contains non-hexadecimal characters
    pub fn new(id: &str) -> Result<Self> {
        // Normalize: trim and uppercase
        let id = id.trim().to_uppercase();

        if id.len() != CARD_ID_LENGTH {
            return Err(Error::InvalidCardFormat(format!(
                "Card ID must be {CARD_ID_LENGTH} chars, got {}",
                id.len()
            )));
        }

        if !id.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::InvalidCardFormat(format!(
                "Card ID must be hexadecimal, got '{id}'"
            )));
        }

        Ok(CardId(id))
    }

    /// Get the card identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for CardId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        CardId::new(s)
    }
}

/// Constant-time comparison implementation for CardId
///
/// This prevents timing attacks by ensuring comparison takes the same time
/// regardless of where the strings differ.
impl PartialEq for CardId {
    fn eq(&self, other: &Self) -> bool {
        self.0.as_bytes().ct_eq(other.0.as_bytes()).into()
    }
}

/// Hash implementation for CardId
///
/// Implements standard hashing for use in hash-based collections.
impl std::hash::Hash for CardId {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

/// User-settable password (1-8 characters from the keypad alphabet).
///
/// The alphabet is the keypad legend: digits `0-9` and letters `A-D`.
/// Passwords compare in constant time and never appear in `Debug` output.
#[derive(Clone, Eq, Serialize, Deserialize)]
pub struct Password(String);

impl Password {
    /// Create a new password with validation.
    ///
    /// Input is normalized (trimmed and converted to uppercase) so keypad
    /// letters match regardless of how they were captured.
    ///
    /// # Errors
    /// Returns `Error::InvalidPassword` if:
    /// - The password is empty or longer than 8 characters
    /// - The password contains characters outside `0-9` / `A-D`
    pub fn new(value: &str) -> Result<Self> {
        let value = value.trim().to_uppercase();

        if value.is_empty() || value.len() > MAX_PASSWORD_LENGTH {
            return Err(Error::InvalidPassword(format!(
                "Password must be 1-{MAX_PASSWORD_LENGTH} chars, got {}",
                value.len()
            )));
        }

        if !value.chars().all(is_keypad_char) {
            return Err(Error::InvalidPassword(
                "Password must use keypad characters 0-9 / A-D".to_string(),
            ));
        }

        Ok(Password(value))
    }

    /// The factory default password restored by a credential reset.
    #[must_use]
    pub fn factory_default() -> Self {
        // The constant is validated by tests; construction cannot fail.
        Password(FACTORY_DEFAULT_PASSWORD.to_string())
    }

    /// Get the password as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Password length in characters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the password is empty (never the case for a
    /// validated instance).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Password([REDACTED])")
    }
}

impl std::str::FromStr for Password {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Password::new(s)
    }
}

/// Constant-time comparison implementation for Password
impl PartialEq for Password {
    fn eq(&self, other: &Self) -> bool {
        self.0.as_bytes().ct_eq(other.0.as_bytes()).into()
    }
}

/// Check whether a character belongs to the keypad alphabet.
fn is_keypad_char(c: char) -> bool {
    c.is_ascii_digit() || ('A'..='D').contains(&c)
}

/// One logical keypad event.
///
/// The keypad is a 4x4 matrix with digits `0-9`, letters `A-D`, and the two
/// control keys `CLR` and `ENT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyEvent {
    /// Numeric digit (0-9).
    Digit(u8),

    /// Letter key (A-D).
    Letter(char),

    /// Clear key (CLR): discard the entered characters.
    Clear,

    /// Enter key (ENT): submit the entered characters.
    Enter,
}

impl KeyEvent {
    /// Create a digit event.
    ///
    /// # Errors
    /// Returns `Error::InvalidKey` if the digit is greater than 9.
    pub fn digit(d: u8) -> Result<Self> {
        if d > 9 {
            return Err(Error::InvalidKey(format!("Digit must be 0-9, got {d}")));
        }
        Ok(Self::Digit(d))
    }

    /// Create a letter event.
    ///
    /// # Errors
    /// Returns `Error::InvalidKey` if the character is not `A`-`D`
    /// (case-insensitive).
    pub fn letter(c: char) -> Result<Self> {
        let c = c.to_ascii_uppercase();
        if !('A'..='D').contains(&c) {
            return Err(Error::InvalidKey(format!("Letter must be A-D, got {c}")));
        }
        Ok(Self::Letter(c))
    }

    /// Map a keycap character to an event.
    ///
    /// Returns `None` for unrecognized symbols, which the controller treats
    /// as no-ops.
    #[must_use]
    pub fn from_char(c: char) -> Option<Self> {
        let c = c.to_ascii_uppercase();
        match c {
            '0'..='9' => Some(Self::Digit(c as u8 - b'0')),
            'A'..='D' => Some(Self::Letter(c)),
            _ => None,
        }
    }

    /// The character this event contributes to the entry buffer, if any.
    ///
    /// `Clear` and `Enter` are control keys and contribute nothing.
    #[must_use]
    pub fn as_entry_char(&self) -> Option<char> {
        match self {
            Self::Digit(d) => Some((b'0' + d) as char),
            Self::Letter(c) => Some(*c),
            Self::Clear | Self::Enter => None,
        }
    }

    /// Check if this event is a digit.
    #[must_use]
    pub fn is_digit(&self) -> bool {
        matches!(self, Self::Digit(_))
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Digit(d) => write!(f, "{d}"),
            Self::Letter(c) => write!(f, "{c}"),
            Self::Clear => write!(f, "CLR"),
            Self::Enter => write!(f, "ENT"),
        }
    }
}

/// Lock actuator position as a servo angle (0-180 degrees).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LockPosition(u8);

impl LockPosition {
    /// Fully locked.
    pub const LOCKED: LockPosition = LockPosition(crate::constants::LOCKED_ANGLE);

    /// Partially open: card phase satisfied, password pending.
    pub const PARTIAL_OPEN: LockPosition = LockPosition(crate::constants::PARTIAL_OPEN_ANGLE);

    /// Fully open: access granted.
    pub const FULL_OPEN: LockPosition = LockPosition(crate::constants::FULL_OPEN_ANGLE);

    /// Create a lock position with validation.
    ///
    /// # Errors
    /// Returns `Error::InvalidAngle` if the angle exceeds 180 degrees.
    pub fn new(angle: u8) -> Result<Self> {
        if angle > MAX_LOCK_ANGLE {
            return Err(Error::InvalidAngle {
                angle,
                max: MAX_LOCK_ANGLE,
            });
        }
        Ok(LockPosition(angle))
    }

    /// Get the raw servo angle in degrees.
    #[must_use]
    pub fn angle(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for LockPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} deg", self.0)
    }
}
