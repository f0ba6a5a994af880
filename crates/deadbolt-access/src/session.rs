//! Transient per-attempt entry state.

use std::fmt;

use deadbolt_core::constants::MAX_ENTRY_LENGTH;

/// The characters accumulated from the keypad during one entry attempt.
///
/// The buffer is bounded; pushes beyond the bound are silently ignored so
/// held-down or repeated keys can never grow it without limit. The content
/// is treated as a secret: `Debug` shows only the length and the display
/// echo is masked.
///
/// # Examples
///
/// ```
/// use deadbolt_access::EntrySession;
///
/// let mut session = EntrySession::new();
/// session.push('1');
/// session.push('2');
///
/// assert_eq!(session.masked(), "**");
/// assert_eq!(session.take(), "12");
/// assert!(session.is_empty());
/// ```
#[derive(Clone)]
pub struct EntrySession {
    /// Entered characters, in press order.
    entered: String,

    /// Maximum number of characters accepted.
    limit: usize,
}

impl EntrySession {
    /// Create an empty session with the standard entry bound.
    ///
    /// The bound is the master key length, so the master key is always
    /// enterable while still capping the buffer.
    pub fn new() -> Self {
        Self::with_limit(MAX_ENTRY_LENGTH)
    }

    /// Create an empty session with a custom bound.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            entered: String::new(),
            limit,
        }
    }

    /// Append a character if the buffer is below its bound.
    ///
    /// Returns `true` if the character was accepted, `false` if the buffer
    /// was already full and the press was ignored.
    pub fn push(&mut self, c: char) -> bool {
        if self.entered.len() >= self.limit {
            return false;
        }
        self.entered.push(c);
        true
    }

    /// Discard all entered characters.
    pub fn clear(&mut self) {
        self.entered.clear();
    }

    /// Drain the entered characters for submission, leaving the buffer
    /// empty.
    pub fn take(&mut self) -> String {
        std::mem::take(&mut self.entered)
    }

    /// Number of entered characters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entered.len()
    }

    /// Returns `true` if nothing has been entered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entered.is_empty()
    }

    /// Masked display echo: one `*` per entered character.
    #[must_use]
    pub fn masked(&self) -> String {
        "*".repeat(self.entered.len())
    }
}

impl Default for EntrySession {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EntrySession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntrySession({} chars)", self.entered.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_empty() {
        let session = EntrySession::new();
        assert!(session.is_empty());
        assert_eq!(session.len(), 0);
        assert_eq!(session.masked(), "");
    }

    #[test]
    fn test_push_and_take() {
        let mut session = EntrySession::new();
        assert!(session.push('1'));
        assert!(session.push('A'));

        assert_eq!(session.take(), "1A");
        assert!(session.is_empty());
    }

    #[test]
    fn test_push_at_bound_is_ignored() {
        let mut session = EntrySession::with_limit(3);
        assert!(session.push('1'));
        assert!(session.push('2'));
        assert!(session.push('3'));

        // At the bound: ignored, buffer unchanged
        assert!(!session.push('4'));
        assert_eq!(session.len(), 3);
        assert_eq!(session.take(), "123");
    }

    #[test]
    fn test_clear() {
        let mut session = EntrySession::new();
        session.push('7');
        session.push('8');

        session.clear();
        assert!(session.is_empty());
    }

    #[test]
    fn test_masked_echo() {
        let mut session = EntrySession::new();
        for c in ['1', '2', '3', '4'] {
            session.push(c);
        }
        assert_eq!(session.masked(), "****");
    }

    #[test]
    fn test_default_bound_admits_master_key_length() {
        let mut session = EntrySession::new();
        for c in deadbolt_core::constants::MASTER_KEY.chars() {
            assert!(session.push(c));
        }
        assert_eq!(session.len(), deadbolt_core::constants::MASTER_KEY.len());
    }

    #[test]
    fn test_debug_does_not_leak_content() {
        let mut session = EntrySession::new();
        session.push('4');
        session.push('2');

        let debug_str = format!("{:?}", session);
        assert!(!debug_str.contains("42"));
        assert!(debug_str.contains("2 chars"));
    }
}
