//! Credential verification and storage.
//!
//! The [`CredentialStore`] holds the mutable user password and the
//! compile-time master key, and classifies submitted codes into a
//! [`Verdict`]. Persistence goes through the [`CredentialBackend`] seam;
//! the shipped [`VolatileBackend`] keeps everything in memory, so the
//! password reverts to the factory default on every restart.

use std::fmt;

use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;
use tracing::{info, warn};

use deadbolt_core::{
    Password, Result,
    constants::MASTER_KEY,
};

/// Outcome of verifying a submitted code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// The code matches the master key (highest precedence).
    Master,

    /// The code matches the current user password.
    Correct,

    /// The code matches neither.
    Wrong,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Master => write!(f, "MASTER"),
            Verdict::Correct => write!(f, "CORRECT"),
            Verdict::Wrong => write!(f, "WRONG"),
        }
    }
}

/// Persistence seam for the current password.
///
/// The minimal system keeps credentials in volatile memory, but the store
/// reports persistence failures explicitly so a durable backend can slot in
/// without changing the control logic.
pub trait CredentialBackend: Send {
    /// Durably record the current password.
    ///
    /// # Errors
    /// Returns `Error::Storage` if the password cannot be written.
    fn persist(&mut self, password: &Password) -> Result<()>;

    /// Load the previously persisted password, if any.
    ///
    /// # Errors
    /// Returns `Error::Storage` if the backing store cannot be read.
    fn load(&mut self) -> Result<Option<Password>>;
}

/// In-memory backend: never fails, empty at every boot.
#[derive(Debug, Default)]
pub struct VolatileBackend {
    stored: Option<Password>,
}

impl VolatileBackend {
    /// Create an empty volatile backend.
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialBackend for VolatileBackend {
    fn persist(&mut self, password: &Password) -> Result<()> {
        self.stored = Some(password.clone());
        Ok(())
    }

    fn load(&mut self) -> Result<Option<Password>> {
        Ok(self.stored.clone())
    }
}

/// Holds the current password and the immutable master key.
///
/// Verification is pure and side-effect free. Both credential comparisons
/// are constant-time and both are evaluated before branching, so the
/// verdict does not leak which comparison failed through timing.
pub struct CredentialStore {
    /// Current user password.
    current: Password,

    /// Persistence backend.
    backend: Box<dyn CredentialBackend>,
}

impl CredentialStore {
    /// Create a store over the given backend.
    ///
    /// Loads the persisted password; if the backend has nothing stored or
    /// fails to read, the store falls back to the factory default.
    pub fn new(backend: Box<dyn CredentialBackend>) -> Self {
        let mut backend = backend;
        let current = match backend.load() {
            Ok(Some(password)) => password,
            Ok(None) => {
                info!("no stored credential, using factory default");
                Password::factory_default()
            }
            Err(e) => {
                warn!(error = %e, "credential load failed, using factory default");
                Password::factory_default()
            }
        };

        Self { current, backend }
    }

    /// Create a store over a fresh volatile backend (factory default
    /// password).
    pub fn volatile() -> Self {
        Self::new(Box::new(VolatileBackend::new()))
    }

    /// Classify a submitted code.
    ///
    /// Precedence: master key first, then the current password, else wrong.
    #[must_use]
    pub fn verify(&self, candidate: &str) -> Verdict {
        let bytes = candidate.as_bytes();

        // Evaluate both comparisons before branching
        let is_master: bool = bytes.ct_eq(MASTER_KEY.as_bytes()).into();
        let is_current: bool = bytes.ct_eq(self.current.as_str().as_bytes()).into();

        if is_master {
            Verdict::Master
        } else if is_current {
            Verdict::Correct
        } else {
            Verdict::Wrong
        }
    }

    /// Replace the current password and persist it.
    ///
    /// The in-memory password is updated even if persistence fails, so the
    /// new credential is effective until the next restart.
    ///
    /// # Errors
    /// Returns `Error::Storage` if the backend cannot record the change.
    pub fn set_password(&mut self, new_password: Password) -> Result<()> {
        self.current = new_password;
        self.backend.persist(&self.current)
    }

    /// Restore the factory default password and persist it.
    ///
    /// # Errors
    /// Returns `Error::Storage` if the backend cannot record the change.
    pub fn reset_password(&mut self) -> Result<()> {
        info!("password reset to factory default");
        self.set_password(Password::factory_default())
    }
}

impl fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print credential material
        write!(f, "CredentialStore {{ current: [REDACTED] }}")
    }
}
