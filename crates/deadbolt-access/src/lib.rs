//! Access-control core for the deadbolt door controller.
//!
//! This crate contains the decision logic of the two-factor entry flow:
//! the entry state machine, the per-attempt session, credential
//! verification and storage, and the [`AccessController`] that ties them
//! together. It is deliberately free of device I/O: the controller consumes
//! card and keypad events and returns [`Command`]s for the composition loop
//! to execute against the hardware layer.

pub mod controller;
pub mod credentials;
pub mod registry;
pub mod session;
pub mod state;

pub use controller::{AccessController, Command, ControllerConfig};
pub use credentials::{CredentialBackend, CredentialStore, Verdict, VolatileBackend};
pub use registry::CardRegistry;
pub use session::EntrySession;
pub use state::{AccessState, StateMachine, StateTransition};
