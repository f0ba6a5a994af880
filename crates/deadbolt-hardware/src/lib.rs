//! Hardware device abstraction layer for the deadbolt access controller.
//!
//! This crate provides trait-based abstractions for the peripherals of the
//! door controller: the proximity card reader, the 4x4 matrix keypad, the
//! annunciator (buzzer + 2x16 character display), and the servo lock
//! actuator. These traits enable substitution between terminal-backed
//! implementations (for the interactive emulator) and deterministic mocks
//! (for tests) without touching the access-control core.
//!
//! # Design Philosophy
//!
//! - **Poll-based**: the controller runs a cooperative polling loop, so
//!   input devices expose non-blocking `try_read`-style methods that return
//!   `Ok(None)` when nothing is pending.
//! - **Async-first**: all device operations are asynchronous using native
//!   `async fn` in traits (Rust 1.90 + Edition 2024 RPITIT).
//! - **Thread-safe**: all traits require `Send + Sync` for use with Tokio.
//! - **Error-aware**: all operations return `Result<T>` with detailed error
//!   information.
//!
//! # Examples
//!
//! ```no_run
//! use deadbolt_hardware::traits::{CardReaderDevice, KeypadDevice};
//! use deadbolt_hardware::error::Result;
//!
//! async fn poll_cycle<R, K>(reader: &mut R, keypad: &mut K) -> Result<()>
//! where
//!     R: CardReaderDevice,
//!     K: KeypadDevice,
//! {
//!     if let Some(card) = reader.try_read().await? {
//!         println!("card: {card}");
//!     }
//!     if let Some(key) = keypad.try_read_key().await? {
//!         println!("key: {key}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Implementations
//!
//! - [`mock`] — channel-driven fakes with cloneable control handles, plus
//!   recording output devices, for tests and scripted scenarios.
//! - [`console`] — terminal-backed annunciator and lock used by the
//!   interactive emulator binary.

pub mod console;
pub mod display;
pub mod error;
pub mod mock;
pub mod traits;
pub mod types;

// Re-export commonly used types for convenience
pub use display::TextPanel;
pub use error::{HardwareError, Result};
pub use traits::{AnnunciatorDevice, CardReaderDevice, KeypadDevice, LockDevice};
pub use types::DeviceInfo;
