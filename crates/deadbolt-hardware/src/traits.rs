//! Hardware device trait definitions.
//!
//! This module defines trait interfaces for the peripherals of the door
//! controller: the proximity card reader, the keypad, the annunciator
//! (buzzer + character display), and the lock actuator. These traits
//! establish the contract between the access-control core and the device
//! layer, enabling substitution between console-backed implementations and
//! deterministic mocks.
//!
//! The controller runs a cooperative polling loop, so the read methods are
//! non-blocking "check now" polls: they return `Ok(None)` immediately when
//! no input is pending, and never suspend waiting for an external event.
//!
//! All traits use native `async fn` methods (Rust 1.90 + Edition 2024
//! RPITIT), eliminating the need for the `async_trait` macro.

#![allow(async_fn_in_trait)]

use crate::error::Result;
use crate::types::DeviceInfo;
use deadbolt_core::{CardId, KeyEvent, LockPosition};

/// Proximity card reader abstraction.
///
/// # Examples
///
/// ```no_run
/// use deadbolt_hardware::traits::CardReaderDevice;
/// use deadbolt_hardware::error::Result;
///
/// async fn poll_once<R: CardReaderDevice>(reader: &mut R) -> Result<()> {
///     if let Some(card) = reader.try_read().await? {
///         println!("card presented: {card}");
///     }
///     Ok(())
/// }
/// ```
pub trait CardReaderDevice: Send + Sync {
    /// Poll the reader for a card in the field.
    ///
    /// Non-blocking: returns `Ok(None)` immediately when no card is
    /// present. At most one card identifier is yielded per call.
    ///
    /// # Errors
    ///
    /// Returns an error if the device is disconnected or a communication
    /// error occurs.
    async fn try_read(&mut self) -> Result<Option<CardId>>;

    /// Get device information.
    async fn get_info(&self) -> Result<DeviceInfo>;
}

/// Keypad device abstraction.
///
/// Represents a 4x4 matrix keypad with digits `0-9`, letters `A-D`, and the
/// `CLR` / `ENT` control keys.
pub trait KeypadDevice: Send + Sync {
    /// Poll the keypad for a pending key event.
    ///
    /// Non-blocking: returns `Ok(None)` immediately when no key has been
    /// pressed. At most one logical event is yielded per call.
    ///
    /// # Errors
    ///
    /// Returns an error if the device is disconnected or a communication
    /// error occurs.
    async fn try_read_key(&mut self) -> Result<Option<KeyEvent>>;

    /// Get device information.
    async fn get_info(&self) -> Result<DeviceInfo>;
}

/// Annunciator abstraction: audible buzzer plus 2-line character display.
pub trait AnnunciatorDevice: Send + Sync {
    /// Emit one fixed-duration beep pulse.
    ///
    /// Fire-and-forget: the pulse duration is a device property and the
    /// call returns without waiting for the pulse to finish.
    ///
    /// # Errors
    ///
    /// Returns an error if the device is disconnected.
    async fn beep(&mut self) -> Result<()>;

    /// Render text on the given display line.
    ///
    /// Text longer than the line width is truncated, never an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the line index is out of range for the display.
    async fn show(&mut self, line: usize, text: &str) -> Result<()>;

    /// Get device information.
    async fn get_info(&self) -> Result<DeviceInfo>;
}

/// Lock actuator abstraction.
///
/// Drives the physical lock servo to a requested angle. Commands are
/// idempotent and assumed to succeed; there is no jam or stall feedback.
pub trait LockDevice: Send + Sync {
    /// Command the lock to the given position.
    ///
    /// # Errors
    ///
    /// Returns an error if the device is disconnected.
    async fn set_position(&mut self, position: LockPosition) -> Result<()>;

    /// Get device information.
    async fn get_info(&self) -> Result<DeviceInfo>;
}
