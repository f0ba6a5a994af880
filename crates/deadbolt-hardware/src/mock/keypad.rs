//! Mock keypad implementation for testing and development.
//!
//! This module provides a simulated 4x4 matrix keypad that can be controlled
//! programmatically without requiring physical hardware.

use crate::{Result, traits::KeypadDevice, types::DeviceInfo};
use deadbolt_core::KeyEvent;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TryRecvError;

/// Mock keypad device for testing and development.
///
/// This device simulates a matrix keypad by receiving input through an
/// internal channel. Tests and the interactive emulator send key events
/// programmatically using a [`MockKeypadHandle`].
///
/// # Examples
///
/// ```
/// use deadbolt_hardware::mock::MockKeypad;
/// use deadbolt_hardware::traits::KeypadDevice;
/// use deadbolt_core::KeyEvent;
///
/// #[tokio::main]
/// async fn main() -> deadbolt_hardware::Result<()> {
///     let (mut keypad, handle) = MockKeypad::new();
///
///     handle.press(KeyEvent::Digit(1)).await?;
///     handle.press(KeyEvent::Enter).await?;
///
///     assert_eq!(keypad.try_read_key().await?, Some(KeyEvent::Digit(1)));
///     assert_eq!(keypad.try_read_key().await?, Some(KeyEvent::Enter));
///     assert_eq!(keypad.try_read_key().await?, None);
///
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct MockKeypad {
    /// Channel receiver for simulated input
    input_rx: mpsc::Receiver<KeyEvent>,

    /// Device name
    name: String,
}

impl MockKeypad {
    /// Create a new mock keypad with the default name.
    ///
    /// Returns a tuple of (MockKeypad, MockKeypadHandle) where the handle
    /// can be used to simulate input to the keypad.
    pub fn new() -> (Self, MockKeypadHandle) {
        Self::with_name("Mock Keypad".to_string())
    }

    /// Create a new mock keypad with a custom name.
    pub fn with_name(name: String) -> (Self, MockKeypadHandle) {
        let (input_tx, input_rx) = mpsc::channel(32);

        let keypad = Self {
            input_rx,
            name: name.clone(),
        };

        let handle = MockKeypadHandle { input_tx, name };

        (keypad, handle)
    }
}

impl KeypadDevice for MockKeypad {
    async fn try_read_key(&mut self) -> Result<Option<KeyEvent>> {
        match self.input_rx.try_recv() {
            Ok(key) => Ok(Some(key)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => {
                Err(crate::HardwareError::disconnected(self.name.clone()))
            }
        }
    }

    async fn get_info(&self) -> Result<DeviceInfo> {
        Ok(DeviceInfo::new(self.name.clone(), "Mock Keypad 4x4").with_firmware_version("1.0.0"))
    }
}

/// Handle for controlling a mock keypad.
///
/// This handle allows programmatic control of the mock keypad by sending
/// key events. It can be cloned and shared across tasks.
#[derive(Debug, Clone)]
pub struct MockKeypadHandle {
    /// Channel sender for simulated input
    input_tx: mpsc::Sender<KeyEvent>,

    /// Device name
    name: String,
}

impl MockKeypadHandle {
    /// Send a key event to the mock keypad.
    ///
    /// # Errors
    ///
    /// Returns an error if the keypad has been dropped and the channel is
    /// closed.
    pub async fn press(&self, key: KeyEvent) -> Result<()> {
        self.input_tx
            .send(key)
            .await
            .map_err(|_| crate::HardwareError::disconnected(self.name.clone()))
    }

    /// Press a sequence of digit keys.
    ///
    /// # Errors
    ///
    /// Returns an error if any digit is greater than 9 or the channel is
    /// closed.
    pub async fn press_digits(&self, digits: &[u8]) -> Result<()> {
        for &digit in digits {
            let key = KeyEvent::digit(digit)
                .map_err(|e| crate::HardwareError::invalid_data(e.to_string()))?;
            self.press(key).await?;
        }
        Ok(())
    }

    /// Press the keys spelled by a keycap string (e.g. `"12AB"`).
    ///
    /// # Errors
    ///
    /// Returns an error if a character is not on the keypad or the channel
    /// is closed.
    pub async fn press_sequence(&self, keys: &str) -> Result<()> {
        for c in keys.chars() {
            let key = KeyEvent::from_char(c).ok_or_else(|| {
                crate::HardwareError::invalid_data(format!("'{c}' is not a keypad character"))
            })?;
            self.press(key).await?;
        }
        Ok(())
    }

    /// Press a complete code followed by `ENT`.
    ///
    /// This is a convenience method for common test scenarios.
    ///
    /// # Errors
    ///
    /// Returns an error if a character is not on the keypad or the channel
    /// is closed.
    pub async fn submit_code(&self, code: &str) -> Result<()> {
        self.press_sequence(code).await?;
        self.press(KeyEvent::Enter).await?;
        Ok(())
    }

    /// Get the device name.
    pub fn name(&self) -> &str {
        &self.name
    }
}
