//! Mock proximity card reader for testing and development.
//!
//! This module provides a simulated card reader that can be controlled
//! programmatically without requiring physical hardware.

use crate::{Result, traits::CardReaderDevice, types::DeviceInfo};
use deadbolt_core::CardId;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TryRecvError;

/// Mock card reader for testing and development.
///
/// The reader is fed through an internal channel: a card sent via the
/// [`MockCardReaderHandle`] appears on the next `try_read` poll, matching
/// the one-read-per-presentation behavior of a real reader.
///
/// # Examples
///
/// ```
/// use deadbolt_hardware::mock::MockCardReader;
/// use deadbolt_hardware::traits::CardReaderDevice;
///
/// #[tokio::main]
/// async fn main() -> deadbolt_hardware::Result<()> {
///     let (mut reader, handle) = MockCardReader::new();
///
///     assert!(reader.try_read().await?.is_none());
///
///     handle.present("52C31C2F").await?;
///     let card = reader.try_read().await?.unwrap();
///     assert_eq!(card.as_str(), "52C31C2F");
///
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct MockCardReader {
    /// Channel receiver for simulated card presentations
    event_rx: mpsc::Receiver<CardId>,

    /// Device name
    name: String,
}

impl MockCardReader {
    /// Create a new mock card reader with the default name.
    ///
    /// Returns a tuple of (MockCardReader, MockCardReaderHandle) where the
    /// handle can be used to simulate card presentations.
    pub fn new() -> (Self, MockCardReaderHandle) {
        Self::with_name("Mock Card Reader".to_string())
    }

    /// Create a new mock card reader with a custom name.
    pub fn with_name(name: String) -> (Self, MockCardReaderHandle) {
        let (event_tx, event_rx) = mpsc::channel(32);

        let reader = Self {
            event_rx,
            name: name.clone(),
        };

        let handle = MockCardReaderHandle { event_tx, name };

        (reader, handle)
    }
}

impl CardReaderDevice for MockCardReader {
    async fn try_read(&mut self) -> Result<Option<CardId>> {
        match self.event_rx.try_recv() {
            Ok(card) => Ok(Some(card)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => {
                Err(crate::HardwareError::disconnected(self.name.clone()))
            }
        }
    }

    async fn get_info(&self) -> Result<DeviceInfo> {
        Ok(DeviceInfo::new(self.name.clone(), "Mock RFID v1.0").with_firmware_version("1.0.0"))
    }
}

/// Handle for controlling a mock card reader.
///
/// Can be cloned and shared across tasks.
#[derive(Debug, Clone)]
pub struct MockCardReaderHandle {
    /// Channel sender for simulated card presentations
    event_tx: mpsc::Sender<CardId>,

    /// Device name
    name: String,
}

impl MockCardReaderHandle {
    /// Present a card to the reader.
    ///
    /// # Errors
    ///
    /// Returns an error if the reader has been dropped and the channel is
    /// closed.
    pub async fn present_card(&self, card: CardId) -> Result<()> {
        self.event_tx
            .send(card)
            .await
            .map_err(|_| crate::HardwareError::disconnected(self.name.clone()))
    }

    /// Present a card by raw identifier string.
    ///
    /// # Errors
    ///
    /// Returns an error if the identifier is malformed or the reader has
    /// been dropped.
    pub async fn present(&self, id: &str) -> Result<()> {
        let card =
            CardId::new(id).map_err(|e| crate::HardwareError::invalid_data(e.to_string()))?;
        self.present_card(card).await
    }

    /// Get the device name.
    pub fn name(&self) -> &str {
        &self.name
    }
}
