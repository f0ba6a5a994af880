//! Mock annunciator (buzzer + display) for testing.
//!
//! Records every beep pulse and keeps the rendered display content in a
//! [`TextPanel`] so tests can assert on user-visible feedback.

use crate::{Result, display::TextPanel, traits::AnnunciatorDevice, types::DeviceInfo};

/// Mock annunciator for testing and development.
///
/// # Examples
///
/// ```
/// use deadbolt_hardware::mock::MockAnnunciator;
/// use deadbolt_hardware::traits::AnnunciatorDevice;
///
/// #[tokio::main]
/// async fn main() -> deadbolt_hardware::Result<()> {
///     let mut annunciator = MockAnnunciator::new();
///
///     annunciator.beep().await?;
///     annunciator.show(0, "Card OK").await?;
///
///     assert_eq!(annunciator.beep_count(), 1);
///     assert_eq!(annunciator.line(0).unwrap().trim_end(), "Card OK");
///
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct MockAnnunciator {
    /// Device name
    name: String,

    /// Number of beep pulses emitted
    beeps: u64,

    /// Rendered display content
    panel: TextPanel,
}

impl MockAnnunciator {
    /// Create a new mock annunciator with the default name.
    pub fn new() -> Self {
        Self::with_name("Mock Annunciator".to_string())
    }

    /// Create a new mock annunciator with a custom name.
    pub fn with_name(name: String) -> Self {
        Self {
            name,
            beeps: 0,
            panel: TextPanel::default(),
        }
    }

    /// Total number of beep pulses emitted so far.
    pub fn beep_count(&self) -> u64 {
        self.beeps
    }

    /// Rendered content of a display line, padded to the column width.
    ///
    /// # Errors
    ///
    /// Returns an error if the line index is out of range.
    pub fn line(&self, line: usize) -> Result<&str> {
        self.panel
            .get_line(line)
            .map_err(|e| crate::HardwareError::invalid_data(e.to_string()))
    }

    /// The underlying display panel.
    pub fn panel(&self) -> &TextPanel {
        &self.panel
    }
}

impl Default for MockAnnunciator {
    fn default() -> Self {
        Self::new()
    }
}

impl AnnunciatorDevice for MockAnnunciator {
    async fn beep(&mut self) -> Result<()> {
        self.beeps += 1;
        Ok(())
    }

    async fn show(&mut self, line: usize, text: &str) -> Result<()> {
        self.panel
            .set_line(line, text)
            .map_err(|e| crate::HardwareError::invalid_data(e.to_string()))
    }

    async fn get_info(&self) -> Result<DeviceInfo> {
        Ok(DeviceInfo::new(self.name.clone(), "Mock Annunciator v1.0"))
    }
}
