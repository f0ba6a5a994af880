//! Terminal-backed device implementations for the interactive emulator.
//!
//! These are the "real" peripherals of the emulator workspace: the
//! annunciator renders the 2x16 character display as a framed box on stdout
//! and rings the terminal bell for beeps; the lock prints each commanded
//! servo angle.

use crate::{
    Result, display::TextPanel, traits::AnnunciatorDevice, traits::LockDevice, types::DeviceInfo,
};
use deadbolt_core::LockPosition;

/// Annunciator backend that renders to the terminal.
///
/// Every `show` repaints the full display frame so the terminal always
/// reflects the current panel content:
///
/// ```text
/// +----------------+
/// |Enter Password  |
/// |****            |
/// +----------------+
/// ```
#[derive(Debug)]
pub struct ConsoleAnnunciator {
    panel: TextPanel,
}

impl ConsoleAnnunciator {
    /// Create a console annunciator with a blank panel.
    pub fn new() -> Self {
        Self {
            panel: TextPanel::default(),
        }
    }

    fn render(&self) {
        let border = format!("+{}+", "-".repeat(self.panel.column_count()));
        println!("{border}");
        for row in self.panel.rows() {
            println!("|{row}|");
        }
        println!("{border}");
    }
}

impl Default for ConsoleAnnunciator {
    fn default() -> Self {
        Self::new()
    }
}

impl AnnunciatorDevice for ConsoleAnnunciator {
    async fn beep(&mut self) -> Result<()> {
        // \u{0007} is the terminal bell
        println!("(beep)\u{0007}");
        Ok(())
    }

    async fn show(&mut self, line: usize, text: &str) -> Result<()> {
        self.panel
            .set_line(line, text)
            .map_err(|e| crate::HardwareError::invalid_data(e.to_string()))?;
        self.render();
        Ok(())
    }

    async fn get_info(&self) -> Result<DeviceInfo> {
        Ok(DeviceInfo::new("Console Annunciator", "Terminal 2x16"))
    }
}

/// Lock actuator backend that prints each commanded angle.
#[derive(Debug, Default)]
pub struct ConsoleLock {
    position: Option<LockPosition>,
}

impl ConsoleLock {
    /// Create a console lock in the uncommanded state.
    pub fn new() -> Self {
        Self::default()
    }

    /// The last commanded position, if any.
    pub fn position(&self) -> Option<LockPosition> {
        self.position
    }
}

impl LockDevice for ConsoleLock {
    async fn set_position(&mut self, position: LockPosition) -> Result<()> {
        if self.position != Some(position) {
            println!("[lock] servo -> {position}");
        }
        self.position = Some(position);
        Ok(())
    }

    async fn get_info(&self) -> Result<DeviceInfo> {
        Ok(DeviceInfo::new("Console Lock", "Terminal Servo"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_console_annunciator_show_updates_panel() {
        let mut annunciator = ConsoleAnnunciator::new();

        annunciator.show(0, "Card OK").await.unwrap();
        assert_eq!(annunciator.panel.get_line(0).unwrap().trim_end(), "Card OK");
    }

    #[tokio::test]
    async fn test_console_annunciator_rejects_bad_line() {
        let mut annunciator = ConsoleAnnunciator::new();

        assert!(annunciator.show(7, "text").await.is_err());
    }

    #[tokio::test]
    async fn test_console_lock_tracks_position() {
        let mut lock = ConsoleLock::new();
        assert_eq!(lock.position(), None);

        lock.set_position(LockPosition::FULL_OPEN).await.unwrap();
        assert_eq!(lock.position(), Some(LockPosition::FULL_OPEN));

        // Idempotent re-command is fine
        lock.set_position(LockPosition::FULL_OPEN).await.unwrap();
        assert_eq!(lock.position(), Some(LockPosition::FULL_OPEN));
    }
}
