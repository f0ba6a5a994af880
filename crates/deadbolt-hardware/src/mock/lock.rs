//! Mock lock actuator for testing.
//!
//! Records every commanded position so tests can assert on the exact
//! sequence of lock movements.

use crate::{Result, traits::LockDevice, types::DeviceInfo};
use deadbolt_core::LockPosition;

/// Mock lock actuator for testing and development.
///
/// # Examples
///
/// ```
/// use deadbolt_hardware::mock::MockLock;
/// use deadbolt_hardware::traits::LockDevice;
/// use deadbolt_core::LockPosition;
///
/// #[tokio::main]
/// async fn main() -> deadbolt_hardware::Result<()> {
///     let mut lock = MockLock::new();
///
///     lock.set_position(LockPosition::PARTIAL_OPEN).await?;
///
///     assert_eq!(lock.position(), Some(LockPosition::PARTIAL_OPEN));
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct MockLock {
    /// Device name
    name: String,

    /// Every position commanded, in order
    commands: Vec<LockPosition>,
}

impl MockLock {
    /// Create a new mock lock with the default name.
    pub fn new() -> Self {
        Self::with_name("Mock Lock".to_string())
    }

    /// Create a new mock lock with a custom name.
    pub fn with_name(name: String) -> Self {
        Self {
            name,
            commands: Vec::new(),
        }
    }

    /// The last commanded position, if any.
    pub fn position(&self) -> Option<LockPosition> {
        self.commands.last().copied()
    }

    /// Every position commanded so far, oldest first.
    pub fn commands(&self) -> &[LockPosition] {
        &self.commands
    }
}

impl Default for MockLock {
    fn default() -> Self {
        Self::new()
    }
}

impl LockDevice for MockLock {
    async fn set_position(&mut self, position: LockPosition) -> Result<()> {
        self.commands.push(position);
        Ok(())
    }

    async fn get_info(&self) -> Result<DeviceInfo> {
        Ok(DeviceInfo::new(self.name.clone(), "Mock Servo Lock v1.0"))
    }
}
