use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    // Credential errors
    #[error("Invalid card format: {0}")]
    InvalidCardFormat(String),

    #[error("Invalid password: {0}")]
    InvalidPassword(String),

    #[error("Invalid keypad symbol: {0}")]
    InvalidKey(String),

    // Actuator errors
    #[error("Invalid lock angle {angle}, maximum is {max}")]
    InvalidAngle { angle: u8, max: u8 },

    // Control flow errors
    #[error("Invalid state transition from {from} to {to}")]
    InvalidStateTransition { from: String, to: String },

    // Display errors
    #[error("Invalid display line {line}, maximum is {max}")]
    InvalidLine { line: usize, max: usize },

    // Persistence errors
    #[error("Storage error: {0}")]
    Storage(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
