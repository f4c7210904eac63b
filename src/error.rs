//! Configuration errors
//!
//! The simulation itself cannot fail; everything here is raised while loading
//! settings or building a scene.

use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum PongError {
    /// Settings file could not be read
    Io(std::io::Error),
    /// Settings JSON was malformed
    Parse(serde_json::Error),
    /// A settings value is out of range
    InvalidSettings(String),
    /// A game screen was built with the wrong set of objects
    InvalidScene(String),
}

impl Display for PongError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PongError::Io(e) => write!(f, "failed to read settings: {e}"),
            PongError::Parse(e) => write!(f, "failed to parse settings: {e}"),
            PongError::InvalidSettings(msg) => write!(f, "invalid settings: {msg}"),
            PongError::InvalidScene(msg) => write!(f, "invalid scene: {msg}"),
        }
    }
}

impl std::error::Error for PongError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PongError::Io(e) => Some(e),
            PongError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PongError {
    fn from(e: std::io::Error) -> Self {
        PongError::Io(e)
    }
}

impl From<serde_json::Error> for PongError {
    fn from(e: serde_json::Error) -> Self {
        PongError::Parse(e)
    }
}
