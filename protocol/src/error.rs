use thiserror::Error;
use tileslide_core::GameError;

#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("Malformed message: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Unknown message type: {0}")]
    UnknownMessage(String),
    #[error("Unknown tile: {0}")]
    UnknownTile(String),
    #[error("Invalid level: {0}")]
    Level(#[from] GameError),
}

pub type Result<T> = std::result::Result<T, ProtocolError>;
