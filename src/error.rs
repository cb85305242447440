use thiserror::Error;

#[derive(Error, Debug)]
pub enum WhackError {
    #[error("slot count must be between {min} and {max}, got {got}")]
    InvalidSlots { got: usize, min: usize, max: usize },
    #[error("a round must last at least one second")]
    ZeroRoundLength,
    #[error("could not parse config file")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
