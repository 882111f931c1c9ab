use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PickerError {
    #[error("Unknown band role: {0:?}")]
    UnknownRole(String),

    #[error("Unknown text alignment: {0:?}")]
    InvalidAlignment(String),

    #[error("No band with id {0:?}")]
    UnknownBand(String),
}

// Create a type alias for convenience
pub type Result<T> = std::result::Result<T, PickerError>;
