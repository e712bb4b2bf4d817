use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Invalid share token: {0}")]
    InvalidShareToken(String),

    #[error("Invalid dataset shape for {series}: {details}")]
    InvalidDatasetShape { series: String, details: String },

    #[error("Invalid month index {0}: must be between 0 and 11")]
    InvalidMonthIndex(usize),

    #[error("Dataset is opened from a shared link and cannot be edited")]
    ReadOnlySharedView,

    #[error("Base64 decoding error: {0}")]
    Base64Error(#[from] base64::DecodeError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DashboardError>;
