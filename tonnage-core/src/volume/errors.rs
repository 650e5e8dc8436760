use thiserror::Error;

/// Failures raised by the volume engine. Every variant carries the reason
/// the input was rejected.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum VolumeError {
    #[error("invalid weight: {0}")]
    InvalidWeight(String),

    #[error("invalid reps: {0}")]
    InvalidReps(String),

    #[error("invalid volume: {0}")]
    InvalidVolume(String),
}

impl VolumeError {
    /// Stable machine-readable code, used when mapping to client-facing errors.
    pub fn kind(&self) -> &'static str {
        match self {
            VolumeError::InvalidWeight(_) => "invalid_weight",
            VolumeError::InvalidReps(_) => "invalid_reps",
            VolumeError::InvalidVolume(_) => "invalid_volume",
        }
    }
}

pub type VolumeResult<T> = Result<T, VolumeError>;
