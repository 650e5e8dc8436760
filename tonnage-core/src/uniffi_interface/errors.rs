use thiserror::Error as ThisError;
use uniffi::Error;

use crate::volume::VolumeError;

#[derive(Debug, ThisError, Error)]
#[non_exhaustive]
pub enum TonnageError {
    #[error("invalid weight: {reason}")]
    InvalidWeight { reason: String },
    #[error("invalid reps: {reason}")]
    InvalidReps { reason: String },
    #[error("invalid volume: {reason}")]
    InvalidVolume { reason: String },
    #[error("error: {reason}")]
    Common { reason: String },
}

impl From<VolumeError> for TonnageError {
    fn from(e: VolumeError) -> Self {
        match e {
            VolumeError::InvalidWeight(reason) => TonnageError::InvalidWeight { reason },
            VolumeError::InvalidReps(reason) => TonnageError::InvalidReps { reason },
            VolumeError::InvalidVolume(reason) => TonnageError::InvalidVolume { reason },
        }
    }
}

impl From<anyhow::Error> for TonnageError {
    fn from(e: anyhow::Error) -> Self {
        TonnageError::Common {
            reason: format!("{:#}", e),
        }
    }
}

impl TonnageError {
    pub fn with_display<D: std::fmt::Display>(d: D) -> Self {
        TonnageError::Common {
            reason: d.to_string(),
        }
    }
}
