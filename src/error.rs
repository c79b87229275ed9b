use crate::constants::Float;
use thiserror::Error;

pub type LbResult<T> = Result<T, LbError>;

#[derive(Debug, Error)]
pub enum LbError {
    #[error("invalid domain {width}x{height}: {reason}")]
    InvalidDomain {
        width: usize,
        height: usize,
        reason: String,
    },

    #[error("invalid relaxation time {0}: must be finite and positive")]
    InvalidRelaxationTime(Float),

    #[error("invalid reference density {0}: must be finite and positive")]
    InvalidReferenceDensity(Float),

    #[error("invalid lattice direction {0}: D2Q9 directions are 0..9")]
    InvalidDirection(usize),

    #[error("invalid initial condition: {0}")]
    InvalidInitialCondition(String),

    #[error("instability detected at cell ({x}, {y}): density = {density}")]
    InstabilityDetected { x: usize, y: usize, density: Float },

    #[error("malformed checkpoint: {0}")]
    Checkpoint(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LbError {
    pub(crate) fn invalid_domain(width: usize, height: usize, reason: impl Into<String>) -> Self {
        LbError::InvalidDomain {
            width,
            height,
            reason: reason.into(),
        }
    }
}
