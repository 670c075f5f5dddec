//! Status codes and errors of the banded routines.

use std::fmt;
use thiserror::Error;

/// Status reported by a device library call (subset shared by cuBLAS and hipBLAS).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[repr(u32)]
pub enum Status {
    Success = 0,
    NotInitialized = 1,
    AllocFailed = 3,
    InvalidValue = 7,
    ArchMismatch = 8,
    MappingError = 11,
    ExecutionFailed = 13,
    InternalError = 14,
    NotSupported = 15,
}

impl Status {
    /// Maps a raw library code, unknown codes become [`Status::InternalError`].
    pub fn from_raw(code: u32) -> Self {
        match code {
            0 => Self::Success,
            1 => Self::NotInitialized,
            3 => Self::AllocFailed,
            7 => Self::InvalidValue,
            8 => Self::ArchMismatch,
            11 => Self::MappingError,
            13 => Self::ExecutionFailed,
            15 => Self::NotSupported,
            _ => Self::InternalError,
        }
    }

    #[inline]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Self::Success => "success",
            Self::NotInitialized => "not initialized",
            Self::AllocFailed => "allocation failed",
            Self::InvalidValue => "invalid value",
            Self::ArchMismatch => "architecture mismatch",
            Self::MappingError => "mapping error",
            Self::ExecutionFailed => "execution failed",
            Self::InternalError => "internal error",
            Self::NotSupported => "not supported",
        };
        write!(f, "{name} ({})", *self as u32)
    }
}

#[derive(Clone, PartialEq, Eq, Debug, Error)]
pub enum BlasError {
    /// Rejected from the configuration before anything was allocated.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    #[error("device {op} failed: {status}")]
    Device { op: &'static str, status: Status },
}

impl BlasError {
    #[inline]
    pub const fn device(op: &'static str, status: Status) -> Self {
        Self::Device { op, status }
    }

    /// The status code handed to the orchestration layer.
    pub const fn status(&self) -> Status {
        match self {
            Self::InvalidArgument(_) => Status::InvalidValue,
            Self::Device { status, .. } => *status,
        }
    }
}

/// Turns a raw status into a result, tagging failures with the operation name.
#[inline]
pub fn check(status: Status, op: &'static str) -> Result<(), BlasError> {
    if status.is_success() {
        Ok(())
    } else {
        Err(BlasError::device(op, status))
    }
}

#[test]
fn test_status() {
    assert_eq!(Status::from_raw(7), Status::InvalidValue);
    assert_eq!(Status::from_raw(1234), Status::InternalError);
    assert_eq!(check(Status::Success, "hbmv"), Ok(()));
    let err = check(Status::ExecutionFailed, "hbmv").unwrap_err();
    assert_eq!(err.status(), Status::ExecutionFailed);
    assert_eq!(err.to_string(), "device hbmv failed: execution failed (13)");
    assert_eq!(
        BlasError::InvalidArgument("n < 0").status(),
        Status::InvalidValue
    );
}
