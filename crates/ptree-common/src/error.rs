//! Error types for ptree.

use thiserror::Error;

/// Result type alias for ptree operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Failure reported by the kernel ptree facility.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FacilityError {
    /// The facility rejected the request shape (null buffer, bad capacity).
    #[error("invalid argument (EINVAL): the kernel rejected the buffer or its capacity")]
    InvalidArgument,

    /// The facility could not read or write the buffer.
    #[error("bad address (EFAULT): the kernel could not access the output buffer")]
    BadAddress,

    /// Any other errno.
    #[error("syscall failed: {}", os_message(.errno))]
    Os { errno: i32 },

    /// The facility claimed to write more entries than it was given room for.
    #[error("facility reported {count} entries for a buffer of {capacity}")]
    CountOutOfRange { count: i64, capacity: usize },
}

impl FacilityError {
    /// Classify an errno left behind by a failed call.
    pub fn from_errno(errno: i32) -> Self {
        match errno {
            libc::EINVAL => FacilityError::InvalidArgument,
            libc::EFAULT => FacilityError::BadAddress,
            errno => FacilityError::Os { errno },
        }
    }
}

fn os_message(errno: &i32) -> std::io::Error {
    std::io::Error::from_raw_os_error(*errno)
}

/// Unified error type for ptree.
#[derive(Error, Debug)]
pub enum Error {
    // Usage errors (10-19)
    #[error("{0}")]
    Usage(String),

    // Allocation errors (20-29)
    #[error("cannot allocate a buffer for {capacity} entries")]
    Allocation { capacity: usize },

    // Facility errors (30-39)
    #[error(transparent)]
    Facility(#[from] FacilityError),

    // Output errors (40-49)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns the error code for this error type.
    /// Used for detailed error reporting in JSON output.
    pub fn code(&self) -> u32 {
        match self {
            Error::Usage(_) => 10,
            Error::Allocation { .. } => 20,
            Error::Facility(FacilityError::InvalidArgument) => 30,
            Error::Facility(FacilityError::BadAddress) => 31,
            Error::Facility(FacilityError::Os { .. }) => 32,
            Error::Facility(FacilityError::CountOutOfRange { .. }) => 33,
            Error::Io(_) => 40,
            Error::Json(_) => 41,
        }
    }

    /// Whether this failure is reported on stdout next to the listing.
    ///
    /// Facility failures go to stdout; everything else is a local problem and
    /// goes to stderr.
    pub fn reported_on_stdout(&self) -> bool {
        matches!(self, Error::Facility(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errno_classification() {
        assert_eq!(
            FacilityError::from_errno(libc::EINVAL),
            FacilityError::InvalidArgument
        );
        assert_eq!(
            FacilityError::from_errno(libc::EFAULT),
            FacilityError::BadAddress
        );
        assert_eq!(
            FacilityError::from_errno(libc::ENOSYS),
            FacilityError::Os {
                errno: libc::ENOSYS
            }
        );
    }

    #[test]
    fn test_messages_distinguish_reasons() {
        let einval = FacilityError::InvalidArgument.to_string();
        let efault = FacilityError::BadAddress.to_string();
        assert!(einval.contains("invalid argument"));
        assert!(efault.contains("bad address"));
        assert_ne!(einval, efault);

        let other = FacilityError::Os {
            errno: libc::EPERM,
        }
        .to_string();
        assert!(other.starts_with("syscall failed: "));
        assert!(other.contains(&format!("os error {}", libc::EPERM)));
    }

    #[test]
    fn test_codes_are_distinct_per_reason() {
        let codes = [
            Error::Usage("x".into()).code(),
            Error::Allocation { capacity: 1 }.code(),
            Error::from(FacilityError::InvalidArgument).code(),
            Error::from(FacilityError::BadAddress).code(),
            Error::from(FacilityError::Os { errno: 1 }).code(),
            Error::from(std::io::Error::other("x")).code(),
        ];
        let mut unique = codes.to_vec();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), codes.len());
    }

    #[test]
    fn test_stream_selection() {
        assert!(Error::from(FacilityError::BadAddress).reported_on_stdout());
        assert!(!Error::Allocation { capacity: 3 }.reported_on_stdout());
        assert!(!Error::Usage("bad".into()).reported_on_stdout());
    }
}
