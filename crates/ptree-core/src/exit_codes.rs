//! Exit codes for the ptree CLI.
//!
//! Every failure, whether a usage error, an allocation failure or a facility
//! error, exits with 1; the diagnostic tells them apart.

use ptree_common::Error;

/// Exit codes for ptree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Listing printed
    Clean = 0,

    /// Usage, allocation, facility or output error
    Failure = 1,
}

impl ExitCode {
    /// Convert to i32 for process exit.
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

impl From<&Error> for ExitCode {
    fn from(_: &Error) -> Self {
        ExitCode::Failure
    }
}
