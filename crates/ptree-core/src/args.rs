//! Capacity argument validation.
//!
//! The capacity is the number of `ProcessInfo` slots the client offers the
//! facility. It must be a plain run of ASCII digits (no sign, no whitespace,
//! no radix prefix), non-zero, and small enough for the kernel's `int` count.

use ptree_common::Error;
use std::fmt;
use std::num::NonZeroUsize;
use thiserror::Error;

/// Largest capacity the facility accepts (its count argument is a C `int`).
pub const MAX_CAPACITY: usize = i32::MAX as usize;

/// Rejected capacity argument.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsageError {
    #[error("capacity must not be empty")]
    Empty,

    #[error("capacity must be a decimal number, got {0:?}")]
    NotDecimal(String),

    #[error("capacity must be at least 1")]
    Zero,

    #[error("capacity {0} exceeds the maximum of {max}", max = MAX_CAPACITY)]
    TooLarge(String),
}

impl From<UsageError> for Error {
    fn from(e: UsageError) -> Self {
        Error::Usage(e.to_string())
    }
}

/// A validated buffer capacity: `1..=MAX_CAPACITY` entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Capacity(NonZeroUsize);

impl Capacity {
    /// Wrap an already-checked value. Returns `None` outside `1..=MAX_CAPACITY`.
    pub fn new(entries: usize) -> Option<Self> {
        if entries > MAX_CAPACITY {
            return None;
        }
        NonZeroUsize::new(entries).map(Capacity)
    }

    pub fn get(self) -> usize {
        self.0.get()
    }
}

impl fmt::Display for Capacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validate the single positional argument.
pub fn parse_capacity(raw: &str) -> Result<Capacity, UsageError> {
    if raw.is_empty() {
        return Err(UsageError::Empty);
    }
    if !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(UsageError::NotDecimal(raw.to_string()));
    }

    // Digits only, so the only parse failure left is overflow.
    let value: usize = raw
        .parse()
        .map_err(|_| UsageError::TooLarge(raw.to_string()))?;
    if value == 0 {
        return Err(UsageError::Zero);
    }
    Capacity::new(value).ok_or_else(|| UsageError::TooLarge(raw.to_string()))
}
