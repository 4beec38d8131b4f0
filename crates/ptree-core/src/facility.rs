//! The kernel ptree facility and its stand-ins.
//!
//! Everything the client needs from the kernel goes through one call:
//! "fill this buffer with up to `buf.len()` records and tell me how many you
//! wrote". [`PtreeFacility`] is that call; [`SyscallFacility`] issues it as a
//! raw system call and [`StaticFacility`] serves a scripted answer for tests.

use ptree_common::{FacilityError, ProcessInfo};
use std::cell::Cell;
use std::io;
use tracing::{debug, trace};

/// System call number of `ptree` in the patched kernel.
pub const DEFAULT_SYSCALL_NR: i64 = 294;

/// Source of the flattened process tree.
pub trait PtreeFacility {
    /// Fill a prefix of `buf` and return its length.
    ///
    /// Implementations must never report more entries than `buf.len()`.
    fn fetch(&self, buf: &mut [ProcessInfo]) -> Result<usize, FacilityError>;
}

impl<T: PtreeFacility + ?Sized> PtreeFacility for &T {
    fn fetch(&self, buf: &mut [ProcessInfo]) -> Result<usize, FacilityError> {
        (**self).fetch(buf)
    }
}

/// Calls the facility through `syscall(2)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyscallFacility {
    nr: i64,
}

impl SyscallFacility {
    pub fn new(nr: i64) -> Self {
        SyscallFacility { nr }
    }
}

impl Default for SyscallFacility {
    fn default() -> Self {
        Self::new(DEFAULT_SYSCALL_NR)
    }
}

impl PtreeFacility for SyscallFacility {
    fn fetch(&self, buf: &mut [ProcessInfo]) -> Result<usize, FacilityError> {
        let capacity = buf.len();
        let nr = libc::c_long::try_from(self.nr).map_err(|_| FacilityError::Os {
            errno: libc::ENOSYS,
        })?;
        let count = libc::c_int::try_from(capacity).map_err(|_| FacilityError::InvalidArgument)?;

        debug!(nr = self.nr, capacity, "invoking ptree syscall");
        // SAFETY: `buf` is a live, exclusively borrowed slice of `capacity`
        // repr(C) records for the whole call, and the facility writes at most
        // `count` of them.
        let ret = unsafe { libc::syscall(nr, buf.as_mut_ptr(), libc::c_long::from(count)) };

        if ret < 0 {
            let errno = io::Error::last_os_error().raw_os_error().unwrap_or(0);
            trace!(ret, errno, "ptree syscall failed");
            return Err(FacilityError::from_errno(errno));
        }

        let written = i64::from(ret);
        match usize::try_from(written) {
            Ok(n) if n <= capacity => Ok(n),
            _ => Err(FacilityError::CountOutOfRange {
                count: written,
                capacity,
            }),
        }
    }
}

/// Scripted facility: returns a fixed listing or a fixed error and records
/// how it was called.
#[derive(Debug)]
pub struct StaticFacility {
    outcome: Result<Vec<ProcessInfo>, FacilityError>,
    reported: Option<usize>,
    calls: Cell<usize>,
    last_capacity: Cell<Option<usize>>,
}

impl StaticFacility {
    /// Serve `entries`, truncated to whatever capacity the caller offers.
    pub fn with_entries(entries: Vec<ProcessInfo>) -> Self {
        StaticFacility {
            outcome: Ok(entries),
            reported: None,
            calls: Cell::new(0),
            last_capacity: Cell::new(None),
        }
    }

    /// Fail every call with `error`.
    pub fn failing(error: FacilityError) -> Self {
        StaticFacility {
            outcome: Err(error),
            reported: None,
            calls: Cell::new(0),
            last_capacity: Cell::new(None),
        }
    }

    /// Claim `count` entries were written regardless of what was copied,
    /// like a facility that over-reports.
    pub fn reporting(mut self, count: usize) -> Self {
        self.reported = Some(count);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    pub fn last_capacity(&self) -> Option<usize> {
        self.last_capacity.get()
    }
}

impl PtreeFacility for StaticFacility {
    fn fetch(&self, buf: &mut [ProcessInfo]) -> Result<usize, FacilityError> {
        self.calls.set(self.calls.get() + 1);
        self.last_capacity.set(Some(buf.len()));

        let entries = self.outcome.as_ref().map_err(|e| e.clone())?;
        let n = entries.len().min(buf.len());
        buf[..n].copy_from_slice(&entries[..n]);
        Ok(self.reported.unwrap_or(n))
    }
}
