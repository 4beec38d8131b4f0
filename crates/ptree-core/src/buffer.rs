//! Output buffer handed to the facility.

use crate::args::Capacity;
use ptree_common::{Error, FacilityError, ProcessInfo, Result};
use tracing::debug;

/// Zero-initialised storage for exactly `capacity` records.
///
/// The buffer is the single owner of the records. The facility only borrows
/// it through [`EntryBuffer::as_mut_slice`] for the duration of one call.
#[derive(Debug)]
pub struct EntryBuffer {
    entries: Vec<ProcessInfo>,
}

impl EntryBuffer {
    /// Allocate room for `capacity` records, failing instead of aborting when
    /// the allocator refuses.
    ///
    /// Only a refused reservation is caught. The records are zeroed eagerly,
    /// so under overcommit a reservation the kernel grants but cannot back
    /// (roughly `capacity * 96` bytes near the size of RAM) ends in the OOM
    /// killer rather than [`Error::Allocation`].
    pub fn allocate(capacity: Capacity) -> Result<Self> {
        let n = capacity.get();
        let mut entries = Vec::new();
        entries
            .try_reserve_exact(n)
            .map_err(|_| Error::Allocation { capacity: n })?;
        entries.resize(n, ProcessInfo::zeroed());
        debug!(
            capacity = n,
            bytes = n * std::mem::size_of::<ProcessInfo>(),
            "allocated entry buffer"
        );
        Ok(EntryBuffer { entries })
    }

    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    /// Writable view passed to the facility.
    pub fn as_mut_slice(&mut self) -> &mut [ProcessInfo] {
        &mut self.entries
    }

    /// The first `count` records, as reported by the facility.
    pub fn filled(&self, count: usize) -> Result<&[ProcessInfo]> {
        self.entries.get(..count).ok_or_else(|| {
            Error::Facility(FacilityError::CountOutOfRange {
                count: i64::try_from(count).unwrap_or(i64::MAX),
                capacity: self.capacity(),
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capacity(n: usize) -> Capacity {
        Capacity::new(n).unwrap()
    }

    #[test]
    fn test_allocates_exact_capacity() {
        let buffer = EntryBuffer::allocate(capacity(5)).unwrap();
        assert_eq!(buffer.capacity(), 5);
        assert!(buffer.filled(5).unwrap().iter().all(|e| *e == ProcessInfo::zeroed()));
    }

    #[test]
    fn test_filled_returns_prefix() {
        let mut buffer = EntryBuffer::allocate(capacity(4)).unwrap();
        buffer.as_mut_slice()[0] = ProcessInfo::new(1, "init", 1, 0, 0);
        buffer.as_mut_slice()[1] = ProcessInfo::new(2, "kthreadd", 1, 0, 1);

        let filled = buffer.filled(2).unwrap();
        assert_eq!(filled.len(), 2);
        assert_eq!(filled[1].comm.to_string(), "kthreadd");
        assert!(buffer.filled(0).unwrap().is_empty());
    }

    #[test]
    fn test_filled_rejects_overrun() {
        let buffer = EntryBuffer::allocate(capacity(2)).unwrap();
        let err = buffer.filled(3).unwrap_err();
        assert!(matches!(
            err,
            Error::Facility(FacilityError::CountOutOfRange {
                count: 3,
                capacity: 2
            })
        ));
    }
}
