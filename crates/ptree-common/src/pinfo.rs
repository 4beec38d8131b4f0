//! Wire record exchanged with the kernel ptree facility.
//!
//! `ProcessInfo` is laid out exactly like the kernel's `struct pinfo`:
//!
//! ```text
//! struct pinfo {
//!     int64_t state;
//!     pid_t pid;
//!     int64_t uid;
//!     char comm[64];
//!     unsigned int depth;
//! };
//! ```
//!
//! The facility writes these records straight into a buffer owned by the
//! client, so the field order, widths and padding must not change.

use serde::{Serialize, Serializer};
use std::borrow::Cow;
use std::fmt;

/// Size of the `comm` field in bytes, terminator included.
pub const COMM_LEN: usize = 64;

/// Longest name that fits in a `Comm` while keeping its NUL terminator.
pub const COMM_MAX_NAME: usize = COMM_LEN - 1;

/// Fixed-size, NUL-terminated executable name.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Comm([u8; COMM_LEN]);

impl Comm {
    /// An empty name (all zero bytes).
    pub const fn empty() -> Self {
        Comm([0; COMM_LEN])
    }

    /// Build a name, truncating to [`COMM_MAX_NAME`] bytes.
    ///
    /// Truncation is byte-wise, matching what the kernel does with
    /// `task->comm`; a multi-byte character cut in half renders as U+FFFD.
    pub fn new(name: &str) -> Self {
        Self::from_bytes(name.as_bytes())
    }

    /// Build a name from raw bytes, stopping at the first NUL and truncating
    /// to [`COMM_MAX_NAME`] bytes.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let len = bytes
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(bytes.len())
            .min(COMM_MAX_NAME);
        let mut raw = [0u8; COMM_LEN];
        raw[..len].copy_from_slice(&bytes[..len]);
        Comm(raw)
    }

    /// Bytes of the name, without the terminator.
    ///
    /// A facility that forgot the terminator still yields at most
    /// [`COMM_MAX_NAME`] bytes.
    pub fn as_bytes(&self) -> &[u8] {
        let len = self
            .0
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(COMM_LEN)
            .min(COMM_MAX_NAME);
        &self.0[..len]
    }

    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.as_bytes())
    }

    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }
}

impl Default for Comm {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Display for Comm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_lossy())
    }
}

impl fmt::Debug for Comm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Comm({:?})", self.to_string_lossy())
    }
}

impl Serialize for Comm {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string_lossy())
    }
}

/// One process in the flattened tree returned by the facility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[repr(C)]
pub struct ProcessInfo {
    /// Run state as reported by the kernel (opaque to the client).
    pub state: i64,
    /// Process ID (`pid_t`).
    pub pid: i32,
    /// Owning user ID.
    pub uid: i64,
    /// Executable name.
    pub comm: Comm,
    /// Nesting depth, 0 for the root of the reported subtree.
    pub depth: u32,
}

impl ProcessInfo {
    /// All-zero record, used to initialise buffers before the call.
    pub const fn zeroed() -> Self {
        ProcessInfo {
            state: 0,
            pid: 0,
            uid: 0,
            comm: Comm::empty(),
            depth: 0,
        }
    }

    pub fn new(pid: i32, comm: &str, state: i64, uid: i64, depth: u32) -> Self {
        ProcessInfo {
            state,
            pid,
            uid,
            comm: Comm::new(comm),
            depth,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::{align_of, offset_of, size_of};

    #[test]
    fn test_layout_matches_kernel_struct() {
        assert_eq!(offset_of!(ProcessInfo, state), 0);
        assert_eq!(offset_of!(ProcessInfo, pid), 8);
        assert_eq!(offset_of!(ProcessInfo, uid), 16);
        assert_eq!(offset_of!(ProcessInfo, comm), 24);
        assert_eq!(offset_of!(ProcessInfo, depth), 88);
        assert_eq!(size_of::<ProcessInfo>(), 96);
        assert_eq!(align_of::<ProcessInfo>(), 8);
        assert_eq!(size_of::<Comm>(), COMM_LEN);
    }

    #[test]
    fn test_comm_truncates_long_names() {
        let long = "x".repeat(100);
        let comm = Comm::new(&long);
        assert_eq!(comm.as_bytes().len(), COMM_MAX_NAME);
        assert_eq!(comm.0[COMM_MAX_NAME], 0, "terminator must survive");
    }

    #[test]
    fn test_comm_exact_fit() {
        let name = "a".repeat(COMM_MAX_NAME);
        assert_eq!(Comm::new(&name).to_string_lossy(), name);
    }

    #[test]
    fn test_comm_stops_at_nul() {
        let comm = Comm::from_bytes(b"bash\0garbage");
        assert_eq!(comm.as_bytes(), b"bash");
        assert!(comm.0[4..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_comm_unterminated_field_is_bounded() {
        // Simulates a facility that filled all 64 bytes without a NUL.
        let comm = Comm([b'z'; COMM_LEN]);
        assert_eq!(comm.as_bytes().len(), COMM_MAX_NAME);
    }

    #[test]
    fn test_comm_lossy_display() {
        let comm = Comm::from_bytes(&[b'a', 0xff, b'b']);
        assert_eq!(comm.to_string(), "a\u{fffd}b");
    }

    #[test]
    fn test_empty_comm() {
        assert!(Comm::empty().is_empty());
        assert!(ProcessInfo::zeroed().comm.is_empty());
        assert_eq!(ProcessInfo::default(), ProcessInfo::zeroed());
    }

    #[test]
    fn test_serialize_comm_as_string() {
        let info = ProcessInfo::new(1, "systemd", 1, 0, 0);
        let json = serde_json::to_value(info).unwrap();
        assert_eq!(json["comm"], "systemd");
        assert_eq!(json["pid"], 1);
        assert_eq!(json["depth"], 0);
    }
}
