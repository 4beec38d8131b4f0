//! ptree client library.
//!
//! Validates the requested capacity, allocates the entry buffer, calls the
//! kernel ptree facility once and renders the flattened tree it returns.
//! The facility sits behind [`facility::PtreeFacility`] so the whole flow
//! can run against [`facility::StaticFacility`] in tests.

pub mod app;
pub mod args;
pub mod buffer;
pub mod cli;
pub mod exit_codes;
pub mod facility;
pub mod logging;
pub mod render;

pub use app::{list, parse_args, run};
pub use args::{parse_capacity, Capacity, UsageError, MAX_CAPACITY};
pub use buffer::EntryBuffer;
pub use cli::Cli;
pub use exit_codes::ExitCode;
pub use facility::{PtreeFacility, StaticFacility, SyscallFacility, DEFAULT_SYSCALL_NR};
