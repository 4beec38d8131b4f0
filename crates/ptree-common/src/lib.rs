//! ptree common types and errors.
//!
//! This crate provides the pieces shared between the facility boundary and
//! the CLI:
//! - The `struct pinfo` wire record and its bounded `comm` field
//! - Facility and client error types
//! - Output format selection and JSON schema versioning

pub mod error;
pub mod output;
pub mod pinfo;
pub mod schema;

pub use error::{Error, FacilityError, Result};
pub use output::OutputFormat;
pub use pinfo::{Comm, ProcessInfo, COMM_LEN, COMM_MAX_NAME};
pub use schema::SCHEMA_VERSION;
