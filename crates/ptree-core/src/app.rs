//! Top-level flow: validate, allocate, call the facility once, print.

use crate::args::{parse_capacity, Capacity};
use crate::buffer::EntryBuffer;
use crate::cli::Cli;
use crate::exit_codes::ExitCode;
use crate::facility::PtreeFacility;
use crate::render::{first_depth_anomaly, write_listing};
use clap::Parser;
use ptree_common::{Error, OutputFormat, Result, SCHEMA_VERSION};
use serde_json::json;
use std::ffi::OsString;
use std::io::Write;
use tracing::{info, warn};

/// Usage line printed after argument errors.
pub const USAGE: &str = "usage: ptree [OPTIONS] <CAPACITY>";

/// Parse the command line.
///
/// Help and version output go to `out` with [`ExitCode::Clean`]; every other
/// parse failure (missing or extra arguments, bad options) goes to `err` with
/// [`ExitCode::Failure`].
pub fn parse_args<I, T, W, E>(args: I, out: &mut W, err: &mut E) -> std::result::Result<Cli, ExitCode>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
    W: Write,
    E: Write,
{
    Cli::try_parse_from(args).map_err(|e| {
        let rendered = e.render();
        if e.use_stderr() {
            let _ = write!(err, "{rendered}");
            ExitCode::Failure
        } else {
            let _ = write!(out, "{rendered}");
            ExitCode::Clean
        }
    })
}

/// Run one listing against `facility` and report the outcome.
///
/// The capacity is validated before anything is allocated; the facility is
/// called at most once.
pub fn run<F, W, E>(cli: &Cli, facility: &F, out: &mut W, err: &mut E) -> ExitCode
where
    F: PtreeFacility + ?Sized,
    W: Write,
    E: Write,
{
    let capacity = match parse_capacity(&cli.capacity) {
        Ok(capacity) => capacity,
        Err(e) => {
            let e = Error::from(e);
            report_error(&e, cli.format, out, err);
            return ExitCode::from(&e);
        }
    };

    match list(capacity, facility, cli.format, out) {
        Ok(count) => {
            info!(count, capacity = capacity.get(), "ptree listing complete");
            ExitCode::Clean
        }
        Err(e) => {
            report_error(&e, cli.format, out, err);
            ExitCode::from(&e)
        }
    }
}

/// Allocate, fetch and print. Returns the number of entries printed.
///
/// The buffer is dropped before this returns, on success and on every error
/// path.
pub fn list<F, W>(
    capacity: Capacity,
    facility: &F,
    format: OutputFormat,
    out: &mut W,
) -> Result<usize>
where
    F: PtreeFacility + ?Sized,
    W: Write,
{
    let mut buffer = EntryBuffer::allocate(capacity)?;
    let count = facility.fetch(buffer.as_mut_slice())?;
    let entries = buffer.filled(count)?;

    if let Some(index) = first_depth_anomaly(entries) {
        warn!(
            index,
            depth = entries[index].depth,
            "facility listing is not in pre-order"
        );
    }

    write_listing(out, format, entries, buffer.capacity())?;
    Ok(count)
}

/// Print a diagnostic for `e` on the stream it belongs to.
///
/// Usage errors are followed by the usage line.
pub fn report_error<W: Write, E: Write>(e: &Error, format: OutputFormat, out: &mut W, err: &mut E) {
    if !e.reported_on_stdout() {
        let _ = writeln!(err, "ptree: {e}");
        if matches!(e, Error::Usage(_)) {
            let _ = writeln!(err, "{USAGE}");
        }
        return;
    }

    match format {
        OutputFormat::Human => {
            let _ = writeln!(out, "ptree: {e}");
        }
        OutputFormat::Json => {
            let doc = json!({
                "schema_version": SCHEMA_VERSION,
                "status": "error",
                "error": {
                    "code": e.code(),
                    "message": e.to_string(),
                },
            });
            if serde_json::to_writer_pretty(&mut *out, &doc).is_ok() {
                let _ = writeln!(out);
            }
        }
    }
    let _ = out.flush();
}
