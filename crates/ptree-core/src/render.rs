//! Rendering of the flattened process tree.
//!
//! Human output is one line per entry: `depth` tabs, then
//! `comm,pid,state,uid`. JSON output is a single document carrying the same
//! entries plus the capacity that was requested.

use ptree_common::{OutputFormat, ProcessInfo, Result, SCHEMA_VERSION};
use serde::Serialize;
use std::io::Write;

/// One indentation level.
pub const INDENT: &str = "\t";

#[derive(Debug, Serialize)]
struct Listing<'a> {
    schema_version: &'static str,
    capacity: usize,
    count: usize,
    entries: &'a [ProcessInfo],
}

/// Write a single human-readable line for `entry`.
pub fn write_entry<W: Write>(out: &mut W, entry: &ProcessInfo) -> std::io::Result<()> {
    for _ in 0..entry.depth {
        out.write_all(INDENT.as_bytes())?;
    }
    writeln!(
        out,
        "{},{},{},{}",
        entry.comm, entry.pid, entry.state, entry.uid
    )
}

/// Write `entries` in `format`. Callers pass exactly the filled prefix.
pub fn write_listing<W: Write>(
    out: &mut W,
    format: OutputFormat,
    entries: &[ProcessInfo],
    capacity: usize,
) -> Result<()> {
    match format {
        OutputFormat::Human => {
            for entry in entries {
                write_entry(out, entry)?;
            }
        }
        OutputFormat::Json => {
            let listing = Listing {
                schema_version: SCHEMA_VERSION,
                capacity,
                count: entries.len(),
                entries,
            };
            serde_json::to_writer_pretty(&mut *out, &listing)?;
            writeln!(out)?;
        }
    }
    out.flush()?;
    Ok(())
}

/// Index of the first entry that descends more than one level below its
/// predecessor, or sits above the first entry's depth.
///
/// A pre-order listing can climb any number of levels but only ever
/// descends one at a time.
pub fn first_depth_anomaly(entries: &[ProcessInfo]) -> Option<usize> {
    let root = entries.first()?.depth;
    entries
        .windows(2)
        .position(|pair| pair[1].depth > pair[0].depth.saturating_add(1) || pair[1].depth < root)
        .map(|i| i + 1)
}
