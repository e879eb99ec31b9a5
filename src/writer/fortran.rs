//! Write the expanded template, or the failure sentinel in its place.

use crate::model::ParamList;
use crate::processor;
use std::fs;
use std::io;
use std::path::Path;

/// Single line left in the output when the parameter tables are malformed,
/// so the dependent compile step fails instead of using a stale file.
pub const SENTINEL: &str = "There was an error parsing the parameter files";

pub fn emit(template: &str, params: &ParamList, out_file: &Path) -> io::Result<()> {
    fs::write(out_file, processor::expand(template, params))
}

pub fn emit_sentinel(out_file: &Path) -> io::Result<()> {
    fs::write(out_file, SENTINEL)
}
