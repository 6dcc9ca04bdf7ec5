//! Gource custom log output.
//!
//! Each line is `timestamp|username|type|file`, where `timestamp` is Unix
//! seconds and `type` is `A` (added) or `M` (modified).

use std::io::{self, Write};

use crate::event::FileEvent;
use crate::merge::OrderedEventStream;

/// Separator between the four columns.
pub const FIELD_SEPARATOR: char = '|';

/// Render one event as a custom log line, without the trailing newline.
///
/// Paths containing the separator are written as-is; Gource has no escaping.
pub fn format_line(event: &FileEvent) -> String {
    format!(
        "{ts}{sep}{actor}{sep}{code}{sep}{path}",
        ts = event.unix_seconds(),
        actor = event.actor,
        code = event.action.code(),
        path = event.path,
        sep = FIELD_SEPARATOR,
    )
}

/// Write the whole stream, one line per event.
///
/// Returns the number of lines written. A closed pipe on the other end (e.g.
/// output piped to `head`) stops writing early without an error.
pub fn write_log<W: Write>(writer: &mut W, stream: &OrderedEventStream) -> io::Result<usize> {
    let mut written = 0;
    for event in stream {
        match writeln!(writer, "{}", format_line(event)) {
            Ok(()) => written += 1,
            Err(e) if e.kind() == io::ErrorKind::BrokenPipe => return Ok(written),
            Err(e) => return Err(e),
        }
    }
    match writer.flush() {
        Err(e) if e.kind() != io::ErrorKind::BrokenPipe => Err(e),
        _ => Ok(written),
    }
}
