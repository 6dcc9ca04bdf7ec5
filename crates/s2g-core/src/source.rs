//! Extraction of file events from a single input source.

use std::io::BufRead;

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::action::{ClassifiedAction, classify};
use crate::event::{FileEvent, Position};
use crate::options::PipelineOptions;
use crate::path::{PathNormalizer, ProjectRoot};
use crate::record::parse_line;

/// Buffer size for `BufReader` (64KB for optimal performance on large files)
pub const BUFFER_SIZE: usize = 64 * 1024;

/// ISO 8601 forms without an offset, read as UTC.
const NAIVE_TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Line counters for one source, for diagnostics only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SourceStats {
    pub lines: usize,
    pub blank_lines: usize,
    /// Non-blank lines that weren't a JSON object record.
    pub rejected_lines: usize,
    pub records: usize,
    /// Records that decoded fine but carry no single-file action.
    pub records_without_event: usize,
    pub events: usize,
}

/// Everything extracted from one source, in line order.
#[derive(Debug, Clone, Default)]
pub struct SourceEvents {
    pub events: Vec<FileEvent>,
    pub root: Option<ProjectRoot>,
    pub stats: SourceStats,
}

/// A classified record whose path still awaits the source's root.
#[derive(Debug)]
struct PendingEvent {
    line: usize,
    classified: ClassifiedAction,
    timestamp: DateTime<Utc>,
    actor: String,
}

/// What one pass over a source yields before normalization.
#[derive(Debug, Default)]
struct SourceScan {
    pending: Vec<PendingEvent>,
    first_cwd: Option<String>,
    stats: SourceStats,
}

/// Parse a record timestamp: RFC 3339, or an offset-less ISO 8601 date-time taken as UTC.
fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    NAIVE_TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Read a source line by line, classifying each record as it goes.
///
/// Only the classified action of a record is kept, together with its line,
/// timestamp and actor. Records without a usable timestamp take the last
/// valid one seen earlier, or the Unix epoch at the very start. A read error
/// ends the source early; what was read so far is kept.
fn scan_source<R: BufRead>(index: usize, reader: R, options: &PipelineOptions) -> SourceScan {
    let mut scan = SourceScan::default();
    // Unix epoch
    let mut clock = DateTime::<Utc>::default();

    for (line_idx, chunk) in reader.split(b'\n').enumerate() {
        let bytes = match chunk {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(
                    source = index,
                    line = line_idx + 1,
                    error = %e,
                    "read error, ignoring the rest of this source"
                );
                break;
            }
        };
        scan.stats.lines += 1;

        let Ok(line) = std::str::from_utf8(&bytes) else {
            tracing::trace!(source = index, line = line_idx + 1, "skipping non UTF-8 line");
            scan.stats.rejected_lines += 1;
            continue;
        };

        if line.trim().is_empty() {
            scan.stats.blank_lines += 1;
            continue;
        }

        let Some(record) = parse_line(line) else {
            scan.stats.rejected_lines += 1;
            continue;
        };
        scan.stats.records += 1;

        if scan.first_cwd.is_none() {
            scan.first_cwd = record.cwd.clone().filter(|c| !c.is_empty());
        }
        if let Some(ts) = record.timestamp.as_deref().and_then(parse_timestamp) {
            clock = ts;
        }

        let Some(classified) = classify(&record) else {
            scan.stats.records_without_event += 1;
            continue;
        };

        scan.pending.push(PendingEvent {
            line: line_idx + 1,
            classified,
            timestamp: clock,
            actor: options.actor_for(record.session_id.as_deref()).to_string(),
        });
    }

    scan
}

/// Extract the file events of one source.
///
/// `index` is the source's position in the input order and ends up in each
/// event's [`Position`]. Paths are normalized once the whole source has been
/// read, so that an auto-detected root applies to lines before the first `cwd`.
pub fn extract_source<R: BufRead>(
    index: usize,
    reader: R,
    options: &PipelineOptions,
) -> SourceEvents {
    let SourceScan {
        pending,
        first_cwd,
        mut stats,
    } = scan_source(index, reader, options);

    let root = options.strip.root_for_source(first_cwd.as_deref());
    let normalizer = PathNormalizer::new(root);

    let events: Vec<FileEvent> = pending
        .into_iter()
        .map(|p| FileEvent {
            path: normalizer.normalize(&p.classified.path).to_string(),
            action: p.classified.action,
            timestamp: p.timestamp,
            actor: p.actor,
            position: Position {
                source: index,
                line: p.line,
            },
        })
        .collect();

    stats.events = events.len();
    tracing::debug!(
        source = index,
        root = ?normalizer.root().map(ProjectRoot::as_str),
        ?stats,
        "extracted source"
    );

    SourceEvents {
        events,
        root: normalizer.root().cloned(),
        stats,
    }
}
