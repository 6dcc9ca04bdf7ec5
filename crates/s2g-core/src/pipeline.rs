//! End-to-end conversion of session log sources.

use std::io::BufRead;

use crate::merge::{OrderedEventStream, merge_sources};
use crate::options::{ConfigError, PipelineOptions};
use crate::source::{SourceStats, extract_source};

/// Result of converting all sources.
#[derive(Debug, Clone, Default)]
pub struct Conversion {
    pub stream: OrderedEventStream,
    /// Per-source counters, in input order.
    pub stats: Vec<SourceStats>,
}

/// Convert sources, given in input order, into one ordered event stream.
///
/// Source order matters: it decides ties between events with equal timestamps.
/// Fails only when there is nothing to convert; bad lines are skipped.
pub fn convert<I, R>(sources: I, options: &PipelineOptions) -> Result<Conversion, ConfigError>
where
    I: IntoIterator<Item = R>,
    R: BufRead,
{
    let mut per_source = Vec::new();
    let mut stats = Vec::new();

    for (index, reader) in sources.into_iter().enumerate() {
        let extracted = extract_source(index, reader, options);
        stats.push(extracted.stats);
        per_source.push(extracted.events);
    }

    if per_source.is_empty() {
        return Err(ConfigError::NoSources);
    }

    let stream = merge_sources(per_source);
    tracing::debug!(
        sources = stats.len(),
        events = stream.len(),
        "converted sources"
    );

    Ok(Conversion { stream, stats })
}
