//! Merging of per-source event sequences into one time-ordered stream.

use crate::event::FileEvent;

/// All file events of a conversion, totally ordered by
/// (Unix-second timestamp, source index, line number).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderedEventStream {
    events: Vec<FileEvent>,
}

impl OrderedEventStream {
    pub fn iter(&self) -> std::slice::Iter<'_, FileEvent> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl<'a> IntoIterator for &'a OrderedEventStream {
    type Item = &'a FileEvent;
    type IntoIter = std::slice::Iter<'a, FileEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Merge per-source event sequences, given in input order, into one stream.
///
/// Events with the same timestamp keep their (source, line) order, so
/// earlier sources win ties and a source's own lines are never reordered
/// among themselves. Sources are expected to be in line order already but
/// don't need to be time-sorted.
pub fn merge_sources<I>(sources: I) -> OrderedEventStream
where
    I: IntoIterator<Item = Vec<FileEvent>>,
{
    let mut events: Vec<FileEvent> = sources.into_iter().flatten().collect();
    events.sort_by_key(FileEvent::order_key);
    OrderedEventStream { events }
}
