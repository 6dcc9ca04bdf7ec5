//! Core pipeline for turning coding assistant session logs into Gource custom logs.
//!
//! This crate contains:
//! - Record parsing: decoding session log lines
//! - Action classification: mapping tool invocations to file actions
//! - Path normalization: stripping explicit or auto-detected project roots
//! - Merging: ordering events from several sessions into one stream
//! - Serialization: the `timestamp|user|type|file` line format

pub mod action;
pub mod event;
pub mod gource;
pub mod merge;
pub mod options;
pub mod path;
pub mod pipeline;
pub mod record;
pub mod source;

pub use action::{ClassifiedAction, Tool, ToolDescriptor, ToolInvocation, classify};
pub use event::{Action, FileEvent, Position};
pub use gource::{FIELD_SEPARATOR, format_line, write_log};
pub use merge::{OrderedEventStream, merge_sources};
pub use options::{ConfigError, DEFAULT_ACTOR, PipelineOptions};
pub use path::{PathNormalizer, ProjectRoot, StripMode};
pub use pipeline::{Conversion, convert};
pub use record::{RawRecord, RecordKind, parse_line};
pub use source::{BUFFER_SIZE, SourceEvents, SourceStats, extract_source};
