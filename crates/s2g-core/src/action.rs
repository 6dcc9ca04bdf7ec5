//! Mapping of tool invocations to file actions.

use std::fmt;

use serde_json::Value;

use crate::event::Action;
use crate::record::RawRecord;

/// Tools a coding assistant can invoke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tool {
    Read,
    Edit,
    Write,
    NotebookEdit,
    Glob,
    Grep,
    Bash,
    Unrecognized,
}

/// How a file-touching tool maps onto the output: action kind and the
/// argument key holding the file path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolDescriptor {
    pub action: Action,
    pub path_key: &'static str,
}

impl Tool {
    /// Resolve a tool name as it appears in a `tool_use` block.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "Read" => Self::Read,
            "Edit" => Self::Edit,
            "Write" => Self::Write,
            "NotebookEdit" => Self::NotebookEdit,
            "Glob" => Self::Glob,
            "Grep" => Self::Grep,
            "Bash" => Self::Bash,
            _ => Self::Unrecognized,
        }
    }

    /// Descriptor for tools that touch exactly one file.
    ///
    /// Glob, Grep and Bash don't name a single file deterministically and
    /// have no descriptor, same as unrecognized tools.
    #[must_use]
    pub const fn descriptor(self) -> Option<ToolDescriptor> {
        let (action, path_key) = match self {
            Self::Read | Self::Write => (Action::Added, "file_path"),
            Self::Edit => (Action::Modified, "file_path"),
            Self::NotebookEdit => (Action::Modified, "notebook_path"),
            Self::Glob | Self::Grep | Self::Bash | Self::Unrecognized => return None,
        };
        Some(ToolDescriptor { action, path_key })
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Read => "Read",
            Self::Edit => "Edit",
            Self::Write => "Write",
            Self::NotebookEdit => "NotebookEdit",
            Self::Glob => "Glob",
            Self::Grep => "Grep",
            Self::Bash => "Bash",
            Self::Unrecognized => "unrecognized",
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A `tool_use` block borrowed from a record.
#[derive(Debug, Clone, Copy)]
pub struct ToolInvocation<'a> {
    pub tool: Tool,
    pub input: Option<&'a Value>,
    pub id: Option<&'a str>,
}

impl<'a> ToolInvocation<'a> {
    /// All tool invocations in a record, in content order.
    pub fn iter_record(record: &'a RawRecord) -> impl Iterator<Item = Self> + 'a {
        record
            .blocks()
            .iter()
            .filter(|b| b.is_tool_use())
            .map(|b| Self {
                tool: b.name.as_deref().map_or(Tool::Unrecognized, Tool::from_name),
                input: b.input.as_ref(),
                id: b.id.as_deref(),
            })
    }
}

/// The file action a record stands for, before path normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedAction {
    pub action: Action,
    pub tool: Tool,
    /// Path exactly as the tool received it.
    pub path: String,
    pub tool_use_id: Option<String>,
}

/// Decide which single file action, if any, a record carries.
///
/// Only the first invocation of a file-touching tool counts; any later ones in
/// the same record are ignored. If that invocation lacks a string path
/// argument the record yields nothing.
pub fn classify(record: &RawRecord) -> Option<ClassifiedAction> {
    let (invocation, descriptor) = ToolInvocation::iter_record(record)
        .find_map(|inv| inv.tool.descriptor().map(|d| (inv, d)))?;

    let path = invocation
        .input
        .and_then(|input| input.get(descriptor.path_key))
        .and_then(Value::as_str)
        .filter(|p| !p.is_empty());

    let Some(path) = path else {
        tracing::trace!(
            tool = %invocation.tool,
            tool_use_id = invocation.id,
            "skipping tool invocation without a path argument"
        );
        return None;
    };

    Some(ClassifiedAction {
        action: descriptor.action,
        tool: invocation.tool,
        path: path.to_string(),
        tool_use_id: invocation.id.map(String::from),
    })
}
