//! Validated pipeline options.

use thiserror::Error;

use crate::gource::FIELD_SEPARATOR;
use crate::path::{ProjectRoot, StripMode};

/// Actor label used when neither an override nor a session id is available.
pub const DEFAULT_ACTOR: &str = "claude";

/// Invalid invocation, reported before any input is processed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("no input sources given")]
    NoSources,
    #[error("--strip-prefix and --auto-strip cannot be used together")]
    ConflictingStripOptions,
    #[error("strip prefix cannot be empty")]
    EmptyStripPrefix,
    #[error("user name cannot be empty")]
    EmptyActor,
    #[error("user name {0:?} contains the field separator '|'")]
    ActorContainsSeparator(String),
}

/// Options shared by every source in one conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineOptions {
    pub strip: StripMode,
    /// Overrides the per-record session id as the actor label.
    pub actor: Option<String>,
}

impl PipelineOptions {
    /// Build options, rejecting contradictory or unusable settings.
    pub fn new(
        strip_prefix: Option<&str>,
        auto_strip: bool,
        actor: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let strip = match (strip_prefix, auto_strip) {
            (Some(_), true) => return Err(ConfigError::ConflictingStripOptions),
            (Some(prefix), false) => {
                StripMode::Prefix(ProjectRoot::new(prefix).ok_or(ConfigError::EmptyStripPrefix)?)
            }
            (None, true) => StripMode::Auto,
            (None, false) => StripMode::None,
        };

        if let Some(actor) = actor {
            if actor.is_empty() {
                return Err(ConfigError::EmptyActor);
            }
            if actor.contains(FIELD_SEPARATOR) {
                return Err(ConfigError::ActorContainsSeparator(actor.to_string()));
            }
        }

        Ok(Self {
            strip,
            actor: actor.map(String::from),
        })
    }

    /// Actor label for a record with the given session id.
    pub fn actor_for<'a>(&'a self, session_id: Option<&'a str>) -> &'a str {
        self.actor
            .as_deref()
            .or(session_id.filter(|s| !s.is_empty()))
            .unwrap_or(DEFAULT_ACTOR)
    }
}
