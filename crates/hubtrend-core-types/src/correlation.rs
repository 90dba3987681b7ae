//! Correlation types for tying log events to a single invocation
//!
//! Every collection or discovery run gets a [`RunId`]; the engine attaches it
//! to its op events so interleaved runs can be told apart in the logs.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for one collection or discovery run
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(String);

impl RunId {
    /// Generate a new random RunId using UUIDv7
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Get the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Create from an existing string (for deserialization)
    pub fn from_string(s: String) -> Self {
        Self(s)
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Context carried through one engine command
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub run_id: RunId,
    pub repo_id: String,
}

impl RequestContext {
    /// Create a context for `repo_id` with a fresh RunId
    pub fn new(repo_id: impl Into<String>) -> Self {
        Self {
            run_id: RunId::new(),
            repo_id: repo_id.into(),
        }
    }

    /// Replace the RunId (for callers that already carry one)
    pub fn with_run_id(mut self, run_id: RunId) -> Self {
        self.run_id = run_id;
        self
    }
}
