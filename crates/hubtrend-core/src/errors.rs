use hubtrend_core_types::RunId;
use thiserror::Error;

/// Result type alias using TrendError
pub type Result<T> = std::result::Result<T, TrendError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that callers, tests and log
/// consumers can match on without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Input
    InvalidInput,
    MalformedRecord,

    // Analysis
    EmptyHistory,

    // Store
    StoreUnavailable,
    Persistence,

    // Integration/IO
    Io,
    Serialization,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::MalformedRecord => "ERR_MALFORMED_RECORD",
            ExErrorKind::EmptyHistory => "ERR_EMPTY_HISTORY",
            ExErrorKind::StoreUnavailable => "ERR_STORE_UNAVAILABLE",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification kind plus optional context (operation, record
/// id, field) for programmatic handling and for log events.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    field: Option<String>,
    run_id: Option<RunId>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            field: None,
            run_id: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity context (record id or repository id)
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    /// Add the offending field name
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Add run correlation context
    pub fn with_run_id(mut self, run_id: RunId) -> Self {
        self.run_id = Some(run_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    pub fn run_id(&self) -> Option<&RunId> {
        self.run_id.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (entity_id: {})", entity_id)?;
        }
        if let Some(field) = &self.field {
            write!(f, " (field: {})", field)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Domain failures raised by the delta engine and record mapping
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TrendError {
    /// No generation exists to derive `latest` and `cutoff` from
    #[error("History is empty: no snapshot generations to analyze")]
    EmptyHistory,

    /// A record is missing a required field or carries an uncoercible value
    #[error("Malformed record {id}: field `{field}` {reason}")]
    MalformedRecord {
        id: String,
        field: String,
        reason: String,
    },

    /// A window parameter is out of range
    #[error("Invalid window parameter `{field}`: {reason}")]
    InvalidWindow { field: String, reason: String },

    /// The historical collection could not be loaded
    #[error("Snapshot store unavailable for {repo_id}: {reason}")]
    StoreUnavailable { repo_id: String, reason: String },

    /// JSON encoding or decoding failed
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl TrendError {
    /// Shorthand for a malformed-record error
    pub fn malformed(
        id: impl Into<String>,
        field: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        TrendError::MalformedRecord {
            id: id.into(),
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl From<TrendError> for ExError {
    fn from(err: TrendError) -> Self {
        match err {
            TrendError::EmptyHistory => ExError::new(ExErrorKind::EmptyHistory)
                .with_op("compute_delta")
                .with_message("no snapshot generations to analyze"),

            TrendError::MalformedRecord { id, field, reason } => {
                ExError::new(ExErrorKind::MalformedRecord)
                    .with_entity_id(id)
                    .with_field(field)
                    .with_message(reason)
            }

            TrendError::InvalidWindow { field, reason } => ExError::new(ExErrorKind::InvalidInput)
                .with_op("delta_window")
                .with_field(field)
                .with_message(reason),

            TrendError::StoreUnavailable { repo_id, reason } => {
                ExError::new(ExErrorKind::StoreUnavailable)
                    .with_op("load_history")
                    .with_entity_id(repo_id)
                    .with_message(reason)
            }

            TrendError::Serialization { message } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
        }
    }
}

/// Conversion from serde_json::Error to TrendError
impl From<serde_json::Error> for TrendError {
    fn from(err: serde_json::Error) -> Self {
        TrendError::Serialization {
            message: err.to_string(),
        }
    }
}
