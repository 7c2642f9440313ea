use std::fmt;

/// Machine-readable error codes for front-ends and scripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigParseError,
    DocumentNotFound,
    AmbiguousTaskId,
    CorruptLog,
    LogWriteFailed,
    LockContention,
    InternalUnexpected,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ConfigParseError => "E1002",
            Self::DocumentNotFound => "E2001",
            Self::AmbiguousTaskId => "E2004",
            Self::CorruptLog => "E3001",
            Self::LogWriteFailed => "E5001",
            Self::LockContention => "E5002",
            Self::InternalUnexpected => "E9001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ConfigParseError => "Config file parse error",
            Self::DocumentNotFound => "Document not found",
            Self::AmbiguousTaskId => "Ambiguous task ID",
            Self::CorruptLog => "Corrupt action log",
            Self::LogWriteFailed => "Action log write failed",
            Self::LockContention => "Lock contention",
            Self::InternalUnexpected => "Internal unexpected error",
        }
    }

    /// Optional remediation hint that can be surfaced to the user.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::ConfigParseError => Some("Fix syntax in rewind.toml and retry."),
            Self::DocumentNotFound => {
                Some("Start a fresh session; documents are created on first contact.")
            }
            Self::AmbiguousTaskId => Some("Use a longer ID prefix to disambiguate."),
            Self::CorruptLog => Some("Inspect the named log file; actions are one JSON row per line."),
            Self::LogWriteFailed => Some("Check disk space and write permissions."),
            Self::LockContention => Some("Retry after the other rewind process releases its lock."),
            Self::InternalUnexpected => Some("Retry once. If persistent, report a bug with logs."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
