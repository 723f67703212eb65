//! Error taxonomy shared by the catalog, extractor, engine and transport.
//!
//! Every variant maps onto one [ErrorCode], which is what crosses the
//! line-delimited protocol boundary.

use serde::Serialize;

/// Closed set of protocol error codes (JSON-RPC numbering).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorCode {
    ParseError,
    MethodNotFound,
    InvalidParams,
    UpstreamFetch,
    StateNotReady,
    InvalidArgument,
    CacheIo,
    Internal,
}

impl ErrorCode {
    pub const fn as_i64(self) -> i64 {
        match self {
            Self::ParseError => -32700,
            Self::MethodNotFound => -32601,
            Self::InvalidParams => -32602,
            Self::Internal => -32603,
            Self::UpstreamFetch => -32000,
            Self::StateNotReady => -32001,
            Self::InvalidArgument => -32002,
            Self::CacheIo => -32003,
        }
    }

    pub fn from_i64(code: i64) -> Option<Self> {
        [
            Self::ParseError,
            Self::MethodNotFound,
            Self::InvalidParams,
            Self::Internal,
            Self::UpstreamFetch,
            Self::StateNotReady,
            Self::InvalidArgument,
            Self::CacheIo,
        ]
        .into_iter()
        .find(|c| c.as_i64() == code)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AdvisorError {
    /// Catalog or completion service unreachable, timed out, or non-success status.
    #[error("upstream fetch failed for {resource}: {message}")]
    UpstreamFetch { resource: String, message: String },

    /// A method ran before its prerequisite was populated.
    #[error("{0}")]
    StateNotReady(String),

    /// Completion output could not be read as JSON.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("invalid params: {0}")]
    InvalidParams(String),

    #[error("Method not found: {0}")]
    MethodNotFound(String),

    #[error("failed to parse {context}: {source}")]
    Parse {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("cache i/o error at {path}: {source}")]
    Cache {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Environment or tuning file could not be turned into settings.
    #[error("configuration error: {0}")]
    Config(String),
}

impl AdvisorError {
    pub fn upstream(resource: impl Into<String>, message: impl Into<String>) -> Self {
        Self::UpstreamFetch {
            resource: resource.into(),
            message: message.into(),
        }
    }

    pub fn parse(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Parse {
            context: context.into(),
            source,
        }
    }

    pub fn cache(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Cache {
            path: path.into(),
            source,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::UpstreamFetch { .. } => ErrorCode::UpstreamFetch,
            Self::StateNotReady(_) => ErrorCode::StateNotReady,
            // Only reaches the boundary if a caller opted out of the heuristic fallback.
            Self::MalformedResponse(_) => ErrorCode::UpstreamFetch,
            Self::InvalidArgument(_) => ErrorCode::InvalidArgument,
            Self::InvalidParams(_) => ErrorCode::InvalidParams,
            Self::MethodNotFound(_) => ErrorCode::MethodNotFound,
            Self::Parse { .. } => ErrorCode::ParseError,
            Self::Cache { .. } => ErrorCode::CacheIo,
            Self::Serialize(_) | Self::Config(_) => ErrorCode::Internal,
        }
    }
}
