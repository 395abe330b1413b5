//! Error types for the archlens MCP server.

use rmcp::ErrorData as McpError;
use thiserror::Error;

/// Errors that can occur in the archlens MCP server.
#[derive(Debug, Error)]
pub enum Error {
    /// An error from the graph engine.
    #[error(transparent)]
    Graph(#[from] archlens::Error),

    /// MCP protocol error.
    #[error("MCP error: {0}")]
    Mcp(String),
}

impl Error {
    /// Whether the caller sent a malformed request.
    #[must_use]
    pub fn is_invalid_params(&self) -> bool {
        matches!(self, Self::Graph(e) if e.is_validation())
    }
}

impl From<Error> for McpError {
    fn from(e: Error) -> Self {
        if e.is_invalid_params() {
            Self::invalid_params(e.to_string(), None)
        } else {
            Self::internal_error(e.to_string(), None)
        }
    }
}

/// Result type for archlens MCP operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::ErrorCode;

    #[test]
    fn validation_errors_map_to_invalid_params() {
        let err = Error::Graph(archlens::Error::InvalidDescriptor {
            index: 2,
            field: "sourcePath",
        });
        let mcp: McpError = err.into();

        assert_eq!(mcp.code, ErrorCode::INVALID_PARAMS);
        assert!(mcp.message.contains("index 2"));
    }

    #[test]
    fn non_validation_graph_errors_map_to_internal_error() {
        let err = Error::from(archlens::Error::Config("maxCycles must be at least 1".to_string()));
        assert!(!err.is_invalid_params());

        let mcp: McpError = err.into();
        assert_eq!(mcp.code, ErrorCode::INTERNAL_ERROR);
        assert!(mcp.message.contains("maxCycles"));
    }

    #[test]
    fn other_errors_map_to_internal_error() {
        let mcp: McpError = Error::Mcp("transport closed".to_string()).into();
        assert_eq!(mcp.code, ErrorCode::INTERNAL_ERROR);
    }
}
