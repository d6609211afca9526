//! Error types for the backend client.
//!
//! # Design
//! Three failure kinds stay distinct: the exchange never completed
//! (`Transport`), the backend answered outside 2xx (`RequestFailed`), or the
//! payload was not the JSON we expected (`Deserialization`). A non-success
//! status is reported with a fixed per-operation message and carries no
//! status code or body.

use std::fmt;

/// The three backend operations, used to label failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    CreateNewChat,
    SendChatMessage,
    GetTables,
}

impl Operation {
    /// Fixed message returned when the backend answers with a non-2xx status.
    pub fn failure_message(&self) -> &'static str {
        match self {
            Operation::CreateNewChat => "failed to create new chat",
            Operation::SendChatMessage => "failed to send message",
            Operation::GetTables => "failed to get tables",
        }
    }

    /// Prefix written to the diagnostic log when the operation fails.
    pub fn log_context(&self) -> &'static str {
        match self {
            Operation::CreateNewChat => "Error creating new chat",
            Operation::SendChatMessage => "Error sending message",
            Operation::GetTables => "Error getting tables",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operation::CreateNewChat => "create_new_chat",
            Operation::SendChatMessage => "send_chat_message",
            Operation::GetTables => "get_tables",
        })
    }
}

/// Errors returned by the client and its transports.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The HTTP exchange could not complete (DNS, refused connection, I/O).
    #[error("transport failure: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The backend answered with a status outside 200..=299.
    #[error("{}", .0.failure_message())]
    RequestFailed(Operation),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The backend URL is missing or unusable.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A local file could not be read for upload.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ApiError {
    pub fn transport<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        ApiError::Transport(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn request_failed_uses_the_operation_message() {
        assert_eq!(
            ApiError::RequestFailed(Operation::CreateNewChat).to_string(),
            "failed to create new chat"
        );
        assert_eq!(
            ApiError::RequestFailed(Operation::SendChatMessage).to_string(),
            "failed to send message"
        );
        assert_eq!(
            ApiError::RequestFailed(Operation::GetTables).to_string(),
            "failed to get tables"
        );
    }

    #[test]
    fn transport_keeps_the_underlying_error_as_source() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = ApiError::transport(io);
        assert_eq!(err.to_string(), "transport failure: refused");
        let source = err.source().unwrap();
        let io = source.downcast_ref::<std::io::Error>().unwrap();
        assert_eq!(io.kind(), std::io::ErrorKind::ConnectionRefused);
    }
}
