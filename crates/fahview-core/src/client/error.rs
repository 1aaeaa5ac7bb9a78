use crate::core::io::pyon::PyonError;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Connection failed during {operation}: {source}")]
    Connection {
        operation: &'static str,
        #[source]
        source: io::Error,
    },

    #[error("Connection closed by the daemon before the response was complete")]
    ConnectionClosed,

    #[error("Daemon did not send the expected greeting: {response:?}")]
    UnexpectedGreeting { response: String },

    #[error("Authentication rejected by the daemon: {response}")]
    Authentication { response: String },

    #[error("Response is not valid UTF-8 text")]
    InvalidEncoding,

    #[error("Failed to decode response: {source}")]
    Decode {
        #[from]
        source: PyonError,
    },
}

impl ClientError {
    pub(crate) fn connection(operation: &'static str) -> impl FnOnce(io::Error) -> Self {
        move |source| Self::Connection { operation, source }
    }
}
