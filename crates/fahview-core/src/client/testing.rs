//! In-memory transport for session and workflow tests.

use super::error::ClientError;
use super::transport::Transport;
use std::collections::VecDeque;

pub(crate) const GREETING: &str = "\nWelcome to the command server.\n> ";

/// Replays canned chunks and records everything sent.
///
/// Running out of chunks reads as the daemon hanging up.
#[derive(Debug, Default)]
pub(crate) struct ScriptedTransport {
    pub(crate) chunks: VecDeque<Vec<u8>>,
    pub(crate) sent: Vec<String>,
}

impl ScriptedTransport {
    pub(crate) fn new(chunks: &[&str]) -> Self {
        Self {
            chunks: chunks.iter().map(|c| c.as_bytes().to_vec()).collect(),
            sent: Vec::new(),
        }
    }
}

impl Transport for ScriptedTransport {
    fn send(&mut self, bytes: &[u8]) -> Result<(), ClientError> {
        self.sent.push(String::from_utf8_lossy(bytes).into_owned());
        Ok(())
    }

    fn receive_chunk(&mut self) -> Result<Vec<u8>, ClientError> {
        self.chunks.pop_front().ok_or(ClientError::ConnectionClosed)
    }
}

/// A `slot-info` response listing the given ids.
pub(crate) fn slot_info(ids: &[&str]) -> String {
    let mut text = String::from("\nPyON 1 slots\n[\n");
    for id in ids {
        text.push_str(&format!(
            "  {{\n    \"id\": \"{}\",\n    \"status\": \"RUNNING\",\n  }},\n",
            id
        ));
    }
    text.push_str("]\n---\n> ");
    text
}
