use super::error::ClientError;
use std::io::{ErrorKind, Read, Write};
use std::net::TcpStream;
use std::time::Duration;
use tracing::{debug, trace};

/// Upper bound on the bytes returned by a single [`Transport::receive_chunk`].
pub const RECEIVE_BUFFER_SIZE: usize = 16 * 1024;

/// A blocking, connection-oriented byte transport.
///
/// A transport lives for exactly one connection. There is no retry and no
/// reconnection: any failure is reported and the transport should be dropped.
pub trait Transport {
    /// Writes every byte of `bytes`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Connection`] if the write fails.
    fn send(&mut self, bytes: &[u8]) -> Result<(), ClientError>;

    /// Returns whatever bytes are available, blocking until at least one arrives.
    ///
    /// The chunk is at most [`RECEIVE_BUFFER_SIZE`] bytes and carries no message
    /// boundary guarantee: it may hold part of a response, or the end of one.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::ConnectionClosed`] when the peer has closed the
    /// connection and [`ClientError::Connection`] if the read fails.
    fn receive_chunk(&mut self) -> Result<Vec<u8>, ClientError>;
}

/// The production [`Transport`] over a TCP stream.
#[derive(Debug)]
pub struct TcpTransport {
    stream: TcpStream,
    buffer: Box<[u8]>,
}

impl TcpTransport {
    /// Opens a TCP connection to `host:port`.
    ///
    /// # Arguments
    ///
    /// * `host` - Host name or IP address of the daemon.
    /// * `port` - TCP port of the daemon's command server.
    /// * `read_timeout` - Optional bound on each blocking read; `None` blocks indefinitely.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Connection`] if the connection cannot be
    /// established or the timeout cannot be applied.
    pub fn connect(
        host: &str,
        port: u16,
        read_timeout: Option<Duration>,
    ) -> Result<Self, ClientError> {
        let stream =
            TcpStream::connect((host, port)).map_err(ClientError::connection("connect"))?;
        stream
            .set_read_timeout(read_timeout)
            .map_err(ClientError::connection("configure"))?;
        debug!(host, port, "TCP connection established.");
        Ok(Self {
            stream,
            buffer: vec![0; RECEIVE_BUFFER_SIZE].into_boxed_slice(),
        })
    }
}

impl Transport for TcpTransport {
    fn send(&mut self, bytes: &[u8]) -> Result<(), ClientError> {
        self.stream
            .write_all(bytes)
            .map_err(ClientError::connection("send"))?;
        trace!(bytes = bytes.len(), "Sent.");
        Ok(())
    }

    fn receive_chunk(&mut self) -> Result<Vec<u8>, ClientError> {
        loop {
            match self.stream.read(&mut self.buffer) {
                Ok(0) => return Err(ClientError::ConnectionClosed),
                Ok(n) => {
                    trace!(bytes = n, "Received chunk.");
                    return Ok(self.buffer[..n].to_vec());
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(ClientError::connection("receive")(e)),
            }
        }
    }
}
