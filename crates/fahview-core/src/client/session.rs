use super::error::ClientError;
use super::framing::ResponseFramer;
use super::transport::{TcpTransport, Transport};
use crate::config::ClientConfig;
use crate::core::io::pyon;
use crate::core::models::trajectory::Trajectory;
use tracing::{debug, info, instrument};

const GREETING_MARKER: &str = "Welcome";
const AUTH_OK_MARKER: &str = "OK";
const EMPTY_RESPONSE: &str = "> ";
const NO_ATOMS_MARKER: &str = "\"atoms\": []";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Greeting received, not yet authenticated.
    Connected,
    /// Password accepted.
    Authenticated,
    /// Accepting commands.
    Ready,
}

/// The trajectory currently simulated in one slot of the daemon.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotTrajectory {
    pub slot_id: u32,
    pub trajectory: Trajectory,
}

/// A half-duplex command session with the daemon.
///
/// Every method sends at most one command and reads its full response before
/// returning, so a session never has more than one command outstanding.
#[derive(Debug)]
pub struct ProtocolSession<T: Transport = TcpTransport> {
    transport: T,
    password: Option<String>,
    state: SessionState,
}

impl ProtocolSession<TcpTransport> {
    /// Connects over TCP, checks the greeting and authenticates if a password is configured.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Connection`] if the daemon is unreachable,
    /// [`ClientError::UnexpectedGreeting`] if the first response lacks the
    /// welcome banner, and [`ClientError::Authentication`] if the password is
    /// rejected.
    #[instrument(skip_all, name = "session_connect", fields(host = %config.host, port = config.port))]
    pub fn connect(config: &ClientConfig) -> Result<Self, ClientError> {
        let transport = TcpTransport::connect(&config.host, config.port, config.read_timeout)?;
        Self::with_transport(transport, config.password.clone())
    }
}

impl<T: Transport> ProtocolSession<T> {
    /// Starts a session over an already connected transport.
    ///
    /// # Errors
    ///
    /// Same as [`ProtocolSession::connect`], minus the connection step.
    pub fn with_transport(transport: T, password: Option<String>) -> Result<Self, ClientError> {
        let mut session = Self {
            transport,
            password,
            state: SessionState::Connected,
        };

        let greeting = session.read_response()?;
        if !greeting.contains(GREETING_MARKER) {
            return Err(ClientError::UnexpectedGreeting { response: greeting });
        }
        info!("Connected to daemon command server.");

        session.authenticate()?;
        session.state = SessionState::Ready;
        Ok(session)
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Sends the configured password. Does nothing if no password is configured.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Authentication`] carrying the daemon's reply if
    /// it does not contain `OK`.
    pub fn authenticate(&mut self) -> Result<(), ClientError> {
        let Some(password) = self.password.clone() else {
            return Ok(());
        };

        self.send_command(&format!("auth {}", password))?;
        let response = self.read_response()?;
        if !response.contains(AUTH_OK_MARKER) {
            return Err(ClientError::Authentication { response });
        }

        if self.state == SessionState::Connected {
            self.state = SessionState::Authenticated;
        }
        info!("Authenticated with daemon.");
        Ok(())
    }

    /// Lists the ids of every slot configured on the daemon.
    ///
    /// # Errors
    ///
    /// Returns a transport error, or [`ClientError::Decode`] if an id is not numeric.
    pub fn slot_ids(&mut self) -> Result<Vec<u32>, ClientError> {
        self.send_command("slot-info")?;
        let response = self.read_response()?;
        let ids = pyon::parse_slot_ids(&response)?;
        debug!(count = ids.len(), "Received slot list.");
        Ok(ids)
    }

    /// Fetches the trajectory simulated in slot `slot_id`.
    ///
    /// # Return
    ///
    /// Returns `None` for slots without a molecule (compute-only slots answer
    /// with a bare prompt or an empty atom list).
    ///
    /// # Errors
    ///
    /// Returns a transport error, or [`ClientError::Decode`] if the document
    /// cannot be decoded.
    #[instrument(skip(self), name = "fetch_trajectory")]
    pub fn trajectory(&mut self, slot_id: u32) -> Result<Option<Trajectory>, ClientError> {
        self.send_command(&format!("trajectory {}", slot_id))?;
        let response = self.read_response()?;
        if response == EMPTY_RESPONSE || response.contains(NO_ATOMS_MARKER) {
            debug!("Slot has no molecule; skipping.");
            return Ok(None);
        }
        Ok(Some(pyon::parse(&response)?))
    }

    /// Fetches the trajectory of every slot that simulates a molecule, in slot order.
    ///
    /// # Errors
    ///
    /// Fails on the first slot that cannot be fetched or decoded.
    pub fn trajectories(&mut self) -> Result<Vec<SlotTrajectory>, ClientError> {
        let mut result = Vec::new();
        for slot_id in self.slot_ids()? {
            if let Some(trajectory) = self.trajectory(slot_id)? {
                result.push(SlotTrajectory {
                    slot_id,
                    trajectory,
                });
            }
        }
        Ok(result)
    }

    /// Reads chunks until they form a complete response and returns its text.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::ConnectionClosed`] if the daemon hangs up
    /// mid-response, [`ClientError::Connection`] on read failure and
    /// [`ClientError::InvalidEncoding`] for non-UTF-8 text.
    pub fn read_response(&mut self) -> Result<String, ClientError> {
        let mut framer = ResponseFramer::new();
        while !framer.push(&self.transport.receive_chunk()?) {}
        debug!(bytes = framer.len(), "Received complete response.");
        framer.into_text()
    }

    fn send_command(&mut self, command: &str) -> Result<(), ClientError> {
        let verb = command.split(' ').next().unwrap_or(command);
        debug!(command = verb, "Sending command.");
        self.transport.send(format!("{}\n", command).as_bytes())
    }
}
