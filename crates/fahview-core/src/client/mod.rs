//! # Client Module
//!
//! Talks to the simulation daemon's command server (plain text over TCP,
//! `127.0.0.1:36330` by default).
//!
//! ## Overview
//!
//! The protocol is line-oriented and strictly half-duplex: one command is
//! sent, and its complete response must be read before the next command. The
//! daemon never announces response lengths, so completeness is decided by
//! sentinel heuristics over the accumulated text ([`framing`]).
//!
//! - **Transport** ([`transport`]) - Blocking byte transport with a bounded receive
//! - **Framing** ([`framing`]) - Decides when an accumulated response is complete
//! - **Session** ([`session`]) - Greeting, authentication and the slot/trajectory commands
//! - **Errors** ([`error`]) - Connection, authentication and decoding faults
//!
//! ## Session Lifecycle
//!
//! `Connected` (greeting checked) → `Authenticated` (only with a password) → `Ready`.

pub mod error;
pub mod framing;
pub mod session;
#[cfg(test)]
pub(crate) mod testing;
pub mod transport;
