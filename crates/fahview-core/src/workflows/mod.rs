//! # Workflows Module
//!
//! End-to-end entry points that tie the client and the analysis together.
//!
//! - **Inspect Workflow** ([`inspect`]) - Connects to the daemon, fetches the
//!   trajectory of every slot and checks each molecule for periodic-boundary
//!   fragmentation, reassembling it when asked to.
//! - **Progress** ([`progress`]) - Callback-based phase and task reporting used
//!   by front ends to drive spinners and progress bars.

pub mod error;
pub mod inspect;
pub mod progress;
