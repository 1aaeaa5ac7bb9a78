//! # fahview Core Library
//!
//! Reads the live state of a molecular-dynamics daemon over its plain-text
//! command protocol, decodes the "PyON" documents it answers with into a typed
//! trajectory model, and detects (and undoes) periodic-boundary fragmentation
//! of the simulated molecule.
//!
//! ## Architectural Philosophy
//!
//! The library is split into four layers, each depending only on the ones above it:
//!
//! - **[`core`]: The Foundation.** Immutable data models (`Topology`, `Snapshot`,
//!   `Trajectory`) and the text-level I/O that produces them (string scanning
//!   primitives and the PyON decoder).
//!
//! - **[`client`]: The Wire.** A blocking TCP transport and the half-duplex
//!   protocol session that frames responses and turns them into trajectories.
//!
//! - **[`analysis`]: The Algorithms.** Sparse-grid flood-fill clustering that
//!   partitions atoms into spatially contiguous groups, and the reassembly step
//!   that translates stray groups back across the periodic box.
//!
//! - **[`workflows`]: The Public API.** The end-to-end pipeline that connects,
//!   fetches every slot's trajectory and runs the analysis, reporting progress
//!   through a callback.

pub mod analysis;
pub mod client;
pub mod config;
pub mod core;
pub mod workflows;
