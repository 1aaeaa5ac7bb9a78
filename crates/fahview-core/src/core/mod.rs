//! # Core Module
//!
//! The data model shared by every other layer, and the text I/O that builds it.
//!
//! ## Architecture
//!
//! - **Molecular Representation** ([`models`]) - Atoms, bonds, topologies, snapshots and trajectories
//! - **Text I/O** ([`io`]) - Index-based string scanning and the PyON message decoder
//!
//! Everything here is free of networking and of global state: a `Trajectory`
//! is built once from a decoded document and only grows by appending snapshots.

pub mod io;
pub mod models;
