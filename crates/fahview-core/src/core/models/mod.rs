//! # Core Models Module
//!
//! The fundamental data structures describing a simulated molecule and its motion.
//!
//! ## Key Components
//!
//! - [`atom`] - Element, charge, radius and mass of a single atom
//! - [`topology`] - The ordered atom list and the index-based bonds between atoms
//! - [`snapshot`] - One time-sample of every atom position
//! - [`trajectory`] - A topology plus its append-only sequence of snapshots
//! - [`bounds`] - Axis-aligned bounding box over positions
//! - [`error`] - Consistency and index faults raised by the models
//!
//! ## Ownership
//!
//! The `Topology` is the sole owner of atoms. Bonds, snapshots and the
//! clustering grid refer to atoms only by their index in `Topology::atoms()`.
//!
//! ```ignore
//! use fahview::core::models::{atom::Atom, topology::{Bond, Topology}};
//!
//! let topology = Topology::new(
//!     vec![Atom::new("C", 6, 0.0, 1.7, 12.011), Atom::new("O", 8, 0.0, 1.52, 15.999)],
//!     vec![Bond::new(0, 1)],
//! )?;
//! let mut trajectory = Trajectory::new(topology);
//! trajectory.add_snapshot(Snapshot::new(vec![Point3::origin(), Point3::new(1.2, 0.0, 0.0)]))?;
//! ```

pub mod atom;
pub mod bounds;
pub mod error;
pub mod snapshot;
pub mod topology;
pub mod trajectory;
