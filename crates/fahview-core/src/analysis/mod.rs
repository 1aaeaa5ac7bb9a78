//! # Analysis Module
//!
//! Structural checks run on a decoded [`Trajectory`](crate::core::models::trajectory::Trajectory).
//!
//! Molecules simulated under periodic boundary conditions are reported with
//! raw wrapped coordinates, so a single molecule may reach the viewer split
//! across opposite faces of the box. [`clustering`] finds the spatially
//! contiguous pieces and [`reassembly`] translates the stray pieces back next
//! to the largest one.

pub mod clustering;
pub mod error;
pub mod reassembly;
