//! Text-level decoding of the daemon's responses.
//!
//! The daemon answers in "PyON", a JSON-like serialization that is not valid
//! JSON. Only three fixed message shapes are consumed, so instead of a grammar
//! this module provides a handful of index-based scanning primitives
//! ([`scan`]) and a decoder built directly on them ([`pyon`]).

#[cfg(test)]
pub(crate) mod fixtures;
pub mod pyon;
pub mod scan;
