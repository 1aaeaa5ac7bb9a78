use crate::core::models::error::ModelError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("Trajectory has no snapshot to analyze")]
    EmptyTrajectory,

    #[error("Atom {atom} has a non-finite position")]
    NonFinitePosition { atom: usize },

    #[error("Atom {atom} lies too far from the rest of the molecule to be placed on the grid")]
    CellOutOfRange { atom: usize },

    #[error("Cell size must be a positive length, got {value}")]
    InvalidCellSize { value: f64 },

    #[error(transparent)]
    Model(#[from] ModelError),
}
