use crate::analysis::error::AnalysisError;
use crate::client::error::ClientError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("Daemon communication failed: {source}")]
    Client {
        #[from]
        source: ClientError,
    },

    #[error("Analysis of slot {slot_id} failed: {source}")]
    Analysis {
        slot_id: u32,
        #[source]
        source: AnalysisError,
    },
}
