use wayphrase_core::errors::GenerationError;

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Generation(#[from] GenerationError),

    /// `generate` was called while a previous batch had not settled.
    #[error("a generation batch is already in flight")]
    BatchInFlight,
}
