use crate::journal::sink::SinkError;

#[derive(Debug, thiserror::Error)]
pub enum JournalError {
    #[error("message cannot be empty")]
    EmptyMessage,

    #[error(transparent)]
    Sink(#[from] SinkError),

    #[error("journal worker already started")]
    AlreadyStarted,

    #[error("failed to spawn journal worker: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("journal worker panicked")]
    WorkerPanicked,
}
