use thiserror::Error;

#[derive(Debug, Error)]
pub enum CollectorError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to accept client: {0}")]
    Accept(#[source] std::io::Error),

    #[error("failed to set up client stream: {0}")]
    Stream(#[source] std::io::Error),

    #[error("failed to spawn socket reader: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("failed to write report: {0}")]
    Report(#[source] std::io::Error),
}
