use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Malformed detection: {0}")]
    MalformedDetection(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Wrong dump format: {0}")]
    DumpFormat(String),

    #[error("Json Error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Io Error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Counter pipeline is closed")]
    PipelineClosed,

    #[error("Counter worker panicked")]
    WorkerPanicked,
}
