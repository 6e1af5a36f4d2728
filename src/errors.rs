use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuilderError {
    #[error("storage error: {0}")] Storage(String),
    #[error("storage quota exceeded: {needed} bytes requested, {limit} allowed")] QuotaExceeded { needed: usize, limit: usize },
    #[error("corrupt project record: {0}")] CorruptRecord(String),
    #[error("config error: {0}")] Config(String),
    #[error("catalog error: {0}")] Catalog(String),
    #[error("invalid project info: {0}")] Validation(String),
    #[error(transparent)] Io(#[from] std::io::Error),
    #[error(transparent)] Json(#[from] serde_json::Error),
    #[error(transparent)] Sqlite(#[from] rusqlite::Error),
}

pub type Result<T> = std::result::Result<T, BuilderError>;
