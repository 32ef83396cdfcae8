use thiserror::Error;

/// Errors surfaced by the collection helpers
#[derive(Debug, Error)]
pub enum Error {
    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("BSON decode error: {0}")]
    Decode(#[from] mongodb::bson::de::Error),

    #[error("BSON encode error: {0}")]
    Encode(#[from] mongodb::bson::ser::Error),

    #[error("Duplicate key: _id {0} already exists")]
    DuplicateKey(String),

    #[error("Unsupported filter: {0}")]
    UnsupportedFilter(String),
}

pub type Result<T> = std::result::Result<T, Error>;
