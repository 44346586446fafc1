pub mod connection;
pub mod record;
mod schema;

pub use connection::Connection;
pub use record::{MockRecordRepository, RecordRepository, RecordRepositoryImpl};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("record {id} is corrupt: {reason}")]
    CorruptRecord { id: i64, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;
