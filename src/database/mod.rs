mod postgres;
mod queries;

pub use postgres::{wait_until_ready, ConnectError, Postgres};
pub use queries::Queries;

pub type Result<T> = std::result::Result<T, Error>;

/// Failure of a single persistence operation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("author not found")]
    NotFound,
    #[error("database unavailable: {0}")]
    Unavailable(#[source] sqlx::Error),
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => Error::NotFound,
            err => Error::Unavailable(err),
        }
    }
}
