use sqlx::Error as SqlxError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Sqlx(#[from] SqlxError),

    #[error("Not found")]
    NotFound,

    #[error("Already exists: {0}")]
    AlreadyExists(String),
}

impl RepositoryError {
    pub fn is_unique_violation(err: &SqlxError) -> bool {
        match err {
            SqlxError::Database(db_err) => db_err.is_unique_violation(),
            _ => false,
        }
    }
}
