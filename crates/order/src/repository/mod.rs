pub mod health;
pub mod order;

use shared::{config::ConnectionManager, errors::RepositoryError};

/// Lets the connection manager see the error before it is wrapped.
pub(crate) fn store_error(db: &ConnectionManager, err: sqlx::Error) -> RepositoryError {
    db.report(&err);
    RepositoryError::from(err)
}
