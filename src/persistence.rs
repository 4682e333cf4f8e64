//! Shared `PostgreSQL` plumbing for repository adapters.

use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};
use secrecy::{ExposeSecret, SecretString};

/// `PostgreSQL` connection pool type used by all adapters.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Builds a connection pool for `database_url`.
///
/// # Errors
///
/// Returns [`PoolError`] when the initial connections cannot be opened.
pub fn connect(database_url: &SecretString) -> Result<PgPool, PoolError> {
    Pool::builder().build(ConnectionManager::new(database_url.expose_secret()))
}

/// Port errors that can wrap an infrastructure failure.
pub trait PersistenceFailure: Sized + Send + 'static {
    /// Wraps a persistence-layer error.
    fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self;
}

/// Runs a blocking diesel operation on the blocking thread pool.
pub(crate) async fn run_blocking<F, T, E>(pool: &PgPool, f: F) -> Result<T, E>
where
    F: FnOnce(&mut PgConnection) -> Result<T, E> + Send + 'static,
    T: Send + 'static,
    E: PersistenceFailure,
{
    let shared_pool = pool.clone();
    tokio::task::spawn_blocking(move || {
        let mut connection = shared_pool.get().map_err(E::persistence)?;
        f(&mut connection)
    })
    .await
    .map_err(E::persistence)?
}
