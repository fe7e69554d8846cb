//! bb8 pool of async Diesel connections to the registration database.

use std::time::Duration;

use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::bb8::{Pool, PooledConnection};

use crate::domain::ports::define_port_error;

const MIN_IDLE: u32 = 1;
const CHECKOUT_TIMEOUT: Duration = Duration::from_secs(30);

define_port_error! {
    /// Failures building the pool or checking out a connection.
    pub enum PoolError {
        /// No connection became available before the checkout timeout.
        Checkout { message: String } => "failed to get connection from pool: {message}",
        /// The pool could not be created.
        Build { message: String } => "failed to build connection pool: {message}",
    }
}

/// Where to connect and how many connections to keep.
///
/// ```
/// use registration::outbound::persistence::PoolConfig;
///
/// let config = PoolConfig::new("postgres://localhost/registrations").with_max_size(4);
/// # let _ = config;
/// ```
#[derive(Debug, Clone)]
pub struct PoolConfig {
    database_url: String,
    max_size: u32,
}

impl PoolConfig {
    /// Default upper bound on pooled connections.
    pub const DEFAULT_MAX_SIZE: u32 = 10;

    /// Pool of [`Self::DEFAULT_MAX_SIZE`] connections to `database_url`.
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_size: Self::DEFAULT_MAX_SIZE,
        }
    }

    /// Override the connection limit.
    pub fn with_max_size(mut self, max_size: u32) -> Self {
        self.max_size = max_size;
        self
    }
}

/// Connection pool shared by clones of the Diesel adapter.
#[derive(Clone)]
pub struct DbPool {
    inner: Pool<AsyncPgConnection>,
}

impl DbPool {
    /// Build the pool. Connections are opened lazily, one is kept idle.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Build`] when the pool cannot be constructed.
    pub async fn new(config: PoolConfig) -> Result<Self, PoolError> {
        let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(config.database_url);
        Pool::builder()
            .max_size(config.max_size)
            .min_idle(Some(MIN_IDLE.min(config.max_size)))
            .connection_timeout(CHECKOUT_TIMEOUT)
            .build(manager)
            .await
            .map(|inner| Self { inner })
            .map_err(|err| PoolError::build(err.to_string()))
    }

    /// Check out a connection, waiting up to thirty seconds.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Checkout`] on timeout or connection failure.
    pub async fn get(&self) -> Result<PooledConnection<'_, AsyncPgConnection>, PoolError> {
        self.inner
            .get()
            .await
            .map_err(|err| PoolError::checkout(err.to_string()))
    }
}
