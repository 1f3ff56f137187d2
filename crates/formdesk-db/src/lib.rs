use diesel_async::{
    pooled_connection::{
        mobc::{Builder, Pool},
        AsyncDieselConnectionManager,
    },
    scoped_futures::ScopedFutureExt,
    AsyncConnection, AsyncPgConnection, SimpleAsyncConnection,
};
use std::time::Duration;

mod crud;
mod forms;
mod groups;
mod lookups;
pub mod models;
mod schema;
mod sql_functions;
mod submissions;
#[cfg(test)]
mod tests;

const CREATE_SCHEMA: &str =
    include_str!("../migrations/2025-01-01-000000_create_formdesk/up.sql");

/// Serializes concurrent migrators (several app instances or test processes).
const MIGRATION_LOCK_KEY: i64 = 0x666f_726d_6465_736b;

type Connection = mobc::Connection<AsyncDieselConnectionManager<AsyncPgConnection>>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("getting connection from pool: {0}")]
    GetConnectionPool(#[from] mobc::Error<diesel_async::pooled_connection::PoolError>),
    #[error("result failure: {0}")]
    Result(diesel::result::Error),
    #[error("constraint violation: {0}")]
    Constraint(String),
    #[error("{0}")]
    Validation(String),
    #[error("Not Found")]
    NotFound,
}

impl From<diesel::result::Error> for Error {
    fn from(err: diesel::result::Error) -> Self {
        use diesel::result::DatabaseErrorKind;
        match err {
            diesel::result::Error::NotFound => Self::NotFound,
            diesel::result::Error::DatabaseError(
                DatabaseErrorKind::UniqueViolation
                | DatabaseErrorKind::ForeignKeyViolation
                | DatabaseErrorKind::NotNullViolation
                | DatabaseErrorKind::CheckViolation,
                info,
            ) => Self::Constraint(info.message().to_owned()),
            err => Self::Result(err),
        }
    }
}

/// Handle to the form database. Cheap to clone; every clone shares one pool.
#[derive(Clone, Debug)]
pub struct Store {
    pool: Pool<AsyncPgConnection>,
}

#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    db_url: String,
    max_open: u64,
    max_idle: u64,
    #[serde(with = "humantime_serde", default)]
    max_lifetime: Option<Duration>,
    #[serde(with = "humantime_serde", default)]
    max_idle_lifetime: Option<Duration>,
    #[serde(with = "humantime_serde")]
    timeout_for_get: Duration,
    #[serde(default = "default_run_migrations")]
    run_migrations: bool,
}

fn default_run_migrations() -> bool {
    true
}

/// Builds the pool and, unless disabled, brings the schema up to date.
///
/// No connection is opened when `run-migrations` is false; the pool connects
/// on first use.
pub async fn create(config: &Config) -> Result<Store, Error> {
    let store = Store {
        pool: create_pool(config),
    };
    if config.run_migrations {
        store.migrate().await?;
    }
    Ok(store)
}

fn create_pool(config: &Config) -> Pool<AsyncPgConnection> {
    let builder = Builder::new()
        .max_open(config.max_open)
        .max_idle(config.max_idle)
        .max_lifetime(
            config
                .max_lifetime
                .map(|v| v.max(Duration::from_secs(3600))),
        )
        .max_idle_lifetime(
            config
                .max_idle_lifetime
                .map(|v| v.max(Duration::from_secs(900))),
        )
        .get_timeout(Some(config.timeout_for_get.max(Duration::from_secs(5))));
    let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(&config.db_url);
    builder.build(manager)
}

impl Store {
    async fn connection(&self) -> Result<Connection, Error> {
        self.pool.get().await.map_err(Into::into)
    }

    /// Creates the `formdesk` schema objects that do not exist yet.
    #[tracing::instrument(skip(self))]
    pub async fn migrate(&self) -> Result<(), Error> {
        let script =
            format!("SELECT pg_advisory_xact_lock({MIGRATION_LOCK_KEY});\n{CREATE_SCHEMA}");
        self.connection()
            .await?
            .transaction(|conn| async move { conn.batch_execute(&script).await }.scope_boxed())
            .await
            .map_err(|err| {
                tracing::error!("schema migration failed: {err}");
                Error::from(err)
            })?;
        tracing::info!("schema migration complete");
        Ok(())
    }
}
