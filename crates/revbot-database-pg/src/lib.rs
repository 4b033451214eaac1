//! PostgreSQL storage for revbot.
//!
//! Every [`PostgresTransaction`] wraps a single `sqlx` transaction, so the
//! store ports it implements are applied atomically on commit.

mod fields;
mod postgres;
mod row;
mod utils;

use std::{ops::Deref, time::Duration};

use revbot_config::Config;
use revbot_database_interface::{DatabaseError, Result};
use sqlx::{migrate::Migrate, postgres::PgPoolOptions, Acquire};
use tracing::info;

pub use postgres::{PostgresDb, PostgresTransaction};
pub use utils::{
    create_db_pool_connection, create_db_url, get_base_url, setup_test_db, teardown_test_db,
};

/// Connection pool shared by the server workers.
pub type DbPool = sqlx::postgres::PgPool;

/// Applies the embedded migrations, status catalog included.
pub async fn run_migrations<'a, A>(migrator: A) -> Result<()>
where
    A: Acquire<'a>,
    <A::Connection as Deref>::Target: Migrate,
{
    info!("Applying revbot migrations");

    sqlx::migrate!("./migrations")
        .run(migrator)
        .await
        .map_err(|e| DatabaseError::ImplementationError { source: e.into() })
}

/// Opens the pool described by the `REVBOT_DATABASE_PG_*` settings.
pub async fn establish_pool_connection(config: &Config) -> Result<DbPool> {
    let pg = &config.database.pg;
    info!(
        pool_size = pg.pool_size,
        connection_timeout = pg.connection_timeout,
        "Connecting to PostgreSQL"
    );

    PgPoolOptions::new()
        .acquire_timeout(Duration::from_secs(pg.connection_timeout.into()))
        .max_connections(pg.pool_size)
        .connect(&pg.url)
        .await
        .map_err(|e| DatabaseError::ImplementationError { source: e.into() })
}
