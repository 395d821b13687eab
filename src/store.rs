//! Startup bootstrap: make sure the target database and the resource tables exist, then hand out the pool.

use crate::config::ServiceConfig;
use crate::error::{AppError, ConfigError};
use crate::models::{Customer, Order, Resource};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{ConnectOptions, PgPool};
use std::str::FromStr;

/// Full startup sequence. Every step is fatal on failure and none is retried.
pub async fn connect(config: &ServiceConfig) -> Result<PgPool, AppError> {
    ensure_database_exists(&config.database_url).await?;
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await?;
    tracing::info!(max_connections = config.max_connections, "database pool ready");
    ensure_tables(&pool).await?;
    Ok(pool)
}

/// Connect to the `postgres` maintenance database on the same server and create the
/// database named in `database_url` if `pg_database` has no row for it.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = PgConnectOptions::from_str(&admin_url)
        .map_err(|e| ConfigError::DatabaseUrl(e.to_string()))?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if exists.0 {
        tracing::info!(database = %db_name, "database already exists");
    } else {
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
        tracing::info!(database = %db_name, "database created");
    }
    Ok(())
}

/// Create the customer and order tables, and add any column missing from an older shape.
pub async fn ensure_tables(pool: &PgPool) -> Result<(), AppError> {
    ensure_table::<Customer>(pool).await?;
    ensure_table::<Order>(pool).await?;
    Ok(())
}

async fn ensure_table<R: Resource>(pool: &PgPool) -> Result<(), AppError> {
    for ddl in table_ddl::<R>() {
        tracing::debug!(sql = %ddl, "ddl");
        sqlx::query(&ddl).execute(pool).await?;
    }
    tracing::info!(table = R::TABLE, "table ready");
    Ok(())
}

pub(crate) fn table_ddl<R: Resource>() -> Vec<String> {
    let table = quote_ident(R::TABLE);
    let mut col_defs = vec![format!("{} BIGSERIAL PRIMARY KEY", quote_ident("id"))];
    col_defs.extend(
        R::COLUMNS
            .iter()
            .map(|c| format!("{} {}", quote_ident(c.name), c.pg_type)),
    );
    let mut out = vec![format!(
        "CREATE TABLE IF NOT EXISTS {} ({})",
        table,
        col_defs.join(", ")
    )];
    out.extend(R::COLUMNS.iter().map(|c| {
        format!(
            "ALTER TABLE {} ADD COLUMN IF NOT EXISTS {} {}",
            table,
            quote_ident(c.name),
            c.pg_type
        )
    }));
    out
}

/// Split a connection URL into (URL of the `postgres` database on the same server, target database name).
fn parse_db_name_from_url(url: &str) -> Result<(String, String), AppError> {
    let scheme_end = url.find("://").map(|i| i + 3).unwrap_or(0);
    let path_start = url
        .get(scheme_end..)
        .and_then(|rest| rest.find('/'))
        .map(|i| scheme_end + i + 1)
        .ok_or_else(|| ConfigError::DatabaseUrl("no database path".into()))?;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let (db_name, query) = match path_and_query.split_once('?') {
        Some((name, q)) => (name.trim(), Some(q)),
        None => (path_and_query.trim(), None),
    };
    let base = url.get(..path_start).unwrap_or(url);
    let admin_url = match query {
        Some(q) => format!("{}postgres?{}", base, q),
        None => format!("{}postgres", base),
    };
    Ok((admin_url, db_name.to_string()))
}

/// Quote an identifier for PostgreSQL.
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
