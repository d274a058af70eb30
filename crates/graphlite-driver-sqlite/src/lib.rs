mod value;
use value::Value;

use graphlite_core::{
    async_trait,
    driver::{CompiledBatch, CompiledQuery, MutationResult, Row, Runtime},
    err,
    stmt::SqlValue,
    Error, Result, Schema,
};
use rusqlite::Connection;
use std::{
    path::Path,
    sync::{Mutex, MutexGuard},
};
use url::Url;

/// A [`Runtime`] over one SQLite connection.
///
/// Statements are serialized through a mutex; SQLite allows one writer at a
/// time anyway, and an in-memory database only exists for its connection.
#[derive(Debug)]
pub struct Sqlite {
    connection: Mutex<Connection>,
}

impl Sqlite {
    /// Opens the database named by a connection URL: `sqlite::memory:` or
    /// `sqlite:<path>`.
    pub fn new(url: impl Into<String>) -> Result<Sqlite> {
        let url_str = url.into();
        let url = Url::parse(&url_str).map_err(Error::driver_operation_failed)?;

        if url.scheme() != "sqlite" {
            return Err(Error::invalid_connection_url(format!(
                "connection URL does not have a `sqlite` scheme; url={url_str}"
            )));
        }

        if url.path() == ":memory:" {
            Sqlite::in_memory()
        } else {
            Sqlite::open(url.path())
        }
    }

    /// Creates an in-memory database.
    pub fn in_memory() -> Result<Sqlite> {
        let connection = Connection::open_in_memory().map_err(Error::driver_operation_failed)?;
        Ok(Sqlite::from_connection(connection))
    }

    /// Opens (or creates) the database file at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Sqlite> {
        let connection = Connection::open(path).map_err(Error::driver_operation_failed)?;
        Ok(Sqlite::from_connection(connection))
    }

    fn from_connection(connection: Connection) -> Sqlite {
        Sqlite {
            connection: Mutex::new(connection),
        }
    }

    /// Creates every table of `schema` that does not exist yet.
    pub fn push_schema(&self, schema: &Schema) -> Result<()> {
        let connection = self.lock()?;

        for table in schema.tables() {
            let sql = graphlite_sql::create_table(table);
            log::trace!("create table; sql={sql}");

            connection
                .execute(&sql, [])
                .map_err(Error::driver_operation_failed)?;
        }

        Ok(())
    }

    /// Runs semicolon-separated SQL without parameters, e.g. fixture data.
    pub fn execute_batch(&self, sql: &str) -> Result<()> {
        self.lock()?
            .execute_batch(sql)
            .map_err(Error::driver_operation_failed)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.connection
            .lock()
            .map_err(|_| err!("sqlite connection mutex is poisoned"))
    }
}

#[async_trait]
impl Runtime for Sqlite {
    async fn one(&self, sql: &str, params: &[SqlValue]) -> Result<Option<Row>> {
        let connection = self.lock()?;
        Ok(query(&connection, sql, params)?.into_iter().next())
    }

    async fn all(&self, sql: &str, params: &[SqlValue]) -> Result<Vec<Row>> {
        let connection = self.lock()?;
        query(&connection, sql, params)
    }

    async fn mutate(&self, stmt: &CompiledQuery) -> Result<MutationResult> {
        if stmt.is_noop() {
            return Ok(MutationResult::default());
        }

        let mut connection = self.lock()?;
        let tx = connection
            .transaction()
            .map_err(Error::driver_operation_failed)?;

        // Dropping the transaction on error rolls it back.
        let result = execute(&tx, stmt).inspect_err(|err| {
            log::warn!("rolling back mutation; err={err}");
        })?;

        tx.commit().map_err(Error::driver_operation_failed)?;
        Ok(result)
    }

    async fn mutate_batch(&self, batch: &CompiledBatch) -> Result<Vec<MutationResult>> {
        let mut connection = self.lock()?;
        let tx = connection
            .transaction()
            .map_err(Error::driver_operation_failed)?;

        let mut results = Vec::with_capacity(batch.statements.len());

        for (index, stmt) in batch.statements.iter().enumerate() {
            let result = execute(&tx, stmt).inspect_err(|err| {
                log::warn!("rolling back batch; statement={index}; err={err}");
            })?;

            results.push(result);
        }

        tx.commit().map_err(Error::driver_operation_failed)?;
        Ok(results)
    }
}

fn query(connection: &Connection, sql: &str, params: &[SqlValue]) -> Result<Vec<Row>> {
    log::trace!("query; sql={sql}; params={}", params.len());

    let mut stmt = connection
        .prepare_cached(sql)
        .map_err(Error::driver_operation_failed)?;

    let names: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();

    let mut rows = stmt
        .query(rusqlite::params_from_iter(params.iter().map(Value)))
        .map_err(Error::driver_operation_failed)?;

    let mut ret = vec![];

    while let Some(row) = rows.next().map_err(Error::driver_operation_failed)? {
        let mut item = Row::new();

        for (index, name) in names.iter().enumerate() {
            let value = Value::from_sql(row, index).map_err(Error::driver_operation_failed)?;
            item.insert(name.clone(), value);
        }

        ret.push(item);
    }

    Ok(ret)
}

/// Runs one mutation statement on an open transaction.
///
/// No-op statements are skipped: running them would leave `changes()`
/// reporting the previous statement's count.
fn execute(connection: &Connection, stmt: &CompiledQuery) -> Result<MutationResult> {
    if stmt.is_noop() {
        return Ok(MutationResult::default());
    }

    if stmt.returning {
        let returning = query(connection, &stmt.sql, &stmt.params)?;

        return Ok(MutationResult {
            affected_rows: connection.changes() as u64,
            returning,
        });
    }

    log::trace!("execute; sql={}; params={}", stmt.sql, stmt.params.len());

    let count = connection
        .prepare_cached(&stmt.sql)
        .and_then(|mut prepared| {
            prepared.execute(rusqlite::params_from_iter(stmt.params.iter().map(Value)))
        })
        .map_err(Error::driver_operation_failed)?;

    Ok(MutationResult {
        affected_rows: count as u64,
        returning: vec![],
    })
}
