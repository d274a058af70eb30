mod compiled;
pub use compiled::{CompiledBatch, CompiledQuery};

mod response;
pub use response::{MutationResult, Row};

use crate::{async_trait, stmt::SqlValue};

use std::fmt::Debug;

/// Executes compiled SQL.
///
/// The compiler never runs SQL itself; a database adapter implements this
/// trait and owns transactions, cancellation and timeouts.
#[async_trait]
pub trait Runtime: Debug + Send + Sync + 'static {
    /// Runs a query expected to return at most one row.
    async fn one(&self, sql: &str, params: &[SqlValue]) -> crate::Result<Option<Row>>;

    /// Runs a query and returns every row.
    async fn all(&self, sql: &str, params: &[SqlValue]) -> crate::Result<Vec<Row>>;

    /// Runs one mutation in a transaction.
    ///
    /// Returned rows are collected only when `stmt.returning` is set. A no-op
    /// statement reports zero affected rows without touching the database.
    async fn mutate(&self, stmt: &CompiledQuery) -> crate::Result<MutationResult>;

    /// Runs every statement of `batch` in order inside one transaction.
    ///
    /// If any statement fails the whole batch is rolled back.
    async fn mutate_batch(&self, batch: &CompiledBatch) -> crate::Result<Vec<MutationResult>>;
}
