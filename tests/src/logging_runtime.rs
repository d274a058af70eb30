use graphlite::async_trait;
use graphlite::driver::{CompiledBatch, CompiledQuery, MutationResult, Row, Runtime};
use graphlite::stmt::SqlValue;
use graphlite::Result;

use std::sync::{Arc, Mutex};

/// One statement that reached the database.
#[derive(Debug, Clone, PartialEq)]
pub struct Op {
    pub sql: String,
    pub params: Vec<SqlValue>,
}

/// A [`Runtime`] wrapper that records every statement it forwards.
#[derive(Debug)]
pub struct LoggingRuntime {
    inner: Box<dyn Runtime>,

    /// Shared with the test so it can inspect the executed SQL.
    ops_log: Arc<Mutex<Vec<Op>>>,
}

impl LoggingRuntime {
    pub fn new(inner: impl Runtime) -> LoggingRuntime {
        LoggingRuntime {
            inner: Box::new(inner),
            ops_log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn ops_log_handle(&self) -> Arc<Mutex<Vec<Op>>> {
        self.ops_log.clone()
    }

    fn log(&self, sql: &str, params: &[SqlValue]) {
        self.ops_log
            .lock()
            .expect("Failed to acquire ops log lock")
            .push(Op {
                sql: sql.to_string(),
                params: params.to_vec(),
            });
    }
}

#[async_trait]
impl Runtime for LoggingRuntime {
    async fn one(&self, sql: &str, params: &[SqlValue]) -> Result<Option<Row>> {
        self.log(sql, params);
        self.inner.one(sql, params).await
    }

    async fn all(&self, sql: &str, params: &[SqlValue]) -> Result<Vec<Row>> {
        self.log(sql, params);
        self.inner.all(sql, params).await
    }

    async fn mutate(&self, stmt: &CompiledQuery) -> Result<MutationResult> {
        self.log(&stmt.sql, &stmt.params);
        self.inner.mutate(stmt).await
    }

    async fn mutate_batch(&self, batch: &CompiledBatch) -> Result<Vec<MutationResult>> {
        for stmt in &batch.statements {
            self.log(&stmt.sql, &stmt.params);
        }
        self.inner.mutate_batch(batch).await
    }
}
