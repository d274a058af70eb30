use crate::stmt::SqlValue;

/// Statement emitted when a mutation has nothing to do.
const NOOP: &str = "SELECT 1 WHERE 0";

/// One SQL statement with its bound parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledQuery {
    pub sql: String,

    /// Values for `?1`, `?2`, ... in order.
    pub params: Vec<SqlValue>,

    /// Whether the statement has a `RETURNING` clause to scan.
    pub returning: bool,
}

/// Independent statements executed in one transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledBatch {
    pub statements: Vec<CompiledQuery>,
    pub returning: bool,
}

impl CompiledQuery {
    pub fn new(sql: String, params: Vec<SqlValue>, returning: bool) -> CompiledQuery {
        CompiledQuery {
            sql,
            params,
            returning,
        }
    }

    /// A statement that matches no rows and changes nothing.
    pub fn noop() -> CompiledQuery {
        CompiledQuery::new(NOOP.to_string(), vec![], false)
    }

    pub fn is_noop(&self) -> bool {
        self.sql == NOOP
    }
}
