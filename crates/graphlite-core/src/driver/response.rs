use crate::stmt::SqlValue;
use crate::{Error, Result};
use indexmap::IndexMap;

/// A result row, keyed by column name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    columns: IndexMap<String, SqlValue>,
}

/// Outcome of one mutation statement.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MutationResult {
    pub affected_rows: u64,
    pub returning: Vec<Row>,
}

impl Row {
    pub fn new() -> Row {
        Row::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: SqlValue) {
        self.columns.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&SqlValue> {
        self.columns.get(name)
    }

    pub fn columns(&self) -> impl Iterator<Item = (&str, &SqlValue)> {
        self.columns.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Decodes the JSON text held in column `name`.
    pub fn json(&self, name: &str) -> Result<serde_json::Value> {
        match self.get(name) {
            Some(SqlValue::Text(text)) => serde_json::from_str(text).map_err(|err| {
                Error::from(err).context(Error::invalid_result(format!(
                    "column `{name}` is not valid JSON"
                )))
            }),
            Some(SqlValue::Null) => Ok(serde_json::Value::Null),
            Some(other) => Err(Error::invalid_result(format!(
                "column `{name}` holds {other:?}, expected JSON text"
            ))),
            None => Err(Error::invalid_result(format!("row has no `{name}` column"))),
        }
    }
}

impl FromIterator<(String, SqlValue)> for Row {
    fn from_iter<I: IntoIterator<Item = (String, SqlValue)>>(iter: I) -> Row {
        Row {
            columns: iter.into_iter().collect(),
        }
    }
}
