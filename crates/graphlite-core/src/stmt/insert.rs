use super::parse;
use crate::schema::Table;
use crate::{Error, Result};
use serde_json::{Map, Value};

/// Rows of an insert, validated against the table.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertObjects {
    /// Union of the keys of every row, in first-seen order.
    pub columns: Vec<String>,

    pub rows: Vec<Map<String, Value>>,
}

impl InsertObjects {
    /// Parses an `objects`/`object` argument: one row or a list of rows.
    pub fn parse(table: Table<'_>, value: &Value) -> Result<InsertObjects> {
        let mut columns: Vec<String> = vec![];
        let mut rows = vec![];

        for row in parse::list(value) {
            let row = parse::object(row, "insert row")?;

            for key in row.keys() {
                if table.column(key).is_none() {
                    return Err(if table.relation(key).is_some() {
                        Error::unsupported_feature(format!(
                            "inserting through relation `{}.{key}`",
                            table.name
                        ))
                    } else {
                        Error::invalid_statement(format!(
                            "unknown column `{key}` in `{}_insert_input`",
                            table.name
                        ))
                    });
                }

                if !columns.contains(key) {
                    columns.push(key.clone());
                }
            }

            rows.push(row.clone());
        }

        Ok(InsertObjects { columns, rows })
    }

    /// All rows as one JSON array.
    pub fn to_json(&self) -> Value {
        Value::Array(self.rows.iter().cloned().map(Value::Object).collect())
    }
}
