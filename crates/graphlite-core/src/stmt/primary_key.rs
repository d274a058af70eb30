use crate::schema::Table;
use crate::{Error, Result};
use serde_json::{Map, Value};

/// Primary key values addressing one row, in key column order.
#[derive(Debug, Clone, PartialEq)]
pub struct PrimaryKey {
    pub columns: Vec<(String, Value)>,
}

impl PrimaryKey {
    /// Reads every key column of `table` from `values`.
    ///
    /// Other entries of `values` are left for the caller to interpret.
    pub fn parse(table: Table<'_>, values: &Map<String, Value>) -> Result<PrimaryKey> {
        if !table.has_primary_key() {
            return Err(Error::invalid_statement(format!(
                "table `{}` has no primary key",
                table.name
            )));
        }

        let columns = table
            .primary_key()
            .map(|column| match values.get(column.name) {
                Some(value) if !value.is_null() => Ok((column.name.to_string(), value.clone())),
                _ => Err(Error::invalid_statement(format!(
                    "missing primary key column `{}` for `{}`",
                    column.name, table.name
                ))),
            })
            .collect::<Result<_>>()?;

        Ok(PrimaryKey { columns })
    }
}
