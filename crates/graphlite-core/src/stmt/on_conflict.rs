use super::{parse, BoolExp};
use crate::schema::{Schema, Table};
use crate::{Error, Result};
use serde_json::Value;

/// One `<table>_on_conflict` entry.
#[derive(Debug, Clone, PartialEq)]
pub struct OnConflict {
    pub target: Option<ConflictTarget>,

    /// Columns overwritten from the rejected row. Empty means `DO NOTHING`.
    pub update_columns: Vec<String>,

    /// Condition for the update.
    pub filter: Option<BoolExp>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConflictTarget {
    pub columns: Vec<String>,

    /// Predicate of the partial index the conflict targets.
    pub filter: Option<BoolExp>,
}

impl OnConflict {
    /// Parses an `on_conflict` argument, a single entry or a list of them.
    pub fn parse(schema: &Schema, table: Table<'_>, value: &Value) -> Result<Vec<OnConflict>> {
        parse::list(value)
            .map(|entry| OnConflict::parse_one(schema, table, entry))
            .collect()
    }

    fn parse_one(schema: &Schema, table: Table<'_>, value: &Value) -> Result<OnConflict> {
        let mut on_conflict = OnConflict {
            target: None,
            update_columns: vec![],
            filter: None,
        };

        for (key, value) in parse::object(value, "on_conflict")? {
            if value.is_null() {
                continue;
            }

            match key.as_str() {
                "target" => {
                    let mut target = ConflictTarget {
                        columns: vec![],
                        filter: None,
                    };

                    for (key, value) in parse::object(value, "conflict target")? {
                        if value.is_null() {
                            continue;
                        }

                        match key.as_str() {
                            "columns" => target.columns = columns(table, value)?,
                            "where" => target.filter = Some(BoolExp::parse(schema, table, value)?),
                            _ => return Err(unknown(key, "conflict_target", table)),
                        }
                    }

                    on_conflict.target = Some(target);
                }
                "update_columns" => on_conflict.update_columns = columns(table, value)?,
                "where" => on_conflict.filter = Some(BoolExp::parse(schema, table, value)?),
                _ => return Err(unknown(key, "on_conflict", table)),
            }
        }

        Ok(on_conflict)
    }
}

fn columns(table: Table<'_>, value: &Value) -> Result<Vec<String>> {
    let columns = parse::strings(value, "column name")?;

    for column in &columns {
        if table.column(column).is_none() {
            return Err(Error::invalid_statement(format!(
                "unknown column `{column}` on `{}`",
                table.name
            )));
        }
    }

    Ok(columns)
}

fn unknown(key: &str, what: &str, table: Table<'_>) -> Error {
    Error::invalid_statement(format!("unknown field `{key}` in `{}_{what}`", table.name))
}
