use super::parse;
use crate::schema::{ColumnType, Table};
use crate::{Error, Result};
use indexmap::IndexMap;
use serde_json::Value;

/// One `column = expression` assignment of an update.
#[derive(Debug, Clone, PartialEq)]
pub enum Setter {
    Set {
        column: String,
        value: Value,
    },
    Inc {
        column: String,
        value: Value,
    },
    Append {
        column: String,
        value: Value,
    },
    Prepend {
        column: String,
        value: Value,
    },
    Patch {
        column: String,
        value: Value,
    },
    Remove {
        column: String,
        paths: Vec<String>,
    },
    Path {
        op: PathMutation,
        column: String,
        path: String,
        value: Value,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathMutation {
    Set,
    Insert,
    Replace,
}

/// Arguments of an update that are not setters.
const UPDATE_ARGUMENTS: &[&str] = &["where", "pk_columns"];

impl Setter {
    /// Collects the setters of an update, in argument order.
    pub fn parse_all(table: Table<'_>, arguments: &IndexMap<String, Value>) -> Result<Vec<Setter>> {
        let mut setters = vec![];

        for (key, value) in arguments {
            if UPDATE_ARGUMENTS.contains(&key.as_str()) || value.is_null() {
                continue;
            }

            for (column, value) in parse::object(value, key)? {
                if value.is_null() && key != "_set" {
                    continue;
                }

                let ty = table
                    .column(column)
                    .ok_or_else(|| {
                        Error::invalid_statement(format!(
                            "unknown column `{column}` in `{key}` on `{}`",
                            table.name
                        ))
                    })?
                    .ty();

                setters.push(Setter::parse(key, ty, column.clone(), value)?);
            }
        }

        Ok(setters)
    }

    fn parse(key: &str, ty: ColumnType, column: String, value: &Value) -> Result<Setter> {
        let require = |applies: bool| {
            if applies {
                Ok(())
            } else {
                Err(Error::invalid_statement(format!(
                    "`{key}` does not apply to {ty} column `{column}`"
                )))
            }
        };

        let value = value.clone();

        Ok(match key {
            "_set" => Setter::Set { column, value },
            "_inc" => {
                require(ty.is_numeric())?;
                Setter::Inc { column, value }
            }
            "_append" => {
                require(ty.is_json())?;
                Setter::Append { column, value }
            }
            "_prepend" => {
                require(ty.is_json())?;
                Setter::Prepend { column, value }
            }
            "_patch" => {
                require(ty.is_json())?;
                Setter::Patch { column, value }
            }
            "_remove" => {
                require(ty.is_json())?;
                let paths = parse::strings(&value, "`_remove` path")?;
                Setter::Remove { column, paths }
            }
            "_set_path" | "_insert_path" | "_replace_path" => {
                require(ty.is_json())?;

                let op = match key {
                    "_set_path" => PathMutation::Set,
                    "_insert_path" => PathMutation::Insert,
                    _ => PathMutation::Replace,
                };

                let map = parse::object(&value, key)?;
                let path = map
                    .get("path")
                    .ok_or_else(|| Error::invalid_statement(format!("`{key}` requires a `path`")))?;

                Setter::Path {
                    op,
                    column,
                    path: parse::string(path, "path")?,
                    value: map.get("value").cloned().unwrap_or(Value::Null),
                }
            }
            _ => {
                return Err(Error::invalid_statement(format!(
                    "unknown update argument `{key}`"
                )))
            }
        })
    }

    pub fn column(&self) -> &str {
        match self {
            Setter::Set { column, .. }
            | Setter::Inc { column, .. }
            | Setter::Append { column, .. }
            | Setter::Prepend { column, .. }
            | Setter::Patch { column, .. }
            | Setter::Remove { column, .. }
            | Setter::Path { column, .. } => column,
        }
    }
}

impl PathMutation {
    pub fn sql_function(self) -> &'static str {
        match self {
            PathMutation::Set => "json_set",
            PathMutation::Insert => "json_insert",
            PathMutation::Replace => "json_replace",
        }
    }
}
