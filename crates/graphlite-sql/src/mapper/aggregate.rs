use super::SqlMapper;
use crate::{Comma, JsonObject, Literal, ToSql};

use graphlite_core::schema::ColumnType;
use graphlite_core::stmt::FieldInfo;
use graphlite_core::{Error, Result};
use serde_json::Value;

impl<'a> SqlMapper<'a> {
    /// A `json_object(...)` of the requested aggregate functions.
    pub fn aggregate(&mut self, fields: &[FieldInfo]) -> Result<String> {
        let mut object = JsonObject::default();

        for field in fields {
            let expr = match field.name.as_str() {
                "__typename" => self.typename("aggregate_fields"),
                "count" => self.count(field)?,
                "min" | "max" => {
                    self.per_column(field, "min_max_fields", ColumnType::is_sortable)?
                }
                "avg" | "sum" => self.per_column(field, "avg_sum_fields", ColumnType::is_numeric)?,
                name => {
                    return Err(Error::unsupported_feature(format!(
                        "aggregate function `{name}`"
                    )))
                }
            };

            object.add(&field.alias, expr)?;
        }

        Ok(object.into_sql())
    }

    fn count(&mut self, field: &FieldInfo) -> Result<String> {
        let mut columns = vec![];
        let mut distinct = false;

        for (name, value) in &field.arguments {
            match (name.as_str(), value) {
                (_, Value::Null) => {}
                ("columns", Value::Array(items)) => {
                    for item in items {
                        let name = item.as_str().ok_or_else(|| {
                            Error::invalid_statement(format!("`count.columns` must list column names, got {item}"))
                        })?;
                        let column = self.column(name)?;
                        columns.push(self.column_ref(column));
                    }
                }
                ("columns", Value::String(name)) => {
                    let column = self.column(name)?;
                    columns.push(self.column_ref(column));
                }
                ("distinct", Value::Bool(value)) => distinct = *value,
                _ => {
                    return Err(Error::invalid_statement(format!(
                        "invalid argument `{name}` on `count`"
                    )))
                }
            }
        }

        let distinct = if distinct { "DISTINCT " } else { "" };
        let mut sql = String::new();

        // `count` takes a single argument, so several columns are counted as
        // one array value.
        match columns.len() {
            0 => fmt!(&mut sql, "count(*)"),
            1 => fmt!(&mut sql, "count(" distinct Comma(columns) ")"),
            _ => fmt!(&mut sql, "count(" distinct "json_array(" Comma(columns) "))"),
        }

        Ok(sql)
    }

    /// `json_object('col', fn("alias"."col"), ...)` for `min`/`max`/`avg`/`sum`.
    fn per_column(
        &mut self,
        field: &FieldInfo,
        typename: &str,
        applies: fn(ColumnType) -> bool,
    ) -> Result<String> {
        let mut object = JsonObject::default();

        for sub in &field.subfields {
            if sub.name == "__typename" {
                object.add(&sub.alias, self.typename(typename))?;
                continue;
            }

            let column = self.column(&sub.name)?;
            if !applies(column.ty()) {
                return Err(Error::invalid_statement(format!(
                    "`{}` does not apply to {} column `{}`",
                    field.name,
                    column.ty(),
                    sub.name
                )));
            }

            let mut sql = String::new();
            fmt!(&mut sql, field.name.as_str() "(" self.column_ref(column) ")");
            object.add(&sub.alias, sql)?;
        }

        Ok(object.into_sql())
    }

    fn typename(&self, suffix: &str) -> String {
        let mut sql = String::new();
        fmt!(&mut sql, Literal(format!("{}_{suffix}", self.table.name)));
        sql
    }
}
