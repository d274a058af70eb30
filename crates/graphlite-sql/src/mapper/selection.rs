use super::{Scope, SqlMapper};
use crate::{Ident, JsonObject, Literal, ToSql};

use graphlite_core::schema::{Column, ColumnType};
use graphlite_core::stmt::{FieldInfo, SelectArgs};
use graphlite_core::{Error, Result};

impl<'a> SqlMapper<'a> {
    /// A `json_object(...)` expression holding every requested field, keyed
    /// by response alias.
    pub fn selections(&mut self, fields: &[FieldInfo]) -> Result<String> {
        let mut object = JsonObject::default();

        for field in fields {
            let expr = self.selection(field)?;
            object.add(&field.alias, expr)?;
        }

        Ok(object.into_sql())
    }

    fn selection(&mut self, field: &FieldInfo) -> Result<String> {
        if field.name == "__typename" {
            let mut sql = String::new();
            fmt!(&mut sql, Literal(self.table.name));
            return Ok(sql);
        }

        if let Some(column) = self.table.column(&field.name) {
            return self.column_selection(column, field);
        }

        let Some(relation) = self.table.relation(&field.name) else {
            return Err(Error::invalid_statement(format!(
                "unknown field `{}` on `{}`",
                field.name, self.table.name
            )));
        };

        if relation.is_object() {
            if let Some(name) = field.arguments.keys().next() {
                return Err(Error::invalid_statement(format!(
                    "unknown argument `{name}` on `{}`",
                    field.name
                )));
            }

            self.with_relation(&field.name, Scope::Select(&field.alias), |sub, join| {
                let selections = sub.selections(&field.subfields)?;

                // A scalar subquery drops the JSON subtype, so the object is
                // re-parsed with `json()`.
                let mut sql = String::new();
                fmt!(&mut sql, "json((SELECT " selections " FROM " sub.table_ref() " WHERE " join " LIMIT 1))");
                Ok(sql)
            })
        } else {
            self.with_relation(&field.name, Scope::Select(&field.alias), |sub, join| {
                let args = SelectArgs::parse(sub.schema(), sub.table(), field)?;
                let selections = sub.selections(&field.subfields)?;
                let tail = sub.select_tail(vec![join], &args)?;

                // Rows are filtered, ordered and paginated before aggregation.
                let mut sql = String::new();
                fmt!(&mut sql,
                    "json(coalesce((SELECT json_group_array(json(" Ident("value") ")) FROM (SELECT "
                    selections " AS " Ident("value") " FROM " sub.table_ref() tail
                    ")), json_array()))");
                Ok(sql)
            })
        }
    }

    fn column_selection(&mut self, column: Column<'a>, field: &FieldInfo) -> Result<String> {
        for name in field.arguments.keys() {
            if !(column.ty().is_json() && name == "path") {
                return Err(Error::invalid_statement(format!(
                    "unknown argument `{name}` on `{}`",
                    field.name
                )));
            }
        }

        let col = self.column_ref(column);
        let mut sql = String::new();

        match column.ty() {
            ColumnType::Boolean if column.config.is_nullable() => {
                fmt!(&mut sql, "json(iif(" col.as_str() " ISNULL, 'null', iif(" col.as_str() ", 'true', 'false')))");
            }
            ColumnType::Boolean => {
                fmt!(&mut sql, "json(iif(" col.as_str() ", 'true', 'false'))");
            }
            ColumnType::Json => match field.argument("path").and_then(|path| path.as_str()) {
                Some(path) => fmt!(&mut sql, "json(" col.as_str() " -> " Literal(path) ")"),
                None => fmt!(&mut sql, "json(" col.as_str() ")"),
            },
            ty => {
                fmt!(&mut sql, "CAST(" col.as_str() " AS " ty.sql_cast_type() ")");
            }
        }

        Ok(sql)
    }
}
