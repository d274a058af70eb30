use super::{mutation_response, returning_clause};
use crate::{ddl, Comma, Ident, Literal, SqlMapper, ToSql};

use graphlite_core::driver::CompiledQuery;
use graphlite_core::stmt::{FieldInfo, InsertObjects, OnConflict, SqlValue};
use graphlite_core::{Error, Result, Schema};

/// Inserts a batch of rows passed as one JSON array parameter.
///
/// Each row of the array is expanded with `json_each` and every column is
/// extracted by key. A column missing from a row takes its default, or
/// `NULL` when it has none.
pub fn insert(schema: &Schema, table: &str, root: &FieldInfo) -> Result<CompiledQuery> {
    let mut mapper = SqlMapper::new(schema, table)?;
    let mut objects = None;
    let mut on_conflict = vec![];

    for (name, value) in &root.arguments {
        match name.as_str() {
            "objects" => objects = Some(InsertObjects::parse(mapper.table(), value)?),
            "on_conflict" => on_conflict = OnConflict::parse(schema, mapper.table(), value)?,
            _ => {
                return Err(Error::invalid_statement(format!(
                    "unknown argument `{name}` on `{}`",
                    root.name
                )))
            }
        }
    }

    let Some(objects) = objects else {
        return Err(Error::invalid_statement(format!(
            "`{}` requires `objects`",
            root.name
        )));
    };

    if objects.rows.is_empty() {
        return Ok(CompiledQuery::noop());
    }

    if objects.columns.is_empty() {
        return Err(Error::invalid_statement(format!(
            "`{}` rows set no columns",
            root.name
        )));
    }

    let returning = mutation_response(root)?;

    let mut columns = vec![];
    let mut extracts = vec![];

    for name in &objects.columns {
        let column = mapper.column(name)?;

        // A JSON `null` stores SQL NULL, as `insert_one` binds it.
        let mut value = String::new();
        if column.ty().is_json() {
            fmt!(&mut value, "nullif(value -> " Literal(name) ", 'null')");
        } else {
            fmt!(&mut value, "value ->> " Literal(name));
        }

        let extract = match ddl::column_default(column) {
            Some(default) => {
                let path = format!("$.{name}");
                let mut sql = String::new();
                fmt!(&mut sql,
                    "CASE WHEN json_type(value, " Literal(&path) ") ISNULL THEN (" default
                    ") ELSE " value " END");
                sql
            }
            None => value,
        };

        columns.push(Ident(column.dbname()));
        extracts.push(extract);
    }

    let rows = mapper.bind(SqlValue::json(&objects.to_json()));
    let dbname = mapper.table().dbname();

    let mut sql = String::new();
    fmt!(&mut sql,
        "INSERT INTO " Ident(dbname) " (" Comma(columns) ") SELECT " Comma(extracts)
        " FROM json_each(" rows ")");

    if !on_conflict.is_empty() {
        // Without a WHERE clause, SQLite would read `ON` as a join constraint.
        let clause = mapper.on_conflict(&on_conflict)?;
        fmt!(&mut sql, " WHERE true" clause);
    }

    let returning = returning_clause(&mut mapper, returning.as_deref())?;
    let has_returning = returning.is_some();
    fmt!(&mut sql, returning);

    Ok(mapper.finish(sql, has_returning))
}

/// Inserts a single row with inline placeholders and returns it.
pub fn insert_one(schema: &Schema, table: &str, root: &FieldInfo) -> Result<CompiledQuery> {
    let mut mapper = SqlMapper::new(schema, table)?;
    let mut object = None;
    let mut on_conflict = vec![];

    for (name, value) in &root.arguments {
        match name.as_str() {
            "object" if value.is_object() => {
                object = Some(InsertObjects::parse(mapper.table(), value)?)
            }
            "object" => {
                return Err(Error::invalid_statement(format!(
                    "`{}` expects a single `object`",
                    root.name
                )))
            }
            "on_conflict" => on_conflict = OnConflict::parse(schema, mapper.table(), value)?,
            _ => {
                return Err(Error::invalid_statement(format!(
                    "unknown argument `{name}` on `{}`",
                    root.name
                )))
            }
        }
    }

    let Some(row) = object.and_then(|objects| objects.rows.into_iter().next()) else {
        return Err(Error::invalid_statement(format!(
            "`{}` requires `object`",
            root.name
        )));
    };

    let dbname = mapper.table().dbname();
    let mut sql = String::new();

    if row.is_empty() {
        fmt!(&mut sql, "INSERT INTO " Ident(dbname) " DEFAULT VALUES");
    } else {
        let mut columns = vec![];
        let mut values = vec![];

        for (name, value) in &row {
            let column = mapper.column(name)?;

            let p = if column.ty().is_json() && !value.is_null() {
                mapper.bind(SqlValue::json(value))
            } else {
                mapper.bind(SqlValue::from_json(value))
            };

            columns.push(Ident(column.dbname()));
            values.push(p);
        }

        let clause = mapper.on_conflict(&on_conflict)?;
        fmt!(&mut sql,
            "INSERT INTO " Ident(dbname) " (" Comma(columns) ") VALUES (" Comma(values) ")" clause);
    }

    let selections = mapper.selections(&root.subfields)?;
    fmt!(&mut sql, " RETURNING " selections " AS " Ident("value"));

    Ok(mapper.finish(sql, true))
}
