use super::{check_arguments, pk_predicate, to_map};
use crate::{Ident, JsonObject, Literal, SqlMapper, ToSql};

use graphlite_core::driver::CompiledQuery;
use graphlite_core::stmt::{FieldInfo, SelectArgs};
use graphlite_core::{Error, Result, Schema};

/// `SELECT <row> AS "value" FROM <table> ...` for a list query.
pub fn query(schema: &Schema, table: &str, root: &FieldInfo) -> Result<CompiledQuery> {
    let mut mapper = SqlMapper::new(schema, table)?;
    let args = SelectArgs::parse(schema, mapper.table(), root)?;

    let selections = mapper.selections(&root.subfields)?;
    let tail = mapper.select_tail(vec![], &args)?;

    let mut sql = String::new();
    fmt!(&mut sql, "SELECT " selections " AS " Ident("value") " FROM " mapper.table_ref() tail);
    Ok(mapper.finish(sql, false))
}

/// Selects the row whose primary key equals the field arguments.
pub fn query_by_pk(schema: &Schema, table: &str, root: &FieldInfo) -> Result<CompiledQuery> {
    let mut mapper = SqlMapper::new(schema, table)?;
    check_arguments(root, &[], &mapper, true)?;

    let selections = mapper.selections(&root.subfields)?;
    let predicate = pk_predicate(&mut mapper, &to_map(&root.arguments))?;

    let mut sql = String::new();
    fmt!(&mut sql, "SELECT " selections " AS " Ident("value") " FROM " mapper.table_ref() " WHERE " predicate);
    Ok(mapper.finish(sql, false))
}

/// Aggregates and nodes over the filtered, ordered and paginated rows.
///
/// The rows are selected in a derived table carrying the table's alias, so
/// aggregate functions and node selections see only the requested page.
pub fn query_aggregate(schema: &Schema, table: &str, root: &FieldInfo) -> Result<CompiledQuery> {
    let mut mapper = SqlMapper::new(schema, table)?;
    let args = SelectArgs::parse(schema, mapper.table(), root)?;

    let mut object = JsonObject::default();

    for field in &root.subfields {
        let expr = match field.name.as_str() {
            "aggregate" => mapper.aggregate(&field.subfields)?,
            "nodes" => {
                let selections = mapper.selections(&field.subfields)?;
                format!("coalesce(json_group_array({selections}), json_array())")
            }
            "__typename" => {
                let mut sql = String::new();
                fmt!(&mut sql, Literal(format!("{}_aggregate", mapper.table().name)));
                sql
            }
            name => {
                return Err(Error::invalid_statement(format!(
                    "unknown field `{name}` on `{}`",
                    root.name
                )))
            }
        };

        object.add(&field.alias, expr)?;
    }

    let object = object.into_sql();
    let tail = mapper.select_tail(vec![], &args)?;
    let dbname = mapper.table().dbname();

    let mut sql = String::new();
    fmt!(&mut sql,
        "SELECT " object " AS " Ident("value") " FROM (SELECT * FROM " Ident(dbname) tail
        ") AS " Ident(mapper.alias()));
    Ok(mapper.finish(sql, false))
}
