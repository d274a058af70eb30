use super::{check_arguments, mutation_response, pk_predicate, returning_clause, to_map};
use crate::{Ident, SqlMapper, ToSql};

use graphlite_core::driver::CompiledQuery;
use graphlite_core::stmt::{BoolExp, FieldInfo};
use graphlite_core::{Result, Schema};

/// Deletes every row matching `where`.
pub fn delete(schema: &Schema, table: &str, root: &FieldInfo) -> Result<CompiledQuery> {
    let mut mapper = SqlMapper::new(schema, table)?;
    check_arguments(root, &["where"], &mapper, false)?;
    let returning = mutation_response(root)?;

    let mut sql = String::new();
    fmt!(&mut sql, "DELETE FROM " Ident(mapper.table().dbname()));

    let filter = root
        .argument("where")
        .map(|value| BoolExp::parse(schema, mapper.table(), value))
        .transpose()?;

    if let Some(predicate) = mapper.predicate(filter.as_ref())? {
        fmt!(&mut sql, " WHERE " predicate);
    }

    let returning = returning_clause(&mut mapper, returning.as_deref())?;
    let has_returning = returning.is_some();
    fmt!(&mut sql, returning);

    Ok(mapper.finish(sql, has_returning))
}

/// Deletes the row addressed by the key arguments and returns it.
pub fn delete_by_pk(schema: &Schema, table: &str, root: &FieldInfo) -> Result<CompiledQuery> {
    let mut mapper = SqlMapper::new(schema, table)?;
    check_arguments(root, &[], &mapper, true)?;

    let predicate = pk_predicate(&mut mapper, &to_map(&root.arguments))?;
    let selections = mapper.selections(&root.subfields)?;

    let mut sql = String::new();
    fmt!(&mut sql,
        "DELETE FROM " Ident(mapper.table().dbname()) " WHERE " predicate
        " RETURNING " selections " AS " Ident("value"));

    Ok(mapper.finish(sql, true))
}
