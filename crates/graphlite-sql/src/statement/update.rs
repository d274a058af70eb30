use super::{mutation_response, pk_predicate, returning_clause};
use crate::{Comma, Ident, SqlMapper, ToSql};

use graphlite_core::driver::{CompiledBatch, CompiledQuery};
use graphlite_core::stmt::{BoolExp, FieldInfo, Setter};
use graphlite_core::{Error, Result, Schema};
use indexmap::IndexMap;
use serde_json::Value;

/// Which rows an update touches.
enum Target<'v> {
    Filter(Option<&'v Value>),
    PrimaryKey(&'v Value),
}

/// Updates every row matching `where`.
pub fn update(schema: &Schema, table: &str, root: &FieldInfo) -> Result<CompiledQuery> {
    let mapper = SqlMapper::new(schema, table)?;
    let returning = mutation_response(root)?;

    let target = Target::Filter(root.argument("where"));
    compile(mapper, &root.arguments, target, returning.as_deref())
}

/// Updates the row addressed by `pk_columns` and returns it.
pub fn update_by_pk(schema: &Schema, table: &str, root: &FieldInfo) -> Result<CompiledQuery> {
    let mapper = SqlMapper::new(schema, table)?;

    let Some(pk) = root.argument("pk_columns") else {
        return Err(Error::invalid_statement(format!(
            "`{}` requires `pk_columns`",
            root.name
        )));
    };

    compile(
        mapper,
        &root.arguments,
        Target::PrimaryKey(pk),
        Some(root.subfields.as_slice()),
    )
}

/// One update statement per `updates` entry, run in order.
///
/// The batch returns rows when the response selects `returning` at all.
pub fn update_many(schema: &Schema, table: &str, root: &FieldInfo) -> Result<CompiledBatch> {
    let base = SqlMapper::new(schema, table)?;
    let returning = mutation_response(root)?;

    let mut statements = vec![];

    for (name, value) in &root.arguments {
        if name != "updates" {
            return Err(Error::invalid_statement(format!(
                "unknown argument `{name}` on `{}`",
                root.name
            )));
        }

        let entries = match value {
            Value::Array(entries) => entries.iter().collect(),
            Value::Null => vec![],
            entry => vec![entry],
        };

        for entry in entries {
            let Value::Object(entry) = entry else {
                return Err(Error::invalid_statement(format!(
                    "`{}` entries must be objects",
                    root.name
                )));
            };

            let arguments: IndexMap<String, Value> = entry
                .iter()
                .map(|(name, value)| (name.clone(), value.clone()))
                .collect();

            let target = Target::Filter(arguments.get("where").filter(|filter| !filter.is_null()));
            let statement = compile(base.clone(), &arguments, target, returning.as_deref())?;
            statements.push(statement);
        }
    }

    Ok(CompiledBatch {
        statements,
        returning: returning.is_some(),
    })
}

fn compile(
    mut mapper: SqlMapper<'_>,
    arguments: &IndexMap<String, Value>,
    target: Target<'_>,
    returning: Option<&[FieldInfo]>,
) -> Result<CompiledQuery> {
    let setters = Setter::parse_all(mapper.table(), arguments)?;

    if setters.is_empty() {
        return Ok(CompiledQuery::noop());
    }

    let assignments = mapper.setters(&setters)?;
    let dbname = mapper.table().dbname();

    let mut sql = String::new();
    fmt!(&mut sql, "UPDATE " Ident(dbname) " SET " Comma(assignments));

    let predicate = match target {
        Target::Filter(None) => None,
        Target::Filter(Some(value)) => {
            let filter = BoolExp::parse(mapper.schema(), mapper.table(), value)?;
            mapper.predicate(Some(&filter))?
        }
        Target::PrimaryKey(value) => {
            let Value::Object(values) = value else {
                return Err(Error::invalid_statement("`pk_columns` must be an object"));
            };
            Some(pk_predicate(&mut mapper, values)?)
        }
    };

    if let Some(predicate) = predicate {
        fmt!(&mut sql, " WHERE " predicate);
    }

    let returning = returning_clause(&mut mapper, returning)?;
    let has_returning = returning.is_some();
    fmt!(&mut sql, returning);

    Ok(mapper.finish(sql, has_returning))
}
