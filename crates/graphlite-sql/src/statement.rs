mod delete;
pub use delete::{delete, delete_by_pk};

mod insert;
pub use insert::{insert, insert_one};

mod query;
pub use query::{query, query_aggregate, query_by_pk};

mod update;
pub use update::{update, update_by_pk, update_many};

use super::{Delimited, SqlMapper, ToSql};

use graphlite_core::stmt::{FieldInfo, PrimaryKey, SqlValue};
use graphlite_core::{Error, Result};
use indexmap::IndexMap;
use serde_json::{Map, Value};

/// Fields of a mutation response to return from each affected row.
///
/// `None` when `returning` is not selected. Several `returning` selections
/// are merged; the first field with a given alias wins.
fn mutation_response(root: &FieldInfo) -> Result<Option<Vec<FieldInfo>>> {
    let mut returning: Option<Vec<FieldInfo>> = None;

    for field in &root.subfields {
        match field.name.as_str() {
            "affected_rows" | "__typename" => {}
            "returning" => {
                let fields = returning.get_or_insert_with(Vec::new);

                for sub in &field.subfields {
                    if !fields.iter().any(|existing| existing.alias == sub.alias) {
                        fields.push(sub.clone());
                    }
                }
            }
            name => {
                return Err(Error::invalid_statement(format!(
                    "unknown field `{name}` on `{}`",
                    root.name
                )))
            }
        }
    }

    Ok(returning)
}

/// ` RETURNING <selections> AS "value"`, or nothing for an empty selection.
fn returning_clause(mapper: &mut SqlMapper<'_>, fields: Option<&[FieldInfo]>) -> Result<Option<String>> {
    match fields {
        Some(fields) if !fields.is_empty() => {
            let selections = mapper.selections(fields)?;
            Ok(Some(format!(" RETURNING {selections} AS \"value\"")))
        }
        _ => Ok(None),
    }
}

/// Key equalities addressing one row.
fn pk_predicate(mapper: &mut SqlMapper<'_>, values: &Map<String, Value>) -> Result<String> {
    let pk = PrimaryKey::parse(mapper.table(), values)?;
    let mut conds = vec![];

    for (name, value) in &pk.columns {
        let column = mapper.column(name)?;
        let lhs = mapper.column_ref(column);
        let p = mapper.bind(SqlValue::from_json(value));

        let mut sql = String::new();
        fmt!(&mut sql, lhs " = " p);
        conds.push(sql);
    }

    let mut sql = String::new();
    fmt!(&mut sql, Delimited(conds, " AND "));
    Ok(sql)
}

/// Rejects arguments outside `allowed` and primary key columns.
fn check_arguments(root: &FieldInfo, allowed: &[&str], mapper: &SqlMapper<'_>, pk_args: bool) -> Result<()> {
    for name in root.arguments.keys() {
        let is_pk = pk_args && mapper.table().info.pk_columns.iter().any(|pk| pk == name);

        if !is_pk && !allowed.contains(&name.as_str()) {
            return Err(Error::invalid_statement(format!(
                "unknown argument `{name}` on `{}`",
                root.name
            )));
        }
    }

    Ok(())
}

fn to_map(arguments: &IndexMap<String, Value>) -> Map<String, Value> {
    arguments
        .iter()
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect()
}
