use super::{parse, ComparisonExp};
use crate::schema::{Schema, Table};
use crate::{Error, Result};
use serde_json::Value;

/// A parsed `<table>_bool_exp`.
#[derive(Debug, Clone, PartialEq)]
pub enum BoolExp {
    And(Vec<BoolExp>),
    Or(Vec<BoolExp>),
    Not(Box<BoolExp>),

    /// Operators applied to a column of the current table.
    Column {
        column: String,
        exp: ComparisonExp,
    },

    /// A condition that at least one related row must satisfy.
    Relation {
        relation: String,
        exp: Box<BoolExp>,
    },
}

impl BoolExp {
    /// Parses `value` as a boolean expression over `table`.
    ///
    /// The entries of one object are combined with `AND`.
    pub fn parse(schema: &Schema, table: Table<'_>, value: &Value) -> Result<BoolExp> {
        let map = parse::object(value, "boolean expression")?;
        let mut items = Vec::with_capacity(map.len());

        for (key, value) in map {
            if value.is_null() {
                continue;
            }

            let item = match key.as_str() {
                "_and" => BoolExp::And(parse_list(schema, table, value)?),
                "_or" => BoolExp::Or(parse_list(schema, table, value)?),
                "_not" => BoolExp::Not(Box::new(BoolExp::parse(schema, table, value)?)),
                _ => {
                    if let Some(column) = table.column(key) {
                        BoolExp::Column {
                            column: key.clone(),
                            exp: ComparisonExp::parse(column.ty(), value)
                                .map_err(|err| err.context(format!("`{}.{key}`", table.name)))?,
                        }
                    } else if let Some(relation) = table.relation(key) {
                        let remote = schema.table(&relation.remote_table)?;
                        BoolExp::Relation {
                            relation: key.clone(),
                            exp: Box::new(BoolExp::parse(schema, remote, value)?),
                        }
                    } else {
                        return Err(Error::invalid_statement(format!(
                            "unknown field `{key}` in `{}_bool_exp`",
                            table.name
                        )));
                    }
                }
            };

            items.push(item);
        }

        Ok(BoolExp::And(items))
    }
}

fn parse_list(schema: &Schema, table: Table<'_>, value: &Value) -> Result<Vec<BoolExp>> {
    parse::list(value)
        .map(|item| BoolExp::parse(schema, table, item))
        .collect()
}
