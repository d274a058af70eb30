use super::parse;
use crate::schema::{Schema, Table};
use crate::{Error, Result};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum OrderBy {
    Column {
        column: String,
        direction: Direction,
    },

    /// Order by columns of an object relation.
    Relation {
        relation: String,
        items: Vec<OrderBy>,
    },
}

/// Values of the `order_by` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    AscNullsFirst,
    AscNullsLast,
    Desc,
    DescNullsFirst,
    DescNullsLast,
}

impl OrderBy {
    /// Parses an `order_by` argument: one `<table>_order_by` object or a list
    /// of them, applied in order.
    pub fn parse(schema: &Schema, table: Table<'_>, value: &Value) -> Result<Vec<OrderBy>> {
        let mut items = vec![];

        for object in parse::list(value) {
            let map = parse::object(object, "order_by")?;

            for (key, value) in map {
                if value.is_null() {
                    continue;
                }

                if let Some(column) = table.column(key) {
                    if !column.ty().is_sortable() {
                        return Err(Error::invalid_statement(format!(
                            "{} column `{}.{key}` is not sortable",
                            column.ty(),
                            table.name
                        )));
                    }

                    let name = parse::string(value, "order direction")?;
                    let direction = Direction::from_name(&name).ok_or_else(|| {
                        Error::invalid_statement(format!("unknown order direction `{name}`"))
                    })?;

                    items.push(OrderBy::Column {
                        column: key.clone(),
                        direction,
                    });
                } else if let Some(relation) = table.relation(key) {
                    if relation.is_array() {
                        return Err(Error::unsupported_feature(format!(
                            "ordering through array relation `{}.{key}`",
                            table.name
                        )));
                    }

                    let remote = schema.table(&relation.remote_table)?;
                    items.push(OrderBy::Relation {
                        relation: key.clone(),
                        items: OrderBy::parse(schema, remote, value)?,
                    });
                } else {
                    return Err(Error::invalid_statement(format!(
                        "unknown field `{key}` in `{}_order_by`",
                        table.name
                    )));
                }
            }
        }

        Ok(items)
    }
}

impl Direction {
    pub const ALL: [Direction; 6] = [
        Direction::Asc,
        Direction::AscNullsFirst,
        Direction::AscNullsLast,
        Direction::Desc,
        Direction::DescNullsFirst,
        Direction::DescNullsLast,
    ];

    pub fn from_name(name: &str) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|direction| direction.name() == name)
    }

    /// Enum value name, e.g. `asc_nulls_first`.
    pub fn name(self) -> &'static str {
        match self {
            Direction::Asc => "asc",
            Direction::AscNullsFirst => "asc_nulls_first",
            Direction::AscNullsLast => "asc_nulls_last",
            Direction::Desc => "desc",
            Direction::DescNullsFirst => "desc_nulls_first",
            Direction::DescNullsLast => "desc_nulls_last",
        }
    }

    /// SQL keywords: the enum name with `_` replaced by a space, uppercased.
    pub fn as_sql(self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::AscNullsFirst => "ASC NULLS FIRST",
            Direction::AscNullsLast => "ASC NULLS LAST",
            Direction::Desc => "DESC",
            Direction::DescNullsFirst => "DESC NULLS FIRST",
            Direction::DescNullsLast => "DESC NULLS LAST",
        }
    }
}
