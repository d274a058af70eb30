use super::{Scope, SqlMapper};
use crate::{Comma, ToSql};

use graphlite_core::stmt::{Direction, OrderBy};
use graphlite_core::Result;

impl<'a> SqlMapper<'a> {
    /// The `ORDER BY` item list, or `None` for no ordering.
    pub fn order_by(&mut self, items: &[OrderBy]) -> Result<Option<String>> {
        let keys = self.order_keys(items)?;

        if keys.is_empty() {
            return Ok(None);
        }

        let items = keys
            .into_iter()
            .map(|(key, direction)| format!("{key} {}", direction.as_sql()));

        let mut sql = String::new();
        fmt!(&mut sql, Comma(items));
        Ok(Some(sql))
    }

    /// Sort keys with their directions.
    ///
    /// Keys through an object relation are wrapped in a correlated scalar
    /// subquery, once per relation hop.
    fn order_keys(&mut self, items: &[OrderBy]) -> Result<Vec<(String, Direction)>> {
        let mut keys = vec![];

        for item in items {
            match item {
                OrderBy::Column { column, direction } => {
                    let column = self.column(column)?;
                    keys.push((self.column_ref(column), *direction));
                }
                OrderBy::Relation { relation, items } => {
                    let nested = self.with_relation(relation, Scope::OrderBy, |sub, join| {
                        let table_ref = sub.table_ref();

                        Ok(sub
                            .order_keys(items)?
                            .into_iter()
                            .map(|(key, direction)| {
                                let mut sql = String::new();
                                fmt!(&mut sql, "(SELECT " key " FROM " table_ref.as_str() " WHERE " join.as_str() ")");
                                (sql, direction)
                            })
                            .collect::<Vec<_>>())
                    })?;

                    keys.extend(nested);
                }
            }
        }

        Ok(keys)
    }
}
