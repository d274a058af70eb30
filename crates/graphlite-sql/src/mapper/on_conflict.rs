use super::SqlMapper;
use crate::{Comma, Ident, ToSql};

use graphlite_core::stmt::OnConflict;
use graphlite_core::Result;

impl<'a> SqlMapper<'a> {
    /// One ` ON CONFLICT ...` clause per entry, in order.
    pub fn on_conflict(&mut self, entries: &[OnConflict]) -> Result<String> {
        let mut sql = String::new();

        for entry in entries {
            fmt!(&mut sql, " ON CONFLICT");

            if let Some(target) = entry.target.as_ref().filter(|target| !target.columns.is_empty()) {
                let columns = target
                    .columns
                    .iter()
                    .map(|name| self.column(name).map(|column| Ident(column.dbname())))
                    .collect::<Result<Vec<_>>>()?;

                fmt!(&mut sql, " (" Comma(columns) ")");

                if let Some(predicate) = self.predicate(target.filter.as_ref())? {
                    fmt!(&mut sql, " WHERE " predicate);
                }
            }

            if entry.update_columns.is_empty() {
                fmt!(&mut sql, " DO NOTHING");
                continue;
            }

            let assignments = self.excluded(&entry.update_columns)?;
            fmt!(&mut sql, " DO UPDATE SET " assignments);

            if let Some(predicate) = self.predicate(entry.filter.as_ref())? {
                fmt!(&mut sql, " WHERE " predicate);
            }
        }

        Ok(sql)
    }
}
