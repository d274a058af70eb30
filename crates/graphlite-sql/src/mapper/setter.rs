use super::SqlMapper;
use crate::{Comma, Ident, ToSql};

use graphlite_core::stmt::{Setter, SqlValue};
use graphlite_core::Result;

impl<'a> SqlMapper<'a> {
    /// One `"column" = expr` assignment per setter.
    pub fn setters(&mut self, setters: &[Setter]) -> Result<Vec<String>> {
        let mut assignments = Vec::with_capacity(setters.len());

        for setter in setters {
            let column = self.column(setter.column())?;
            let current = self.column_ref(column);

            let mut sql = String::new();
            fmt!(&mut sql, Ident(column.dbname()) " = ");

            match setter {
                Setter::Set { value, .. } => {
                    let p = if column.ty().is_json() && !value.is_null() {
                        self.bind(SqlValue::json(value))
                    } else {
                        self.bind(SqlValue::from_json(value))
                    };
                    fmt!(&mut sql, p);
                }
                Setter::Inc { value, .. } => {
                    let p = self.bind(SqlValue::from_json(value));
                    fmt!(&mut sql, current.as_str() " + " p);
                }
                Setter::Append { value, .. } => {
                    let p = self.bind(SqlValue::json(value));
                    fmt!(&mut sql, "json_insert(coalesce(" current.as_str() ", '[]'), '$[#]', json(" p "))");
                }
                Setter::Prepend { value, .. } => {
                    let p = self.bind(SqlValue::json(value));
                    fmt!(&mut sql,
                        "(SELECT json_group_array(json(" Ident("v") ")) FROM (SELECT " p " AS " Ident("v")
                        " UNION ALL SELECT " current.as_str() " -> fullkey FROM json_each(" current.as_str() ")))");
                }
                Setter::Patch { value, .. } => {
                    let p = self.bind(SqlValue::json(value));
                    fmt!(&mut sql, "json_patch(" current.as_str() ", " p ")");
                }
                Setter::Remove { paths, .. } => {
                    let paths: Vec<_> = paths
                        .iter()
                        .map(|path| self.bind(SqlValue::from(path.as_str())))
                        .collect();

                    fmt!(&mut sql, "json_remove(" current.as_str());
                    for p in paths {
                        fmt!(&mut sql, ", " p);
                    }
                    sql.push(')');
                }
                Setter::Path {
                    op, path, value, ..
                } => {
                    let path = self.bind(SqlValue::from(path.as_str()));
                    let value = self.bind(SqlValue::json(value));
                    fmt!(&mut sql, op.sql_function() "(" current.as_str() ", " path ", json(" value "))");
                }
            }

            assignments.push(sql);
        }

        Ok(assignments)
    }

    /// `SET` list for `update_columns` of an upsert.
    pub(crate) fn excluded(&self, columns: &[String]) -> Result<String> {
        let assignments = columns
            .iter()
            .map(|name| {
                let column = self.column(name)?;
                let mut sql = String::new();
                fmt!(&mut sql, Ident(column.dbname()) " = excluded." Ident(column.dbname()));
                Ok(sql)
            })
            .collect::<Result<Vec<_>>>()?;

        let mut sql = String::new();
        fmt!(&mut sql, Comma(assignments));
        Ok(sql)
    }
}
