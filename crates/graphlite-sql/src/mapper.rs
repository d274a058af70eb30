mod aggregate;
mod filter;
mod on_conflict;
mod order_by;
mod selection;
mod setter;

use super::{Delimited, Ident, Params, Placeholder, ToSql};

use graphlite_core::driver::CompiledQuery;
use graphlite_core::schema::{Column, Schema, Table};
use graphlite_core::stmt::{SelectArgs, SqlValue};
use graphlite_core::{Error, Result};

/// Compiles the parts of a request that concern one table under one
/// correlation alias.
///
/// Relations are compiled by a child mapper over the remote table. The child
/// takes over the parameter list for the duration of the nested compile and
/// hands it back, so placeholders stay numbered in SQL text order across the
/// whole statement.
#[derive(Debug, Clone)]
pub struct SqlMapper<'a> {
    schema: &'a Schema,
    table: Table<'a>,
    alias: String,
    params: Vec<SqlValue>,
}

/// Where a relation is traversed from. Part of the child alias, so the same
/// relation reached from a selection and from a filter never shares a name.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Scope<'f> {
    /// A selected field, named by its response alias.
    Select(&'f str),
    Filter,
    OrderBy,
}

impl<'a> SqlMapper<'a> {
    /// A mapper over `table`, aliased by its physical name.
    pub fn new(schema: &'a Schema, table: &str) -> Result<SqlMapper<'a>> {
        let table = schema.table(table)?;

        Ok(SqlMapper {
            schema,
            table,
            alias: table.dbname().to_string(),
            params: vec![],
        })
    }

    pub fn table(&self) -> Table<'a> {
        self.table
    }

    pub fn alias(&self) -> &str {
        &self.alias
    }

    pub fn params(&self) -> &[SqlValue] {
        &self.params
    }

    pub(crate) fn schema(&self) -> &'a Schema {
        self.schema
    }

    /// Appends a bound value.
    pub(crate) fn bind(&mut self, value: SqlValue) -> Placeholder {
        Params::push(&mut self.params, value)
    }

    pub(crate) fn finish(self, sql: String, returning: bool) -> CompiledQuery {
        CompiledQuery::new(sql, self.params, returning)
    }

    /// Table reference for a `FROM` clause.
    pub(crate) fn table_ref(&self) -> String {
        let dbname = self.table.dbname();
        let mut sql = String::new();

        if self.alias == dbname {
            fmt!(&mut sql, Ident(dbname));
        } else {
            fmt!(&mut sql, Ident(dbname) " AS " Ident(&self.alias));
        }

        sql
    }

    pub(crate) fn column(&self, name: &str) -> Result<Column<'a>> {
        self.table.column(name).ok_or_else(|| {
            Error::invalid_statement(format!(
                "unknown column `{name}` on `{}`",
                self.table.name
            ))
        })
    }

    /// `"alias"."column"`
    pub(crate) fn column_ref(&self, column: Column<'_>) -> String {
        let mut sql = String::new();
        fmt!(&mut sql, Ident(&self.alias) "." Ident(column.dbname()));
        sql
    }

    /// Runs `f` with a mapper over the remote table of `relation`.
    ///
    /// `f` receives the join predicate correlating the child alias with this
    /// mapper's alias.
    pub(crate) fn with_relation<T>(
        &mut self,
        relation: &str,
        scope: Scope<'_>,
        f: impl FnOnce(&mut SqlMapper<'a>, String) -> Result<T>,
    ) -> Result<T> {
        let config = self.table.relation(relation).ok_or_else(|| {
            Error::invalid_statement(format!(
                "unknown relation `{relation}` on `{}`",
                self.table.name
            ))
        })?;

        let remote = self.schema.table(&config.remote_table)?;

        let alias = match scope {
            Scope::Select(field_alias) => format!("{}.{field_alias}", self.alias),
            Scope::Filter => format!("{}[where].{relation}", self.alias),
            Scope::OrderBy => format!("{}[order_by].{relation}", self.alias),
        };

        let mut join = vec![];
        for (local, foreign) in &config.mappings {
            let local = self.column(local)?;
            let foreign = remote.column(foreign).ok_or_else(|| {
                Error::invalid_schema(format!(
                    "relation `{}.{relation}` maps to unknown column `{foreign}`",
                    self.table.name
                ))
            })?;

            let mut sql = String::new();
            fmt!(&mut sql, Ident(&self.alias) "." Ident(local.dbname()) " = " Ident(&alias) "." Ident(foreign.dbname()));
            join.push(sql);
        }

        let mut join_sql = String::new();
        fmt!(&mut join_sql, Delimited(join, " AND "));

        let mut child = SqlMapper {
            schema: self.schema,
            table: remote,
            alias,
            params: std::mem::take(&mut self.params),
        };

        let ret = f(&mut child, join_sql);
        self.params = child.params;
        ret
    }

    /// ` WHERE ... ORDER BY ... LIMIT ... OFFSET ...`, each part only when
    /// present. `extra` conditions come first and are ANDed with the filter.
    pub(crate) fn select_tail(&mut self, extra: Vec<String>, args: &SelectArgs) -> Result<String> {
        let mut conds = extra;
        if let Some(filter) = &args.filter {
            conds.extend(self.filter(filter)?);
        }

        let mut sql = String::new();

        if !conds.is_empty() {
            fmt!(&mut sql, " WHERE " Delimited(conds, " AND "));
        }

        if let Some(order_by) = self.order_by(&args.order_by)? {
            fmt!(&mut sql, " ORDER BY " order_by);
        }

        match (args.limit, args.offset) {
            (Some(limit), offset) => {
                let limit = self.bind(SqlValue::Integer(limit));
                fmt!(&mut sql, " LIMIT " limit);

                if let Some(offset) = offset {
                    let offset = self.bind(SqlValue::Integer(offset));
                    fmt!(&mut sql, " OFFSET " offset);
                }
            }
            (None, Some(offset)) => {
                let offset = self.bind(SqlValue::Integer(offset));
                fmt!(&mut sql, " LIMIT -1 OFFSET " offset);
            }
            (None, None) => {}
        }

        Ok(sql)
    }
}
