use super::{Comma, Ident, ToSql};

use graphlite_core::schema::{Column, ColumnType, Table};

/// Random version 4 uuid as lowercase hyphenated text.
const UUID_V4: &str = "lower(hex(randomblob(4)) || '-' || hex(randomblob(2)) || '-4' || \
    substr(hex(randomblob(2)), 2) || '-' || substr('89ab', 1 + (abs(random()) % 4), 1) || \
    substr(hex(randomblob(2)), 2) || '-' || hex(randomblob(6)))";

/// `CREATE TABLE IF NOT EXISTS` for a table of the schema.
///
/// A lone integer key column becomes SQLite's rowid alias, so inserts that
/// omit it are assigned the next id.
pub fn create_table(table: Table<'_>) -> String {
    let columns = ColumnsWithConstraints(table);

    let mut sql = String::new();
    fmt!(&mut sql, "CREATE TABLE IF NOT EXISTS " Ident(table.dbname()) " (" columns ")");
    sql
}

struct ColumnsWithConstraints<'a>(Table<'a>);

struct ColumnDef<'a> {
    column: Column<'a>,
    rowid: bool,
}

impl ToSql for ColumnsWithConstraints<'_> {
    fn to_sql(self, f: &mut String) {
        let table = self.0;
        let pk: Vec<_> = table.primary_key().collect();
        let rowid = matches!(pk.as_slice(), [column] if column.ty() == ColumnType::Integer);

        let columns = table.columns().map(|column| ColumnDef {
            column,
            rowid: rowid && column.config.primary_key,
        });

        fmt!(f, Comma(columns));

        if !rowid && !pk.is_empty() {
            let pk = pk.iter().map(|column| Ident(column.dbname()));
            fmt!(f, ", PRIMARY KEY (" Comma(pk) ")");
        }
    }
}

impl ToSql for ColumnDef<'_> {
    fn to_sql(self, f: &mut String) {
        let config = self.column.config;

        fmt!(f, Ident(self.column.dbname()) " " storage_type(config.ty));

        if self.rowid {
            fmt!(f, " PRIMARY KEY");
            return;
        }

        if config.not_null || config.primary_key {
            fmt!(f, " NOT NULL");
        }

        if let Some(expr) = column_default(self.column) {
            fmt!(f, " DEFAULT (" expr ")");
        }
    }
}

/// Expression a column takes when an insert omits it.
pub(crate) fn column_default<'a>(column: Column<'a>) -> Option<&'a str> {
    let config = column.config;

    match (&config.default, config.generate_uuid) {
        (Some(expr), _) => Some(expr.as_str()),
        (None, true) => Some(UUID_V4),
        (None, false) => None,
    }
}

fn storage_type(ty: ColumnType) -> &'static str {
    match ty {
        ColumnType::Integer | ColumnType::Boolean => "INTEGER",
        ColumnType::Real => "REAL",
        ColumnType::Uuid | ColumnType::Text | ColumnType::Timestamp | ColumnType::Json => "TEXT",
    }
}
