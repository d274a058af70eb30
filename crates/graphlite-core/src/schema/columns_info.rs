use super::{ColumnType, TableConfig};

/// Facts about a table's columns, derived once when the schema is loaded.
///
/// Every list holds logical column names in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableColumnsInfo {
    pub columns: Vec<String>,
    pub pk_columns: Vec<String>,
    pub integer_columns: Vec<String>,
    pub real_columns: Vec<String>,
    pub json_columns: Vec<String>,

    /// Every column that is not JSON.
    pub sortable_columns: Vec<String>,
}

impl TableColumnsInfo {
    pub fn new(table: &TableConfig) -> TableColumnsInfo {
        let mut info = TableColumnsInfo::default();

        for (name, column) in &table.columns {
            info.columns.push(name.clone());

            if column.primary_key {
                info.pk_columns.push(name.clone());
            }

            match column.ty {
                ColumnType::Integer => info.integer_columns.push(name.clone()),
                ColumnType::Real => info.real_columns.push(name.clone()),
                ColumnType::Json => info.json_columns.push(name.clone()),
                _ => {}
            }

            if column.ty.is_sortable() {
                info.sortable_columns.push(name.clone());
            }
        }

        info
    }

    /// Integer and real columns, in declaration order.
    pub fn numeric_columns<'a>(&'a self, table: &'a TableConfig) -> impl Iterator<Item = &'a str> {
        self.columns
            .iter()
            .filter(|name| {
                table
                    .columns
                    .get(name.as_str())
                    .is_some_and(|column| column.ty.is_numeric())
            })
            .map(String::as_str)
    }

    pub fn has_numeric_columns(&self) -> bool {
        !self.integer_columns.is_empty() || !self.real_columns.is_empty()
    }

    pub fn has_json_columns(&self) -> bool {
        !self.json_columns.is_empty()
    }

    pub fn has_sortable_columns(&self) -> bool {
        !self.sortable_columns.is_empty()
    }
}
