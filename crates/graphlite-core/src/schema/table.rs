use super::{
    ColumnConfig, DeletePermission, InsertPermission, RelationConfig, RootFields,
    SelectPermission, TableColumnsInfo, UpdatePermission,
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TableConfig {
    /// Physical table name, when it differs from the type name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dbname: Option<String>,

    #[serde(default)]
    pub root_fields: RootFields,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,

    /// Whether the table gets root query and mutation fields.
    #[serde(default = "exported_default")]
    pub exported: bool,

    pub columns: IndexMap<String, ColumnConfig>,

    #[serde(default)]
    pub relations: IndexMap<String, RelationConfig>,

    #[serde(default)]
    pub insert_permissions: IndexMap<String, InsertPermission>,

    #[serde(default)]
    pub select_permissions: IndexMap<String, SelectPermission>,

    #[serde(default)]
    pub update_permissions: IndexMap<String, UpdatePermission>,

    #[serde(default)]
    pub delete_permissions: IndexMap<String, DeletePermission>,
}

fn exported_default() -> bool {
    true
}

impl TableConfig {
    pub fn new() -> TableConfig {
        TableConfig {
            exported: true,
            ..TableConfig::default()
        }
    }

    pub fn column(mut self, name: impl Into<String>, column: ColumnConfig) -> Self {
        self.columns.insert(name.into(), column);
        self
    }

    pub fn relation(mut self, name: impl Into<String>, relation: RelationConfig) -> Self {
        self.relations.insert(name.into(), relation);
        self
    }

    pub fn dbname(mut self, dbname: impl Into<String>) -> Self {
        self.dbname = Some(dbname.into());
        self
    }
}

/// A table of a verified schema, together with its derived metadata.
#[derive(Debug, Clone, Copy)]
pub struct Table<'a> {
    /// Logical name, also used as the object type name.
    pub name: &'a str,
    pub config: &'a TableConfig,
    pub info: &'a TableColumnsInfo,
}

/// A column of a [`Table`].
#[derive(Debug, Clone, Copy)]
pub struct Column<'a> {
    pub name: &'a str,
    pub config: &'a ColumnConfig,
}

impl<'a> Table<'a> {
    pub(super) fn new(
        name: &'a str,
        config: &'a TableConfig,
        info: &'a TableColumnsInfo,
    ) -> Table<'a> {
        Table { name, config, info }
    }

    /// Physical table name.
    pub fn dbname(&self) -> &'a str {
        self.config.dbname.as_deref().unwrap_or(self.name)
    }

    pub fn column(&self, name: &str) -> Option<Column<'a>> {
        self.config
            .columns
            .get_key_value(name)
            .map(|(name, config)| Column { name, config })
    }

    pub fn columns(&self) -> impl Iterator<Item = Column<'a>> + 'a {
        self.config
            .columns
            .iter()
            .map(|(name, config)| Column { name, config })
    }

    pub fn relation(&self, name: &str) -> Option<&'a RelationConfig> {
        self.config.relations.get(name)
    }

    pub fn primary_key(&self) -> impl Iterator<Item = Column<'a>> + 'a {
        let config = self.config;
        self.info.pk_columns.iter().filter_map(move |name| {
            config
                .columns
                .get_key_value(name.as_str())
                .map(|(name, config)| Column { name, config })
        })
    }

    pub fn has_primary_key(&self) -> bool {
        !self.info.pk_columns.is_empty()
    }
}

impl<'a> Column<'a> {
    /// Physical column name.
    pub fn dbname(&self) -> &'a str {
        self.config.dbname.as_deref().unwrap_or(self.name)
    }

    pub fn ty(&self) -> super::ColumnType {
        self.config.ty
    }
}
