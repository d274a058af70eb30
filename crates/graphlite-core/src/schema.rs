mod column;
pub use column::{ColumnConfig, ColumnType};

mod columns_info;
pub use columns_info::TableColumnsInfo;

mod permission;
pub use permission::{
    DeletePermission, InsertPermission, PermissionExpression, SelectPermission,
    UpdatePermission,
};

mod relation;
pub use relation::{RelationConfig, RelationType};

mod root_fields;
pub use root_fields::{RootFields, RootOperation};

mod table;
pub use table::{Column, Table, TableConfig};

mod verify;

use crate::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Declarative schema configuration: every table keyed by its logical name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaConfig {
    pub tables: IndexMap<String, TableConfig>,
}

/// A verified schema.
///
/// Holds the configuration together with the metadata derived from each
/// table. Both are immutable once built, so a `Schema` can be shared freely
/// between threads compiling requests in parallel.
#[derive(Debug)]
pub struct Schema {
    config: SchemaConfig,
    info: IndexMap<String, TableColumnsInfo>,
}

impl Schema {
    /// Verifies `config` and derives the per-table metadata.
    pub fn from_config(config: SchemaConfig) -> Result<Schema> {
        let info = config
            .tables
            .iter()
            .map(|(name, table)| (name.clone(), TableColumnsInfo::new(table)))
            .collect();

        let schema = Schema { config, info };
        schema.verify()?;
        Ok(schema)
    }

    /// Parses a JSON schema configuration and verifies it.
    pub fn from_json(json: &str) -> Result<Schema> {
        let config: SchemaConfig = serde_json::from_str(json)
            .map_err(|err| Error::from(err).context(Error::invalid_schema("malformed config")))?;
        Schema::from_config(config)
    }

    pub fn config(&self) -> &SchemaConfig {
        &self.config
    }

    /// Iterates every table in declaration order.
    pub fn tables(&self) -> impl Iterator<Item = Table<'_>> + '_ {
        self.config
            .tables
            .iter()
            .zip(self.info.values())
            .map(|((name, config), info)| Table::new(name, config, info))
    }

    /// Looks up a table by its logical name.
    pub fn table(&self, name: &str) -> Result<Table<'_>> {
        let (index, name, config) = self
            .config
            .tables
            .get_full(name)
            .ok_or_else(|| Error::invalid_statement(format!("unknown table `{name}`")))?;

        let (_, info) = self
            .info
            .get_index(index)
            .ok_or_else(|| Error::invalid_statement(format!("unknown table `{name}`")))?;

        Ok(Table::new(name, config, info))
    }
}
