use super::{RootOperation, Schema, Table};
use crate::{Error, Result};

use std::collections::HashMap;

struct Verify<'a> {
    schema: &'a Schema,
}

impl Schema {
    pub(super) fn verify(&self) -> Result<()> {
        Verify { schema: self }.verify()
    }
}

impl Verify<'_> {
    fn verify(&self) -> Result<()> {
        for table in self.schema.tables() {
            self.verify_names(table)?;
            self.verify_relations(table)?;
            self.verify_permissions(table)?;
        }

        self.verify_root_fields_are_unique()?;
        Ok(())
    }

    fn verify_names(&self, table: Table<'_>) -> Result<()> {
        verify_name("table", table.name)?;

        if table.config.columns.is_empty() {
            return Err(Error::invalid_schema(format!(
                "table `{}` has no columns",
                table.name
            )));
        }

        for column in table.columns() {
            verify_name("column", column.name)?;
        }

        for name in table.config.relations.keys() {
            verify_name("relation", name)?;

            if table.config.columns.contains_key(name) {
                return Err(Error::invalid_schema(format!(
                    "relation `{}.{name}` has the same name as a column",
                    table.name
                )));
            }
        }

        Ok(())
    }

    fn verify_relations(&self, table: Table<'_>) -> Result<()> {
        for (name, relation) in &table.config.relations {
            let remote = self
                .schema
                .config
                .tables
                .get(&relation.remote_table)
                .ok_or_else(|| {
                    Error::invalid_schema(format!(
                        "relation `{}.{name}` references unknown table `{}`",
                        table.name, relation.remote_table
                    ))
                })?;

            if relation.mappings.is_empty() {
                return Err(Error::invalid_schema(format!(
                    "relation `{}.{name}` has no column mappings",
                    table.name
                )));
            }

            for (local, foreign) in &relation.mappings {
                if !table.config.columns.contains_key(local) {
                    return Err(Error::invalid_schema(format!(
                        "relation `{}.{name}` maps unknown column `{local}`",
                        table.name
                    )));
                }

                if !remote.columns.contains_key(foreign) {
                    return Err(Error::invalid_schema(format!(
                        "relation `{}.{name}` maps to unknown column `{}.{foreign}`",
                        table.name, relation.remote_table
                    )));
                }
            }
        }

        Ok(())
    }

    fn verify_permissions(&self, table: Table<'_>) -> Result<()> {
        let config = table.config;
        let columns = config
            .insert_permissions
            .values()
            .flat_map(|perm| &perm.columns)
            .chain(config.select_permissions.values().flat_map(|perm| &perm.columns))
            .chain(config.update_permissions.values().flat_map(|perm| &perm.columns));

        for column in columns {
            if !config.columns.contains_key(column) {
                return Err(Error::invalid_schema(format!(
                    "permission on `{}` names unknown column `{column}`",
                    table.name
                )));
            }
        }

        Ok(())
    }

    fn verify_root_fields_are_unique(&self) -> Result<()> {
        let mut seen = HashMap::new();

        for table in self.schema.tables() {
            if !table.config.exported {
                continue;
            }

            for op in RootOperation::ALL {
                if op.requires_primary_key() && !table.has_primary_key() {
                    continue;
                }

                let name = table.config.root_fields.name(op, table.name);
                verify_name("root field", &name)?;

                if let Some(prev) = seen.insert(name.clone(), table.name) {
                    return Err(Error::invalid_schema(format!(
                        "root field `{name}` is generated for both `{prev}` and `{}`",
                        table.name
                    )));
                }
            }
        }

        Ok(())
    }
}

/// Names become type and field names, so they follow `[_A-Za-z][_0-9A-Za-z]*`
/// and may not use the reserved `__` prefix.
fn verify_name(what: &str, name: &str) -> Result<()> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) => {
            (first == '_' || first.is_ascii_alphabetic())
                && chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
                && !name.starts_with("__")
        }
        None => false,
    };

    if valid {
        Ok(())
    } else {
        Err(Error::invalid_schema(format!("invalid {what} name `{name}`")))
    }
}
