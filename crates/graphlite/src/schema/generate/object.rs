use super::{column_type, select_args, Generator};
use crate::schema::{FieldDef, InputValueDef, ObjectType, TypeDef, TypeRef};
use graphlite_core::schema::Table;
use graphlite_core::Result;

impl Generator<'_> {
    /// The object type of `table`: one field per column, then one per
    /// relation.
    pub(super) fn object(&mut self, table: Table<'_>) -> Result<()> {
        let mut object = ObjectType::new(table.name);
        object.description = Some(
            table
                .config
                .comments
                .clone()
                .unwrap_or_else(|| format!("columns and relationships of \"{}\"", table.name)),
        );

        for column in table.columns() {
            let mut field = FieldDef::new(column.name, column_type(column))
                .description(column.config.comments.as_deref());

            if column.ty().is_json() {
                field = field.arg(
                    InputValueDef::new("path", TypeRef::named("String"))
                        .description(Some("JSON select path")),
                );
            }

            object.fields.push(field);
        }

        for (name, relation) in &table.config.relations {
            let remote = self.schema.table(&relation.remote_table)?;

            let field = if relation.is_array() {
                FieldDef::new(
                    name.as_str(),
                    TypeRef::named(remote.name).non_null_list().non_null(),
                )
                .args(select_args(remote.name))
                .description(Some(
                    relation
                        .comments
                        .clone()
                        .unwrap_or_else(|| "An array relationship".to_string()),
                ))
            } else {
                FieldDef::new(name.as_str(), TypeRef::named(remote.name)).description(Some(
                    relation
                        .comments
                        .clone()
                        .unwrap_or_else(|| "An object relationship".to_string()),
                ))
            };

            object.fields.push(field);
        }

        self.add(TypeDef::Object(object))?;
        Ok(())
    }
}
