use super::{scalar, Generator};
use crate::schema::{InputObjectType, InputValueDef, ObjectType, TypeDef, TypeRef, FieldDef};
use graphlite_core::schema::{Column, Table};
use graphlite_core::Result;

/// JSON column setters and the description of each.
const JSON_SETTERS: [(&str, &str); 7] = [
    ("append", "append an element to a JSON array column"),
    ("prepend", "prepend an element to a JSON array column"),
    ("patch", "merge an object into a JSON column"),
    ("remove", "remove the values at the given paths"),
    ("set_path", "set the value at a path, inserting or replacing it"),
    ("insert_path", "insert a value at a path if nothing is there"),
    ("replace_path", "replace the value at a path if something is there"),
];

impl Generator<'_> {
    /// Input types of the insert and update mutations.
    pub(super) fn mutation_inputs(&mut self, table: Table<'_>) -> Result<()> {
        let t = table.name;

        self.add(TypeDef::InputObject(columns_input(
            format!("{t}_insert_input"),
            format!("input type for inserting data into table \"{t}\""),
            table.columns(),
        )))?;

        self.add(TypeDef::InputObject(columns_input(
            format!("{t}_set_input"),
            format!("input type for updating data in table \"{t}\""),
            table.columns(),
        )))?;

        if table.info.has_numeric_columns() {
            self.add(TypeDef::InputObject(columns_input(
                format!("{t}_inc_input"),
                format!("input type for incrementing numeric columns in table \"{t}\""),
                table.columns().filter(|column| column.ty().is_numeric()),
            )))?;
        }

        if table.info.has_json_columns() {
            for (setter, description) in JSON_SETTERS {
                let value = match setter {
                    "append" | "prepend" | "patch" => TypeRef::named("JSON"),
                    "remove" => TypeRef::named("String").non_null_list(),
                    _ => self.json_path_input(),
                };

                let ty = table
                    .columns()
                    .filter(|column| column.ty().is_json())
                    .fold(
                        InputObjectType::new(format!("{t}_{setter}_input"))
                            .description(description),
                        |ty, column| ty.field(InputValueDef::new(column.name, value.clone())),
                    );

                self.add(TypeDef::InputObject(ty))?;
            }
        }

        if table.has_primary_key() {
            let ty = table.primary_key().fold(
                InputObjectType::new(format!("{t}_pk_columns_input"))
                    .description(format!("primary key columns input for table: \"{t}\"")),
                |ty, column| {
                    ty.field(InputValueDef::new(column.name, scalar(column.ty()).non_null()))
                },
            );
            self.add(TypeDef::InputObject(ty))?;
        }

        let select_column = TypeRef::named(format!("{t}_select_column"));
        let bool_exp = TypeRef::named(format!("{t}_bool_exp"));

        self.add(TypeDef::InputObject(
            InputObjectType::new(format!("{t}_conflict_target"))
                .description(format!("conflict target on table \"{t}\""))
                .field(InputValueDef::new(
                    "columns",
                    select_column.clone().non_null_list().non_null(),
                ))
                .field(
                    InputValueDef::new("where", bool_exp.clone())
                        .description(Some("predicate of the partial index")),
                ),
        ))?;

        self.add(TypeDef::InputObject(
            InputObjectType::new(format!("{t}_on_conflict"))
                .description(format!("on_conflict condition type for table \"{t}\""))
                .field(InputValueDef::new(
                    "target",
                    TypeRef::named(format!("{t}_conflict_target")),
                ))
                .field(
                    InputValueDef::new("update_columns", select_column.non_null_list())
                        .description(Some("columns to overwrite; none means do nothing")),
                )
                .field(InputValueDef::new("where", bool_exp.clone())),
        ))?;

        let mut updates = InputObjectType::new(format!("{t}_updates"))
            .field(
                InputValueDef::new("where", bool_exp.non_null())
                    .description(Some("filter the rows which have to be updated")),
            );
        updates.fields.extend(setter_args(table));
        self.add(TypeDef::InputObject(updates))?;

        Ok(())
    }

    pub(super) fn mutation_response(&mut self, table: Table<'_>) -> Result<()> {
        let t = table.name;

        let ty = ObjectType::new(format!("{t}_mutation_response"))
            .description(format!("response of any mutation on the table \"{t}\""))
            .field(
                FieldDef::new("affected_rows", TypeRef::named("Int").non_null())
                    .description(Some("number of rows affected by the mutation")),
            )
            .field(
                FieldDef::new("returning", TypeRef::named(t).non_null_list().non_null())
                    .description(Some("data from the rows affected by the mutation")),
            );

        self.add(TypeDef::Object(ty))?;
        Ok(())
    }

    /// `JSON_path_input { path: String!, value: JSON }`
    fn json_path_input(&mut self) -> TypeRef {
        let name = "JSON_path_input".to_string();

        if !self.shared.contains_key(&name) {
            let ty = InputObjectType::new(&name)
                .field(InputValueDef::new("path", TypeRef::named("String").non_null()))
                .field(InputValueDef::new("value", TypeRef::named("JSON")));
            self.shared.insert(name.clone(), TypeDef::InputObject(ty));
        }

        TypeRef::Named(name)
    }
}

/// Setter arguments accepted by the update mutations. Setters with no
/// applicable column are left out.
pub(super) fn setter_args(table: Table<'_>) -> Vec<InputValueDef> {
    let t = table.name;

    let mut args = vec![InputValueDef::new("_set", TypeRef::named(format!("{t}_set_input")))
        .description(Some("sets the columns of the filtered rows to the given values"))];

    if table.info.has_numeric_columns() {
        args.push(
            InputValueDef::new("_inc", TypeRef::named(format!("{t}_inc_input")))
                .description(Some("increments the numeric columns with given value")),
        );
    }

    if table.info.has_json_columns() {
        for (setter, description) in JSON_SETTERS {
            args.push(
                InputValueDef::new(
                    format!("_{setter}"),
                    TypeRef::named(format!("{t}_{setter}_input")),
                )
                .description(Some(description)),
            );
        }
    }

    args
}

/// An input object with one nullable field per column.
fn columns_input<'a>(
    name: String,
    description: String,
    columns: impl Iterator<Item = Column<'a>>,
) -> InputObjectType {
    columns.fold(
        InputObjectType::new(name).description(description),
        |ty, column| ty.field(InputValueDef::new(column.name, scalar(column.ty()))),
    )
}
