mod aggregate;
mod filter;
mod mutation;
mod object;

use super::{
    EnumType, FieldDef, InputValueDef, ObjectType, RootField, ScalarType, TypeDef, TypeDefs,
    TypeRef,
};
use graphlite_core::schema::{Column, ColumnType, RootOperation, Schema, Table};
use graphlite_core::stmt::Direction;
use graphlite_core::{Error, Result};

use indexmap::IndexMap;

/// Builds the type descriptions for every table of `schema`.
///
/// Types are generated for every table, hidden ones included, since they can
/// still be reached through relations. Root fields are only generated for
/// exported tables.
pub fn generate(schema: &Schema) -> Result<TypeDefs> {
    let mut generator = Generator::new(schema);

    for table in schema.tables() {
        generator.table(table)?;

        if table.config.exported {
            generator.root_fields(table)?;
        }
    }

    generator.finish()
}

struct Generator<'a> {
    schema: &'a Schema,

    /// Scalars and the `order_by` enum.
    builtin: Vec<TypeDef>,

    /// Types shared between tables, such as the comparison types.
    shared: IndexMap<String, TypeDef>,

    /// Per-table types.
    types: IndexMap<String, TypeDef>,

    query: ObjectType,
    mutation: ObjectType,
    root_fields: IndexMap<String, RootField>,
}

impl<'a> Generator<'a> {
    fn new(schema: &'a Schema) -> Generator<'a> {
        Generator {
            schema,
            builtin: builtin_types(),
            shared: IndexMap::new(),
            types: IndexMap::new(),
            query: ObjectType::new("Query"),
            mutation: ObjectType::new("Mutation"),
            root_fields: IndexMap::new(),
        }
    }

    fn table(&mut self, table: Table<'_>) -> Result<()> {
        log::trace!("generating types for table `{}`", table.name);

        self.object(table)?;
        self.bool_exp(table)?;
        self.order_by(table)?;
        self.select_column(table)?;
        self.mutation_inputs(table)?;
        self.aggregate(table)?;
        self.mutation_response(table)
    }

    fn add(&mut self, ty: TypeDef) -> Result<TypeRef> {
        let name = ty.name().to_string();

        if self.types.contains_key(&name) {
            return Err(Error::invalid_schema(format!(
                "type `{name}` is generated more than once"
            )));
        }

        self.types.insert(name.clone(), ty);
        Ok(TypeRef::Named(name))
    }

    fn root_fields(&mut self, table: Table<'_>) -> Result<()> {
        for op in RootOperation::ALL {
            if op.requires_primary_key() && !table.has_primary_key() {
                continue;
            }

            let name = table.config.root_fields.name(op, table.name);
            let field = self.root_field(table, op, &name);

            if self.root_fields.contains_key(&name) {
                return Err(Error::invalid_schema(format!(
                    "root field `{name}` is generated more than once"
                )));
            }

            self.root_fields.insert(
                name,
                RootField {
                    table: table.name.to_string(),
                    operation: op,
                },
            );

            if op.is_mutation() {
                self.mutation.fields.push(field);
            } else {
                self.query.fields.push(field);
            }
        }

        Ok(())
    }

    fn root_field(&self, table: Table<'_>, op: RootOperation, name: &str) -> FieldDef {
        let t = table.name;
        let object = TypeRef::named(t);

        match op {
            RootOperation::Select => FieldDef::new(name, object.non_null_list().non_null())
                .description(Some(format!("fetch data from the table: \"{t}\"")))
                .args(select_args(t)),
            RootOperation::SelectByPk => FieldDef::new(name, object)
                .description(Some(format!(
                    "fetch data from the table: \"{t}\" using primary key columns"
                )))
                .args(pk_args(table)),
            RootOperation::SelectAggregate => {
                FieldDef::new(name, TypeRef::named(format!("{t}_aggregate")).non_null())
                    .description(Some(format!(
                        "fetch aggregated fields from the table: \"{t}\""
                    )))
                    .args(select_args(t))
            }
            RootOperation::Insert => {
                FieldDef::new(name, TypeRef::named(format!("{t}_mutation_response")))
                    .description(Some(format!("insert data into the table: \"{t}\"")))
                    .arg(
                        InputValueDef::new(
                            "objects",
                            TypeRef::named(format!("{t}_insert_input"))
                                .non_null_list()
                                .non_null(),
                        )
                        .description(Some("the rows to be inserted")),
                    )
                    .arg(on_conflict_arg(t))
            }
            RootOperation::InsertOne => FieldDef::new(name, object)
                .description(Some(format!(
                    "insert a single row into the table: \"{t}\""
                )))
                .arg(
                    InputValueDef::new(
                        "object",
                        TypeRef::named(format!("{t}_insert_input")).non_null(),
                    )
                    .description(Some("the row to be inserted")),
                )
                .arg(on_conflict_arg(t)),
            RootOperation::Update => {
                FieldDef::new(name, TypeRef::named(format!("{t}_mutation_response")))
                    .description(Some(format!("update data of the table: \"{t}\"")))
                    .args(mutation::setter_args(table))
                    .arg(
                        InputValueDef::new(
                            "where",
                            TypeRef::named(format!("{t}_bool_exp")).non_null(),
                        )
                        .description(Some("filter the rows which have to be updated")),
                    )
            }
            RootOperation::UpdateByPk => FieldDef::new(name, object)
                .description(Some(format!(
                    "update single row of the table: \"{t}\""
                )))
                .args(mutation::setter_args(table))
                .arg(InputValueDef::new(
                    "pk_columns",
                    TypeRef::named(format!("{t}_pk_columns_input")).non_null(),
                )),
            RootOperation::UpdateMany => FieldDef::new(
                name,
                TypeRef::named(format!("{t}_mutation_response")).list(),
            )
            .description(Some(format!("update multiple rows of the table: \"{t}\"")))
            .arg(
                InputValueDef::new(
                    "updates",
                    TypeRef::named(format!("{t}_updates"))
                        .non_null_list()
                        .non_null(),
                )
                .description(Some("updates to execute, in order")),
            ),
            RootOperation::Delete => {
                FieldDef::new(name, TypeRef::named(format!("{t}_mutation_response")))
                    .description(Some(format!("delete data from the table: \"{t}\"")))
                    .arg(
                        InputValueDef::new(
                            "where",
                            TypeRef::named(format!("{t}_bool_exp")).non_null(),
                        )
                        .description(Some("filter the rows which have to be deleted")),
                    )
            }
            RootOperation::DeleteByPk => FieldDef::new(name, object)
                .description(Some(format!(
                    "delete single row from the table: \"{t}\""
                )))
                .args(pk_args(table)),
        }
    }

    fn finish(self) -> Result<TypeDefs> {
        let mut types = IndexMap::new();

        let all = self
            .builtin
            .into_iter()
            .chain(self.shared.into_values())
            .chain(self.types.into_values());

        for ty in all {
            let name = ty.name().to_string();

            if name == self.query.name || name == self.mutation.name || types.contains_key(&name)
            {
                return Err(Error::invalid_schema(format!(
                    "type `{name}` is generated more than once"
                )));
            }

            types.insert(name, ty);
        }

        Ok(TypeDefs {
            types,
            query: self.query,
            mutation: self.mutation,
            root_fields: self.root_fields,
        })
    }
}

/// Scalar type name for a column type.
fn scalar_name(ty: ColumnType) -> &'static str {
    match ty {
        ColumnType::Integer => "Int",
        ColumnType::Real => "Float",
        ColumnType::Text => "String",
        ColumnType::Boolean => "Boolean",
        ColumnType::Uuid => "UUID",
        ColumnType::Timestamp => "DateTime",
        ColumnType::Json => "JSON",
    }
}

fn scalar(ty: ColumnType) -> TypeRef {
    TypeRef::named(scalar_name(ty))
}

/// Type of a column in output and required-input positions.
fn column_type(column: Column<'_>) -> TypeRef {
    if column.config.is_nullable() {
        scalar(column.ty())
    } else {
        scalar(column.ty()).non_null()
    }
}

fn builtin_types() -> Vec<TypeDef> {
    let scalars = [
        ("UUID", "A universally unique identifier, as text"),
        ("DateTime", "A timestamp, as ISO 8601 text"),
        ("JSON", "Arbitrary JSON value"),
    ];

    let mut types: Vec<_> = scalars
        .into_iter()
        .map(|(name, description)| {
            TypeDef::Scalar(ScalarType {
                name: name.to_string(),
                description: Some(description.to_string()),
            })
        })
        .collect();

    let order_by = Direction::ALL
        .into_iter()
        .fold(
            EnumType::new("order_by").description("column ordering options"),
            |ty, direction| ty.value(direction.name(), Some(direction_description(direction))),
        );

    types.push(TypeDef::Enum(order_by));
    types
}

fn direction_description(direction: Direction) -> &'static str {
    match direction {
        Direction::Asc => "in ascending order, nulls first",
        Direction::AscNullsFirst => "in ascending order, nulls first",
        Direction::AscNullsLast => "in ascending order, nulls last",
        Direction::Desc => "in descending order, nulls last",
        Direction::DescNullsFirst => "in descending order, nulls first",
        Direction::DescNullsLast => "in descending order, nulls last",
    }
}

/// `where`, `order_by`, `limit` and `offset` of a list selection.
fn select_args(table: &str) -> Vec<InputValueDef> {
    vec![
        InputValueDef::new("where", TypeRef::named(format!("{table}_bool_exp")))
            .description(Some("filter the rows returned")),
        InputValueDef::new(
            "order_by",
            TypeRef::named(format!("{table}_order_by")).non_null_list(),
        )
        .description(Some("sort the rows by one or more columns")),
        InputValueDef::new("limit", TypeRef::named("Int"))
            .description(Some("limit the number of rows returned")),
        InputValueDef::new("offset", TypeRef::named("Int"))
            .description(Some("skip the first n rows. Use only with order_by")),
    ]
}

fn pk_args(table: Table<'_>) -> Vec<InputValueDef> {
    table
        .primary_key()
        .map(|column| InputValueDef::new(column.name, scalar(column.ty()).non_null()))
        .collect()
}

fn on_conflict_arg(table: &str) -> InputValueDef {
    InputValueDef::new(
        "on_conflict",
        TypeRef::named(format!("{table}_on_conflict")).non_null_list(),
    )
    .description(Some("upsert condition"))
}
