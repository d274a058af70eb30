use super::{scalar, Generator};
use crate::schema::{FieldDef, InputValueDef, ObjectType, TypeDef, TypeRef};
use graphlite_core::schema::Table;
use graphlite_core::Result;

impl Generator<'_> {
    pub(super) fn aggregate(&mut self, table: Table<'_>) -> Result<()> {
        let t = table.name;

        self.add(TypeDef::Object(
            ObjectType::new(format!("{t}_aggregate"))
                .description(format!("aggregated selection of \"{t}\""))
                .field(FieldDef::new(
                    "aggregate",
                    TypeRef::named(format!("{t}_aggregate_fields")),
                ))
                .field(FieldDef::new(
                    "nodes",
                    TypeRef::named(t).non_null_list().non_null(),
                )),
        ))?;

        let mut fields = ObjectType::new(format!("{t}_aggregate_fields"))
            .description(format!("aggregate fields of \"{t}\""))
            .field(
                FieldDef::new("count", TypeRef::named("Int").non_null())
                    .arg(InputValueDef::new(
                        "columns",
                        TypeRef::named(format!("{t}_select_column")).non_null_list(),
                    ))
                    .arg(InputValueDef::new("distinct", TypeRef::named("Boolean"))),
            );

        if table.info.has_sortable_columns() {
            let min_max = TypeRef::named(format!("{t}_min_max_fields"));
            fields.fields.push(FieldDef::new("max", min_max.clone()));
            fields.fields.push(FieldDef::new("min", min_max));

            let ty = table
                .columns()
                .filter(|column| column.ty().is_sortable())
                .fold(
                    ObjectType::new(format!("{t}_min_max_fields"))
                        .description(format!("min and max aggregates of \"{t}\"")),
                    |ty, column| ty.field(FieldDef::new(column.name, scalar(column.ty()))),
                );
            self.add(TypeDef::Object(ty))?;
        }

        if table.info.has_numeric_columns() {
            let avg_sum = TypeRef::named(format!("{t}_avg_sum_fields"));
            fields.fields.push(FieldDef::new("avg", avg_sum.clone()));
            fields.fields.push(FieldDef::new("sum", avg_sum));

            let ty = table
                .columns()
                .filter(|column| column.ty().is_numeric())
                .fold(
                    ObjectType::new(format!("{t}_avg_sum_fields"))
                        .description(format!("avg and sum aggregates of \"{t}\"")),
                    |ty, column| ty.field(FieldDef::new(column.name, TypeRef::named("Float"))),
                );
            self.add(TypeDef::Object(ty))?;
        }

        self.add(TypeDef::Object(fields))?;
        Ok(())
    }
}
