use super::{scalar, scalar_name, Generator};
use crate::schema::{EnumType, InputObjectType, InputValueDef, TypeDef, TypeRef};
use graphlite_core::schema::{ColumnType, Table};
use graphlite_core::Result;

/// Operators shared by every comparison type.
const BINARY_OPS: [&str; 6] = ["_eq", "_neq", "_gt", "_gte", "_lt", "_lte"];

const PATTERN_OPS: [(&str, &str); 6] = [
    ("_like", "does the column match the given pattern"),
    ("_nlike", "does the column NOT match the given pattern"),
    ("_glob", "does the column match the given case-sensitive glob"),
    ("_nglob", "does the column NOT match the given case-sensitive glob"),
    ("_regexp", "does the column match the given regular expression"),
    ("_nregexp", "does the column NOT match the given regular expression"),
];

/// Column types a JSON value can be compared as under `_at` and `_cast`.
const PATH_TARGETS: [ColumnType; 4] = [
    ColumnType::Integer,
    ColumnType::Real,
    ColumnType::Text,
    ColumnType::Boolean,
];

impl Generator<'_> {
    pub(super) fn bool_exp(&mut self, table: Table<'_>) -> Result<()> {
        let name = format!("{}_bool_exp", table.name);
        let this = TypeRef::named(&name);

        let mut ty = InputObjectType::new(&name)
            .description(format!(
                "Boolean expression to filter rows from the table \"{}\". \
                 All fields are combined with a logical 'AND'.",
                table.name
            ))
            .field(InputValueDef::new("_and", this.clone().non_null_list()))
            .field(InputValueDef::new("_or", this.clone().non_null_list()))
            .field(InputValueDef::new("_not", this));

        for column in table.columns() {
            let comparison = self.comparison(column.ty());
            ty.fields.push(InputValueDef::new(column.name, comparison));
        }

        for (name, relation) in &table.config.relations {
            ty.fields.push(InputValueDef::new(
                name.as_str(),
                TypeRef::named(format!("{}_bool_exp", relation.remote_table)),
            ));
        }

        self.add(TypeDef::InputObject(ty))?;
        Ok(())
    }

    /// `<Scalar>_comparison_exp`, generated once per scalar type.
    pub(super) fn comparison(&mut self, ty: ColumnType) -> TypeRef {
        let name = format!("{}_comparison_exp", scalar_name(ty));

        if !self.shared.contains_key(&name) {
            let def = self.build_comparison(&name, ty);
            self.shared.insert(name.clone(), TypeDef::InputObject(def));
        }

        TypeRef::Named(name)
    }

    fn build_comparison(&mut self, name: &str, ty: ColumnType) -> InputObjectType {
        let value = scalar(ty);

        let mut def = InputObjectType::new(name).description(format!(
            "Boolean expression to compare columns of type \"{}\". \
             All fields are combined with logical 'AND'.",
            scalar_name(ty)
        ));

        for op in BINARY_OPS {
            def.fields.push(InputValueDef::new(op, value.clone()));
        }

        def.fields.push(InputValueDef::new("_in", value.clone().non_null_list()));
        def.fields.push(InputValueDef::new("_nin", value.clone().non_null_list()));
        def.fields.push(InputValueDef::new("_is_null", TypeRef::named("Boolean")));

        if ty.is_textual() {
            for (op, description) in PATTERN_OPS {
                def.fields
                    .push(InputValueDef::new(op, value.clone()).description(Some(description)));
            }
        }

        if ty.is_json() {
            let string = TypeRef::named("String");

            def.fields.extend([
                InputValueDef::new("_has_key", string.clone())
                    .description(Some("does the string exist as a top-level key in the column")),
                InputValueDef::new("_has_keys_all", string.clone().non_null_list())
                    .description(Some("do all of these strings exist as top-level keys in the column")),
                InputValueDef::new("_has_keys_any", string.non_null_list())
                    .description(Some("do any of these strings exist as top-level keys in the column")),
                InputValueDef::new("_contains", value.clone())
                    .description(Some("does the column contain the given json value at the top level")),
                InputValueDef::new("_contained_in", value)
                    .description(Some("is the column contained in the given json value")),
                InputValueDef::new("_length", self.comparison(ColumnType::Integer))
                    .description(Some("compare the length of a JSON array or object")),
            ]);

            let at = self.json_at();
            def.fields.push(
                InputValueDef::new("_at", at)
                    .description(Some("compare the value at a JSON path")),
            );

            let cast = self.json_cast();
            def.fields.push(
                InputValueDef::new("_cast", cast)
                    .description(Some("compare the whole JSON value converted to a scalar")),
            );
        }

        def
    }

    /// `JSON_at_comparison_exp { path: String!, json, integer, ... }`
    fn json_at(&mut self) -> TypeRef {
        let name = "JSON_at_comparison_exp".to_string();

        if !self.shared.contains_key(&name) {
            let mut def = InputObjectType::new(&name)
                .field(InputValueDef::new("path", TypeRef::named("String").non_null()))
                .field(InputValueDef::new(
                    "json",
                    TypeRef::named("JSON_comparison_exp"),
                ));

            for ty in PATH_TARGETS {
                let comparison = self.comparison(ty);
                def.fields.push(InputValueDef::new(ty.as_str(), comparison));
            }

            self.shared.insert(name.clone(), TypeDef::InputObject(def));
        }

        TypeRef::Named(name)
    }

    /// `JSON_cast_exp { integer, real, text, boolean }`
    fn json_cast(&mut self) -> TypeRef {
        let name = "JSON_cast_exp".to_string();

        if !self.shared.contains_key(&name) {
            let mut def = InputObjectType::new(&name);

            for ty in PATH_TARGETS {
                let comparison = self.comparison(ty);
                def.fields.push(InputValueDef::new(ty.as_str(), comparison));
            }

            self.shared.insert(name.clone(), TypeDef::InputObject(def));
        }

        TypeRef::Named(name)
    }

    /// Ordering input: sortable columns, then object relations.
    pub(super) fn order_by(&mut self, table: Table<'_>) -> Result<()> {
        let mut ty = InputObjectType::new(format!("{}_order_by", table.name)).description(
            format!("Ordering options when selecting data from \"{}\".", table.name),
        );

        for column in table.columns().filter(|column| column.ty().is_sortable()) {
            ty.fields
                .push(InputValueDef::new(column.name, TypeRef::named("order_by")));
        }

        for (name, relation) in &table.config.relations {
            if relation.is_object() {
                ty.fields.push(InputValueDef::new(
                    name.as_str(),
                    TypeRef::named(format!("{}_order_by", relation.remote_table)),
                ));
            }
        }

        self.add(TypeDef::InputObject(ty))?;
        Ok(())
    }

    pub(super) fn select_column(&mut self, table: Table<'_>) -> Result<()> {
        let ty = table.columns().fold(
            EnumType::new(format!("{}_select_column", table.name)).description(format!(
                "select columns of table \"{}\"",
                table.name
            )),
            |ty, column| ty.value(column.name, Some("column name")),
        );

        self.add(TypeDef::Enum(ty))?;
        Ok(())
    }
}
