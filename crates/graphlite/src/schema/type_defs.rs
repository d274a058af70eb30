use super::{ObjectType, TypeDef};
use graphlite_core::schema::RootOperation;

use indexmap::IndexMap;
use std::fmt;

/// The generated schema: every named type plus the two root types.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDefs {
    pub(super) types: IndexMap<String, TypeDef>,
    pub(super) query: ObjectType,
    pub(super) mutation: ObjectType,
    pub(super) root_fields: IndexMap<String, RootField>,
}

/// What a root field resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootField {
    /// Logical name of the table the field operates on.
    pub table: String,
    pub operation: RootOperation,
}

impl TypeDefs {
    pub fn get(&self, name: &str) -> Option<&TypeDef> {
        self.types.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Named types in generation order, root types excluded.
    pub fn types(&self) -> impl Iterator<Item = &TypeDef> {
        self.types.values()
    }

    pub fn query(&self) -> &ObjectType {
        &self.query
    }

    pub fn mutation(&self) -> &ObjectType {
        &self.mutation
    }

    /// Resolves a root query or mutation field name.
    pub fn root_field(&self, name: &str) -> Option<&RootField> {
        self.root_fields.get(name)
    }

    pub fn root_fields(&self) -> impl Iterator<Item = (&str, &RootField)> {
        self.root_fields
            .iter()
            .map(|(name, field)| (name.as_str(), field))
    }
}

/// Prints the schema in SDL.
impl fmt::Display for TypeDefs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for ty in self.types.values() {
            writeln!(f, "{ty}")?;
        }

        writeln!(f, "{}", self.query)?;

        let has_mutation = !self.mutation.fields.is_empty();
        if has_mutation {
            writeln!(f, "{}", self.mutation)?;
        }

        writeln!(f, "schema {{")?;
        writeln!(f, "  query: {}", self.query.name)?;
        if has_mutation {
            writeln!(f, "  mutation: {}", self.mutation.name)?;
        }
        writeln!(f, "}}")
    }
}
