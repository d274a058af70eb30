//! Type descriptions generated from a [`Schema`](graphlite_core::Schema).

mod generate;
pub use generate::generate;

mod type_def;
pub use type_def::{
    EnumType, EnumValueDef, FieldDef, InputObjectType, InputValueDef, ObjectType, ScalarType,
    TypeDef,
};

mod type_defs;
pub use type_defs::{RootField, TypeDefs};

mod type_ref;
pub use type_ref::TypeRef;
