//! Typed representation of one request: the field-selection tree and the
//! arguments it carries, parsed against the schema.

mod bool_exp;
pub use bool_exp::BoolExp;

mod comparison;
pub use comparison::{BinaryOp, ComparisonExp, ComparisonOp, PathTarget, PatternOp};

mod field_info;
pub use field_info::FieldInfo;

mod insert;
pub use insert::InsertObjects;

mod on_conflict;
pub use on_conflict::{ConflictTarget, OnConflict};

mod order_by;
pub use order_by::{Direction, OrderBy};

mod parse;

mod primary_key;
pub use primary_key::PrimaryKey;

mod select_args;
pub use select_args::SelectArgs;

mod setter;
pub use setter::{PathMutation, Setter};

mod value;
pub use value::SqlValue;
