mod engine;
pub use engine::Engine;

pub mod schema;
pub use schema::{generate, TypeDefs};

pub use graphlite_core::{
    async_trait,
    driver::{self, Runtime},
    stmt::{self, FieldInfo},
    Error, Result, Schema,
};

pub use graphlite_core::schema::{
    ColumnConfig, ColumnType, RelationConfig, RootOperation, SchemaConfig, TableConfig,
};

#[cfg(feature = "sqlite")]
pub use graphlite_driver_sqlite::Sqlite;
