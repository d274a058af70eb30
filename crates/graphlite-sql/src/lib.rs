//! Compiles request trees into SQLite statements that return JSON text.

#[macro_use]
mod fmt;
use fmt::ToSql;

mod ddl;
pub use ddl::create_table;

mod delim;
use delim::{Comma, Delimited};

mod ident;
use ident::{Ident, Literal};

mod json;
use json::JsonObject;

mod mapper;
pub use mapper::SqlMapper;

mod params;
pub use params::{Params, Placeholder};

mod statement;
pub use statement::{
    delete, delete_by_pk, insert, insert_one, query, query_aggregate, query_by_pk, update,
    update_by_pk, update_many,
};
