use graphlite_core::stmt::SqlValue;
use rusqlite::{
    types::{ToSql, ToSqlOutput, Value as RawValue, ValueRef},
    Row,
};

/// Binds a [`SqlValue`] as a statement parameter.
#[derive(Debug)]
pub(crate) struct Value<'a>(pub(crate) &'a SqlValue);

impl Value<'_> {
    /// Reads column `index` of `row`.
    ///
    /// Blobs are never produced by compiled statements; if one shows up it is
    /// read as lossy UTF-8 text.
    pub(crate) fn from_sql(row: &Row<'_>, index: usize) -> rusqlite::Result<SqlValue> {
        let value: RawValue = row.get(index)?;

        Ok(match value {
            RawValue::Null => SqlValue::Null,
            RawValue::Integer(value) => SqlValue::Integer(value),
            RawValue::Real(value) => SqlValue::Real(value),
            RawValue::Text(value) => SqlValue::Text(value),
            RawValue::Blob(value) => SqlValue::Text(String::from_utf8_lossy(&value).into_owned()),
        })
    }
}

impl ToSql for Value<'_> {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self.0 {
            SqlValue::Null => ToSqlOutput::Owned(RawValue::Null),
            SqlValue::Integer(v) => ToSqlOutput::Owned(RawValue::Integer(*v)),
            SqlValue::Real(v) => ToSqlOutput::Owned(RawValue::Real(*v)),
            SqlValue::Text(v) => ToSqlOutput::Borrowed(ValueRef::Text(v.as_bytes())),
        })
    }
}
