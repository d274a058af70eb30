use super::{Comma, Literal, ToSql};
use graphlite_core::{Error, Result};

/// A `json_object('key', expr, ...)` expression under construction.
#[derive(Debug, Default)]
pub(crate) struct JsonObject {
    entries: Vec<(String, String)>,
}

impl JsonObject {
    /// Adds an entry. Keys are response aliases and must be unique.
    pub(crate) fn add(&mut self, key: &str, expr: String) -> Result<()> {
        if self.entries.iter().any(|(existing, _)| existing == key) {
            return Err(Error::invalid_statement(format!(
                "duplicate selection alias `{key}`"
            )));
        }

        self.entries.push((key.to_string(), expr));
        Ok(())
    }

    pub(crate) fn into_sql(self) -> String {
        let mut sql = String::new();
        self.to_sql(&mut sql);
        sql
    }
}

impl ToSql for JsonObject {
    fn to_sql(self, f: &mut String) {
        let entries = self
            .entries
            .into_iter()
            .map(|(key, expr)| (Literal(key), expr));

        fmt!(f, "json_object(" Comma(entries) ")");
    }
}
