use super::ToSql;

use graphlite_core::stmt::SqlValue;

/// Collects bound values in placeholder order.
pub trait Params {
    fn push(&mut self, param: SqlValue) -> Placeholder;
}

/// A numbered positional placeholder, rendered as `?N`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholder(pub usize);

impl Params for Vec<SqlValue> {
    fn push(&mut self, value: SqlValue) -> Placeholder {
        self.push(value);
        Placeholder(self.len())
    }
}

impl ToSql for Placeholder {
    fn to_sql(self, f: &mut String) {
        use std::fmt::Write;

        // Writing into a `String` cannot fail.
        let _ = write!(f, "?{}", self.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholders_are_one_based() {
        let mut params: Vec<SqlValue> = vec![];

        assert_eq!(Params::push(&mut params, SqlValue::from(1_i64)), Placeholder(1));
        assert_eq!(Params::push(&mut params, SqlValue::from("a")), Placeholder(2));

        let mut sql = String::new();
        Placeholder(2).to_sql(&mut sql);
        assert_eq!(sql, "?2");
    }
}
