use super::{Scope, SqlMapper};
use crate::{Delimited, Ident, Literal, Placeholder, ToSql};

use graphlite_core::schema::ColumnType;
use graphlite_core::stmt::{BoolExp, ComparisonExp, ComparisonOp, PathTarget, SqlValue};
use graphlite_core::Result;
use serde_json::Value;

/// Columns of a `json_tree` with containers reduced to empty placeholders, so
/// structure is compared node by node rather than by whole sub-documents.
const TREE_COLUMNS: &str = "SELECT type,fullkey,(CASE type WHEN 'object' THEN '{}' WHEN 'array' THEN '[]' WHEN 'null' THEN 'null' ELSE value END) AS value FROM json_tree(";

impl<'a> SqlMapper<'a> {
    /// Compiles a boolean expression into conditions to be joined with `AND`.
    ///
    /// Composites that end up empty contribute nothing.
    pub fn filter(&mut self, exp: &BoolExp) -> Result<Vec<String>> {
        let mut conds = vec![];
        self.filter_into(exp, &mut conds)?;
        Ok(conds)
    }

    /// The whole `WHERE` predicate, or `None` when nothing constrains rows.
    pub(crate) fn predicate(&mut self, exp: Option<&BoolExp>) -> Result<Option<String>> {
        let conds = match exp {
            Some(exp) => self.filter(exp)?,
            None => return Ok(None),
        };

        if conds.is_empty() {
            return Ok(None);
        }

        let mut sql = String::new();
        fmt!(&mut sql, Delimited(conds, " AND "));
        Ok(Some(sql))
    }

    fn filter_into(&mut self, exp: &BoolExp, conds: &mut Vec<String>) -> Result<()> {
        match exp {
            BoolExp::And(items) => {
                for item in items {
                    self.filter_into(item, conds)?;
                }
            }
            BoolExp::Or(items) => {
                let mut alternatives = vec![];

                for item in items {
                    let mut inner = self.filter(item)?;

                    match inner.len() {
                        0 => {}
                        1 => alternatives.append(&mut inner),
                        _ => {
                            let mut sql = String::new();
                            fmt!(&mut sql, "(" Delimited(inner, " AND ") ")");
                            alternatives.push(sql);
                        }
                    }
                }

                if !alternatives.is_empty() {
                    let mut sql = String::new();
                    fmt!(&mut sql, "(" Delimited(alternatives, " OR ") ")");
                    conds.push(sql);
                }
            }
            BoolExp::Not(item) => {
                let inner = self.filter(item)?;

                if !inner.is_empty() {
                    let mut sql = String::new();
                    fmt!(&mut sql, "NOT (" Delimited(inner, " AND ") ")");
                    conds.push(sql);
                }
            }
            BoolExp::Column { column, exp } => {
                let column = self.column(column)?;
                let lhs = self.column_ref(column);
                self.compare(&lhs, exp, conds);
            }
            BoolExp::Relation { relation, exp } => {
                let cond = self.with_relation(relation, Scope::Filter, |sub, join| {
                    let nested = sub.filter(exp)?;

                    let mut sql = String::new();
                    fmt!(&mut sql, "EXISTS (SELECT 1 FROM " sub.table_ref() " WHERE " join);
                    if !nested.is_empty() {
                        fmt!(&mut sql, " AND " Delimited(nested, " AND "));
                    }
                    sql.push(')');
                    Ok(sql)
                })?;

                conds.push(cond);
            }
        }

        Ok(())
    }

    /// One condition per operator of `exp` applied to `lhs`.
    fn compare(&mut self, lhs: &str, exp: &ComparisonExp, conds: &mut Vec<String>) {
        for op in &exp.ops {
            let mut sql = String::new();

            match op {
                ComparisonOp::Binary(op, value) => {
                    let p = self.bind_operand(exp.ty, value);
                    fmt!(&mut sql, lhs " " op.as_sql() " " p);
                }
                ComparisonOp::Pattern(op, pattern) => {
                    let p = self.bind(SqlValue::from(pattern.as_str()));
                    fmt!(&mut sql, lhs " " op.as_sql() " " p);
                }
                ComparisonOp::In(values) => {
                    let p = self.bind_list(values);
                    fmt!(&mut sql, "EXISTS " Member(p, exp.ty, lhs));
                }
                ComparisonOp::NotIn(values) => {
                    let p = self.bind_list(values);
                    fmt!(&mut sql, "NOT EXISTS " Member(p, exp.ty, lhs));
                }
                ComparisonOp::IsNull(is_null) => {
                    let p = self.bind(SqlValue::from(*is_null));
                    fmt!(&mut sql, lhs " ISNULL = NOT NOT " p);
                }
                ComparisonOp::HasKey(key) => {
                    let p = self.bind(SqlValue::from(key.as_str()));
                    fmt!(&mut sql, "EXISTS (SELECT 1 FROM json_each(" lhs ") WHERE key = " p ")");
                }
                ComparisonOp::HasKeysAll(keys) => {
                    let p = self.bind_keys(keys);
                    fmt!(&mut sql,
                        "NOT EXISTS (SELECT 1 FROM json_each(" p ") AS \"$inp\" LEFT JOIN json_each("
                        lhs ") AS \"$src\" ON \"$src\".key = \"$inp\".value WHERE \"$src\".key IS NULL)");
                }
                ComparisonOp::HasKeysAny(keys) => {
                    let p = self.bind_keys(keys);
                    fmt!(&mut sql,
                        "EXISTS (SELECT 1 FROM json_each(" lhs ") AS \"$src\" WHERE EXISTS (SELECT 1 FROM json_each("
                        p ") AS \"$inp\" WHERE \"$src\".key = \"$inp\".value))");
                }
                ComparisonOp::Contains(value) => {
                    let p = self.bind(SqlValue::json(value));
                    containment(&mut sql, lhs, p, "\"$inp\" LEFT JOIN \"$src\"", "\"$src\"");
                }
                ComparisonOp::ContainedIn(value) => {
                    let p = self.bind(SqlValue::json(value));
                    containment(&mut sql, lhs, p, "\"$src\" LEFT JOIN \"$inp\"", "\"$inp\"");
                }
                ComparisonOp::Length(inner) => {
                    fmt!(&mut sql, "json_array_length(" lhs ")");
                    self.compare(&sql, inner, conds);
                    continue;
                }
                ComparisonOp::At { path, targets } => {
                    for (target, inner) in targets {
                        let mut lhs_at = String::new();

                        match target {
                            PathTarget::Json => fmt!(&mut lhs_at, lhs " -> " Literal(path)),
                            PathTarget::Scalar(ty) => fmt!(&mut lhs_at,
                                "CAST(" lhs " ->> " Literal(path) " AS " ty.sql_cast_type() ")"),
                        }

                        self.compare(&lhs_at, inner, conds);
                    }
                    continue;
                }
            }

            conds.push(sql);
        }
    }

    /// JSON operands bind as JSON text so they compare against extracted
    /// JSON; everything else binds as a plain SQL value.
    fn bind_operand(&mut self, ty: ColumnType, value: &Value) -> Placeholder {
        if ty.is_json() {
            self.bind(SqlValue::json(value))
        } else {
            self.bind(SqlValue::from_json(value))
        }
    }

    fn bind_list(&mut self, values: &[Value]) -> Placeholder {
        self.bind(SqlValue::json(&Value::Array(values.to_vec())))
    }

    fn bind_keys(&mut self, keys: &[String]) -> Placeholder {
        let keys = keys.iter().cloned().map(Value::String).collect();
        self.bind(SqlValue::json(&Value::Array(keys)))
    }
}

/// Subquery over the elements of the list bound at `.0` equal to `.2`.
///
/// `json_each` unwraps scalar elements, so a JSON operand compares against
/// each element re-read as JSON text instead.
struct Member<'a>(Placeholder, ColumnType, &'a str);

impl ToSql for Member<'_> {
    fn to_sql(self, f: &mut String) {
        let Member(p, ty, lhs) = self;

        if ty.is_json() {
            fmt!(f, "(SELECT 1 FROM json_each(" p ") WHERE " p " -> fullkey = " lhs ")");
        } else {
            fmt!(f, "(SELECT 1 FROM json_each(" p ") WHERE value = " lhs ")");
        }
    }
}

/// `NOT EXISTS` over the node-wise difference of two `json_tree`s; `join`
/// names the side every node must be found in via `missing`.
fn containment(sql: &mut String, lhs: &str, p: Placeholder, join: &str, missing: &str) {
    fmt!(sql,
        "NOT EXISTS (WITH " Ident("$src") " AS (" TREE_COLUMNS lhs ")), "
        Ident("$inp") " AS (" TREE_COLUMNS p ")) SELECT 1 FROM " join
        " ON \"$src\".fullkey = \"$inp\".fullkey WHERE " missing
        ".type IS NULL OR \"$src\".type != \"$inp\".type OR \"$src\".value != \"$inp\".value)");
}
