use super::parse;
use crate::schema::ColumnType;
use crate::{Error, Result};
use serde_json::Value;

/// The operators applied to one column (or one derived expression), ANDed.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonExp {
    /// Type of the left-hand side; decides how operands are bound.
    pub ty: ColumnType,
    pub ops: Vec<ComparisonOp>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ComparisonOp {
    Binary(BinaryOp, Value),
    Pattern(PatternOp, String),
    In(Vec<Value>),
    NotIn(Vec<Value>),
    IsNull(bool),
    HasKey(String),
    HasKeysAll(Vec<String>),
    HasKeysAny(Vec<String>),
    Contains(Value),
    ContainedIn(Value),

    /// Compare `json_array_length` of the left-hand side.
    Length(Box<ComparisonExp>),

    /// Compare a value extracted at `path`, once per target.
    At {
        path: String,
        targets: Vec<(PathTarget, ComparisonExp)>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Eq,
    Ne,
    Gt,
    Ge,
    Lt,
    Le,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternOp {
    Like,
    NotLike,
    Glob,
    NotGlob,
    Regexp,
    NotRegexp,
}

/// How a JSON path extraction is compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathTarget {
    /// Keep the extracted value as JSON text.
    Json,

    /// Extract the SQL value and cast it.
    Scalar(ColumnType),
}

impl ComparisonExp {
    pub fn parse(ty: ColumnType, value: &Value) -> Result<ComparisonExp> {
        let map = parse::object(value, "comparison expression")?;
        let mut ops = Vec::with_capacity(map.len());

        for (key, value) in map {
            if value.is_null() {
                continue;
            }

            let op = match key.as_str() {
                "_eq" => ComparisonOp::Binary(BinaryOp::Eq, value.clone()),
                "_neq" => ComparisonOp::Binary(BinaryOp::Ne, value.clone()),
                "_gt" => ComparisonOp::Binary(BinaryOp::Gt, value.clone()),
                "_gte" => ComparisonOp::Binary(BinaryOp::Ge, value.clone()),
                "_lt" => ComparisonOp::Binary(BinaryOp::Lt, value.clone()),
                "_lte" => ComparisonOp::Binary(BinaryOp::Le, value.clone()),
                "_in" => ComparisonOp::In(parse::list(value).cloned().collect()),
                "_nin" => ComparisonOp::NotIn(parse::list(value).cloned().collect()),
                "_is_null" => ComparisonOp::IsNull(parse::boolean(value, "`_is_null`")?),
                _ => {
                    if let Some(op) = PatternOp::from_key(key) {
                        require(ty.is_textual(), key, ty)?;
                        ComparisonOp::Pattern(op, parse::string(value, key)?)
                    } else {
                        require(ty.is_json(), key, ty)?;
                        parse_json_op(key, value)?
                    }
                }
            };

            ops.push(op);
        }

        Ok(ComparisonExp { ty, ops })
    }
}

fn parse_json_op(key: &str, value: &Value) -> Result<ComparisonOp> {
    Ok(match key {
        "_has_key" => ComparisonOp::HasKey(parse::string(value, key)?),
        "_has_keys_all" => ComparisonOp::HasKeysAll(parse::strings(value, key)?),
        "_has_keys_any" => ComparisonOp::HasKeysAny(parse::strings(value, key)?),
        "_contains" => ComparisonOp::Contains(value.clone()),
        "_contained_in" => ComparisonOp::ContainedIn(value.clone()),
        "_length" => {
            ComparisonOp::Length(Box::new(ComparisonExp::parse(ColumnType::Integer, value)?))
        }
        "_at" => {
            let map = parse::object(value, "`_at`")?;
            let path = map
                .get("path")
                .ok_or_else(|| Error::invalid_statement("`_at` requires a `path`"))?;

            ComparisonOp::At {
                path: parse::string(path, "`_at.path`")?,
                targets: parse_targets(map.iter().filter(|(key, _)| *key != "path"), true)?,
            }
        }
        "_cast" => {
            let map = parse::object(value, "`_cast`")?;
            ComparisonOp::At {
                path: "$".to_string(),
                targets: parse_targets(map.iter(), false)?,
            }
        }
        _ => {
            return Err(Error::invalid_statement(format!(
                "unknown comparison operator `{key}`"
            )))
        }
    })
}

fn parse_targets<'a>(
    entries: impl Iterator<Item = (&'a String, &'a Value)>,
    allow_json: bool,
) -> Result<Vec<(PathTarget, ComparisonExp)>> {
    let mut targets = vec![];

    for (key, value) in entries {
        if value.is_null() {
            continue;
        }

        let target = match ColumnType::from_name(key) {
            Some(ColumnType::Json) if allow_json => PathTarget::Json,
            Some(ty) if !ty.is_json() => PathTarget::Scalar(ty),
            _ => {
                return Err(Error::invalid_statement(format!(
                    "unknown path comparison type `{key}`"
                )))
            }
        };

        let ty = match target {
            PathTarget::Json => ColumnType::Json,
            PathTarget::Scalar(ty) => ty,
        };

        targets.push((target, ComparisonExp::parse(ty, value)?));
    }

    Ok(targets)
}

fn require(applies: bool, key: &str, ty: ColumnType) -> Result<()> {
    if applies {
        Ok(())
    } else if is_known_operator(key) {
        Err(Error::invalid_statement(format!(
            "operator `{key}` does not apply to {ty} values"
        )))
    } else {
        Err(Error::invalid_statement(format!(
            "unknown comparison operator `{key}`"
        )))
    }
}

fn is_known_operator(key: &str) -> bool {
    PatternOp::from_key(key).is_some()
        || matches!(
            key,
            "_has_key"
                | "_has_keys_all"
                | "_has_keys_any"
                | "_contains"
                | "_contained_in"
                | "_length"
                | "_at"
                | "_cast"
        )
}

impl BinaryOp {
    pub fn as_sql(self) -> &'static str {
        match self {
            BinaryOp::Eq => "=",
            BinaryOp::Ne => "!=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
        }
    }
}

impl core::fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_sql())
    }
}

impl PatternOp {
    fn from_key(key: &str) -> Option<PatternOp> {
        Some(match key {
            "_like" => PatternOp::Like,
            "_nlike" => PatternOp::NotLike,
            "_glob" => PatternOp::Glob,
            "_nglob" => PatternOp::NotGlob,
            "_regexp" => PatternOp::Regexp,
            "_nregexp" => PatternOp::NotRegexp,
            _ => return None,
        })
    }

    pub fn as_sql(self) -> &'static str {
        match self {
            PatternOp::Like => "LIKE",
            PatternOp::NotLike => "NOT LIKE",
            PatternOp::Glob => "GLOB",
            PatternOp::NotGlob => "NOT GLOB",
            PatternOp::Regexp => "REGEXP",
            PatternOp::NotRegexp => "NOT REGEXP",
        }
    }
}
