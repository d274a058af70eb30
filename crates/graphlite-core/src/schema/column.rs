use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColumnConfig {
    /// Physical column name, when it differs from the field name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dbname: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,

    #[serde(rename = "type")]
    pub ty: ColumnType,

    #[serde(default)]
    pub not_null: bool,

    /// SQL expression used as the column default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,

    #[serde(default)]
    pub primary_key: bool,

    /// Fill the column with a random uuid when an insert omits it.
    #[serde(default)]
    pub generate_uuid: bool,
}

impl ColumnConfig {
    pub fn new(ty: ColumnType) -> ColumnConfig {
        ColumnConfig {
            dbname: None,
            comments: None,
            ty,
            not_null: false,
            default: None,
            primary_key: false,
            generate_uuid: false,
        }
    }

    pub fn not_null(mut self) -> Self {
        self.not_null = true;
        self
    }

    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    pub fn dbname(mut self, dbname: impl Into<String>) -> Self {
        self.dbname = Some(dbname.into());
        self
    }

    pub fn default_expr(mut self, expr: impl Into<String>) -> Self {
        self.default = Some(expr.into());
        self
    }

    /// A column is nullable unless declared `not_null` or part of the key.
    pub fn is_nullable(&self) -> bool {
        !(self.not_null || self.primary_key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Integer,
    Real,
    Uuid,
    Text,
    Boolean,
    Timestamp,
    Json,
}

impl ColumnType {
    /// Type name used in `CAST(... AS <type>)`.
    pub fn sql_cast_type(self) -> &'static str {
        match self {
            ColumnType::Integer | ColumnType::Boolean => "INTEGER",
            ColumnType::Real => "REAL",
            ColumnType::Uuid | ColumnType::Text | ColumnType::Timestamp | ColumnType::Json => {
                "TEXT"
            }
        }
    }

    pub fn is_numeric(self) -> bool {
        matches!(self, ColumnType::Integer | ColumnType::Real)
    }

    pub fn is_sortable(self) -> bool {
        !matches!(self, ColumnType::Json)
    }

    pub fn is_json(self) -> bool {
        matches!(self, ColumnType::Json)
    }

    /// Text-like columns accept the `LIKE`/`GLOB`/`REGEXP` operators.
    pub fn is_textual(self) -> bool {
        matches!(self, ColumnType::Text)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ColumnType::Integer => "integer",
            ColumnType::Real => "real",
            ColumnType::Uuid => "uuid",
            ColumnType::Text => "text",
            ColumnType::Boolean => "boolean",
            ColumnType::Timestamp => "timestamp",
            ColumnType::Json => "json",
        }
    }

    pub fn from_name(name: &str) -> Option<ColumnType> {
        Some(match name {
            "integer" => ColumnType::Integer,
            "real" => ColumnType::Real,
            "uuid" => ColumnType::Uuid,
            "text" => ColumnType::Text,
            "boolean" => ColumnType::Boolean,
            "timestamp" => ColumnType::Timestamp,
            "json" => ColumnType::Json,
            _ => return None,
        })
    }
}

impl core::fmt::Display for ColumnType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
