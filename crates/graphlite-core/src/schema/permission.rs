use serde::{Deserialize, Serialize};

/// A boolean expression in the same shape as a `where` argument.
pub type PermissionExpression = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InsertPermission {
    #[serde(default)]
    pub check: PermissionExpression,
    pub columns: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SelectPermission {
    #[serde(default)]
    pub filter: PermissionExpression,
    pub columns: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdatePermission {
    #[serde(default)]
    pub filter: PermissionExpression,
    #[serde(default)]
    pub check: PermissionExpression,
    pub columns: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeletePermission {
    #[serde(default)]
    pub filter: PermissionExpression,
}
