use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RelationConfig {
    #[serde(rename = "type")]
    pub ty: RelationType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,

    pub remote_table: String,

    /// Local column to remote column, joined as a conjunction of equalities.
    pub mappings: IndexMap<String, String>,
}

impl RelationConfig {
    pub fn object(remote_table: impl Into<String>) -> RelationConfig {
        RelationConfig::new(RelationType::Object, remote_table)
    }

    pub fn array(remote_table: impl Into<String>) -> RelationConfig {
        RelationConfig::new(RelationType::Array, remote_table)
    }

    fn new(ty: RelationType, remote_table: impl Into<String>) -> RelationConfig {
        RelationConfig {
            ty,
            comments: None,
            remote_table: remote_table.into(),
            mappings: IndexMap::new(),
        }
    }

    pub fn mapping(mut self, local: impl Into<String>, remote: impl Into<String>) -> Self {
        self.mappings.insert(local.into(), remote.into());
        self
    }

    pub fn is_object(&self) -> bool {
        matches!(self.ty, RelationType::Object)
    }

    pub fn is_array(&self) -> bool {
        matches!(self.ty, RelationType::Array)
    }
}

/// Cardinality of a relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationType {
    /// At most one remote row.
    Object,

    /// Any number of remote rows.
    Array,
}
