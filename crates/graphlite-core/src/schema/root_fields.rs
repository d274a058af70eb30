use serde::{Deserialize, Serialize};

/// Per-table overrides for the generated root field names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RootFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub select: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub select_by_pk: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub select_aggregate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insert: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insert_one: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_by_pk: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_many: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete_by_pk: Option<String>,
}

impl RootFields {
    /// Name of the root field for `op` on the table `typename`.
    pub fn name(&self, op: RootOperation, typename: &str) -> String {
        let custom = match op {
            RootOperation::Select => &self.select,
            RootOperation::SelectByPk => &self.select_by_pk,
            RootOperation::SelectAggregate => &self.select_aggregate,
            RootOperation::Insert => &self.insert,
            RootOperation::InsertOne => &self.insert_one,
            RootOperation::Update => &self.update,
            RootOperation::UpdateByPk => &self.update_by_pk,
            RootOperation::UpdateMany => &self.update_many,
            RootOperation::Delete => &self.delete,
            RootOperation::DeleteByPk => &self.delete_by_pk,
        };

        match custom {
            Some(name) => name.clone(),
            None => op.default_name(typename),
        }
    }
}

/// The operations exposed as root fields for each table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RootOperation {
    Select,
    SelectByPk,
    SelectAggregate,
    Insert,
    InsertOne,
    Update,
    UpdateByPk,
    UpdateMany,
    Delete,
    DeleteByPk,
}

impl RootOperation {
    pub const ALL: [RootOperation; 10] = [
        RootOperation::Select,
        RootOperation::SelectByPk,
        RootOperation::SelectAggregate,
        RootOperation::Insert,
        RootOperation::InsertOne,
        RootOperation::Update,
        RootOperation::UpdateByPk,
        RootOperation::UpdateMany,
        RootOperation::Delete,
        RootOperation::DeleteByPk,
    ];

    pub fn default_name(self, typename: &str) -> String {
        match self {
            RootOperation::Select => typename.to_string(),
            RootOperation::SelectByPk => format!("{typename}_by_pk"),
            RootOperation::SelectAggregate => format!("{typename}_aggregate"),
            RootOperation::Insert => format!("insert_{typename}"),
            RootOperation::InsertOne => format!("insert_{typename}_one"),
            RootOperation::Update => format!("update_{typename}"),
            RootOperation::UpdateByPk => format!("update_{typename}_by_pk"),
            RootOperation::UpdateMany => format!("update_{typename}_many"),
            RootOperation::Delete => format!("delete_{typename}"),
            RootOperation::DeleteByPk => format!("delete_{typename}_by_pk"),
        }
    }

    pub fn is_mutation(self) -> bool {
        !matches!(
            self,
            RootOperation::Select | RootOperation::SelectByPk | RootOperation::SelectAggregate
        )
    }

    /// Operations addressing a single row by primary key.
    pub fn requires_primary_key(self) -> bool {
        matches!(
            self,
            RootOperation::SelectByPk | RootOperation::UpdateByPk | RootOperation::DeleteByPk
        )
    }
}
