use super::{parse, BoolExp, FieldInfo, OrderBy};
use crate::schema::{Schema, Table};
use crate::{Error, Result};

/// Filtering, ordering and pagination of a list selection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectArgs {
    pub filter: Option<BoolExp>,
    pub order_by: Vec<OrderBy>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl SelectArgs {
    pub fn parse(schema: &Schema, table: Table<'_>, field: &FieldInfo) -> Result<SelectArgs> {
        let mut args = SelectArgs::default();

        for (key, value) in &field.arguments {
            if value.is_null() {
                continue;
            }

            match key.as_str() {
                "where" => args.filter = Some(BoolExp::parse(schema, table, value)?),
                "order_by" => args.order_by = OrderBy::parse(schema, table, value)?,
                "limit" => args.limit = Some(parse::integer(value, "limit")?),
                "offset" => args.offset = Some(parse::integer(value, "offset")?),
                _ => {
                    return Err(Error::invalid_statement(format!(
                        "unknown argument `{key}` on `{}`",
                        field.name
                    )))
                }
            }
        }

        Ok(args)
    }
}
