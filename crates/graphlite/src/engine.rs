mod connect;

use crate::schema::{self as types, RootField, TypeDefs};
use graphlite_core::{
    driver::{CompiledQuery, MutationResult, Row, Runtime},
    schema::RootOperation,
    stmt::FieldInfo,
    Error, Result, Schema,
};

use serde_json::{Map, Value};
use std::sync::Arc;

/// Resolves root fields: compiles each requested field to SQL, runs it on
/// the [`Runtime`] and decodes the JSON the database built.
///
/// Cloning is cheap; clones share the schema and the runtime.
#[derive(Debug, Clone)]
pub struct Engine {
    shared: Arc<Shared>,
}

#[derive(Debug)]
struct Shared {
    schema: Schema,
    types: TypeDefs,
    runtime: Box<dyn Runtime>,
}

impl Engine {
    /// Generates the type descriptions for `schema` and binds them to
    /// `runtime`.
    pub fn new(schema: Schema, runtime: impl Runtime) -> Result<Engine> {
        let types = types::generate(&schema)?;

        Ok(Engine {
            shared: Arc::new(Shared {
                schema,
                types,
                runtime: Box::new(runtime),
            }),
        })
    }

    pub fn schema(&self) -> &Schema {
        &self.shared.schema
    }

    pub fn types(&self) -> &TypeDefs {
        &self.shared.types
    }

    pub fn runtime(&self) -> &dyn Runtime {
        &*self.shared.runtime
    }

    /// Resolves one root field, returning the value of its response key.
    pub async fn execute(&self, field: &FieldInfo) -> Result<Value> {
        let root = self.root_field(&field.name)?;
        let schema = &self.shared.schema;
        let runtime = &self.shared.runtime;
        let table = root.table.as_str();

        match root.operation {
            RootOperation::Select => {
                let stmt = graphlite_sql::query(schema, table, field)?;
                log_statement(field, &stmt);

                let rows = runtime.all(&stmt.sql, &stmt.params).await?;
                rows.iter()
                    .map(|row| row.json("value"))
                    .collect::<Result<Vec<_>>>()
                    .map(Value::Array)
            }
            RootOperation::SelectByPk | RootOperation::SelectAggregate => {
                let stmt = if root.operation == RootOperation::SelectByPk {
                    graphlite_sql::query_by_pk(schema, table, field)?
                } else {
                    graphlite_sql::query_aggregate(schema, table, field)?
                };
                log_statement(field, &stmt);

                match runtime.one(&stmt.sql, &stmt.params).await? {
                    Some(row) => row.json("value"),
                    None => Ok(Value::Null),
                }
            }
            RootOperation::Insert | RootOperation::Update | RootOperation::Delete => {
                let stmt = match root.operation {
                    RootOperation::Insert => graphlite_sql::insert(schema, table, field)?,
                    RootOperation::Update => graphlite_sql::update(schema, table, field)?,
                    _ => graphlite_sql::delete(schema, table, field)?,
                };
                log_statement(field, &stmt);

                let result = runtime.mutate(&stmt).await?;
                mutation_response(table, field, &result)
            }
            RootOperation::InsertOne | RootOperation::UpdateByPk | RootOperation::DeleteByPk => {
                let stmt = match root.operation {
                    RootOperation::InsertOne => graphlite_sql::insert_one(schema, table, field)?,
                    RootOperation::UpdateByPk => graphlite_sql::update_by_pk(schema, table, field)?,
                    _ => graphlite_sql::delete_by_pk(schema, table, field)?,
                };
                log_statement(field, &stmt);

                let result = runtime.mutate(&stmt).await?;
                match result.returning.first() {
                    Some(row) => row.json("value"),
                    None => Ok(Value::Null),
                }
            }
            RootOperation::UpdateMany => {
                let batch = graphlite_sql::update_many(schema, table, field)?;
                for stmt in &batch.statements {
                    log_statement(field, stmt);
                }

                let results = runtime.mutate_batch(&batch).await?;
                results
                    .iter()
                    .map(|result| mutation_response(table, field, result))
                    .collect::<Result<Vec<_>>>()
                    .map(Value::Array)
            }
        }
    }

    /// Resolves several root fields in order, keyed by their aliases.
    ///
    /// Execution stops at the first failing field; fields already executed
    /// are not rolled back.
    pub async fn execute_all(&self, fields: &[FieldInfo]) -> Result<Value> {
        let mut response = Map::new();

        for field in fields {
            if response.contains_key(&field.alias) {
                return Err(Error::invalid_statement(format!(
                    "duplicate response key `{}`",
                    field.alias
                )));
            }

            let value = self.execute(field).await?;
            response.insert(field.alias.clone(), value);
        }

        Ok(Value::Object(response))
    }

    fn root_field(&self, name: &str) -> Result<&RootField> {
        self.shared
            .types
            .root_field(name)
            .ok_or_else(|| Error::invalid_statement(format!("unknown root field `{name}`")))
    }
}

fn log_statement(field: &FieldInfo, stmt: &CompiledQuery) {
    log::debug!(
        "compiled `{}`; sql={}; params={}",
        field.name,
        stmt.sql,
        stmt.params.len()
    );
}

/// Builds a `<table>_mutation_response` object with the keys `field` asked
/// for.
fn mutation_response(table: &str, field: &FieldInfo, result: &MutationResult) -> Result<Value> {
    let mut response = Map::new();

    for sub in &field.subfields {
        let value = match sub.name.as_str() {
            "affected_rows" => Value::from(result.affected_rows),
            "returning" => Value::Array(returning(&result.returning)?),
            "__typename" => Value::from(format!("{table}_mutation_response")),
            name => {
                return Err(Error::invalid_statement(format!(
                    "unknown field `{name}` in `{table}_mutation_response`"
                )))
            }
        };

        response.insert(sub.alias.clone(), value);
    }

    Ok(Value::Object(response))
}

fn returning(rows: &[Row]) -> Result<Vec<Value>> {
    rows.iter().map(|row| row.json("value")).collect()
}
