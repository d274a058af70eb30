mod logging_runtime;
pub use logging_runtime::{LoggingRuntime, Op};

use graphlite::{Engine, FieldInfo, Result, Schema, Sqlite};
use serde_json::Value;

use std::sync::{Arc, Mutex};

/// Users, their posts, and comments on posts.
pub const BLOG: &str = r#"{
    "tables": {
        "users": {
            "columns": {
                "id": { "type": "integer", "primary_key": true },
                "name": { "type": "text", "not_null": true },
                "email": { "type": "text" },
                "active": { "type": "boolean", "not_null": true, "default": "1" },
                "profile": { "type": "json" }
            },
            "relations": {
                "posts": {
                    "type": "array",
                    "remote_table": "posts",
                    "mappings": { "id": "author_id" }
                }
            }
        },
        "posts": {
            "columns": {
                "id": { "type": "integer", "primary_key": true },
                "title": { "type": "text", "not_null": true },
                "body": { "type": "text" },
                "author_id": { "type": "integer" },
                "score": { "type": "real" },
                "published": { "type": "boolean" },
                "tags": { "type": "json" }
            },
            "relations": {
                "author": {
                    "type": "object",
                    "remote_table": "users",
                    "mappings": { "author_id": "id" }
                },
                "comments": {
                    "type": "array",
                    "remote_table": "comments",
                    "mappings": { "id": "post_id" }
                }
            }
        },
        "comments": {
            "columns": {
                "id": { "type": "integer", "primary_key": true },
                "post_id": { "type": "integer", "not_null": true },
                "body": { "type": "text", "not_null": true },
                "likes": { "type": "integer", "not_null": true, "default": "0" }
            },
            "relations": {
                "post": {
                    "type": "object",
                    "remote_table": "posts",
                    "mappings": { "post_id": "id" }
                }
            }
        }
    }
}"#;

const SEED: &str = r#"
INSERT INTO "users" ("id", "name", "email", "active", "profile") VALUES
    (1, 'ann', 'ann@example.com', 1, '{"age":30,"roles":["admin"]}'),
    (2, 'bob', NULL, 0, NULL),
    (3, 'cat', 'cat@example.com', 1, '{"age":20}');

INSERT INTO "posts" ("id", "title", "body", "author_id", "score", "published", "tags") VALUES
    (1, 'hello world', 'first', 1, 4.5, 1, '["intro","news"]'),
    (2, 'foo bar', 'second', 1, 3.0, 0, '[]'),
    (3, 'news', NULL, 2, NULL, 1, NULL),
    (4, 'orphan', NULL, NULL, 1.5, NULL, NULL);

INSERT INTO "comments" ("id", "post_id", "body", "likes") VALUES
    (1, 1, 'nice', 3),
    (2, 1, 'meh', 0),
    (3, 3, 'ok', 1);
"#;

pub fn blog_schema() -> Schema {
    Schema::from_json(BLOG).unwrap()
}

/// An engine over a seeded in-memory database.
pub struct Blog {
    pub engine: Engine,
    ops_log: Arc<Mutex<Vec<Op>>>,
}

impl Blog {
    pub async fn run(&self, field: FieldInfo) -> Value {
        self.engine.execute(&field).await.unwrap()
    }

    pub async fn try_run(&self, field: FieldInfo) -> Result<Value> {
        self.engine.execute(&field).await
    }

    /// Statements executed so far.
    pub fn ops(&self) -> Vec<Op> {
        self.ops_log.lock().unwrap().clone()
    }
}

pub fn setup() -> Blog {
    let _ = env_logger::builder().is_test(true).try_init();

    let schema = blog_schema();
    let sqlite = Sqlite::in_memory().unwrap();
    sqlite.push_schema(&schema).unwrap();
    sqlite.execute_batch(SEED).unwrap();

    let runtime = LoggingRuntime::new(sqlite);
    let ops_log = runtime.ops_log_handle();

    Blog {
        engine: Engine::new(schema, runtime).unwrap(),
        ops_log,
    }
}

pub fn field(name: &str) -> FieldInfo {
    FieldInfo::new(name)
}
