#![allow(dead_code)]

use graphlite_core::stmt::{FieldInfo, SqlValue};
use graphlite_core::Schema;

pub fn schema() -> Schema {
    Schema::from_json(
        r#"{
        "tables": {
            "users": {
                "columns": {
                    "id": { "type": "integer", "primary_key": true },
                    "name": { "type": "text", "not_null": true },
                    "email": { "type": "text" },
                    "active": { "type": "boolean", "not_null": true },
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
                    "likes": { "type": "integer", "default": "0" }
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
    }"#,
    )
    .unwrap()
}

pub fn field(name: &str) -> FieldInfo {
    FieldInfo::new(name)
}

pub fn text(value: &str) -> SqlValue {
    SqlValue::Text(value.to_string())
}

pub fn int(value: i64) -> SqlValue {
    SqlValue::Integer(value)
}

/// Number of distinct `?N` placeholders in `sql`.
pub fn placeholders(sql: &str) -> usize {
    let mut seen = std::collections::BTreeSet::new();
    let bytes = sql.as_bytes();

    for (i, b) in bytes.iter().enumerate() {
        if *b == b'?' {
            let digits: String = sql[i + 1..]
                .chars()
                .take_while(|c| c.is_ascii_digit())
                .collect();

            if !digits.is_empty() {
                seen.insert(digits.parse::<usize>().unwrap());
            }
        }
    }

    seen.len()
}
