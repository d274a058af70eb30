use graphlite::Engine;
use serde_json::json;
use tests::{blog_schema, field};

#[tokio::test]
async fn connect_in_memory() {
    let engine = Engine::connect(blog_schema(), "sqlite::memory:").unwrap();

    let inserted = engine
        .execute(
            &field("insert_users_one")
                .arg("object", json!({ "name": "eve" }))
                .fields(["id", "active"]),
        )
        .await
        .unwrap();
    assert_eq!(inserted, json!({ "id": 1, "active": true }));

    let users = engine
        .execute(&field("users").fields(["name"]))
        .await
        .unwrap();
    assert_eq!(users, json!([{ "name": "eve" }]));
}

#[test]
fn connect_rejects_unknown_scheme() {
    let err = Engine::connect(blog_schema(), "postgres://localhost/blog").unwrap_err();
    assert!(err.is_invalid_connection_url(), "{err}");
    assert!(err.to_string().contains("scheme=postgres"), "{err}");
}

#[test]
fn connect_rejects_malformed_url() {
    let err = Engine::connect(blog_schema(), "not a url").unwrap_err();
    assert!(err.is_invalid_connection_url(), "{err}");
}

#[test]
fn connected_engine_exposes_type_defs() {
    let engine = Engine::connect(blog_schema(), "sqlite::memory:").unwrap();
    let sdl = engine.types().to_string();

    assert!(sdl.contains("  users_by_pk(id: Int!): users\n"), "{sdl}");
    assert!(sdl.contains("  delete_comments_by_pk(id: Int!): comments\n"), "{sdl}");
    assert!(sdl.contains("schema {\n  query: Query\n  mutation: Mutation\n}\n"));
}
