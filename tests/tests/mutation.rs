use graphlite::stmt::SqlValue;
use pretty_assertions::assert_eq;
use serde_json::json;
use tests::{field, setup};

#[tokio::test]
async fn insert_batch_as_one_parameter() {
    let blog = setup();

    let response = blog
        .run(
            field("insert_posts")
                .arg("objects", json!([{ "title": "a" }, { "title": "b" }]))
                .fields(["affected_rows"])
                .field(field("returning").fields(["id"])),
        )
        .await;

    assert_eq!(
        response,
        json!({ "affected_rows": 2, "returning": [{ "id": 5 }, { "id": 6 }] })
    );

    let op = blog.ops().pop().unwrap();
    assert!(op.sql.contains("json_each(?1)"), "{}", op.sql);
    assert_eq!(
        op.params,
        [SqlValue::Text(r#"[{"title":"a"},{"title":"b"}]"#.to_string())]
    );
}

#[tokio::test]
async fn insert_one_applies_defaults() {
    let blog = setup();

    let user = blog
        .run(
            field("insert_users_one")
                .arg("object", json!({ "name": "dan" }))
                .fields(["id", "name", "active"]),
        )
        .await;

    assert_eq!(user, json!({ "id": 4, "name": "dan", "active": true }));
}

#[tokio::test]
async fn insert_json_and_boolean_columns() {
    let blog = setup();

    blog.run(
        field("insert_posts")
            .arg(
                "objects",
                json!([{ "title": "tagged", "published": true, "tags": ["a", { "b": 1 }] }]),
            )
            .fields(["affected_rows"]),
    )
    .await;

    let post = blog
        .run(
            field("posts_by_pk")
                .arg("id", 5)
                .fields(["published", "tags"]),
        )
        .await;

    assert_eq!(post, json!({ "published": true, "tags": ["a", { "b": 1 }] }));
}

#[tokio::test]
async fn null_json_is_stored_as_null() {
    let blog = setup();

    blog.run(
        field("insert_posts")
            .arg("objects", json!([{ "title": "bulk", "tags": null }]))
            .fields(["affected_rows"]),
    )
    .await;

    blog.run(
        field("insert_posts_one")
            .arg("object", json!({ "title": "one", "tags": null }))
            .fields(["id"]),
    )
    .await;

    let posts = blog
        .run(
            field("posts")
                .arg("where", json!({ "tags": { "_is_null": true }, "id": { "_gt": 4 } }))
                .arg("order_by", json!({ "id": "asc" }))
                .fields(["title", "tags"]),
        )
        .await;

    assert_eq!(
        posts,
        json!([{ "title": "bulk", "tags": null }, { "title": "one", "tags": null }])
    );
}

#[tokio::test]
async fn bulk_insert_fills_omitted_defaults() {
    let blog = setup();

    let response = blog
        .run(
            field("insert_comments")
                .arg(
                    "objects",
                    json!([
                        { "post_id": 2, "body": "a", "likes": 5 },
                        { "post_id": 2, "body": "b" }
                    ]),
                )
                .field(field("returning").fields(["body", "likes"])),
        )
        .await;

    assert_eq!(
        response,
        json!({ "returning": [{ "body": "a", "likes": 5 }, { "body": "b", "likes": 0 }] })
    );
}

#[tokio::test]
async fn upsert_updates_listed_columns() {
    let blog = setup();

    let response = blog
        .run(
            field("insert_users")
                .arg("objects", json!([{ "id": 1, "name": "anne", "email": "other" }]))
                .arg(
                    "on_conflict",
                    json!({ "target": { "columns": ["id"] }, "update_columns": ["name"] }),
                )
                .fields(["affected_rows"])
                .field(field("returning").fields(["name", "email"])),
        )
        .await;

    assert_eq!(
        response,
        json!({
            "affected_rows": 1,
            "returning": [{ "name": "anne", "email": "ann@example.com" }]
        })
    );

    let op = blog.ops().pop().unwrap();
    assert!(
        op.sql.contains(r#" WHERE true ON CONFLICT ("id") DO UPDATE SET "name" = excluded."name""#),
        "{}",
        op.sql
    );
}

#[tokio::test]
async fn upsert_without_update_columns_does_nothing() {
    let blog = setup();

    let response = blog
        .run(
            field("insert_users")
                .arg("objects", json!([{ "id": 2, "name": "robert" }]))
                .arg("on_conflict", json!({ "target": { "columns": ["id"] } }))
                .fields(["affected_rows"]),
        )
        .await;

    assert_eq!(response, json!({ "affected_rows": 0 }));

    let user = blog
        .run(field("users_by_pk").arg("id", 2).fields(["name"]))
        .await;
    assert_eq!(user, json!({ "name": "bob" }));
}

#[tokio::test]
async fn update_set_and_inc() {
    let blog = setup();

    let response = blog
        .run(
            field("update_posts")
                .arg("where", json!({ "author_id": { "_eq": 1 } }))
                .arg("_set", json!({ "body": null }))
                .arg("_inc", json!({ "score": 1 }))
                .fields(["affected_rows"])
                .field(field("returning").fields(["id", "body", "score"])),
        )
        .await;

    assert_eq!(
        response,
        json!({
            "affected_rows": 2,
            "returning": [
                { "id": 1, "body": null, "score": 5.5 },
                { "id": 2, "body": null, "score": 4.0 }
            ]
        })
    );
}

#[tokio::test]
async fn update_by_pk_returns_row() {
    let blog = setup();

    let post = blog
        .run(
            field("update_posts_by_pk")
                .arg("pk_columns", json!({ "id": 4 }))
                .arg("_set", json!({ "title": "adopted", "author_id": 3 }))
                .fields(["title", "author_id"]),
        )
        .await;

    assert_eq!(post, json!({ "title": "adopted", "author_id": 3 }));

    let missing = blog
        .run(
            field("update_posts_by_pk")
                .arg("pk_columns", json!({ "id": 99 }))
                .arg("_set", json!({ "title": "ghost" }))
                .fields(["title"]),
        )
        .await;

    assert_eq!(missing, json!(null));
}

#[tokio::test]
async fn json_array_setters() {
    let blog = setup();

    let appended = blog
        .run(
            field("update_posts_by_pk")
                .arg("pk_columns", json!({ "id": 1 }))
                .arg("_append", json!({ "tags": "more" }))
                .fields(["tags"]),
        )
        .await;
    assert_eq!(appended, json!({ "tags": ["intro", "news", "more"] }));

    let prepended = blog
        .run(
            field("update_posts_by_pk")
                .arg("pk_columns", json!({ "id": 2 }))
                .arg("_prepend", json!({ "tags": "first" }))
                .fields(["tags"]),
        )
        .await;
    assert_eq!(prepended, json!({ "tags": ["first"] }));

    let from_null = blog
        .run(
            field("update_posts_by_pk")
                .arg("pk_columns", json!({ "id": 3 }))
                .arg("_append", json!({ "tags": { "k": 1 } }))
                .fields(["tags"]),
        )
        .await;
    assert_eq!(from_null, json!({ "tags": [{ "k": 1 }] }));
}

#[tokio::test]
async fn json_object_setters() {
    let blog = setup();

    let updated = blog
        .run(
            field("update_users_by_pk")
                .arg("pk_columns", json!({ "id": 1 }))
                .arg("_set_path", json!({ "profile": { "path": "$.age", "value": 31 } }))
                .fields(["profile"]),
        )
        .await;
    assert_eq!(updated, json!({ "profile": { "age": 31, "roles": ["admin"] } }));

    let removed = blog
        .run(
            field("update_users_by_pk")
                .arg("pk_columns", json!({ "id": 1 }))
                .arg("_remove", json!({ "profile": ["$.roles"] }))
                .fields(["profile"]),
        )
        .await;
    assert_eq!(removed, json!({ "profile": { "age": 31 } }));

    let patched = blog
        .run(
            field("update_users_by_pk")
                .arg("pk_columns", json!({ "id": 3 }))
                .arg("_patch", json!({ "profile": { "age": null, "city": "oslo" } }))
                .fields(["profile"]),
        )
        .await;
    assert_eq!(patched, json!({ "profile": { "city": "oslo" } }));
}

#[tokio::test]
async fn setter_on_wrong_column_kind() {
    let blog = setup();

    let err = blog
        .try_run(
            field("update_posts")
                .arg("_append", json!({ "title": "x" }))
                .fields(["affected_rows"]),
        )
        .await
        .unwrap_err();

    assert!(err.is_invalid_statement(), "{err}");
    assert!(blog.ops().is_empty());
}

#[tokio::test]
async fn update_without_setters_is_noop() {
    let blog = setup();

    let response = blog
        .run(
            field("update_posts")
                .arg("where", json!({ "id": { "_eq": 1 } }))
                .fields(["affected_rows"]),
        )
        .await;

    assert_eq!(response, json!({ "affected_rows": 0 }));
}

#[tokio::test]
async fn update_many_runs_in_order() {
    let blog = setup();

    let responses = blog
        .run(
            field("update_posts_many")
                .arg(
                    "updates",
                    json!([
                        { "where": { "id": { "_eq": 1 } }, "_set": { "title": "x" } },
                        { "where": { "id": { "_eq": 2 } } }
                    ]),
                )
                .fields(["affected_rows"]),
        )
        .await;

    assert_eq!(
        responses,
        json!([{ "affected_rows": 1 }, { "affected_rows": 0 }])
    );

    let ops = blog.ops();
    assert_eq!(ops.len(), 2);
    assert!(ops[0].sql.starts_with(r#"UPDATE "posts" SET "title" = ?1"#), "{}", ops[0].sql);
    assert_eq!(ops[1].sql, "SELECT 1 WHERE 0");
}

#[tokio::test]
async fn update_many_rolls_back_on_failure() {
    let blog = setup();

    let err = blog
        .try_run(
            field("update_posts_many")
                .arg(
                    "updates",
                    json!([
                        { "where": { "id": { "_eq": 1 } }, "_set": { "title": "changed" } },
                        { "where": { "id": { "_eq": 3 } }, "_set": { "id": 2 } }
                    ]),
                )
                .fields(["affected_rows"]),
        )
        .await
        .unwrap_err();

    assert!(err.is_driver_operation_failed(), "{err}");

    let post = blog
        .run(field("posts_by_pk").arg("id", 1).fields(["title"]))
        .await;
    assert_eq!(post, json!({ "title": "hello world" }));
}

#[tokio::test]
async fn delete_with_returning() {
    let blog = setup();

    let response = blog
        .run(
            field("delete_comments")
                .arg("where", json!({ "post": { "title": { "_eq": "hello world" } } }))
                .fields(["affected_rows"])
                .field(field("returning").fields(["body"])),
        )
        .await;

    assert_eq!(
        response,
        json!({
            "affected_rows": 2,
            "returning": [{ "body": "nice" }, { "body": "meh" }]
        })
    );

    let remaining = blog.run(field("comments").fields(["id"])).await;
    assert_eq!(remaining, json!([{ "id": 3 }]));
}

#[tokio::test]
async fn delete_by_pk_twice() {
    let blog = setup();

    let deleted = blog
        .run(field("delete_comments_by_pk").arg("id", 3).fields(["body"]))
        .await;
    assert_eq!(deleted, json!({ "body": "ok" }));

    let again = blog
        .run(field("delete_comments_by_pk").arg("id", 3).fields(["body"]))
        .await;
    assert_eq!(again, json!(null));
}

#[tokio::test]
async fn not_null_violation() {
    let blog = setup();

    let err = blog
        .try_run(
            field("insert_users_one")
                .arg("object", json!({ "email": "nobody@example.com" }))
                .fields(["id"]),
        )
        .await
        .unwrap_err();

    assert!(err.is_driver_operation_failed(), "{err}");

    let users = blog
        .run(field("users_aggregate").field(field("aggregate").fields(["count"])))
        .await;
    assert_eq!(users, json!({ "aggregate": { "count": 3 } }));
}
