use graphlite::stmt::SqlValue;
use pretty_assertions::assert_eq;
use serde_json::json;
use tests::{field, setup};

#[tokio::test]
async fn object_relation() {
    let blog = setup();

    let posts = blog
        .run(
            field("posts")
                .arg("order_by", json!({ "id": "asc" }))
                .fields(["title"])
                .field(field("author").fields(["name"])),
        )
        .await;

    assert_eq!(
        posts,
        json!([
            { "title": "hello world", "author": { "name": "ann" } },
            { "title": "foo bar", "author": { "name": "ann" } },
            { "title": "news", "author": { "name": "bob" } },
            { "title": "orphan", "author": null }
        ])
    );

    let ops = blog.ops();
    assert_eq!(ops.len(), 1);
    assert!(ops[0].sql.starts_with("SELECT json_object('title', "));
    assert!(ops[0].sql.contains(" LIMIT 1))"));
}

#[tokio::test]
async fn array_relation_is_never_null() {
    let blog = setup();

    let users = blog
        .run(
            field("users")
                .arg("order_by", json!({ "id": "asc" }))
                .fields(["name"])
                .field(
                    field("posts")
                        .arg("order_by", json!({ "id": "asc" }))
                        .fields(["id"]),
                ),
        )
        .await;

    assert_eq!(
        users,
        json!([
            { "name": "ann", "posts": [{ "id": 1 }, { "id": 2 }] },
            { "name": "bob", "posts": [{ "id": 3 }] },
            { "name": "cat", "posts": [] }
        ])
    );
}

#[tokio::test]
async fn like_filter_binds_pattern() {
    let blog = setup();

    let posts = blog
        .run(
            field("posts")
                .arg("where", json!({ "title": { "_like": "%foo%" } }))
                .fields(["title"]),
        )
        .await;

    assert_eq!(posts, json!([{ "title": "foo bar" }]));

    let op = blog.ops().pop().unwrap();
    assert!(op.sql.ends_with(r#" WHERE "posts"."title" LIKE ?1"#), "{}", op.sql);
    assert_eq!(op.params, [SqlValue::Text("%foo%".to_string())]);
}

#[tokio::test]
async fn empty_or_matches_everything() {
    let blog = setup();

    let posts = blog
        .run(
            field("posts")
                .arg("where", json!({ "_or": [] }))
                .arg("order_by", json!({ "id": "asc" }))
                .fields(["id"]),
        )
        .await;

    assert_eq!(posts, json!([{ "id": 1 }, { "id": 2 }, { "id": 3 }, { "id": 4 }]));

    let op = blog.ops().pop().unwrap();
    assert!(!op.sql.contains("WHERE"), "{}", op.sql);
    assert!(op.params.is_empty());
}

#[tokio::test]
async fn filter_through_relations() {
    let blog = setup();

    let posts = blog
        .run(
            field("posts")
                .arg("where", json!({ "author": { "name": { "_eq": "ann" } } }))
                .arg("order_by", json!({ "id": "asc" }))
                .fields(["id"]),
        )
        .await;
    assert_eq!(posts, json!([{ "id": 1 }, { "id": 2 }]));

    let users = blog
        .run(
            field("users")
                .arg("where", json!({ "posts": { "published": { "_eq": true } } }))
                .arg("order_by", json!({ "id": "asc" }))
                .fields(["name"]),
        )
        .await;
    assert_eq!(users, json!([{ "name": "ann" }, { "name": "bob" }]));

    let users = blog
        .run(
            field("users")
                .arg("where", json!({ "_not": { "posts": {} } }))
                .fields(["name"]),
        )
        .await;
    assert_eq!(users, json!([{ "name": "cat" }]));
}

#[tokio::test]
async fn in_and_is_null() {
    let blog = setup();

    let posts = blog
        .run(
            field("posts")
                .arg("where", json!({ "id": { "_in": [1, 3] } }))
                .arg("order_by", json!({ "id": "asc" }))
                .fields(["id"]),
        )
        .await;
    assert_eq!(posts, json!([{ "id": 1 }, { "id": 3 }]));

    let posts = blog
        .run(
            field("posts")
                .arg("where", json!({ "body": { "_is_null": true }, "id": { "_nin": [4] } }))
                .fields(["id"]),
        )
        .await;
    assert_eq!(posts, json!([{ "id": 3 }]));
}

#[tokio::test]
async fn order_limit_offset() {
    let blog = setup();

    let posts = blog
        .run(
            field("posts")
                .arg("order_by", json!({ "score": "desc_nulls_last" }))
                .arg("limit", 2)
                .arg("offset", 1)
                .fields(["id"]),
        )
        .await;
    assert_eq!(posts, json!([{ "id": 2 }, { "id": 4 }]));

    let posts = blog
        .run(
            field("posts")
                .arg("order_by", json!([{ "author": { "name": "asc" } }, { "id": "asc" }]))
                .fields(["id"]),
        )
        .await;
    assert_eq!(
        posts,
        json!([{ "id": 4 }, { "id": 1 }, { "id": 2 }, { "id": 3 }])
    );

    let posts = blog
        .run(
            field("posts")
                .arg("order_by", json!({ "id": "asc" }))
                .arg("offset", 3)
                .fields(["id"]),
        )
        .await;
    assert_eq!(posts, json!([{ "id": 4 }]));
}

#[tokio::test]
async fn nested_relation_arguments() {
    let blog = setup();

    let user = blog
        .run(
            field("users_by_pk").arg("id", 1).field(
                field("posts")
                    .arg("where", json!({ "published": { "_eq": true } }))
                    .fields(["title"])
                    .field(
                        field("comments")
                            .arg("order_by", json!({ "likes": "desc" }))
                            .fields(["body"])
                            .field(field("post").fields(["id"])),
                    ),
            ),
        )
        .await;

    assert_eq!(
        user,
        json!({
            "posts": [{
                "title": "hello world",
                "comments": [
                    { "body": "nice", "post": { "id": 1 } },
                    { "body": "meh", "post": { "id": 1 } }
                ]
            }]
        })
    );
}

#[tokio::test]
async fn column_encodings() {
    let blog = setup();

    let user = blog
        .run(
            field("users_by_pk")
                .arg("id", 2)
                .fields(["active", "email", "profile"])
                .field(field("__typename").alias("kind")),
        )
        .await;
    assert_eq!(
        user,
        json!({ "active": false, "email": null, "profile": null, "kind": "users" })
    );

    let post = blog
        .run(
            field("posts_by_pk")
                .arg("id", 1)
                .fields(["published", "score", "tags"]),
        )
        .await;
    assert_eq!(
        post,
        json!({ "published": true, "score": 4.5, "tags": ["intro", "news"] })
    );

    let user = blog
        .run(
            field("users_by_pk")
                .arg("id", 1)
                .field(field("profile").alias("roles").arg("path", "$.roles")),
        )
        .await;
    assert_eq!(user, json!({ "roles": ["admin"] }));

    let missing = blog
        .run(field("users_by_pk").arg("id", 99).fields(["name"]))
        .await;
    assert_eq!(missing, json!(null));
}

#[tokio::test]
async fn json_operators() {
    let blog = setup();

    for filter in [
        json!({ "profile": { "_has_key": "roles" } }),
        json!({ "profile": { "_has_keys_all": ["age", "roles"] } }),
        json!({ "profile": { "_contains": { "age": 30 } } }),
        json!({ "profile": { "_at": { "path": "$.age", "integer": { "_gte": 25 } } } }),
    ] {
        let users = blog
            .run(field("users").arg("where", filter.clone()).fields(["id"]))
            .await;
        assert_eq!(users, json!([{ "id": 1 }]), "{filter}");
    }

    let users = blog
        .run(
            field("users")
                .arg("where", json!({ "profile": { "_has_keys_any": ["age", "x"] } }))
                .arg("order_by", json!({ "id": "asc" }))
                .fields(["id"]),
        )
        .await;
    assert_eq!(users, json!([{ "id": 1 }, { "id": 3 }]));

    let posts = blog
        .run(
            field("posts")
                .arg("where", json!({ "tags": { "_length": { "_gt": 0 } } }))
                .fields(["id"]),
        )
        .await;
    assert_eq!(posts, json!([{ "id": 1 }]));
}

#[tokio::test]
async fn json_membership_agrees_with_equality() {
    let blog = setup();

    for filter in [
        json!({ "profile": { "_at": { "path": "$.roles[0]", "json": { "_eq": "admin" } } } }),
        json!({ "profile": { "_at": { "path": "$.roles[0]", "json": { "_in": ["admin", "x"] } } } }),
    ] {
        let users = blog
            .run(field("users").arg("where", filter.clone()).fields(["name"]))
            .await;
        assert_eq!(users, json!([{ "name": "ann" }]), "{filter}");
    }

    let users = blog
        .run(
            field("users")
                .arg(
                    "where",
                    json!({ "profile": { "_at": { "path": "$.age", "json": { "_in": [20, 99] } } } }),
                )
                .fields(["name"]),
        )
        .await;
    assert_eq!(users, json!([{ "name": "cat" }]));

    let users = blog
        .run(
            field("users")
                .arg(
                    "where",
                    json!({ "profile": { "_at": { "path": "$.age", "json": { "_nin": [20] } } } }),
                )
                .arg("order_by", json!({ "id": "asc" }))
                .fields(["name"]),
        )
        .await;
    // A missing profile is in no list.
    assert_eq!(users, json!([{ "name": "ann" }, { "name": "bob" }]));
}

#[tokio::test]
async fn aggregate() {
    let blog = setup();

    let result = blog
        .run(
            field("posts_aggregate")
                .arg("where", json!({ "published": { "_eq": true } }))
                .field(
                    field("aggregate")
                        .field(field("count"))
                        .field(
                            field("count")
                                .alias("authors")
                                .arg("columns", json!(["author_id"]))
                                .arg("distinct", true),
                        )
                        .field(field("max").fields(["score", "title"])),
                )
                .field(field("nodes").fields(["id"])),
        )
        .await;

    assert_eq!(
        result,
        json!({
            "aggregate": {
                "count": 2,
                "authors": 2,
                "max": { "score": 4.5, "title": "news" }
            },
            "nodes": [{ "id": 1 }, { "id": 3 }]
        })
    );

    let result = blog
        .run(
            field("comments_aggregate")
                .arg("where", json!({ "post_id": { "_eq": 2 } }))
                .field(field("aggregate").field(field("count")))
                .field(field("nodes").fields(["id"])),
        )
        .await;
    assert_eq!(result, json!({ "aggregate": { "count": 0 }, "nodes": [] }));
}

#[tokio::test]
async fn compile_errors_reach_no_database() {
    let blog = setup();

    let err = blog
        .try_run(
            field("users")
                .arg("order_by", json!({ "posts": { "id": "asc" } }))
                .fields(["id"]),
        )
        .await
        .unwrap_err();
    assert!(err.is_unsupported_feature());

    let err = blog
        .try_run(field("posts").fields(["missing"]))
        .await
        .unwrap_err();
    assert!(err.is_invalid_statement());

    assert!(blog.ops().is_empty());
}
