mod common;
use common::*;

use graphlite_sql::{query, query_aggregate, query_by_pk};
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn select_columns() {
    let schema = schema();
    let root = field("posts").fields(["id", "title"]);

    let compiled = query(&schema, "posts", &root).unwrap();

    assert_eq!(
        compiled.sql,
        r#"SELECT json_object('id', CAST("posts"."id" AS INTEGER), 'title', CAST("posts"."title" AS TEXT)) AS "value" FROM "posts""#
    );
    assert!(compiled.params.is_empty());
    assert!(!compiled.returning);
}

#[test]
fn aliases_key_the_object() {
    let schema = schema();
    let root = field("posts")
        .field(field("title").alias("headline"))
        .field(field("title"));

    let compiled = query(&schema, "posts", &root).unwrap();

    assert_eq!(
        compiled.sql,
        r#"SELECT json_object('headline', CAST("posts"."title" AS TEXT), 'title', CAST("posts"."title" AS TEXT)) AS "value" FROM "posts""#
    );
}

#[test]
fn duplicate_alias_is_rejected() {
    let schema = schema();
    let root = field("posts")
        .field(field("id").alias("x"))
        .field(field("title").alias("x"));

    let err = query(&schema, "posts", &root).unwrap_err();
    assert!(err.is_invalid_statement());
}

#[test]
fn filter_order_and_limit() {
    let schema = schema();
    let root = field("posts")
        .arg("where", json!({ "title": { "_like": "%rust%" }, "score": { "_gt": 1.5 } }))
        .arg("order_by", json!([{ "score": "desc" }, { "id": "asc_nulls_last" }]))
        .arg("limit", 10)
        .fields(["id"]);

    let compiled = query(&schema, "posts", &root).unwrap();

    assert_eq!(
        compiled.sql,
        r#"SELECT json_object('id', CAST("posts"."id" AS INTEGER)) AS "value" FROM "posts" WHERE "posts"."title" LIKE ?1 AND "posts"."score" > ?2 ORDER BY "posts"."score" DESC, "posts"."id" ASC NULLS LAST LIMIT ?3"#
    );
    assert_eq!(compiled.params, [text("%rust%"), graphlite_core::stmt::SqlValue::Real(1.5), int(10)]);
}

#[test]
fn offset_without_limit() {
    let schema = schema();
    let root = field("posts").arg("offset", 5).fields(["id"]);

    let compiled = query(&schema, "posts", &root).unwrap();

    assert!(compiled.sql.ends_with(r#" FROM "posts" LIMIT -1 OFFSET ?1"#));
    assert_eq!(compiled.params, [int(5)]);
}

#[test]
fn object_relation() {
    let schema = schema();
    let root = field("posts")
        .fields(["title"])
        .field(field("author").fields(["name"]));

    let compiled = query(&schema, "posts", &root).unwrap();

    assert_eq!(
        compiled.sql,
        r#"SELECT json_object('title', CAST("posts"."title" AS TEXT), 'author', json((SELECT json_object('name', CAST("posts.author"."name" AS TEXT)) FROM "users" AS "posts.author" WHERE "posts"."author_id" = "posts.author"."id" LIMIT 1))) AS "value" FROM "posts""#
    );
}

#[test]
fn array_relation_params_follow_text_order() {
    let schema = schema();
    let root = field("users")
        .arg("where", json!({ "name": { "_eq": "ann" } }))
        .fields(["name"])
        .field(
            field("posts")
                .arg("where", json!({ "published": { "_eq": true } }))
                .arg("limit", 2)
                .fields(["title"]),
        );

    let compiled = query(&schema, "users", &root).unwrap();

    assert_eq!(
        compiled.sql,
        r#"SELECT json_object('name', CAST("users"."name" AS TEXT), 'posts', json(coalesce((SELECT json_group_array(json("value")) FROM (SELECT json_object('title', CAST("users.posts"."title" AS TEXT)) AS "value" FROM "posts" AS "users.posts" WHERE "users"."id" = "users.posts"."author_id" AND "users.posts"."published" = ?1 LIMIT ?2)), json_array()))) AS "value" FROM "users" WHERE "users"."name" = ?3"#
    );
    assert_eq!(compiled.params, [int(1), int(2), text("ann")]);
    assert_eq!(placeholders(&compiled.sql), compiled.params.len());
}

#[test]
fn same_relation_twice_gets_distinct_aliases() {
    let schema = schema();
    let root = field("posts")
        .field(field("author").alias("a").fields(["name"]))
        .field(field("author").alias("b").fields(["email"]));

    let compiled = query(&schema, "posts", &root).unwrap();

    assert!(compiled.sql.contains(r#""users" AS "posts.a""#));
    assert!(compiled.sql.contains(r#""users" AS "posts.b""#));
}

#[test]
fn nested_relations_chain_aliases() {
    let schema = schema();
    let root = field("users").field(
        field("posts").field(field("comments").field(field("post").fields(["id"]))),
    );

    let compiled = query(&schema, "users", &root).unwrap();

    assert!(compiled.sql.contains(r#""posts" AS "users.posts""#));
    assert!(compiled.sql.contains(r#""comments" AS "users.posts.comments""#));
    assert!(compiled
        .sql
        .contains(r#""posts" AS "users.posts.comments.post""#));
}

#[test]
fn scalar_coercions() {
    let schema = schema();
    let root = field("posts")
        .fields(["published", "tags", "score", "__typename"])
        .field(field("author").fields(["active"]).field(
            field("profile").alias("address").arg("path", "$.address"),
        ));

    let compiled = query(&schema, "posts", &root).unwrap();

    assert_eq!(
        compiled.sql,
        r#"SELECT json_object('published', json(iif("posts"."published" ISNULL, 'null', iif("posts"."published", 'true', 'false'))), 'tags', json("posts"."tags"), 'score', CAST("posts"."score" AS REAL), '__typename', 'posts', 'author', json((SELECT json_object('active', json(iif("posts.author"."active", 'true', 'false')), 'address', json("posts.author"."profile" -> '$.address')) FROM "users" AS "posts.author" WHERE "posts"."author_id" = "posts.author"."id" LIMIT 1))) AS "value" FROM "posts""#
    );
}

#[test]
fn unknown_field_and_argument() {
    let schema = schema();

    let err = query(&schema, "posts", &field("posts").fields(["nope"])).unwrap_err();
    assert!(err.is_invalid_statement());

    let root = field("posts").arg("first", 1).fields(["id"]);
    let err = query(&schema, "posts", &root).unwrap_err();
    assert!(err.is_invalid_statement());

    let err = query(&schema, "nope", &field("nope")).unwrap_err();
    assert!(err.is_invalid_statement());
}

#[test]
fn by_primary_key() {
    let schema = schema();
    let root = field("posts_by_pk").arg("id", 7).fields(["title"]);

    let compiled = query_by_pk(&schema, "posts", &root).unwrap();

    assert_eq!(
        compiled.sql,
        r#"SELECT json_object('title', CAST("posts"."title" AS TEXT)) AS "value" FROM "posts" WHERE "posts"."id" = ?1"#
    );
    assert_eq!(compiled.params, [int(7)]);

    let err = query_by_pk(&schema, "posts", &field("posts_by_pk").fields(["id"])).unwrap_err();
    assert!(err.is_invalid_statement());
}

#[test]
fn aggregate_over_page() {
    let schema = schema();
    let root = field("posts_aggregate")
        .arg("where", json!({ "published": { "_eq": true } }))
        .arg("limit", 5)
        .field(
            field("aggregate")
                .field(field("count"))
                .field(field("max").fields(["score"])),
        )
        .field(field("nodes").fields(["id"]));

    let compiled = query_aggregate(&schema, "posts", &root).unwrap();

    assert_eq!(
        compiled.sql,
        r#"SELECT json_object('aggregate', json_object('count', count(*), 'max', json_object('score', max("posts"."score"))), 'nodes', coalesce(json_group_array(json_object('id', CAST("posts"."id" AS INTEGER))), json_array())) AS "value" FROM (SELECT * FROM "posts" WHERE "posts"."published" = ?1 LIMIT ?2) AS "posts""#
    );
    assert_eq!(compiled.params, [int(1), int(2)]);
}

#[test]
fn aggregate_count_variants() {
    let schema = schema();
    let root = field("posts_aggregate").field(
        field("aggregate")
            .field(field("count").alias("authors").arg("columns", "author_id").arg("distinct", true))
            .field(field("count").alias("pairs").arg("columns", json!(["author_id", "score"])))
            .field(field("__typename"))
            .field(field("avg").fields(["score", "__typename"])),
    );

    let compiled = query_aggregate(&schema, "posts", &root).unwrap();

    assert_eq!(
        compiled.sql,
        r#"SELECT json_object('aggregate', json_object('authors', count(DISTINCT "posts"."author_id"), 'pairs', count(json_array("posts"."author_id", "posts"."score")), '__typename', 'posts_aggregate_fields', 'avg', json_object('score', avg("posts"."score"), '__typename', 'posts_avg_sum_fields'))) AS "value" FROM (SELECT * FROM "posts") AS "posts""#
    );
}

#[test]
fn aggregate_rejects_unknown_function() {
    let schema = schema();
    let root = field("posts_aggregate")
        .field(field("aggregate").field(field("stddev").fields(["score"])));

    let err = query_aggregate(&schema, "posts", &root).unwrap_err();
    assert!(err.is_unsupported_feature());

    let root = field("posts_aggregate")
        .field(field("aggregate").field(field("sum").fields(["title"])));

    let err = query_aggregate(&schema, "posts", &root).unwrap_err();
    assert!(err.is_invalid_statement());
}

#[test]
fn compiling_is_deterministic() {
    let schema = schema();
    let root = field("users")
        .arg("where", json!({ "posts": { "score": { "_gte": 1 } } }))
        .arg("order_by", json!({ "name": "asc" }))
        .fields(["id"])
        .field(field("posts").arg("limit", 1).fields(["title"]));

    let a = query(&schema, "users", &root).unwrap();
    let b = query(&schema, "users", &root).unwrap();

    assert_eq!(a, b);
    assert_eq!(placeholders(&a.sql), a.params.len());
}
