//! End-to-end tests that build a schema and execute queries against it.

use std::sync::Arc;

use async_graphql::Value;
use serde_json::json;

use sdl_typekit::{
    CompositeTypeArgs, Dependencies, EnumValues, ObjectTypeArgs, ResolverArgs, Resolvers,
    SchemaResolvers, SchemaType, SchemaTypeArgs, TypeKitConfig, enum_type, interface_type,
    object_type, schema_type, union_type,
};

fn from_json(value: serde_json::Value) -> Value {
    Value::from_json(value).unwrap()
}

fn int_arg(args: &ResolverArgs, name: &str) -> i64 {
    match args.get(name) {
        Some(Value::Number(n)) => n.as_i64().unwrap(),
        other => panic!("expected integer argument `{name}`, got {other:?}"),
    }
}

async fn execute(schema: &async_graphql::dynamic::Schema, query: &str) -> serde_json::Value {
    let response = schema.execute(query).await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);
    response.data.into_json().unwrap()
}

#[tokio::test]
async fn test_query_root_resolver() {
    let schema = schema_type(
        SchemaTypeArgs::new("type Query { n: Int }").resolvers(
            SchemaResolvers::new()
                .type_resolvers("Query", Resolvers::new().resolver("n", |_| Ok(Value::from(7)))),
        ),
    )
    .unwrap();

    assert_eq!(execute(&schema, "{ n }").await, json!({ "n": 7 }));
}

#[tokio::test]
async fn test_list_field() {
    let schema = schema_type(
        SchemaTypeArgs::new("type Query { list: [Int!]! }").resolvers(
            SchemaResolvers::new().type_resolvers(
                "Query",
                Resolvers::new().resolver("list", |_| Ok(from_json(json!([1, 2, 3])))),
            ),
        ),
    )
    .unwrap();

    assert_eq!(execute(&schema, "{ list }").await, json!({ "list": [1, 2, 3] }));
}

#[tokio::test]
async fn test_mutation_root_with_arguments() {
    let schema = schema_type(
        SchemaTypeArgs::new("type Query { n: Int } type Mutation { inc(by: Int!): Int }")
            .resolvers(
                SchemaResolvers::new()
                    .type_resolvers("Query", Resolvers::new())
                    .type_resolvers(
                        "Mutation",
                        Resolvers::new()
                            .resolver("inc", |args| Ok(Value::from(int_arg(args, "by") + 1))),
                    ),
            ),
    )
    .unwrap();

    assert_eq!(
        execute(&schema, "mutation { inc(by: 2) }").await,
        json!({ "inc": 3 })
    );
}

#[tokio::test]
async fn test_fields_without_resolver_read_parent() {
    let user: Arc<SchemaType> = Arc::new(
        object_type(ObjectTypeArgs::new("type User { id: ID! name: String }"))
            .unwrap()
            .into(),
    );

    let schema = schema_type(
        SchemaTypeArgs::new("type Query { user: User }")
            .resolvers(SchemaResolvers::new().type_resolvers(
                "Query",
                Resolvers::new().resolver("user", |_| {
                    Ok(from_json(json!({ "id": "1", "name": "Ann" })))
                }),
            ))
            .dependencies(Dependencies::new().with_type("User", user)),
    )
    .unwrap();

    assert_eq!(
        execute(&schema, "{ user { id name } }").await,
        json!({ "user": { "id": "1", "name": "Ann" } })
    );
}

#[tokio::test]
async fn test_sibling_definitions_resolve_each_other() {
    let schema = schema_type(
        SchemaTypeArgs::new("type Query { me: Account } type Account { handle: String }")
            .resolvers(
                SchemaResolvers::new()
                    .type_resolvers(
                        "Query",
                        Resolvers::new().resolver("me", |_| Ok(from_json(json!({})))),
                    )
                    .type_resolvers(
                        "Account",
                        Resolvers::new().resolver("handle", |_| Ok(Value::from("gm"))),
                    ),
            ),
    )
    .unwrap();

    assert_eq!(
        execute(&schema, "{ me { handle } }").await,
        json!({ "me": { "handle": "gm" } })
    );
}

#[tokio::test]
async fn test_enum_literals_in_and_out() {
    let level: Arc<SchemaType> = Arc::new(
        enum_type(
            "enum Level { LOW HIGH }",
            EnumValues::new().value("LOW", 1).value("HIGH", 2),
        )
        .unwrap()
        .into(),
    );

    let schema = schema_type(
        SchemaTypeArgs::new("type Query { top: Level code(level: Level!): Int }")
            .resolvers(SchemaResolvers::new().type_resolvers(
                "Query",
                Resolvers::new()
                    .resolver("top", |_| Ok(Value::from(2)))
                    .resolver("code", |args| {
                        Ok(args.get("level").cloned().unwrap_or(Value::Null))
                    }),
            ))
            .dependencies(Dependencies::new().with_type("Level", level)),
    )
    .unwrap();

    assert_eq!(
        execute(&schema, "{ top code(level: LOW) }").await,
        json!({ "top": "HIGH", "code": 1 })
    );
}

#[tokio::test]
async fn test_union_values_are_tagged() {
    let cat: Arc<SchemaType> = Arc::new(
        object_type(ObjectTypeArgs::new("type Cat { name: String }"))
            .unwrap()
            .into(),
    );
    let dog: Arc<SchemaType> = Arc::new(
        object_type(ObjectTypeArgs::new("type Dog { barks: Boolean }"))
            .unwrap()
            .into(),
    );
    let pet: Arc<SchemaType> = Arc::new(
        union_type(
            CompositeTypeArgs::new("union Pet = Cat | Dog")
                .resolve_type(|value| match value {
                    Value::Object(obj) if obj.contains_key("name") => Some("Cat".to_string()),
                    Value::Object(_) => Some("Dog".to_string()),
                    _ => None,
                })
                .dependencies(
                    Dependencies::new()
                        .with_type("Cat", cat)
                        .with_type("Dog", dog),
                ),
        )
        .unwrap()
        .into(),
    );

    let schema = schema_type(
        SchemaTypeArgs::new("type Query { pets: [Pet!]! }")
            .resolvers(SchemaResolvers::new().type_resolvers(
                "Query",
                Resolvers::new().resolver("pets", |_| {
                    Ok(from_json(json!([{ "name": "Tom" }, { "barks": true }])))
                }),
            ))
            .dependencies(Dependencies::new().with_type("Pet", pet)),
    )
    .unwrap();

    let data = execute(
        &schema,
        "{ pets { __typename ... on Cat { name } ... on Dog { barks } } }",
    )
    .await;
    assert_eq!(
        data,
        json!({
            "pets": [
                { "__typename": "Cat", "name": "Tom" },
                { "__typename": "Dog", "barks": true }
            ]
        })
    );
}

#[tokio::test]
async fn test_interface_values_are_tagged() {
    let animal: Arc<SchemaType> = Arc::new(
        interface_type(
            CompositeTypeArgs::new("interface Animal { name: String }")
                .resolve_type(|_| Some("Dog".to_string())),
        )
        .unwrap()
        .into(),
    );
    let dog: Arc<SchemaType> = Arc::new(
        object_type(
            ObjectTypeArgs::new("type Dog implements Animal { name: String }")
                .resolvers(Resolvers::new())
                .dependencies(Dependencies::new().with_type("Animal", Arc::clone(&animal))),
        )
        .unwrap()
        .into(),
    );

    let schema = schema_type(
        SchemaTypeArgs::new("type Query { animal: Animal dog: Dog }")
            .resolvers(SchemaResolvers::new().type_resolvers(
                "Query",
                Resolvers::new()
                    .resolver("animal", |_| Ok(from_json(json!({ "name": "Rex" })))),
            ))
            .dependencies(
                Dependencies::new()
                    .with_type("Animal", animal)
                    .with_type("Dog", dog),
            ),
    )
    .unwrap();

    assert_eq!(
        execute(&schema, "{ animal { __typename name } }").await,
        json!({ "animal": { "__typename": "Dog", "name": "Rex" } })
    );
}

#[test]
fn test_sibling_and_dependency_sharing_a_name_fail() {
    let other: Arc<SchemaType> = Arc::new(
        object_type(ObjectTypeArgs::new("type Account { handle: String }"))
            .unwrap()
            .into(),
    );

    let err = schema_type(
        SchemaTypeArgs::new("type Query { me: Account } type Account { handle: String }")
            .resolvers(
                SchemaResolvers::new()
                    .type_resolvers("Query", Resolvers::new())
                    .type_resolvers(
                        "Account",
                        Resolvers::new().resolver("handle", |_| Ok(Value::from("sibling"))),
                    ),
            )
            .dependencies(Dependencies::new().with_type("Account", other)),
    )
    .unwrap_err();

    assert_eq!(err.error_code(), "SCHEMA_BUILD_FAILED");
    assert!(err.to_string().contains("`Account`"));
}

#[tokio::test]
async fn test_resolver_error_is_reported() {
    let schema = schema_type(
        SchemaTypeArgs::new("type Query { boom: String }").resolvers(
            SchemaResolvers::new().type_resolvers(
                "Query",
                Resolvers::new().resolver("boom", |_| Err("nope".into())),
            ),
        ),
    )
    .unwrap();

    let response = schema.execute("{ boom }").await;
    assert_eq!(response.errors.len(), 1);
    assert_eq!(response.errors[0].message, "nope");
}

#[tokio::test]
async fn test_introspection_can_be_disabled() {
    let build = |introspection: bool| {
        schema_type(
            SchemaTypeArgs::new("type Query { n: Int }")
                .resolvers(SchemaResolvers::new().type_resolvers("Query", Resolvers::new()))
                .config(TypeKitConfig {
                    introspection,
                    ..Default::default()
                }),
        )
        .unwrap()
    };
    let query = "{ __schema { queryType { name } } }";

    let open = build(true).execute(query).await;
    assert!(open.errors.is_empty());

    let closed = build(false).execute(query).await;
    assert!(!closed.errors.is_empty());
    assert!(closed.errors[0].message.contains("__schema"));
}

#[test]
fn test_unresolved_reference_is_a_schema_error() {
    let err = schema_type(
        SchemaTypeArgs::new("type Query { user: User }")
            .resolvers(SchemaResolvers::new().type_resolvers("Query", Resolvers::new())),
    )
    .unwrap_err();
    assert_eq!(err.error_code(), "SCHEMA_BUILD_FAILED");
}
