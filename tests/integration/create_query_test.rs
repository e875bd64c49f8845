//! Query creation tests.
//!
//! Covers the error contract and the shapes of successfully parsed commands.

use db_query::query::{create_query, parse_command, Document, Method, Value};
use db_query::QueryError;
use pretty_assertions::assert_eq;

fn obj(pairs: Vec<(&str, Value)>) -> Value {
    Value::Object(
        pairs
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect::<Document>(),
    )
}

#[tokio::test]
async fn test_no_query_is_rejected() {
    let err = create_query(None).await.unwrap_err();
    assert_eq!(err, QueryError::MissingInput);
    assert_eq!(err.to_string(), "Query - parse() : rawQuery is required");

    let err = create_query(Some("")).await.unwrap_err();
    assert_eq!(err.to_string(), "Query - parse() : rawQuery is required");
}

#[tokio::test]
async fn test_invalid_query_is_rejected() {
    let err = create_query(Some("fooooobar")).await.unwrap_err();
    assert!(matches!(err, QueryError::Syntax(_)));
    assert_eq!(err.to_string(), "Invalid query");
}

#[tokio::test]
async fn test_unsupported_function_is_rejected() {
    let err = create_query(Some("db.foobar.badFunction()")).await.unwrap_err();
    assert!(matches!(err, QueryError::UnsupportedMethod(_)));
    assert_eq!(err.to_string(), "badFunction is not a supported query");
}

#[tokio::test]
async fn test_update_one_without_options_is_rejected() {
    let err = create_query(Some("db.foobar.updateOne()")).await.unwrap_err();
    assert!(matches!(err, QueryError::MissingOptions(_)));
    assert_eq!(
        err.to_string(),
        "query options are required for mongo updateOne"
    );
}

#[tokio::test]
async fn test_update_many_without_options_is_rejected() {
    let err = create_query(Some("db.foobar.updateMany()")).await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "query options are required for mongo updateMany"
    );
}

#[tokio::test]
async fn test_find_empty_query() {
    let raw = "db.foobar.find({})";
    let command = create_query(Some(raw)).await.unwrap();

    assert_eq!(command.raw_text(), raw);
    assert_eq!(command.collection_name(), "foobar");
    assert_eq!(command.method(), Method::Find);
    assert_eq!(command.primary_argument(), &Value::empty_object());
    assert!(!command.has_secondary_argument());
    assert_eq!(command.secondary_argument(), None);
}

#[tokio::test]
async fn test_find_with_object_id() {
    let raw = r#"db.foobar.find({ _id: ObjectId("559d3e5b8152eefd4e9bed45") })"#;
    let command = create_query(Some(raw)).await.unwrap();

    assert_eq!(command.method(), Method::Find);
    assert!(!command.has_secondary_argument());

    let id = command
        .primary_argument()
        .get("_id")
        .and_then(Value::as_object_id)
        .unwrap();
    assert_eq!(id.as_str(), "559d3e5b8152eefd4e9bed45");
}

#[tokio::test]
async fn test_aggregate_and_count_empty_query() {
    for (raw, method) in [
        ("db.foobar.aggregate({})", Method::Aggregate),
        ("db.foobar.count({})", Method::Count),
    ] {
        let command = create_query(Some(raw)).await.unwrap();
        assert_eq!(command.method(), method);
        assert!(command.primary_argument().is_empty_object());
        assert!(!command.has_secondary_argument());
    }
}

#[tokio::test]
async fn test_aggregate_pipeline_array() {
    let command = create_query(Some(
        "db.orders.aggregate([{ $match: { status: 'A' } }, { $group: { _id: '$cust_id', total: { $sum: '$amount' } } }])",
    ))
    .await
    .unwrap();

    let stages = command.primary_argument().as_array().unwrap();
    assert_eq!(stages.len(), 2);
    assert_eq!(
        stages[0],
        obj(vec![("$match", obj(vec![("status", Value::from("A"))]))])
    );
}

#[tokio::test]
async fn test_update_many_empty_query_and_options() {
    let command = create_query(Some("db.foobar.updateMany({},{})")).await.unwrap();

    assert_eq!(command.method(), Method::UpdateMany);
    assert!(command.has_secondary_argument());
    assert!(command.primary_argument().is_empty_object());
    assert_eq!(command.secondary_argument(), Some(&Value::empty_object()));
}

#[tokio::test]
async fn test_insert_one_empty_document() {
    let command = create_query(Some("db.foobar.insertOne({})")).await.unwrap();
    assert_eq!(command.method(), Method::InsertOne);
    assert!(command.primary_argument().is_empty_object());
    assert!(!command.has_secondary_argument());
}

#[tokio::test]
async fn test_insert_one_single_property() {
    let command = create_query(Some("db.foobar.insertOne({\nname:\"John Doe\"})"))
        .await
        .unwrap();
    assert_eq!(
        command.primary_argument(),
        &obj(vec![("name", Value::from("John Doe"))])
    );
}

#[tokio::test]
async fn test_insert_one_nested_object() {
    let command = create_query(Some("db.foobar.insertOne({\nperson:{ name : \"John Doe\" }})"))
        .await
        .unwrap();
    assert_eq!(
        command.primary_argument(),
        &obj(vec![(
            "person",
            obj(vec![("name", Value::from("John Doe"))])
        )])
    );
}

#[tokio::test]
async fn test_insert_one_nested_array() {
    let command = create_query(Some("db.foobar.insertOne({\nnumbers:[1,2,3,4,5]})"))
        .await
        .unwrap();
    let numbers = command.primary_argument().get("numbers").unwrap();
    assert_eq!(numbers, &Value::from(vec![1, 2, 3, 4, 5]));
}

#[tokio::test]
async fn test_insert_one_array_of_objects() {
    let command = create_query(Some("db.foobar.insertOne({\npeople:[{ name : \"John Doe\" }]})"))
        .await
        .unwrap();
    let people = command
        .primary_argument()
        .get("people")
        .and_then(Value::as_array)
        .unwrap();
    assert_eq!(people, &[obj(vec![("name", Value::from("John Doe"))])]);
}

#[test]
fn test_insert_many_documents() {
    let command = parse_command("db.people.insertMany([{ name: 'Ann' }, { name: 'Bob', age: 41 }])").unwrap();
    assert_eq!(command.method(), Method::InsertMany);
    assert_eq!(command.primary_argument().as_array().map(<[Value]>::len), Some(2));
}

#[test]
fn test_optional_arguments_default_to_empty_object() {
    for raw in [
        "db.foobar.find()",
        "db.foobar.findOne()",
        "db.foobar.count()",
        "db.foobar.deleteMany()",
        "db.foobar.insertOne()",
    ] {
        let command = parse_command(raw).unwrap();
        assert!(command.primary_argument().is_empty_object(), "{raw}");
        assert!(!command.has_secondary_argument(), "{raw}");
    }
}

#[test]
fn test_replace_one() {
    let command = parse_command("db.people.replaceOne({ name: 'Ann' }, { name: 'Anne', age: 30 })").unwrap();
    assert_eq!(command.method(), Method::ReplaceOne);
    assert_eq!(
        command.secondary_argument().and_then(|r| r.get("age")),
        Some(&Value::Int(30))
    );

    let err = parse_command("db.people.replaceOne({ name: 'Ann' })").unwrap_err();
    assert_eq!(err.to_string(), "query options are required for mongo replaceOne");
}

#[test]
fn test_literal_syntax_errors() {
    for raw in [
        "db.foobar.find({ a: 1, })",
        "db.foobar.find({ a: 'open })",
        "db.foobar.find({ a: someVariable })",
        "db.foobar.find({ a: ObjectId('123') })",
        "db.foobar.find({ a: 1 } { b: 2 })",
        "db.foobar.find(function() { return 1 })",
        "db.foobar.find({},)",
    ] {
        let err = parse_command(raw).unwrap_err();
        assert_eq!(err.to_string(), "Invalid query", "{raw}");
        assert!(err.syntax_detail().is_some(), "{raw}");
    }
}

#[test]
fn test_extra_arguments_rejected() {
    let err = parse_command("db.foobar.find({}, { name: 1 })").unwrap_err();
    assert_eq!(err.to_string(), "Invalid query");
    assert_eq!(
        err.syntax_detail().map(|d| d.reason.as_str()),
        Some("find accepts at most 1 argument(s), got 2")
    );
}

#[tokio::test]
async fn test_concurrent_calls_are_independent() {
    let raws = [
        "db.a.find({ x: 1 })",
        "db.b.updateOne({}, { $set: { y: 2 } })",
        "db.c.badFunction()",
    ];
    let handles: Vec<_> = raws
        .iter()
        .map(|raw| {
            let raw = raw.to_string();
            tokio::spawn(async move { create_query(Some(&raw)).await })
        })
        .collect();

    let mut results = Vec::new();
    for handle in handles {
        results.push(handle.await.unwrap());
    }

    assert_eq!(results[0].as_ref().unwrap().collection_name(), "a");
    assert!(results[1].as_ref().unwrap().has_secondary_argument());
    assert!(matches!(results[2], Err(QueryError::UnsupportedMethod(_))));
}
