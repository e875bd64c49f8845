//! Canonical rendering tests.
//!
//! Re-parsing the canonical text of a command or value yields the same result.

use db_query::query::{parse_command, parse_literal};
use pretty_assertions::assert_eq;

const COMMANDS: &[&str] = &[
    "db.foobar.find({})",
    r#"db.foobar.find({ _id: ObjectId("559d3e5b8152eefd4e9bed45") })"#,
    "db.foobar.updateMany({},{})",
    "db.foobar.insertOne({\nnumbers:[1,2,3,4,5]})",
    "db.foobar.insertOne({\npeople:[{ name : \"John Doe\" }]})",
    "db.system.users.count({ 'roles.role': 'admin', active: true })",
    r#"db.items.updateOne({ sku: "x-1" }, { $inc: { qty: -2 }, $set: { price: 9.99, tags: [] } })"#,
    "db.items.deleteMany({ expires: { $lt: 1.5e9 }, note: 'it\\'s \"quoted\"\\n' })",
    "db.items.replaceOne({ _id: new ObjectId('559D3E5B8152EEFD4E9BED45') }, { n: null })",
];

#[test]
fn test_command_canonical_text_reparses() {
    for raw in COMMANDS {
        let command = parse_command(raw).unwrap();
        let canonical = command.to_string();
        let reparsed = parse_command(&canonical).unwrap();

        assert_eq!(reparsed.collection_name(), command.collection_name());
        assert_eq!(reparsed.method(), command.method());
        assert_eq!(reparsed.primary_argument(), command.primary_argument());
        assert_eq!(reparsed.secondary_argument(), command.secondary_argument());

        // Canonical text is a fixed point.
        assert_eq!(reparsed.to_string(), canonical);
    }
}

#[test]
fn test_value_canonical_text_reparses() {
    for raw in COMMANDS {
        let command = parse_command(raw).unwrap();
        let value = command.primary_argument();
        assert_eq!(&parse_literal(&value.to_string()).unwrap(), value, "{raw}");
    }
}

#[test]
fn test_canonical_forms() {
    let command = parse_command("db.foobar.insertOne({\npeople:[{ name : \"John Doe\" }]})").unwrap();
    assert_eq!(
        command.to_string(),
        r#"db.foobar.insertOne({ people: [{ name: "John Doe" }] })"#
    );

    let command = parse_command("db.x.find({'a.b':1})").unwrap();
    assert_eq!(command.to_string(), r#"db.x.find({ "a.b": 1 })"#);
}
