//! Safety classification of parsed commands.

use db_query::config::OutputFormat;
use db_query::output::render;
use db_query::query::parse_command;
use db_query::safety::{classify_command, SafetyLevel};

#[test]
fn test_classification_follows_method() {
    let cases = [
        ("db.a.find({ x: 1 })", SafetyLevel::Safe, false),
        ("db.a.insertMany([{}, {}])", SafetyLevel::Mutating, true),
        ("db.a.updateOne({ x: 1 }, { $set: { y: 1 } })", SafetyLevel::Mutating, true),
        ("db.a.deleteOne({ x: 1 })", SafetyLevel::Destructive, true),
    ];

    for (raw, level, confirm) in cases {
        let result = classify_command(&parse_command(raw).unwrap());
        assert_eq!(result.level, level, "{raw}");
        assert_eq!(result.requires_confirmation(), confirm, "{raw}");
    }
}

#[test]
fn test_delete_everything_is_flagged() {
    let command = parse_command("db.a.deleteMany({})").unwrap();
    let result = classify_command(&command);
    assert!(result.requires_warning());

    let text = render(&command, &result, OutputFormat::Text, false).unwrap();
    assert!(text.contains("delete every document"));
}
