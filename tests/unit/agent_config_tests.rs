use super::*;
use serde_json::json;

fn sample_config() -> AgentConfig {
    AgentConfig::from_json_str(
        r#"{
            "name": "Sales",
            "conversation_config": {
                "agent": {
                    "first_message": "Hi!",
                    "prompt": { "prompt": "old text", "llm": "gpt-4o", "temperature": 0.2 }
                },
                "tts": { "voice_id": "abc" }
            },
            "tags": ["sales"]
        }"#,
    )
    .expect("config should parse")
}

#[test]
fn lookup_path_follows_nested_objects() {
    let doc = json!({"a": {"b": {"c": 3}}});
    assert_eq!(lookup_path(&doc, &["a", "b", "c"]), Some(&json!(3)));
    assert_eq!(lookup_path(&doc, &["a", "x"]), None);
    assert_eq!(lookup_path(&doc, &["a", "b", "c", "d"]), None);
}

#[test]
fn set_at_path_reports_missing_parent_without_mutation() {
    let mut doc = json!({"a": {"b": 1}});
    let before = doc.clone();
    assert_eq!(set_at_path(&mut doc, &["a", "x", "y"], json!("v")), PathUpdate::Missing);
    assert_eq!(set_at_path(&mut doc, &["a", "b", "y"], json!("v")), PathUpdate::Missing);
    assert_eq!(doc, before);
}

#[test]
fn set_at_path_inserts_or_replaces_leaf() {
    let mut doc = json!({"a": {"b": 1}});
    assert_eq!(set_at_path(&mut doc, &["a", "b"], json!(2)), PathUpdate::Replaced(json!(1)));
    assert_eq!(set_at_path(&mut doc, &["a", "c"], json!(3)), PathUpdate::Inserted);
    assert_eq!(doc, json!({"a": {"b": 2, "c": 3}}));
}

#[test]
fn replace_prompt_returns_previous_text_and_keeps_siblings() {
    let mut config = sample_config();
    let before = config.document().clone();

    let previous = config.replace_prompt("new text");

    assert_eq!(previous.as_deref(), Some("old text"));
    assert_eq!(config.prompt(), Some("new text"));
    let doc = config.document();
    assert_eq!(doc["name"], before["name"]);
    assert_eq!(doc["tags"], before["tags"]);
    assert_eq!(doc["conversation_config"]["tts"], before["conversation_config"]["tts"]);
    assert_eq!(
        doc["conversation_config"]["agent"]["prompt"]["llm"],
        before["conversation_config"]["agent"]["prompt"]["llm"]
    );
    assert_eq!(
        doc["conversation_config"]["agent"]["first_message"],
        before["conversation_config"]["agent"]["first_message"]
    );
}

#[test]
fn replace_prompt_inserts_missing_leaf() {
    let mut config = AgentConfig::from_json_str(
        r#"{"conversation_config": {"agent": {"prompt": {"llm": "x"}}}}"#,
    )
    .expect("parse");
    assert_eq!(config.replace_prompt("text").as_deref(), Some(""));
    assert_eq!(config.prompt(), Some("text"));
}

#[test]
fn replace_prompt_rejects_unexpected_structure() {
    for text in [
        r#"{}"#,
        r#"{"conversation_config": {}}"#,
        r#"{"conversation_config": {"agent": {}}}"#,
        r#"{"conversation_config": {"agent": {"prompt": "flat string"}}}"#,
        r#"[1, 2, 3]"#,
    ] {
        let mut config = AgentConfig::from_json_str(text).expect("parse");
        let before = config.clone();
        assert_eq!(config.replace_prompt("text"), None, "input: {text}");
        assert_eq!(config, before);
    }
}
