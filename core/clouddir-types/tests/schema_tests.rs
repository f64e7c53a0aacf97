use clouddir_types::{
    AttributeKV, AttributeValue, ConsistencyLevel, DirectoryState, SchemaArn, SchemaReference,
};
use pretty_assertions::assert_eq;

fn file_facet() -> SchemaReference {
    SchemaReference::new(SchemaArn::new("arn:schema:1"), "File")
}

// ── Attributes ───────────────────────────────────────────────────

#[test]
fn attribute_key_carries_facet() {
    let key = file_facet().attribute("MetricAddress");
    assert_eq!(key.facet, file_facet());
    assert_eq!(key.name, "MetricAddress");
}

#[test]
fn string_attribute() {
    let kv = AttributeKV::string(&file_facet(), "Name", "US.CA.SF");
    assert_eq!(kv.key.name, "Name");
    assert_eq!(kv.value.as_string(), Some("US.CA.SF"));
}

#[test]
fn non_string_value_has_no_string_payload() {
    assert_eq!(AttributeValue::Boolean(true).as_string(), None);
    assert_eq!(AttributeValue::Number("42".into()).as_string(), None);
}

#[test]
fn value_display() {
    assert_eq!(AttributeValue::String("aws-random-com".into()).to_string(), "aws-random-com");
    assert_eq!(AttributeValue::Number("1.5".into()).to_string(), "1.5");
    assert_eq!(AttributeValue::Boolean(false).to_string(), "false");
}

#[test]
fn value_serde_is_tagged() {
    let json = serde_json::to_value(AttributeValue::String("US".into())).unwrap();
    assert_eq!(json, serde_json::json!({ "type": "string", "value": "US" }));
}

// ── Wire enums ───────────────────────────────────────────────────

#[test]
fn directory_state_wire_names() {
    for state in [
        DirectoryState::Enabled,
        DirectoryState::Disabled,
        DirectoryState::Deleted,
    ] {
        let parsed: DirectoryState = state.as_str().parse().unwrap();
        assert_eq!(parsed, state);
        let json = serde_json::to_string(&state).unwrap();
        assert_eq!(json, format!("\"{}\"", state.as_str()));
    }
}

#[test]
fn directory_state_unknown() {
    assert!("ARCHIVED".parse::<DirectoryState>().is_err());
    assert!("enabled".parse::<DirectoryState>().is_err());
}

#[test]
fn consistency_defaults_to_eventual() {
    assert_eq!(ConsistencyLevel::default(), ConsistencyLevel::Eventual);
    assert_eq!(ConsistencyLevel::Eventual.to_string(), "EVENTUAL");
}

#[test]
fn consistency_parse() {
    assert_eq!(
        "SERIALIZABLE".parse::<ConsistencyLevel>().unwrap(),
        ConsistencyLevel::Serializable
    );
    assert!("STRONG".parse::<ConsistencyLevel>().is_err());
}

#[test]
fn parse_error_names_rejected_value() {
    let err = "ARCHIVED".parse::<DirectoryState>().unwrap_err();
    assert!(matches!(err, clouddir_types::Error::InvalidState(ref s) if s == "ARCHIVED"));
    let result: clouddir_types::Result<ConsistencyLevel> = "STRONG".parse();
    assert!(matches!(
        result,
        Err(clouddir_types::Error::InvalidConsistency(_))
    ));
}
