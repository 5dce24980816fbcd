//! Integration tests for the model host: nested-model validation with
//! path-prefixed error merging, data conversion round trips, and the
//! mapping scenarios.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use indexmap::IndexMap;
use pretty_assertions::assert_eq;
use serde_json::json;
use typed_schema::prelude::*;

fn address_schema() -> ModelSchema {
    ModelSchema::builder("Address")
        .field("street", Spec::of(Primitive::String).validate("required"))
        .build()
        .unwrap()
}

fn employee_schema() -> ModelSchema {
    let address = address_schema();
    ModelSchema::builder("Employee")
        .field("name", Spec::of(Primitive::String).validate("required"))
        .field(
            "primary_address",
            Spec::model(Arc::new(address.clone())).validate("required"),
        )
        .field("alternate_addresses", Spec::seq_of(Spec::model(Arc::new(address))))
        .build()
        .unwrap()
}

fn valid_attributes() -> Value {
    Value::from(json!({
        "name": "somebody",
        "primary_address": {"street": "primary street"},
        "alternate_addresses": [
            {"street": "alternate 1"},
            {"street": "alternate 2"},
        ],
    }))
}

// ============================================================================
// NESTED VALIDATION
// ============================================================================

#[test]
fn valid_attributes_produce_no_errors() {
    let employee = employee_schema().record_from(&valid_attributes());
    assert!(employee.is_valid());
}

#[test]
fn top_level_scalar_validations_apply() {
    let mut employee = employee_schema().record_from(&valid_attributes());
    employee.set("name", Value::from(""));

    let errors = employee.validate();
    assert_eq!(errors.get("name"), &[ErrorKind::Required]);
}

#[test]
fn top_level_association_validations_apply() {
    let mut employee = employee_schema().record_from(&valid_attributes());
    employee.set("primary_address", Value::Null);

    let errors = employee.validate();
    assert_eq!(errors.get("primary_address"), &[ErrorKind::Required]);
}

#[test]
fn single_arity_association_validations_apply() {
    let mut employee = employee_schema().record_from(&valid_attributes());
    employee.set("primary_address", Value::from(json!({"street": ""})));

    let errors = employee.validate();
    assert_eq!(errors.get("primary_address/street"), &[ErrorKind::Required]);
}

#[test]
fn nested_association_messages_surface_with_adjusted_paths() {
    let mut employee = employee_schema().record_from(&valid_attributes());
    employee.set(
        "alternate_addresses",
        Value::from(json!([{"street": "alternate 1"}, {"street": ""}])),
    );

    let errors = employee.validate();
    assert!(!errors.is_empty());
    assert_eq!(
        errors.get("alternate_addresses/1/street"),
        &[ErrorKind::Required]
    );
    assert_eq!(errors.get("alternate_addresses/0/street"), &[]);
}

#[test]
fn blank_name_and_nil_address_are_both_reported() {
    let employee = employee_schema().record_from(&Value::from(json!({
        "name": "",
        "primary_address": null,
    })));

    let errors = employee.validate();
    assert!(!employee.is_valid());
    assert_eq!(errors.get("name"), &[ErrorKind::Required]);
    assert_eq!(errors.get("primary_address"), &[ErrorKind::Required]);
}

#[test]
fn declared_types_are_automatically_validated() {
    let schema = ModelSchema::builder("Event")
        .field("created_at", Spec::of(Primitive::Timestamp))
        .field("an_integer", Spec::of(Primitive::Integer))
        .build()
        .unwrap();

    let mut record = schema.record();
    record.set("created_at", Value::from("foo"));
    let errors = record.validate();
    assert_eq!(errors.get("created_at"), &[ErrorKind::Invalid]);

    let mut record = schema.record();
    record.set("an_integer", Value::from("foo"));
    let errors = record.validate();
    assert_eq!(errors.get("an_integer"), &[ErrorKind::Invalid]);

    // Absent values are fine without a required validator.
    assert!(schema.record().is_valid());
}

// ============================================================================
// MAPPING SCENARIOS
// ============================================================================

fn map_holder() -> ModelSchema {
    ModelSchema::builder("Holder")
        .field("my_map", Spec::map_of(Primitive::String, Primitive::Integer))
        .build()
        .unwrap()
}

#[test]
fn map_values_failing_their_spec_are_flagged_under_the_key() {
    let holder = map_holder().record_from(&Value::from(json!({"my_map": {"joe": true}})));
    let errors = holder.validate();
    assert_eq!(errors.get("my_map/joe"), &[ErrorKind::Invalid]);
}

#[test]
fn map_keys_canonicalize_on_assignment() {
    // The integer key 2 is string-coercible, so typecasting stores it as
    // "2"; the value "Bill" then fails the integer value spec.
    let raw: Value = [(
        Value::from("my_map"),
        [(Value::from(2), Value::from("Bill"))].into_iter().collect(),
    )]
    .into_iter()
    .collect();

    let holder = map_holder().record_from(&raw);
    let errors = holder.validate();
    assert_eq!(errors.get("my_map/2"), &[ErrorKind::Invalid]);
    assert_eq!(errors.get("my_map/keys/2"), &[]);
}

#[test]
fn uncoercible_keys_are_flagged_under_the_keys_segment() {
    let schema = ModelSchema::builder("Holder")
        .field("my_map", Spec::map_of(Primitive::Integer, Primitive::String))
        .build()
        .unwrap();

    let holder = schema.record_from(&Value::from(json!({"my_map": {"joe": "x"}})));
    let errors = holder.validate();
    assert_eq!(errors.get("my_map/keys/joe"), &[ErrorKind::Invalid]);
    assert_eq!(errors.get("my_map/joe"), &[]);
}

#[test]
fn composite_keys_render_as_json_in_key_paths() {
    let widget = ModelSchema::builder("Widget")
        .field("name", Spec::of(Primitive::String).validate("required"))
        .build()
        .unwrap();
    let schema = ModelSchema::builder("Holder")
        .field(
            "my_map",
            Spec::map_of(Primitive::String, Spec::model(Arc::new(widget))),
        )
        .build()
        .unwrap();

    let mut entries: IndexMap<Value, Value> = IndexMap::new();
    entries.insert(
        Value::from("joe"),
        Value::from(json!({"name": "somewidget"})),
    );
    entries.insert(
        Value::Map(IndexMap::new()),
        Value::from(json!({"name": "somethingelse"})),
    );
    let raw: Value = [(Value::from("my_map"), Value::Map(entries))]
        .into_iter()
        .collect();

    let holder = schema.record_from(&raw);
    let errors = holder.validate();
    assert!(!errors.get("my_map/keys/{}").is_empty());
}

#[test]
fn nested_model_values_validate_through_map_entries() {
    let widget = ModelSchema::builder("Widget")
        .field("name", Spec::of(Primitive::String).validate("required"))
        .build()
        .unwrap();
    let schema = ModelSchema::builder("Holder")
        .field(
            "my_map",
            Spec::map_of(Primitive::String, Spec::model(Arc::new(widget))),
        )
        .build()
        .unwrap();

    let holder = schema.record_from(&Value::from(json!({"my_map": {"joe": {"name": ""}}})));
    let errors = holder.validate();
    assert_eq!(errors.get("my_map/joe/name"), &[ErrorKind::Required]);
}

#[test]
fn outer_map_validations_fire_on_nil() {
    let schema = ModelSchema::builder("Holder")
        .field(
            "my_map",
            Spec::map_of(Primitive::String, Primitive::Integer).validate("required"),
        )
        .build()
        .unwrap();

    let holder = schema.record();
    let errors = holder.validate();
    assert_eq!(errors.get("my_map"), &[ErrorKind::Required]);
}

#[test]
fn nested_maps_build_and_serialize() {
    let widget = ModelSchema::builder("Widget")
        .field("name", Spec::of(Primitive::String).validate("required"))
        .build()
        .unwrap();
    let schema = ModelSchema::builder("Catalog")
        .field(
            "widgets",
            Spec::map_of(
                Primitive::String,
                Spec::map_of(Primitive::String, Spec::model(Arc::new(widget))),
            ),
        )
        .build()
        .unwrap();

    let raw = Value::from(json!({
        "widgets": {"popular": {"widget1": {"name": "widget1"}}}
    }));
    let catalog = schema.record_from(&raw);
    assert!(catalog.is_valid());
    assert_eq!(catalog.to_data(), raw);
}

// ============================================================================
// DATA CONVERSION
// ============================================================================

#[test]
fn data_converts_to_object_form_and_back() {
    let address = ModelSchema::builder("Address")
        .field("state", Spec::any())
        .field("zip", Spec::any())
        .build()
        .unwrap();
    let schema = ModelSchema::builder("Employee")
        .field("a_boolean", Spec::of(Primitive::Boolean))
        .field("an_integer", Spec::of(Primitive::Integer))
        .field("a_timestamp", Spec::of(Primitive::Timestamp))
        .field("widget1", Spec::of(Primitive::Map))
        .field("address", Spec::model(Arc::new(address.clone())))
        .field("addresses", Spec::seq_of(Spec::model(Arc::new(address))))
        .field("colors", Spec::of(Primitive::Seq))
        .build()
        .unwrap();

    let t = Utc.with_ymd_and_hms(2018, 10, 30, 10, 46, 8).unwrap();
    let Value::Map(mut data) = Value::from(json!({
        "a_boolean": true,
        "an_integer": 4,
        "widget1": {"foo": "FOO"},
        "address": {"state": "NY", "zip": "11961"},
        "addresses": [{"zip": "11111"}, {"zip": "22222"}],
        "colors": ["red", "white", "blue"],
    })) else {
        panic!("expected a map literal");
    };
    data.insert(Value::from("a_timestamp"), Value::Timestamp(t));
    let data = Value::Map(data);

    let employee = schema.record_from(&data);
    assert_eq!(employee.get("a_boolean"), &Value::from(true));
    assert_eq!(employee.get("an_integer"), &Value::from(4));
    assert_eq!(employee.get("a_timestamp"), &Value::Timestamp(t));
    assert_eq!(
        employee.get("address").as_model().unwrap().to_data(),
        Value::from(json!({"state": "NY", "zip": "11961"}))
    );
    assert_eq!(
        employee.get("colors"),
        &Value::from(json!(["red", "white", "blue"]))
    );
    assert_eq!(employee.to_data(), data);
}

#[test]
fn to_data_excludes_nil_but_not_false() {
    let schema = ModelSchema::builder("Flags")
        .field("foo", Spec::of(Primitive::Boolean))
        .field("bar", Spec::any())
        .build()
        .unwrap();

    let empty = schema.record();
    assert_eq!(empty.to_data(), Value::from(json!({})));

    let mut record = schema.record();
    record.set("foo", Value::from(false));
    assert_eq!(record.to_data(), Value::from(json!({"foo": false})));
}

#[test]
fn undeclared_attributes_are_ignored() {
    let schema = ModelSchema::builder("Thing")
        .field("foo", Spec::any())
        .build()
        .unwrap();
    let record = schema.record_from(&Value::from(json!({"foo": "FOO", "bar": "BAR"})));
    assert_eq!(record.get("foo"), &Value::from("FOO"));
    assert_eq!(record.to_data(), Value::from(json!({"foo": "FOO"})));
}

#[test]
fn mapping_keys_rename_fields_on_the_wire() {
    let schema = ModelSchema::builder("Response")
        .mapped_field("server_errors", "errors", Spec::seq_of(Primitive::String))
        .build()
        .unwrap();

    let record = schema.record_from(&Value::from(json!({"errors": ["one", "two"]})));
    assert_eq!(
        record.get("server_errors"),
        &Value::from(json!(["one", "two"]))
    );
    assert_eq!(record.to_data(), Value::from(json!({"errors": ["one", "two"]})));
}

#[test]
fn sequences_of_models_round_trip() {
    let widget = ModelSchema::builder("Widget")
        .field("name", Spec::of(Primitive::String).validate("required"))
        .build()
        .unwrap();
    let schema = ModelSchema::builder("Box")
        .field("a_seq", Spec::seq_of(Spec::model(Arc::new(widget))))
        .build()
        .unwrap();

    let record = schema.record_from(&Value::from(json!({"a_seq": [{"name": "widget1"}]})));
    assert!(record.is_valid());
    assert_eq!(
        record.to_data(),
        Value::from(json!({"a_seq": [{"name": "widget1"}]}))
    );

    let invalid = schema.record_from(&Value::from(json!({"a_seq": [{"name": null}]})));
    let errors = invalid.validate();
    assert_eq!(errors.get("a_seq/0/name"), &[ErrorKind::Required]);
}
