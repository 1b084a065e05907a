use rstest::rstest;
use serde_json::json;
use std::rc::Rc;
use wirebind_json::{JsonBinding, Value};
use wirebind_schema::{
    Decl, DeclResolver, DeclType, Field, MapResolver, Primitive, ScopedName, TypeExpr, Union,
};

fn resolver(decls: Vec<Decl>) -> Rc<dyn DeclResolver> {
    let mut resolver = MapResolver::new();
    for decl in decls {
        resolver.insert("demo", decl);
    }
    Rc::new(resolver)
}

fn reference(name: &str) -> TypeExpr {
    TypeExpr::reference(ScopedName::new("demo", name), vec![])
}

fn void_field(name: &str) -> Field {
    Field::new(name, TypeExpr::primitive(Primitive::Void))
}

fn colour() -> Decl {
    Decl::new(
        "Colour",
        DeclType::Union(Union {
            type_params: vec![],
            fields: vec![void_field("red"), void_field("green"), void_field("blue")],
        }),
    )
}

fn shape() -> Decl {
    // A union with both void and non-void fields
    Decl::new(
        "Shape",
        DeclType::Union(Union {
            type_params: vec![],
            fields: vec![
                void_field("point"),
                Field::new("circle", TypeExpr::primitive(Primitive::Double))
                    .with_serialized_name("circleRadius"),
                Field::new("label", TypeExpr::primitive(Primitive::String)),
            ],
        }),
    )
}

fn colour_binding() -> JsonBinding {
    JsonBinding::new(&resolver(vec![colour()]), reference("Colour"))
}

fn shape_binding() -> JsonBinding {
    JsonBinding::new(&resolver(vec![shape()]), reference("Shape"))
}

#[rstest]
#[case(0, "red")]
#[case(1, "green")]
#[case(2, "blue")]
fn test_enum_bijection(#[case] ordinal: u64, #[case] wire: &str) {
    let jb = colour_binding();
    assert_eq!(jb.to_json(&Value::from(ordinal)), json!(wire));
    assert_eq!(jb.from_json(&json!(wire)).unwrap(), Value::from(ordinal));
}

#[test]
fn test_enum_rejects_unknown_string() {
    let err = colour_binding().from_json(&json!("mauve")).unwrap_err();
    assert_eq!(err.to_string(), "invalid string for enum: mauve at $");
}

#[test]
fn test_enum_rejects_non_string() {
    let err = colour_binding().from_json(&json!(1)).unwrap_err();
    assert_eq!(err.to_string(), "expected a string for enum at $");
}

#[test]
fn test_void_variant_encodes_as_bare_string() {
    let jb = shape_binding();
    assert_eq!(jb.to_json(&Value::unit_variant("point")), json!("point"));
    assert_eq!(
        jb.from_json(&json!("point")).unwrap(),
        Value::unit_variant("point")
    );
}

#[test]
fn test_payload_variant_encodes_as_single_key_object() {
    let jb = shape_binding();
    let value = Value::variant("circle", Value::Number(serde_json::Number::from_f64(2.5).unwrap()));
    let encoded = jb.to_json(&value);
    assert_eq!(encoded, json!({"circleRadius": 2.5}));
    assert_eq!(jb.from_json(&encoded).unwrap(), value);
}

#[test]
fn test_bare_string_for_payload_variant_fails() {
    let err = shape_binding().from_json(&json!("circleRadius")).unwrap_err();
    assert_eq!(
        err.to_string(),
        "union field circleRadius needs an associated value at $"
    );
}

#[test]
fn test_unknown_tag_fails() {
    let jb = shape_binding();
    let err = jb.from_json(&json!("square")).unwrap_err();
    assert_eq!(err.to_string(), "invalid union field square at $");
    let err = jb.from_json(&json!({"square": 1})).unwrap_err();
    assert_eq!(err.to_string(), "invalid union field square at $");
}

#[test]
fn test_empty_object_fails() {
    let err = shape_binding().from_json(&json!({})).unwrap_err();
    assert_eq!(err.to_string(), "union without a property at $");
}

#[test]
fn test_multi_key_object_is_rejected() {
    let err = shape_binding()
        .from_json(&json!({"circleRadius": 2.5, "label": "c"}))
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "expected a single-keyed object for union at $"
    );
}

#[test]
fn test_other_json_kinds_fail() {
    let err = shape_binding().from_json(&json!(3)).unwrap_err();
    assert_eq!(err.to_string(), "expected an object or string at $");
}

#[test]
fn test_payload_failure_names_the_wire_key() {
    let err = shape_binding()
        .from_json(&json!({"circleRadius": "big"}))
        .unwrap_err();
    assert_eq!(err.to_string(), "expected a number at $.circleRadius");
}

#[test]
fn test_void_variant_accepts_object_form() {
    let jb = shape_binding();
    assert_eq!(
        jb.from_json(&json!({"point": null})).unwrap(),
        Value::unit_variant("point")
    );
}
