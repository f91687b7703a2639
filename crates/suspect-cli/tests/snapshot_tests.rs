use super::*;
use crate::test_snapshots::ECLIPSE_SNAPSHOT;
use suspect_model::SearchScope;

fn load(source: &str) -> Result<LoadedSnapshot, SnapshotError> {
    Snapshot::from_json(source)?.load("fallback.snapshot.json")
}

#[test]
fn test_parse_method_ref() {
    let reference = parse_method_ref("java.util.Map#put(K, java.util.List<Map<K, V>>)").unwrap();
    assert_eq!(reference.owner, "java.util.Map");
    assert_eq!(reference.name, "put");
    assert_eq!(reference.params, vec!["K", "java.util.List<Map<K, V>>"]);
}

#[test]
fn test_parse_method_ref_without_params() {
    let reference = parse_method_ref("example.Main#run()").unwrap();
    assert_eq!(reference.name, "run");
    assert!(reference.params.is_empty());
}

#[test]
fn test_parse_method_ref_rejects_malformed_text() {
    for text in [
        "example.Main.run()",
        "example.Main#run",
        "#run()",
        "example.Main#(int)",
        "example.Main#run(int,)",
        "example.Main#run(Map<K, V)",
    ] {
        assert!(
            matches!(parse_method_ref(text), Err(SnapshotError::MalformedMethodRef(_))),
            "{text}"
        );
    }
}

#[test]
fn test_load_builds_model_and_calls() {
    let loaded = load(ECLIPSE_SNAPSHOT).unwrap();
    let model = &loaded.model;

    let list = model
        .find_abstraction("org.eclipse.collections.api.list.MutableList", SearchScope::All)
        .unwrap();
    let info = model.abstraction(list).unwrap();
    assert!(info.is_interface());
    assert!(info.is_library());
    assert_eq!(info.type_params.len(), 1);

    let string = model.find_abstraction("java.lang.String", SearchScope::All).unwrap();
    assert!(model.abstraction(string).unwrap().is_final());

    assert_eq!(loaded.calls.len(), 3);
    let first = &loaded.calls[0];
    assert_eq!(first.file, "src/Main.java");
    assert!(first.enclosing_method.is_some());
    let receiver = first.receiver_type().unwrap();
    assert_eq!(model.format_type(receiver), "MutableList<String>");

    let argument = first.single_argument().unwrap();
    assert_eq!(argument.expr, ExprId(10));
    assert_eq!(argument.span, ByteSpan::new(100, 5));
    assert_eq!(argument.shape, ArgumentShape::Plain);
    assert_eq!(argument.flow_type, None);
    assert_eq!(
        argument.static_type.map(|ty| model.format_type(ty)),
        Some("Integer".to_string())
    );

    let callee = model.method(first.callee).unwrap();
    assert_eq!(callee.name, "contains");
    assert_eq!(
        model.abstraction(callee.owner).unwrap().qualified_name,
        "org.eclipse.collections.api.RichIterable"
    );
}

#[test]
fn test_declaration_order_does_not_matter() {
    let source = r#"{
      "abstractions": [
        { "name": "example.Child", "typeParams": ["T"], "supertypes": ["example.Parent<T>"] },
        { "name": "example.Parent", "typeParams": [{ "name": "U", "bound": "example.Child<U>" }] }
      ]
    }"#;
    let loaded = load(source).unwrap();
    let child = loaded
        .model
        .find_abstraction("example.Child", SearchScope::All)
        .unwrap();
    assert_eq!(loaded.model.abstraction(child).unwrap().supertypes.len(), 1);
}

#[test]
fn test_call_fields_and_defaults() {
    let source = r#"{
      "abstractions": [
        { "name": "example.Box", "typeParams": ["T"],
          "methods": [{ "name": "contains", "params": ["Object"], "returns": "boolean" },
                      { "name": "check", "params": [] }] }
      ],
      "conversions": [],
      "calls": [
        { "file": "Other.java",
          "receiver": { "kind": "this" },
          "callee": "example.Box#contains(Object)",
          "enclosing": "example.Box#check()",
          "arguments": [{ "type": "T", "flowType": "T", "conditional": true, "poly": true }] },
        { "receiver": { "kind": "super" },
          "callee": "Box#contains(java.lang.Object)",
          "arguments": [{}, {}] }
      ]
    }"#;
    let loaded = load(source).unwrap();

    let first = &loaded.calls[0];
    assert_eq!(first.file, "Other.java");
    assert_eq!(first.receiver, Receiver::This);
    let argument = first.single_argument().unwrap();
    assert_eq!(argument.expr, ExprId(0));
    assert_eq!(argument.shape, ArgumentShape::Conditional { poly: true });
    assert!(matches!(
        &*loaded.model.type_data(argument.static_type.unwrap()),
        TypeData::TypeParameter(_)
    ));

    let second = &loaded.calls[1];
    assert_eq!(second.file, "fallback.snapshot.json");
    assert_eq!(second.receiver, Receiver::Super);
    assert_eq!(second.arguments.len(), 2);
    assert_eq!(second.arguments[1].expr, ExprId(1));
    assert_eq!(second.arguments[1].static_type, None);
}

#[test]
fn test_conversions_and_iterable_roots() {
    let source = r#"{
      "abstractions": [
        { "name": "example.Celsius", "final": true },
        { "name": "example.Kelvin", "final": true },
        { "name": "example.Bag", "kind": "interface", "typeParams": ["T"] }
      ],
      "conversions": [{ "from": "example.Celsius", "to": "example.Kelvin" }],
      "iterableRoots": ["example.Bag"]
    }"#;
    let loaded = load(source).unwrap();
    let model = &loaded.model;

    let celsius = model.parse_type("example.Celsius", None).unwrap();
    let kelvin = model.parse_type("example.Kelvin", None).unwrap();
    assert!(model.is_convertible_from(kelvin, celsius));
    assert!(!model.is_convertible_from(celsius, kelvin));

    let bag = model.parse_type("example.Bag<example.Kelvin>", None).unwrap();
    assert_eq!(model.element_type_of(bag), Some(kelvin));
}

#[test]
fn test_duplicate_abstraction_is_an_error() {
    let source = r#"{ "abstractions": [{ "name": "example.A" }, { "name": "example.A" }] }"#;
    assert!(matches!(load(source), Err(SnapshotError::DuplicateAbstraction(name)) if name == "example.A"));
}

#[test]
fn test_unknown_method_is_an_error() {
    let source = r#"{
      "abstractions": [{ "name": "example.A", "methods": [{ "name": "f", "params": ["int"] }] }],
      "calls": [{ "receiver": { "kind": "implicit" }, "callee": "example.A#f(long)", "arguments": [] }]
    }"#;
    assert!(matches!(load(source), Err(SnapshotError::UnknownMethod(_))));
}

#[test]
fn test_unresolved_type_names_the_failing_text() {
    let source = r#"{ "abstractions": [{ "name": "example.A", "supertypes": ["example.Missing"] }] }"#;
    let err = load(source).err().unwrap();
    assert!(matches!(err, SnapshotError::Model { ref context, .. } if context == "example.A"));
}

#[test]
fn test_non_abstraction_owner_is_an_error() {
    let source = r#"{
      "abstractions": [{ "name": "example.A" }],
      "calls": [{ "receiver": { "kind": "implicit" }, "callee": "int#f()", "arguments": [] }]
    }"#;
    assert!(matches!(load(source), Err(SnapshotError::NotAnAbstraction(_))));
}

#[test]
fn test_unknown_field_is_rejected() {
    assert!(matches!(
        Snapshot::from_json(r#"{ "abstractionz": [] }"#),
        Err(SnapshotError::Json(_))
    ));
}
