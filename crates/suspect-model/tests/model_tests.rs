use super::*;
use crate::test_fixtures::{jdk_model, ty};

#[test]
fn test_search_scope_hides_library_abstractions() {
    let model = jdk_model();
    assert!(model.find_abstraction("java.util.List", SearchScope::All).is_some());
    assert!(model.find_abstraction("java.util.List", SearchScope::ProjectOnly).is_none());
    assert!(model.find_abstraction("example.Dog", SearchScope::ProjectOnly).is_some());
    assert!(model.find_abstraction("example.Cat", SearchScope::All).is_none());
}

#[test]
fn test_find_method_by_erased_signature() {
    let model = jdk_model();
    let collection = model.definitions().lookup_name("java.util.Collection").expect("declared");
    let remove_all = model
        .add_method(collection, "removeAll", &["java.util.Collection<?>"], "boolean")
        .expect("method");
    let contains = model
        .add_method(collection, "contains", &["Object"], "boolean")
        .expect("method");

    let by_object = MethodSignature::new("contains", [TypeId::OBJECT]);
    assert_eq!(model.find_method_by_signature(collection, &by_object), Some(contains));

    let erased = MethodSignature::new("removeAll", [ty(&model, "java.util.Collection<String>")]);
    assert_eq!(model.find_method_by_signature(collection, &erased), Some(remove_all));

    let wrong_param = MethodSignature::new("contains", [ty(&model, "String")]);
    assert_eq!(model.find_method_by_signature(collection, &wrong_param), None);

    // inherited methods are not found on the subtype
    let list = model.definitions().lookup_name("java.util.List").expect("declared");
    assert_eq!(model.find_method_by_signature(list, &by_object), None);
}

#[test]
fn test_builder_errors() {
    let model = jdk_model();
    let dog = model.definitions().lookup_name("example.Dog").expect("declared");
    assert!(matches!(
        model.set_type_param_bound(dog, 0, "Object"),
        Err(ModelError::TypeParamOutOfRange { index: 0, .. })
    ));
    assert!(matches!(
        model.add_supertype(dog, "int"),
        Err(ModelError::InvalidSupertype(_))
    ));
    assert!(matches!(
        model.add_supertype(dog, "example.Cat"),
        Err(ModelError::TypeExpr(TypeExprError::UnknownType(_)))
    ));
    assert!(matches!(
        model.add_method(DefId(9_999), "bark", &[], "void"),
        Err(ModelError::UnknownAbstraction(_))
    ));
}

#[test]
fn test_element_type_of() {
    let model = jdk_model();
    let string = ty(&model, "String");
    assert_eq!(model.element_type_of(ty(&model, "java.util.List<String>")), Some(string));
    assert_eq!(model.element_type_of(ty(&model, "example.StringList")), Some(string));
    assert_eq!(model.element_type_of(ty(&model, "String[]")), Some(string));
    assert_eq!(
        model.element_type_of(ty(&model, "java.util.List<? extends Number>")),
        Some(ty(&model, "Number"))
    );
    assert_eq!(model.element_type_of(ty(&model, "java.util.List<?>")), None);
    assert_eq!(model.element_type_of(ty(&model, "java.util.List<? super Number>")), None);
    assert_eq!(model.element_type_of(ty(&model, "java.util.ArrayList")), None);
    assert_eq!(model.element_type_of(ty(&model, "java.util.Map<String, String>")), None);
    assert_eq!(model.element_type_of(TypeId::INT), None);
}

#[test]
fn test_additional_iterable_root() {
    let model = jdk_model();
    assert_eq!(model.element_type_of(ty(&model, "java.util.Map<String, Integer>")), None);
    model.add_iterable_root("java.util.Map");
    assert_eq!(
        model.element_type_of(ty(&model, "java.util.Map<String, Integer>")),
        Some(ty(&model, "String"))
    );
}

#[test]
fn test_signatures_match_by_erasure() {
    let model = jdk_model();
    let left = MethodSignature::new("get", [ty(&model, "java.util.List<String>")]);
    let right = MethodSignature::new("get", [ty(&model, "java.util.List<Integer>")]);
    let other = MethodSignature::new("put", [ty(&model, "java.util.List<Integer>")]);
    assert!(model.signatures_match(&left, &right));
    assert!(!model.signatures_match(&left, &other));
}

#[test]
fn test_is_inheritor() {
    let model = jdk_model();
    let list = ty(&model, "java.util.List<String>");
    assert!(model.is_inheritor(list, "java.lang.Iterable"));
    assert!(model.is_inheritor(list, "java.util.List"));
    assert!(!model.is_inheritor(list, "java.util.Map"));
    assert!(!model.is_inheritor(list, "org.example.Missing"));
}
