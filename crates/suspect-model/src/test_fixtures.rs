//! Shared fixture for unit tests: a slice of the JDK plus a few project
//! classes.

use crate::def::{AbstractionFlags, AbstractionKind};
use crate::model::ProjectModel;
use crate::types::TypeId;

use AbstractionKind::{Class, Interface};

pub(crate) fn jdk_model() -> ProjectModel {
    let model = ProjectModel::new();
    let library = |def| {
        model
            .set_flags(def, AbstractionFlags::LIBRARY)
            .expect("declared");
    };
    let declare = |name: &str, kind, params: &[&str], supers: &[&str]| {
        let def = model.declare(name, kind, params);
        for supertype in supers {
            model.add_supertype(def, supertype).expect("supertype");
        }
        def
    };

    let iterable = declare("java.lang.Iterable", Interface, &["T"], &[]);
    let collection = declare("java.util.Collection", Interface, &["E"], &["java.lang.Iterable<E>"]);
    let list = declare("java.util.List", Interface, &["E"], &["java.util.Collection<E>"]);
    let array_list = declare("java.util.ArrayList", Class, &["E"], &["java.util.List<E>"]);
    let map = declare("java.util.Map", Interface, &["K", "V"], &[]);
    let hash_map = declare("java.util.HashMap", Class, &["K", "V"], &["java.util.Map<K, V>"]);
    let comparable = declare("java.lang.Comparable", Interface, &["T"], &[]);
    let char_sequence = declare("java.lang.CharSequence", Interface, &[], &[]);
    let string = declare(
        "java.lang.String",
        Class,
        &[],
        &["java.lang.CharSequence", "java.lang.Comparable<java.lang.String>"],
    );
    let builder = declare("java.lang.StringBuilder", Class, &[], &["java.lang.CharSequence"]);
    let number = declare("java.lang.Number", Class, &[], &[]);
    let integer = declare(
        "java.lang.Integer",
        Class,
        &[],
        &["java.lang.Number", "java.lang.Comparable<java.lang.Integer>"],
    );
    let long = declare("java.lang.Long", Class, &[], &["java.lang.Number"]);
    let character = declare("java.lang.Character", Class, &[], &[]);
    for def in [
        iterable, collection, list, array_list, map, hash_map, comparable, char_sequence, string,
        builder, number, integer, long, character,
    ] {
        library(def);
    }
    for def in [string, builder, integer, long, character] {
        model.set_flags(def, AbstractionFlags::FINAL).expect("declared");
    }
    model.set_flags(number, AbstractionFlags::ABSTRACT).expect("declared");

    declare("example.StringList", Class, &[], &["java.util.ArrayList<String>"]);
    declare("example.Swapped", Class, &["A", "B"], &["java.util.Map<B, A>"]);
    declare("example.Tagged", Class, &["X"], &["java.util.ArrayList<String>"]);
    let sorted = declare("example.SortedBag", Class, &["T"], &["java.util.Collection<T>"]);
    model
        .set_type_param_bound(sorted, 0, "java.lang.Comparable<T>")
        .expect("bound");
    declare("example.Animal", Class, &[], &[]);
    declare("example.Dog", Class, &[], &["example.Animal"]);
    declare("example.Robot", Class, &[], &[]);
    model
}

/// Parse a type in no particular context; panics on malformed fixtures.
pub(crate) fn ty(model: &ProjectModel, text: &str) -> TypeId {
    model
        .parse_type(text, None)
        .unwrap_or_else(|err| panic!("fixture type '{text}': {err}"))
}
