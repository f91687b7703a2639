//! Project models shared by the checker tests.
//!
//! `eclipse_collections()` models a slice of the JDK plus the Eclipse
//! Collections API and a few project classes. `box_seq_dict()` models a
//! small custom container family over the same JDK slice.

#![allow(dead_code)]

use suspect_model::{
    AbstractionFlags, AbstractionKind, DefId, MethodId, ProjectModel, TypeId,
};

use AbstractionKind::{Class, Interface};

pub struct Fixture {
    pub model: ProjectModel,
}

impl Fixture {
    fn new() -> Self {
        Self {
            model: ProjectModel::new(),
        }
    }

    pub fn ty(&self, text: &str) -> TypeId {
        self.model
            .parse_type(text, None)
            .unwrap_or_else(|err| panic!("fixture type '{text}': {err}"))
    }

    pub fn def(&self, name: &str) -> DefId {
        self.model
            .definitions()
            .lookup_name(name)
            .unwrap_or_else(|| panic!("{name} not declared"))
    }

    /// First method of `owner` called `name`.
    pub fn method(&self, owner: &str, name: &str) -> MethodId {
        let store = self.model.definitions();
        let info = store.get(self.def(owner)).expect("declared");
        info.methods
            .iter()
            .copied()
            .find(|&id| store.get_method(id).is_some_and(|m| m.name == name))
            .unwrap_or_else(|| panic!("{owner}#{name} not declared"))
    }

    fn declare(&self, name: &str, kind: AbstractionKind, params: &[&str], supers: &[&str]) -> DefId {
        let def = self.model.declare(name, kind, params);
        for supertype in supers {
            self.model
                .add_supertype(def, supertype)
                .unwrap_or_else(|err| panic!("{name}: {err}"));
        }
        def
    }

    fn methods(&self, def: DefId, methods: &[(&str, &str, &str)]) {
        for (name, param, ret) in methods {
            self.model
                .add_method(def, name, &[*param], ret)
                .unwrap_or_else(|err| panic!("{name}: {err}"));
        }
    }

    fn flag(&self, def: DefId, flags: AbstractionFlags) {
        self.model.set_flags(def, flags).expect("declared");
    }

    fn jdk(&self) {
        let lib = AbstractionFlags::LIBRARY;
        let iterable = self.declare("java.lang.Iterable", Interface, &["T"], &[]);
        let collection = self.declare("java.util.Collection", Interface, &["E"], &["java.lang.Iterable<E>"]);
        self.methods(
            collection,
            &[
                ("contains", "Object", "boolean"),
                ("remove", "Object", "boolean"),
                ("removeAll", "java.util.Collection<?>", "boolean"),
            ],
        );
        let list = self.declare("java.util.List", Interface, &["E"], &["java.util.Collection<E>"]);
        self.methods(list, &[("indexOf", "Object", "int")]);
        let array_list = self.declare("java.util.ArrayList", Class, &["E"], &["java.util.List<E>"]);
        let set = self.declare("java.util.Set", Interface, &["E"], &["java.util.Collection<E>"]);
        let char_sequence = self.declare("java.lang.CharSequence", Interface, &[], &[]);
        let string = self.declare("java.lang.String", Class, &[], &["java.lang.CharSequence"]);
        let builder = self.declare("java.lang.StringBuilder", Class, &[], &["java.lang.CharSequence"]);
        let number = self.declare("java.lang.Number", Class, &[], &[]);
        let mut boxes = Vec::new();
        for boxed in ["java.lang.Integer", "java.lang.Long", "java.lang.Double"] {
            boxes.push(self.declare(boxed, Class, &[], &["java.lang.Number"]));
        }
        boxes.push(self.declare("java.lang.Character", Class, &[], &[]));
        boxes.push(self.declare("java.lang.Boolean", Class, &[], &[]));

        for def in [iterable, collection, list, array_list, set, char_sequence, string, builder, number] {
            self.flag(def, lib);
        }
        for def in boxes.into_iter().chain([string, builder]) {
            self.flag(def, lib | AbstractionFlags::FINAL);
        }
        self.flag(number, AbstractionFlags::ABSTRACT);
    }

    fn project_classes(&self) {
        self.declare("example.Animal", Class, &[], &[]);
        self.declare("example.Dog", Class, &[], &["example.Animal"]);
        self.declare("example.Robot", Class, &[], &[]);
    }
}

pub const RICH_ITERABLE: &str = "org.eclipse.collections.api.RichIterable";
pub const ORDERED_ITERABLE: &str = "org.eclipse.collections.api.ordered.OrderedIterable";
pub const LIST_ITERABLE: &str = "org.eclipse.collections.api.list.ListIterable";
pub const MAP_ITERABLE: &str = "org.eclipse.collections.api.map.MapIterable";
pub const MUTABLE_COLLECTION: &str = "org.eclipse.collections.api.collection.MutableCollection";
pub const MUTABLE_LIST: &str = "org.eclipse.collections.api.list.MutableList";
pub const MUTABLE_MAP: &str = "org.eclipse.collections.api.map.MutableMap";
pub const FAST_LIST: &str = "org.eclipse.collections.impl.list.mutable.FastList";
pub const UNIFIED_MAP: &str = "org.eclipse.collections.impl.map.mutable.UnifiedMap";

pub fn jdk_only() -> Fixture {
    let fixture = Fixture::new();
    fixture.jdk();
    fixture.project_classes();
    fixture
}

pub fn eclipse_collections() -> Fixture {
    let fixture = jdk_only();
    let lib = AbstractionFlags::LIBRARY;

    let rich = fixture.declare(RICH_ITERABLE, Interface, &["T"], &["java.lang.Iterable<T>"]);
    fixture.methods(rich, &[("contains", "Object", "boolean")]);
    let ordered = fixture.declare(ORDERED_ITERABLE, Interface, &["T"], &["RichIterable<T>"]);
    fixture.methods(ordered, &[("indexOf", "Object", "int")]);
    let list_iterable = fixture.declare(LIST_ITERABLE, Interface, &["T"], &["OrderedIterable<T>"]);
    fixture.methods(list_iterable, &[("lastIndexOf", "Object", "int")]);
    let mutable_collection = fixture.declare(
        MUTABLE_COLLECTION,
        Interface,
        &["T"],
        &["RichIterable<T>", "java.util.Collection<T>"],
    );
    let mutable_list = fixture.declare(
        MUTABLE_LIST,
        Interface,
        &["T"],
        &["MutableCollection<T>", "ListIterable<T>", "java.util.List<T>"],
    );
    let fast_list = fixture.declare(FAST_LIST, Class, &["T"], &["MutableList<T>"]);
    fixture.methods(
        fast_list,
        &[("contains", "Object", "boolean"), ("indexOf", "Object", "int")],
    );

    let map_iterable = fixture.declare(MAP_ITERABLE, Interface, &["K", "V"], &["RichIterable<V>"]);
    fixture.methods(
        map_iterable,
        &[
            ("get", "Object", "V"),
            ("containsKey", "Object", "boolean"),
            ("containsValue", "Object", "boolean"),
        ],
    );
    let mutable_map = fixture.declare(MUTABLE_MAP, Interface, &["K", "V"], &["MapIterable<K, V>"]);
    let unified_map = fixture.declare(UNIFIED_MAP, Class, &["K", "V"], &["MutableMap<K, V>"]);
    fixture.methods(
        unified_map,
        &[("get", "Object", "V"), ("containsKey", "Object", "boolean")],
    );
    for def in [
        rich,
        ordered,
        list_iterable,
        mutable_collection,
        mutable_list,
        fast_list,
        map_iterable,
        mutable_map,
        unified_map,
    ] {
        fixture.flag(def, lib);
    }

    fixture.declare("example.StringList", Class, &[], &["FastList<String>"]);
    fixture.declare("example.Tagged", Class, &["X"], &["FastList<String>"]);
    fixture.declare("example.InverseMap", Class, &["A", "B"], &["MutableMap<B, A>"]);
    let bag = fixture.declare("example.CountingBag", Class, &["T"], &["MutableCollection<T>"]);
    fixture.methods(
        bag,
        &[("contains", "Object", "boolean"), ("containsAll", "java.util.Collection<?>", "boolean")],
    );
    // a `get(String)` overload that is not a pattern operation
    let registry = fixture.declare("example.Registry", Class, &["V"], &["UnifiedMap<String, V>"]);
    fixture.methods(registry, &[("get", "String", "V")]);
    fixture
}

pub const BOX: &str = "example.Box";
pub const SEQ: &str = "example.Seq";
pub const DICT: &str = "example.Dict";

/// `Box<T>.contains(Object)`, `Seq<T> extends Box<T>` with
/// `indexOf(Object)`, `Dict<K, V>` with `get`, `containsKey` and
/// `containsValue`, and `ArraySeq<T>` implementing `Seq<T>`.
pub fn box_seq_dict() -> Fixture {
    let fixture = jdk_only();
    let container = fixture.declare(BOX, Interface, &["T"], &[]);
    fixture.methods(container, &[("contains", "Object", "boolean")]);
    let seq = fixture.declare(SEQ, Interface, &["T"], &["Box<T>"]);
    fixture.methods(seq, &[("indexOf", "Object", "int")]);
    let dict = fixture.declare(DICT, Interface, &["K", "V"], &[]);
    fixture.methods(
        dict,
        &[
            ("get", "Object", "V"),
            ("containsKey", "Object", "boolean"),
            ("containsValue", "Object", "boolean"),
        ],
    );
    let array_seq = fixture.declare("example.ArraySeq", Class, &["T"], &["Seq<T>"]);
    fixture.methods(
        array_seq,
        &[("contains", "Object", "boolean"), ("indexOf", "Object", "int")],
    );
    fixture
}
