use super::*;
use crate::call_site::{Argument, CallSite, ExprId, Receiver};
use crate::fixtures::{self, Fixture, FAST_LIST, UNIFIED_MAP};
use crate::matcher::match_call;
use crate::patterns::{PatternCatalog, PatternRegistry, PatternShape};
use suspect_common::ByteSpan;
use suspect_model::SearchScope;

struct Case<'f> {
    fixture: &'f Fixture,
    registry: PatternRegistry,
    site: CallSite,
    receiver: TypeId,
}

impl<'f> Case<'f> {
    fn new(fixture: &'f Fixture, receiver: &str, owner: &str, method: &str) -> Self {
        Self::with_catalog(fixture, receiver, owner, method, &PatternCatalog::default())
    }

    fn bulk_removal(fixture: &'f Fixture, receiver: &str) -> Self {
        let catalog = PatternCatalog::custom(vec![PatternShape::bulk_removal(
            "java.util.Collection",
            "removeAll",
            "java.util.Collection",
            0,
        )]);
        Self::with_catalog(fixture, receiver, "java.util.Collection", "removeAll", &catalog)
    }

    fn with_catalog(fixture: &'f Fixture, receiver: &str, owner: &str, method: &str, catalog: &PatternCatalog) -> Self {
        let receiver = fixture.ty(receiver);
        let site = CallSite::new(
            "Client.java",
            Receiver::Expr(receiver),
            fixture.method(owner, method),
            Argument::new(ExprId(1), TypeId::OBJECT, ByteSpan::new(0, 1)),
        );
        Self {
            fixture,
            registry: PatternRegistry::build(&fixture.model, SearchScope::All, catalog),
            site,
            receiver,
        }
    }

    fn classify_with(&self, argument_type: TypeId, shape: ArgumentShape, report_convertible: bool) -> Classification {
        let table: &dyn SymbolTable = &self.fixture.model;
        let matched = match_call(table, &self.site, &self.registry).expect("call matches");
        let callee = table.method(self.site.callee).expect("callee");
        classify(
            table,
            &ClassifyInput {
                argument_type,
                argument_shape: shape,
                receiver_type: self.receiver,
                callee: &callee,
                matched: &matched,
                report_convertible,
            },
        )
    }

    fn classify(&self, argument: &str) -> Classification {
        self.classify_with(self.fixture.ty(argument), ArgumentShape::Plain, true)
    }
}

#[test]
fn test_assignable_argument_is_fine() {
    let fixture = fixtures::eclipse_collections();
    let case = Case::new(&fixture, "FastList<CharSequence>", FAST_LIST, "contains");
    assert_eq!(case.classify("String"), Classification::NoProblem);
    assert_eq!(case.classify("CharSequence"), Classification::NoProblem);
    assert_eq!(case.classify("null"), Classification::NoProblem);
}

#[test]
fn test_unrelated_argument_is_a_mismatch() {
    let fixture = fixtures::eclipse_collections();
    let case = Case::new(&fixture, "FastList<String>", FAST_LIST, "contains");
    let result = case.classify("Integer");
    assert_eq!(
        result,
        Classification::DefiniteMismatch(
            "'FastList<String>' may not contain objects of type 'Integer'".to_string()
        )
    );
    assert_eq!(result.code(), Some(suspect_common::diagnostic_codes::MAY_NOT_CONTAIN_OBJECTS_OF_TYPE));
}

#[test]
fn test_primitive_arguments_are_boxed() {
    let fixture = fixtures::eclipse_collections();
    let numbers = Case::new(&fixture, "FastList<Number>", FAST_LIST, "contains");
    assert_eq!(numbers.classify("int"), Classification::NoProblem);
    let strings = Case::new(&fixture, "FastList<String>", FAST_LIST, "contains");
    assert_eq!(
        strings.classify("long"),
        Classification::DefiniteMismatch(
            "'FastList<String>' may not contain objects of type 'Long'".to_string()
        )
    );
    // no java.lang.Float in the fixture
    assert_eq!(strings.classify("float"), Classification::NoProblem);
}

#[test]
fn test_convertible_argument() {
    let fixture = fixtures::eclipse_collections();
    let case = Case::new(&fixture, "UnifiedMap<String, Integer>", UNIFIED_MAP, "get");
    let expected = Classification::ConvertibleWarning("Suspicious call to 'UnifiedMap.get(Object)'".to_string());
    assert_eq!(case.classify("CharSequence"), expected);
    assert_eq!(
        case.classify_with(fixture.ty("CharSequence"), ArgumentShape::Plain, false),
        Classification::NoProblem
    );
    assert!(expected.is_problem());
    assert_eq!(expected.message(), Some("Suspicious call to 'UnifiedMap.get(Object)'"));
}

#[test]
fn test_poly_conditional_collapsed_to_object() {
    let fixture = fixtures::eclipse_collections();
    let case = Case::new(&fixture, "FastList<String>", FAST_LIST, "contains");
    assert_eq!(
        case.classify_with(TypeId::OBJECT, ArgumentShape::Conditional { poly: true }, true),
        Classification::NoProblem
    );
    assert!(
        case.classify_with(TypeId::OBJECT, ArgumentShape::Conditional { poly: false }, true)
            .is_problem()
    );
    assert!(
        case.classify_with(fixture.ty("Integer"), ArgumentShape::Conditional { poly: true }, true)
            .is_problem()
    );
}

#[test]
fn test_bulk_removal_compares_element_types() {
    let fixture = fixtures::eclipse_collections();
    let case = Case::bulk_removal(&fixture, "MutableList<String>");
    assert_eq!(
        case.classify("MutableList<Integer>"),
        Classification::DefiniteMismatch(
            "'MutableList<String>' may not contain objects of type 'Integer'".to_string()
        )
    );
    assert_eq!(case.classify("java.util.List<String>"), Classification::NoProblem);
    assert_eq!(case.classify("java.util.Collection<?>"), Classification::NoProblem);
    assert_eq!(case.classify("java.util.ArrayList"), Classification::NoProblem);
}

#[test]
fn test_bulk_removal_on_jdk_collection() {
    let fixture = fixtures::eclipse_collections();
    let case = Case::bulk_removal(&fixture, "java.util.Collection<String>");
    assert!(case.classify("java.util.Set<Integer>").is_problem());
}

#[test]
fn test_error_argument_is_fine() {
    let fixture = fixtures::eclipse_collections();
    let case = Case::new(&fixture, "FastList<String>", FAST_LIST, "contains");
    assert_eq!(
        case.classify_with(TypeId::ERROR, ArgumentShape::Plain, true),
        Classification::NoProblem
    );
    assert_eq!(Classification::NoProblem.message(), None);
    assert_eq!(Classification::NoProblem.code(), None);
}
