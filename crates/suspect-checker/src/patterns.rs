//! Pattern operations and the registry built from a catalog.
//!
//! A *catalog* is a declarative table of pattern shapes: which abstraction
//! declares the operation, its name, the shape of its single parameter and
//! which of the abstraction's type parameters the argument is checked
//! against. Building a *registry* resolves every shape against a symbol
//! table; shapes whose abstraction or method is missing contribute nothing.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use suspect_model::{
    ClassRef, DefId, MethodId, MethodSignature, SearchScope, SymbolTable, TypeArgs, TypeData,
    TypeId,
};
use tracing::{debug, warn};

/// Parameter of a pattern operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParamShape {
    /// `Object`: a lookup such as `contains(Object)`.
    Top,
    /// A collection of unknown element type (`Collection<?>`): a bulk
    /// operation such as `removeAll`, checked by element type.
    Collection { qualified_name: String },
}

/// One row of a catalog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatternShape {
    pub abstraction: String,
    pub method: String,
    pub param: ParamShape,
    pub checked_param: usize,
}

impl PatternShape {
    pub fn lookup(abstraction: &str, method: &str, checked_param: usize) -> Self {
        Self {
            abstraction: abstraction.to_string(),
            method: method.to_string(),
            param: ParamShape::Top,
            checked_param,
        }
    }

    pub fn bulk_removal(abstraction: &str, method: &str, collection: &str, checked_param: usize) -> Self {
        Self {
            abstraction: abstraction.to_string(),
            method: method.to_string(),
            param: ParamShape::Collection {
                qualified_name: collection.to_string(),
            },
            checked_param,
        }
    }
}

pub const RICH_ITERABLE: &str = "org.eclipse.collections.api.RichIterable";
pub const ORDERED_ITERABLE: &str = "org.eclipse.collections.api.ordered.OrderedIterable";
pub const LIST_ITERABLE: &str = "org.eclipse.collections.api.list.ListIterable";
pub const MAP_ITERABLE: &str = "org.eclipse.collections.api.map.MapIterable";

/// The container family a session checks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatternCatalog {
    shapes: Vec<PatternShape>,
}

impl Default for PatternCatalog {
    fn default() -> Self {
        Self::eclipse_collections()
    }
}

impl PatternCatalog {
    /// Eclipse Collections lookups. Bulk-removal rows are left to custom
    /// catalogs.
    pub fn eclipse_collections() -> Self {
        Self {
            shapes: vec![
                PatternShape::lookup(RICH_ITERABLE, "contains", 0),
                PatternShape::lookup(ORDERED_ITERABLE, "indexOf", 0),
                PatternShape::lookup(LIST_ITERABLE, "lastIndexOf", 0),
                PatternShape::lookup(MAP_ITERABLE, "get", 0),
                PatternShape::lookup(MAP_ITERABLE, "containsKey", 0),
                PatternShape::lookup(MAP_ITERABLE, "containsValue", 1),
            ],
        }
    }

    pub fn custom(shapes: Vec<PatternShape>) -> Self {
        Self { shapes }
    }

    pub fn shapes(&self) -> &[PatternShape] {
        &self.shapes
    }

    /// Whether any lookup abstraction of the catalog exists in `table`.
    /// Bulk-removal shapes alone do not count: their collection abstraction
    /// is usually a core type on every classpath.
    pub fn is_in_use(&self, table: &dyn SymbolTable, scope: SearchScope) -> bool {
        self.shapes
            .iter()
            .filter(|shape| shape.param == ParamShape::Top)
            .any(|shape| table.find_abstraction(&shape.abstraction, scope).is_some())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OperationKind {
    /// Argument checked directly against the bound type.
    Lookup,
    /// Argument's element type checked against the receiver's element type.
    BulkRemoval,
}

/// A catalog row resolved against a symbol table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatternOperation {
    pub declaring: DefId,
    pub method: MethodId,
    pub name: String,
    /// Declared signature, over `declaring`'s type parameters.
    pub signature: MethodSignature,
    pub checked_param: usize,
    pub kind: OperationKind,
}

/// Resolved pattern operations, in catalog order.
#[derive(Clone, Debug, Default)]
pub struct PatternRegistry {
    operations: Vec<PatternOperation>,
    /// Method name -> positions in `operations`, ascending.
    by_name: FxHashMap<String, SmallVec<[usize; 4]>>,
}

impl PatternRegistry {
    pub fn build(table: &dyn SymbolTable, scope: SearchScope, catalog: &PatternCatalog) -> Self {
        let operations: Vec<PatternOperation> = catalog
            .shapes()
            .iter()
            .filter_map(|shape| resolve_shape(table, scope, shape))
            .collect();
        debug!(
            shapes = catalog.shapes().len(),
            resolved = operations.len(),
            "PatternRegistry::build"
        );
        let mut by_name: FxHashMap<String, SmallVec<[usize; 4]>> = FxHashMap::default();
        for (index, op) in operations.iter().enumerate() {
            by_name.entry(op.name.clone()).or_default().push(index);
        }
        Self { operations, by_name }
    }

    pub fn operations(&self) -> &[PatternOperation] {
        &self.operations
    }

    /// Operations named `name`, in catalog order.
    pub fn candidates<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a PatternOperation> + use<'a> {
        let operations = &self.operations;
        self.by_name
            .get(name)
            .into_iter()
            .flat_map(move |indices| indices.iter().map(move |&index| &operations[index]))
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

fn resolve_shape(table: &dyn SymbolTable, scope: SearchScope, shape: &PatternShape) -> Option<PatternOperation> {
    let Some(declaring) = table.find_abstraction(&shape.abstraction, scope) else {
        debug!(abstraction = %shape.abstraction, "pattern abstraction not found");
        return None;
    };
    let (param, kind) = match &shape.param {
        ParamShape::Top => (TypeId::OBJECT, OperationKind::Lookup),
        ParamShape::Collection { qualified_name } => {
            let collection = table.find_abstraction(qualified_name, scope)?;
            let arity = table.abstraction(collection)?.type_params.len();
            let args: TypeArgs = std::iter::repeat_n(TypeId::WILDCARD, arity).collect();
            let param = table.intern(TypeData::Reference(ClassRef {
                def: collection,
                args,
            }));
            (param, OperationKind::BulkRemoval)
        }
    };
    let signature = MethodSignature::new(shape.method.clone(), [param]);
    let Some(method) = table.find_method_by_signature(declaring, &signature) else {
        debug!(
            abstraction = %shape.abstraction,
            method = %shape.method,
            "pattern method not found"
        );
        return None;
    };
    let declared = table
        .method(method)
        .map(|info| MethodSignature::new(info.name, info.params))
        .unwrap_or(signature);
    let type_params = table
        .abstraction(declaring)
        .map_or(0, |info| info.type_params.len());
    if shape.checked_param >= type_params {
        warn!(
            abstraction = %shape.abstraction,
            method = %shape.method,
            index = shape.checked_param,
            type_params,
            "checked type parameter index out of range; operation will never match"
        );
    }
    Some(PatternOperation {
        declaring,
        method,
        name: shape.method.clone(),
        signature: declared,
        checked_param: shape.checked_param,
        kind,
    })
}

#[cfg(test)]
#[path = "../tests/patterns_tests.rs"]
mod tests;
