//! The symbol-table capability consumed by the analyzer.
//!
//! The analyzer never owns type information. It asks a `SymbolTable` for
//! abstractions, methods, substitutions and type relations. `ProjectModel`
//! is the in-memory implementation; hosts embedding the analyzer in another
//! front end implement the trait over their own symbol tables.

use crate::def::{AbstractionInfo, DefId, MethodId, MethodInfo, MethodSignature};
use crate::substitution::TypeSubstitution;
use crate::types::{TypeData, TypeId, TypeParamKey};
use std::sync::Arc;

/// Which abstractions a name lookup may see.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum SearchScope {
    /// Project sources and every library on the classpath.
    #[default]
    All,
    /// Project sources only; library abstractions are invisible.
    ProjectOnly,
}

/// Read-only view of a project's types, safe for concurrent use.
pub trait SymbolTable: Sync {
    // -------------------------------------------------------------------------
    // Types
    // -------------------------------------------------------------------------

    fn type_data(&self, id: TypeId) -> Arc<TypeData>;

    /// Intern a type structure. Interning is the only write the analyzer
    /// performs and it is idempotent.
    fn intern(&self, data: TypeData) -> TypeId;

    /// Presentable text of a type, using simple names.
    fn format_type(&self, id: TypeId) -> String;

    // -------------------------------------------------------------------------
    // Definitions
    // -------------------------------------------------------------------------

    fn abstraction(&self, def: DefId) -> Option<AbstractionInfo>;

    fn method(&self, id: MethodId) -> Option<MethodInfo>;

    fn find_abstraction(&self, qualified_name: &str, scope: SearchScope) -> Option<DefId>;

    /// Method declared directly in `owner` whose signature is
    /// override-equivalent to `signature` (same name, same erased
    /// parameter types). Inherited methods are not considered.
    fn find_method_by_signature(&self, owner: DefId, signature: &MethodSignature)
    -> Option<MethodId>;

    // -------------------------------------------------------------------------
    // Substitution
    // -------------------------------------------------------------------------

    /// Express `ancestor`'s type parameters as seen from `descendant`,
    /// given `base` for `descendant`'s own parameters. `None` when
    /// `ancestor` is not a supertype of `descendant`.
    fn class_substitution(
        &self,
        ancestor: DefId,
        descendant: DefId,
        base: &TypeSubstitution,
    ) -> Option<TypeSubstitution>;

    /// Declaring abstraction and argument substitution of a receiver type,
    /// with wildcard arguments captured.
    fn receiver_substitution(&self, receiver: TypeId) -> Option<(DefId, TypeSubstitution)>;

    /// Apply `substitution` to `ty`; raw parameters erase to their bound.
    fn instantiate(&self, ty: TypeId, substitution: &TypeSubstitution) -> TypeId;

    // -------------------------------------------------------------------------
    // Relations
    // -------------------------------------------------------------------------

    /// Can a value of `candidate` be used where `target` is expected,
    /// without a cast?
    fn is_assignable_from(&self, target: TypeId, candidate: TypeId) -> bool;

    /// Can a value of `candidate` reach `target` through some conversion
    /// (cast, unboxing, declared conversion)?
    fn is_convertible_from(&self, target: TypeId, candidate: TypeId) -> bool;

    fn erasure(&self, ty: TypeId) -> TypeId;

    /// Upper bound of wildcards and captures; other types unchanged.
    fn upper_bound(&self, ty: TypeId) -> TypeId;

    /// Reference type a primitive boxes to, when the boxed class is known.
    fn boxed_type(&self, primitive: TypeId) -> Option<TypeId>;

    /// Element type of an array or iterable type. `None` when the element
    /// type is unknown (raw usage, unbounded wildcard, not iterable).
    fn element_type_of(&self, collection_like: TypeId) -> Option<TypeId>;

    // -------------------------------------------------------------------------
    // Provided helpers
    // -------------------------------------------------------------------------

    fn type_param(&self, key: TypeParamKey) -> TypeId {
        self.intern(TypeData::TypeParameter(key))
    }

    /// Signature of `method` with `substitution` applied to its parameters.
    fn signature_of(&self, method: &MethodInfo, substitution: &TypeSubstitution) -> MethodSignature {
        MethodSignature::new(
            method.name.clone(),
            method
                .params
                .iter()
                .map(|&param| self.instantiate(param, substitution)),
        )
    }

    /// Override-equivalence: same name, same erased parameter types.
    fn signatures_match(&self, left: &MethodSignature, right: &MethodSignature) -> bool {
        left.name == right.name
            && left.params.len() == right.params.len()
            && left
                .params
                .iter()
                .zip(&right.params)
                .all(|(&l, &r)| l == r || self.erasure(l) == self.erasure(r))
    }

    /// Does `ty` inherit from (or equal) the abstraction named `qualified_name`?
    fn is_inheritor(&self, ty: TypeId, qualified_name: &str) -> bool {
        let Some(target) = self.find_abstraction(qualified_name, SearchScope::All) else {
            return false;
        };
        let Some((def, substitution)) = self.receiver_substitution(ty) else {
            return false;
        };
        self.class_substitution(target, def, &substitution).is_some()
    }
}
