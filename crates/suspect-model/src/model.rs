//! In-memory project model.
//!
//! `ProjectModel` owns the type interner and the definition store of one
//! analyzed project and implements `SymbolTable` over them. It is populated
//! through a small builder API (declare an abstraction, add supertypes and
//! methods written as type expressions) and is read-only afterwards.

use crate::def::{
    AbstractionFlags, AbstractionInfo, AbstractionKind, DefId, DefinitionStore, MethodId,
    MethodInfo, MethodSignature, TypeParamInfo,
};
use crate::format::TypeFormatter;
use crate::intern::TypeInterner;
use crate::relations::RelationChecker;
use crate::substitution::TypeSubstitution;
use crate::table::{SearchScope, SymbolTable};
use crate::type_expr::TypeExprError;
use crate::types::{ClassRef, PrimitiveKind, TypeArgs, TypeData, TypeId, TypeParamKey, WildcardBound};
use dashmap::DashSet;
use std::sync::{Arc, RwLock};
use tracing::debug;

/// Iterable roots consulted by `element_type_of` unless configured otherwise.
pub const DEFAULT_ITERABLE_ROOTS: &[&str] = &[
    "java.lang.Iterable",
    "org.eclipse.collections.api.RichIterable",
];

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("unknown abstraction id {0:?}")]
    UnknownAbstraction(DefId),
    #[error("'{owner}' has no type parameter at index {index}")]
    TypeParamOutOfRange { owner: String, index: usize },
    #[error("supertype '{0}' is not a class or interface type")]
    InvalidSupertype(String),
    #[error(transparent)]
    TypeExpr(#[from] TypeExprError),
}

pub struct ProjectModel {
    pub(crate) types: TypeInterner,
    pub(crate) defs: DefinitionStore,
    conversions: DashSet<(DefId, DefId)>,
    iterable_roots: RwLock<Vec<String>>,
}

impl Default for ProjectModel {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectModel {
    pub fn new() -> Self {
        Self {
            types: TypeInterner::new(),
            defs: DefinitionStore::new(),
            conversions: DashSet::new(),
            iterable_roots: RwLock::new(
                DEFAULT_ITERABLE_ROOTS.iter().map(|root| (*root).to_string()).collect(),
            ),
        }
    }

    pub fn definitions(&self) -> &DefinitionStore {
        &self.defs
    }

    pub fn interner(&self) -> &TypeInterner {
        &self.types
    }

    // =========================================================================
    // Builder
    // =========================================================================

    /// Declare an abstraction with the given type parameter names. Bounds
    /// default to `Object`; see `set_type_param_bound`.
    pub fn declare(&self, qualified_name: &str, kind: AbstractionKind, type_params: &[&str]) -> DefId {
        let mut info = AbstractionInfo::new(kind, qualified_name);
        info.type_params = type_params
            .iter()
            .map(|name| TypeParamInfo {
                name: (*name).to_string(),
                bound: TypeId::OBJECT,
            })
            .collect();
        self.defs.register(info)
    }

    pub fn set_flags(&self, def: DefId, flags: AbstractionFlags) -> Result<(), ModelError> {
        self.defs
            .update(def, |info| info.flags |= flags)
            .ok_or(ModelError::UnknownAbstraction(def))
    }

    /// Set the upper bound of a type parameter. The bound is parsed in the
    /// context of `def`, so it may mention `def`'s own parameters.
    pub fn set_type_param_bound(&self, def: DefId, index: usize, bound: &str) -> Result<(), ModelError> {
        let bound = self.parse_type(bound, Some(def))?;
        self.defs
            .update(def, |info| match info.type_params.get_mut(index) {
                Some(param) => {
                    param.bound = bound;
                    Ok(())
                }
                None => Err(ModelError::TypeParamOutOfRange {
                    owner: info.qualified_name.clone(),
                    index,
                }),
            })
            .ok_or(ModelError::UnknownAbstraction(def))?
    }

    /// Add a direct supertype, written over `def`'s own type parameters
    /// (`"java.util.List<E>"`).
    pub fn add_supertype(&self, def: DefId, supertype: &str) -> Result<TypeId, ModelError> {
        let ty = self.parse_type(supertype, Some(def))?;
        if !matches!(&*self.types.lookup(ty), TypeData::Reference(_)) {
            return Err(ModelError::InvalidSupertype(supertype.to_string()));
        }
        self.defs
            .update(def, |info| info.supertypes.push(ty))
            .ok_or(ModelError::UnknownAbstraction(def))?;
        Ok(ty)
    }

    pub fn add_method(
        &self,
        owner: DefId,
        name: &str,
        params: &[&str],
        return_type: &str,
    ) -> Result<MethodId, ModelError> {
        if !self.defs.contains(owner) {
            return Err(ModelError::UnknownAbstraction(owner));
        }
        let params = params
            .iter()
            .map(|param| self.parse_type(param, Some(owner)))
            .collect::<Result<TypeArgs, _>>()?;
        let return_type = self.parse_type(return_type, Some(owner))?;
        Ok(self.defs.register_method(MethodInfo {
            owner,
            name: name.to_string(),
            params,
            return_type,
        }))
    }

    /// Record a user-defined conversion from `from` to `to` (a declared
    /// adapter the language accepts in a cast context).
    pub fn declare_conversion(&self, from: DefId, to: DefId) {
        debug!(from = from.0, to = to.0, "declare_conversion");
        self.conversions.insert((from, to));
    }

    pub(crate) fn has_conversion(&self, from: DefId, to: DefId) -> bool {
        self.conversions.contains(&(from, to))
    }

    pub fn add_iterable_root(&self, qualified_name: &str) {
        let mut roots = self
            .iterable_roots
            .write()
            .expect("iterable roots lock poisoned");
        if !roots.iter().any(|root| root == qualified_name) {
            roots.push(qualified_name.to_string());
        }
    }

    pub(crate) fn iterable_roots(&self) -> Vec<String> {
        self.iterable_roots
            .read()
            .expect("iterable roots lock poisoned")
            .clone()
    }

    /// `def<args>`; an empty `args` is the raw type.
    pub fn reference(&self, def: DefId, args: &[TypeId]) -> TypeId {
        self.types.intern(TypeData::Reference(ClassRef {
            def,
            args: args.iter().copied().collect(),
        }))
    }

    pub fn array_of(&self, element: TypeId) -> TypeId {
        self.types.intern(TypeData::Array(element))
    }

    // =========================================================================
    // Helpers shared by substitution and relations
    // =========================================================================

    /// Declared upper bound of a type parameter.
    pub(crate) fn param_bound(&self, key: TypeParamKey) -> TypeId {
        self.defs
            .get(key.owner)
            .and_then(|info| info.type_params.get(key.index as usize).map(|param| param.bound))
            .unwrap_or(TypeId::OBJECT)
    }

    /// Upper bound of a wildcard or capture; other types unchanged.
    pub(crate) fn upper_bound_of(&self, ty: TypeId) -> TypeId {
        match &*self.types.lookup(ty) {
            TypeData::Wildcard(WildcardBound::Extends(bound)) => *bound,
            TypeData::Wildcard(WildcardBound::Unbounded | WildcardBound::Super(_)) => TypeId::OBJECT,
            TypeData::Captured(wildcard) => self.upper_bound_of(*wildcard),
            _ => ty,
        }
    }

    pub(crate) fn boxed_type_of(&self, kind: PrimitiveKind) -> Option<TypeId> {
        let def = self.defs.lookup_name(kind.boxed_name())?;
        Some(self.reference(def, &[]))
    }

    pub(crate) fn unboxed_kind(&self, def: DefId) -> Option<PrimitiveKind> {
        let info = self.defs.get(def)?;
        PrimitiveKind::from_boxed_name(&info.qualified_name)
    }

    /// Erased subclass relation: is `descendant` (or equal to) `ancestor`?
    pub(crate) fn is_subclass(&self, ancestor: DefId, descendant: DefId) -> bool {
        self.compute_class_substitution(ancestor, descendant, &TypeSubstitution::new())
            .is_some()
    }
}

impl SymbolTable for ProjectModel {
    fn type_data(&self, id: TypeId) -> Arc<TypeData> {
        self.types.lookup(id)
    }

    fn intern(&self, data: TypeData) -> TypeId {
        self.types.intern(data)
    }

    fn format_type(&self, id: TypeId) -> String {
        TypeFormatter::new(self).format(id)
    }

    fn abstraction(&self, def: DefId) -> Option<AbstractionInfo> {
        self.defs.get(def)
    }

    fn method(&self, id: MethodId) -> Option<MethodInfo> {
        self.defs.get_method(id)
    }

    fn find_abstraction(&self, qualified_name: &str, scope: SearchScope) -> Option<DefId> {
        let def = self.defs.lookup_name(qualified_name)?;
        if scope == SearchScope::ProjectOnly && self.defs.get(def)?.is_library() {
            return None;
        }
        Some(def)
    }

    fn find_method_by_signature(&self, owner: DefId, signature: &MethodSignature) -> Option<MethodId> {
        let info = self.defs.get(owner)?;
        info.methods.iter().copied().find(|&id| {
            self.defs.get_method(id).is_some_and(|method| {
                let declared = MethodSignature::new(method.name, method.params);
                self.signatures_match(&declared, signature)
            })
        })
    }

    fn class_substitution(
        &self,
        ancestor: DefId,
        descendant: DefId,
        base: &TypeSubstitution,
    ) -> Option<TypeSubstitution> {
        self.compute_class_substitution(ancestor, descendant, base)
    }

    fn receiver_substitution(&self, receiver: TypeId) -> Option<(DefId, TypeSubstitution)> {
        self.compute_receiver_substitution(receiver)
    }

    fn instantiate(&self, ty: TypeId, substitution: &TypeSubstitution) -> TypeId {
        self.instantiate_type(ty, substitution)
    }

    fn is_assignable_from(&self, target: TypeId, candidate: TypeId) -> bool {
        RelationChecker::new(self).is_assignable(target, candidate)
    }

    fn is_convertible_from(&self, target: TypeId, candidate: TypeId) -> bool {
        RelationChecker::new(self).is_convertible(target, candidate)
    }

    fn erasure(&self, ty: TypeId) -> TypeId {
        self.erase_type(ty)
    }

    fn upper_bound(&self, ty: TypeId) -> TypeId {
        self.upper_bound_of(ty)
    }

    fn boxed_type(&self, primitive: TypeId) -> Option<TypeId> {
        let kind = self.types.lookup(primitive).as_primitive()?;
        self.boxed_type_of(kind)
    }

    fn element_type_of(&self, collection_like: TypeId) -> Option<TypeId> {
        self.element_type(collection_like)
    }
}

#[cfg(test)]
#[path = "../tests/model_tests.rs"]
mod tests;
