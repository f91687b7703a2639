//! Assignability, convertibility and erasure.
//!
//! The relations follow Java's nominal rules closely enough to answer one
//! question reliably: can an argument of type A ever be found in a
//! container whose element type is B?
//!
//! - **Assignable**: identity, `null`, top type, primitive widening,
//!   boxing/unboxing, nominal subtyping with invariant or
//!   wildcard-contained type arguments, unchecked raw conversion, array
//!   covariance.
//! - **Convertible**: everything assignable in either direction, plus
//!   casts the language accepts (down-casts, interface/non-final class
//!   casts, numeric primitive casts) and declared user conversions.
//!
//! Errors and exhausted depth budgets answer "related" so that missing
//! information never produces a diagnostic.

use crate::model::ProjectModel;
use crate::substitution::ParamBinding;
use crate::types::{ClassRef, TypeArgs, TypeData, TypeId, TypeParamKey, WildcardBound};
use suspect_common::limits::MAX_RELATION_DEPTH;

impl ProjectModel {
    /// Erasure: drop type arguments, replace parameters with their bound.
    pub fn erase_type(&self, ty: TypeId) -> TypeId {
        let mut current = ty;
        for _ in 0..MAX_RELATION_DEPTH {
            let data = self.types.lookup(current);
            match &*data {
                TypeData::Reference(class) => {
                    if class.args.is_empty() {
                        return current;
                    }
                    return self.types.intern(TypeData::Reference(ClassRef {
                        def: class.def,
                        args: TypeArgs::new(),
                    }));
                }
                TypeData::TypeParameter(key) => current = self.param_bound(*key),
                TypeData::Wildcard(_) | TypeData::Captured(_) => {
                    let bound = self.upper_bound_of(current);
                    if bound == current {
                        return TypeId::OBJECT;
                    }
                    current = bound;
                }
                TypeData::Array(element) => {
                    let element = self.erase_type(*element);
                    return self.types.intern(TypeData::Array(element));
                }
                _ => return current,
            }
        }
        TypeId::OBJECT
    }
}

/// Stateful relation checker carrying the recursion budget.
pub(crate) struct RelationChecker<'a> {
    model: &'a ProjectModel,
    depth: u32,
}

impl<'a> RelationChecker<'a> {
    pub(crate) fn new(model: &'a ProjectModel) -> Self {
        Self { model, depth: 0 }
    }

    fn data(&self, ty: TypeId) -> std::sync::Arc<TypeData> {
        self.model.types.lookup(ty)
    }

    // =========================================================================
    // Assignability
    // =========================================================================

    pub(crate) fn is_assignable(&mut self, target: TypeId, candidate: TypeId) -> bool {
        if target == candidate {
            return true;
        }
        if self.depth >= MAX_RELATION_DEPTH {
            return true;
        }
        self.depth += 1;
        let result = self.is_assignable_inner(target, candidate);
        self.depth -= 1;
        result
    }

    fn is_assignable_inner(&mut self, target: TypeId, candidate: TypeId) -> bool {
        let t = self.data(target);
        let c = self.data(candidate);
        match (&*t, &*c) {
            (TypeData::Error, _) | (_, TypeData::Error) => true,
            (TypeData::Void, _) | (_, TypeData::Void) => false,
            (TypeData::Captured(wildcard), _) => self.is_assignable(*wildcard, candidate),
            (TypeData::Wildcard(bound), _) => match bound {
                WildcardBound::Extends(upper) => self.is_assignable(*upper, candidate),
                WildcardBound::Unbounded | WildcardBound::Super(_) => {
                    self.is_assignable(TypeId::OBJECT, candidate)
                }
            },
            (_, TypeData::Captured(_) | TypeData::Wildcard(_)) => {
                let upper = self.model.upper_bound_of(candidate);
                upper != candidate && self.is_assignable(target, upper)
            }
            (_, TypeData::Null) => t.is_reference_like(),
            (TypeData::Top, _) => true,
            (TypeData::Primitive(tk), TypeData::Primitive(ck)) => tk.widens_from(*ck),
            (TypeData::Primitive(tk), TypeData::Reference(class)) => self
                .model
                .unboxed_kind(class.def)
                .is_some_and(|kind| class.args.is_empty() && tk.widens_from(kind)),
            (_, TypeData::Primitive(ck)) => self
                .model
                .boxed_type_of(*ck)
                .is_some_and(|boxed| self.is_assignable(target, boxed)),
            (_, TypeData::TypeParameter(key)) => {
                let bound = self.model.param_bound(*key);
                self.is_assignable(target, bound)
            }
            (TypeData::TypeParameter(_), _) => false,
            (TypeData::Array(te), TypeData::Array(ce)) => {
                let element_is_reference = self.data(*te).is_reference_like()
                    && self.data(*ce).is_reference_like();
                if element_is_reference {
                    self.is_assignable(*te, *ce)
                } else {
                    te == ce
                }
            }
            (TypeData::Reference(tr), TypeData::Reference(cr)) => {
                self.is_reference_assignable(tr, cr)
            }
            _ => false,
        }
    }

    fn is_reference_assignable(&mut self, target: &ClassRef, candidate: &ClassRef) -> bool {
        let base = self.model.reference_substitution(candidate);
        let Some(subst) = self
            .model
            .compute_class_substitution(target.def, candidate.def, &base)
        else {
            return false;
        };
        if target.args.is_empty() {
            return true;
        }
        let param_count = self
            .model
            .defs
            .get(target.def)
            .map_or(0, |info| info.type_params.len());
        if target.args.len() != param_count {
            return true;
        }
        for (index, &target_arg) in target.args.iter().enumerate() {
            let key = TypeParamKey::new(target.def, index as u32);
            let arg = match subst.binding(key) {
                // unchecked conversion from a raw type
                ParamBinding::Raw => return true,
                ParamBinding::Bound(arg) => arg,
                ParamBinding::Unbound => self.model.types.intern(TypeData::TypeParameter(key)),
            };
            if !self.contains_type_arg(target_arg, arg) {
                return false;
            }
        }
        true
    }

    /// Type argument containment: does `target_arg` admit `arg`?
    fn contains_type_arg(&mut self, target_arg: TypeId, arg: TypeId) -> bool {
        if target_arg == arg {
            return true;
        }
        let t = self.data(target_arg);
        let a = self.data(arg);
        if matches!(&*t, TypeData::Error) || matches!(&*a, TypeData::Error) {
            return true;
        }
        match &*t {
            TypeData::Wildcard(WildcardBound::Unbounded) => true,
            TypeData::Wildcard(WildcardBound::Extends(upper)) => {
                let arg_upper = self.model.upper_bound_of(arg);
                self.is_assignable(*upper, arg_upper)
            }
            TypeData::Wildcard(WildcardBound::Super(lower)) => match self.lower_bound(arg) {
                Some(arg_lower) => self.is_assignable(arg_lower, *lower),
                None => false,
            },
            _ => false,
        }
    }

    fn lower_bound(&self, arg: TypeId) -> Option<TypeId> {
        match &*self.data(arg) {
            TypeData::Wildcard(WildcardBound::Super(lower)) => Some(*lower),
            TypeData::Wildcard(_) => None,
            TypeData::Captured(wildcard) => self.lower_bound(*wildcard),
            _ => Some(arg),
        }
    }

    // =========================================================================
    // Convertibility
    // =========================================================================

    pub(crate) fn is_convertible(&mut self, target: TypeId, candidate: TypeId) -> bool {
        if self.is_assignable(target, candidate) || self.is_assignable(candidate, target) {
            return true;
        }
        if self.depth >= MAX_RELATION_DEPTH {
            return true;
        }
        self.depth += 1;
        let result = self.is_convertible_inner(target, candidate);
        self.depth -= 1;
        result
    }

    fn is_convertible_inner(&mut self, target: TypeId, candidate: TypeId) -> bool {
        let t = self.data(target);
        let c = self.data(candidate);
        match (&*t, &*c) {
            (TypeData::Error, _) | (_, TypeData::Error) => true,
            (TypeData::Void, _) | (_, TypeData::Void) => false,
            (TypeData::Captured(_) | TypeData::Wildcard(_), _) => {
                let upper = self.model.upper_bound_of(target);
                upper != target && self.is_convertible(upper, candidate)
            }
            (_, TypeData::Captured(_) | TypeData::Wildcard(_)) => {
                let upper = self.model.upper_bound_of(candidate);
                upper != candidate && self.is_convertible(target, upper)
            }
            (TypeData::Primitive(tk), TypeData::Primitive(ck)) => {
                tk.is_numeric() && ck.is_numeric()
            }
            (TypeData::Primitive(tk), TypeData::Reference(class)) => self
                .model
                .unboxed_kind(class.def)
                .is_some_and(|kind| self.is_convertible(tk.type_id(), kind.type_id())),
            (TypeData::Reference(_), TypeData::Primitive(ck)) => self
                .model
                .boxed_type_of(*ck)
                .is_some_and(|boxed| self.is_convertible(target, boxed)),
            (TypeData::TypeParameter(key), _) => {
                let bound = self.model.param_bound(*key);
                self.is_convertible(bound, candidate)
            }
            (_, TypeData::TypeParameter(key)) => {
                let bound = self.model.param_bound(*key);
                self.is_convertible(target, bound)
            }
            (TypeData::Array(te), TypeData::Array(ce)) => {
                let element_is_reference = self.data(*te).is_reference_like()
                    && self.data(*ce).is_reference_like();
                if element_is_reference {
                    self.is_convertible(*te, *ce)
                } else {
                    te == ce
                }
            }
            (TypeData::Reference(tr), TypeData::Reference(cr)) => {
                self.is_reference_convertible(tr, cr)
            }
            _ => false,
        }
    }

    fn is_reference_convertible(&mut self, target: &ClassRef, candidate: &ClassRef) -> bool {
        if self.model.has_conversion(candidate.def, target.def) {
            return true;
        }
        let (Some(ti), Some(ci)) = (self.model.defs.get(target.def), self.model.defs.get(candidate.def))
        else {
            return true;
        };
        match (ti.is_interface(), ci.is_interface()) {
            (true, true) => true,
            // A final class only casts to or from the interfaces it implements.
            (true, false) => !ci.is_final() || self.model.is_subclass(target.def, candidate.def),
            (false, true) => !ti.is_final() || self.model.is_subclass(candidate.def, target.def),
            (false, false) => {
                self.model.is_subclass(target.def, candidate.def)
                    || self.model.is_subclass(candidate.def, target.def)
            }
        }
    }
}

#[cfg(test)]
#[path = "../tests/relations_tests.rs"]
mod tests;
