//! Generic substitution along the supertype graph.
//!
//! A `TypeSubstitution` maps type parameters to types. A parameter can be
//! in one of three states:
//!
//! | State   | Meaning                                   | `substitute` |
//! |---------|-------------------------------------------|--------------|
//! | Bound   | `List<String>`: `E` is `String`           | the type     |
//! | Raw     | raw `List`: `E` is erased                 | erasure      |
//! | Unbound | not mentioned: identity                   | `E` itself   |
//!
//! Rawness propagates upwards: the supertypes of a raw type are raw.

use crate::def::DefId;
use crate::model::ProjectModel;
use crate::types::{ClassRef, TypeArgs, TypeData, TypeId, TypeParamKey, WildcardBound};
use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use suspect_common::limits::{MAX_RELATION_DEPTH, MAX_SUPERTYPE_DEPTH};
use tracing::trace;

/// What a substitution says about one type parameter.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ParamBinding {
    Bound(TypeId),
    Raw,
    Unbound,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TypeSubstitution {
    map: IndexMap<TypeParamKey, Option<TypeId>>,
}

impl TypeSubstitution {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&mut self, key: TypeParamKey, ty: TypeId) {
        self.map.insert(key, Some(ty));
    }

    pub fn bind_raw(&mut self, key: TypeParamKey) {
        self.map.insert(key, None);
    }

    /// Mark every parameter of `owner` raw.
    pub fn bind_all_raw(&mut self, owner: DefId, param_count: usize) {
        for index in 0..param_count {
            self.bind_raw(TypeParamKey::new(owner, index as u32));
        }
    }

    pub fn binding(&self, key: TypeParamKey) -> ParamBinding {
        match self.map.get(&key) {
            Some(Some(ty)) => ParamBinding::Bound(*ty),
            Some(None) => ParamBinding::Raw,
            None => ParamBinding::Unbound,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (TypeParamKey, ParamBinding)> + '_ {
        self.map.iter().map(|(&key, &value)| {
            let binding = match value {
                Some(ty) => ParamBinding::Bound(ty),
                None => ParamBinding::Raw,
            };
            (key, binding)
        })
    }
}

/// How `substitute` treats a raw parameter.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum RawMode {
    Erase,
    Fail,
}

impl ProjectModel {
    /// Apply `subst` to `ty`. Raw parameters erase to their bound.
    pub fn instantiate_type(&self, ty: TypeId, subst: &TypeSubstitution) -> TypeId {
        self.substitute(ty, subst, RawMode::Erase, 0)
            .unwrap_or(TypeId::ERROR)
    }

    /// Apply `subst` to `ty`, failing when a raw parameter is reached.
    pub fn try_instantiate(&self, ty: TypeId, subst: &TypeSubstitution) -> Option<TypeId> {
        self.substitute(ty, subst, RawMode::Fail, 0)
    }

    fn substitute(
        &self,
        ty: TypeId,
        subst: &TypeSubstitution,
        raw: RawMode,
        depth: u32,
    ) -> Option<TypeId> {
        if depth > MAX_RELATION_DEPTH {
            return Some(TypeId::ERROR);
        }
        let data = self.types.lookup(ty);
        let result = match &*data {
            TypeData::TypeParameter(key) => match subst.binding(*key) {
                ParamBinding::Bound(bound) => bound,
                ParamBinding::Unbound => ty,
                ParamBinding::Raw => match raw {
                    RawMode::Erase => self.erase_type(ty),
                    RawMode::Fail => return None,
                },
            },
            TypeData::Reference(class) if !class.args.is_empty() => {
                let mut args = TypeArgs::new();
                for &arg in &class.args {
                    args.push(self.substitute(arg, subst, raw, depth + 1)?);
                }
                self.types.intern(TypeData::Reference(ClassRef {
                    def: class.def,
                    args,
                }))
            }
            TypeData::Wildcard(WildcardBound::Extends(bound)) => {
                let bound = self.substitute(*bound, subst, raw, depth + 1)?;
                self.types
                    .intern(TypeData::Wildcard(WildcardBound::Extends(bound)))
            }
            TypeData::Wildcard(WildcardBound::Super(bound)) => {
                let bound = self.substitute(*bound, subst, raw, depth + 1)?;
                self.types
                    .intern(TypeData::Wildcard(WildcardBound::Super(bound)))
            }
            TypeData::Captured(wildcard) => {
                let wildcard = self.substitute(*wildcard, subst, raw, depth + 1)?;
                self.types.intern(TypeData::Captured(wildcard))
            }
            TypeData::Array(element) => {
                let element = self.substitute(*element, subst, raw, depth + 1)?;
                self.types.intern(TypeData::Array(element))
            }
            _ => ty,
        };
        Some(result)
    }

    /// Substitution binding `class.def`'s parameters to `class.args`,
    /// without capture. Raw or arity-mismatched references bind raw.
    pub(crate) fn reference_substitution(&self, class: &ClassRef) -> TypeSubstitution {
        let mut subst = TypeSubstitution::new();
        let param_count = self
            .defs
            .get(class.def)
            .map_or(0, |info| info.type_params.len());
        if class.args.len() != param_count {
            subst.bind_all_raw(class.def, param_count);
            return subst;
        }
        for (index, &arg) in class.args.iter().enumerate() {
            subst.bind(TypeParamKey::new(class.def, index as u32), arg);
        }
        subst
    }

    /// Declaring abstraction and substitution of a receiver type. Wildcard
    /// arguments are captured; type parameters and wildcards resolve
    /// through their upper bounds.
    pub fn compute_receiver_substitution(
        &self,
        receiver: TypeId,
    ) -> Option<(DefId, TypeSubstitution)> {
        let mut current = receiver;
        for _ in 0..MAX_SUPERTYPE_DEPTH {
            let data = self.types.lookup(current);
            match &*data {
                TypeData::Reference(class) => {
                    let mut subst = self.reference_substitution(class);
                    for (index, &arg) in class.args.iter().enumerate() {
                        if matches!(&*self.types.lookup(arg), TypeData::Wildcard(_)) {
                            let captured = self.types.intern(TypeData::Captured(arg));
                            subst.bind(TypeParamKey::new(class.def, index as u32), captured);
                        }
                    }
                    return Some((class.def, subst));
                }
                TypeData::TypeParameter(key) => current = self.param_bound(*key),
                TypeData::Wildcard(_) | TypeData::Captured(_) => {
                    let bound = self.upper_bound_of(current);
                    if bound == current {
                        return None;
                    }
                    current = bound;
                }
                _ => return None,
            }
        }
        None
    }

    /// Walk from `descendant` up the supertype graph to `ancestor`,
    /// composing substitutions on the way.
    pub fn compute_class_substitution(
        &self,
        ancestor: DefId,
        descendant: DefId,
        base: &TypeSubstitution,
    ) -> Option<TypeSubstitution> {
        let mut visited = FxHashSet::default();
        self.walk_supertypes(ancestor, descendant, base.clone(), 0, &mut visited)
    }

    fn walk_supertypes(
        &self,
        ancestor: DefId,
        current: DefId,
        subst: TypeSubstitution,
        depth: u32,
        visited: &mut FxHashSet<DefId>,
    ) -> Option<TypeSubstitution> {
        if current == ancestor {
            return Some(subst);
        }
        if depth >= MAX_SUPERTYPE_DEPTH || !visited.insert(current) {
            return None;
        }
        let info = self.defs.get(current)?;
        for &supertype in &info.supertypes {
            let data = self.types.lookup(supertype);
            let TypeData::Reference(parent) = &*data else {
                continue;
            };
            let parent_subst = self.supertype_substitution(current, parent, &subst);
            trace!(
                from = current.0,
                to = parent.def.0,
                bindings = parent_subst.len(),
                "walk_supertypes"
            );
            if let Some(found) =
                self.walk_supertypes(ancestor, parent.def, parent_subst, depth + 1, visited)
            {
                return Some(found);
            }
        }
        None
    }

    /// Substitution for a declared supertype `parent` of `child_def`, whose
    /// arguments are written over the child's parameters. Every supertype of
    /// a raw type is raw, whatever its declared arguments.
    fn supertype_substitution(
        &self,
        child_def: DefId,
        parent: &ClassRef,
        child: &TypeSubstitution,
    ) -> TypeSubstitution {
        let param_count = self
            .defs
            .get(parent.def)
            .map_or(0, |info| info.type_params.len());
        let mut subst = TypeSubstitution::new();
        if parent.args.len() != param_count || self.is_raw_in(child_def, child) {
            subst.bind_all_raw(parent.def, param_count);
            return subst;
        }
        let args: Option<Vec<TypeId>> = parent
            .args
            .iter()
            .map(|&arg| self.try_instantiate(arg, child))
            .collect();
        match args {
            Some(args) => {
                for (index, arg) in args.into_iter().enumerate() {
                    subst.bind(TypeParamKey::new(parent.def, index as u32), arg);
                }
            }
            None => subst.bind_all_raw(parent.def, param_count),
        }
        subst
    }

    /// Whether `subst` binds any of `def`'s own parameters raw.
    fn is_raw_in(&self, def: DefId, subst: &TypeSubstitution) -> bool {
        let param_count = self
            .defs
            .get(def)
            .map_or(0, |info| info.type_params.len());
        (0..param_count)
            .any(|index| subst.binding(TypeParamKey::new(def, index as u32)) == ParamBinding::Raw)
    }
}

#[cfg(test)]
#[path = "../tests/substitution_tests.rs"]
mod tests;
