//! Element type of collection-like types.

use crate::model::ProjectModel;
use crate::substitution::ParamBinding;
use crate::types::{TypeData, TypeId, TypeParamKey, WildcardBound};
use suspect_common::limits::MAX_SUPERTYPE_DEPTH;
use tracing::trace;

impl ProjectModel {
    /// Element type of an array or of a type inheriting one of the iterable
    /// roots. Raw usage and unbounded or `super` wildcards are unknown.
    pub fn element_type(&self, ty: TypeId) -> Option<TypeId> {
        let mut current = ty;
        for _ in 0..MAX_SUPERTYPE_DEPTH {
            let data = self.types.lookup(current);
            match &*data {
                TypeData::Array(element) => return Some(*element),
                TypeData::Reference(class) => {
                    let base = self.reference_substitution(class);
                    for root in self.iterable_roots() {
                        let Some(root_def) = self.defs.lookup_name(&root) else {
                            continue;
                        };
                        let Some(subst) = self.compute_class_substitution(root_def, class.def, &base)
                        else {
                            continue;
                        };
                        let element = match subst.binding(TypeParamKey::new(root_def, 0)) {
                            ParamBinding::Bound(element) => self.known_element(element),
                            ParamBinding::Raw | ParamBinding::Unbound => None,
                        };
                        trace!(root = %root, known = element.is_some(), "element_type");
                        return element;
                    }
                    return None;
                }
                TypeData::TypeParameter(key) => current = self.param_bound(*key),
                TypeData::Wildcard(_) | TypeData::Captured(_) => {
                    let bound = self.upper_bound_of(current);
                    if bound == current || bound == TypeId::OBJECT {
                        return None;
                    }
                    current = bound;
                }
                _ => return None,
            }
        }
        None
    }

    fn known_element(&self, element: TypeId) -> Option<TypeId> {
        match &*self.types.lookup(element) {
            TypeData::Wildcard(WildcardBound::Extends(bound)) => Some(*bound),
            TypeData::Wildcard(_) | TypeData::Error => None,
            TypeData::Captured(wildcard) => self.known_element(*wildcard),
            _ => Some(element),
        }
    }
}
