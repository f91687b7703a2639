//! Bound type of a pattern operation's checked parameter at a call site.

use crate::patterns::PatternOperation;
use suspect_model::{
    MethodInfo, MethodSignature, ParamBinding, SymbolTable, TypeData, TypeParamKey,
    TypeSubstitution, TypeId,
};
use tracing::trace;

/// Express `operation`'s checked type parameter in terms of the callee.
///
/// `callee_substitution` binds the type parameters of the callee's owner as
/// seen from the receiver. The result is `None` when the callee is not an
/// override of the operation (a name collision), when the checked index is
/// out of range, or when the parameter is raw or unbound. Captures and
/// wildcards resolve to their upper bound.
pub fn resolve_bound_type(
    table: &dyn SymbolTable,
    operation: &PatternOperation,
    callee: &MethodInfo,
    callee_substitution: &TypeSubstitution,
) -> Option<TypeId> {
    let substitution = table.class_substitution(operation.declaring, callee.owner, callee_substitution)?;

    let expected = MethodSignature::new(
        operation.name.clone(),
        operation
            .signature
            .params
            .iter()
            .map(|&param| table.instantiate(param, &substitution)),
    );
    let actual = MethodSignature::new(callee.name.clone(), callee.params.iter().copied());
    if !table.signatures_match(&expected, &actual) {
        trace!(operation = %operation.name, "callee signature differs from pattern");
        return None;
    }

    let type_params = table
        .abstraction(operation.declaring)
        .map_or(0, |info| info.type_params.len());
    if operation.checked_param >= type_params {
        return None;
    }

    let key = TypeParamKey::new(operation.declaring, operation.checked_param as u32);
    match substitution.binding(key) {
        ParamBinding::Bound(bound) => Some(unwrap_capture(table, bound)),
        ParamBinding::Raw | ParamBinding::Unbound => {
            trace!(operation = %operation.name, "checked parameter is raw");
            None
        }
    }
}

fn unwrap_capture(table: &dyn SymbolTable, ty: TypeId) -> TypeId {
    match &*table.type_data(ty) {
        TypeData::Captured(_) | TypeData::Wildcard(_) => table.upper_bound(ty),
        _ => ty,
    }
}

#[cfg(test)]
#[path = "../tests/resolver_tests.rs"]
mod tests;
