//! Matching call sites against the pattern registry.

use crate::call_site::CallSite;
use crate::patterns::{PatternOperation, PatternRegistry};
use crate::resolver::resolve_bound_type;
use suspect_model::{MethodId, SymbolTable, TypeId, TypeSubstitution};
use tracing::debug;

/// A call site recognized as an instance of a pattern operation.
#[derive(Clone, Debug)]
pub struct PatternMatch<'r> {
    pub operation: &'r PatternOperation,
    /// The checked type parameter as bound at this call site.
    pub bound: TypeId,
    /// Substitution of the callee owner's type parameters.
    pub substitution: TypeSubstitution,
}

/// Find the pattern operation `call` invokes, if any.
///
/// Unqualified, `this.` and `super.` calls never match. The first
/// structurally matching operation wins; a match inside an implementation
/// of that same operation is suppressed.
pub fn match_call<'r>(
    table: &dyn SymbolTable,
    call: &CallSite,
    registry: &'r PatternRegistry,
) -> Option<PatternMatch<'r>> {
    let receiver = call.receiver_type()?;
    if receiver == TypeId::ERROR {
        return None;
    }
    let callee = table.method(call.callee)?;
    let (receiver_def, receiver_substitution) = table.receiver_substitution(receiver)?;
    let substitution = table.class_substitution(callee.owner, receiver_def, &receiver_substitution)?;

    for operation in registry.candidates(&callee.name) {
        let Some(bound) = resolve_bound_type(table, operation, &callee, &substitution) else {
            continue;
        };
        if let Some(enclosing) = call.enclosing_method {
            if is_inheritor_or_self(table, enclosing, operation) {
                debug!(operation = %operation.name, "call inside the operation's own implementation");
                return None;
            }
        }
        return Some(PatternMatch {
            operation,
            bound,
            substitution,
        });
    }
    None
}

/// Does `candidate` override (or equal) the operation's declaring method?
pub fn is_inheritor_or_self(table: &dyn SymbolTable, candidate: MethodId, operation: &PatternOperation) -> bool {
    if candidate == operation.method {
        return true;
    }
    let Some(method) = table.method(candidate) else {
        return false;
    };
    let Some(substitution) =
        table.class_substitution(operation.declaring, method.owner, &TypeSubstitution::new())
    else {
        return false;
    };
    let signature = table.signature_of(&method, &substitution);
    table.find_method_by_signature(operation.declaring, &signature) == Some(operation.method)
}

#[cfg(test)]
#[path = "../tests/matcher_tests.rs"]
mod tests;
