//! Diagnostic message text.

use suspect_common::{diagnostic_messages, format_message};
use suspect_model::{MethodInfo, SymbolTable, TypeId, TypeSubstitution};

/// `'MutableList<String>' may not contain objects of type 'Integer'`
pub fn mismatch_message(table: &dyn SymbolTable, receiver: TypeId, argument: TypeId) -> String {
    let receiver = table.format_type(receiver);
    let argument = table.format_type(argument);
    format_message(
        diagnostic_messages::MAY_NOT_CONTAIN_OBJECTS_OF_TYPE,
        &[&receiver, &argument],
    )
}

/// `Suspicious call to 'MapIterable.containsKey(Object)'`
pub fn convertible_message(table: &dyn SymbolTable, callee: &MethodInfo, substitution: &TypeSubstitution) -> String {
    let method = describe_method(table, callee, substitution);
    format_message(diagnostic_messages::SUSPICIOUS_CALL_TO, &[&method])
}

/// `Owner.name(Param, ...)` with the owner's simple name.
pub fn describe_method(table: &dyn SymbolTable, method: &MethodInfo, substitution: &TypeSubstitution) -> String {
    let owner = table
        .abstraction(method.owner)
        .map(|info| info.simple_name().to_string())
        .unwrap_or_default();
    let params: Vec<String> = method
        .params
        .iter()
        .map(|&param| table.format_type(table.instantiate(param, substitution)))
        .collect();
    if owner.is_empty() {
        format!("{}({})", method.name, params.join(", "))
    } else {
        format!("{owner}.{}({})", method.name, params.join(", "))
    }
}
