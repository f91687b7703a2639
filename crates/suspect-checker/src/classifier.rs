//! Classification of an argument type against a resolved bound.

use crate::call_site::ArgumentShape;
use crate::formatter::{convertible_message, mismatch_message};
use crate::matcher::PatternMatch;
use crate::patterns::OperationKind;
use suspect_common::diagnostic_codes;
use suspect_model::{MethodInfo, SymbolTable, TypeData, TypeId};
use tracing::trace;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Classification {
    NoProblem,
    /// The argument reaches the bound only through a conversion.
    ConvertibleWarning(String),
    /// The argument can never be found in the container.
    DefiniteMismatch(String),
}

impl Classification {
    pub const fn is_problem(&self) -> bool {
        !matches!(self, Self::NoProblem)
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Self::NoProblem => None,
            Self::ConvertibleWarning(message) | Self::DefiniteMismatch(message) => Some(message),
        }
    }

    pub const fn code(&self) -> Option<u32> {
        match self {
            Self::NoProblem => None,
            Self::ConvertibleWarning(_) => Some(diagnostic_codes::SUSPICIOUS_CALL_TO),
            Self::DefiniteMismatch(_) => Some(diagnostic_codes::MAY_NOT_CONTAIN_OBJECTS_OF_TYPE),
        }
    }
}

/// Everything `classify` looks at besides the symbol table.
#[derive(Clone, Debug)]
pub struct ClassifyInput<'a> {
    pub argument_type: TypeId,
    pub argument_shape: ArgumentShape,
    pub receiver_type: TypeId,
    pub callee: &'a MethodInfo,
    pub matched: &'a PatternMatch<'a>,
    pub report_convertible: bool,
}

pub fn classify(table: &dyn SymbolTable, input: &ClassifyInput<'_>) -> Classification {
    let mut argument = input.argument_type;
    if table.type_data(argument).as_primitive().is_some() {
        match table.boxed_type(argument) {
            Some(boxed) => argument = boxed,
            None => return Classification::NoProblem,
        }
    }
    if matches!(&*table.type_data(argument), TypeData::Error | TypeData::Void) {
        return Classification::NoProblem;
    }

    if input.argument_shape == (ArgumentShape::Conditional { poly: true }) && argument == TypeId::OBJECT {
        trace!("poly conditional widened to Object");
        return Classification::NoProblem;
    }

    if input.matched.operation.kind == OperationKind::BulkRemoval {
        return classify_bulk_removal(table, input.receiver_type, argument);
    }

    let bound = input.matched.bound;
    if table.is_assignable_from(bound, argument) {
        return Classification::NoProblem;
    }
    if table.is_convertible_from(bound, argument) {
        if input.report_convertible {
            return Classification::ConvertibleWarning(convertible_message(
                table,
                input.callee,
                &input.matched.substitution,
            ));
        }
        return Classification::NoProblem;
    }
    Classification::DefiniteMismatch(mismatch_message(table, input.receiver_type, argument))
}

/// `c1.removeAll(c2)`: compare element types, not the collections.
fn classify_bulk_removal(table: &dyn SymbolTable, receiver: TypeId, argument: TypeId) -> Classification {
    let (Some(item), Some(receiver_item)) = (table.element_type_of(argument), table.element_type_of(receiver))
    else {
        trace!("element type unknown; bulk removal not checked");
        return Classification::NoProblem;
    };
    if table.is_assignable_from(receiver_item, item) {
        Classification::NoProblem
    } else {
        Classification::DefiniteMismatch(mismatch_message(table, receiver, item))
    }
}

#[cfg(test)]
#[path = "../tests/classifier_tests.rs"]
mod tests;
