//! Nominal generic type model for the suspect analyzer.
//!
//! This crate provides:
//! - `types`: interned type representation (`TypeId`, `TypeData`)
//! - `def`: abstractions and methods (`DefinitionStore`)
//! - `substitution`: generic substitution along the supertype graph
//! - `relations`: assignability, convertibility and erasure
//! - `table`: the `SymbolTable` capability consumed by the checker
//! - `model`: `ProjectModel`, the in-memory `SymbolTable`
//! - `type_expr`: parser for textual type expressions
//! - `format`: presentable type text

pub mod def;
mod elements;
pub mod format;
pub mod intern;
pub mod model;
mod relations;
pub mod substitution;
pub mod table;
pub mod type_expr;
pub mod types;

pub use def::{
    AbstractionFlags, AbstractionInfo, AbstractionKind, DefId, DefinitionStore, MethodId,
    MethodInfo, MethodSignature, TypeParamInfo,
};
pub use format::TypeFormatter;
pub use intern::TypeInterner;
pub use model::{DEFAULT_ITERABLE_ROOTS, ModelError, ProjectModel};
pub use substitution::{ParamBinding, TypeSubstitution};
pub use table::{SearchScope, SymbolTable};
pub use type_expr::TypeExprError;
pub use types::{ClassRef, PrimitiveKind, TypeArgs, TypeData, TypeId, TypeParamKey, WildcardBound};

#[cfg(test)]
mod test_fixtures;
