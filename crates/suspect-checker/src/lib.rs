//! Suspicious container-lookup call analysis.
//!
//! Flags single-argument lookups such as `list.contains(x)` or
//! `map.get(k)` whose argument type can never match the container's
//! element, key or value type.
//!
//! - `patterns`: catalog of pattern operations and the registry built from it
//! - `resolver`: bound type of the checked type parameter at a call site
//! - `matcher`: recognizing calls to pattern operations
//! - `classifier`: no problem, convertible, or definite mismatch
//! - `formatter`: message text
//! - `session`: lazily built registry and per-call orchestration

pub mod call_site;
pub mod classifier;
pub mod formatter;
pub mod matcher;
pub mod patterns;
pub mod resolver;
pub mod session;

pub use call_site::{Argument, ArgumentShape, CallSite, ExprId, Receiver};
pub use classifier::{Classification, ClassifyInput, classify};
pub use matcher::{PatternMatch, is_inheritor_or_self, match_call};
pub use patterns::{
    OperationKind, ParamShape, PatternCatalog, PatternOperation, PatternRegistry, PatternShape,
};
pub use resolver::resolve_bound_type;
pub use session::{AnalysisSession, AnalyzerOptions, SuspicionKind, SuspiciousCall};

#[cfg(test)]
#[path = "../tests/fixtures/mod.rs"]
mod fixtures;
