//! Centralized limits and thresholds for the analyzer.
//!
//! The symbol tables fed to the analyzer come from arbitrary projects, so
//! every walk over the supertype graph or over nested type arguments is
//! bounded. When a limit is hit the walk gives up and the caller treats the
//! result as "unknown", which suppresses the diagnostic.

// =============================================================================
// Recursion Depth Limits
// =============================================================================

/// Maximum number of supertype edges followed when computing a class
/// substitution from a descendant up to an ancestor abstraction.
///
/// Real hierarchies (Eclipse Collections included) stay well below 32
/// levels; a malformed snapshot with a supertype cycle stops here.
pub const MAX_SUPERTYPE_DEPTH: u32 = 64;

/// Maximum nesting depth for assignability / convertibility queries.
///
/// Type arguments are compared recursively (`Map<K, List<Set<V>>>`), and
/// F-bounded type parameters (`T extends Comparable<T>`) can recurse
/// through their bounds.
pub const MAX_RELATION_DEPTH: u32 = 48;

/// Maximum nesting depth accepted by the textual type-expression parser.
pub const MAX_TYPE_EXPR_DEPTH: u32 = 32;
