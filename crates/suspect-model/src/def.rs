//! Abstraction and method definitions.
//!
//! An *abstraction* is a class or interface of the analyzed project or of
//! one of its libraries. Abstractions are identified by `DefId`, methods by
//! `MethodId`; both are allocated by the `DefinitionStore`.

use crate::types::{TypeArgs, TypeId};
use bitflags::bitflags;
use dashmap::DashMap;
use smallvec::SmallVec;
use std::sync::atomic::{AtomicU32, Ordering};
use tracing::trace;

// =============================================================================
// Identifiers
// =============================================================================

/// Identifier of a class or interface.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DefId(pub u32);

impl DefId {
    /// Sentinel value for invalid `DefId`.
    pub const INVALID: Self = Self(0);

    /// First valid `DefId`.
    pub const FIRST_VALID: u32 = 1;

    pub const fn is_valid(self) -> bool {
        self.0 >= Self::FIRST_VALID
    }
}

/// Identifier of a method declared in an abstraction.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MethodId(pub u32);

// =============================================================================
// Abstractions
// =============================================================================

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AbstractionKind {
    Class,
    Interface,
}

bitflags! {
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct AbstractionFlags: u8 {
        /// Cannot be subclassed (`final class String`).
        const FINAL = 1 << 0;
        const ABSTRACT = 1 << 1;
        /// Comes from a dependency rather than the analyzed sources.
        const LIBRARY = 1 << 2;
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeParamInfo {
    pub name: String,
    /// Upper bound; `TypeId::OBJECT` when undeclared.
    pub bound: TypeId,
}

#[derive(Clone, Debug)]
pub struct AbstractionInfo {
    pub kind: AbstractionKind,
    pub qualified_name: String,
    pub flags: AbstractionFlags,
    pub type_params: Vec<TypeParamInfo>,
    /// Direct supertypes, expressed over this abstraction's own type
    /// parameters (`ArrayList<E>` lists `List<E>`).
    pub supertypes: Vec<TypeId>,
    pub methods: Vec<MethodId>,
}

impl AbstractionInfo {
    pub fn new(kind: AbstractionKind, qualified_name: impl Into<String>) -> Self {
        Self {
            kind,
            qualified_name: qualified_name.into(),
            flags: AbstractionFlags::empty(),
            type_params: Vec::new(),
            supertypes: Vec::new(),
            methods: Vec::new(),
        }
    }

    /// Last segment of the qualified name.
    pub fn simple_name(&self) -> &str {
        simple_name(&self.qualified_name)
    }

    pub const fn is_interface(&self) -> bool {
        matches!(self.kind, AbstractionKind::Interface)
    }

    pub const fn is_final(&self) -> bool {
        self.flags.contains(AbstractionFlags::FINAL)
    }

    pub const fn is_library(&self) -> bool {
        self.flags.contains(AbstractionFlags::LIBRARY)
    }

    pub fn is_generic(&self) -> bool {
        !self.type_params.is_empty()
    }
}

pub fn simple_name(qualified_name: &str) -> &str {
    qualified_name
        .rsplit('.')
        .next()
        .unwrap_or(qualified_name)
}

// =============================================================================
// Methods
// =============================================================================

#[derive(Clone, Debug)]
pub struct MethodInfo {
    pub owner: DefId,
    pub name: String,
    pub params: TypeArgs,
    pub return_type: TypeId,
}

/// Name plus parameter types of a method, the unit of override matching.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MethodSignature {
    pub name: String,
    pub params: SmallVec<[TypeId; 2]>,
}

impl MethodSignature {
    pub fn new(name: impl Into<String>, params: impl IntoIterator<Item = TypeId>) -> Self {
        Self {
            name: name.into(),
            params: params.into_iter().collect(),
        }
    }
}

// =============================================================================
// DefinitionStore
// =============================================================================

/// Thread-safe storage for abstractions and methods.
///
/// Uses `DashMap` so that snapshot construction and concurrent analysis can
/// share one store.
pub struct DefinitionStore {
    abstractions: DashMap<DefId, AbstractionInfo>,
    methods: DashMap<MethodId, MethodInfo>,
    by_name: DashMap<String, DefId>,
    next_def: AtomicU32,
    next_method: AtomicU32,
}

impl Default for DefinitionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DefinitionStore {
    pub fn new() -> Self {
        Self {
            abstractions: DashMap::new(),
            methods: DashMap::new(),
            by_name: DashMap::new(),
            next_def: AtomicU32::new(DefId::FIRST_VALID),
            next_method: AtomicU32::new(0),
        }
    }

    /// Register a new abstraction and return its `DefId`.
    ///
    /// A second registration under the same qualified name shadows the first
    /// for name lookups.
    pub fn register(&self, info: AbstractionInfo) -> DefId {
        let id = DefId(self.next_def.fetch_add(1, Ordering::SeqCst));
        trace!(def_id = id.0, name = %info.qualified_name, "DefinitionStore::register");
        self.by_name.insert(info.qualified_name.clone(), id);
        self.abstractions.insert(id, info);
        id
    }

    /// Register a method and attach it to its owner.
    pub fn register_method(&self, info: MethodInfo) -> MethodId {
        let id = MethodId(self.next_method.fetch_add(1, Ordering::SeqCst));
        if let Some(mut owner) = self.abstractions.get_mut(&info.owner) {
            owner.methods.push(id);
        }
        self.methods.insert(id, info);
        id
    }

    pub fn get(&self, id: DefId) -> Option<AbstractionInfo> {
        self.abstractions.get(&id).map(|r| r.clone())
    }

    pub fn get_method(&self, id: MethodId) -> Option<MethodInfo> {
        self.methods.get(&id).map(|r| r.clone())
    }

    pub fn contains(&self, id: DefId) -> bool {
        self.abstractions.contains_key(&id)
    }

    pub fn lookup_name(&self, qualified_name: &str) -> Option<DefId> {
        self.by_name.get(qualified_name).map(|r| *r)
    }

    /// All abstractions whose simple name equals `simple`.
    pub fn lookup_simple_name(&self, simple: &str) -> Vec<DefId> {
        let mut found: Vec<DefId> = self
            .by_name
            .iter()
            .filter(|entry| simple_name(entry.key()) == simple)
            .map(|entry| *entry.value())
            .collect();
        found.sort_unstable();
        found
    }

    /// Apply `f` to a stored abstraction. Returns `None` for unknown ids.
    pub fn update<R>(&self, id: DefId, f: impl FnOnce(&mut AbstractionInfo) -> R) -> Option<R> {
        self.abstractions.get_mut(&id).map(|mut info| f(&mut info))
    }

    pub fn len(&self) -> usize {
        self.abstractions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.abstractions.is_empty()
    }
}

#[cfg(test)]
#[path = "../tests/def_tests.rs"]
mod tests;
