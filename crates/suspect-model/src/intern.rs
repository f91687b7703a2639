//! Type interning for structural deduplication.
//!
//! Converts `TypeData` structures into lightweight `TypeId` handles:
//! - O(1) type equality (compare `TypeId` values)
//! - each unique structure stored once
//!
//! Thread-safe via `RwLock`; the analysis phase only reads, so contention
//! is limited to snapshot construction and the occasional new instantiation.

use crate::types::{PrimitiveKind, TypeData, TypeId, WildcardBound};
use rustc_hash::FxHashMap;
use std::sync::{Arc, RwLock};

struct ValueInterner {
    items: Vec<Arc<TypeData>>,
    map: FxHashMap<Arc<TypeData>, u32>,
}

impl ValueInterner {
    fn new() -> Self {
        ValueInterner {
            items: Vec::new(),
            map: FxHashMap::default(),
        }
    }

    fn intern(&mut self, value: TypeData) -> u32 {
        if let Some(&id) = self.map.get(&value) {
            return id;
        }

        let arc = Arc::new(value);
        let id = self.items.len() as u32;
        self.items.push(arc.clone());
        self.map.insert(arc, id);
        id
    }

    fn get(&self, id: u32) -> Option<Arc<TypeData>> {
        self.items.get(id as usize).cloned()
    }
}

/// Type interning table.
pub struct TypeInterner {
    types: RwLock<ValueInterner>,
}

impl Default for TypeInterner {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeInterner {
    /// Create a new type interner with pre-registered intrinsics.
    pub fn new() -> Self {
        let mut types = ValueInterner::new();
        // Order must match the TypeId constants.
        types.intern(TypeData::Error);
        types.intern(TypeData::Null);
        types.intern(TypeData::Top);
        types.intern(TypeData::Void);
        for kind in PrimitiveKind::ALL {
            types.intern(TypeData::Primitive(kind));
        }
        types.intern(TypeData::Wildcard(WildcardBound::Unbounded));
        debug_assert_eq!(types.items.len() as u32, TypeId::FIRST_USER);

        TypeInterner {
            types: RwLock::new(types),
        }
    }

    /// Intern a type structure, returning the canonical handle.
    pub fn intern(&self, data: TypeData) -> TypeId {
        {
            let types = self.types.read().expect("type interner lock poisoned");
            if let Some(&id) = types.map.get(&data) {
                return TypeId(id);
            }
        }
        let mut types = self.types.write().expect("type interner lock poisoned");
        TypeId(types.intern(data))
    }

    /// Look up the structure behind a handle. Unknown ids read as `Error`.
    pub fn lookup(&self, id: TypeId) -> Arc<TypeData> {
        self.types
            .read()
            .expect("type interner lock poisoned")
            .get(id.0)
            .unwrap_or_else(|| Arc::new(TypeData::Error))
    }

    pub fn len(&self) -> usize {
        self.types
            .read()
            .expect("type interner lock poisoned")
            .items
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
#[path = "../tests/intern_tests.rs"]
mod tests;
