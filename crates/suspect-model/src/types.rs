//! Type representation.
//!
//! Types are interned: a `TypeId` is a handle into the `TypeInterner`, and
//! two structurally identical types always share the same id. Equality of
//! types is therefore `TypeId` equality.

use crate::def::DefId;
use smallvec::SmallVec;

/// Inline capacity for type argument lists. Container types rarely carry
/// more than two arguments (`Map<K, V>`).
pub type TypeArgs = SmallVec<[TypeId; 2]>;

// =============================================================================
// TypeId
// =============================================================================

/// Interned type handle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(pub u32);

impl TypeId {
    /// Unresolvable type. Relations involving it always succeed so that
    /// missing information never produces a diagnostic.
    pub const ERROR: Self = Self(0);
    /// The type of the `null` literal.
    pub const NULL: Self = Self(1);
    /// The universal top type of reference types (`java.lang.Object`).
    pub const OBJECT: Self = Self(2);
    pub const VOID: Self = Self(3);
    pub const BOOLEAN: Self = Self(4);
    pub const BYTE: Self = Self(5);
    pub const SHORT: Self = Self(6);
    pub const CHAR: Self = Self(7);
    pub const INT: Self = Self(8);
    pub const LONG: Self = Self(9);
    pub const FLOAT: Self = Self(10);
    pub const DOUBLE: Self = Self(11);
    /// The unbounded wildcard `?`.
    pub const WILDCARD: Self = Self(12);

    /// First id handed out for non-intrinsic types.
    pub const FIRST_USER: u32 = 13;

    #[inline]
    pub const fn is_intrinsic(self) -> bool {
        self.0 < Self::FIRST_USER
    }
}

// =============================================================================
// Primitive Types
// =============================================================================

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Boolean,
    Byte,
    Short,
    Char,
    Int,
    Long,
    Float,
    Double,
}

impl PrimitiveKind {
    pub const ALL: [Self; 8] = [
        Self::Boolean,
        Self::Byte,
        Self::Short,
        Self::Char,
        Self::Int,
        Self::Long,
        Self::Float,
        Self::Double,
    ];

    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Byte => "byte",
            Self::Short => "short",
            Self::Char => "char",
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.keyword() == keyword)
    }

    /// Qualified name of the reference type a value of this kind boxes to.
    pub const fn boxed_name(self) -> &'static str {
        match self {
            Self::Boolean => "java.lang.Boolean",
            Self::Byte => "java.lang.Byte",
            Self::Short => "java.lang.Short",
            Self::Char => "java.lang.Character",
            Self::Int => "java.lang.Integer",
            Self::Long => "java.lang.Long",
            Self::Float => "java.lang.Float",
            Self::Double => "java.lang.Double",
        }
    }

    pub fn from_boxed_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.boxed_name() == name)
    }

    pub const fn type_id(self) -> TypeId {
        match self {
            Self::Boolean => TypeId::BOOLEAN,
            Self::Byte => TypeId::BYTE,
            Self::Short => TypeId::SHORT,
            Self::Char => TypeId::CHAR,
            Self::Int => TypeId::INT,
            Self::Long => TypeId::LONG,
            Self::Float => TypeId::FLOAT,
            Self::Double => TypeId::DOUBLE,
        }
    }

    pub const fn is_numeric(self) -> bool {
        !matches!(self, Self::Boolean)
    }

    /// Widening primitive conversion: can a value of `source` be stored in
    /// `self` without a cast?
    pub const fn widens_from(self, source: Self) -> bool {
        use PrimitiveKind::*;
        match (source, self) {
            (a, b) if a as u8 == b as u8 => true,
            (Byte, Short | Int | Long | Float | Double) => true,
            (Short, Int | Long | Float | Double) => true,
            (Char, Int | Long | Float | Double) => true,
            (Int, Long | Float | Double) => true,
            (Long, Float | Double) => true,
            (Float, Double) => true,
            _ => false,
        }
    }
}

// =============================================================================
// Structural Type Data
// =============================================================================

/// Identity of a generic type parameter: the abstraction declaring it and
/// its position in that abstraction's parameter list.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeParamKey {
    pub owner: DefId,
    pub index: u32,
}

impl TypeParamKey {
    pub const fn new(owner: DefId, index: u32) -> Self {
        Self { owner, index }
    }
}

/// Bound of a wildcard type argument.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum WildcardBound {
    /// `?`
    Unbounded,
    /// `? extends T`
    Extends(TypeId),
    /// `? super T`
    Super(TypeId),
}

/// Reference to a class or interface, possibly parameterized.
///
/// An empty `args` list on a generic abstraction denotes a raw type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ClassRef {
    pub def: DefId,
    pub args: TypeArgs,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeData {
    Error,
    Null,
    /// `java.lang.Object`
    Top,
    Void,
    Primitive(PrimitiveKind),
    Reference(ClassRef),
    TypeParameter(TypeParamKey),
    Wildcard(WildcardBound),
    /// A capture of a wildcard type argument (capture conversion of a
    /// receiver such as `List<? extends Number>`). Holds the wildcard.
    Captured(TypeId),
    Array(TypeId),
}

impl TypeData {
    /// Reference-typed values: everything a generic parameter can stand for.
    pub const fn is_reference_like(&self) -> bool {
        matches!(
            self,
            Self::Null
                | Self::Top
                | Self::Reference(_)
                | Self::TypeParameter(_)
                | Self::Wildcard(_)
                | Self::Captured(_)
                | Self::Array(_)
        )
    }

    pub const fn as_primitive(&self) -> Option<PrimitiveKind> {
        match self {
            Self::Primitive(kind) => Some(*kind),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "../tests/types_tests.rs"]
mod tests;
