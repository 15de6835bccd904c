//! Element type registry.
//!
//! ## Purpose
//!
//! This module maps type identifiers (e.g. `"i32"`, `"cstr"`) to element kinds
//! and byte strides. Each engine consults its own immutable table; the two
//! vocabularies overlap but are not identical.
//!
//! ## Design notes
//!
//! * **Static**: Tables are `const` slices populated at compile time.
//! * **Linear lookup**: Tables hold at most 21 entries, so a scan is enough.
//! * **Sentinel**: `"null"` (and a missing identifier) maps to stride 0 and is
//!   always reported unsupported.
//!
//! ## Invariants
//!
//! * Identifiers are unique within a table.
//! * Lookup is exact and case-sensitive.
//! * The stride of an entry equals `ElementType::size()` of its kind.
//!
//! ## Non-goals
//!
//! * This module does not validate that a buffer's memory layout matches the type.
//! * This module does not support dynamic registration.

// External dependencies
use core::fmt::{Display, Formatter, Result as FmtResult};
use core::mem::size_of;

// Internal dependencies
use crate::primitives::errors::LanefoldError;

// ============================================================================
// Element Kinds
// ============================================================================

/// Closed set of element kinds understood by the engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementType {
    /// Signed 8-bit integer.
    I8,
    /// Signed 16-bit integer.
    I16,
    /// Signed 32-bit integer.
    I32,
    /// Signed 64-bit integer.
    I64,
    /// Unsigned 8-bit integer.
    U8,
    /// Unsigned 16-bit integer.
    U16,
    /// Unsigned 32-bit integer.
    U32,
    /// Unsigned 64-bit integer.
    U64,
    /// 32-bit float.
    F32,
    /// 64-bit float.
    F64,
    /// Single byte character.
    Char,
    /// Pointer to a C string.
    CStr,
    /// One-byte boolean.
    Bool,
    /// 64-bit value displayed in hexadecimal.
    Hex,
    /// 64-bit value displayed in octal.
    Oct,
    /// 64-bit value displayed in binary.
    Bin,
    /// Pointer-width unsigned size.
    Size,
    /// 64-bit timestamp.
    DateTime,
    /// 64-bit duration.
    Duration,
    /// Generic opaque byte.
    Any,
    /// No type; stride 0.
    Null,
}

impl ElementType {
    /// Canonical type identifier.
    pub const fn id(self) -> &'static str {
        match self {
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::Char => "char",
            Self::CStr => "cstr",
            Self::Bool => "bool",
            Self::Hex => "hex",
            Self::Oct => "oct",
            Self::Bin => "bin",
            Self::Size => "size",
            Self::DateTime => "datetime",
            Self::Duration => "duration",
            Self::Any => "any",
            Self::Null => "null",
        }
    }

    /// Element stride in bytes.
    pub const fn size(self) -> usize {
        match self {
            Self::I8 | Self::U8 | Self::Char | Self::Bool | Self::Any => 1,
            Self::I16 | Self::U16 => 2,
            Self::I32 | Self::U32 | Self::F32 => 4,
            Self::I64 | Self::U64 | Self::F64 => 8,
            Self::Hex | Self::Oct | Self::Bin | Self::DateTime | Self::Duration => 8,
            Self::CStr => size_of::<*const u8>(),
            Self::Size => size_of::<usize>(),
            Self::Null => 0,
        }
    }

    /// Whether `sum`, `min` and `max` are defined for this kind.
    pub const fn is_numeric(self) -> bool {
        matches!(
            self,
            Self::I8
                | Self::I16
                | Self::I32
                | Self::I64
                | Self::U8
                | Self::U16
                | Self::U32
                | Self::U64
                | Self::F32
                | Self::F64
        )
    }

    /// Whether `any` and `all` are defined for this kind.
    pub const fn is_bool(self) -> bool {
        matches!(self, Self::Bool)
    }

    /// Parse a canonical identifier, independent of any registry.
    pub fn from_id(id: &str) -> Option<Self> {
        ALL_TYPES.iter().copied().find(|kind| kind.id() == id)
    }
}

impl Display for ElementType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.id())
    }
}

/// Every kind, in table order.
const ALL_TYPES: [ElementType; 21] = [
    ElementType::I8,
    ElementType::I16,
    ElementType::I32,
    ElementType::I64,
    ElementType::U8,
    ElementType::U16,
    ElementType::U32,
    ElementType::U64,
    ElementType::F32,
    ElementType::F64,
    ElementType::Char,
    ElementType::CStr,
    ElementType::Bool,
    ElementType::Hex,
    ElementType::Oct,
    ElementType::Bin,
    ElementType::Size,
    ElementType::DateTime,
    ElementType::Duration,
    ElementType::Any,
    ElementType::Null,
];

// ============================================================================
// Registry
// ============================================================================

/// One row of a type table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeEntry {
    /// Type identifier.
    pub id: &'static str,

    /// Element stride in bytes.
    pub size: usize,

    /// Element kind.
    pub kind: ElementType,
}

impl TypeEntry {
    const fn of(kind: ElementType) -> Self {
        Self {
            id: kind.id(),
            size: kind.size(),
            kind,
        }
    }
}

/// Immutable identifier-to-stride table.
#[derive(Debug, Clone, Copy)]
pub struct TypeRegistry {
    entries: &'static [TypeEntry],
}

impl TypeRegistry {
    /// All entries in lookup order.
    pub fn entries(&self) -> &'static [TypeEntry] {
        self.entries
    }

    /// Find the entry for `type_id`.
    pub fn lookup(&self, type_id: &str) -> Option<&'static TypeEntry> {
        self.entries.iter().find(|entry| entry.id == type_id)
    }

    /// Stride of `type_id`, or 0 when unknown, missing or `null`.
    pub fn size_of(&self, type_id: Option<&str>) -> usize {
        type_id
            .and_then(|id| self.lookup(id))
            .map_or(0, |entry| entry.size)
    }

    /// Whether `type_id` resolves to a non-zero stride.
    pub fn is_supported(&self, type_id: Option<&str>) -> bool {
        self.size_of(type_id) != 0
    }

    /// Resolve `type_id` to an executable kind and stride.
    pub fn resolve(&self, type_id: Option<&str>) -> Result<(ElementType, usize), LanefoldError> {
        match type_id.and_then(|id| self.lookup(id)) {
            Some(entry) if entry.size != 0 => Ok((entry.kind, entry.size)),
            _ => Err(LanefoldError::UnsupportedType(
                type_id.unwrap_or("<null>").into(),
            )),
        }
    }

    /// Whether `kind` belongs to this registry with a non-zero stride.
    pub fn contains(&self, kind: ElementType) -> bool {
        kind.size() != 0 && self.entries.iter().any(|entry| entry.kind == kind)
    }
}

/// Type table consulted by the filter engine.
pub const FILTER_TYPES: TypeRegistry = TypeRegistry {
    entries: &[
        // Signed integers
        TypeEntry::of(ElementType::I8),
        TypeEntry::of(ElementType::I16),
        TypeEntry::of(ElementType::I32),
        TypeEntry::of(ElementType::I64),
        // Unsigned integers
        TypeEntry::of(ElementType::U8),
        TypeEntry::of(ElementType::U16),
        TypeEntry::of(ElementType::U32),
        TypeEntry::of(ElementType::U64),
        // Floating point
        TypeEntry::of(ElementType::F32),
        TypeEntry::of(ElementType::F64),
        // Text
        TypeEntry::of(ElementType::Char),
        TypeEntry::of(ElementType::CStr),
        TypeEntry::of(ElementType::Bool),
        // Extended
        TypeEntry::of(ElementType::Hex),
        TypeEntry::of(ElementType::Oct),
        TypeEntry::of(ElementType::Bin),
        TypeEntry::of(ElementType::Size),
        TypeEntry::of(ElementType::DateTime),
        TypeEntry::of(ElementType::Duration),
        // Generic
        TypeEntry::of(ElementType::Any),
        TypeEntry::of(ElementType::Null),
    ],
};

/// Type table consulted by the reduce engine.
pub const REDUCE_TYPES: TypeRegistry = TypeRegistry {
    entries: &[
        TypeEntry::of(ElementType::I8),
        TypeEntry::of(ElementType::I16),
        TypeEntry::of(ElementType::I32),
        TypeEntry::of(ElementType::I64),
        TypeEntry::of(ElementType::U8),
        TypeEntry::of(ElementType::U16),
        TypeEntry::of(ElementType::U32),
        TypeEntry::of(ElementType::U64),
        TypeEntry::of(ElementType::F32),
        TypeEntry::of(ElementType::F64),
        TypeEntry::of(ElementType::Bool),
        TypeEntry::of(ElementType::Size),
        TypeEntry::of(ElementType::DateTime),
        TypeEntry::of(ElementType::Duration),
        TypeEntry::of(ElementType::Any),
        TypeEntry::of(ElementType::Null),
    ],
};
