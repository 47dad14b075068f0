//   Copyright (c) 2024-2026 Anton Kundenko <singaraiona@gmail.com>
//   All rights reserved.
//
//   Permission is hereby granted, free of charge, to any person obtaining a copy
//   of this software and associated documentation files (the "Software"), to deal
//   in the Software without restriction, including without limitation the rights
//   to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
//   copies of the Software, and to permit persons to whom the Software is
//   furnished to do so, subject to the following conditions:
//
//   The above copyright notice and this permission notice shall be included in all
//   copies or substantial portions of the Software.
//
//   THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
//   IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
//   FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
//   AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
//   LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
//   OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
//   SOFTWARE.

//! Closed scalar type system and the `resolve_data_type` dispatch waist.
//!
//! Every templated operation in the storage layer (segment construction,
//! scans) is written once generically over `T: ColumnValue` and specialized
//! at this boundary: a runtime [`DataType`] tag comes in, a static type goes
//! out, via a [`TypedVisitor`] rather than a plain closure (closures can't
//! be generic per-call in stable Rust).

use std::cmp::Ordering;
use std::fmt;

use crate::error::{Error, Result};

/// The closed set of column element kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    Int32,
    Int64,
    Float32,
    Float64,
    String,
}

impl DataType {
    /// Parse one of the literal type names accepted at the `add_column`
    /// boundary: `"int"`, `"long"`, `"float"`, `"double"`, `"string"`.
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "int" => Ok(DataType::Int32),
            "long" => Ok(DataType::Int64),
            "float" => Ok(DataType::Float32),
            "double" => Ok(DataType::Float64),
            "string" => Ok(DataType::String),
            other => Err(Error::InvalidArgument(format!(
                "unknown column type name '{other}'"
            ))),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DataType::Int32 => "int",
            DataType::Int64 => "long",
            DataType::Float32 => "float",
            DataType::Float64 => "double",
            DataType::String => "string",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A tagged scalar value, the sum of the closed scalar kinds plus NULL.
#[derive(Debug, Clone, PartialEq)]
pub enum AllTypeVariant {
    Int32(i32),
    Int64(i64),
    Float32(f32),
    Float64(f64),
    String(String),
    Null,
}

impl AllTypeVariant {
    pub fn is_null(&self) -> bool {
        matches!(self, AllTypeVariant::Null)
    }

    pub fn data_type(&self) -> Option<DataType> {
        match self {
            AllTypeVariant::Int32(_) => Some(DataType::Int32),
            AllTypeVariant::Int64(_) => Some(DataType::Int64),
            AllTypeVariant::Float32(_) => Some(DataType::Float32),
            AllTypeVariant::Float64(_) => Some(DataType::Float64),
            AllTypeVariant::String(_) => Some(DataType::String),
            AllTypeVariant::Null => None,
        }
    }

    /// Cast to a concrete column type, converting between compatible
    /// numeric kinds. Panics on a genuine type mismatch (e.g. casting a
    /// `String` variant to a numeric type) — that's a programming-contract
    /// violation, not a recoverable error.
    pub fn type_cast<T: ColumnValue>(&self) -> T {
        T::from_variant(self).unwrap_or_else(|| {
            panic!(
                "type_cast: cannot convert {self:?} into a {}",
                T::DATA_TYPE
            )
        })
    }
}

/// Row identifier: a chunk id paired with an offset within that chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RowId {
    pub chunk_id: ChunkId,
    pub chunk_offset: ChunkOffset,
}

impl RowId {
    /// The reserved sentinel meaning "no row" (used by reference segments
    /// whose source row was itself a null row id).
    pub const NULL: RowId = RowId {
        chunk_id: ChunkId(u32::MAX),
        chunk_offset: ChunkOffset(u32::MAX),
    };

    pub fn new(chunk_id: ChunkId, chunk_offset: ChunkOffset) -> Self {
        RowId {
            chunk_id,
            chunk_offset,
        }
    }

    pub fn is_null(&self) -> bool {
        *self == RowId::NULL
    }
}

/// Index of a chunk within a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChunkId(pub u32);

/// Offset of a row within a chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChunkOffset(pub u32);

/// Index of a column within a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ColumnId(pub u16);

impl From<usize> for ChunkOffset {
    fn from(v: usize) -> Self {
        ChunkOffset(v as u32)
    }
}

impl From<ChunkOffset> for usize {
    fn from(v: ChunkOffset) -> Self {
        v.0 as usize
    }
}

impl From<usize> for ChunkId {
    fn from(v: usize) -> Self {
        ChunkId(v as u32)
    }
}

impl From<ChunkId> for usize {
    fn from(v: ChunkId) -> Self {
        v.0 as usize
    }
}

impl From<usize> for ColumnId {
    fn from(v: usize) -> Self {
        ColumnId(v as u16)
    }
}

impl From<ColumnId> for usize {
    fn from(v: ColumnId) -> Self {
        v.0 as usize
    }
}

/// Sentinel value id meaning "no such dictionary entry".
pub const INVALID_VALUE_ID: u32 = u32::MAX;

/// A scalar column type usable as `T` in `ValueSegment<T>` /
/// `DictionarySegment<T>`. The impls below (`i32`, `i64`, `f32`, `f64`,
/// `String`) are the entire closed set named by [`DataType`].
pub trait ColumnValue: Clone + PartialEq + fmt::Debug + Send + Sync + 'static {
    const DATA_TYPE: DataType;

    /// Total ordering used for dictionary sort/dedup/binary-search. Floats
    /// use `total_cmp` so NaN sorts deterministically instead of breaking
    /// the sortedness invariant a plain `partial_cmp().unwrap()` would
    /// panic on.
    fn cmp_order(&self, other: &Self) -> Ordering;

    fn into_variant(self) -> AllTypeVariant;

    /// Extract a `Self` from a tagged value, converting between
    /// compatible numeric kinds. `None` on a genuine type mismatch.
    fn from_variant(value: &AllTypeVariant) -> Option<Self>;

    /// Filler value stored under a masked-out null slot. Never observed:
    /// every read path checks the null mask first.
    fn null_placeholder() -> Self;
}

impl ColumnValue for i32 {
    const DATA_TYPE: DataType = DataType::Int32;

    fn cmp_order(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }

    fn into_variant(self) -> AllTypeVariant {
        AllTypeVariant::Int32(self)
    }

    fn from_variant(value: &AllTypeVariant) -> Option<Self> {
        match *value {
            AllTypeVariant::Int32(v) => Some(v),
            AllTypeVariant::Int64(v) => i32::try_from(v).ok(),
            _ => None,
        }
    }

    fn null_placeholder() -> Self {
        0
    }
}

impl ColumnValue for i64 {
    const DATA_TYPE: DataType = DataType::Int64;

    fn cmp_order(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }

    fn into_variant(self) -> AllTypeVariant {
        AllTypeVariant::Int64(self)
    }

    fn from_variant(value: &AllTypeVariant) -> Option<Self> {
        match *value {
            AllTypeVariant::Int64(v) => Some(v),
            AllTypeVariant::Int32(v) => Some(v as i64),
            _ => None,
        }
    }

    fn null_placeholder() -> Self {
        0
    }
}

impl ColumnValue for f32 {
    const DATA_TYPE: DataType = DataType::Float32;

    fn cmp_order(&self, other: &Self) -> Ordering {
        self.total_cmp(other)
    }

    fn into_variant(self) -> AllTypeVariant {
        AllTypeVariant::Float32(self)
    }

    fn from_variant(value: &AllTypeVariant) -> Option<Self> {
        match *value {
            AllTypeVariant::Float32(v) => Some(v),
            AllTypeVariant::Float64(v) => Some(v as f32),
            AllTypeVariant::Int32(v) => Some(v as f32),
            AllTypeVariant::Int64(v) => Some(v as f32),
            _ => None,
        }
    }

    fn null_placeholder() -> Self {
        0.0
    }
}

impl ColumnValue for f64 {
    const DATA_TYPE: DataType = DataType::Float64;

    fn cmp_order(&self, other: &Self) -> Ordering {
        self.total_cmp(other)
    }

    fn into_variant(self) -> AllTypeVariant {
        AllTypeVariant::Float64(self)
    }

    fn from_variant(value: &AllTypeVariant) -> Option<Self> {
        match *value {
            AllTypeVariant::Float64(v) => Some(v),
            AllTypeVariant::Float32(v) => Some(v as f64),
            AllTypeVariant::Int32(v) => Some(v as f64),
            AllTypeVariant::Int64(v) => Some(v as f64),
            _ => None,
        }
    }

    fn null_placeholder() -> Self {
        0.0
    }
}

impl ColumnValue for String {
    const DATA_TYPE: DataType = DataType::String;

    fn cmp_order(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }

    fn into_variant(self) -> AllTypeVariant {
        AllTypeVariant::String(self)
    }

    fn from_variant(value: &AllTypeVariant) -> Option<Self> {
        match value {
            AllTypeVariant::String(s) => Some(s.clone()),
            _ => None,
        }
    }

    fn null_placeholder() -> Self {
        String::new()
    }
}

/// A generic operation specialized at the `resolve_data_type` boundary.
/// Implement `visit::<T>` once, generically; `resolve_data_type` picks the
/// `T` matching the runtime tag and calls it exactly once.
pub trait TypedVisitor {
    type Output;

    fn visit<T: ColumnValue>(self) -> Self::Output;
}

/// The type-dispatch waist: map a runtime [`DataType`] tag to the matching
/// static type and invoke `visitor` with it.
pub fn resolve_data_type<V: TypedVisitor>(data_type: DataType, visitor: V) -> V::Output {
    match data_type {
        DataType::Int32 => visitor.visit::<i32>(),
        DataType::Int64 => visitor.visit::<i64>(),
        DataType::Float32 => visitor.visit::<f32>(),
        DataType::Float64 => visitor.visit::<f64>(),
        DataType::String => visitor.visit::<String>(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_closed_set_of_type_names() {
        assert_eq!(DataType::from_name("int").unwrap(), DataType::Int32);
        assert_eq!(DataType::from_name("long").unwrap(), DataType::Int64);
        assert_eq!(DataType::from_name("float").unwrap(), DataType::Float32);
        assert_eq!(DataType::from_name("double").unwrap(), DataType::Float64);
        assert_eq!(DataType::from_name("string").unwrap(), DataType::String);
        assert!(DataType::from_name("bogus").is_err());
    }

    #[test]
    fn type_cast_widens_compatible_numeric_kinds() {
        let v = AllTypeVariant::Int32(42);
        assert_eq!(v.type_cast::<i64>(), 42i64);
        assert_eq!(v.type_cast::<f64>(), 42.0f64);
    }

    #[test]
    #[should_panic]
    fn type_cast_panics_on_genuine_mismatch() {
        let v = AllTypeVariant::String("hi".into());
        let _: i32 = v.type_cast::<i32>();
    }

    #[test]
    fn row_id_null_sentinel_is_null() {
        assert!(RowId::NULL.is_null());
        assert!(!RowId::new(ChunkId(0), ChunkOffset(0)).is_null());
    }

    struct LenVisitor;
    impl TypedVisitor for LenVisitor {
        type Output = &'static str;
        fn visit<T: ColumnValue>(self) -> Self::Output {
            T::DATA_TYPE.name()
        }
    }

    #[test]
    fn resolve_data_type_dispatches_to_the_matching_static_type() {
        assert_eq!(resolve_data_type(DataType::Int64, LenVisitor), "long");
        assert_eq!(resolve_data_type(DataType::String, LenVisitor), "string");
    }
}
