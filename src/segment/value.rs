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

//! Uncompressed, densely-stored column segment: one `T` per row plus an
//! optional parallel null mask.

use std::any::Any;

use crate::error::{Error, Result};
use crate::segment::AnySegment;
use crate::types::{AllTypeVariant, ColumnValue, DataType};

/// A plain dense vector of `T`, the encoding every column starts its life
/// in before `Table::compress_chunk` replaces it with a
/// [`crate::segment::DictionarySegment`].
#[derive(Debug)]
pub struct ValueSegment<T: ColumnValue> {
    values: Vec<T>,
    null_mask: Option<Vec<bool>>,
}

impl<T: ColumnValue> ValueSegment<T> {
    pub fn new(nullable: bool) -> Self {
        ValueSegment {
            values: Vec::new(),
            null_mask: nullable.then(Vec::new),
        }
    }

    pub fn is_nullable(&self) -> bool {
        self.null_mask.is_some()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }

    pub fn null_values(&self) -> Option<&[bool]> {
        self.null_mask.as_deref()
    }

    pub fn is_null(&self, index: usize) -> bool {
        self.null_mask
            .as_ref()
            .map(|mask| mask[index])
            .unwrap_or(false)
    }

    /// Append `value`; `None` means NULL and requires a nullable segment.
    pub fn append(&mut self, value: Option<T>) -> Result<()> {
        match (value, &mut self.null_mask) {
            (Some(v), Some(mask)) => {
                self.values.push(v);
                mask.push(false);
            }
            (Some(v), None) => {
                self.values.push(v);
            }
            (None, Some(mask)) => {
                self.values.push(T::null_placeholder());
                mask.push(true);
            }
            (None, None) => {
                return Err(Error::InvalidArgument(
                    "attempted to append NULL to a non-nullable segment".into(),
                ));
            }
        }
        Ok(())
    }

    /// Non-optional read. Returns [`Error::NullAccess`] for a null row.
    pub fn get(&self, index: usize) -> Result<&T> {
        if self.is_null(index) {
            return Err(Error::NullAccess);
        }
        Ok(&self.values[index])
    }

    pub fn get_typed_value(&self, index: usize) -> AllTypeVariant {
        if self.is_null(index) {
            AllTypeVariant::Null
        } else {
            self.values[index].clone().into_variant()
        }
    }

    pub fn estimate_memory_usage(&self) -> usize {
        let values_size = self.values.capacity() * std::mem::size_of::<T>();
        let mask_size = self
            .null_mask
            .as_ref()
            .map(|m| m.capacity())
            .unwrap_or(0);
        values_size + mask_size
    }
}

impl<T: ColumnValue> AnySegment for ValueSegment<T> {
    fn len(&self) -> usize {
        ValueSegment::len(self)
    }

    fn data_type(&self) -> DataType {
        T::DATA_TYPE
    }

    fn index(&self, index: usize) -> AllTypeVariant {
        self.get_typed_value(index)
    }

    fn estimate_memory_usage(&self) -> usize {
        ValueSegment::estimate_memory_usage(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn append(&mut self, value: AllTypeVariant) -> Result<()> {
        if value.is_null() {
            ValueSegment::append(self, None)
        } else {
            let typed = T::from_variant(&value).ok_or_else(|| {
                Error::InvalidArgument(format!(
                    "cannot append {value:?} into a {} column",
                    T::DATA_TYPE
                ))
            })?;
            ValueSegment::append(self, Some(typed))
        }
    }

    fn is_appendable(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_and_reads_back_non_null_values() {
        let mut seg: ValueSegment<i32> = ValueSegment::new(false);
        seg.append(Some(10)).unwrap();
        seg.append(Some(20)).unwrap();
        assert_eq!(*seg.get(0).unwrap(), 10);
        assert_eq!(*seg.get(1).unwrap(), 20);
    }

    #[test]
    fn non_nullable_segment_rejects_null_append() {
        let mut seg: ValueSegment<i32> = ValueSegment::new(false);
        assert!(seg.append(None).is_err());
    }

    #[test]
    fn nullable_segment_tracks_nulls_independently_of_stored_value() {
        let mut seg: ValueSegment<i64> = ValueSegment::new(true);
        seg.append(Some(1)).unwrap();
        seg.append(None).unwrap();
        assert!(!seg.is_null(0));
        assert!(seg.is_null(1));
        assert!(seg.get(1).is_err());
        assert_eq!(seg.index(1), AllTypeVariant::Null);
    }
}
