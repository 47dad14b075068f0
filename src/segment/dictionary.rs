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

//! Dictionary-encoded column segment: a sorted, deduplicated dictionary of
//! distinct values plus a fixed-width attribute vector of value ids.
//!
//! Construction mirrors the original `DictionarySegment` constructor (sort,
//! unique, then fill the attribute vector by looking each row's value back
//! up in the sorted dictionary) — the only part of `dictionary_segment.cpp`
//! that was ever implemented; every accessor beyond the constructor was a
//! `Fail("Implementation is missing.")` stub there, so
//! `get`/`lower_bound`/`upper_bound` below are built from this module's own
//! contract, not transliterated.

use std::any::Any;

use crate::attribute_vector::AttributeVector;
use crate::error::{Error, Result};
use crate::segment::value::ValueSegment;
use crate::segment::AnySegment;
use crate::types::{AllTypeVariant, ColumnValue, DataType, INVALID_VALUE_ID};

/// A sorted dictionary of distinct values paired with a fixed-width
/// attribute vector of value ids, one per row.
#[derive(Debug)]
pub struct DictionarySegment<T: ColumnValue> {
    dictionary: Vec<T>,
    attribute_vector: AttributeVector,
    /// The value id standing in for NULL, one past the last dictionary
    /// entry. `None` when the source column isn't nullable.
    null_value_id: Option<u32>,
}

impl<T: ColumnValue> DictionarySegment<T> {
    /// Build a dictionary segment holding the same rows as `source`.
    pub fn encode(source: &ValueSegment<T>) -> Result<Self> {
        let nullable = source.is_nullable();
        let mut distinct: Vec<T> = source
            .values()
            .iter()
            .enumerate()
            .filter(|(i, _)| !source.is_null(*i))
            .map(|(_, v)| v.clone())
            .collect();
        distinct.sort_by(|a, b| a.cmp_order(b));
        distinct.dedup_by(|a, b| a.cmp_order(b) == std::cmp::Ordering::Equal);

        let distinct_count = distinct.len();
        let ids_needed = distinct_count + usize::from(nullable);
        if ids_needed > u32::MAX as usize {
            return Err(Error::EncodingOverflow);
        }
        let null_value_id = nullable.then_some(distinct_count as u32);

        let mut attribute_vector =
            AttributeVector::with_len(source.len(), distinct_count, nullable);
        for row in 0..source.len() {
            let value_id = if source.is_null(row) {
                null_value_id.expect("null row implies a nullable source segment")
            } else {
                let value = &source.values()[row];
                distinct
                    .binary_search_by(|probe| probe.cmp_order(value))
                    .expect("every non-null value was inserted into the dictionary above")
                    as u32
            };
            attribute_vector.set(row, value_id);
        }

        Ok(DictionarySegment {
            dictionary: distinct,
            attribute_vector,
            null_value_id,
        })
    }

    pub fn len(&self) -> usize {
        self.attribute_vector.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attribute_vector.is_empty()
    }

    pub fn unique_values_count(&self) -> usize {
        self.dictionary.len()
    }

    pub fn is_nullable(&self) -> bool {
        self.null_value_id.is_some()
    }

    fn is_null_id(&self, value_id: u32) -> bool {
        self.null_value_id == Some(value_id)
    }

    pub fn is_null(&self, index: usize) -> bool {
        self.is_null_id(self.attribute_vector.get(index))
    }

    pub fn value_id_of(&self, index: usize) -> u32 {
        self.attribute_vector.get(index)
    }

    /// Resolve a value id back to its dictionary entry. Panics (debug
    /// assert) if asked to resolve the NULL id or an out-of-range id —
    /// callers must check `is_null`/bounds first.
    pub fn value_of_value_id(&self, value_id: u32) -> &T {
        debug_assert!(
            !self.is_null_id(value_id),
            "value_of_value_id called with the NULL sentinel id"
        );
        &self.dictionary[value_id as usize]
    }

    pub fn get(&self, index: usize) -> Result<&T> {
        if self.is_null(index) {
            return Err(Error::NullAccess);
        }
        Ok(self.value_of_value_id(self.value_id_of(index)))
    }

    pub fn get_typed_value(&self, index: usize) -> AllTypeVariant {
        if self.is_null(index) {
            AllTypeVariant::Null
        } else {
            self.value_of_value_id(self.value_id_of(index))
                .clone()
                .into_variant()
        }
    }

    /// First dictionary id whose value is `>= needle`; [`INVALID_VALUE_ID`]
    /// if every entry is smaller.
    pub fn lower_bound(&self, needle: &T) -> u32 {
        let pos = self
            .dictionary
            .partition_point(|v| v.cmp_order(needle) == std::cmp::Ordering::Less);
        if pos == self.dictionary.len() {
            INVALID_VALUE_ID
        } else {
            pos as u32
        }
    }

    /// First dictionary id whose value is `> needle`; [`INVALID_VALUE_ID`]
    /// if every entry is smaller or equal.
    pub fn upper_bound(&self, needle: &T) -> u32 {
        let pos = self
            .dictionary
            .partition_point(|v| v.cmp_order(needle) != std::cmp::Ordering::Greater);
        if pos == self.dictionary.len() {
            INVALID_VALUE_ID
        } else {
            pos as u32
        }
    }

    pub fn dictionary(&self) -> &[T] {
        &self.dictionary
    }

    pub fn estimate_memory_usage(&self) -> usize {
        self.dictionary.len() * std::mem::size_of::<T>()
            + self.attribute_vector.estimate_memory_usage()
    }
}

impl<T: ColumnValue> AnySegment for DictionarySegment<T> {
    fn len(&self) -> usize {
        DictionarySegment::len(self)
    }

    fn data_type(&self) -> DataType {
        T::DATA_TYPE
    }

    fn index(&self, index: usize) -> AllTypeVariant {
        self.get_typed_value(index)
    }

    fn estimate_memory_usage(&self) -> usize {
        DictionarySegment::estimate_memory_usage(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_ints(values: &[Option<i32>]) -> DictionarySegment<i32> {
        let nullable = values.iter().any(|v| v.is_none());
        let mut seg = ValueSegment::new(nullable);
        for v in values {
            seg.append(*v).unwrap();
        }
        DictionarySegment::encode(&seg).unwrap()
    }

    #[test]
    fn memory_estimate_matches_the_worked_example() {
        // 10 distinct, non-nullable i32 entries over 10 rows: d * sizeof(T) + n * width.
        let values: Vec<Option<i32>> = (0..10).map(Some).collect();
        let seg = encode_ints(&values);
        assert_eq!(seg.unique_values_count(), 10);
        assert_eq!(
            seg.estimate_memory_usage(),
            10 * std::mem::size_of::<i32>() + 10 * 1
        );
    }

    #[test]
    fn dictionary_is_sorted_and_deduplicated() {
        let seg = encode_ints(&[Some(30), Some(10), Some(20), Some(10)]);
        assert_eq!(seg.dictionary(), &[10, 20, 30]);
        assert_eq!(seg.unique_values_count(), 3);
    }

    #[test]
    fn round_trips_every_row_through_its_value_id() {
        let values = [Some(30), Some(10), Some(20), Some(10)];
        let seg = encode_ints(&values);
        for (i, v) in values.iter().enumerate() {
            assert_eq!(*seg.get(i).unwrap(), v.unwrap());
        }
    }

    #[test]
    fn null_row_gets_a_dedicated_value_id_outside_the_dictionary() {
        let seg = encode_ints(&[Some(10), None, Some(20)]);
        assert!(seg.is_null(1));
        assert!(seg.get(1).is_err());
        assert_eq!(seg.get_typed_value(1), AllTypeVariant::Null);
        // NULL's id is one past the last real dictionary entry.
        assert_eq!(seg.value_id_of(1) as usize, seg.unique_values_count());
    }

    #[test]
    fn lower_and_upper_bound_bracket_equal_values() {
        let seg = encode_ints(&[Some(10), Some(20), Some(20), Some(30)]);
        assert_eq!(seg.lower_bound(&20), 1);
        assert_eq!(seg.upper_bound(&20), 2);
        assert_eq!(seg.lower_bound(&25), 2);
        assert_eq!(seg.upper_bound(&25), 2);
        assert_eq!(seg.lower_bound(&5), 0);
        assert_eq!(seg.upper_bound(&100), INVALID_VALUE_ID);
    }

    #[test]
    fn bounds_on_the_worked_example() {
        let seg = encode_ints(&[
            Some(0),
            Some(2),
            Some(4),
            Some(6),
            Some(8),
            Some(10),
        ]);
        assert_eq!(seg.lower_bound(&4), 2);
        assert_eq!(seg.upper_bound(&4), 3);
        assert_eq!(seg.lower_bound(&5), 3);
        assert_eq!(seg.upper_bound(&5), 3);
        assert_eq!(seg.lower_bound(&15), INVALID_VALUE_ID);
        assert_eq!(seg.upper_bound(&15), INVALID_VALUE_ID);
    }
}
