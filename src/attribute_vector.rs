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

//! Fixed-width array of dictionary value ids, chosen to be the narrowest of
//! one/two/four bytes per element that can hold every id the owning
//! dictionary needs (including the NULL id when the column is nullable).

use crate::types::INVALID_VALUE_ID;

/// A dense array of value ids, backed by the narrowest integer width that
/// fits `distinct_count` (plus one slot for NULL, if nullable).
#[derive(Debug, Clone)]
pub enum AttributeVector {
    Narrow(Vec<u8>),
    Medium(Vec<u16>),
    Wide(Vec<u32>),
}

/// Width, in bytes, needed to represent `distinct_count` distinct values
/// (plus a NULL id when `nullable`). Matches the worked examples: 10
/// distinct values -> 1 byte, 257 -> 2 bytes, 65536 -> 2 bytes, 65537 -> 4
/// bytes.
pub fn required_width(distinct_count: usize, nullable: bool) -> usize {
    let ids_needed = if nullable {
        distinct_count + 1
    } else {
        distinct_count
    };
    if ids_needed <= 256 {
        1
    } else if ids_needed <= 65536 {
        2
    } else {
        4
    }
}

impl AttributeVector {
    /// Allocate a vector of `len` ids, all initialized to
    /// [`INVALID_VALUE_ID`] truncated to the chosen width, wide enough for
    /// `distinct_count` distinct values (plus NULL, if `nullable`).
    pub fn with_len(len: usize, distinct_count: usize, nullable: bool) -> Self {
        match required_width(distinct_count, nullable) {
            1 => AttributeVector::Narrow(vec![u8::MAX; len]),
            2 => AttributeVector::Medium(vec![u16::MAX; len]),
            _ => AttributeVector::Wide(vec![INVALID_VALUE_ID; len]),
        }
    }

    pub fn width(&self) -> usize {
        match self {
            AttributeVector::Narrow(_) => 1,
            AttributeVector::Medium(_) => 2,
            AttributeVector::Wide(_) => 4,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            AttributeVector::Narrow(v) => v.len(),
            AttributeVector::Medium(v) => v.len(),
            AttributeVector::Wide(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, index: usize) -> u32 {
        debug_assert!(index < self.len(), "attribute vector index out of bounds");
        match self {
            AttributeVector::Narrow(v) => v[index] as u32,
            AttributeVector::Medium(v) => v[index] as u32,
            AttributeVector::Wide(v) => v[index],
        }
    }

    pub fn set(&mut self, index: usize, value_id: u32) {
        debug_assert!(index < self.len(), "attribute vector index out of bounds");
        match self {
            AttributeVector::Narrow(v) => {
                debug_assert!(value_id <= u8::MAX as u32, "value id exceeds 1-byte width");
                v[index] = value_id as u8;
            }
            AttributeVector::Medium(v) => {
                debug_assert!(
                    value_id <= u16::MAX as u32,
                    "value id exceeds 2-byte width"
                );
                v[index] = value_id as u16;
            }
            AttributeVector::Wide(v) => v[index] = value_id,
        }
    }

    pub fn estimate_memory_usage(&self) -> usize {
        match self {
            AttributeVector::Narrow(v) => v.capacity(),
            AttributeVector::Medium(v) => v.capacity() * 2,
            AttributeVector::Wide(v) => v.capacity() * 4,
        }
    }
}
