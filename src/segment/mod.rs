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

//! The three segment encodings (`ValueSegment`, `DictionarySegment`,
//! `ReferenceSegment`) behind one object-safe [`AnySegment`] trait object,
//! the Rust rendering of what the original design expressed with
//! `dynamic_pointer_cast` against a common segment base class.

pub mod dictionary;
pub mod reference;
pub mod value;

use std::any::Any;

use crate::error::{Error, Result};
use crate::types::{AllTypeVariant, DataType};

pub use dictionary::DictionarySegment;
pub use reference::ReferenceSegment;
pub use value::ValueSegment;

/// Common, type-erased surface shared by every segment encoding.
///
/// Operations that need the segment's concrete type (dictionary
/// `lower_bound`/`upper_bound`, typed appends) downcast via [`as_any`]
/// after a [`crate::types::resolve_data_type`] dispatch has already fixed
/// the static type — the same two-step "erase, then recover" shape the
/// original code reached for with `dynamic_pointer_cast`.
///
/// [`as_any`]: AnySegment::as_any
pub trait AnySegment: Send + Sync {
    /// Number of rows (including nulls) held by this segment.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn data_type(&self) -> DataType;

    /// Read row `index` as a tagged value. `NULL` for a null row.
    fn index(&self, index: usize) -> AllTypeVariant;

    fn estimate_memory_usage(&self) -> usize;

    fn as_any(&self) -> &dyn Any;

    /// Append a tagged value. Only `ValueSegment` supports this; every
    /// other encoding is built once and is immutable afterwards, so the
    /// default rejects the call.
    fn append(&mut self, _value: AllTypeVariant) -> Result<()> {
        Err(Error::UnsupportedSegment)
    }

    /// Whether this segment accepts further `append` calls. `ValueSegment`
    /// is the only encoding that does; a chunk rolls over to a fresh one
    /// once its segments stop being appendable (i.e. once compressed).
    fn is_appendable(&self) -> bool {
        false
    }
}
