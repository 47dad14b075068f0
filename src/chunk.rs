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

//! A horizontal slice of a table: one segment per column, all the same
//! length.

use crate::error::Result;
use crate::segment::AnySegment;
use crate::types::{AllTypeVariant, ColumnId};

pub struct Chunk {
    segments: Vec<Box<dyn AnySegment>>,
}

impl Chunk {
    pub fn new() -> Self {
        Chunk {
            segments: Vec::new(),
        }
    }

    pub fn add_segment(&mut self, segment: Box<dyn AnySegment>) {
        self.segments.push(segment);
    }

    pub fn column_count(&self) -> usize {
        self.segments.len()
    }

    pub fn get_segment(&self, column_id: ColumnId) -> &dyn AnySegment {
        self.segments[usize::from(column_id)].as_ref()
    }

    /// Number of rows held by this chunk (the length of its first
    /// segment; every segment in a chunk is kept in lockstep).
    pub fn size(&self) -> usize {
        self.segments.first().map_or(0, |s| s.len())
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Append one row, given as one tagged value per column in column
    /// order. The arity must match `column_count` — a mismatch is a
    /// programming-contract violation, checked only in debug builds.
    pub fn append(&mut self, row: &[AllTypeVariant]) -> Result<()> {
        debug_assert_eq!(
            row.len(),
            self.segments.len(),
            "row arity does not match the chunk's column count"
        );
        for (segment, value) in self.segments.iter_mut().zip(row) {
            segment.append(value.clone())?;
        }
        Ok(())
    }

    pub fn estimate_memory_usage(&self) -> usize {
        self.segments.iter().map(|s| s.estimate_memory_usage()).sum()
    }
}

impl Default for Chunk {
    fn default() -> Self {
        Chunk::new()
    }
}

impl std::fmt::Debug for Chunk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Chunk")
            .field("column_count", &self.column_count())
            .field("size", &self.size())
            .finish()
    }
}
