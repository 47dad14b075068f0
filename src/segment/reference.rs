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

//! Zero-copy intermediate result segment: a position list of row ids into
//! a referenced base table, resolved lazily on each read.
//!
//! Grounded directly on `reference_segment.cpp`'s `operator[]`: resolve the
//! row id, short-circuit on a null row id, otherwise recurse into the
//! referenced table's own chunk/segment at that position.

use std::any::Any;
use std::sync::Arc;

use crate::segment::AnySegment;
use crate::types::{AllTypeVariant, ColumnId, DataType, RowId};
use crate::table::Table;

/// A list of row ids into `referenced_table`, one per logical row of this
/// segment, naming a single column of that table.
#[derive(Debug)]
pub struct ReferenceSegment {
    referenced_table: Arc<Table>,
    referenced_column_id: ColumnId,
    pos_list: Arc<Vec<RowId>>,
}

impl ReferenceSegment {
    pub fn new(
        referenced_table: Arc<Table>,
        referenced_column_id: ColumnId,
        pos_list: Arc<Vec<RowId>>,
    ) -> Self {
        ReferenceSegment {
            referenced_table,
            referenced_column_id,
            pos_list,
        }
    }

    pub fn referenced_table(&self) -> &Arc<Table> {
        &self.referenced_table
    }

    pub fn referenced_column_id(&self) -> ColumnId {
        self.referenced_column_id
    }

    pub fn pos_list(&self) -> &Arc<Vec<RowId>> {
        &self.pos_list
    }

    pub fn len(&self) -> usize {
        self.pos_list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pos_list.is_empty()
    }

    pub fn get_typed_value(&self, index: usize) -> AllTypeVariant {
        let row_id = self.pos_list[index];
        if row_id.is_null() {
            return AllTypeVariant::Null;
        }
        let chunk = self
            .referenced_table
            .get_chunk(row_id.chunk_id)
            .expect("reference segment points at a chunk still present in its referenced table");
        let segment = chunk.get_segment(self.referenced_column_id);
        segment.index(usize::from(row_id.chunk_offset))
    }

    pub fn estimate_memory_usage(&self) -> usize {
        self.pos_list.capacity() * std::mem::size_of::<RowId>()
    }
}

impl AnySegment for ReferenceSegment {
    fn len(&self) -> usize {
        ReferenceSegment::len(self)
    }

    fn data_type(&self) -> DataType {
        self.referenced_table.column_type(self.referenced_column_id)
    }

    fn index(&self, index: usize) -> AllTypeVariant {
        self.get_typed_value(index)
    }

    fn estimate_memory_usage(&self) -> usize {
        ReferenceSegment::estimate_memory_usage(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
