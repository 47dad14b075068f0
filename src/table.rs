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

//! Chunked columnar table: a schema plus a sequence of [`Chunk`]s.
//!
//! A `Table` is owned and mutable while its caller is still appending rows
//! to it. Once it's handed to [`crate::catalog::add_table`] or
//! returned as an operator's output, it's wrapped in `Arc<Table>` and never
//! mutated again — cloning that handle is a pointer bump, and every
//! `ReferenceSegment` that points into it stays valid for as long as any
//! clone is alive.

use std::sync::Mutex;

use crate::chunk::Chunk;
use crate::error::{Error, Result};
use crate::segment::{AnySegment, DictionarySegment, ValueSegment};
use crate::types::{resolve_data_type, AllTypeVariant, ChunkId, ColumnId, ColumnValue, DataType, TypedVisitor};

pub struct Table {
    column_names: Vec<String>,
    column_types: Vec<DataType>,
    column_nullable: Vec<bool>,
    chunks: Vec<Chunk>,
    target_chunk_size: usize,
}

impl Table {
    /// A new table with no columns and a single empty chunk, matching the
    /// original constructor: schema comes later via `add_column`/
    /// `add_column_definition`.
    pub fn new(target_chunk_size: usize) -> Self {
        Table {
            column_names: Vec::new(),
            column_types: Vec::new(),
            column_nullable: Vec::new(),
            chunks: vec![Chunk::new()],
            target_chunk_size,
        }
    }

    pub fn target_chunk_size(&self) -> usize {
        self.target_chunk_size
    }

    pub fn column_count(&self) -> usize {
        self.column_names.len()
    }

    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    pub fn column_name(&self, id: ColumnId) -> &str {
        &self.column_names[usize::from(id)]
    }

    pub fn column_type(&self, id: ColumnId) -> DataType {
        self.column_types[usize::from(id)]
    }

    pub fn column_nullable(&self, id: ColumnId) -> bool {
        self.column_nullable[usize::from(id)]
    }

    pub fn column_id_by_name(&self, name: &str) -> Result<ColumnId> {
        self.column_names
            .iter()
            .position(|n| n == name)
            .map(|pos| ColumnId(pos as u16))
            .ok_or_else(|| Error::UnknownColumn(name.to_string()))
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    pub fn get_chunk(&self, id: ChunkId) -> Option<&Chunk> {
        self.chunks.get(usize::from(id))
    }

    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    pub fn row_count(&self) -> usize {
        self.chunks.iter().map(Chunk::size).sum()
    }

    pub fn estimate_memory_usage(&self) -> usize {
        self.chunks.iter().map(Chunk::estimate_memory_usage).sum()
    }

    /// Register a column in the schema only, without touching any chunk.
    /// Used to build up a result table's schema (e.g. in
    /// `from_reference_segments`) where segments are attached directly.
    pub fn add_column_definition(
        &mut self,
        name: &str,
        data_type: DataType,
        nullable: bool,
    ) -> Result<()> {
        if self.column_names.iter().any(|n| n == name) {
            return Err(Error::DuplicateColumn(name.to_string()));
        }
        self.column_names.push(name.to_string());
        self.column_types.push(data_type);
        self.column_nullable.push(nullable);
        Ok(())
    }

    /// Register a column and materialize an empty segment for it in every
    /// existing chunk. Only legal before any row has been appended.
    pub fn add_column(&mut self, name: &str, data_type: DataType, nullable: bool) -> Result<()> {
        if self.row_count() > 0 {
            return Err(Error::InvalidArgument(
                "add_column called on a table that already has rows".into(),
            ));
        }
        self.add_column_definition(name, data_type, nullable)?;
        for chunk in &mut self.chunks {
            chunk.add_segment(resolve_data_type(data_type, NewSegmentVisitor { nullable }));
        }
        Ok(())
    }

    fn create_new_chunk(&mut self) {
        let mut chunk = Chunk::new();
        for (data_type, nullable) in self.column_types.iter().zip(&self.column_nullable) {
            chunk.add_segment(resolve_data_type(
                *data_type,
                NewSegmentVisitor {
                    nullable: *nullable,
                },
            ));
        }
        self.chunks.push(chunk);
    }

    /// Append one row, given as one tagged value per column in column
    /// order. Rolls over to a fresh chunk first if the current one is at
    /// capacity or has already been compressed.
    pub fn append(&mut self, row: &[AllTypeVariant]) -> Result<()> {
        debug_assert_eq!(
            row.len(),
            self.column_count(),
            "row arity does not match the table's column count"
        );
        let needs_new_chunk = match self.chunks.last() {
            Some(chunk) if chunk.column_count() > 0 => {
                chunk.size() >= self.target_chunk_size || !chunk.get_segment(ColumnId(0)).is_appendable()
            }
            _ => false,
        };
        if needs_new_chunk {
            self.create_new_chunk();
        }
        self.chunks
            .last_mut()
            .expect("a table always holds at least one chunk")
            .append(row)
    }

    /// Replace chunk `chunk_id`'s value segments with dictionary-encoded
    /// ones, one `std::thread` per column, joined before the chunk is
    /// swapped in as a single atomic replace.
    pub fn compress_chunk(&mut self, chunk_id: ChunkId) -> Result<()> {
        let idx = usize::from(chunk_id);
        let column_count = self.column_count();
        let results: Mutex<Vec<Option<Result<Box<dyn AnySegment>>>>> =
            Mutex::new((0..column_count).map(|_| None).collect());

        {
            let chunk = &self.chunks[idx];
            let column_types = &self.column_types;
            std::thread::scope(|scope| {
                for col in 0..column_count {
                    let results = &results;
                    let data_type = column_types[col];
                    let segment = chunk.get_segment(ColumnId(col as u16));
                    scope.spawn(move || {
                        let encoded = resolve_data_type(data_type, EncodeVisitor { segment });
                        results.lock().unwrap()[col] = Some(encoded);
                    });
                }
            });
        }

        let mut new_chunk = Chunk::new();
        for slot in results.into_inner().unwrap() {
            let segment = slot.expect("every column's compression thread completed")?;
            new_chunk.add_segment(segment);
        }
        self.chunks[idx] = new_chunk;
        Ok(())
    }

    /// Build a result table sharing `source`'s schema out of chunks whose
    /// columns are reference segments rather than stored data — the
    /// representation an operator like `TableScan` hands back. One output
    /// chunk per surviving input chunk, each with its own position list,
    /// mirroring how a scan never merges matches across chunk boundaries.
    pub fn from_chunks(source: &Table, chunks: Vec<Chunk>) -> Table {
        Table {
            column_names: source.column_names.clone(),
            column_types: source.column_types.clone(),
            column_nullable: source.column_nullable.clone(),
            chunks,
            target_chunk_size: source.target_chunk_size,
        }
    }
}

impl std::fmt::Debug for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Table")
            .field("column_names", &self.column_names)
            .field("row_count", &self.row_count())
            .field("chunk_count", &self.chunk_count())
            .finish()
    }
}

struct NewSegmentVisitor {
    nullable: bool,
}

impl TypedVisitor for NewSegmentVisitor {
    type Output = Box<dyn AnySegment>;

    fn visit<T: ColumnValue>(self) -> Self::Output {
        Box::new(ValueSegment::<T>::new(self.nullable))
    }
}

struct EncodeVisitor<'a> {
    segment: &'a dyn AnySegment,
}

impl<'a> TypedVisitor for EncodeVisitor<'a> {
    type Output = Result<Box<dyn AnySegment>>;

    fn visit<T: ColumnValue>(self) -> Self::Output {
        let value_segment = self
            .segment
            .as_any()
            .downcast_ref::<ValueSegment<T>>()
            .expect("compress_chunk only runs against value-encoded segments");
        let dictionary = DictionarySegment::<T>::encode(value_segment)?;
        Ok(Box::new(dictionary))
    }
}
