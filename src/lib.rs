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

//! An in-memory, chunked columnar storage and scan engine.
//!
//! Tables hold their rows in fixed-size [`chunk::Chunk`]s. Columns start
//! out as plain [`segment::ValueSegment`]s and can be compressed in place
//! into [`segment::DictionarySegment`]s. Query-style access is expressed
//! as a small [`operator::Operator`] pipeline: [`operator::GetTable`]
//! pulls a table out of the [`catalog`], [`operator::TableScan`] filters
//! one column and produces a [`segment::ReferenceSegment`]-backed result
//! table without copying any data.

pub mod attribute_vector;
pub mod catalog;
pub mod chunk;
pub mod error;
pub mod operator;
pub mod segment;
pub mod table;
pub mod types;

pub use error::{Error, Result};
pub use table::Table;
pub use types::{AllTypeVariant, ChunkId, ChunkOffset, ColumnId, DataType, RowId};
