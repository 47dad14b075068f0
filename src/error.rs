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

//! Crate-wide error type.
//!
//! Contract violations (type-tag dispatch misses, debug-only arity or
//! bounds checks) are not represented here — those abort via
//! `debug_assert!`/`panic!`, per the failure policy: value-level errors are
//! surfaced, programming-contract violations are bugs.

use std::fmt;

/// Failure kinds surfaced by the storage and scan engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A catalog lookup or drop referenced a table that isn't registered.
    UnknownTable(String),
    /// A column name or id didn't resolve against a table's schema.
    UnknownColumn(String),
    /// `add_column`/`add_column_definition` was called with a name that
    /// already exists on the table.
    DuplicateColumn(String),
    /// `Catalog::add_table` was called with a name that's already taken.
    DuplicateTable(String),
    /// A non-optional read (`ValueSegment::get`, `DictionarySegment::get`)
    /// observed NULL.
    NullAccess,
    /// NULL appended to a non-nullable segment, `add_column` called after
    /// rows already exist, or (debug builds) a row's arity didn't match
    /// the table's column count.
    InvalidArgument(String),
    /// A scan encountered a segment encoding it doesn't know how to
    /// evaluate a predicate against.
    UnsupportedSegment,
    /// Dictionary construction would need more distinct ids (plus the NULL
    /// and INVALID sentinels) than `ChunkOffset` can represent.
    EncodingOverflow,
    /// `Operator::get_output` was called before `execute`.
    NotExecuted,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnknownTable(name) => write!(f, "unknown table '{name}'"),
            Error::UnknownColumn(name) => write!(f, "unknown column '{name}'"),
            Error::DuplicateColumn(name) => write!(f, "duplicate column '{name}'"),
            Error::DuplicateTable(name) => write!(f, "duplicate table '{name}'"),
            Error::NullAccess => write!(f, "attempted non-optional read of a NULL value"),
            Error::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            Error::UnsupportedSegment => {
                write!(f, "scan encountered an unsupported segment encoding")
            }
            Error::EncodingOverflow => {
                write!(f, "dictionary encoding exceeds the representable id space")
            }
            Error::NotExecuted => write!(f, "operator output requested before execute()"),
        }
    }
}

impl std::error::Error for Error {}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;
