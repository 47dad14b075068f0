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

//! Process-wide registry of tables by name.
//!
//! The original `StorageManager::get()` was a lazily-constructed global
//! with a known bug (`return *(new StorageManager())`, leaking a fresh
//! instance on every call, flagged in its own source as needing a real
//! singleton). This is the proper fix: a `OnceLock`-backed singleton, the
//! same pattern the teacher uses for its own engine handle.

use std::collections::HashMap;
use std::io::Write;
use std::sync::{Mutex, OnceLock};
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::table::Table;

type Registry = Mutex<HashMap<String, Arc<Table>>>;

fn registry() -> &'static Registry {
    static REGISTRY: OnceLock<Registry> = OnceLock::new();
    REGISTRY.get_or_init(|| Mutex::new(HashMap::new()))
}

/// Register `table` under `name`. Freezes it behind an `Arc` — from this
/// point on the table is read-only, and every clone of the returned handle
/// (or a `ReferenceSegment` pointing through it) is a pointer bump.
pub fn add_table(name: &str, table: Table) -> Result<Arc<Table>> {
    let mut guard = registry().lock().unwrap();
    if guard.contains_key(name) {
        return Err(Error::DuplicateTable(name.to_string()));
    }
    let table = Arc::new(table);
    guard.insert(name.to_string(), Arc::clone(&table));
    Ok(table)
}

pub fn drop_table(name: &str) -> Result<()> {
    registry()
        .lock()
        .unwrap()
        .remove(name)
        .map(|_| ())
        .ok_or_else(|| Error::UnknownTable(name.to_string()))
}

pub fn get_table(name: &str) -> Result<Arc<Table>> {
    registry()
        .lock()
        .unwrap()
        .get(name)
        .cloned()
        .ok_or_else(|| Error::UnknownTable(name.to_string()))
}

pub fn has_table(name: &str) -> bool {
    registry().lock().unwrap().contains_key(name)
}

pub fn table_names() -> Vec<String> {
    let mut names: Vec<String> = registry().lock().unwrap().keys().cloned().collect();
    names.sort();
    names
}

pub fn print(writer: &mut impl Write) -> std::io::Result<()> {
    for name in table_names() {
        let table = registry().lock().unwrap().get(&name).unwrap().clone();
        writeln!(
            writer,
            "{name}: {} columns, {} rows, {} chunks",
            table.column_count(),
            table.row_count(),
            table.chunk_count()
        )?;
    }
    Ok(())
}

/// Clear the registry. Exists for test isolation — the registry is
/// process-global, so tests that register tables under shared names must
/// reset between runs.
pub fn reset() {
    registry().lock().unwrap().clear();
}
