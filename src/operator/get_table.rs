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

//! Leaf operator that pulls a table straight out of the catalog.

use std::sync::Arc;

use crate::catalog;
use crate::error::Result;
use crate::operator::{ExecutionState, Operator};
use crate::table::Table;

pub struct GetTable {
    table_name: String,
    state: ExecutionState,
}

impl GetTable {
    pub fn new(table_name: impl Into<String>) -> Self {
        GetTable {
            table_name: table_name.into(),
            state: ExecutionState::new(),
        }
    }
}

impl Operator for GetTable {
    fn execution_state(&self) -> &ExecutionState {
        &self.state
    }

    fn on_execute(&self) -> Result<Arc<Table>> {
        catalog::get_table(&self.table_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DataType;

    #[test]
    fn executes_by_fetching_the_named_table_from_the_catalog() {
        let mut table = Table::new(8);
        table.add_column("a", DataType::Int32, false).unwrap();
        catalog::add_table("get_table_test", table).unwrap();

        let op = GetTable::new("get_table_test");
        op.execute().unwrap();
        let output = op.get_output().unwrap();
        assert_eq!(output.column_count(), 1);

        catalog::drop_table("get_table_test").unwrap();
    }

    #[test]
    fn get_output_before_execute_fails() {
        let op = GetTable::new("never_registered");
        assert!(op.get_output().is_err());
    }
}
