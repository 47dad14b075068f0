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

//! Operator pipeline contract: `execute()` once, `get_output()` any
//! number of times after. Grounded on `abstract_operator.cpp`'s
//! `execute()`/`get_output()`/`_was_executed` pair, translated to
//! `Arc<dyn Operator>` inputs and an `Arc<Table>` output.

pub mod get_table;
pub mod table_scan;

use std::sync::{Arc, Mutex};

use crate::error::{Error, Result};
use crate::table::Table;

pub use get_table::GetTable;
pub use table_scan::{ScanType, TableScan};

/// Holds an operator's cached output and whether `execute` has run yet.
/// Every `Operator` impl owns one of these and delegates `execute`/
/// `get_output` to it via the trait's default methods.
#[derive(Default)]
pub struct ExecutionState {
    output: Mutex<Option<Arc<Table>>>,
}

impl ExecutionState {
    pub fn new() -> Self {
        ExecutionState::default()
    }
}

pub trait Operator: Send + Sync {
    fn execution_state(&self) -> &ExecutionState;

    /// Produce this operator's output. Called exactly once, by `execute`.
    fn on_execute(&self) -> Result<Arc<Table>>;

    fn execute(&self) -> Result<()> {
        {
            let guard = self.execution_state().output.lock().unwrap();
            debug_assert!(guard.is_none(), "operator executed more than once");
        }
        let output = self.on_execute()?;
        *self.execution_state().output.lock().unwrap() = Some(output);
        Ok(())
    }

    fn get_output(&self) -> Result<Arc<Table>> {
        self.execution_state()
            .output
            .lock()
            .unwrap()
            .clone()
            .ok_or(Error::NotExecuted)
    }
}
