// Copyright 2018 The Starlark in Rust Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Deep copy of value graphs.

use crate::values::error::ValueError;
use crate::values::recursion;
use crate::values::{DataPtr, Value, ValueResult};
use std::collections::{HashMap, HashSet};

/// State of one deep copy.
///
/// Every object is copied at most once: a second path to an object already
/// copied gets the same copy, so shared substructure stays shared in the
/// result. An object reached again while it is still being copied is a
/// cycle, which is reported as `UnsupportedRecursiveDataStructure`.
#[derive(Default)]
pub struct DeepCopier {
    memo: HashMap<DataPtr, Value>,
    in_progress: HashSet<DataPtr>,
}

impl DeepCopier {
    pub fn new() -> DeepCopier {
        DeepCopier::default()
    }

    /// Copy `value` and everything it contains.
    ///
    /// `TypedValue::deep_copy` implementations call this for each value
    /// they hold.
    pub fn copy(&mut self, value: &Value) -> ValueResult {
        if value.is_inline() {
            return Ok(value.clone());
        }
        let ptr = value.data_ptr();
        if let Some(copy) = self.memo.get(&ptr) {
            return Ok(copy.clone());
        }
        if !self.in_progress.insert(ptr) {
            return Err(ValueError::UnsupportedRecursiveDataStructure);
        }
        let copy = match recursion::try_inc() {
            Ok(_guard) => value.deep_copy_with(self),
            Err(e) => Err(e),
        };
        self.in_progress.remove(&ptr);
        let copy = copy?;
        self.memo.insert(ptr, copy.clone());
        Ok(copy)
    }

    /// Copy each value of `values`.
    pub fn copy_all<'a, I>(&mut self, values: I) -> Result<Vec<Value>, ValueError>
    where
        I: IntoIterator<Item = &'a Value>,
    {
        values.into_iter().map(|v| self.copy(v)).collect()
    }
}
