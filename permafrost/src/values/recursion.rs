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

//! Recursion depth limit for structural operations.
//!
//! Equality, deep copy and freezing all walk value graphs recursively.
//! They share one thread-local depth counter so that a deep structure
//! reports `TooManyRecursionLevel` instead of overflowing the native stack,
//! even when the walk goes through user `TypedValue` code that has no way
//! to pass a depth parameter along.

use crate::values::error::ValueError;
use crate::values::DataPtr;
use std::cell::{Cell, RefCell};
use std::collections::HashSet;

#[cfg(debug_assertions)]
pub(crate) const MAX_RECURSION: u32 = 200;

#[cfg(not(debug_assertions))]
pub(crate) const MAX_RECURSION: u32 = 3000;

thread_local!(static DEPTH: Cell<u32> = Cell::new(0));

/// Restores the previous depth on drop.
#[must_use]
pub struct DepthGuard {
    prev_depth: u32,
}

impl Drop for DepthGuard {
    fn drop(&mut self) {
        DEPTH.with(|c| c.set(self.prev_depth));
    }
}

/// Enter one more level of recursion.
///
/// Returns an error once the limit is reached; otherwise the returned guard
/// leaves the level when dropped.
pub fn try_inc() -> Result<DepthGuard, ValueError> {
    let prev_depth = DEPTH.with(Cell::get);
    if prev_depth >= MAX_RECURSION {
        return Err(ValueError::TooManyRecursionLevel);
    }
    DEPTH.with(|c| c.set(prev_depth + 1));
    Ok(DepthGuard { prev_depth })
}

thread_local!(static IN_REPR: RefCell<HashSet<DataPtr>> = RefCell::new(HashSet::new()));

/// Marks a value as being printed, see [`enter_repr`].
#[must_use]
pub struct ReprGuard {
    ptr: DataPtr,
}

impl Drop for ReprGuard {
    fn drop(&mut self) {
        IN_REPR.with(|s| s.borrow_mut().remove(&self.ptr));
    }
}

/// Start printing the container at `ptr`.
///
/// Returns `None` if that container is already being printed further up
/// the stack, in which case the caller prints an ellipsis instead.
pub fn enter_repr(ptr: DataPtr) -> Option<ReprGuard> {
    if IN_REPR.with(|s| s.borrow_mut().insert(ptr)) {
        Some(ReprGuard { ptr })
    } else {
        None
    }
}
