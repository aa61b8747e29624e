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

//! Read-only handle over an arbitrary object.

use crate::freeze::guard::{call_on_copy, GuardedMethod};
use crate::freeze::Freezer;
use crate::values::error::{FreezeError, ValueError, Write};
use crate::values::function::{Arguments, BoundMethod};
use crate::values::*;
use tracing::debug;

/// A frozen view of an object that has no immutable counterpart.
///
/// The handle looks like the object it wraps: type name, representation,
/// equality and hash are the backing value's. Writes through the handle fail
/// with a `FreezeError`, reads are frozen on the way out and methods are
/// returned as [`GuardedMethod`]s.
pub struct FrozenHandle {
    value: Value,
    freezer: Freezer,
}

impl FrozenHandle {
    pub(crate) fn new(value: Value, freezer: Freezer) -> Value {
        Value::new(FrozenHandle { value, freezer })
    }

    /// The wrapped value. It is not frozen.
    pub fn backing(&self) -> &Value {
        &self.value
    }
}

impl TypedValue for FrozenHandle {
    type Holder = Immutable<FrozenHandle>;
    const TYPE: &'static str = "frozen";

    fn get_type(&self) -> &'static str {
        self.value.get_type()
    }
    fn to_str(&self) -> String {
        self.value.to_str()
    }
    fn to_repr(&self) -> String {
        self.value.to_repr()
    }
    fn to_bool(&self) -> bool {
        self.value.to_bool()
    }
    fn to_int(&self) -> Result<i64, ValueError> {
        self.value.to_int()
    }
    fn get_hash(&self) -> Result<u64, ValueError> {
        self.value.get_hash()
    }
    fn equals(&self, other: &FrozenHandle) -> Result<bool, ValueError> {
        self.value.equals(&other.value)
    }
    fn equals_other_type(&self, other: &Value) -> Result<bool, ValueError> {
        self.value.equals(other)
    }
    fn deep_copy(&self, copier: &mut DeepCopier) -> Result<FrozenHandle, ValueError> {
        Ok(FrozenHandle {
            value: copier.copy(&self.value)?,
            freezer: self.freezer.clone(),
        })
    }

    fn write_error(&self, write: Write<'_>) -> ValueError {
        debug!(
            value_type = self.value.get_type(),
            target = %write,
            "write to frozen value rejected"
        );
        FreezeError::cannot_alter(write, &self.value).into()
    }

    fn call(&self, args: Arguments) -> ValueResult {
        if !self.freezer.options().guard_calls {
            return self.value.call(args);
        }
        call_on_copy(
            &self.freezer,
            &self.value,
            self.value.deep_copy()?,
            "__call__",
            args,
            |copy, args| copy.call(args),
        )
    }

    fn at(&self, index: Value) -> ValueResult {
        self.freezer.freeze(&self.value.at(index)?)
    }
    fn iter(&self) -> Result<Vec<Value>, ValueError> {
        self.value
            .iter()?
            .iter()
            .map(|v| self.freezer.freeze(v))
            .collect()
    }
    fn length(&self) -> Result<i64, ValueError> {
        self.value.length()
    }
    fn is_in(&self, other: &Value) -> Result<bool, ValueError> {
        self.value.is_in(other)
    }

    fn get_attr(&self, attribute: &str) -> ValueResult {
        let value = self.value.get_attr(attribute)?;
        let method = value
            .downcast_ref::<BoundMethod>()
            .map(|m| (m.receiver().clone(), m.name().to_owned()));
        match method {
            Some((receiver, name)) => GuardedMethod::new(receiver, &name, self.freezer.clone()),
            None => self.freezer.freeze(&value),
        }
    }
    fn has_attr(&self, attribute: &str) -> Result<bool, ValueError> {
        self.value.has_attr(attribute)
    }
    fn dir_attr(&self) -> Result<Vec<String>, ValueError> {
        self.value.dir_attr()
    }
}
