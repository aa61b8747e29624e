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

//! Freezing: read-only views of arbitrary values.
//!
//! [`freeze`] returns immutable values unchanged, converts the built-in
//! mutable containers to their immutable counterparts (freezing what they
//! hold) and wraps any other value in a [`FrozenHandle`]:
//!
//! | value         | frozen                |
//! |---------------|-----------------------|
//! | `list`        | `tuple`               |
//! | `set`         | `frozenset`           |
//! | `OrderedDict` | `FrozenOrderedDict`   |
//! | `dict`        | `frozendict`          |
//! | other objects | `FrozenHandle`        |
//!
//! A frozen handle refuses writes, freezes what is read through it, and
//! checks every method call made through it with a [`GuardedMethod`].
//!
//! ```
//! # use permafrost::freeze::freeze;
//! # use permafrost::values::Value;
//! # use permafrost::values::list::List;
//! # use permafrost::values::function::Arguments;
//! let l = List::new(vec![1, 2]);
//! let frozen = freeze(&l).unwrap();
//! assert_eq!("(1, 2)", frozen.to_repr());
//! assert!(frozen == Value::from((1, 2)));
//! assert!(frozen.call_method("append", Arguments::new(vec![Value::from(3)])).is_err());
//! ```

use crate::values::dict::FrozenDict;
use crate::values::error::ValueError;
use crate::values::recursion;
use crate::values::set::FrozenSet;
use crate::values::tuple::Tuple;
use crate::values::{DataPtr, Value, ValueResult};
use std::collections::HashSet;
use std::rc::Rc;
use tracing::{debug, trace};

mod classify;
mod guard;
mod handle;
mod options;

pub use crate::freeze::classify::{classify, is_immutable, Classification};
pub use crate::freeze::guard::GuardedMethod;
pub use crate::freeze::handle::FrozenHandle;
pub use crate::freeze::options::{CyclePolicy, FreezeOptions, GuardStrategy};

/// Freezes values with a given set of options.
///
/// Handles and guarded methods created by a freezer keep a reference to it,
/// so values frozen lazily later on follow the same options.
#[derive(Clone, Debug, Default)]
pub struct Freezer {
    options: Rc<FreezeOptions>,
}

impl Freezer {
    pub fn new(options: FreezeOptions) -> Freezer {
        Freezer {
            options: Rc::new(options),
        }
    }

    pub fn options(&self) -> &FreezeOptions {
        &self.options
    }

    /// Return a read-only equivalent of `value`.
    pub fn freeze(&self, value: &Value) -> ValueResult {
        self.freeze_value(value, &mut HashSet::new())
    }

    /// Guard the method `name` of `value`, without freezing `value`.
    pub fn guard_method(&self, value: &Value, name: &str) -> ValueResult {
        if value.method_effect(name).is_none() {
            return Err(ValueError::OperationNotSupported {
                op: format!(".{}()", name),
                left: value.get_type().to_owned(),
                right: None,
            });
        }
        GuardedMethod::new(value.clone(), name, self.clone())
    }

    fn freeze_value(&self, value: &Value, visiting: &mut HashSet<DataPtr>) -> ValueResult {
        let _guard = recursion::try_inc()?;
        let classification = classify(value);
        trace!(
            value_type = value.get_type(),
            classification = ?classification,
            "classified value"
        );
        match classification {
            Classification::Immutable => Ok(value.clone()),
            Classification::Opaque => Ok(FrozenHandle::new(value.clone(), self.clone())),
            container => {
                let ptr = value.data_ptr();
                if !visiting.insert(ptr) {
                    debug!(
                        value_type = value.get_type(),
                        policy = ?self.options.cycles,
                        "container reached while freezing it"
                    );
                    return match self.options.cycles {
                        CyclePolicy::Error => Err(ValueError::UnsupportedRecursiveDataStructure),
                        CyclePolicy::ReplaceWithNone => Ok(Value::none()),
                    };
                }
                let frozen = self.freeze_container(container, value, visiting);
                visiting.remove(&ptr);
                frozen
            }
        }
    }

    fn freeze_container(
        &self,
        container: Classification,
        value: &Value,
        visiting: &mut HashSet<DataPtr>,
    ) -> ValueResult {
        let elements = value.iter()?;
        match container {
            Classification::Sequence => {
                let frozen = self.freeze_all(&elements, visiting)?;
                Ok(Tuple::new(frozen))
            }
            Classification::Set => {
                let frozen = self.freeze_all(&elements, visiting)?;
                FrozenSet::new(frozen)
            }
            Classification::OrderedMapping => {
                FrozenDict::<true>::from_pairs(self.freeze_values(value, elements, visiting)?)
            }
            _ => FrozenDict::<false>::from_pairs(self.freeze_values(value, elements, visiting)?),
        }
    }

    fn freeze_all(
        &self,
        values: &[Value],
        visiting: &mut HashSet<DataPtr>,
    ) -> Result<Vec<Value>, ValueError> {
        values
            .iter()
            .map(|v| self.freeze_value(v, visiting))
            .collect()
    }

    /// `(key, freeze(mapping[key]))` for each key. Keys are hashable and
    /// are kept as they are.
    fn freeze_values(
        &self,
        mapping: &Value,
        keys: Vec<Value>,
        visiting: &mut HashSet<DataPtr>,
    ) -> Result<Vec<(Value, Value)>, ValueError> {
        let mut pairs = Vec::with_capacity(keys.len());
        for key in keys {
            let value = mapping.at(key.clone())?;
            pairs.push((key, self.freeze_value(&value, visiting)?));
        }
        Ok(pairs)
    }
}

/// Freeze `value` with the default options.
pub fn freeze(value: &Value) -> ValueResult {
    Freezer::default().freeze(value)
}

/// Guard the method `name` of `value` with the default options.
///
/// The result is callable; calling it fails with a `FreezeError` if the call
/// would have changed `value`, and `value` itself is never changed.
pub fn guard_method(value: &Value, name: &str) -> ValueResult {
    Freezer::default().guard_method(value, name)
}
