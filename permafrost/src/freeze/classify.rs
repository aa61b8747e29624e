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

//! Decide how a value is frozen.

use crate::freeze::guard::GuardedMethod;
use crate::freeze::handle::FrozenHandle;
use crate::values::bytes::Bytes;
use crate::values::dict::{Dict, FrozenDict};
use crate::values::float::Complex;
use crate::values::function::Function;
use crate::values::list::List;
use crate::values::none::NoneType;
use crate::values::set::{FrozenSet, Set};
use crate::values::tuple::Tuple;
use crate::values::Value;

/// The treatment `freeze` applies to a value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Classification {
    /// Already immutable, returned as is.
    Immutable,
    /// `list`, becomes a `tuple`.
    Sequence,
    /// `set`, becomes a `frozenset`.
    Set,
    /// `OrderedDict`, becomes a `FrozenOrderedDict`.
    OrderedMapping,
    /// `dict`, becomes a `frozendict`.
    Mapping,
    /// Anything else, wrapped in a `FrozenHandle`.
    Opaque,
}

/// Whether `value` is of a type that can't change once built.
///
/// Decided by the exact runtime type. Containers of that kind may still
/// hold mutable values (a tuple of lists), they are immutable themselves.
pub fn is_immutable(value: &Value) -> bool {
    value.is::<NoneType>()
        || value.is::<bool>()
        || value.is::<i64>()
        || value.is::<f64>()
        || value.is::<Complex>()
        || value.is::<String>()
        || value.is::<Bytes>()
        || value.is::<Tuple>()
        || value.is::<FrozenSet>()
        || value.is::<FrozenDict<false>>()
        || value.is::<FrozenDict<true>>()
        || value.is::<Function>()
        || value.is::<GuardedMethod>()
        || value.is::<FrozenHandle>()
}

pub fn classify(value: &Value) -> Classification {
    if is_immutable(value) {
        Classification::Immutable
    } else if value.is::<List>() {
        Classification::Sequence
    } else if value.is::<Set>() {
        Classification::Set
    } else if value.is::<Dict<true>>() {
        Classification::OrderedMapping
    } else if value.is::<Dict<false>>() {
        Classification::Mapping
    } else {
        Classification::Opaque
    }
}
