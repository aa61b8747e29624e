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

//! Read-only views of dynamically typed values.
//!
//! The library works on a small dynamic value model, [`Value`](values::Value):
//! a reference counted handle over anything implementing
//! [`TypedValue`](values::TypedValue). Cloning a value aliases it, the same
//! way passing an object around does in a dynamic language.
//!
//! [`freeze`](freeze::freeze) turns any such value into one that can't be
//! changed through the returned reference:
//!
//! * immutable values (numbers, strings, tuples, frozen sets and mappings,
//!   functions) are returned unchanged,
//! * lists, sets, dicts and ordered dicts become tuples, frozen sets, frozen
//!   dicts and frozen ordered dicts, with their content frozen as well,
//! * any other object is wrapped in a [`FrozenHandle`](freeze::FrozenHandle).
//!
//! A frozen handle rejects attribute and item writes with a
//! [`FreezeError`](values::error::FreezeError). Method calls made through it
//! run on a deep copy of the object, and fail if the copy no longer equals
//! the object afterwards. The object itself is never changed.
//!
//! # Provided types
//!
//! The [values](values) module provide the following types:
//!
//! * NoneType, bool, integer (signed 64bit), [float and complex](values::float),
//! * [string](values::string) and [bytes](values::bytes),
//! * [tuple](values::tuple) and [list](values::list),
//! * [set and frozenset](values::set),
//! * [dict, OrderedDict and their frozen versions](values::dict),
//! * [functions and bound methods](values::function).
//!
//! Other types plug in by implementing `TypedValue`, see the documentation
//! of the [values](values) module.
//!
//! # Logging
//!
//! The library emits [`tracing`] events: one `TRACE` event per value the
//! freezer classifies, `DEBUG` events for rejected writes and calls and for
//! cycles met while freezing. It never installs a subscriber.

pub mod freeze;
pub(crate) mod linked_hash_set;
pub mod values;

pub use crate::freeze::{freeze, guard_method, is_immutable};
pub use crate::values::error::{FreezeError, ValueError};
pub use crate::values::Value;
