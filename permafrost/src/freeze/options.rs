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

//! Freezer configuration.

/// How method calls through a frozen handle are checked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardStrategy {
    /// Run every call on a deep copy and compare it with the original
    /// afterwards.
    Oracle,
    /// Trust the `MethodEffect` declarations of types whose
    /// `static_effects()` is true: read-only methods run on the live value,
    /// mutating ones are rejected without running. Other types use the
    /// oracle.
    Static,
}

impl Default for GuardStrategy {
    fn default() -> Self {
        GuardStrategy::Oracle
    }
}

/// What to do when freezing reaches a container it is already freezing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CyclePolicy {
    /// Fail with `UnsupportedRecursiveDataStructure`.
    Error,
    /// Put `None` in place of the back reference.
    ReplaceWithNone,
}

impl Default for CyclePolicy {
    fn default() -> Self {
        CyclePolicy::Error
    }
}

/// Options of a [`Freezer`](crate::freeze::Freezer).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FreezeOptions {
    pub strategy: GuardStrategy,
    pub cycles: CyclePolicy,
    /// Run calls of frozen callables under the mutation oracle. Off by
    /// default: calling a frozen callable forwards to it unchecked.
    pub guard_calls: bool,
    /// Report a guarded call that failed after changing its copy as a
    /// `FreezeError` rather than with the method's own error.
    pub reject_partial_mutation: bool,
}

impl FreezeOptions {
    pub fn with_strategy(mut self, strategy: GuardStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_cycles(mut self, cycles: CyclePolicy) -> Self {
        self.cycles = cycles;
        self
    }

    pub fn with_guard_calls(mut self, guard_calls: bool) -> Self {
        self.guard_calls = guard_calls;
        self
    }

    pub fn with_reject_partial_mutation(mut self, reject: bool) -> Self {
        self.reject_partial_mutation = reject;
        self
    }
}
