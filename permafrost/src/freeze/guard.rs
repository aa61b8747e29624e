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

//! Method calls that are not allowed to change their receiver.

use crate::freeze::{Freezer, GuardStrategy};
use crate::values::error::{FreezeError, ValueError};
use crate::values::function::Arguments;
use crate::values::*;
use std::cell::RefCell;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use tracing::debug;

/// A method of a value, callable only as long as the call leaves the value
/// as it was.
///
/// The call runs on a deep copy of the receiver, which is then compared with
/// the receiver. A difference discards the result and fails with
/// `FreezeError::WouldMutate`. The receiver itself is never touched.
///
/// Receivers whose type keeps the default identity equality always look
/// changed, so every guarded call on them fails.
pub struct GuardedMethod {
    receiver: Value,
    name: String,
    freezer: Freezer,
    /// Copy of the receiver taken when the method was looked up, consumed
    /// by the first call.
    snapshot: RefCell<Option<Value>>,
}

impl GuardedMethod {
    /// Guard the method `name` of `receiver`. Fails if the receiver can't be
    /// deep copied.
    pub(crate) fn new(receiver: Value, name: &str, freezer: Freezer) -> ValueResult {
        let snapshot = if Self::uses_effects(&freezer, &receiver) {
            None
        } else {
            Some(receiver.deep_copy()?)
        };
        Ok(Value::new(GuardedMethod {
            receiver,
            name: name.to_owned(),
            freezer,
            snapshot: RefCell::new(snapshot),
        }))
    }

    pub fn receiver(&self) -> &Value {
        &self.receiver
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn uses_effects(freezer: &Freezer, receiver: &Value) -> bool {
        freezer.options().strategy == GuardStrategy::Static && receiver.static_effects()
    }

    fn fresh_copy(&self) -> ValueResult {
        match self.snapshot.borrow_mut().take() {
            Some(copy) => Ok(copy),
            None => self.receiver.deep_copy(),
        }
    }

    fn call_with_effects(&self, args: Arguments) -> ValueResult {
        match self.receiver.method_effect(&self.name) {
            Some(MethodEffect::Mutating) => {
                debug!(
                    method = self.name.as_str(),
                    value_type = self.receiver.get_type(),
                    "mutating method rejected"
                );
                Err(would_mutate(&self.name, &args, &self.receiver))
            }
            _ => self.receiver.invoke_method(&self.name, args),
        }
    }
}

fn would_mutate(method: &str, args: &Arguments, receiver: &Value) -> ValueError {
    FreezeError::WouldMutate {
        method: method.to_owned(),
        arguments: args.to_repr(),
        value: receiver.to_repr(),
    }
    .into()
}

/// Run `call` on `copy`, a fresh deep copy of `receiver`, and fail if the
/// copy no longer equals the receiver afterwards.
pub(crate) fn call_on_copy<F>(
    freezer: &Freezer,
    receiver: &Value,
    copy: Value,
    method: &str,
    args: Arguments,
    call: F,
) -> ValueResult
where
    F: FnOnce(&Value, Arguments) -> ValueResult,
{
    let kept_args = args.clone();
    let result = call(&copy, args);
    let check = result.is_ok() || freezer.options().reject_partial_mutation;
    if check && !copy.equals(receiver)? {
        debug!(
            method,
            value_type = receiver.get_type(),
            failed = result.is_err(),
            "call changed the copy of a frozen value"
        );
        return Err(would_mutate(method, &kept_args, receiver));
    }
    result
}

impl TypedValue for GuardedMethod {
    type Holder = Immutable<GuardedMethod>;
    const TYPE: &'static str = "method";

    fn to_repr(&self) -> String {
        format!(
            "<guarded method {}.{} of {}>",
            self.receiver.get_type(),
            self.name,
            self.receiver.to_repr()
        )
    }
    fn get_hash(&self) -> Result<u64, ValueError> {
        let mut s = DefaultHasher::new();
        self.name.hash(&mut s);
        self.receiver.data_ptr().hash(&mut s);
        Ok(s.finish())
    }
    fn deep_copy(&self, copier: &mut DeepCopier) -> Result<GuardedMethod, ValueError> {
        Ok(GuardedMethod {
            receiver: copier.copy(&self.receiver)?,
            name: self.name.clone(),
            freezer: self.freezer.clone(),
            snapshot: RefCell::new(None),
        })
    }
    fn call(&self, args: Arguments) -> ValueResult {
        if Self::uses_effects(&self.freezer, &self.receiver) {
            return self.call_with_effects(args);
        }
        let copy = self.fresh_copy()?;
        let name = self.name.as_str();
        call_on_copy(
            &self.freezer,
            &self.receiver,
            copy,
            name,
            args,
            |copy, args| copy.invoke_method(name, args),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::freeze::FreezeOptions;
    use crate::values::list::List;

    fn guard(freezer: &Freezer, value: &Value, name: &str) -> Value {
        freezer.guard_method(value, name).unwrap()
    }

    #[test]
    fn read_only_call_succeeds() {
        let l = List::new(vec![1, 2, 1]);
        let count = guard(&Freezer::default(), &l, "count");
        assert!(count.call(Arguments::new(vec![Value::from(1)])).unwrap() == Value::from(2));
        // A second call takes a new copy.
        assert!(count.call(Arguments::new(vec![Value::from(2)])).unwrap() == Value::from(1));
    }

    #[test]
    fn mutating_call_fails_and_leaves_value_alone() {
        let l = List::new(vec![1]);
        let append = guard(&Freezer::default(), &l, "append");
        let err = append.call(Arguments::new(vec![Value::from(2)])).unwrap_err();
        assert_eq!(
            "call to append with arguments (2) would mutate [1]",
            err.to_string()
        );
        assert_eq!("[1]", l.to_repr());
        // Still failing, the snapshot changed by the first call is gone.
        assert!(append.call(Arguments::new(vec![Value::from(2)])).is_err());
        assert_eq!("[1]", l.to_repr());
    }

    #[test]
    fn errors_propagate_unless_partial_mutation_is_rejected() {
        let l = List::new(vec![1]);
        // `pop` on an empty list fails without changing it.
        let empty = List::new(Vec::<Value>::new());
        let pop = guard(&Freezer::default(), &empty, "pop");
        assert_eq!(
            Err(ValueError::IndexOutOfBound(-1)),
            pop.call(Arguments::none()).map(|_| ())
        );
        // `insert` with a missing value fails after nothing changed either.
        let insert = guard(&Freezer::default(), &l, "insert");
        assert_eq!(
            Err(ValueError::MissingParameter("value".to_owned())),
            insert.call(Arguments::new(vec![Value::from(0)])).map(|_| ())
        );
        let strict = Freezer::new(FreezeOptions::default().with_reject_partial_mutation(true));
        let insert = guard(&strict, &l, "insert");
        assert_eq!(
            Err(ValueError::MissingParameter("value".to_owned())),
            insert.call(Arguments::new(vec![Value::from(0)])).map(|_| ())
        );
    }

    #[test]
    fn static_strategy() {
        let freezer = Freezer::new(FreezeOptions::default().with_strategy(GuardStrategy::Static));
        let l = List::new(vec![1]);
        let append = guard(&freezer, &l, "append");
        assert!(append
            .call(Arguments::new(vec![Value::from(2)]))
            .unwrap_err()
            .is_freeze_error());
        let index = guard(&freezer, &l, "index");
        assert!(index.call(Arguments::new(vec![Value::from(1)])).unwrap() == Value::from(0));
        assert_eq!("[1]", l.to_repr());
    }

    #[test]
    fn repr() {
        let l = List::new(vec![1]);
        let append = guard(&Freezer::default(), &l, "append");
        assert_eq!("<guarded method list.append of [1]>", append.to_repr());
        assert_eq!("method", append.get_type());
    }
}
