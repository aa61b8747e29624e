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

//! Define the set and frozenset types.

use crate::linked_hash_set::LinkedHashSet;
use crate::values::error::ValueError;
use crate::values::function::Arguments;
use crate::values::hashed_value::HashedValue;
use crate::values::*;
use std::num::Wrapping;

/// A mutable set of hashable values, iterated in insertion order.
#[derive(Clone, Default, Debug)]
pub struct Set {
    content: LinkedHashSet<HashedValue>,
}

/// The immutable counterpart of [`Set`].
#[derive(Clone, Default, Debug)]
pub struct FrozenSet {
    content: LinkedHashSet<HashedValue>,
}

fn collect<V: Into<Value>>(values: Vec<V>) -> Result<LinkedHashSet<HashedValue>, ValueError> {
    let mut content = LinkedHashSet::with_capacity(values.len());
    for v in values.into_iter() {
        content.insert_if_absent(HashedValue::new(v.into())?);
    }
    Ok(content)
}

fn elements(content: &LinkedHashSet<HashedValue>) -> Vec<Value> {
    content.iter().map(|v| v.get_value().clone()).collect()
}

fn contents_equal(a: &LinkedHashSet<HashedValue>, b: &LinkedHashSet<HashedValue>) -> bool {
    a.len() == b.len() && a.iter().all(|v| b.contains(v))
}

fn deep_copy_content(
    content: &LinkedHashSet<HashedValue>,
    copier: &mut DeepCopier,
) -> Result<LinkedHashSet<HashedValue>, ValueError> {
    let mut copy = LinkedHashSet::with_capacity(content.len());
    for v in content.iter() {
        copy.insert_if_absent(HashedValue::new(copier.copy(v.get_value())?)?);
    }
    Ok(copy)
}

/// Content of a set or frozenset value.
fn set_content(value: &Value) -> Option<LinkedHashSet<HashedValue>> {
    if let Some(s) = value.downcast_ref::<Set>() {
        return Some(s.content.clone());
    }
    value.downcast_ref::<FrozenSet>().map(|s| s.content.clone())
}

fn is_in(content: &LinkedHashSet<HashedValue>, other: &Value) -> Result<bool, ValueError> {
    Ok(content.contains(&HashedValue::new(other.clone())?))
}

fn issubset(
    type_name: &str,
    content: &LinkedHashSet<HashedValue>,
    args: Arguments,
) -> ValueResult {
    let other = args.required(0, "other")?;
    match set_content(&other) {
        Some(other) => Ok(Value::new(content.is_subset(&other))),
        None => Err(ValueError::OperationNotSupported {
            op: ".issubset()".to_owned(),
            left: type_name.to_owned(),
            right: Some(other.get_type().to_owned()),
        }),
    }
}

fn repr_elements(content: &LinkedHashSet<HashedValue>) -> String {
    content
        .iter()
        .map(|v| v.get_value().to_repr())
        .collect::<Vec<_>>()
        .join(", ")
}

impl Set {
    pub fn new<V: Into<Value>>(values: Vec<V>) -> Result<Value, ValueError> {
        Ok(Value::new(Set {
            content: collect(values)?,
        }))
    }

    pub fn empty() -> Value {
        Value::new(Set::default())
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn insert(&mut self, value: Value) -> Result<(), ValueError> {
        self.content.insert_if_absent(HashedValue::new(value)?);
        Ok(())
    }
}

impl FrozenSet {
    pub fn new<V: Into<Value>>(values: Vec<V>) -> Result<Value, ValueError> {
        Ok(Value::new(FrozenSet {
            content: collect(values)?,
        }))
    }
}

impl TypedValue for Set {
    type Holder = Mutable<Set>;
    const TYPE: &'static str = "set";

    fn to_repr(&self) -> String {
        if self.content.is_empty() {
            "set()".to_owned()
        } else {
            format!("{{{}}}", repr_elements(&self.content))
        }
    }
    fn to_bool(&self) -> bool {
        !self.content.is_empty()
    }
    fn equals(&self, other: &Set) -> Result<bool, ValueError> {
        Ok(contents_equal(&self.content, &other.content))
    }
    fn equals_other_type(&self, other: &Value) -> Result<bool, ValueError> {
        match other.downcast_ref::<FrozenSet>() {
            Some(other) => Ok(contents_equal(&self.content, &other.content)),
            None => Ok(false),
        }
    }
    fn deep_copy(&self, copier: &mut DeepCopier) -> Result<Set, ValueError> {
        Ok(Set {
            content: deep_copy_content(&self.content, copier)?,
        })
    }
    fn length(&self) -> Result<i64, ValueError> {
        Ok(self.content.len() as i64)
    }
    fn is_in(&self, other: &Value) -> Result<bool, ValueError> {
        is_in(&self.content, other)
    }
    fn iter(&self) -> Result<Vec<Value>, ValueError> {
        Ok(elements(&self.content))
    }

    fn method_effect(&self, name: &str) -> Option<MethodEffect> {
        match name {
            "issubset" => Some(MethodEffect::ReadOnly),
            "add" | "discard" | "clear" => Some(MethodEffect::Mutating),
            _ => None,
        }
    }
    fn call_method(&self, name: &str, args: Arguments) -> ValueResult {
        match name {
            "issubset" => issubset(Self::TYPE, &self.content, args),
            _ => Err(ValueError::OperationNotSupported {
                op: format!(".{}()", name),
                left: Self::TYPE.to_owned(),
                right: None,
            }),
        }
    }
    fn call_method_mut(&mut self, name: &str, args: Arguments) -> ValueResult {
        match name {
            "add" => {
                self.insert(args.required(0, "value")?)?;
                Ok(Value::none())
            }
            "discard" => {
                let value = HashedValue::new(args.required(0, "value")?)?;
                self.content.remove(&value);
                Ok(Value::none())
            }
            "clear" => {
                self.content.clear();
                Ok(Value::none())
            }
            _ => Err(ValueError::OperationNotSupported {
                op: format!(".{}()", name),
                left: Self::TYPE.to_owned(),
                right: None,
            }),
        }
    }
    fn static_effects(&self) -> bool {
        true
    }
}

impl TypedValue for FrozenSet {
    type Holder = Immutable<FrozenSet>;
    const TYPE: &'static str = "frozenset";

    fn to_repr(&self) -> String {
        if self.content.is_empty() {
            "frozenset()".to_owned()
        } else {
            format!("frozenset({{{}}})", repr_elements(&self.content))
        }
    }
    fn to_bool(&self) -> bool {
        !self.content.is_empty()
    }
    fn get_hash(&self) -> Result<u64, ValueError> {
        // Order independent, equal sets hash alike.
        Ok(self
            .content
            .iter()
            .fold(Wrapping(0u64), |acc, v| acc + Wrapping(v.get_hash()))
            .0)
    }
    fn equals(&self, other: &FrozenSet) -> Result<bool, ValueError> {
        Ok(contents_equal(&self.content, &other.content))
    }
    fn equals_other_type(&self, other: &Value) -> Result<bool, ValueError> {
        match other.downcast_ref::<Set>() {
            Some(other) => Ok(contents_equal(&self.content, &other.content)),
            None => Ok(false),
        }
    }
    fn deep_copy(&self, copier: &mut DeepCopier) -> Result<FrozenSet, ValueError> {
        Ok(FrozenSet {
            content: deep_copy_content(&self.content, copier)?,
        })
    }
    fn length(&self) -> Result<i64, ValueError> {
        Ok(self.content.len() as i64)
    }
    fn is_in(&self, other: &Value) -> Result<bool, ValueError> {
        is_in(&self.content, other)
    }
    fn iter(&self) -> Result<Vec<Value>, ValueError> {
        Ok(elements(&self.content))
    }

    fn method_effect(&self, name: &str) -> Option<MethodEffect> {
        match name {
            "issubset" => Some(MethodEffect::ReadOnly),
            _ => None,
        }
    }
    fn call_method(&self, name: &str, args: Arguments) -> ValueResult {
        issubset(Self::TYPE, &self.content, args)
    }
    fn static_effects(&self) -> bool {
        true
    }
}
