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

//! Define the mapping types: `dict`, `OrderedDict` and their frozen
//! counterparts `frozendict` and `FrozenOrderedDict`.
//!
//! All four keep insertion order. `ORDERED` only changes how they compare:
//! two ordered mappings are equal when they hold the same pairs in the same
//! order, any other pairing ignores order.

use crate::values::error::ValueError;
use crate::values::function::Arguments;
use crate::values::hashed_value::HashedValue;
use crate::values::list::List;
use crate::values::recursion;
use crate::values::*;
use linked_hash_map::LinkedHashMap;
use std::num::Wrapping;

type Content = LinkedHashMap<HashedValue, Value>;

/// A mutable mapping. `Dict<true>` is the `OrderedDict` type.
#[derive(Clone, Default, Debug)]
pub struct Dict<const ORDERED: bool = false> {
    content: Content,
}

/// An immutable mapping. `FrozenDict<true>` is the `FrozenOrderedDict` type.
#[derive(Clone, Default, Debug)]
pub struct FrozenDict<const ORDERED: bool = false> {
    content: Content,
}

pub type OrderedDict = Dict<true>;
pub type FrozenOrderedDict = FrozenDict<true>;

fn collect(pairs: Vec<(Value, Value)>) -> Result<Content, ValueError> {
    let mut content = LinkedHashMap::with_capacity(pairs.len());
    for (k, v) in pairs {
        content.insert(HashedValue::new(k)?, v);
    }
    Ok(content)
}

fn into_pairs<K: Into<Value>, V: Into<Value>>(pairs: Vec<(K, V)>) -> Vec<(Value, Value)> {
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

/// Run `f` over the content of any of the four mapping types.
fn with_mapping<R>(value: &Value, f: impl FnOnce(bool, &Content) -> R) -> Option<R> {
    if let Some(d) = value.downcast_ref::<Dict<false>>() {
        return Some(f(false, &d.content));
    }
    if let Some(d) = value.downcast_ref::<Dict<true>>() {
        return Some(f(true, &d.content));
    }
    if let Some(d) = value.downcast_ref::<FrozenDict<false>>() {
        return Some(f(false, &d.content));
    }
    value
        .downcast_ref::<FrozenDict<true>>()
        .map(|d| f(true, &d.content))
}

fn mapping_equals(
    ordered: bool,
    a: &Content,
    other_ordered: bool,
    b: &Content,
) -> Result<bool, ValueError> {
    if a.len() != b.len() {
        return Ok(false);
    }
    if ordered && other_ordered {
        for ((ak, av), (bk, bv)) in a.iter().zip(b.iter()) {
            if ak != bk || !av.equals(bv)? {
                return Ok(false);
            }
        }
        return Ok(true);
    }
    for (k, v) in a.iter() {
        match b.get(k) {
            Some(w) if v.equals(w)? => {}
            _ => return Ok(false),
        }
    }
    Ok(true)
}

fn equals_other_mapping(ordered: bool, a: &Content, other: &Value) -> Result<bool, ValueError> {
    with_mapping(other, |other_ordered, b| {
        mapping_equals(ordered, a, other_ordered, b)
    })
    .unwrap_or(Ok(false))
}

fn repr_content(content: &Content) -> String {
    let pairs: Vec<String> = content
        .iter()
        .map(|(k, v)| format!("{}: {}", k.get_value().to_repr(), v.to_repr()))
        .collect();
    format!("{{{}}}", pairs.join(", "))
}

fn deep_copy_content(content: &Content, copier: &mut DeepCopier) -> Result<Content, ValueError> {
    let mut copy = LinkedHashMap::with_capacity(content.len());
    for (k, v) in content.iter() {
        let k = HashedValue::new(copier.copy(k.get_value())?)?;
        copy.insert(k, copier.copy(v)?);
    }
    Ok(copy)
}

fn get(content: &Content, key: Value) -> ValueResult {
    match content.get(&HashedValue::new(key.clone())?) {
        Some(v) => Ok(v.clone()),
        None => Err(ValueError::KeyNotFound(key)),
    }
}

fn keys(content: &Content) -> Vec<Value> {
    content.keys().map(|k| k.get_value().clone()).collect()
}

/// Read-only methods shared by all mapping types.
fn mapping_method(type_name: &str, content: &Content, name: &str, args: Arguments) -> ValueResult {
    match name {
        "get" => {
            let key = HashedValue::new(args.required(0, "key")?)?;
            match content.get(&key) {
                Some(v) => Ok(v.clone()),
                None => Ok(args.get(1, "default").unwrap_or_else(Value::none)),
            }
        }
        "keys" => Ok(List::new(keys(content))),
        "values" => Ok(List::new(content.values().cloned().collect::<Vec<_>>())),
        "items" => Ok(List::new(
            content
                .iter()
                .map(|(k, v)| Value::from((k.get_value().clone(), v.clone())))
                .collect::<Vec<_>>(),
        )),
        _ => Err(ValueError::OperationNotSupported {
            op: format!(".{}()", name),
            left: type_name.to_owned(),
            right: None,
        }),
    }
}

fn read_only_effect(name: &str) -> Option<MethodEffect> {
    match name {
        "get" | "keys" | "values" | "items" => Some(MethodEffect::ReadOnly),
        _ => None,
    }
}

impl<const ORDERED: bool> Dict<ORDERED> {
    pub fn new() -> Value {
        Value::new(Dict::<ORDERED>::default())
    }

    /// Build from key/value pairs. Later pairs override earlier ones but
    /// keep the position of the first occurrence.
    pub fn from_pairs<K: Into<Value>, V: Into<Value>>(pairs: Vec<(K, V)>) -> ValueResult {
        Ok(Value::new(Dict::<ORDERED> {
            content: collect(into_pairs(pairs))?,
        }))
    }

    pub fn insert(&mut self, key: Value, value: Value) -> Result<(), ValueError> {
        self.content.insert(HashedValue::new(key)?, value);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    fn is_self(&self, value: &Value) -> bool {
        !value.is_inline() && value.data_ptr() == DataPtr::from(self)
    }
}

impl<const ORDERED: bool> FrozenDict<ORDERED> {
    /// Build from key/value pairs, see [`Dict::from_pairs`].
    pub fn from_pairs<K: Into<Value>, V: Into<Value>>(pairs: Vec<(K, V)>) -> ValueResult {
        Ok(Value::new(FrozenDict::<ORDERED> {
            content: collect(into_pairs(pairs))?,
        }))
    }
}

impl<const ORDERED: bool> TypedValue for Dict<ORDERED> {
    type Holder = Mutable<Dict<ORDERED>>;
    const TYPE: &'static str = if ORDERED { "OrderedDict" } else { "dict" };

    fn to_repr(&self) -> String {
        let content = match recursion::enter_repr(DataPtr::from(self)) {
            Some(_guard) => repr_content(&self.content),
            None => "{...}".to_owned(),
        };
        if ORDERED {
            format!("OrderedDict({})", content)
        } else {
            content
        }
    }
    fn to_bool(&self) -> bool {
        !self.content.is_empty()
    }
    fn equals(&self, other: &Dict<ORDERED>) -> Result<bool, ValueError> {
        mapping_equals(ORDERED, &self.content, ORDERED, &other.content)
    }
    fn equals_other_type(&self, other: &Value) -> Result<bool, ValueError> {
        equals_other_mapping(ORDERED, &self.content, other)
    }
    fn deep_copy(&self, copier: &mut DeepCopier) -> Result<Dict<ORDERED>, ValueError> {
        Ok(Dict {
            content: deep_copy_content(&self.content, copier)?,
        })
    }

    fn at(&self, index: Value) -> ValueResult {
        get(&self.content, index)
    }
    fn set_at(&mut self, index: Value, new_value: Value) -> Result<(), ValueError> {
        self.insert(index, new_value)
    }
    fn del_at(&mut self, index: Value) -> Result<(), ValueError> {
        match self.content.remove(&HashedValue::new(index.clone())?) {
            Some(..) => Ok(()),
            None => Err(ValueError::KeyNotFound(index)),
        }
    }
    fn length(&self) -> Result<i64, ValueError> {
        Ok(self.content.len() as i64)
    }
    fn is_in(&self, other: &Value) -> Result<bool, ValueError> {
        Ok(self.content.contains_key(&HashedValue::new(other.clone())?))
    }
    fn iter(&self) -> Result<Vec<Value>, ValueError> {
        Ok(keys(&self.content))
    }

    fn method_effect(&self, name: &str) -> Option<MethodEffect> {
        match name {
            "update" | "pop" | "setdefault" | "clear" => Some(MethodEffect::Mutating),
            _ => read_only_effect(name),
        }
    }
    fn call_method(&self, name: &str, args: Arguments) -> ValueResult {
        mapping_method(Self::TYPE, &self.content, name, args)
    }
    fn call_method_mut(&mut self, name: &str, args: Arguments) -> ValueResult {
        match name {
            "update" => {
                let other = args.required(0, "other")?;
                if !self.is_self(&other) {
                    let pairs = with_mapping(&other, |_, content| {
                        content
                            .iter()
                            .map(|(k, v)| (k.clone(), v.clone()))
                            .collect::<Vec<_>>()
                    })
                    .ok_or(ValueError::IncorrectParameterType)?;
                    for (k, v) in pairs {
                        self.content.insert(k, v);
                    }
                }
                Ok(Value::none())
            }
            "pop" => {
                let key = args.required(0, "key")?;
                match self.content.remove(&HashedValue::new(key.clone())?) {
                    Some(v) => Ok(v),
                    None => args.get(1, "default").ok_or(ValueError::KeyNotFound(key)),
                }
            }
            "setdefault" => {
                let key = HashedValue::new(args.required(0, "key")?)?;
                let default = args.get(1, "default").unwrap_or_else(Value::none);
                Ok(self.content.entry(key).or_insert(default).clone())
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

impl<const ORDERED: bool> TypedValue for FrozenDict<ORDERED> {
    type Holder = Immutable<FrozenDict<ORDERED>>;
    const TYPE: &'static str = if ORDERED {
        "FrozenOrderedDict"
    } else {
        "frozendict"
    };

    fn to_repr(&self) -> String {
        format!("{}({})", Self::TYPE, repr_content(&self.content))
    }
    fn to_bool(&self) -> bool {
        !self.content.is_empty()
    }
    fn get_hash(&self) -> Result<u64, ValueError> {
        let mut hash = Wrapping(0u64);
        for (i, (k, v)) in self.content.iter().enumerate() {
            let pair = Value::from((k.get_value().clone(), v.clone())).get_hash()?;
            hash = if ORDERED {
                hash * Wrapping(31) + Wrapping(pair) + Wrapping(i as u64)
            } else {
                hash + Wrapping(pair)
            };
        }
        Ok(hash.0)
    }
    fn equals(&self, other: &FrozenDict<ORDERED>) -> Result<bool, ValueError> {
        mapping_equals(ORDERED, &self.content, ORDERED, &other.content)
    }
    fn equals_other_type(&self, other: &Value) -> Result<bool, ValueError> {
        equals_other_mapping(ORDERED, &self.content, other)
    }
    fn deep_copy(&self, copier: &mut DeepCopier) -> Result<FrozenDict<ORDERED>, ValueError> {
        Ok(FrozenDict {
            content: deep_copy_content(&self.content, copier)?,
        })
    }

    fn at(&self, index: Value) -> ValueResult {
        get(&self.content, index)
    }
    fn length(&self) -> Result<i64, ValueError> {
        Ok(self.content.len() as i64)
    }
    fn is_in(&self, other: &Value) -> Result<bool, ValueError> {
        Ok(self.content.contains_key(&HashedValue::new(other.clone())?))
    }
    fn iter(&self) -> Result<Vec<Value>, ValueError> {
        Ok(keys(&self.content))
    }

    fn method_effect(&self, name: &str) -> Option<MethodEffect> {
        read_only_effect(name)
    }
    fn call_method(&self, name: &str, args: Arguments) -> ValueResult {
        mapping_method(Self::TYPE, &self.content, name, args)
    }
    fn static_effects(&self) -> bool {
        true
    }
}
