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

//! Define the string type.

use crate::values::error::ValueError;
use crate::values::function::Arguments;
use crate::values::*;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

impl From<String> for Value {
    fn from(a: String) -> Value {
        Value::new(a)
    }
}

impl<'a> From<&'a str> for Value {
    fn from(a: &'a str) -> Value {
        Value::new(a.to_owned())
    }
}

impl TypedValue for String {
    type Holder = Immutable<String>;
    const TYPE: &'static str = "string";

    fn to_str(&self) -> String {
        self.clone()
    }
    fn to_repr(&self) -> String {
        format!(
            "\"{}\"",
            self.chars()
                .map(|x| -> String { x.escape_debug().collect() })
                .fold("".to_string(), |accum, s| accum + &s)
        )
    }
    fn to_bool(&self) -> bool {
        !self.is_empty()
    }
    fn get_hash(&self) -> Result<u64, ValueError> {
        let mut s = DefaultHasher::new();
        self.hash(&mut s);
        Ok(s.finish())
    }
    fn equals(&self, other: &String) -> Result<bool, ValueError> {
        Ok(*self == *other)
    }
    fn deep_copy(&self, _copier: &mut DeepCopier) -> Result<String, ValueError> {
        Ok(self.clone())
    }

    fn at(&self, index: Value) -> ValueResult {
        let i = index.convert_index(self.chars().count() as i64)? as usize;
        match self.chars().nth(i) {
            Some(c) => Ok(Value::new(c.to_string())),
            None => Err(ValueError::IndexOutOfBound(i as i64)),
        }
    }
    fn length(&self) -> Result<i64, ValueError> {
        Ok(self.chars().count() as i64)
    }
    fn is_in(&self, other: &Value) -> Result<bool, ValueError> {
        match other.downcast_ref::<String>() {
            Some(needle) => Ok(self.contains(needle.as_str())),
            None => Err(ValueError::IncorrectParameterType),
        }
    }
    fn iter(&self) -> Result<Vec<Value>, ValueError> {
        Ok(self.chars().map(|c| Value::new(c.to_string())).collect())
    }

    fn method_effect(&self, name: &str) -> Option<MethodEffect> {
        match name {
            "upper" | "lower" | "startswith" => Some(MethodEffect::ReadOnly),
            _ => None,
        }
    }
    fn call_method(&self, name: &str, args: Arguments) -> ValueResult {
        match name {
            "upper" => Ok(Value::new(self.to_uppercase())),
            "lower" => Ok(Value::new(self.to_lowercase())),
            "startswith" => {
                let prefix = args.required(0, "prefix")?;
                let starts = match prefix.downcast_ref::<String>() {
                    Some(prefix) => self.starts_with(prefix.as_str()),
                    None => return Err(ValueError::IncorrectParameterType),
                };
                Ok(Value::new(starts))
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
