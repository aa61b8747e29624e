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

//! Define the tuple type.

use crate::values::error::ValueError;
use crate::values::function::Arguments;
use crate::values::list::List;
use crate::values::*;
use std::collections::hash_map::DefaultHasher;
use std::hash::Hasher;

/// A fixed size sequence of values.
///
/// The tuple itself never changes, but it may hold mutable values.
#[derive(Clone, Debug)]
pub struct Tuple {
    content: Vec<Value>,
}

impl Tuple {
    pub fn new(values: Vec<Value>) -> Value {
        Value::new(Tuple { content: values })
    }

    pub fn content(&self) -> &[Value] {
        &self.content
    }
}

impl From<Vec<Value>> for Tuple {
    fn from(content: Vec<Value>) -> Tuple {
        Tuple { content }
    }
}

/// Format `(a, b)` style sequences, with a trailing comma for one element
/// when `singleton_comma` is set.
pub(crate) fn repr_sequence(
    open: &str,
    content: &[Value],
    singleton_comma: bool,
    close: &str,
) -> String {
    format!(
        "{}{}{}{}",
        open,
        content
            .iter()
            .map(Value::to_repr)
            .collect::<Vec<_>>()
            .join(", "),
        if singleton_comma && content.len() == 1 {
            ","
        } else {
            ""
        },
        close
    )
}

/// Element-wise equality of two sequences.
pub(crate) fn sequence_equals(a: &[Value], b: &[Value]) -> Result<bool, ValueError> {
    if a.len() != b.len() {
        return Ok(false);
    }
    for (x, y) in a.iter().zip(b.iter()) {
        if !x.equals(y)? {
            return Ok(false);
        }
    }
    Ok(true)
}

/// `index` and `count`, shared by tuples and lists.
pub(crate) fn sequence_method(
    type_name: &str,
    content: &[Value],
    name: &str,
    args: Arguments,
) -> ValueResult {
    match name {
        "index" => {
            let needle = args.required(0, "value")?;
            for (i, v) in content.iter().enumerate() {
                if v.equals(&needle)? {
                    return Ok(Value::from(i));
                }
            }
            Err(ValueError::KeyNotFound(needle))
        }
        "count" => {
            let needle = args.required(0, "value")?;
            let mut count = 0i64;
            for v in content {
                if v.equals(&needle)? {
                    count += 1;
                }
            }
            Ok(Value::from(count))
        }
        _ => Err(ValueError::OperationNotSupported {
            op: format!(".{}()", name),
            left: type_name.to_owned(),
            right: None,
        }),
    }
}

impl TypedValue for Tuple {
    type Holder = Immutable<Tuple>;
    const TYPE: &'static str = "tuple";

    fn to_repr(&self) -> String {
        repr_sequence("(", &self.content, true, ")")
    }
    fn to_bool(&self) -> bool {
        !self.content.is_empty()
    }
    fn get_hash(&self) -> Result<u64, ValueError> {
        let mut s = DefaultHasher::new();
        for v in self.content.iter() {
            s.write_u64(v.get_hash()?)
        }
        Ok(s.finish())
    }
    fn equals(&self, other: &Tuple) -> Result<bool, ValueError> {
        sequence_equals(&self.content, &other.content)
    }
    /// A tuple equals a list with equal elements, so frozen containers
    /// compare equal to the containers they were frozen from.
    fn equals_other_type(&self, other: &Value) -> Result<bool, ValueError> {
        match other.downcast_ref::<List>() {
            Some(other) => sequence_equals(&self.content, other.content()),
            None => Ok(false),
        }
    }
    fn deep_copy(&self, copier: &mut DeepCopier) -> Result<Tuple, ValueError> {
        Ok(Tuple {
            content: copier.copy_all(&self.content)?,
        })
    }

    fn at(&self, index: Value) -> ValueResult {
        let i = index.convert_index(self.length()?)? as usize;
        Ok(self.content[i].clone())
    }
    fn length(&self) -> Result<i64, ValueError> {
        Ok(self.content.len() as i64)
    }
    fn is_in(&self, other: &Value) -> Result<bool, ValueError> {
        for x in self.content.iter() {
            if x.equals(other)? {
                return Ok(true);
            }
        }
        Ok(false)
    }
    fn iter(&self) -> Result<Vec<Value>, ValueError> {
        Ok(self.content.clone())
    }

    fn method_effect(&self, name: &str) -> Option<MethodEffect> {
        match name {
            "index" | "count" => Some(MethodEffect::ReadOnly),
            _ => None,
        }
    }
    fn call_method(&self, name: &str, args: Arguments) -> ValueResult {
        sequence_method(Self::TYPE, &self.content, name, args)
    }
    fn static_effects(&self) -> bool {
        true
    }
}

impl From<()> for Value {
    fn from(_a: ()) -> Value {
        Tuple::new(Vec::new())
    }
}

macro_rules! from_tuple {
    ($($name:ident : $t:ident),+) => {
        impl<$($t: Into<Value>),+> From<($($t,)+)> for Value {
            fn from(($($name,)+): ($($t,)+)) -> Value {
                Tuple::new(vec![$($name.into()),+])
            }
        }
    };
}

from_tuple!(a: T1);
from_tuple!(a: T1, b: T2);
from_tuple!(a: T1, b: T2, c: T3);
from_tuple!(a: T1, b: T2, c: T3, d: T4);
from_tuple!(a: T1, b: T2, c: T3, d: T4, e: T5);
