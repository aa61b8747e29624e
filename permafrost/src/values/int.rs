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

//! Define the int type.

use crate::values::*;

macro_rules! from_int {
    ($x: ty, $y: tt) => {
        impl From<$x> for Value {
            fn from(a: $x) -> Value {
                #[allow(clippy::cast_lossless)]
                Value::new(a as $y)
            }
        }
    };
}

from_int!(i8, i64);
from_int!(i16, i64);
from_int!(i32, i64);
from_int!(u8, i64);
from_int!(u16, i64);
from_int!(u32, i64);
from_int!(usize, i64);

impl From<i64> for Value {
    fn from(a: i64) -> Value {
        Value::new(a)
    }
}

/// Define the int type
impl TypedValue for i64 {
    type Holder = Immutable<i64>;
    const TYPE: &'static str = "int";

    fn new_value(self) -> Value {
        Value(ValueInner::Int(ValueHolder::new(self)))
    }

    fn to_repr(&self) -> String {
        format!("{}", self)
    }
    fn to_int(&self) -> Result<i64, ValueError> {
        Ok(*self)
    }
    fn to_bool(&self) -> bool {
        *self != 0
    }
    fn get_hash(&self) -> Result<u64, ValueError> {
        Ok(*self as u64)
    }
    fn equals(&self, other: &i64) -> Result<bool, ValueError> {
        Ok(self == other)
    }
    fn deep_copy(&self, _copier: &mut DeepCopier) -> Result<i64, ValueError> {
        Ok(*self)
    }
}

impl Value {
    /// Resolve a possibly negative index into a sequence of `len` elements.
    pub fn convert_index(&self, len: i64) -> Result<i64, ValueError> {
        match self.get_type() {
            "int" | "bool" => {
                let i = self.to_int()?;
                let i = if i < 0 { len + i } else { i };
                if i < 0 || i >= len {
                    Err(ValueError::IndexOutOfBound(i))
                } else {
                    Ok(i)
                }
            }
            _ => Err(ValueError::IncorrectParameterType),
        }
    }
}
