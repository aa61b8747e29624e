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

//! Define the bytes type.

use crate::values::*;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// An immutable byte string.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Bytes(pub Vec<u8>);

impl From<Vec<u8>> for Bytes {
    fn from(b: Vec<u8>) -> Bytes {
        Bytes(b)
    }
}

impl<'a> From<&'a [u8]> for Value {
    fn from(b: &'a [u8]) -> Value {
        Value::new(Bytes(b.to_vec()))
    }
}

impl TypedValue for Bytes {
    type Holder = Immutable<Bytes>;
    const TYPE: &'static str = "bytes";

    fn to_repr(&self) -> String {
        let escaped: String = self
            .0
            .iter()
            .flat_map(|b| std::ascii::escape_default(*b))
            .map(char::from)
            .collect();
        format!("b\"{}\"", escaped)
    }
    fn to_bool(&self) -> bool {
        !self.0.is_empty()
    }
    fn get_hash(&self) -> Result<u64, ValueError> {
        let mut s = DefaultHasher::new();
        self.0.hash(&mut s);
        Ok(s.finish())
    }
    fn equals(&self, other: &Bytes) -> Result<bool, ValueError> {
        Ok(self == other)
    }
    fn deep_copy(&self, _copier: &mut DeepCopier) -> Result<Bytes, ValueError> {
        Ok(self.clone())
    }
    fn at(&self, index: Value) -> ValueResult {
        let i = index.convert_index(self.0.len() as i64)?;
        Ok(Value::from(self.0[i as usize]))
    }
    fn length(&self) -> Result<i64, ValueError> {
        Ok(self.0.len() as i64)
    }
    fn iter(&self) -> Result<Vec<Value>, ValueError> {
        Ok(self.0.iter().map(|b| Value::from(*b)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes() {
        let b = Value::from(&b"a\n"[..]);
        assert_eq!("b\"a\\n\"", b.to_repr());
        assert!(b.at(Value::from(-1)).unwrap() == Value::from(10));
        assert!(b.get_hash().is_ok());
    }
}
