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

//! Define the None type.

use crate::values::*;

/// Define the NoneType type
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoneType {
    None,
}

impl TypedValue for NoneType {
    type Holder = Immutable<NoneType>;
    const TYPE: &'static str = "NoneType";

    fn new_value(self) -> Value {
        Value(ValueInner::None(ValueHolder::new(self)))
    }

    fn to_repr(&self) -> String {
        "None".to_owned()
    }
    fn to_bool(&self) -> bool {
        false
    }
    // just took the result of hash(None) in macos python 2.7.10 interpreter.
    fn get_hash(&self) -> Result<u64, ValueError> {
        Ok(9_223_380_832_852_120_682)
    }
    fn equals(&self, _other: &NoneType) -> Result<bool, ValueError> {
        Ok(true)
    }
    fn deep_copy(&self, _copier: &mut DeepCopier) -> Result<NoneType, ValueError> {
        Ok(NoneType::None)
    }
}

impl From<NoneType> for Value {
    fn from(NoneType::None: NoneType) -> Self {
        Value::new(NoneType::None)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(option: Option<T>) -> Self {
        match option {
            Some(v) => v.into(),
            None => Value::none(),
        }
    }
}
