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

//! Define the float and complex types.

use crate::values::*;

impl From<f64> for Value {
    fn from(f: f64) -> Value {
        Value::new(f)
    }
}

impl From<f32> for Value {
    fn from(f: f32) -> Value {
        Value::new(f64::from(f))
    }
}

impl TypedValue for f64 {
    type Holder = Immutable<f64>;
    const TYPE: &'static str = "float";

    fn to_repr(&self) -> String {
        format!("{:?}", self)
    }
    fn to_bool(&self) -> bool {
        *self != 0.0
    }
    fn get_hash(&self) -> Result<u64, ValueError> {
        // 0.0 and -0.0 are equal, so they must hash the same.
        if *self == 0.0 {
            Ok(0)
        } else {
            Ok(self.to_bits())
        }
    }
    fn equals(&self, other: &f64) -> Result<bool, ValueError> {
        Ok(self == other)
    }
    fn deep_copy(&self, _copier: &mut DeepCopier) -> Result<f64, ValueError> {
        Ok(*self)
    }
}

/// A complex number.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Complex {
    pub re: f64,
    pub im: f64,
}

impl Complex {
    pub fn new(re: f64, im: f64) -> Value {
        Value::new(Complex { re, im })
    }
}

impl TypedValue for Complex {
    type Holder = Immutable<Complex>;
    const TYPE: &'static str = "complex";

    fn to_repr(&self) -> String {
        if self.re == 0.0 {
            format!("{}j", self.im)
        } else if self.im < 0.0 {
            format!("({}{}j)", self.re, self.im)
        } else {
            format!("({}+{}j)", self.re, self.im)
        }
    }
    fn to_bool(&self) -> bool {
        self.re != 0.0 || self.im != 0.0
    }
    fn get_hash(&self) -> Result<u64, ValueError> {
        let re = Value::from(self.re).get_hash()?;
        let im = Value::from(self.im).get_hash()?;
        Ok(re ^ im.rotate_left(17))
    }
    fn equals(&self, other: &Complex) -> Result<bool, ValueError> {
        Ok(self == other)
    }
    fn get_attr(&self, attribute: &str) -> ValueResult {
        match attribute {
            "real" => Ok(Value::from(self.re)),
            "imag" => Ok(Value::from(self.im)),
            _ => Err(ValueError::OperationNotSupported {
                op: format!(".{}", attribute),
                left: Self::TYPE.to_owned(),
                right: None,
            }),
        }
    }
    fn has_attr(&self, attribute: &str) -> Result<bool, ValueError> {
        Ok(attribute == "real" || attribute == "imag")
    }
    fn dir_attr(&self) -> Result<Vec<String>, ValueError> {
        Ok(vec!["imag".to_owned(), "real".to_owned()])
    }
    fn deep_copy(&self, _copier: &mut DeepCopier) -> Result<Complex, ValueError> {
        Ok(*self)
    }
}
