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

//! Define the list type.

use crate::values::error::ValueError;
use crate::values::function::Arguments;
use crate::values::recursion;
use crate::values::tuple::{repr_sequence, sequence_equals, sequence_method, Tuple};
use crate::values::*;

/// A growable sequence of values.
#[derive(Clone, Default, Debug)]
pub struct List {
    content: Vec<Value>,
}

impl List {
    pub fn new<V: Into<Value>>(values: Vec<V>) -> Value {
        Value::new(List {
            content: values.into_iter().map(Into::into).collect(),
        })
    }

    pub fn push(&mut self, value: Value) {
        self.content.push(value);
    }

    pub fn content(&self) -> &[Value] {
        &self.content
    }

    fn is_self(&self, value: &Value) -> bool {
        !value.is_inline() && value.data_ptr() == DataPtr::from(self)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(a: Vec<T>) -> Value {
        List::new(a)
    }
}

impl TypedValue for List {
    type Holder = Mutable<List>;
    const TYPE: &'static str = "list";

    fn to_repr(&self) -> String {
        match recursion::enter_repr(DataPtr::from(self)) {
            Some(_guard) => repr_sequence("[", &self.content, false, "]"),
            None => "[...]".to_owned(),
        }
    }
    fn to_bool(&self) -> bool {
        !self.content.is_empty()
    }
    fn equals(&self, other: &List) -> Result<bool, ValueError> {
        sequence_equals(&self.content, &other.content)
    }
    fn equals_other_type(&self, other: &Value) -> Result<bool, ValueError> {
        match other.downcast_ref::<Tuple>() {
            Some(other) => sequence_equals(&self.content, other.content()),
            None => Ok(false),
        }
    }
    fn deep_copy(&self, copier: &mut DeepCopier) -> Result<List, ValueError> {
        Ok(List {
            content: copier.copy_all(&self.content)?,
        })
    }

    fn at(&self, index: Value) -> ValueResult {
        let i = index.convert_index(self.length()?)? as usize;
        Ok(self.content[i].clone())
    }
    fn set_at(&mut self, index: Value, new_value: Value) -> Result<(), ValueError> {
        let i = index.convert_index(self.length()?)? as usize;
        self.content[i] = new_value;
        Ok(())
    }
    fn del_at(&mut self, index: Value) -> Result<(), ValueError> {
        let i = index.convert_index(self.length()?)? as usize;
        self.content.remove(i);
        Ok(())
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
            "append" | "extend" | "insert" | "pop" | "remove" | "clear" => {
                Some(MethodEffect::Mutating)
            }
            _ => None,
        }
    }
    fn call_method(&self, name: &str, args: Arguments) -> ValueResult {
        sequence_method(Self::TYPE, &self.content, name, args)
    }
    fn call_method_mut(&mut self, name: &str, args: Arguments) -> ValueResult {
        match name {
            "append" => {
                self.content.push(args.required(0, "value")?);
                Ok(Value::none())
            }
            "extend" => {
                let other = args.required(0, "iterable")?;
                let values = if self.is_self(&other) {
                    self.content.clone()
                } else {
                    other.iter()?
                };
                self.content.extend(values);
                Ok(Value::none())
            }
            "insert" => {
                let len = self.length()?;
                let index = args.required(0, "index")?.to_int()?;
                let index = if index < 0 { len + index } else { index };
                let index = index.max(0).min(len) as usize;
                self.content.insert(index, args.required(1, "value")?);
                Ok(Value::none())
            }
            "pop" => {
                let index = args.get(0, "index").unwrap_or_else(|| Value::from(-1));
                let i = index.convert_index(self.length()?)? as usize;
                Ok(self.content.remove(i))
            }
            "remove" => {
                let needle = args.required(0, "value")?;
                for i in 0..self.content.len() {
                    if self.content[i].equals(&needle)? {
                        self.content.remove(i);
                        return Ok(Value::none());
                    }
                }
                Err(ValueError::KeyNotFound(needle))
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

#[cfg(test)]
mod tests {
    use super::*;

    fn call(l: &Value, name: &str, args: Vec<Value>) -> ValueResult {
        l.call_method(name, Arguments::new(args))
    }

    #[test]
    fn test_to_repr() {
        assert_eq!("[1, 2, 3]", List::new(vec![1, 2, 3]).to_repr());
        assert_eq!("[1, [2, 3]]", Value::from(vec![Value::from(1), List::new(vec![2, 3])]).to_repr());
        assert_eq!("[]", List::new(Vec::<Value>::new()).to_repr());
    }

    #[test]
    fn cyclic_repr() {
        let l = List::new(vec![1]);
        call(&l, "append", vec![l.clone()]).unwrap();
        assert_eq!("[1, [...]]", l.to_repr());
    }

    #[test]
    fn test_mutate_list() {
        let v = List::new(vec![1, 2, 3]);
        v.set_at(Value::from(1), Value::from(1)).unwrap();
        v.set_at(Value::from(2), List::new(vec![2, 3])).unwrap();
        assert_eq!("[1, 1, [2, 3]]", v.to_repr());
        v.del_at(Value::from(0)).unwrap();
        assert_eq!("[1, [2, 3]]", v.to_repr());
        assert_eq!(
            Err(ValueError::IndexOutOfBound(5)),
            v.set_at(Value::from(5), Value::none())
        );
    }

    #[test]
    fn methods() {
        let l = List::new(vec![1, 2]);
        call(&l, "extend", vec![List::new(vec![3])]).unwrap();
        call(&l, "insert", vec![Value::from(0), Value::from(0)]).unwrap();
        assert_eq!("[0, 1, 2, 3]", l.to_repr());
        assert!(call(&l, "pop", vec![]).unwrap() == Value::from(3));
        call(&l, "remove", vec![Value::from(1)]).unwrap();
        assert_eq!("[0, 2]", l.to_repr());
        call(&l, "extend", vec![l.clone()]).unwrap();
        assert_eq!("[0, 2, 0, 2]", l.to_repr());
        assert!(call(&l, "count", vec![Value::from(2)]).unwrap() == Value::from(2));
        assert_eq!(
            Err(ValueError::KeyNotFound(Value::from(7))),
            call(&l, "remove", vec![Value::from(7)]).map(|_| ())
        );
        call(&l, "clear", vec![]).unwrap();
        assert_eq!(0, l.length().unwrap());
    }

    #[test]
    fn list_as_argument_to_itself() {
        let l = List::new(vec![1]);
        assert_eq!(
            Err(ValueError::KeyNotFound(l.clone())),
            call(&l, "remove", vec![l.clone()]).map(|_| ())
        );
        assert_eq!(
            Err(ValueError::IncorrectParameterType),
            call(&l, "insert", vec![l.clone(), Value::from(0)]).map(|_| ())
        );
        assert_eq!(
            Err(ValueError::IncorrectParameterType),
            call(&l, "pop", vec![l.clone()]).map(|_| ())
        );
        assert_eq!(
            Err(ValueError::IncorrectParameterType),
            l.set_at(l.clone(), Value::from(2))
        );
        assert_eq!(Err(ValueError::IncorrectParameterType), l.del_at(l.clone()));
        assert_eq!("[1]", l.to_repr());

        call(&l, "append", vec![l.clone()]).unwrap();
        call(&l, "remove", vec![l.clone()]).unwrap();
        assert_eq!("[1]", l.to_repr());
    }

    #[test]
    fn equals_tuple() {
        let l = List::new(vec![1, 2]);
        assert!(l == Value::from((1, 2)));
        assert!(l != Value::from((2, 1)));
    }

    #[test]
    fn lists_are_not_hashable() {
        assert_eq!(Err(ValueError::NotHashableValue), List::new(vec![1]).get_hash());
    }
}
