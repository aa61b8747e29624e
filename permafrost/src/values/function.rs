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

//! Callables: call arguments, native functions and bound methods.

use crate::values::error::ValueError;
use crate::values::*;
use linked_hash_map::LinkedHashMap;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

/// Arguments of a call.
#[derive(Clone, Debug, Default)]
pub struct Arguments {
    pub positional: Vec<Value>,
    pub named: LinkedHashMap<String, Value>,
}

impl Arguments {
    pub fn new(positional: Vec<Value>) -> Arguments {
        Arguments {
            positional,
            named: LinkedHashMap::new(),
        }
    }

    /// No arguments at all.
    pub fn none() -> Arguments {
        Arguments::default()
    }

    pub fn with_named<V: Into<Value>>(mut self, name: &str, value: V) -> Arguments {
        self.named.insert(name.to_owned(), value.into());
        self
    }

    /// The parameter at position `index`, or passed by `name`.
    pub fn get(&self, index: usize, name: &str) -> Option<Value> {
        self.positional
            .get(index)
            .or_else(|| self.named.get(name))
            .cloned()
    }

    /// Like `get`, failing with `MissingParameter` when absent.
    pub fn required(&self, index: usize, name: &str) -> ValueResult {
        self.get(index, name)
            .ok_or_else(|| ValueError::MissingParameter(name.to_owned()))
    }

    /// Call-site style rendering: `("Bob", flag=True)`.
    pub fn to_repr(&self) -> String {
        let positional = self.positional.iter().map(Value::to_repr);
        let named = self
            .named
            .iter()
            .map(|(k, v)| format!("{}={}", k, v.to_repr()));
        format!("({})", positional.chain(named).collect::<Vec<_>>().join(", "))
    }
}

/// A native function.
///
/// Functions carry no state of their own, so they are immutable values and
/// are returned unchanged by `freeze`.
pub struct Function {
    name: String,
    body: Rc<dyn Fn(Arguments) -> ValueResult>,
}

impl Function {
    pub fn new<F>(name: &str, body: F) -> Value
    where
        F: Fn(Arguments) -> ValueResult + 'static,
    {
        Value::new(Function {
            name: name.to_owned(),
            body: Rc::new(body),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl TypedValue for Function {
    type Holder = Immutable<Function>;
    const TYPE: &'static str = "function";

    fn to_repr(&self) -> String {
        format!("<function {}>", self.name)
    }
    fn get_hash(&self) -> Result<u64, ValueError> {
        Ok(Rc::as_ptr(&self.body) as *const () as usize as u64)
    }
    fn equals(&self, other: &Function) -> Result<bool, ValueError> {
        Ok(Rc::ptr_eq(&self.body, &other.body))
    }
    fn deep_copy(&self, _copier: &mut DeepCopier) -> Result<Function, ValueError> {
        Ok(Function {
            name: self.name.clone(),
            body: self.body.clone(),
        })
    }
    fn call(&self, args: Arguments) -> ValueResult {
        (*self.body)(args)
    }
}

/// A method looked up on a value, bound to that value.
///
/// Calling it runs the method on the receiver it was looked up on.
pub struct BoundMethod {
    receiver: Value,
    name: String,
}

impl BoundMethod {
    pub fn new(receiver: Value, name: &str) -> Value {
        Value::new(BoundMethod {
            receiver,
            name: name.to_owned(),
        })
    }

    pub fn receiver(&self) -> &Value {
        &self.receiver
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl TypedValue for BoundMethod {
    type Holder = Immutable<BoundMethod>;
    const TYPE: &'static str = "method";

    fn to_repr(&self) -> String {
        format!(
            "<bound method {}.{} of {}>",
            self.receiver.get_type(),
            self.name,
            self.receiver.to_repr()
        )
    }
    fn get_hash(&self) -> Result<u64, ValueError> {
        let mut s = DefaultHasher::new();
        self.name.hash(&mut s);
        Ok(s.finish())
    }
    /// Same method of equal receivers.
    fn equals(&self, other: &BoundMethod) -> Result<bool, ValueError> {
        Ok(self.name == other.name && self.receiver.equals(&other.receiver)?)
    }
    fn deep_copy(&self, copier: &mut DeepCopier) -> Result<BoundMethod, ValueError> {
        Ok(BoundMethod {
            receiver: copier.copy(&self.receiver)?,
            name: self.name.clone(),
        })
    }
    fn call(&self, args: Arguments) -> ValueResult {
        self.receiver.invoke_method(&self.name, args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::values::list::List;

    #[test]
    fn arguments() {
        let args = Arguments::new(vec![Value::from("Bob")]).with_named("flag", true);
        assert_eq!("(\"Bob\", flag=True)", args.to_repr());
        assert!(args.get(1, "flag").unwrap() == Value::from(true));
        assert!(args.get(0, "name").unwrap() == Value::from("Bob"));
        assert_eq!(
            Err(ValueError::MissingParameter("other".to_owned())),
            args.required(2, "other").map(|_| ())
        );
        assert_eq!("()", Arguments::none().to_repr());
    }

    #[test]
    fn function_call() {
        let f = Function::new("double", |args| {
            Ok(Value::from(args.required(0, "x")?.to_int()? * 2))
        });
        assert_eq!("<function double>", f.to_repr());
        assert!(f.call(Arguments::new(vec![Value::from(21)])).unwrap() == Value::from(42));
        assert!(f == f.clone());
        assert!(f != Function::new("double", |_| Ok(Value::none())));
    }

    #[test]
    fn bound_method() {
        let l = List::new(vec![1]);
        let m = l.get_attr("append").unwrap();
        assert_eq!("<bound method list.append of [1]>", m.to_repr());
        assert!(m == l.get_attr("append").unwrap());
        assert!(m == List::new(vec![1]).get_attr("append").unwrap());
        assert!(m != List::new(vec![2]).get_attr("append").unwrap());
        assert!(m != l.get_attr("count").unwrap());
        let receiver = m.downcast_ref::<BoundMethod>().unwrap().receiver().clone();
        assert!(receiver.ptr_eq(&l));
    }
}
