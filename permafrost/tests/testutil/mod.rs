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

//! Object types shared by the integration tests.
#![allow(dead_code, unused_macros)]

use permafrost::values::error::ValueError;
use permafrost::values::function::Arguments;
use permafrost::values::list::List;
use permafrost::values::{
    DeepCopier, Immutable, MethodEffect, Mutable, TypedValue, Value, ValueResult,
};
use std::cell::Cell;

/// Assert that `$e` failed with a freeze error.
macro_rules! assert_freeze_error {
    ($e:expr) => {
        match $e {
            Err(e) => assert!(e.is_freeze_error(), "not a freeze error: {}", e),
            Ok(v) => panic!("expected a freeze error, got {:?}", v),
        }
    };
}

/// Assert that `$e` failed with error code `$code`.
macro_rules! assert_error_code {
    ($code:expr, $e:expr) => {
        match $e {
            Err(e) => assert_eq!($code, e.code(), "unexpected error: {}", e),
            Ok(v) => panic!("expected error {}, got {:?}", $code, v),
        }
    };
}

fn no_attribute(type_name: &str, attribute: &str) -> ValueError {
    ValueError::OperationNotSupported {
        op: format!(".{}", attribute),
        left: type_name.to_owned(),
        right: None,
    }
}

fn string_argument(args: &Arguments, index: usize, name: &str) -> Result<String, ValueError> {
    let v = args.required(index, name)?;
    if v.get_type() == "string" {
        Ok(v.to_str())
    } else {
        Err(ValueError::IncorrectParameterType)
    }
}

/// A person with a name and a list of nicknames.
///
/// `add_nickname` is declared read-only but appends to the nickname list,
/// which the person only holds a reference to.
pub struct Person {
    pub name: String,
    pub nicknames: Value,
}

impl Person {
    pub fn new(name: &str) -> Value {
        Value::new(Person {
            name: name.to_owned(),
            nicknames: List::new(Vec::<Value>::new()),
        })
    }
}

impl TypedValue for Person {
    type Holder = Mutable<Person>;
    const TYPE: &'static str = "Person";

    fn to_repr(&self) -> String {
        format!("Person({})", self.name)
    }
    fn equals(&self, other: &Person) -> Result<bool, ValueError> {
        Ok(self.name == other.name && self.nicknames.equals(&other.nicknames)?)
    }
    fn deep_copy(&self, copier: &mut DeepCopier) -> Result<Person, ValueError> {
        Ok(Person {
            name: self.name.clone(),
            nicknames: copier.copy(&self.nicknames)?,
        })
    }
    fn get_attr(&self, attribute: &str) -> ValueResult {
        match attribute {
            "name" => Ok(Value::from(self.name.as_str())),
            "nicknames" => Ok(self.nicknames.clone()),
            _ => Err(no_attribute(Self::TYPE, attribute)),
        }
    }
    fn has_attr(&self, attribute: &str) -> Result<bool, ValueError> {
        Ok(attribute == "name" || attribute == "nicknames")
    }
    fn set_attr(&mut self, attribute: &str, new_value: Value) -> Result<(), ValueError> {
        match attribute {
            "name" => {
                self.name = new_value.to_str();
                Ok(())
            }
            "nicknames" => {
                self.nicknames = new_value;
                Ok(())
            }
            _ => Err(no_attribute(Self::TYPE, attribute)),
        }
    }
    fn dir_attr(&self) -> Result<Vec<String>, ValueError> {
        Ok(vec!["name".to_owned(), "nicknames".to_owned()])
    }
    fn method_effect(&self, name: &str) -> Option<MethodEffect> {
        match name {
            "greet" | "add_nickname" => Some(MethodEffect::ReadOnly),
            "set_name" => Some(MethodEffect::Mutating),
            _ => None,
        }
    }
    fn call_method(&self, name: &str, args: Arguments) -> ValueResult {
        match name {
            "greet" => Ok(Value::from(format!("Hello, I am {}", self.name))),
            _ => {
                let nickname = args.required(0, "nickname")?;
                self.nicknames.call_method("append", Arguments::new(vec![nickname]))
            }
        }
    }
    fn call_method_mut(&mut self, _name: &str, args: Arguments) -> ValueResult {
        self.name = string_argument(&args, 0, "name")?;
        Ok(Value::none())
    }
}

/// A pet with a breed and a name, both settable through methods.
#[derive(Clone)]
pub struct Pet {
    pub breed: String,
    pub name: String,
}

impl Pet {
    pub fn new(breed: &str, name: &str) -> Value {
        Value::new(Pet {
            breed: breed.to_owned(),
            name: name.to_owned(),
        })
    }
}

impl TypedValue for Pet {
    type Holder = Mutable<Pet>;
    const TYPE: &'static str = "Pet";

    fn to_repr(&self) -> String {
        format!("Pet({}, {})", self.breed, self.name)
    }
    fn equals(&self, other: &Pet) -> Result<bool, ValueError> {
        Ok(self.breed == other.breed && self.name == other.name)
    }
    fn deep_copy(&self, _copier: &mut DeepCopier) -> Result<Pet, ValueError> {
        Ok(self.clone())
    }
    fn get_attr(&self, attribute: &str) -> ValueResult {
        match attribute {
            "breed" => Ok(Value::from(self.breed.as_str())),
            "name" => Ok(Value::from(self.name.as_str())),
            _ => Err(no_attribute(Self::TYPE, attribute)),
        }
    }
    fn method_effect(&self, name: &str) -> Option<MethodEffect> {
        match name {
            "set_breed" | "set_name" => Some(MethodEffect::Mutating),
            _ => None,
        }
    }
    fn call_method_mut(&mut self, name: &str, args: Arguments) -> ValueResult {
        match name {
            "set_breed" => self.breed = string_argument(&args, 0, "breed")?,
            _ => self.name = string_argument(&args, 0, "name")?,
        }
        Ok(Value::none())
    }
}

/// A callable counting its calls.
///
/// Its effects are declared truthfully, so it vouches for them.
#[derive(Clone)]
pub struct Counter {
    pub count: Cell<i64>,
}

impl Counter {
    pub fn new(count: i64) -> Value {
        Value::new(Counter {
            count: Cell::new(count),
        })
    }
}

impl TypedValue for Counter {
    type Holder = Mutable<Counter>;
    const TYPE: &'static str = "Counter";

    fn to_repr(&self) -> String {
        format!("Counter({})", self.count.get())
    }
    fn equals(&self, other: &Counter) -> Result<bool, ValueError> {
        Ok(self.count.get() == other.count.get())
    }
    fn deep_copy(&self, _copier: &mut DeepCopier) -> Result<Counter, ValueError> {
        Ok(self.clone())
    }
    fn call(&self, _args: Arguments) -> ValueResult {
        self.count.set(self.count.get() + 1);
        Ok(Value::from(self.count.get()))
    }
    fn method_effect(&self, name: &str) -> Option<MethodEffect> {
        match name {
            "get" => Some(MethodEffect::ReadOnly),
            "increment" | "increment_then_fail" => Some(MethodEffect::Mutating),
            _ => None,
        }
    }
    fn call_method(&self, _name: &str, _args: Arguments) -> ValueResult {
        Ok(Value::from(self.count.get()))
    }
    fn call_method_mut(&mut self, name: &str, _args: Arguments) -> ValueResult {
        self.count.set(self.count.get() + 1);
        match name {
            "increment" => Ok(Value::from(self.count.get())),
            _ => Err(ValueError::IncorrectParameterType),
        }
    }
    fn static_effects(&self) -> bool {
        true
    }
}

/// A timestamp whose `replace` returns a new timestamp.
#[derive(Clone)]
pub struct Timestamp {
    pub seconds: i64,
    pub zone: String,
}

impl Timestamp {
    pub fn new(seconds: i64, zone: &str) -> Value {
        Value::new(Timestamp {
            seconds,
            zone: zone.to_owned(),
        })
    }
}

impl TypedValue for Timestamp {
    type Holder = Mutable<Timestamp>;
    const TYPE: &'static str = "Timestamp";

    fn to_repr(&self) -> String {
        format!("Timestamp({}, {})", self.seconds, self.zone)
    }
    fn equals(&self, other: &Timestamp) -> Result<bool, ValueError> {
        Ok(self.seconds == other.seconds && self.zone == other.zone)
    }
    fn deep_copy(&self, _copier: &mut DeepCopier) -> Result<Timestamp, ValueError> {
        Ok(self.clone())
    }
    fn method_effect(&self, name: &str) -> Option<MethodEffect> {
        match name {
            "replace" => Some(MethodEffect::ReadOnly),
            _ => None,
        }
    }
    fn call_method(&self, _name: &str, args: Arguments) -> ValueResult {
        let zone = match args.get(0, "zone") {
            Some(zone) => zone.to_str(),
            None => self.zone.clone(),
        };
        Ok(Timestamp::new(self.seconds, &zone))
    }
}

/// An object with no value equality: copies are never equal to it.
#[derive(Clone)]
pub struct Opaque;

impl TypedValue for Opaque {
    type Holder = Mutable<Opaque>;
    const TYPE: &'static str = "Opaque";

    fn deep_copy(&self, _copier: &mut DeepCopier) -> Result<Opaque, ValueError> {
        Ok(Opaque)
    }
    fn method_effect(&self, name: &str) -> Option<MethodEffect> {
        match name {
            "peek" => Some(MethodEffect::ReadOnly),
            _ => None,
        }
    }
    fn call_method(&self, _name: &str, _args: Arguments) -> ValueResult {
        Ok(Value::none())
    }
}

/// An object that can't be copied.
pub struct Socket;

impl TypedValue for Socket {
    type Holder = Immutable<Socket>;
    const TYPE: &'static str = "Socket";

    fn method_effect(&self, name: &str) -> Option<MethodEffect> {
        match name {
            "peer" => Some(MethodEffect::ReadOnly),
            _ => None,
        }
    }
    fn call_method(&self, _name: &str, _args: Arguments) -> ValueResult {
        Ok(Value::from("127.0.0.1"))
    }
}
