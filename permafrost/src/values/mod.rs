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

//! The values module defines the trait `TypedValue`, which describes what a
//! type must provide to be stored in a [`Value`], and `Value` itself: a cheap
//! to clone, reference counted handle over any `TypedValue`.
//!
//! Cloning a `Value` aliases it, exactly like passing an object reference
//! around in a dynamic language. A type is either immutable
//! (`Holder = Immutable<Self>`) or mutable (`Holder = Mutable<Self>`, with
//! its content kept in a `RefCell`).
//!
//! Built-in scalars and containers live in the submodules. Composite objects
//! of the embedding program opt in by implementing `TypedValue`: they expose
//! attributes through `get_attr`/`set_attr`, methods through `method_effect`
//! and `call_method`/`call_method_mut`, value equality through `equals`, and
//! graph copies through `deep_copy`. Those are the hooks the [`freeze`]
//! machinery relies on.
//!
//! # Defining a new type
//!
//! ```rust
//! # use permafrost::values::*;
//! # use permafrost::values::error::ValueError;
//! # use permafrost::values::function::Arguments;
//! #[derive(Clone, PartialEq)]
//! struct Person {
//!     name: String,
//! }
//!
//! impl TypedValue for Person {
//!     type Holder = Mutable<Person>;
//!     const TYPE: &'static str = "Person";
//!
//!     fn to_repr(&self) -> String {
//!         format!("Person({})", self.name)
//!     }
//!     fn equals(&self, other: &Person) -> Result<bool, ValueError> {
//!         Ok(self == other)
//!     }
//!     fn deep_copy(&self, _copier: &mut DeepCopier) -> Result<Person, ValueError> {
//!         Ok(self.clone())
//!     }
//!     fn get_attr(&self, attribute: &str) -> ValueResult {
//!         match attribute {
//!             "name" => Ok(Value::from(self.name.as_str())),
//!             _ => Err(ValueError::OperationNotSupported {
//!                 op: format!(".{}", attribute),
//!                 left: Self::TYPE.to_owned(),
//!                 right: None,
//!             }),
//!         }
//!     }
//!     fn method_effect(&self, name: &str) -> Option<MethodEffect> {
//!         match name {
//!             "set_name" => Some(MethodEffect::Mutating),
//!             _ => None,
//!         }
//!     }
//!     fn call_method_mut(&mut self, _name: &str, args: Arguments) -> ValueResult {
//!         self.name = args.required(0, "name")?.to_str();
//!         Ok(Value::none())
//!     }
//! }
//!
//! let alice = Value::new(Person { name: "Alice".to_owned() });
//! alice.call_method("set_name", Arguments::new(vec![Value::from("Bob")])).unwrap();
//! assert_eq!("Person(Bob)", alice.to_repr());
//! ```
//!
//! [`freeze`]: crate::freeze

use crate::freeze::FrozenHandle;
use crate::values::cell::{ContentCell, ContentRef, FixedCell};
use crate::values::error::Write;
use crate::values::function::{Arguments, BoundMethod};
use crate::values::none::NoneType;
use std::any::{Any, TypeId};
use std::cell::{RefCell, RefMut};
use std::fmt;
use std::marker;
use std::rc::Rc;

/// ValueInner wraps the actual value or a memory pointer
/// to the actual value for complex type.
#[derive(Clone)]
enum ValueInner {
    None(ValueHolder<NoneType>),
    Bool(ValueHolder<bool>),
    Int(ValueHolder<i64>),
    Other(Rc<dyn ValueHolderDyn>),
}

/// A dynamically typed value.
///
/// This is a wrapper around a [TypedValue] which is cheap to clone and safe to pass around.
#[derive(Clone)]
pub struct Value(ValueInner);

pub type ValueResult = Result<Value, ValueError>;

impl Value {
    /// Create a new `Value` from a static value.
    pub fn new<T: TypedValue>(t: T) -> Value {
        t.new_value()
    }

    pub fn none() -> Value {
        Value::new(NoneType::None)
    }

    fn value_holder(&self) -> &(dyn ValueHolderDyn + 'static) {
        match &self.0 {
            ValueInner::None(n) => n,
            ValueInner::Int(i) => i,
            ValueInner::Bool(b) => b,
            ValueInner::Other(rc) => &**rc,
        }
    }

    /// Object data pointer.
    pub fn data_ptr(&self) -> DataPtr {
        self.value_holder().data_ptr()
    }

    /// Whether both values are the same object (not merely equal).
    ///
    /// Small scalars are stored inline and never share identity.
    pub fn ptr_eq(&self, other: &Value) -> bool {
        !self.is_inline() && self.data_ptr() == other.data_ptr()
    }

    pub(crate) fn is_inline(&self) -> bool {
        !matches!(self.0, ValueInner::Other(..))
    }

    /// `TypeId` of the `TypedValue` stored in this value.
    pub fn content_type_id(&self) -> TypeId {
        self.value_holder().content_type_id()
    }

    /// Whether the stored type is `T`.
    pub fn is<T: TypedValue>(&self) -> bool {
        self.content_type_id() == TypeId::of::<T>()
    }
}

/// Selects how a type's content is stored.
pub trait Mutability {
    type Content: TypedValue;

    /// This type is mutable or immutable.
    const MUTABLE: bool;

    /// Type of cell which contains the object.
    type Cell: ContentCell<Content = Self::Content>;
}

struct ValueHolder<T: TypedValue> {
    content: <<T as TypedValue>::Holder as Mutability>::Cell,
}

impl<T: TypedValue> ValueHolder<T> {
    fn new(value: T) -> ValueHolder<T> {
        ValueHolder {
            content: <<T as TypedValue>::Holder as Mutability>::Cell::new(value),
        }
    }
}

impl<T: TypedValue<Holder = Immutable<T>> + Clone> Clone for ValueHolder<T> {
    fn clone(&self) -> Self {
        ValueHolder {
            content: self.content.clone(),
        }
    }
}

/// Type parameter for immutable types.
pub struct Immutable<T>(marker::PhantomData<T>);
/// Type parameter for mutable types.
pub struct Mutable<T>(marker::PhantomData<T>);

impl<T: TypedValue> Mutability for Mutable<T> {
    type Content = T;
    const MUTABLE: bool = true;
    type Cell = RefCell<T>;
}

impl<T: TypedValue> Mutability for Immutable<T> {
    type Content = T;
    const MUTABLE: bool = false;
    type Cell = FixedCell<T>;
}

/// Pointer to data, used as object identity (cycle checks, copy memo).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct DataPtr(*const ());

impl<T: TypedValue> From<*const T> for DataPtr {
    fn from(p: *const T) -> Self {
        DataPtr(p as *const ())
    }
}

impl<T: TypedValue> From<&'_ T> for DataPtr {
    fn from(p: &T) -> Self {
        DataPtr::from(p as *const T)
    }
}

/// How a method touches its receiver.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MethodEffect {
    /// Dispatched through `TypedValue::call_method`, with `&self`.
    ReadOnly,
    /// Dispatched through `TypedValue::call_method_mut`, with `&mut self`.
    Mutating,
}

impl<T: TypedValue> ValueHolderDyn for ValueHolder<T> {
    fn as_any_mut(&self) -> Option<RefMut<'_, dyn Any>> {
        self.content
            .write()
            .map(|content| RefMut::map(content, |v| v as &mut dyn Any))
    }

    fn as_any_ref(&self) -> ContentRef<'_, dyn Any> {
        ContentRef::map(self.content.read(), |v| v as &dyn Any)
    }

    fn data_ptr(&self) -> DataPtr {
        DataPtr::from(self.content.as_ptr())
    }

    fn content_type_id(&self) -> TypeId {
        TypeId::of::<T>()
    }

    fn to_str(&self) -> String {
        self.content.read().to_str()
    }

    fn to_repr(&self) -> String {
        self.content.read().to_repr()
    }

    fn get_type(&self) -> &'static str {
        // Mutable types never override `get_type`.
        match self.content.try_read() {
            Some(content) => content.get_type(),
            None => T::TYPE,
        }
    }

    fn to_bool(&self) -> bool {
        self.content.read().to_bool()
    }

    fn to_int(&self) -> Result<i64, ValueError> {
        match self.content.try_read() {
            Some(content) => content.to_int(),
            None => Err(ValueError::IncorrectParameterType),
        }
    }

    fn is_being_written(&self) -> bool {
        self.content.try_read().is_none()
    }

    fn get_hash(&self) -> Result<u64, ValueError> {
        // Content being written to is mutable, hence not hashable.
        match self.content.try_read() {
            Some(content) => content.get_hash(),
            None => Err(ValueError::NotHashableValue),
        }
    }

    fn equals(&self, other: &Value) -> Result<bool, ValueError> {
        let _depth_guard = recursion::try_inc()?;

        match other.downcast_ref::<T>() {
            Some(other) => self.content.read().equals(&*other),
            None => self.content.read().equals_other_type(other),
        }
    }

    fn deep_copy(&self, copier: &mut DeepCopier) -> ValueResult {
        let copy = self.content.read().deep_copy(copier)?;
        Ok(Value::new(copy))
    }

    fn static_effects(&self) -> bool {
        self.content.read().static_effects()
    }

    fn call(&self, args: Arguments) -> ValueResult {
        self.content.read().call(args)
    }

    fn at(&self, index: Value) -> ValueResult {
        self.content.read().at(index)
    }

    fn set_at(&self, index: Value, new_value: Value) -> Result<(), ValueError> {
        match self.content.write() {
            Some(mut content) => content.set_at(index, new_value),
            None => Err(self.content.read().write_error(Write::Index(&index))),
        }
    }

    fn del_at(&self, index: Value) -> Result<(), ValueError> {
        match self.content.write() {
            Some(mut content) => content.del_at(index),
            None => Err(self.content.read().write_error(Write::Delete(&index))),
        }
    }

    fn iter(&self) -> Result<Vec<Value>, ValueError> {
        self.content.read().iter()
    }

    fn length(&self) -> Result<i64, ValueError> {
        self.content.read().length()
    }

    fn is_in(&self, other: &Value) -> Result<bool, ValueError> {
        self.content.read().is_in(other)
    }

    fn get_attr(&self, attribute: &str) -> ValueResult {
        self.content.read().get_attr(attribute)
    }

    fn has_attr(&self, attribute: &str) -> Result<bool, ValueError> {
        self.content.read().has_attr(attribute)
    }

    fn set_attr(&self, attribute: &str, new_value: Value) -> Result<(), ValueError> {
        match self.content.write() {
            Some(mut content) => content.set_attr(attribute, new_value),
            None => Err(self.content.read().write_error(Write::Attribute(attribute))),
        }
    }

    fn dir_attr(&self) -> Result<Vec<String>, ValueError> {
        self.content.read().dir_attr()
    }

    fn method_effect(&self, name: &str) -> Option<MethodEffect> {
        self.content.read().method_effect(name)
    }

    fn invoke_method(&self, name: &str, args: Arguments) -> ValueResult {
        let effect = self.content.read().method_effect(name);
        match effect {
            None => Err(ValueError::OperationNotSupported {
                op: format!(".{}()", name),
                left: self.get_type().to_owned(),
                right: None,
            }),
            Some(MethodEffect::ReadOnly) => self.content.read().call_method(name, args),
            Some(MethodEffect::Mutating) => match self.content.write() {
                Some(mut content) => content.call_method_mut(name, args),
                None => Err(ValueError::CannotMutateImmutableValue),
            },
        }
    }
}

/// `ValueHolder` as virtual functions to put into `Value`.
/// Should not be used or implemented directly.
trait ValueHolderDyn {
    /// `None` is returned for immutable types.
    /// This function panics if the value is borrowed.
    fn as_any_mut(&self) -> Option<RefMut<'_, dyn Any>>;

    /// This function panics if value is mutably borrowed.
    fn as_any_ref(&self) -> ContentRef<'_, dyn Any>;

    /// Pointer to `TypedValue` object, used as identity.
    fn data_ptr(&self) -> DataPtr;

    fn content_type_id(&self) -> TypeId;

    fn to_str(&self) -> String;

    fn to_repr(&self) -> String;

    fn get_type(&self) -> &'static str;

    fn to_bool(&self) -> bool;

    fn to_int(&self) -> Result<i64, ValueError>;

    /// Whether the content is currently borrowed for a write.
    fn is_being_written(&self) -> bool;

    fn get_hash(&self) -> Result<u64, ValueError>;

    fn equals(&self, other: &Value) -> Result<bool, ValueError>;

    fn deep_copy(&self, copier: &mut DeepCopier) -> ValueResult;

    fn static_effects(&self) -> bool;

    fn call(&self, args: Arguments) -> ValueResult;

    fn at(&self, index: Value) -> ValueResult;

    fn set_at(&self, index: Value, new_value: Value) -> Result<(), ValueError>;

    fn del_at(&self, index: Value) -> Result<(), ValueError>;

    fn iter(&self) -> Result<Vec<Value>, ValueError>;

    fn length(&self) -> Result<i64, ValueError>;

    fn is_in(&self, other: &Value) -> Result<bool, ValueError>;

    fn get_attr(&self, attribute: &str) -> ValueResult;

    fn has_attr(&self, attribute: &str) -> Result<bool, ValueError>;

    fn set_attr(&self, attribute: &str, new_value: Value) -> Result<(), ValueError>;

    fn dir_attr(&self) -> Result<Vec<String>, ValueError>;

    fn method_effect(&self, name: &str) -> Option<MethodEffect>;

    fn invoke_method(&self, name: &str, args: Arguments) -> ValueResult;
}

/// A trait for a value with a type that all variable container
/// will implement.
///
/// Every method except `values` accessors has a default which either
/// reports `OperationNotSupported` or behaves like a plain object without
/// that capability.
pub trait TypedValue: Sized + 'static {
    /// Must be either `Mutable<Self>` or `Immutable<Self>`
    type Holder: Mutability<Content = Self>;

    /// Name of the type, as returned by `type()`.
    const TYPE: &'static str;

    /// Create a value for `TypedValue`.
    ///
    /// This function should be overridden only by builtin types.
    #[doc(hidden)]
    fn new_value(self) -> Value {
        Value(ValueInner::Other(Rc::new(ValueHolder::new(self))))
    }

    /// Type name reported for this particular value.
    ///
    /// Wrappers override it to report the wrapped type.
    fn get_type(&self) -> &'static str {
        Self::TYPE
    }

    /// Return a string describing of self, as returned by the str() function.
    fn to_str(&self) -> String {
        self.to_repr()
    }

    /// Return a string representation of self, as returned by the repr() function.
    fn to_repr(&self) -> String {
        format!("<{}>", self.get_type())
    }

    /// Convert self to a Boolean truth value, as returned by the bool() function.
    fn to_bool(&self) -> bool {
        true
    }

    /// Convert self to an integer value if the type is numeric.
    fn to_int(&self) -> Result<i64, ValueError> {
        Err(ValueError::OperationNotSupported {
            op: "int()".to_owned(),
            left: self.get_type().to_owned(),
            right: None,
        })
    }

    /// Return a hash code for self, or `NotHashableValue` if there is no
    /// hash for this value (e.g. list).
    fn get_hash(&self) -> Result<u64, ValueError> {
        Err(ValueError::NotHashableValue)
    }

    /// Compare `self` with `other` for equality.
    ///
    /// `other` parameter is of type `Self` so it is safe to downcast it.
    ///
    /// Default implementation does pointer (id) comparison. A type keeping
    /// this default cannot be guarded by the mutation oracle: a copy is never
    /// identical to its original, so every guarded call looks mutating.
    fn equals(&self, other: &Self) -> Result<bool, ValueError> {
        let self_ptr = self as *const Self as *const ();
        let other_ptr = other as *const Self as *const ();
        Ok(self_ptr == other_ptr)
    }

    /// Compare `self` with a value of another type.
    ///
    /// Used for families of types that compare equal across mutability,
    /// such as `dict` and `frozendict`.
    fn equals_other_type(&self, _other: &Value) -> Result<bool, ValueError> {
        Ok(false)
    }

    /// Produce an independent copy of `self`, copying every contained
    /// value through `copier`.
    fn deep_copy(&self, _copier: &mut DeepCopier) -> Result<Self, ValueError> {
        Err(ValueError::OperationNotSupported {
            op: "deepcopy()".to_owned(),
            left: self.get_type().to_owned(),
            right: None,
        })
    }

    /// The error reported when a write reaches a value of an immutable type.
    fn write_error(&self, write: Write<'_>) -> ValueError {
        ValueError::OperationNotSupported {
            op: write.op(),
            left: self.get_type().to_owned(),
            right: None,
        }
    }

    /// Perform a call on the object, only meaningful for callables.
    fn call(&self, _args: Arguments) -> ValueResult {
        Err(ValueError::OperationNotSupported {
            op: "call()".to_owned(),
            left: self.get_type().to_owned(),
            right: None,
        })
    }

    /// Perform an array or dictionary indirection.
    ///
    /// This returns the result of `a[index]` if `a` is indexable.
    fn at(&self, index: Value) -> ValueResult {
        Err(ValueError::OperationNotSupported {
            op: "[]".to_owned(),
            left: self.get_type().to_owned(),
            right: Some(index.get_type().to_owned()),
        })
    }

    /// Set the value at `index` with `new_value`.
    fn set_at(&mut self, index: Value, _new_value: Value) -> Result<(), ValueError> {
        Err(self.write_error(Write::Index(&index)))
    }

    /// Remove the value at `index`.
    fn del_at(&mut self, index: Value) -> Result<(), ValueError> {
        Err(self.write_error(Write::Delete(&index)))
    }

    /// Returns the values of this container if this value is iterable.
    fn iter(&self) -> Result<Vec<Value>, ValueError> {
        Err(ValueError::TypeNotX {
            object_type: self.get_type().to_owned(),
            op: "iterable".to_owned(),
        })
    }

    /// Returns the length of the value, if this value is a sequence.
    fn length(&self) -> Result<i64, ValueError> {
        Err(ValueError::OperationNotSupported {
            op: "len()".to_owned(),
            left: self.get_type().to_owned(),
            right: None,
        })
    }

    /// Tell whether `other` is in the current value, if it is a container.
    fn is_in(&self, other: &Value) -> Result<bool, ValueError> {
        Err(ValueError::OperationNotSupported {
            op: "in".to_owned(),
            left: other.get_type().to_owned(),
            right: Some(self.get_type().to_owned()),
        })
    }

    /// Get a data attribute, as would be returned by a dotted expression
    /// (i.e. `a.attribute`).
    ///
    /// __Note__: methods are not returned here, they are described by
    /// `method_effect`.
    fn get_attr(&self, attribute: &str) -> ValueResult {
        Err(ValueError::OperationNotSupported {
            op: format!(".{}", attribute),
            left: self.get_type().to_owned(),
            right: None,
        })
    }

    /// Return true if a data attribute of name `attribute` exists.
    fn has_attr(&self, _attribute: &str) -> Result<bool, ValueError> {
        Ok(false)
    }

    /// Set the attribute named `attribute` of the current value to `new_value`.
    fn set_attr(&mut self, attribute: &str, _new_value: Value) -> Result<(), ValueError> {
        Err(self.write_error(Write::Attribute(attribute)))
    }

    /// List data attributes of the current value, excluding methods.
    fn dir_attr(&self) -> Result<Vec<String>, ValueError> {
        Ok(Vec::new())
    }

    /// Describe the method `name`, or `None` if there is no such method.
    fn method_effect(&self, _name: &str) -> Option<MethodEffect> {
        None
    }

    /// Call a method declared `MethodEffect::ReadOnly`.
    fn call_method(&self, name: &str, _args: Arguments) -> ValueResult {
        Err(ValueError::OperationNotSupported {
            op: format!(".{}()", name),
            left: self.get_type().to_owned(),
            right: None,
        })
    }

    /// Call a method declared `MethodEffect::Mutating`.
    fn call_method_mut(&mut self, name: &str, _args: Arguments) -> ValueResult {
        Err(ValueError::OperationNotSupported {
            op: format!(".{}()", name),
            left: self.get_type().to_owned(),
            right: None,
        })
    }

    /// Whether `method_effect` is trustworthy: `ReadOnly` methods of this
    /// type never change the value, including through values it contains.
    ///
    /// Types returning `true` can be guarded without copying when the
    /// freezer uses `GuardStrategy::Static`.
    fn static_effects(&self) -> bool {
        false
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Value[{}]({})", self.get_type(), self.to_repr())
    }
}

impl Value {
    pub fn to_str(&self) -> String {
        self.value_holder().to_str()
    }
    pub fn to_repr(&self) -> String {
        self.value_holder().to_repr()
    }
    pub fn get_type(&self) -> &'static str {
        self.value_holder().get_type()
    }
    pub fn to_bool(&self) -> bool {
        self.value_holder().to_bool()
    }
    pub fn to_int(&self) -> Result<i64, ValueError> {
        self.value_holder().to_int()
    }
    pub fn get_hash(&self) -> Result<u64, ValueError> {
        self.value_holder().get_hash()
    }

    /// Value equality.
    ///
    /// A value equals itself. A value in the middle of a write (a list
    /// passed to one of its own mutating methods) equals nothing else.
    pub fn equals(&self, other: &Value) -> Result<bool, ValueError> {
        if self.ptr_eq(other) {
            return Ok(true);
        }
        if self.value_holder().is_being_written() || other.value_holder().is_being_written() {
            return Ok(false);
        }
        // A frozen handle compares as the value it wraps, on either side.
        let backing = other
            .downcast_ref::<FrozenHandle>()
            .map(|handle| handle.backing().clone());
        match backing {
            Some(backing) => self.equals(&backing),
            None => self.value_holder().equals(other),
        }
    }

    /// Copy the whole value graph reachable from this value.
    ///
    /// Values reachable twice are copied once, so aliasing inside the graph
    /// is preserved. Immutable scalars are shared.
    pub fn deep_copy(&self) -> ValueResult {
        DeepCopier::new().copy(self)
    }

    pub(crate) fn deep_copy_with(&self, copier: &mut DeepCopier) -> ValueResult {
        self.value_holder().deep_copy(copier)
    }

    pub fn static_effects(&self) -> bool {
        self.value_holder().static_effects()
    }

    pub fn call(&self, args: Arguments) -> ValueResult {
        self.value_holder().call(args)
    }

    pub fn at(&self, index: Value) -> ValueResult {
        self.value_holder().at(index)
    }

    pub fn set_at(&self, index: Value, new_value: Value) -> Result<(), ValueError> {
        self.value_holder().set_at(index, new_value)
    }

    pub fn del_at(&self, index: Value) -> Result<(), ValueError> {
        self.value_holder().del_at(index)
    }

    pub fn iter(&self) -> Result<Vec<Value>, ValueError> {
        self.value_holder().iter()
    }

    pub fn length(&self) -> Result<i64, ValueError> {
        self.value_holder().length()
    }

    pub fn is_in(&self, other: &Value) -> Result<bool, ValueError> {
        self.value_holder().is_in(other)
    }

    /// `self.attribute`: a bound method for methods, otherwise the data
    /// attribute.
    pub fn get_attr(&self, attribute: &str) -> ValueResult {
        if self.method_effect(attribute).is_some() {
            return Ok(BoundMethod::new(self.clone(), attribute));
        }
        self.value_holder().get_attr(attribute)
    }

    pub fn has_attr(&self, attribute: &str) -> Result<bool, ValueError> {
        Ok(self.method_effect(attribute).is_some() || self.value_holder().has_attr(attribute)?)
    }

    pub fn set_attr(&self, attribute: &str, new_value: Value) -> Result<(), ValueError> {
        self.value_holder().set_attr(attribute, new_value)
    }

    pub fn dir_attr(&self) -> Result<Vec<String>, ValueError> {
        self.value_holder().dir_attr()
    }

    pub fn method_effect(&self, name: &str) -> Option<MethodEffect> {
        self.value_holder().method_effect(name)
    }

    /// `self.name(args)`, resolved through `get_attr`.
    pub fn call_method(&self, name: &str, args: Arguments) -> ValueResult {
        self.get_attr(name)?.call(args)
    }

    /// Run a declared method of this value directly, dispatching on its
    /// `MethodEffect`.
    pub fn invoke_method(&self, name: &str, args: Arguments) -> ValueResult {
        self.value_holder().invoke_method(name, args)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.to_str())
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        self.equals(other) == Ok(true)
    }
}

impl Value {
    /// Get a reference to underlying data or `None`
    /// if contained object has different type than requested.
    ///
    /// This function panics if the `Value` is borrowed mutably.
    pub fn downcast_ref<T: TypedValue>(&self) -> Option<ContentRef<'_, T>> {
        let any = self.value_holder().as_any_ref();
        if any.is::<T>() {
            Some(ContentRef::map(any, |any| {
                any.downcast_ref().expect("type checked above")
            }))
        } else {
            None
        }
    }

    /// Get a mutable reference to underlying data or `None`
    /// if contained object has different type than requested.
    ///
    /// This function panics if the `Value` is borrowed.
    pub fn downcast_mut<T: TypedValue<Holder = Mutable<T>>>(&self) -> Option<RefMut<'_, T>> {
        let any = self.value_holder().as_any_mut()?;
        if any.is::<T>() {
            Some(RefMut::map(any, |any| {
                any.downcast_mut().expect("type checked above")
            }))
        } else {
            None
        }
    }
}

// Submodules
pub mod boolean;
pub mod bytes;
pub mod cell;
pub mod copy;
pub mod dict;
pub mod error;
pub mod float;
pub mod function;
pub mod hashed_value;
pub mod int;
pub mod list;
pub mod none;
pub mod recursion;
pub mod set;
pub mod string;
pub mod tuple;

pub use crate::values::copy::DeepCopier;
pub use crate::values::error::ValueError;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::values::list::List;

    #[test]
    fn identity_equality_is_the_default() {
        struct Opaque;

        impl TypedValue for Opaque {
            type Holder = Immutable<Opaque>;
            const TYPE: &'static str = "Opaque";
        }

        let a = Value::new(Opaque);
        let b = Value::new(Opaque);
        assert!(a == a.clone());
        assert!(a != b);
        assert_eq!("<Opaque>", a.to_repr());
    }

    #[test]
    fn clones_alias() {
        let l = List::new(vec![1, 2]);
        let alias = l.clone();
        alias
            .call_method("append", Arguments::new(vec![Value::from(3)]))
            .unwrap();
        assert_eq!("[1, 2, 3]", l.to_repr());
        assert!(l.ptr_eq(&alias));
        assert!(!Value::from(1).ptr_eq(&Value::from(1)));
    }

    #[test]
    fn immutable_writes_are_not_supported() {
        let t = Value::from((1, 2));
        assert_eq!(
            Err(ValueError::OperationNotSupported {
                op: "[] =".to_owned(),
                left: "tuple".to_owned(),
                right: None,
            }),
            t.set_at(Value::from(0), Value::from(3))
        );
        assert!(t.set_attr("x", Value::from(3)).is_err());
    }

    #[test]
    fn methods_are_bound_on_access() {
        let l = List::new(vec![1]);
        let append = l.get_attr("append").unwrap();
        assert_eq!("method", append.get_type());
        append.call(Arguments::new(vec![Value::from(2)])).unwrap();
        assert_eq!("[1, 2]", l.to_repr());
        assert!(l.has_attr("append").unwrap());
        assert!(!l.has_attr("push").unwrap());
    }

    #[test]
    fn downcast() {
        let l = List::new(vec![1]);
        assert!(l.downcast_ref::<List>().is_some());
        assert!(l.downcast_ref::<i64>().is_none());
        l.downcast_mut::<List>().unwrap().push(Value::from(2));
        assert_eq!(2, l.length().unwrap());
        assert!(Value::from(1).is::<i64>());
    }
}
