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

//! Errors returned by value operations and by the freeze guards.

use crate::values::Value;
use codemap_diagnostic::{Diagnostic, Emitter, Level};
use std::fmt;
use thiserror::Error;

// CV prefix = Critical Value expression
pub const NOT_SUPPORTED_ERROR_CODE: &str = "CV00";
pub const IMMUTABLE_ERROR_CODE: &str = "CV01";
pub const INCORRECT_PARAMETER_TYPE_ERROR_CODE: &str = "CV02";
pub const OUT_OF_BOUND_ERROR_CODE: &str = "CV03";
pub const NOT_HASHABLE_VALUE_ERROR_CODE: &str = "CV04";
pub const KEY_NOT_FOUND_ERROR_CODE: &str = "CV05";
pub const MISSING_PARAMETER_ERROR_CODE: &str = "CV06";
pub const TOO_MANY_RECURSION_LEVEL_ERROR_CODE: &str = "CV13";
pub const UNSUPPORTED_RECURSIVE_DATA_STRUCTURE_ERROR_CODE: &str = "CV14";
// FZ prefix = FroZen value guard
pub const CANNOT_ALTER_ERROR_CODE: &str = "FZ00";
pub const WOULD_MUTATE_ERROR_CODE: &str = "FZ01";

/// A write attempted on a value: the thing the caller tried to change.
#[derive(Clone, Copy, Debug)]
pub enum Write<'a> {
    /// `value.attribute = x`
    Attribute(&'a str),
    /// `value[index] = x`
    Index(&'a Value),
    /// `del value[index]`
    Delete(&'a Value),
}

impl Write<'_> {
    /// Operator spelling, used in `OperationNotSupported` errors.
    pub fn op(&self) -> String {
        match self {
            Write::Attribute(attribute) => format!(".{} =", attribute),
            Write::Index(..) => "[] =".to_owned(),
            Write::Delete(..) => "del []".to_owned(),
        }
    }
}

impl fmt::Display for Write<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Write::Attribute(attribute) => write!(f, "attribute `{}`", attribute),
            Write::Index(index) | Write::Delete(index) => write!(f, "item [{}]", index.to_repr()),
        }
    }
}

/// A forbidden operation on a frozen value.
///
/// Retrying the same operation on the same frozen value always fails the
/// same way.
#[derive(Clone, Debug, Error)]
pub enum FreezeError {
    /// Direct write or delete through a frozen handle.
    #[error("cannot alter {target} of frozen value {value}")]
    CannotAlter { target: String, value: String },
    /// A guarded method call changed the copy it ran on.
    #[error("call to {method} with arguments {arguments} would mutate {value}")]
    WouldMutate {
        method: String,
        arguments: String,
        value: String,
    },
}

impl FreezeError {
    pub fn cannot_alter(write: Write<'_>, value: &Value) -> FreezeError {
        FreezeError::CannotAlter {
            target: write.to_string(),
            value: value.to_repr(),
        }
    }

    /// Human readable description of the violation.
    pub fn message(&self) -> String {
        self.to_string()
    }

    pub fn code(&self) -> &'static str {
        match self {
            FreezeError::CannotAlter { .. } => CANNOT_ALTER_ERROR_CODE,
            FreezeError::WouldMutate { .. } => WOULD_MUTATE_ERROR_CODE,
        }
    }
}

fn not_supported_message(op: &str, left: &str, right: &Option<String>) -> String {
    match right {
        Some(right) => format!("{} not supported for types {} and {}", op, left, right),
        None => format!("{} not supported for type {}", op, left),
    }
}

/// Error that can be returned by functions of the `TypedValue` trait and by
/// the freeze machinery.
#[derive(Clone, Debug, Error)]
pub enum ValueError {
    /// The value is frozen.
    #[error(transparent)]
    Freeze(#[from] FreezeError),
    /// The operation is not supported for this type.
    #[error("{}", not_supported_message(.op, .left, .right))]
    OperationNotSupported {
        op: String,
        left: String,
        right: Option<String>,
    },
    /// The operation is not supported for this type because type is not of a certain category.
    #[error("the type '{object_type}' is not {op}")]
    TypeNotX { object_type: String, op: String },
    /// Trying to run a mutating operation on a value of an immutable type.
    #[error("cannot mutate a value of an immutable type")]
    CannotMutateImmutableValue,
    /// Trying to apply incorrect parameter type.
    #[error("type of parameters mismatch")]
    IncorrectParameterType,
    /// A required call argument was not given.
    #[error("missing parameter `{0}`")]
    MissingParameter(String),
    /// Trying to access an index outside of the value range.
    #[error("index {0} is out of bound")]
    IndexOutOfBound(i64),
    /// The value is not hashable but was requested for a hash structure (e.g. set).
    #[error("value is not hashable")]
    NotHashableValue,
    /// The key was not found in the collection.
    #[error("key {} was not found", .0.to_repr())]
    KeyNotFound(Value),
    /// Too many recursion levels in a structural operation.
    #[error("too many recursion levels")]
    TooManyRecursionLevel,
    /// A value contains itself where that cannot be supported.
    #[error("recursive data structures are not supported by this operation")]
    UnsupportedRecursiveDataStructure,
}

impl ValueError {
    pub fn code(&self) -> &'static str {
        match self {
            ValueError::Freeze(e) => e.code(),
            ValueError::OperationNotSupported { .. } | ValueError::TypeNotX { .. } => {
                NOT_SUPPORTED_ERROR_CODE
            }
            ValueError::CannotMutateImmutableValue => IMMUTABLE_ERROR_CODE,
            ValueError::IncorrectParameterType => INCORRECT_PARAMETER_TYPE_ERROR_CODE,
            ValueError::MissingParameter(..) => MISSING_PARAMETER_ERROR_CODE,
            ValueError::IndexOutOfBound(..) => OUT_OF_BOUND_ERROR_CODE,
            ValueError::NotHashableValue => NOT_HASHABLE_VALUE_ERROR_CODE,
            ValueError::KeyNotFound(..) => KEY_NOT_FOUND_ERROR_CODE,
            ValueError::TooManyRecursionLevel => TOO_MANY_RECURSION_LEVEL_ERROR_CODE,
            ValueError::UnsupportedRecursiveDataStructure => {
                UNSUPPORTED_RECURSIVE_DATA_STRUCTURE_ERROR_CODE
            }
        }
    }

    /// Whether this error comes from a freeze guard.
    pub fn is_freeze_error(&self) -> bool {
        matches!(self, ValueError::Freeze(..))
    }

    /// Convert to a diagnostic. Values carry no source locations, so the
    /// diagnostic has no spans.
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic {
            level: Level::Error,
            message: self.to_string(),
            code: Some(self.code().to_owned()),
            spans: Vec::new(),
        }
    }
}

/// Render diagnostics the way they would appear on a terminal, without colors.
pub fn render_diagnostics(diagnostics: &[Diagnostic]) -> String {
    let mut out = Vec::new();
    Emitter::vec(&mut out, None).emit(diagnostics);
    String::from_utf8_lossy(&out).into_owned()
}

impl PartialEq for ValueError {
    fn eq(&self, other: &ValueError) -> bool {
        match (self, other) {
            (ValueError::KeyNotFound(x), ValueError::KeyNotFound(y)) => x == y,
            (ValueError::IndexOutOfBound(x), ValueError::IndexOutOfBound(y)) => x == y,
            (
                ValueError::OperationNotSupported { op: x, .. },
                ValueError::OperationNotSupported { op: y, .. },
            ) => x == y,
            (ValueError::Freeze(x), ValueError::Freeze(y)) => x.message() == y.message(),
            (x, y) => x.code() == y.code() && x.to_string() == y.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn freeze_error_messages() {
        let e = FreezeError::cannot_alter(Write::Attribute("name"), &Value::from("Alice"));
        assert_eq!(
            "cannot alter attribute `name` of frozen value \"Alice\"",
            e.message()
        );
        let e = FreezeError::cannot_alter(Write::Index(&Value::from(0)), &Value::from(1));
        assert_eq!("cannot alter item [0] of frozen value 1", e.message());
    }

    #[test]
    fn codes() {
        let e: ValueError = FreezeError::WouldMutate {
            method: "set_name".to_owned(),
            arguments: "(\"Bob\")".to_owned(),
            value: "Person(Alice)".to_owned(),
        }
        .into();
        assert_eq!(WOULD_MUTATE_ERROR_CODE, e.code());
        assert!(e.is_freeze_error());
        assert_eq!(NOT_HASHABLE_VALUE_ERROR_CODE, ValueError::NotHashableValue.code());
        assert!(!ValueError::NotHashableValue.is_freeze_error());
    }

    #[test]
    fn not_supported_message() {
        let e = ValueError::OperationNotSupported {
            op: "[] =".to_owned(),
            left: "tuple".to_owned(),
            right: Some("int".to_owned()),
        };
        assert_eq!("[] = not supported for types tuple and int", e.to_string());
    }

    #[test]
    fn render() {
        let d = ValueError::IndexOutOfBound(7).to_diagnostic();
        assert_eq!(Some(OUT_OF_BOUND_ERROR_CODE.to_owned()), d.code);
        let rendered = render_diagnostics(&[d]);
        assert!(rendered.contains(OUT_OF_BOUND_ERROR_CODE), "{}", rendered);
        assert!(rendered.contains("index 7 is out of bound"), "{}", rendered);
    }
}
