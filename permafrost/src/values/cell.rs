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

//! Storage cells for value content.
//!
//! Mutable types keep their content in a `RefCell`, immutable types in a
//! [`FixedCell`] which hands out plain references and refuses mutable access.

use std::cell::{Ref, RefCell, RefMut};
use std::ops::Deref;

/// Either a `std::cell::Ref<T>` or a plain `&T`.
pub enum ContentRef<'a, T: ?Sized + 'a> {
    Ptr(&'a T),
    Borrowed(Ref<'a, T>),
}

impl<'a, T: ?Sized + 'a> Deref for ContentRef<'a, T> {
    type Target = T;

    fn deref(&self) -> &T {
        match self {
            ContentRef::Ptr(p) => p,
            ContentRef::Borrowed(p) => p.deref(),
        }
    }
}

impl<'a, T: ?Sized + 'a> ContentRef<'a, T> {
    pub fn map<U: ?Sized, F>(orig: ContentRef<'a, T>, f: F) -> ContentRef<'a, U>
    where
        F: FnOnce(&T) -> &U,
    {
        match orig {
            ContentRef::Ptr(p) => ContentRef::Ptr(f(p)),
            ContentRef::Borrowed(p) => ContentRef::Borrowed(Ref::map(p, f)),
        }
    }
}

/// Cell holding the content of a value.
pub trait ContentCell {
    type Content;

    fn new(value: Self::Content) -> Self;

    /// Shared access. Panics if the content is mutably borrowed.
    fn read(&self) -> ContentRef<'_, Self::Content>;

    /// Shared access, `None` if the content is mutably borrowed.
    fn try_read(&self) -> Option<ContentRef<'_, Self::Content>>;

    /// Exclusive access, `None` for cells of immutable types.
    ///
    /// Panics if the content is already borrowed.
    fn write(&self) -> Option<RefMut<'_, Self::Content>>;

    fn as_ptr(&self) -> *const Self::Content;
}

/// Cell for content that never changes after construction.
#[derive(Debug, Clone)]
pub struct FixedCell<T>(T);

impl<T> ContentCell for RefCell<T> {
    type Content = T;

    fn new(value: T) -> Self {
        RefCell::new(value)
    }

    fn read(&self) -> ContentRef<'_, T> {
        ContentRef::Borrowed(RefCell::borrow(self))
    }

    fn try_read(&self) -> Option<ContentRef<'_, T>> {
        RefCell::try_borrow(self).ok().map(ContentRef::Borrowed)
    }

    fn write(&self) -> Option<RefMut<'_, T>> {
        Some(RefCell::borrow_mut(self))
    }

    fn as_ptr(&self) -> *const T {
        RefCell::as_ptr(self)
    }
}

impl<T> ContentCell for FixedCell<T> {
    type Content = T;

    fn new(value: T) -> Self {
        FixedCell(value)
    }

    fn read(&self) -> ContentRef<'_, T> {
        ContentRef::Ptr(&self.0)
    }

    fn try_read(&self) -> Option<ContentRef<'_, T>> {
        Some(ContentRef::Ptr(&self.0))
    }

    fn write(&self) -> Option<RefMut<'_, T>> {
        None
    }

    fn as_ptr(&self) -> *const T {
        &self.0 as *const T
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_cell_refuses_writes() {
        let cell = <FixedCell<i64> as ContentCell>::new(3);
        assert_eq!(3, *cell.read());
        assert!(cell.write().is_none());
    }

    #[test]
    fn ref_cell_try_read_while_written() {
        let cell = <RefCell<Vec<i64>> as ContentCell>::new(vec![1]);
        {
            let mut w = cell.write().unwrap();
            w.push(2);
            assert!(cell.try_read().is_none());
        }
        assert_eq!(vec![1, 2], *cell.read());
    }
}
