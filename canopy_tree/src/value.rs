// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Type-erased capability instance storage.
//!
//! This module provides [`ErasedValue`] for storing capability instances
//! (and theme config values) of any type in a heterogeneous collection.

use alloc::boxed::Box;
use core::any::{Any, TypeId};
use core::fmt;

/// A type-erased value.
///
/// This wraps a value of any `'static` type, storing it on the heap with
/// its type information for later downcasting. Unlike a bare
/// `Box<dyn Any>`, the [`TypeId`] is cached inline so `is::<T>()` checks
/// avoid a vtable call.
///
/// Capability instances are mutated in place by property blocks, so this
/// type supports mutable downcasts.
///
/// # Example
///
/// ```rust
/// use canopy_tree::ErasedValue;
///
/// let mut value = ErasedValue::new(42_i32);
/// assert!(value.is::<i32>());
/// assert_eq!(value.downcast_ref::<i32>(), Some(&42));
///
/// *value.downcast_mut::<i32>().unwrap() = 43;
/// assert_eq!(value.downcast_ref::<i32>(), Some(&43));
/// ```
pub struct ErasedValue {
    inner: Box<dyn Any>,
    type_id: TypeId,
}

impl ErasedValue {
    /// Creates a new erased value from a concrete value.
    #[must_use]
    pub fn new<T: 'static>(value: T) -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            inner: Box::new(value),
        }
    }

    /// Returns the [`TypeId`] of the contained value.
    #[must_use]
    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Returns `true` if the contained value is of type `T`.
    #[must_use]
    #[inline]
    pub fn is<T: 'static>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    /// Attempts to downcast to a reference of type `T`.
    ///
    /// Returns `None` if the contained value is not of type `T`.
    #[must_use]
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.inner.downcast_ref()
    }

    /// Attempts to downcast to a mutable reference of type `T`.
    ///
    /// Returns `None` if the contained value is not of type `T`.
    #[must_use]
    pub fn downcast_mut<T: 'static>(&mut self) -> Option<&mut T> {
        self.inner.downcast_mut()
    }

    /// Returns the contained value as a borrowed `dyn Any`.
    #[must_use]
    #[inline]
    pub fn as_any(&self) -> &dyn Any {
        self.inner.as_ref()
    }

    /// Returns the contained value as a mutable `dyn Any`.
    #[must_use]
    #[inline]
    pub fn as_any_mut(&mut self) -> &mut dyn Any {
        self.inner.as_mut()
    }
}

impl fmt::Debug for ErasedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErasedValue")
            .field("type_id", &self.type_id)
            .finish_non_exhaustive()
    }
}
