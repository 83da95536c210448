// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Element and capability identification types.
//!
//! This module provides [`ElementId`] for identifying nodes in the external
//! UI tree, [`CapabilityId`] for runtime capability identification, and
//! [`Capability<T>`] for type-safe compile-time capability keys.

use core::fmt;
use core::hash::{Hash, Hasher};
use core::marker::PhantomData;

/// A stable identifier for an element in the external UI tree.
///
/// Element identity must be stable for at least the duration of a
/// resolution pass. The engine never fabricates IDs; they always come from
/// the embedder's [`TreeProvider`](crate::TreeProvider).
///
/// # Example
///
/// ```rust
/// use canopy_tree::ElementId;
///
/// let id = ElementId::new(42);
/// assert_eq!(id.index(), 42);
/// ```
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId(u64);

impl ElementId {
    /// Creates a new element ID from the given index.
    #[must_use]
    #[inline]
    pub const fn new(index: u64) -> Self {
        Self(index)
    }

    /// Returns the underlying index of this element ID.
    #[must_use]
    #[inline]
    pub const fn index(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ElementId").field(&self.0).finish()
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ElementId({})", self.0)
    }
}

/// A runtime capability identifier.
///
/// This is a lightweight handle (u16) that uniquely identifies a capability
/// kind within a [`CapabilityRegistry`](crate::CapabilityRegistry). The u16
/// size allows up to 65,536 capability kinds while keeping selector segments
/// compact.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CapabilityId(u16);

impl CapabilityId {
    /// Creates a new capability ID from the given index.
    ///
    /// This is typically called by
    /// [`CapabilityRegistry::register`](crate::CapabilityRegistry::register)
    /// rather than directly.
    #[must_use]
    #[inline]
    pub const fn new(index: u16) -> Self {
        Self(index)
    }

    /// Returns the underlying index of this capability ID.
    #[must_use]
    #[inline]
    pub const fn index(self) -> u16 {
        self.0
    }
}

impl fmt::Debug for CapabilityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CapabilityId").field(&self.0).finish()
    }
}

impl fmt::Display for CapabilityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CapabilityId({})", self.0)
    }
}

/// A type-safe capability key with phantom type for compile-time checking.
///
/// This wraps a [`CapabilityId`] with a phantom type parameter `T` that
/// represents the capability's instance type. Typed selector and property
/// block constructors use it to downcast instances safely.
///
/// # Memory Layout
///
/// `Capability<T>` is the same size as `CapabilityId` (2 bytes) since
/// `PhantomData` has zero size.
pub struct Capability<T> {
    id: CapabilityId,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Capability<T> {
    /// Creates a new typed capability from a capability ID.
    ///
    /// This is typically called by
    /// [`CapabilityRegistry::register`](crate::CapabilityRegistry::register)
    /// rather than directly. The caller must ensure the `CapabilityId` was
    /// registered with the same type `T`; mismatched types make every
    /// downcast fail at runtime.
    #[must_use]
    #[inline]
    pub const fn from_id(id: CapabilityId) -> Self {
        Self {
            id,
            _marker: PhantomData,
        }
    }

    /// Returns the underlying capability ID.
    #[must_use]
    #[inline]
    pub const fn id(self) -> CapabilityId {
        self.id
    }
}

// Manual trait implementations to avoid requiring T: Clone, etc.

impl<T> Copy for Capability<T> {}

impl<T> Clone for Capability<T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> PartialEq for Capability<T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for Capability<T> {}

impl<T> Hash for Capability<T> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<T> fmt::Debug for Capability<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Capability")
            .field("id", &self.id)
            .field("type", &core::any::type_name::<T>())
            .finish()
    }
}
