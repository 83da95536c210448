// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Capability registry.
//!
//! This module provides [`CapabilityRegistry`] for registering capability
//! kinds and looking them up by name or ID.

use alloc::vec::Vec;
use core::any::TypeId;
use hashbrown::HashMap;

use crate::id::{Capability, CapabilityId};

/// A registration entry for a capability kind.
#[derive(Debug)]
pub struct CapabilityRegistration {
    name: &'static str,
    type_id: TypeId,
}

impl CapabilityRegistration {
    /// Returns the capability name.
    #[must_use]
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the [`TypeId`] of the capability's instance type.
    #[must_use]
    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }
}

/// A registry for capability kinds.
///
/// Capabilities are registered once at startup, before any selector or
/// sheet is constructed. The registry provides lookup by name or ID.
///
/// # Example
///
/// ```rust
/// use canopy_tree::CapabilityRegistry;
///
/// #[derive(Debug)]
/// struct Text { content: String }
///
/// let mut registry = CapabilityRegistry::new();
/// let text = registry.register::<Text>("Text");
///
/// assert_eq!(registry.name(text.id()), Some("Text"));
/// assert_eq!(registry.by_name("Text"), Some(text.id()));
/// ```
#[derive(Default)]
pub struct CapabilityRegistry {
    capabilities: Vec<CapabilityRegistration>,
    by_name: HashMap<&'static str, CapabilityId>,
}

impl CapabilityRegistry {
    /// Creates a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new capability kind with the given name.
    ///
    /// Returns a type-safe [`Capability<T>`] handle for use in selectors
    /// and property blocks.
    ///
    /// # Panics
    ///
    /// Panics if a capability with the same name is already registered,
    /// or if more than 65,536 capabilities are registered.
    pub fn register<T: 'static>(&mut self, name: &'static str) -> Capability<T> {
        assert!(
            !self.by_name.contains_key(name),
            "Capability '{name}' is already registered"
        );
        assert!(
            self.capabilities.len() < u16::MAX as usize,
            "Too many capabilities registered (max {})",
            u16::MAX
        );

        #[expect(clippy::cast_possible_truncation, reason = "checked above")]
        let id = CapabilityId::new(self.capabilities.len() as u16);

        self.capabilities.push(CapabilityRegistration {
            name,
            type_id: TypeId::of::<T>(),
        });
        self.by_name.insert(name, id);

        Capability::from_id(id)
    }

    /// Returns the number of registered capabilities.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.capabilities.len()
    }

    /// Returns `true` if no capabilities are registered.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.capabilities.is_empty()
    }

    /// Looks up a capability by name.
    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<CapabilityId> {
        self.by_name.get(name).copied()
    }

    /// Returns the name of a capability.
    #[must_use]
    pub fn name(&self, id: CapabilityId) -> Option<&'static str> {
        self.capabilities.get(id.index() as usize).map(|r| r.name)
    }

    /// Returns the registration for a capability.
    #[must_use]
    pub fn get(&self, id: CapabilityId) -> Option<&CapabilityRegistration> {
        self.capabilities.get(id.index() as usize)
    }

    /// Returns an iterator over all registered capabilities.
    pub fn iter(&self) -> impl Iterator<Item = (CapabilityId, &CapabilityRegistration)> {
        self.capabilities.iter().enumerate().map(|(i, r)| {
            #[expect(clippy::cast_possible_truncation, reason = "index < len < u16::MAX")]
            (CapabilityId::new(i as u16), r)
        })
    }
}

impl core::fmt::Debug for CapabilityRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CapabilityRegistry")
            .field("count", &self.capabilities.len())
            .field("capabilities", &self.by_name.keys().collect::<Vec<_>>())
            .finish()
    }
}
