// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory reference tree.
//!
//! [`TreeStore`] is a self-contained [`TreeProvider`] implementation for
//! tests and for hosts without a toolkit bridge. Real embedders typically
//! implement [`TreeProvider`] directly over their own scene graph instead.

use alloc::string::String;
use alloc::vec::Vec;
use core::any::Any;

use smallvec::SmallVec;

use crate::id::{Capability, CapabilityId, ElementId};
use crate::provider::TreeProvider;
use crate::value::ErasedValue;

/// Inline capacity for per-element capability sets.
///
/// Most UI elements expose a handful of capabilities; 4 covers the common
/// case without heap allocation.
const INLINE_CAPACITY: usize = 4;

#[derive(Debug, Default)]
struct NodeData {
    name: Option<String>,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    /// Sorted by `CapabilityId` for binary search lookup.
    capabilities: SmallVec<[(CapabilityId, ErasedValue); INLINE_CAPACITY]>,
}

/// An owned, in-memory UI tree.
///
/// Elements are created through the store and identified by [`ElementId`].
/// Each element may carry at most one instance per capability kind; the
/// capability set may change between resolution passes.
///
/// # Example
///
/// ```rust
/// use canopy_tree::{CapabilityRegistry, TreeProvider, TreeStore};
///
/// struct Label { text: String }
///
/// let mut registry = CapabilityRegistry::new();
/// let label = registry.register::<Label>("Label");
///
/// let mut tree = TreeStore::new();
/// let root = tree.create_named("window");
/// let child = tree.create_named("title");
/// tree.append_child(root, child);
/// tree.attach(child, label, Label { text: "hello".into() });
///
/// assert!(tree.has_capability(child, label.id()));
/// assert_eq!(tree.parent(child), Some(root));
/// ```
#[derive(Debug, Default)]
pub struct TreeStore {
    nodes: Vec<NodeData>,
}

impl TreeStore {
    /// Creates a new empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of elements in the tree.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the tree has no elements.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Creates a new detached, unnamed element.
    pub fn create(&mut self) -> ElementId {
        let id = ElementId::new(self.nodes.len() as u64);
        self.nodes.push(NodeData::default());
        id
    }

    /// Creates a new detached element with a display name.
    pub fn create_named(&mut self, name: impl Into<String>) -> ElementId {
        let id = self.create();
        self.node_mut(id).name = Some(name.into());
        id
    }

    /// Appends `child` as the last child of `parent`.
    ///
    /// # Panics
    ///
    /// Panics if `child` already has a parent or if `child == parent`.
    pub fn append_child(&mut self, parent: ElementId, child: ElementId) {
        assert_ne!(parent, child, "an element cannot be its own child");
        assert!(
            self.node(child).parent.is_none(),
            "{child} already has a parent"
        );
        self.node_mut(child).parent = Some(parent);
        self.node_mut(parent).children.push(child);
    }

    /// Attaches a capability instance to an element.
    ///
    /// If the element already carries an instance of this capability kind,
    /// the instance is replaced.
    pub fn attach<T: 'static>(&mut self, element: ElementId, capability: Capability<T>, value: T) {
        let entries = &mut self.node_mut(element).capabilities;
        let erased = ErasedValue::new(value);
        match entries.binary_search_by_key(&capability.id(), |(id, _)| *id) {
            Ok(idx) => entries[idx].1 = erased,
            Err(idx) => entries.insert(idx, (capability.id(), erased)),
        }
    }

    /// Detaches a capability instance from an element, returning whether
    /// one was present.
    pub fn detach(&mut self, element: ElementId, capability: CapabilityId) -> bool {
        let entries = &mut self.node_mut(element).capabilities;
        match entries.binary_search_by_key(&capability, |(id, _)| *id) {
            Ok(idx) => {
                entries.remove(idx);
                true
            }
            Err(_) => false,
        }
    }

    /// Returns a typed reference to an element's capability instance.
    #[must_use]
    pub fn capability_of<T: 'static>(
        &self,
        element: ElementId,
        capability: Capability<T>,
    ) -> Option<&T> {
        let entries = &self.node(element).capabilities;
        entries
            .binary_search_by_key(&capability.id(), |(id, _)| *id)
            .ok()
            .and_then(|idx| entries[idx].1.downcast_ref())
    }

    /// Returns a typed mutable reference to an element's capability
    /// instance.
    #[must_use]
    pub fn capability_of_mut<T: 'static>(
        &mut self,
        element: ElementId,
        capability: Capability<T>,
    ) -> Option<&mut T> {
        let entries = &mut self.node_mut(element).capabilities;
        entries
            .binary_search_by_key(&capability.id(), |(id, _)| *id)
            .ok()
            .and_then(|idx| entries[idx].1.downcast_mut())
    }

    fn node(&self, element: ElementId) -> &NodeData {
        #[expect(clippy::cast_possible_truncation, reason = "store ids are vec indices")]
        let index = element.index() as usize;
        &self.nodes[index]
    }

    fn node_mut(&mut self, element: ElementId) -> &mut NodeData {
        #[expect(clippy::cast_possible_truncation, reason = "store ids are vec indices")]
        let index = element.index() as usize;
        &mut self.nodes[index]
    }
}

impl TreeProvider for TreeStore {
    fn has_capability(&self, element: ElementId, capability: CapabilityId) -> bool {
        self.node(element)
            .capabilities
            .binary_search_by_key(&capability, |(id, _)| *id)
            .is_ok()
    }

    fn capability(&self, element: ElementId, capability: CapabilityId) -> Option<&dyn Any> {
        let entries = &self.node(element).capabilities;
        entries
            .binary_search_by_key(&capability, |(id, _)| *id)
            .ok()
            .map(|idx| entries[idx].1.as_any())
    }

    fn capability_mut(
        &mut self,
        element: ElementId,
        capability: CapabilityId,
    ) -> Option<&mut dyn Any> {
        let entries = &mut self.node_mut(element).capabilities;
        entries
            .binary_search_by_key(&capability, |(id, _)| *id)
            .ok()
            .map(|idx| entries[idx].1.as_any_mut())
    }

    fn parent(&self, element: ElementId) -> Option<ElementId> {
        self.node(element).parent
    }

    fn children(&self, element: ElementId) -> &[ElementId] {
        &self.node(element).children
    }

    fn name(&self, element: ElementId) -> Option<&str> {
        self.node(element).name.as_deref()
    }
}
