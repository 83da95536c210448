// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The external tree interface.
//!
//! The engine never owns the UI tree. Everything it needs to know about
//! elements, their hierarchy, and their capability instances flows through
//! the [`TreeProvider`] trait, implemented by the embedding toolkit (or by
//! [`TreeStore`](crate::TreeStore) for tests and simple hosts).

use alloc::vec::Vec;
use core::any::Any;

use crate::id::{CapabilityId, ElementId};

/// Read/write access to an external UI tree.
///
/// All read methods must be side-effect-free and deterministic for the
/// duration of a resolution pass: repeated calls with unchanged inputs
/// return identical results, and [`children`](Self::children) yields
/// document order.
///
/// [`capability_mut`](Self::capability_mut) is only called by the cascade
/// resolver while applying property blocks; matching itself never takes a
/// mutable borrow.
pub trait TreeProvider {
    /// Returns `true` if the element exposes the capability.
    fn has_capability(&self, element: ElementId, capability: CapabilityId) -> bool;

    /// Returns the element's instance of the capability, if exposed.
    fn capability(&self, element: ElementId, capability: CapabilityId) -> Option<&dyn Any>;

    /// Returns mutable access to the element's instance of the capability.
    fn capability_mut(
        &mut self,
        element: ElementId,
        capability: CapabilityId,
    ) -> Option<&mut dyn Any>;

    /// Returns the element's parent, or `None` for a root.
    fn parent(&self, element: ElementId) -> Option<ElementId>;

    /// Returns the element's children in document order.
    fn children(&self, element: ElementId) -> &[ElementId];

    /// Returns the element's display name, if it has one.
    fn name(&self, element: ElementId) -> Option<&str>;

    /// Appends every element in `root`'s subtree (root inclusive) exposing
    /// the capability, in depth-first document order.
    ///
    /// The default implementation walks [`children`](Self::children);
    /// providers with their own spatial or capability indexes may override
    /// it, as long as the order stays deterministic.
    fn collect_in_subtree(
        &self,
        root: ElementId,
        capability: CapabilityId,
        out: &mut Vec<ElementId>,
    ) {
        let mut stack: Vec<ElementId> = Vec::new();
        stack.push(root);
        while let Some(element) = stack.pop() {
            if self.has_capability(element, capability) {
                out.push(element);
            }
            // Reversed push keeps the pop order document order.
            for &child in self.children(element).iter().rev() {
                stack.push(child);
            }
        }
    }

    /// Appends every element sharing `element`'s parent, excluding
    /// `element` itself, in child order.
    fn collect_siblings(&self, element: ElementId, out: &mut Vec<ElementId>) {
        let Some(parent) = self.parent(element) else {
            return;
        };
        out.extend(
            self.children(parent)
                .iter()
                .copied()
                .filter(|&sibling| sibling != element),
        );
    }

    /// Returns `true` if `ancestor` is a strict ancestor of `element`.
    fn is_strict_ancestor(&self, ancestor: ElementId, element: ElementId) -> bool {
        let mut current = self.parent(element);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.parent(node);
        }
        false
    }
}
