// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The dynamicity scheduler.
//!
//! [`Styler`] is the host-facing entry point of the cascade: it owns the
//! scope registry, the fallback sheets, and the pass scratch, and decides
//! when resolution runs. All triggers are explicit and synchronous; the
//! engine never schedules work on its own.

use alloc::vec::Vec;

use canopy_select::StyleSheet;
use canopy_tree::{ElementId, TreeProvider};

use crate::error::PassError;
use crate::fallback::FallbackRegistry;
use crate::resolve::{PassReport, PassScratch, resolve};
use crate::scope::{Dynamicity, StyleScopes};

/// Owns style scopes and schedules resolution passes.
///
/// Triggers map to [`Dynamicity`] as follows:
///
/// | trigger                | `Never` | `OnChange` | `EveryTick` |
/// |------------------------|---------|------------|-------------|
/// | [`apply_once`]         | runs    | runs       | runs        |
/// | [`activate`]           | skipped | runs       | runs        |
/// | [`notify_invalidated`] | skipped | runs       | runs        |
/// | [`tick`]               | skipped | skipped    | runs        |
///
/// [`apply_once`]: Self::apply_once
/// [`activate`]: Self::activate
/// [`notify_invalidated`]: Self::notify_invalidated
/// [`tick`]: Self::tick
///
/// Passes borrow the styler and the provider mutably, so a pass can never
/// re-enter the scheduler.
#[derive(Debug, Default)]
pub struct Styler {
    scopes: StyleScopes,
    fallback: FallbackRegistry,
    scratch: PassScratch,
}

impl Styler {
    /// Creates a styler with no fallback sheets.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a styler with the given fallback registry.
    #[must_use]
    pub fn with_fallback(fallback: FallbackRegistry) -> Self {
        Self {
            scopes: StyleScopes::new(),
            fallback,
            scratch: PassScratch::new(),
        }
    }

    /// Returns the fallback registry.
    #[must_use]
    pub fn fallback(&self) -> &FallbackRegistry {
        &self.fallback
    }

    /// Returns the scope registry.
    #[must_use]
    pub fn scopes(&self) -> &StyleScopes {
        &self.scopes
    }

    /// Declares `element` as a style node with the given dynamicity.
    ///
    /// Re-declaring updates the dynamicity and keeps the node's sheets.
    pub fn declare_node(&mut self, element: ElementId, dynamicity: Dynamicity) {
        self.scopes.declare(element, dynamicity);
    }

    /// Removes the style node rooted at `element`, returning whether one
    /// existed.
    pub fn remove_node(&mut self, element: ElementId) -> bool {
        self.scopes.remove(element)
    }

    /// Appends a sheet to a node's own set.
    ///
    /// # Panics
    ///
    /// Panics if `element` is not a declared style node.
    pub fn push_sheet(&mut self, element: ElementId, sheet: StyleSheet) {
        self.scopes.push_sheet(element, sheet);
    }

    /// Replaces a node's own sheet set.
    ///
    /// # Panics
    ///
    /// Panics if `element` is not a declared style node.
    pub fn set_sheets(&mut self, element: ElementId, sheets: Vec<StyleSheet>) {
        self.scopes.set_sheets(element, sheets);
    }

    /// Runs one pass over `root`'s subtree.
    ///
    /// The pass uses the effective sheet set of the nearest style node at
    /// or above `root`, or the fallback sheets if no node encloses it.
    /// This is the only trigger that resolves a `Never` node, and it never
    /// auto-repeats.
    ///
    /// # Errors
    ///
    /// Propagates the first failing property block; earlier effects are
    /// kept.
    pub fn apply_once(
        &mut self,
        provider: &mut impl TreeProvider,
        root: ElementId,
    ) -> Result<PassReport, PassError> {
        match self.scopes.nearest(&*provider, root) {
            Some(node) => {
                let sheets = self.scopes.effective_sheets(&*provider, node, &self.fallback);
                resolve(provider, root, sheets, &mut self.scratch)
            }
            None => resolve(provider, root, self.fallback.sheets(), &mut self.scratch),
        }
    }

    /// Runs one pass over `node`'s subtree if its dynamicity asks for a
    /// pass on activation.
    ///
    /// Returns `Ok(None)` if `node` is undeclared or `Never`.
    ///
    /// # Errors
    ///
    /// Propagates the first failing property block.
    pub fn activate(
        &mut self,
        provider: &mut impl TreeProvider,
        node: ElementId,
    ) -> Result<Option<PassReport>, PassError> {
        match self.scopes.dynamicity(node) {
            Some(Dynamicity::OnChange | Dynamicity::EveryTick) => {
                let sheets = self.scopes.effective_sheets(&*provider, node, &self.fallback);
                resolve(provider, node, sheets, &mut self.scratch).map(Some)
            }
            Some(Dynamicity::Never) | None => Ok(None),
        }
    }

    /// Stales every cached effective sheet set without running a pass.
    ///
    /// This is a cache hint only: recomputation is lazy and an `OnChange`
    /// node is not re-resolved until its next trigger. Hosts reporting a
    /// change that should restyle immediately call
    /// [`notify_invalidated`](Self::notify_invalidated) instead.
    pub fn invalidate(&mut self) {
        self.scopes.invalidate();
    }

    /// Invalidates and immediately re-resolves `node` if its dynamicity
    /// reacts to changes.
    ///
    /// Returns `Ok(None)` if `node` is undeclared or `Never` (the
    /// invalidation still happens).
    ///
    /// # Errors
    ///
    /// Propagates the first failing property block.
    pub fn notify_invalidated(
        &mut self,
        provider: &mut impl TreeProvider,
        node: ElementId,
    ) -> Result<Option<PassReport>, PassError> {
        self.scopes.invalidate();
        self.activate(provider, node)
    }

    /// Runs one pass per `EveryTick` node over its own subtree.
    ///
    /// Nodes run ancestor-first in deterministic order (tree depth, then
    /// element id); each pass is independent and observes the effects of
    /// the passes before it.
    ///
    /// # Errors
    ///
    /// The first failing node's error is returned; effects of every
    /// already-completed node are kept.
    pub fn tick(&mut self, provider: &mut impl TreeProvider) -> Result<PassReport, PassError> {
        let mut nodes: Vec<(usize, ElementId)> = self
            .scopes
            .with_dynamicity(Dynamicity::EveryTick)
            .map(|node| (depth(&*provider, node), node))
            .collect();
        nodes.sort_unstable();

        let mut report = PassReport::default();
        for (_, node) in nodes {
            let sheets = self.scopes.effective_sheets(&*provider, node, &self.fallback);
            report.merge(resolve(provider, node, sheets, &mut self.scratch)?);
        }
        Ok(report)
    }
}

fn depth(provider: &impl TreeProvider, element: ElementId) -> usize {
    let mut depth = 0;
    let mut current = provider.parent(element);
    while let Some(node) = current {
        depth += 1;
        current = provider.parent(node);
    }
    depth
}
