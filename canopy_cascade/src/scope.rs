// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Style scopes and sheet inheritance.
//!
//! A style scope (a "style node") roots a subtree: it holds its
//! own sheets, a [`Dynamicity`] mode, and inherits the sheets of every
//! ancestor scope. Scopes compose by concatenation, never by overriding —
//! a descendant adds its sheets after its ancestors' and cannot remove
//! them from consideration.

use alloc::vec::Vec;

use hashbrown::HashMap;

use canopy_select::StyleSheet;
use canopy_tree::{ElementId, TreeProvider};

use crate::fallback::FallbackRegistry;

/// When resolution passes are triggered for a scope.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Dynamicity {
    /// Resolution runs only on an explicit
    /// [`apply_once`](crate::Styler::apply_once); never automatically.
    #[default]
    Never,
    /// Resolution runs on activation and on every explicit invalidation.
    OnChange,
    /// `OnChange` triggers plus one pass per external tick.
    EveryTick,
}

#[derive(Debug, Default)]
struct ScopeState {
    own: Vec<StyleSheet>,
    dynamicity: Dynamicity,
    cache: Option<EffectiveCache>,
}

#[derive(Debug)]
struct EffectiveCache {
    generation: u64,
    sheets: Vec<StyleSheet>,
}

/// The registry of declared style scopes.
///
/// Scopes are keyed by the element they root at. The effective sheet set
/// of a scope is computed lazily and cached; any own-sheet change or
/// explicit invalidation bumps a generation counter that stales every
/// cache at once.
#[derive(Debug, Default)]
pub struct StyleScopes {
    scopes: HashMap<ElementId, ScopeState>,
    generation: u64,
}

impl StyleScopes {
    /// Creates an empty scope registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares `element` as a scope root with the given dynamicity.
    ///
    /// Re-declaring an existing scope only updates its dynamicity; its
    /// own sheets are kept.
    pub fn declare(&mut self, element: ElementId, dynamicity: Dynamicity) {
        self.scopes.entry(element).or_default().dynamicity = dynamicity;
        self.invalidate();
    }

    /// Removes the scope rooted at `element`, returning whether one
    /// existed.
    pub fn remove(&mut self, element: ElementId) -> bool {
        let removed = self.scopes.remove(&element).is_some();
        if removed {
            self.invalidate();
        }
        removed
    }

    /// Returns `true` if `element` roots a scope.
    #[must_use]
    pub fn contains(&self, element: ElementId) -> bool {
        self.scopes.contains_key(&element)
    }

    /// Returns the dynamicity of the scope rooted at `element`.
    #[must_use]
    pub fn dynamicity(&self, element: ElementId) -> Option<Dynamicity> {
        self.scopes.get(&element).map(|s| s.dynamicity)
    }

    /// Returns the own sheets of the scope rooted at `element`.
    #[must_use]
    pub fn own_sheets(&self, element: ElementId) -> &[StyleSheet] {
        self.scopes.get(&element).map_or(&[], |s| s.own.as_slice())
    }

    /// Appends a sheet to the scope's own set.
    ///
    /// # Panics
    ///
    /// Panics if `element` does not root a declared scope.
    pub fn push_sheet(&mut self, element: ElementId, sheet: StyleSheet) {
        let Some(state) = self.scopes.get_mut(&element) else {
            panic!("no style scope declared for {element}");
        };
        state.own.push(sheet);
        self.invalidate();
    }

    /// Replaces the scope's own sheet set.
    ///
    /// # Panics
    ///
    /// Panics if `element` does not root a declared scope.
    pub fn set_sheets(&mut self, element: ElementId, sheets: Vec<StyleSheet>) {
        let Some(state) = self.scopes.get_mut(&element) else {
            panic!("no style scope declared for {element}");
        };
        state.own = sheets;
        self.invalidate();
    }

    /// Stales every cached effective sheet set.
    ///
    /// Recomputation happens lazily on the next
    /// [`effective_sheets`](Self::effective_sheets) call.
    pub fn invalidate(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    /// Returns the nearest scope root at or above `element`.
    #[must_use]
    pub fn nearest(&self, provider: &impl TreeProvider, element: ElementId) -> Option<ElementId> {
        let mut current = Some(element);
        while let Some(node) = current {
            if self.scopes.contains_key(&node) {
                return Some(node);
            }
            current = provider.parent(node);
        }
        None
    }

    /// Returns every declared scope with the given dynamicity.
    pub fn with_dynamicity(
        &self,
        dynamicity: Dynamicity,
    ) -> impl Iterator<Item = ElementId> + '_ {
        self.scopes
            .iter()
            .filter(move |(_, state)| state.dynamicity == dynamicity)
            .map(|(&element, _)| element)
    }

    /// Returns the effective sheet set of the scope rooted at `element`.
    ///
    /// The set is `flatten(ancestor own-sets, root-to-node order)` followed
    /// by the scope's own sheets, de-duplicated by sheet identity. If both
    /// own and inherited sets are empty, the fallback registry's sheets are
    /// returned instead.
    ///
    /// # Panics
    ///
    /// Panics if `element` does not root a declared scope.
    pub fn effective_sheets(
        &mut self,
        provider: &impl TreeProvider,
        element: ElementId,
        fallback: &FallbackRegistry,
    ) -> &[StyleSheet] {
        assert!(
            self.scopes.contains_key(&element),
            "no style scope declared for {element}"
        );

        let generation = self.generation;
        let fresh = self.scopes[&element]
            .cache
            .as_ref()
            .is_some_and(|cache| cache.generation == generation);
        if !fresh {
            let sheets = self.compute_effective(provider, element, fallback);
            let state = self
                .scopes
                .get_mut(&element)
                .unwrap_or_else(|| panic!("no style scope declared for {element}"));
            state.cache = Some(EffectiveCache { generation, sheets });
        }
        self.scopes[&element]
            .cache
            .as_ref()
            .map_or(&[], |cache| cache.sheets.as_slice())
    }

    fn compute_effective(
        &self,
        provider: &impl TreeProvider,
        element: ElementId,
        fallback: &FallbackRegistry,
    ) -> Vec<StyleSheet> {
        // Scope roots on the path from the tree root down to `element`.
        let mut chain: Vec<ElementId> = Vec::new();
        let mut current = Some(element);
        while let Some(node) = current {
            if self.scopes.contains_key(&node) {
                chain.push(node);
            }
            current = provider.parent(node);
        }
        chain.reverse();

        let mut effective: Vec<StyleSheet> = Vec::new();
        for node in chain {
            for sheet in &self.scopes[&node].own {
                if !effective.iter().any(|seen| seen.same(sheet)) {
                    effective.push(sheet.clone());
                }
            }
        }

        if effective.is_empty() {
            effective.extend(fallback.sheets().iter().cloned());
        }
        effective
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fallback::FallbackRegistryBuilder;
    use alloc::vec;
    use canopy_select::StyleSheetBuilder;
    use canopy_tree::TreeStore;

    fn sheet() -> StyleSheet {
        StyleSheetBuilder::new().build()
    }

    fn chain_tree() -> (TreeStore, ElementId, ElementId, ElementId) {
        let mut tree = TreeStore::new();
        let root = tree.create();
        let mid = tree.create();
        let leaf = tree.create();
        tree.append_child(root, mid);
        tree.append_child(mid, leaf);
        (tree, root, mid, leaf)
    }

    #[test]
    fn effective_falls_back_when_empty() {
        let (tree, root, _, _) = chain_tree();
        let default_sheet = sheet();
        let fallback = FallbackRegistryBuilder::new()
            .sheet(default_sheet.clone())
            .build();

        let mut scopes = StyleScopes::new();
        scopes.declare(root, Dynamicity::Never);

        let effective = scopes.effective_sheets(&tree, root, &fallback);
        assert_eq!(effective.len(), 1);
        assert!(effective[0].same(&default_sheet));
    }

    #[test]
    fn effective_concatenates_root_to_node() {
        let (tree, root, _, leaf) = chain_tree();
        let fallback = FallbackRegistry::empty();
        let root_sheet = sheet();
        let leaf_sheet = sheet();

        let mut scopes = StyleScopes::new();
        scopes.declare(root, Dynamicity::Never);
        scopes.declare(leaf, Dynamicity::Never);
        scopes.push_sheet(root, root_sheet.clone());
        scopes.push_sheet(leaf, leaf_sheet.clone());

        let effective = scopes.effective_sheets(&tree, leaf, &fallback);
        assert_eq!(effective.len(), 2);
        assert!(effective[0].same(&root_sheet));
        assert!(effective[1].same(&leaf_sheet));
    }

    #[test]
    fn effective_dedups_by_identity() {
        let (tree, root, _, leaf) = chain_tree();
        let fallback = FallbackRegistry::empty();
        let shared = sheet();

        let mut scopes = StyleScopes::new();
        scopes.declare(root, Dynamicity::Never);
        scopes.declare(leaf, Dynamicity::Never);
        scopes.push_sheet(root, shared.clone());
        scopes.push_sheet(leaf, shared.clone());

        let effective = scopes.effective_sheets(&tree, leaf, &fallback);
        assert_eq!(effective.len(), 1);
        assert!(effective[0].same(&shared));
    }

    #[test]
    fn inherited_sheets_win_fallback() {
        // A scope with only inherited sheets must not see the fallback.
        let (tree, root, _, leaf) = chain_tree();
        let default_sheet = sheet();
        let fallback = FallbackRegistryBuilder::new().sheet(default_sheet).build();
        let root_sheet = sheet();

        let mut scopes = StyleScopes::new();
        scopes.declare(root, Dynamicity::Never);
        scopes.declare(leaf, Dynamicity::Never);
        scopes.push_sheet(root, root_sheet.clone());

        let effective = scopes.effective_sheets(&tree, leaf, &fallback);
        assert_eq!(effective.len(), 1);
        assert!(effective[0].same(&root_sheet));
    }

    #[test]
    fn cache_stales_on_sheet_change() {
        let (tree, root, _, _) = chain_tree();
        let fallback = FallbackRegistry::empty();

        let mut scopes = StyleScopes::new();
        scopes.declare(root, Dynamicity::Never);
        assert!(scopes.effective_sheets(&tree, root, &fallback).is_empty());

        let added = sheet();
        scopes.push_sheet(root, added.clone());
        let effective = scopes.effective_sheets(&tree, root, &fallback);
        assert_eq!(effective.len(), 1);
        assert!(effective[0].same(&added));
    }

    #[test]
    fn nearest_walks_upward() {
        let (tree, root, mid, leaf) = chain_tree();
        let mut scopes = StyleScopes::new();
        scopes.declare(root, Dynamicity::Never);

        assert_eq!(scopes.nearest(&tree, leaf), Some(root));
        assert_eq!(scopes.nearest(&tree, mid), Some(root));
        assert_eq!(scopes.nearest(&tree, root), Some(root));

        scopes.declare(mid, Dynamicity::Never);
        assert_eq!(scopes.nearest(&tree, leaf), Some(mid));
    }

    #[test]
    fn declare_keeps_own_sheets() {
        let (_, root, _, _) = chain_tree();
        let mut scopes = StyleScopes::new();
        scopes.declare(root, Dynamicity::Never);
        scopes.push_sheet(root, sheet());
        scopes.declare(root, Dynamicity::EveryTick);

        assert_eq!(scopes.own_sheets(root).len(), 1);
        assert_eq!(scopes.dynamicity(root), Some(Dynamicity::EveryTick));
    }

    #[test]
    fn with_dynamicity_filters() {
        let (_, root, mid, leaf) = chain_tree();
        let mut scopes = StyleScopes::new();
        scopes.declare(root, Dynamicity::Never);
        scopes.declare(mid, Dynamicity::EveryTick);
        scopes.declare(leaf, Dynamicity::EveryTick);

        let mut ticking: Vec<_> = scopes.with_dynamicity(Dynamicity::EveryTick).collect();
        ticking.sort();
        assert_eq!(ticking, vec![mid, leaf]);
    }

    #[test]
    #[should_panic(expected = "no style scope declared")]
    fn push_sheet_requires_scope() {
        let mut scopes = StyleScopes::new();
        scopes.push_sheet(ElementId::new(0), sheet());
    }
}
