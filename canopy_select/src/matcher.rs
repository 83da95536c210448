// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The selector matching engine.
//!
//! Matching is total and side-effect-free: a selector either matches a
//! candidate target element within a subtree or it does not. Absence of a
//! required relation is a normal "no match", never an error.
//!
//! Chains evaluate right-to-left from the target toward the first written
//! segment. Existential relations (`deep_in`, `near`, `from`) enumerate
//! candidate anchors in a deterministic order and backtrack: a candidate
//! rejected by a predicate or by the rest of the chain does not fail the
//! match while another candidate qualifies.

use alloc::vec::Vec;

use canopy_tree::{ElementId, TreeProvider};

use crate::segment::{Link, Predicate, Relation};
use crate::selector::SelectorSpec;

impl SelectorSpec {
    /// Returns `true` if this selector matches `target` within `root`'s
    /// subtree.
    ///
    /// `target` must expose the selector's target capability and every
    /// relational segment and predicate of the chain must hold.
    #[must_use]
    pub fn matches(
        &self,
        provider: &impl TreeProvider,
        root: ElementId,
        target: ElementId,
    ) -> bool {
        let links = &self.inner.links;
        let Some(target_link) = links.last() else {
            return false;
        };
        if !provider.has_capability(target, target_link.relation.capability()) {
            return false;
        }
        if !predicates_pass(provider, target, target_link) {
            return false;
        }
        match_leftward(provider, root, target, links, links.len() - 1, target)
    }

    /// Appends every element in `root`'s subtree matched by this selector,
    /// in depth-first document order.
    pub fn collect_matches(
        &self,
        provider: &impl TreeProvider,
        root: ElementId,
        out: &mut Vec<ElementId>,
    ) {
        let mut candidates = Vec::new();
        provider.collect_in_subtree(root, self.target(), &mut candidates);
        out.extend(
            candidates
                .into_iter()
                .filter(|&candidate| self.matches(provider, root, candidate)),
        );
    }
}

/// Matches `links[..idx]` against the chain state where `links[idx]` already
/// bound to `anchor`. `target` is the chain's target element, needed by
/// `from` segments whose resolver names it directly.
fn match_leftward(
    provider: &impl TreeProvider,
    root: ElementId,
    target: ElementId,
    links: &[Link],
    idx: usize,
    anchor: ElementId,
) -> bool {
    if idx == 0 {
        return true;
    }
    let link = &links[idx - 1];
    let capability = link.relation.capability();
    match &link.relation {
        // The target link is always last; it never appears here.
        Relation::Target(_) => false,
        Relation::On(_) => {
            provider.has_capability(anchor, capability)
                && predicates_pass(provider, anchor, link)
                && match_leftward(provider, root, target, links, idx - 1, anchor)
        }
        Relation::In(_) => {
            let Some(parent) = provider.parent(anchor) else {
                return false;
            };
            provider.has_capability(parent, capability)
                && predicates_pass(provider, parent, link)
                && match_leftward(provider, root, target, links, idx - 1, parent)
        }
        Relation::DeepIn(_) => {
            // Nearest ancestor first.
            let mut current = provider.parent(anchor);
            while let Some(ancestor) = current {
                if provider.has_capability(ancestor, capability)
                    && predicates_pass(provider, ancestor, link)
                    && match_leftward(provider, root, target, links, idx - 1, ancestor)
                {
                    return true;
                }
                current = provider.parent(ancestor);
            }
            false
        }
        Relation::Near(_) => {
            let mut siblings = Vec::new();
            provider.collect_siblings(anchor, &mut siblings);
            siblings.into_iter().any(|sibling| {
                provider.has_capability(sibling, capability)
                    && predicates_pass(provider, sibling, link)
                    && match_leftward(provider, root, target, links, idx - 1, sibling)
            })
        }
        Relation::From(_, resolver) => {
            let mut holders = Vec::new();
            provider.collect_in_subtree(root, capability, &mut holders);
            holders.into_iter().any(|holder| {
                provider
                    .capability(holder, capability)
                    .is_some_and(|instance| resolver(instance) == Some(target))
                    && predicates_pass(provider, holder, link)
                    && match_leftward(provider, root, target, links, idx - 1, holder)
            })
        }
    }
}

/// Evaluates a link's trailing predicates against its bound anchor element.
fn predicates_pass(provider: &impl TreeProvider, element: ElementId, link: &Link) -> bool {
    link.predicates.iter().all(|predicate| match predicate {
        Predicate::Instance(test) => provider
            .capability(element, link.relation.capability())
            .is_some_and(|instance| test(instance)),
        Predicate::Named(name) => provider.name(element) == Some(name.as_str()),
    })
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use canopy_tree::{Capability, CapabilityRegistry, ElementId, TreeStore};

    use crate::selector::SelectorBuilder;

    struct Button {
        enabled: bool,
    }
    struct Panel;
    struct Text;
    struct Tooltip {
        anchor: Option<ElementId>,
    }

    struct Fixture {
        tree: TreeStore,
        button: Capability<Button>,
        panel: Capability<Panel>,
        text: Capability<Text>,
        tooltip: Capability<Tooltip>,
    }

    fn fixture() -> Fixture {
        let mut registry = CapabilityRegistry::new();
        Fixture {
            tree: TreeStore::new(),
            button: registry.register::<Button>("Button"),
            panel: registry.register::<Panel>("Panel"),
            text: registry.register::<Text>("Text"),
            tooltip: registry.register::<Tooltip>("Tooltip"),
        }
    }

    #[test]
    fn bare_target_matches_every_holder() {
        let mut fx = fixture();
        let root = fx.tree.create();
        let a = fx.tree.create();
        let b = fx.tree.create();
        fx.tree.append_child(root, a);
        fx.tree.append_child(root, b);
        fx.tree.attach(a, fx.text, Text);
        fx.tree.attach(b, fx.text, Text);

        let spec = SelectorBuilder::new().target(fx.text).build().unwrap();
        let mut out = Vec::new();
        spec.collect_matches(&fx.tree, root, &mut out);
        assert_eq!(out, vec![a, b]);
    }

    #[test]
    fn on_requires_capability_on_same_element() {
        let mut fx = fixture();
        let root = fx.tree.create();
        let labeled_button = fx.tree.create();
        let plain_label = fx.tree.create();
        fx.tree.append_child(root, labeled_button);
        fx.tree.append_child(root, plain_label);
        fx.tree
            .attach(labeled_button, fx.button, Button { enabled: true });
        fx.tree.attach(labeled_button, fx.text, Text);
        fx.tree.attach(plain_label, fx.text, Text);

        let spec = SelectorBuilder::new()
            .on(fx.button)
            .target(fx.text)
            .build()
            .unwrap();

        // A text element lacking the Button capability does not match.
        assert!(spec.matches(&fx.tree, root, labeled_button));
        assert!(!spec.matches(&fx.tree, root, plain_label));
    }

    #[test]
    fn in_parent_checks_immediate_parent_only() {
        let mut fx = fixture();
        let root = fx.tree.create();
        let button = fx.tree.create();
        let wrapper = fx.tree.create();
        let direct = fx.tree.create();
        let nested = fx.tree.create();
        fx.tree.append_child(root, button);
        fx.tree.append_child(button, direct);
        fx.tree.append_child(button, wrapper);
        fx.tree.append_child(wrapper, nested);
        fx.tree.attach(button, fx.button, Button { enabled: true });
        fx.tree.attach(direct, fx.text, Text);
        fx.tree.attach(nested, fx.text, Text);

        let spec = SelectorBuilder::new()
            .in_parent(fx.button)
            .target(fx.text)
            .build()
            .unwrap();

        assert!(spec.matches(&fx.tree, root, direct));
        assert!(!spec.matches(&fx.tree, root, nested));
    }

    #[test]
    fn deep_in_matches_any_strict_ancestor() {
        let mut fx = fixture();
        let root = fx.tree.create();
        let panel = fx.tree.create();
        let mid = fx.tree.create();
        let leaf = fx.tree.create();
        fx.tree.append_child(root, panel);
        fx.tree.append_child(panel, mid);
        fx.tree.append_child(mid, leaf);
        fx.tree.attach(panel, fx.panel, Panel);
        fx.tree.attach(leaf, fx.text, Text);
        // The panel itself carrying Text must not satisfy "strict ancestor".
        fx.tree.attach(panel, fx.text, Text);

        let spec = SelectorBuilder::new()
            .deep_in(fx.panel)
            .target(fx.text)
            .build()
            .unwrap();

        assert!(spec.matches(&fx.tree, root, leaf));
        assert!(!spec.matches(&fx.tree, root, panel));
    }

    #[test]
    fn deep_in_backtracks_past_predicate_failures() {
        let mut fx = fixture();
        let root = fx.tree.create();
        let outer = fx.tree.create();
        let inner = fx.tree.create();
        let leaf = fx.tree.create();
        fx.tree.append_child(root, outer);
        fx.tree.append_child(outer, inner);
        fx.tree.append_child(inner, leaf);
        // Nearest Button ancestor is disabled; a farther one is enabled.
        fx.tree.attach(outer, fx.button, Button { enabled: true });
        fx.tree.attach(inner, fx.button, Button { enabled: false });
        fx.tree.attach(leaf, fx.text, Text);

        let spec = SelectorBuilder::new()
            .deep_in(fx.button)
            .where_(|b: &Button| b.enabled)
            .target(fx.text)
            .build()
            .unwrap();

        assert!(spec.matches(&fx.tree, root, leaf));
    }

    #[test]
    fn near_requires_a_qualifying_sibling() {
        let mut fx = fixture();
        let root = fx.tree.create();
        let label = fx.tree.create();
        let sibling = fx.tree.create();
        let lone = fx.tree.create();
        fx.tree.append_child(root, label);
        fx.tree.append_child(root, sibling);
        fx.tree.attach(label, fx.text, Text);
        fx.tree.attach(sibling, fx.button, Button { enabled: true });
        fx.tree.attach(lone, fx.text, Text);

        let spec = SelectorBuilder::new()
            .near(fx.button)
            .target(fx.text)
            .build()
            .unwrap();

        assert!(spec.matches(&fx.tree, root, label));
        assert!(!spec.matches(&fx.tree, lone, lone));
    }

    #[test]
    fn from_resolver_supplies_the_target() {
        let mut fx = fixture();
        let root = fx.tree.create();
        let tip = fx.tree.create();
        let label_a = fx.tree.create();
        let label_b = fx.tree.create();
        fx.tree.append_child(root, tip);
        fx.tree.append_child(root, label_a);
        fx.tree.append_child(root, label_b);
        fx.tree.attach(
            tip,
            fx.tooltip,
            Tooltip {
                anchor: Some(label_a),
            },
        );
        fx.tree.attach(label_a, fx.text, Text);
        fx.tree.attach(label_b, fx.text, Text);

        let spec = SelectorBuilder::new()
            .from(fx.tooltip, |t: &Tooltip| t.anchor)
            .target(fx.text)
            .build()
            .unwrap();

        assert!(spec.matches(&fx.tree, root, label_a));
        assert!(!spec.matches(&fx.tree, root, label_b));
    }

    #[test]
    fn from_resolver_none_is_no_match() {
        let mut fx = fixture();
        let root = fx.tree.create();
        let tip = fx.tree.create();
        let label = fx.tree.create();
        fx.tree.append_child(root, tip);
        fx.tree.append_child(root, label);
        fx.tree.attach(tip, fx.tooltip, Tooltip { anchor: None });
        fx.tree.attach(label, fx.text, Text);

        let spec = SelectorBuilder::new()
            .from(fx.tooltip, |t: &Tooltip| t.anchor)
            .target(fx.text)
            .build()
            .unwrap();

        let mut out = Vec::new();
        spec.collect_matches(&fx.tree, root, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn mistyped_predicate_never_passes() {
        let mut fx = fixture();
        let root = fx.tree.create();
        let labeled = fx.tree.create();
        fx.tree.append_child(root, labeled);
        fx.tree.attach(labeled, fx.button, Button { enabled: true });
        fx.tree.attach(labeled, fx.text, Text);

        // The predicate downcasts the Button instance to Text; the failed
        // downcast counts as false, not as a skipped check.
        let spec = SelectorBuilder::new()
            .on(fx.button)
            .where_(|_: &Text| true)
            .target(fx.text)
            .build()
            .unwrap();

        assert!(!spec.matches(&fx.tree, root, labeled));
    }

    #[test]
    fn mistyped_from_resolver_is_no_match() {
        let mut fx = fixture();
        let root = fx.tree.create();
        let tip = fx.tree.create();
        let label = fx.tree.create();
        fx.tree.append_child(root, tip);
        fx.tree.append_child(root, label);
        fx.tree.attach(
            tip,
            fx.tooltip,
            Tooltip {
                anchor: Some(label),
            },
        );
        fx.tree.attach(label, fx.text, Text);

        // A handle carrying the Tooltip id but the Button instance type:
        // the resolver's downcast fails and resolves to no element.
        let mistyped: Capability<Button> = Capability::from_id(fx.tooltip.id());
        let spec = SelectorBuilder::new()
            .from(mistyped, move |_: &Button| Some(label))
            .target(fx.text)
            .build()
            .unwrap();

        assert!(!spec.matches(&fx.tree, root, label));
    }

    #[test]
    fn named_predicate_tests_display_name() {
        let mut fx = fixture();
        let root = fx.tree.create();
        let title = fx.tree.create_named("title");
        let body = fx.tree.create_named("body");
        fx.tree.append_child(root, title);
        fx.tree.append_child(root, body);
        fx.tree.attach(title, fx.text, Text);
        fx.tree.attach(body, fx.text, Text);

        let spec = SelectorBuilder::new()
            .target(fx.text)
            .named("title")
            .build()
            .unwrap();

        assert!(spec.matches(&fx.tree, root, title));
        assert!(!spec.matches(&fx.tree, root, body));
    }

    #[test]
    fn matches_is_scoped_to_the_subtree() {
        let mut fx = fixture();
        let root = fx.tree.create();
        let scope = fx.tree.create();
        let inside = fx.tree.create();
        let outside = fx.tree.create();
        fx.tree.append_child(root, scope);
        fx.tree.append_child(scope, inside);
        fx.tree.append_child(root, outside);
        fx.tree.attach(inside, fx.text, Text);
        fx.tree.attach(outside, fx.text, Text);

        let spec = SelectorBuilder::new().target(fx.text).build().unwrap();
        let mut out = Vec::new();
        spec.collect_matches(&fx.tree, scope, &mut out);
        assert_eq!(out, vec![inside]);
    }
}
