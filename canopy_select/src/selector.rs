// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Builder-sealed selector specifications.
//!
//! A [`SelectorSpec`] describes a tree-relative match: zero or more
//! relational segments plus optional predicates, terminated by exactly one
//! target segment. Specs are assembled by [`SelectorBuilder`] and sealed by
//! [`SelectorBuilder::build`], which validates the chain eagerly; matching
//! itself (see [`SelectorSpec::matches`](crate::SelectorSpec::matches))
//! never fails.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use canopy_tree::{Capability, CapabilityId, ElementId};

use crate::segment::{Link, Predicate, Relation, Segment};
use crate::specificity::Specificity;

/// Error sealing a malformed selector chain.
///
/// Reported at build time, before any sheet or rule exists; matching never
/// produces errors.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SelectorError {
    /// The chain has no terminal target segment.
    MissingTarget,
    /// The chain has more than one target segment.
    MultipleTargets,
    /// A relational segment follows the target segment.
    SegmentAfterTarget,
    /// A predicate appears before any relational or target segment.
    PredicateWithoutAnchor,
}

impl fmt::Display for SelectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingTarget => f.write_str("selector chain has no target segment"),
            Self::MultipleTargets => f.write_str("selector chain has more than one target segment"),
            Self::SegmentAfterTarget => {
                f.write_str("relational segment appears after the target segment")
            }
            Self::PredicateWithoutAnchor => {
                f.write_str("predicate has no preceding segment to anchor to")
            }
        }
    }
}

impl core::error::Error for SelectorError {}

/// Internal immutable selector data.
#[derive(Debug)]
pub(crate) struct SpecData {
    /// Chain in written (root-to-target) order; the last link is the target.
    pub(crate) links: Box<[Link]>,
    pub(crate) target: CapabilityId,
    pub(crate) specificity: Specificity,
}

/// An immutable, sealed tree-relative match description.
///
/// Cloning is cheap (`Rc`); a spec can be shared between rule alternatives
/// and sheets.
///
/// # Example
///
/// ```rust
/// use canopy_select::SelectorBuilder;
/// use canopy_tree::CapabilityRegistry;
///
/// struct Button { enabled: bool }
/// struct Text;
///
/// let mut registry = CapabilityRegistry::new();
/// let button = registry.register::<Button>("Button");
/// let text = registry.register::<Text>("Text");
///
/// // Text elements whose immediate parent is an enabled Button.
/// let spec = SelectorBuilder::new()
///     .in_parent(button)
///     .where_(|b: &Button| b.enabled)
///     .target(text)
///     .build()
///     .unwrap();
///
/// assert_eq!(spec.target(), text.id());
/// assert_eq!(spec.specificity().relations(), 1);
/// assert_eq!(spec.specificity().predicates(), 1);
/// ```
#[derive(Clone)]
pub struct SelectorSpec {
    pub(crate) inner: Rc<SpecData>,
}

impl SelectorSpec {
    /// Returns the capability the selector targets.
    #[must_use]
    #[inline]
    pub fn target(&self) -> CapabilityId {
        self.inner.target
    }

    /// Returns the selector's specificity key.
    #[must_use]
    #[inline]
    pub fn specificity(&self) -> Specificity {
        self.inner.specificity
    }
}

impl fmt::Debug for SelectorSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectorSpec")
            .field("links", &self.inner.links)
            .field("specificity", &self.inner.specificity)
            .finish()
    }
}

/// Builder for [`SelectorSpec`] instances.
///
/// Segments are appended in written order; the chain is evaluated from the
/// target back toward its first segment. Each predicate
/// ([`where_`](Self::where_), [`named`](Self::named)) filters the segment
/// immediately before it.
#[derive(Debug, Default)]
pub struct SelectorBuilder {
    segments: Vec<Segment>,
}

impl SelectorBuilder {
    /// Creates a new empty selector builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requires the anchor element itself to expose `capability`.
    #[must_use]
    pub fn on<P: 'static>(self, capability: Capability<P>) -> Self {
        self.push(Segment::Relation(Relation::On(capability.id())))
    }

    /// Requires the anchor's immediate parent to expose `capability`.
    #[must_use]
    pub fn in_parent<P: 'static>(self, capability: Capability<P>) -> Self {
        self.push(Segment::Relation(Relation::In(capability.id())))
    }

    /// Requires some strict ancestor of the anchor to expose `capability`.
    #[must_use]
    pub fn deep_in<P: 'static>(self, capability: Capability<P>) -> Self {
        self.push(Segment::Relation(Relation::DeepIn(capability.id())))
    }

    /// Requires some element sharing the anchor's parent to expose
    /// `capability`.
    #[must_use]
    pub fn near<P: 'static>(self, capability: Capability<P>) -> Self {
        self.push(Segment::Relation(Relation::Near(capability.id())))
    }

    /// Requires some element exposing `capability` whose `resolver` names
    /// the chain's target element.
    ///
    /// The resolved element need not be positioned relative to the
    /// capability holder at all; the resolver supplies it directly.
    /// Returning `None` is a normal "no match", not an error.
    #[must_use]
    pub fn from<P: 'static>(
        self,
        capability: Capability<P>,
        resolver: impl Fn(&P) -> Option<ElementId> + 'static,
    ) -> Self {
        let erased = Rc::new(move |instance: &dyn core::any::Any| {
            instance.downcast_ref::<P>().and_then(&resolver)
        });
        self.push(Segment::Relation(Relation::From(capability.id(), erased)))
    }

    /// Filters the preceding segment's anchor instance with a boolean test.
    ///
    /// The closure's argument type must match the preceding segment's
    /// capability type; a mismatched downcast behaves as `false`.
    #[must_use]
    pub fn where_<P: 'static>(self, predicate: impl Fn(&P) -> bool + 'static) -> Self {
        let erased = Rc::new(move |instance: &dyn core::any::Any| {
            instance.downcast_ref::<P>().is_some_and(&predicate)
        });
        self.push(Segment::Predicate(Predicate::Instance(erased)))
    }

    /// Filters the preceding segment's anchor element by display name.
    #[must_use]
    pub fn named(self, name: impl Into<String>) -> Self {
        self.push(Segment::Predicate(Predicate::Named(name.into())))
    }

    /// Appends the terminal target segment.
    #[must_use]
    pub fn target<T: 'static>(self, capability: Capability<T>) -> Self {
        self.push(Segment::Relation(Relation::Target(capability.id())))
    }

    /// Seals and validates the chain.
    ///
    /// # Errors
    ///
    /// Returns a [`SelectorError`] if the chain has no target, more than
    /// one target, a relational segment after the target, or a predicate
    /// with no preceding segment.
    pub fn build(self) -> Result<SelectorSpec, SelectorError> {
        let mut links: Vec<Link> = Vec::new();
        let mut current: Option<Relation> = None;
        let mut pending: Vec<Predicate> = Vec::new();
        let mut target: Option<CapabilityId> = None;

        // Segments are grouped into (relation, trailing predicates) links.
        // `pending` holds predicates seen since the last relation.
        for segment in self.segments {
            match segment {
                Segment::Relation(relation) => {
                    if target.is_some() {
                        return Err(if matches!(relation, Relation::Target(_)) {
                            SelectorError::MultipleTargets
                        } else {
                            SelectorError::SegmentAfterTarget
                        });
                    }
                    if let Some(prev) = current.take() {
                        links.push(Link {
                            relation: prev,
                            predicates: core::mem::take(&mut pending).into_boxed_slice(),
                        });
                    }
                    if let Relation::Target(cap) = relation {
                        target = Some(cap);
                    }
                    current = Some(relation);
                }
                Segment::Predicate(predicate) => {
                    if current.is_none() {
                        return Err(SelectorError::PredicateWithoutAnchor);
                    }
                    pending.push(predicate);
                }
            }
        }
        if let Some(last) = current.take() {
            links.push(Link {
                relation: last,
                predicates: pending.into_boxed_slice(),
            });
        }

        let Some(target) = target else {
            return Err(SelectorError::MissingTarget);
        };

        #[expect(clippy::cast_possible_truncation, reason = "chains are short")]
        let specificity = Specificity(
            links.len() as u32 - 1,
            links.iter().map(|l| l.predicates.len()).sum::<usize>() as u32,
        );

        Ok(SelectorSpec {
            inner: Rc::new(SpecData {
                links: links.into_boxed_slice(),
                target,
                specificity,
            }),
        })
    }

    fn push(mut self, segment: Segment) -> Self {
        self.segments.push(segment);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use canopy_tree::CapabilityRegistry;

    struct Button {
        enabled: bool,
    }
    struct Text;

    fn caps() -> (Capability<Button>, Capability<Text>) {
        let mut registry = CapabilityRegistry::new();
        (
            registry.register::<Button>("Button"),
            registry.register::<Text>("Text"),
        )
    }

    #[test]
    fn bare_target_builds() {
        let (_, text) = caps();
        let spec = SelectorBuilder::new().target(text).build().unwrap();
        assert_eq!(spec.target(), text.id());
        assert_eq!(spec.specificity(), Specificity(0, 0));
    }

    #[test]
    fn missing_target_rejected() {
        let (button, _) = caps();
        let err = SelectorBuilder::new().on(button).build().unwrap_err();
        assert_eq!(err, SelectorError::MissingTarget);
    }

    #[test]
    fn multiple_targets_rejected() {
        let (_, text) = caps();
        let err = SelectorBuilder::new()
            .target(text)
            .target(text)
            .build()
            .unwrap_err();
        assert_eq!(err, SelectorError::MultipleTargets);
    }

    #[test]
    fn relation_after_target_rejected() {
        let (button, text) = caps();
        let err = SelectorBuilder::new()
            .target(text)
            .on(button)
            .build()
            .unwrap_err();
        assert_eq!(err, SelectorError::SegmentAfterTarget);
    }

    #[test]
    fn leading_predicate_rejected() {
        let (_, text) = caps();
        let err = SelectorBuilder::new()
            .where_(|_: &Button| true)
            .target(text)
            .build()
            .unwrap_err();
        assert_eq!(err, SelectorError::PredicateWithoutAnchor);
    }

    #[test]
    fn predicate_after_target_allowed() {
        let (_, text) = caps();
        let spec = SelectorBuilder::new()
            .target(text)
            .named("title")
            .build()
            .unwrap();
        assert_eq!(spec.specificity(), Specificity(0, 1));
    }

    #[test]
    fn specificity_counts_segments_and_predicates() {
        let (button, text) = caps();
        let bare = SelectorBuilder::new().target(text).build().unwrap();
        let related = SelectorBuilder::new()
            .on(button)
            .target(text)
            .build()
            .unwrap();
        let filtered = SelectorBuilder::new()
            .on(button)
            .where_(|b: &Button| b.enabled)
            .target(text)
            .build()
            .unwrap();

        assert!(bare.specificity() < related.specificity());
        assert!(related.specificity() < filtered.specificity());
    }

    #[test]
    fn selector_error_display() {
        use alloc::format;
        assert!(format!("{}", SelectorError::MissingTarget).contains("no target"));
    }
}
