// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Selector chain segments.
//!
//! A sealed selector is a chain of [`Link`]s, each pairing one relational
//! (or target) segment with the predicates that follow it. The builder in
//! [`selector`](crate::selector) assembles raw segments and compiles them
//! into links at seal time.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::string::String;
use core::any::Any;
use core::fmt;

use canopy_tree::{CapabilityId, ElementId};

/// A predicate over a capability instance.
pub(crate) type InstancePredicate = Rc<dyn Fn(&dyn Any) -> bool>;

/// A resolver mapping a capability instance to a concrete target element.
pub(crate) type FromResolver = Rc<dyn Fn(&dyn Any) -> Option<ElementId>>;

/// A predicate filtering the anchor produced by the preceding segment.
#[derive(Clone)]
pub(crate) enum Predicate {
    /// Boolean test on the anchor's capability instance.
    Instance(InstancePredicate),
    /// Test on the anchor element's display name.
    Named(String),
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Instance(_) => f.write_str("Instance(..)"),
            Self::Named(name) => f.debug_tuple("Named").field(name).finish(),
        }
    }
}

/// The relation a chain segment requires, together with the capability the
/// related element must expose.
#[derive(Clone)]
pub(crate) enum Relation {
    /// Terminal segment: the element being styled.
    Target(CapabilityId),
    /// The anchor element itself exposes the capability.
    On(CapabilityId),
    /// The anchor's immediate parent exposes the capability.
    In(CapabilityId),
    /// Some strict ancestor of the anchor exposes the capability.
    DeepIn(CapabilityId),
    /// Some element sharing the anchor's parent exposes the capability.
    Near(CapabilityId),
    /// Some element in the subtree exposes the capability and its resolver
    /// names the chain's target element.
    From(CapabilityId, FromResolver),
}

impl Relation {
    pub(crate) fn capability(&self) -> CapabilityId {
        match self {
            Self::Target(cap)
            | Self::On(cap)
            | Self::In(cap)
            | Self::DeepIn(cap)
            | Self::Near(cap)
            | Self::From(cap, _) => *cap,
        }
    }
}

impl fmt::Debug for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Target(cap) => f.debug_tuple("Target").field(cap).finish(),
            Self::On(cap) => f.debug_tuple("On").field(cap).finish(),
            Self::In(cap) => f.debug_tuple("In").field(cap).finish(),
            Self::DeepIn(cap) => f.debug_tuple("DeepIn").field(cap).finish(),
            Self::Near(cap) => f.debug_tuple("Near").field(cap).finish(),
            Self::From(cap, _) => f.debug_tuple("From").field(cap).finish(),
        }
    }
}

/// One relational (or target) segment plus its trailing predicates.
#[derive(Clone, Debug)]
pub(crate) struct Link {
    pub(crate) relation: Relation,
    pub(crate) predicates: Box<[Predicate]>,
}

/// A raw segment as appended by the builder, before compilation into links.
#[derive(Clone, Debug)]
pub(crate) enum Segment {
    Relation(Relation),
    Predicate(Predicate),
}
