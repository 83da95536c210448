// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Selector specificity.

/// Bucketed selector specificity: `(relations, predicates)`.
///
/// The fields are ordered highest-weight-first so that derived `Ord`
/// gives lexicographic ordering: relational segment count outranks
/// predicate count. All relation kinds (`on`, `in_parent`, `deep_in`,
/// `near`, `from`) weigh equally.
///
/// A bare target selector has specificity `(0, 0)`; appending any
/// relational segment or predicate strictly increases the key.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Specificity(pub u32, pub u32);

impl Specificity {
    /// Returns the number of relational segments in the chain.
    #[must_use]
    #[inline]
    pub const fn relations(self) -> u32 {
        self.0
    }

    /// Returns the number of predicates in the chain.
    #[must_use]
    #[inline]
    pub const fn predicates(self) -> u32 {
        self.1
    }
}
