// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Process-wide default sheets.
//!
//! The [`FallbackRegistry`] holds the sheets consulted when a style node
//! has no own or inherited sheets. It is built once at startup and
//! injected into the [`Styler`](crate::Styler) explicitly; nothing in the
//! engine looks it up ambiently.

use alloc::vec::Vec;

use canopy_select::StyleSheet;

/// The global fallback sheet set.
///
/// Immutable after construction; every resolution pass reads it, none
/// writes it.
///
/// # Example
///
/// ```rust
/// use canopy_cascade::FallbackRegistryBuilder;
/// use canopy_select::StyleSheetBuilder;
///
/// let defaults = StyleSheetBuilder::new().build();
/// let fallback = FallbackRegistryBuilder::new().sheet(defaults).build();
/// assert_eq!(fallback.sheets().len(), 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct FallbackRegistry {
    sheets: Vec<StyleSheet>,
}

impl FallbackRegistry {
    /// Creates an empty registry (no defaults).
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns the fallback sheets in registration order.
    #[must_use]
    #[inline]
    pub fn sheets(&self) -> &[StyleSheet] {
        &self.sheets
    }

    /// Returns `true` if no fallback sheets are registered.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }
}

/// Builder for the [`FallbackRegistry`].
#[derive(Debug, Default)]
pub struct FallbackRegistryBuilder {
    sheets: Vec<StyleSheet>,
}

impl FallbackRegistryBuilder {
    /// Creates a new empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a fallback sheet.
    #[must_use]
    pub fn sheet(mut self, sheet: StyleSheet) -> Self {
        self.sheets.push(sheet);
        self
    }

    /// Builds the registry, freezing its sheet set.
    #[must_use]
    pub fn build(self) -> FallbackRegistry {
        FallbackRegistry {
            sheets: self.sheets,
        }
    }
}
