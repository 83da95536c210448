// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Style sheets: cached, ordered rule sequences.
//!
//! A [`StyleSheet`] is immutable after creation and identified by instance
//! (not by content): two sheets generated from the same generator with
//! different [`ThemeConfig`]s are distinct "themes" even when their rules
//! coincide.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::fmt;

use crate::config::ThemeConfig;
use crate::rule::Rule;

#[derive(Debug, Default)]
struct SheetData {
    rules: Vec<Rule>,
}

/// An ordered, immutable collection of style rules.
///
/// Use [`StyleSheetBuilder`] for direct construction or
/// [`StyleSheet::generate`] to produce a themed instance from a generator
/// function. Cloning is cheap (`Rc`); [`same`](Self::same) compares sheet
/// identity.
#[derive(Clone, Debug, Default)]
pub struct StyleSheet {
    inner: Rc<SheetData>,
}

impl StyleSheet {
    /// Generates a sheet from a theme config.
    ///
    /// The generator must be a pure function of the config; it runs exactly
    /// once and the resulting rules are cached for the sheet's lifetime.
    /// Calling `generate` again (with the same or another config) produces
    /// a new, distinct sheet instance.
    #[must_use]
    pub fn generate(
        config: &ThemeConfig,
        generator: impl FnOnce(&ThemeConfig, StyleSheetBuilder) -> StyleSheetBuilder,
    ) -> Self {
        generator(config, StyleSheetBuilder::new()).build()
    }

    /// Returns the number of rules in this sheet.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.rules.len()
    }

    /// Returns `true` if this sheet has no rules.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.rules.is_empty()
    }

    /// Returns the rules in declaration order.
    #[must_use]
    #[inline]
    pub fn rules(&self) -> &[Rule] {
        &self.inner.rules
    }

    /// Returns `true` if `self` and `other` are the same sheet instance.
    ///
    /// Effective sheet sets de-duplicate by this identity, never by rule
    /// content.
    #[must_use]
    pub fn same(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

/// Builder for constructing [`StyleSheet`] instances.
///
/// # Example
///
/// ```rust
/// use canopy_select::{RuleBuilder, SelectorBuilder, StyleSheetBuilder};
/// use canopy_tree::CapabilityRegistry;
///
/// struct Text { size: f64 }
///
/// let mut registry = CapabilityRegistry::new();
/// let text = registry.register::<Text>("Text");
///
/// let sheet = StyleSheetBuilder::new()
///     .rule(
///         RuleBuilder::new(SelectorBuilder::new().target(text).build().unwrap())
///             .block(|t: &mut Text| t.size = 14.0)
///             .build(),
///     )
///     .build();
///
/// assert_eq!(sheet.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct StyleSheetBuilder {
    rules: Vec<Rule>,
}

impl StyleSheetBuilder {
    /// Creates a new empty stylesheet builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a rule to the sheet.
    #[must_use]
    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Builds the stylesheet.
    #[must_use]
    pub fn build(self) -> StyleSheet {
        StyleSheet {
            inner: Rc::new(SheetData { rules: self.rules }),
        }
    }
}

impl fmt::Display for StyleSheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StyleSheet({} rules)", self.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigKey, ThemeConfigBuilder};
    use crate::rule::RuleBuilder;
    use crate::selector::SelectorBuilder;
    use canopy_tree::CapabilityRegistry;

    struct Text {
        size: f64,
    }

    const FONT_SIZE: ConfigKey = ConfigKey::new(0);

    #[test]
    fn sheet_preserves_rule_order() {
        let mut registry = CapabilityRegistry::new();
        let text = registry.register::<Text>("Text");

        let first = RuleBuilder::new(SelectorBuilder::new().target(text).build().unwrap()).build();
        let second = RuleBuilder::new(SelectorBuilder::new().target(text).build().unwrap())
            .block(|t: &mut Text| t.size = 1.0)
            .build();

        let sheet = StyleSheetBuilder::new().rule(first).rule(second).build();
        assert_eq!(sheet.len(), 2);
        assert!(sheet.rules()[0].blocks().is_empty());
        assert_eq!(sheet.rules()[1].blocks().len(), 1);
    }

    #[test]
    fn generated_sheets_are_distinct_instances() {
        let mut registry = CapabilityRegistry::new();
        let text = registry.register::<Text>("Text");

        let generator = |config: &crate::ThemeConfig, builder: StyleSheetBuilder| {
            let size = *config.get::<f64>(FONT_SIZE).unwrap_or(&12.0);
            builder.rule(
                RuleBuilder::new(SelectorBuilder::new().target(text).build().unwrap())
                    .block(move |t: &mut Text| t.size = size)
                    .build(),
            )
        };

        let light = ThemeConfigBuilder::new().set(FONT_SIZE, 14.0_f64).build();
        let dark = ThemeConfigBuilder::new().set(FONT_SIZE, 16.0_f64).build();

        let sheet_light = StyleSheet::generate(&light, generator);
        let sheet_dark = StyleSheet::generate(&dark, generator);

        assert!(!sheet_light.same(&sheet_dark));
        assert!(sheet_light.same(&sheet_light.clone()));

        let mut a = Text { size: 0.0 };
        let mut b = Text { size: 0.0 };
        sheet_light.rules()[0].blocks()[0].apply(&mut a).unwrap();
        sheet_dark.rules()[0].blocks()[0].apply(&mut b).unwrap();
        assert_eq!(a.size, 14.0);
        assert_eq!(b.size, 16.0);
    }

    #[test]
    fn sheet_identity_not_content() {
        let a = StyleSheetBuilder::new().build();
        let b = StyleSheetBuilder::new().build();
        assert!(!a.same(&b));
    }

    #[test]
    fn sheet_display() {
        use alloc::format;
        let sheet = StyleSheetBuilder::new().build();
        assert_eq!(format!("{sheet}"), "StyleSheet(0 rules)");
    }
}
