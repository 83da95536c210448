// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Theme configuration values.
//!
//! A [`ThemeConfig`] is the named-field value object passed into a sheet
//! generator to parameterize a [`StyleSheet`](crate::StyleSheet) instance.
//! Invoking the same generator with different configs produces distinct
//! sheet instances ("themes").

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::fmt;

use canopy_tree::ErasedValue;

/// A key for looking up values in a [`ThemeConfig`].
///
/// Config keys are simple u16 identifiers, typically defined as constants
/// at the application level.
///
/// # Example
///
/// ```rust
/// use canopy_select::ConfigKey;
///
/// const ACCENT_COLOR: ConfigKey = ConfigKey::new(0);
/// const FONT_SIZE: ConfigKey = ConfigKey::new(1);
/// ```
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ConfigKey(u16);

impl ConfigKey {
    /// Creates a new config key with the given index.
    #[must_use]
    #[inline]
    pub const fn new(index: u16) -> Self {
        Self(index)
    }

    /// Returns the underlying index of this config key.
    #[must_use]
    #[inline]
    pub const fn index(self) -> u16 {
        self.0
    }
}

impl fmt::Debug for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ConfigKey").field(&self.0).finish()
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ConfigKey({})", self.0)
    }
}

/// Internal storage for config values.
#[derive(Debug, Default)]
struct ConfigData {
    /// Sorted by `ConfigKey` for binary search lookup.
    values: Vec<(ConfigKey, ErasedValue)>,
}

/// An immutable named-field value object parameterizing a sheet generator.
///
/// Configs are immutable after creation; use [`ThemeConfigBuilder`] to
/// construct them. Cloning is cheap (`Rc`).
///
/// # Example
///
/// ```rust
/// use canopy_select::{ConfigKey, ThemeConfigBuilder};
///
/// const ACCENT_COLOR: ConfigKey = ConfigKey::new(0);
///
/// let light = ThemeConfigBuilder::new().set(ACCENT_COLOR, 0x0078D4_u32).build();
/// let dark = ThemeConfigBuilder::new().set(ACCENT_COLOR, 0x4CC2FF_u32).build();
///
/// assert_eq!(light.get::<u32>(ACCENT_COLOR), Some(&0x0078D4));
/// assert_eq!(dark.get::<u32>(ACCENT_COLOR), Some(&0x4CC2FF));
/// ```
#[derive(Clone, Debug, Default)]
pub struct ThemeConfig {
    inner: Rc<ConfigData>,
}

impl ThemeConfig {
    /// Returns `true` if this config has no values.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.values.is_empty()
    }

    /// Returns the number of values in this config.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.values.len()
    }

    /// Gets the value for a key, if present and of type `T`.
    #[must_use]
    pub fn get<T: 'static>(&self, key: ConfigKey) -> Option<&T> {
        self.inner
            .values
            .binary_search_by_key(&key, |(k, _)| *k)
            .ok()
            .and_then(|idx| self.inner.values[idx].1.downcast_ref())
    }

    /// Returns `true` if this config has a value for the key.
    #[must_use]
    pub fn contains(&self, key: ConfigKey) -> bool {
        self.inner
            .values
            .binary_search_by_key(&key, |(k, _)| *k)
            .is_ok()
    }

    /// Returns an iterator over the keys set in this config.
    pub fn keys(&self) -> impl Iterator<Item = ConfigKey> + '_ {
        self.inner.values.iter().map(|(k, _)| *k)
    }
}

/// Builder for constructing [`ThemeConfig`] instances.
#[derive(Debug, Default)]
pub struct ThemeConfigBuilder {
    values: Vec<(ConfigKey, ErasedValue)>,
}

impl ThemeConfigBuilder {
    /// Creates a new empty config builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a value in the config.
    ///
    /// If the key was already set, the value is replaced.
    #[must_use]
    pub fn set<T: 'static>(mut self, key: ConfigKey, value: T) -> Self {
        let erased = ErasedValue::new(value);
        match self.values.binary_search_by_key(&key, |(k, _)| *k) {
            Ok(idx) => {
                self.values[idx].1 = erased;
            }
            Err(idx) => {
                self.values.insert(idx, (key, erased));
            }
        }
        self
    }

    /// Builds the config.
    #[must_use]
    pub fn build(self) -> ThemeConfig {
        ThemeConfig {
            inner: Rc::new(ConfigData {
                values: self.values,
            }),
        }
    }
}
