// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canopy Select: tree-relative selectors, specificity, and style rules.
//!
//! This crate provides the declarative half of the canopy style engine:
//! immutable selector chains, their total specificity order, and the rules
//! and sheets that bundle selectors with effect callbacks. The cascade
//! itself (scopes, scheduling, application order) lives in
//! `canopy_cascade`.
//!
//! ## Core Concepts
//!
//! ### Selectors
//!
//! A [`SelectorSpec`] describes a tree-relative match: relational segments
//! (`on`, `in_parent`, `deep_in`, `near`, `from`) and predicates
//! (`where_`, `named`), terminated by exactly one target segment. Chains
//! are assembled by [`SelectorBuilder`] and validated eagerly at
//! [`build`](SelectorBuilder::build) time; matching never errors.
//!
//! ```rust
//! use canopy_select::SelectorBuilder;
//! use canopy_tree::CapabilityRegistry;
//!
//! struct Button { enabled: bool }
//! struct Text;
//!
//! let mut registry = CapabilityRegistry::new();
//! let button = registry.register::<Button>("Button");
//! let text = registry.register::<Text>("Text");
//!
//! // Text elements somewhere inside an enabled Button.
//! let spec = SelectorBuilder::new()
//!     .deep_in(button)
//!     .where_(|b: &Button| b.enabled)
//!     .target(text)
//!     .build()
//!     .unwrap();
//! ```
//!
//! ### Specificity
//!
//! [`Specificity`] ranks chains from generic to specific: every relational
//! segment and every predicate strictly increases the key, and the order
//! is total and deterministic.
//!
//! ### Rules and Sheets
//!
//! A [`Rule`] pairs selector alternatives with ordered [`PropertyBlock`]
//! effects; a [`StyleSheet`] is a cached, ordered rule sequence. Themed
//! sheet instances come from [`StyleSheet::generate`] with a
//! [`ThemeConfig`].
//!
//! ## `no_std` Support
//!
//! This crate is `no_std` and uses `alloc`. It does not depend on `std`.

#![no_std]

extern crate alloc;

mod config;
mod matcher;
mod rule;
mod segment;
mod selector;
mod sheet;
mod specificity;

pub use config::{ConfigKey, ThemeConfig, ThemeConfigBuilder};
pub use rule::{BlockError, PropertyBlock, Rule, RuleBuilder};
pub use selector::{SelectorBuilder, SelectorError, SelectorSpec};
pub use sheet::{StyleSheet, StyleSheetBuilder};
pub use specificity::Specificity;
