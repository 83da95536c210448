// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canopy Cascade: style scopes, cascade resolution, and scheduling.
//!
//! This crate is the imperative half of the canopy style engine: it takes
//! the sheets and rules built with `canopy_select`, attaches them to
//! subtrees through style scopes, and resolves them against a host tree on
//! explicit triggers.
//!
//! ## Core Concepts
//!
//! ### Style Scopes
//!
//! A style node (see [`StyleScopes`]) roots a subtree and holds its own
//! sheets plus a [`Dynamicity`] mode. Descendant nodes inherit ancestor
//! sheets by concatenation; a node with no sheets anywhere falls back to
//! the [`FallbackRegistry`].
//!
//! ### Resolution
//!
//! A pass ([`resolve`]) matches every rule of the effective sheet set
//! against the subtree, orders matches per target by specificity and
//! declaration order, and applies property blocks so the most specific
//! match writes last. [`PassReport`] summarizes what ran; a failing block
//! aborts the pass with a [`PassError`].
//!
//! ### Scheduling
//!
//! [`Styler`] owns the scopes and the fallback registry and exposes the
//! trigger API: [`apply_once`](Styler::apply_once) for one-shot
//! resolution, [`activate`](Styler::activate) and
//! [`notify_invalidated`](Styler::notify_invalidated) for `OnChange`
//! nodes, and [`tick`](Styler::tick) for `EveryTick` nodes.
//!
//! ```rust
//! use canopy_cascade::{Dynamicity, Styler};
//! use canopy_select::{RuleBuilder, SelectorBuilder, StyleSheetBuilder};
//! use canopy_tree::{CapabilityRegistry, TreeStore};
//!
//! struct Text { size: f64 }
//!
//! let mut registry = CapabilityRegistry::new();
//! let text = registry.register::<Text>("Text");
//!
//! let mut tree = TreeStore::new();
//! let root = tree.create();
//! let label = tree.create();
//! tree.append_child(root, label);
//! tree.attach(label, text, Text { size: 0.0 });
//!
//! let sheet = StyleSheetBuilder::new()
//!     .rule(
//!         RuleBuilder::new(SelectorBuilder::new().target(text).build().unwrap())
//!             .block(|t: &mut Text| t.size = 14.0)
//!             .build(),
//!     )
//!     .build();
//!
//! let mut styler = Styler::new();
//! styler.declare_node(root, Dynamicity::Never);
//! styler.push_sheet(root, sheet);
//! styler.apply_once(&mut tree, root).unwrap();
//!
//! assert_eq!(tree.capability_of(label, text).unwrap().size, 14.0);
//! ```
//!
//! ## `no_std` Support
//!
//! This crate is `no_std` and uses `alloc`. It does not depend on `std`.

#![no_std]

extern crate alloc;

mod error;
mod fallback;
mod resolve;
mod scope;
mod styler;

pub use error::PassError;
pub use fallback::{FallbackRegistry, FallbackRegistryBuilder};
pub use resolve::{PassReport, PassScratch, resolve};
pub use scope::{Dynamicity, StyleScopes};
pub use styler::Styler;
