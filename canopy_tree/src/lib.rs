// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canopy Tree: the element and capability model for style resolution.
//!
//! Canopy resolves declarative style rules against a tree of UI elements.
//! This crate defines the vocabulary shared by the whole engine:
//!
//! - [`ElementId`]: stable identity of a node in the external UI tree.
//! - [`Capability<T>`] / [`CapabilityId`]: typed facets an element may
//!   expose (a `Button` behavior, a `Text` surface, ...), registered once
//!   at startup in a [`CapabilityRegistry`].
//! - [`TreeProvider`]: the trait through which the engine observes the
//!   embedder's tree. The engine never owns elements; it only matches
//!   against them and mutates their capability instances through this
//!   trait.
//! - [`TreeStore`]: an owned, in-memory [`TreeProvider`] for tests and
//!   simple hosts.
//!
//! ```rust
//! use canopy_tree::{CapabilityRegistry, TreeProvider, TreeStore};
//!
//! struct Button { enabled: bool }
//!
//! let mut registry = CapabilityRegistry::new();
//! let button = registry.register::<Button>("Button");
//!
//! let mut tree = TreeStore::new();
//! let root = tree.create_named("toolbar");
//! tree.attach(root, button, Button { enabled: true });
//!
//! assert!(tree.has_capability(root, button.id()));
//! ```
//!
//! ## `no_std` Support
//!
//! This crate is `no_std` and uses `alloc`. It does not depend on `std`.

#![no_std]

extern crate alloc;

mod id;
mod provider;
mod registry;
mod store;
mod value;

pub use id::{Capability, CapabilityId, ElementId};
pub use provider::TreeProvider;
pub use registry::{CapabilityRegistration, CapabilityRegistry};
pub use store::TreeStore;
pub use value::ErasedValue;
