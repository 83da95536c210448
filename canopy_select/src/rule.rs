// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rules: selector alternatives bundled with effect callbacks.
//!
//! A [`Rule`] pairs one-or-more [`SelectorSpec`] alternatives with an
//! ordered list of [`PropertyBlock`]s. Blocks are opaque host code; the
//! engine guarantees only call count and order, never the safety of the
//! effect itself.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::any::Any;
use core::fmt;

use crate::selector::SelectorSpec;

/// Error raised by a failing property block.
///
/// The engine propagates block errors unmodified: the original error is
/// reachable through [`core::error::Error::source`].
pub struct BlockError {
    source: Box<dyn core::error::Error + 'static>,
}

impl BlockError {
    /// Wraps a host error.
    #[must_use]
    pub fn new(source: impl core::error::Error + 'static) -> Self {
        Self {
            source: Box::new(source),
        }
    }

    /// Creates a block error from a plain message.
    #[must_use]
    pub fn message(message: impl Into<String>) -> Self {
        Self::new(MessageError(message.into()))
    }
}

impl fmt::Debug for BlockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("BlockError").field(&self.source).finish()
    }
}

impl fmt::Display for BlockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "property block failed: {}", self.source)
    }
}

impl core::error::Error for BlockError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        Some(self.source.as_ref())
    }
}

#[derive(Debug)]
struct MessageError(String);

impl fmt::Display for MessageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl core::error::Error for MessageError {}

/// An opaque effect callback applied to a target capability instance.
///
/// Blocks are constructed from typed closures; the engine stores them
/// type-erased and downcasts the instance at apply time. A block
/// overwriting state set by an earlier block simply supersedes it; the
/// engine never retracts an applied effect.
#[derive(Clone)]
pub struct PropertyBlock {
    run: Rc<dyn Fn(&mut dyn Any) -> Result<(), BlockError>>,
}

impl PropertyBlock {
    /// Creates a block from an infallible effect.
    ///
    /// `T` must be the instance type of the capability the owning rule's
    /// selectors target.
    #[must_use]
    pub fn new<T: 'static>(effect: impl Fn(&mut T) + 'static) -> Self {
        Self {
            run: Rc::new(move |instance: &mut dyn Any| {
                if let Some(typed) = instance.downcast_mut::<T>() {
                    effect(typed);
                } else {
                    debug_assert!(false, "block type does not match the target capability");
                }
                Ok(())
            }),
        }
    }

    /// Creates a block from a fallible effect.
    #[must_use]
    pub fn fallible<T: 'static>(
        effect: impl Fn(&mut T) -> Result<(), BlockError> + 'static,
    ) -> Self {
        Self {
            run: Rc::new(move |instance: &mut dyn Any| {
                if let Some(typed) = instance.downcast_mut::<T>() {
                    effect(typed)
                } else {
                    debug_assert!(false, "block type does not match the target capability");
                    Ok(())
                }
            }),
        }
    }

    /// Applies the block to a target capability instance.
    ///
    /// # Errors
    ///
    /// Propagates the effect's [`BlockError`] unmodified.
    pub fn apply(&self, instance: &mut dyn Any) -> Result<(), BlockError> {
        (self.run)(instance)
    }
}

impl fmt::Debug for PropertyBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PropertyBlock(..)")
    }
}

#[derive(Debug)]
struct RuleData {
    alternatives: Box<[SelectorSpec]>,
    blocks: Box<[PropertyBlock]>,
}

/// One-or-more selector alternatives sharing an ordered property block
/// list.
///
/// Each alternative is matched independently and contributes its own
/// specificity key; when several alternatives of the same rule match one
/// target in a pass, the shared blocks run once per matching alternative.
///
/// Rules are immutable after creation. Use [`RuleBuilder`] to construct
/// them; cloning is cheap (`Rc`).
#[derive(Clone, Debug)]
pub struct Rule {
    inner: Rc<RuleData>,
}

impl Rule {
    /// Returns the selector alternatives.
    #[must_use]
    #[inline]
    pub fn alternatives(&self) -> &[SelectorSpec] {
        &self.inner.alternatives
    }

    /// Returns the ordered property blocks.
    #[must_use]
    #[inline]
    pub fn blocks(&self) -> &[PropertyBlock] {
        &self.inner.blocks
    }
}

/// Builder for [`Rule`] instances.
///
/// # Example
///
/// ```rust
/// use canopy_select::{RuleBuilder, SelectorBuilder};
/// use canopy_tree::CapabilityRegistry;
///
/// struct Text { size: f64 }
///
/// let mut registry = CapabilityRegistry::new();
/// let text = registry.register::<Text>("Text");
///
/// let rule = RuleBuilder::new(SelectorBuilder::new().target(text).build().unwrap())
///     .block(|t: &mut Text| t.size = 14.0)
///     .build();
///
/// assert_eq!(rule.alternatives().len(), 1);
/// assert_eq!(rule.blocks().len(), 1);
/// ```
#[derive(Debug)]
pub struct RuleBuilder {
    alternatives: Vec<SelectorSpec>,
    blocks: Vec<PropertyBlock>,
}

impl RuleBuilder {
    /// Creates a builder with the rule's first selector alternative.
    #[must_use]
    pub fn new(selector: SelectorSpec) -> Self {
        let mut alternatives = Vec::new();
        alternatives.push(selector);
        Self {
            alternatives,
            blocks: Vec::new(),
        }
    }

    /// Adds another selector alternative.
    #[must_use]
    pub fn alternative(mut self, selector: SelectorSpec) -> Self {
        self.alternatives.push(selector);
        self
    }

    /// Appends an infallible property block.
    #[must_use]
    pub fn block<T: 'static>(mut self, effect: impl Fn(&mut T) + 'static) -> Self {
        self.blocks.push(PropertyBlock::new(effect));
        self
    }

    /// Appends a fallible property block.
    #[must_use]
    pub fn try_block<T: 'static>(
        mut self,
        effect: impl Fn(&mut T) -> Result<(), BlockError> + 'static,
    ) -> Self {
        self.blocks.push(PropertyBlock::fallible(effect));
        self
    }

    /// Builds the rule.
    #[must_use]
    pub fn build(self) -> Rule {
        Rule {
            inner: Rc::new(RuleData {
                alternatives: self.alternatives.into_boxed_slice(),
                blocks: self.blocks.into_boxed_slice(),
            }),
        }
    }
}
