// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The cascade resolution pass.
//!
//! A pass takes a subtree, an effective sheet set, and a mutable tree
//! provider, and applies every matching rule's property blocks to its
//! target elements. The pass is a pure function of the tree snapshot and
//! the sheet set: collection (read-only matching) completes before the
//! first block runs, so effects applied mid-pass never change what
//! matched.
//!
//! ## Ordering
//!
//! Matches are grouped by target element; groups run in first-discovery
//! (document) order. Within a group, matches are stably sorted ascending
//! by `(specificity, sheet index, rule index, alternative index)`, so the
//! most specific match writes last and wins conflicts, with declaration
//! order breaking ties.

use alloc::vec::Vec;

use hashbrown::HashMap;

use canopy_select::{Specificity, StyleSheet};
use canopy_tree::{ElementId, TreeProvider};

use crate::error::PassError;

/// One `(target, rule, alternative)` match found during collection.
#[derive(Debug)]
struct MatchEntry {
    discovery: u32,
    target: ElementId,
    specificity: Specificity,
    sheet: usize,
    rule: usize,
    alternative: usize,
}

/// Reusable buffers for resolution passes.
///
/// These buffers absorb the per-pass allocations of collection and
/// ordering (matching itself may still allocate short-lived candidate
/// lists); hosts keep one scratch per styler and reuse it across frames.
#[derive(Debug, Default)]
pub struct PassScratch {
    entries: Vec<MatchEntry>,
    discovery: HashMap<ElementId, u32>,
    matched: Vec<ElementId>,
}

impl PassScratch {
    /// Creates an empty scratch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn clear(&mut self) {
        self.entries.clear();
        self.discovery.clear();
        self.matched.clear();
    }
}

/// Statistics of a completed resolution pass.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PassReport {
    /// Number of `(target, rule, alternative)` matches applied.
    pub matches: usize,
    /// Number of distinct target elements touched.
    pub targets: usize,
    /// Number of property block invocations.
    pub blocks_run: usize,
}

impl PassReport {
    pub(crate) fn merge(&mut self, other: Self) {
        self.matches += other.matches;
        self.targets += other.targets;
        self.blocks_run += other.blocks_run;
    }
}

/// Runs one resolution pass over `root`'s subtree with the given sheets.
///
/// Every selector alternative of every rule is matched against the
/// subtree; the shared blocks of a rule run once per matching alternative.
/// Effects are applied through
/// [`capability_mut`](TreeProvider::capability_mut) on each match's target
/// element.
///
/// # Errors
///
/// A failing property block aborts the pass immediately. Effects applied
/// before the failure keep their results; the cascade never rolls back.
pub fn resolve(
    provider: &mut impl TreeProvider,
    root: ElementId,
    sheets: &[StyleSheet],
    scratch: &mut PassScratch,
) -> Result<PassReport, PassError> {
    scratch.clear();

    // Phase 1: collect every match with a read-only borrow.
    for (sheet_idx, sheet) in sheets.iter().enumerate() {
        for (rule_idx, rule) in sheet.rules().iter().enumerate() {
            for (alt_idx, spec) in rule.alternatives().iter().enumerate() {
                scratch.matched.clear();
                spec.collect_matches(&*provider, root, &mut scratch.matched);
                for &target in &scratch.matched {
                    #[expect(
                        clippy::cast_possible_truncation,
                        reason = "distinct targets stay far below u32::MAX"
                    )]
                    let next = scratch.discovery.len() as u32;
                    let discovery = *scratch.discovery.entry(target).or_insert(next);
                    scratch.entries.push(MatchEntry {
                        discovery,
                        target,
                        specificity: spec.specificity(),
                        sheet: sheet_idx,
                        rule: rule_idx,
                        alternative: alt_idx,
                    });
                }
            }
        }
    }

    // Phase 2: order groups by discovery, matches by specificity then
    // declaration order. The sort key is total, so stability is moot, but
    // a stable sort keeps the intent explicit.
    scratch.entries.sort_by_key(|entry| {
        (
            entry.discovery,
            entry.specificity,
            entry.sheet,
            entry.rule,
            entry.alternative,
        )
    });

    // Phase 3: apply.
    let mut report = PassReport {
        matches: scratch.entries.len(),
        targets: scratch.discovery.len(),
        blocks_run: 0,
    };
    for entry in &scratch.entries {
        let rule = &sheets[entry.sheet].rules()[entry.rule];
        let capability = rule.alternatives()[entry.alternative].target();
        // Collection proved the capability present, and nothing detaches
        // it between the phases.
        let Some(instance) = provider.capability_mut(entry.target, capability) else {
            debug_assert!(false, "matched target lost its capability mid-pass");
            continue;
        };
        for (block_idx, block) in rule.blocks().iter().enumerate() {
            block
                .apply(instance)
                .map_err(|source| PassError::new(entry.sheet, entry.rule, block_idx, source))?;
            report.blocks_run += 1;
        }
    }
    Ok(report)
}
