// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Resolution pass errors.

use core::fmt;

use canopy_select::BlockError;

/// Error aborting a resolution pass.
///
/// A failing property block stops the pass immediately; effects applied
/// earlier in the pass keep their results (the cascade never rolls back).
/// The block's own error is surfaced unmodified through
/// [`block_error`](Self::block_error) and [`core::error::Error::source`].
#[derive(Debug)]
pub struct PassError {
    /// Index of the failing sheet within the effective set.
    pub sheet: usize,
    /// Index of the failing rule within its sheet.
    pub rule: usize,
    /// Index of the failing block within its rule.
    pub block: usize,
    source: BlockError,
}

impl PassError {
    pub(crate) fn new(sheet: usize, rule: usize, block: usize, source: BlockError) -> Self {
        Self {
            sheet,
            rule,
            block,
            source,
        }
    }

    /// Returns the failing block's error.
    #[must_use]
    pub fn block_error(&self) -> &BlockError {
        &self.source
    }
}

impl fmt::Display for PassError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "resolution pass aborted: block {} of rule {} in sheet {} failed",
            self.block, self.rule, self.sheet
        )
    }
}

impl core::error::Error for PassError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        Some(&self.source)
    }
}
