// Copyright (c) 2025-2026 Corpus Contributors

// SPDX-License-Identifier: MIT
// Third-party contributions licensed under DCO

// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to
// deal in the Software without restriction, including without limitation the
// rights to use, copy, modify, merge, publish, distribute, sublicense, and/or
// sell copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:

// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.

// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NON-INFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING
// FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS
// IN THE SOFTWARE.

// ----------------------------------------------------------------------------

//! Content catalog error.

use std::result;
use thiserror::Error;

use crate::identity::Family;

// ----------------------------------------------------------------------------
// Enums
// ----------------------------------------------------------------------------

/// Content catalog error (§7).
///
/// These are the only conditions the catalog raises rather than logs: they
/// indicate a structurally broken content set (two files claiming the same
/// identity, an alias pointing at another alias, a cycle of splat aliases)
/// that no fallback can paper over.
#[derive(Debug, Error)]
pub enum Error {
    /// Two files were registered under the same catalog key.
    #[error("duplicate {family} resource for key {key}: {incoming} collides with {existing}")]
    DuplicateResource {
        /// Family the files share.
        family: Family,
        /// Catalog key both files map to.
        key: String,
        /// Path of the file already in the catalog.
        existing: String,
        /// Path of the file that could not be added.
        incoming: String,
    },

    /// An alias was registered pointing at another alias (only permitted for
    /// splat aliases, per §3).
    #[error("alias {from} cannot point to {to}, which is itself an alias")]
    AliasCollision {
        /// Key of the alias being registered.
        from: String,
        /// Key of the alias it points to.
        to: String,
    },

    /// A splat alias points back, through one hop, at itself.
    #[error("splat alias {from} and {to} form a two-hop redirect cycle")]
    AliasCycle {
        /// Key of the first alias in the cycle.
        from: String,
        /// Key of the second alias in the cycle.
        to: String,
    },
}

// ----------------------------------------------------------------------------
// Type aliases
// ----------------------------------------------------------------------------

/// Content catalog result.
pub type Result<T = ()> = result::Result<T, Error>;
