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

//! Content pipeline for a versioned, multi-component documentation site
//! generator: classifies aggregated source files into a content catalog,
//! computes output paths and public URLs, resolves cross-component resource
//! references, and drives AsciiDoc conversion through a pluggable markup
//! engine.
//!
//! Repository aggregation, playbook schema validation, navigation building
//! and output publishing are not this crate's concern - see `SPEC_FULL.md`
//! for the exact boundary.

pub mod attribute;
pub mod catalog;
pub mod classifier;
pub mod convert;
pub mod diagnostic;
pub mod identity;
pub mod markup;
pub mod path;
pub mod playbook;
pub mod resolver;
pub mod version;

// ----------------------------------------------------------------------------
// Errors
// ----------------------------------------------------------------------------

/// Fatal, pipeline-aborting errors (§E.1.1).
///
/// Most failure modes in this crate are non-fatal and reported as
/// [`diagnostic::Diagnostic`]s instead; this enum covers only the handful of
/// operations a caller cannot simply log past and continue.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A catalog invariant was violated (duplicate resource, alias
    /// collision, alias cycle).
    #[error(transparent)]
    Catalog(#[from] catalog::error::Error),
    /// An I/O operation failed while aggregating content.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Crate-wide result alias.
pub type Result<T = ()> = std::result::Result<T, Error>;
