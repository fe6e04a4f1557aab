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

//! The Markup Adapter (§4.7): the seam between the content pipeline and
//! whatever AsciiDoc engine converts page bodies to HTML.
//!
//! The engine itself is out of scope (§1) - this module only resolves the
//! three directive kinds an engine calls back into the pipeline for while
//! converting a page: `include::`, `xref:`, and `image:`/`image::`.

pub mod include;
pub mod relativize;
pub mod tags;
pub mod xref;

use crate::attribute::AttributeMap;
use crate::catalog::Catalog;
use crate::diagnostic::Logger;
use crate::identity::Coordinate;
use crate::playbook::Playbook;
use crate::resolver::Context;

pub use include::{Request as IncludeRequest, Resolution as IncludeResolution};
pub use xref::Link;

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// What a [`MarkupEngine`] hands back after converting one page (§4.8 steps
/// 2b-2d).
#[derive(Clone, Debug, Default)]
pub struct ConversionOutput {
    /// The converted, embeddable HTML body.
    pub html: String,
    /// Extracted document title.
    pub doctitle: Option<String>,
    /// Full attribute map, merged from component-version defaults and the
    /// page's own header.
    pub attributes: AttributeMap,
    /// Resource specs advertised by the page's `page-aliases` attribute, to
    /// be registered with the catalog after conversion.
    pub page_aliases: Vec<String>,
}

// ----------------------------------------------------------------------------
// Traits
// ----------------------------------------------------------------------------

/// The external collaborator this crate hands page bodies off to.
///
/// A real implementation owns the actual AsciiDoc grammar and calls back
/// into a [`MarkupAdapter`] every time it encounters an `include::`, `xref:`
/// or `image:`/`image::` directive while converting one page's contents.
pub trait MarkupEngine {
    /// Converts one page's raw AsciiDoc source, invoking `adapter` for every
    /// directive encountered along the way.
    fn convert(&self, source: &str, adapter: &mut MarkupAdapter<'_>) -> ConversionOutput;
}

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// Wires the catalog, resolver context and diagnostics together behind the
/// three directive hooks a [`MarkupEngine`] calls back into.
///
/// Holds an explicit context stack rather than relying on any ambient
/// current-page state (§9: "global state ... treat both as explicit context
/// objects"), since a nested include switches the current-page context to
/// the included file for the extent of its own body (§4.6).
pub struct MarkupAdapter<'a> {
    catalog: &'a Catalog,
    playbook: &'a Playbook,
    logger: &'a mut dyn Logger,
    stack: Vec<Context>,
    depth: u32,
}

// ----------------------------------------------------------------------------
// Implementations
// ----------------------------------------------------------------------------

impl<'a> MarkupAdapter<'a> {
    /// Creates an adapter rooted at `page`, the top-level file being
    /// converted, found at `path`.
    pub fn new(
        catalog: &'a Catalog, playbook: &'a Playbook, page: Coordinate, path: String,
        logger: &'a mut dyn Logger,
    ) -> Self {
        MarkupAdapter { catalog, playbook, logger, stack: vec![Context::new(page, path)], depth: 0 }
    }

    /// The context of the file currently being converted (the top-level
    /// page, or the innermost open include).
    pub fn current(&self) -> &Context {
        self.stack.last().expect("adapter always has at least the root context")
    }

    /// Resolves an `include::` directive, per §4.7.
    ///
    /// On success, the included file's content is returned for the engine to
    /// splice in and recursively process; the adapter pushes that file's
    /// context for the duration of the caller's `with_nested` scope.
    pub fn include(&mut self, request: &IncludeRequest) -> Option<IncludeResolution> {
        let max_depth = self.playbook.max_include_depth;
        include::resolve(self.catalog, self.current(), request, self.depth, max_depth, self.logger)
    }

    /// Runs `body` with the context switched to `resolution`'s file, as
    /// required for resolving references found inside a nested include
    /// (§4.6). Restores the outer context on return.
    pub fn with_nested<R>(
        &mut self, resolution: &IncludeResolution, body: impl FnOnce(&mut Self) -> R,
    ) -> R {
        let nested = self.current().nested(resolution.coordinate.clone(), resolution.path.clone());
        self.stack.push(nested);
        self.depth += 1;
        let result = body(self);
        self.depth -= 1;
        self.stack.pop();
        result
    }

    /// Resolves an `xref:` directive, per §4.7.
    pub fn xref(&mut self, target: &str) -> Link {
        xref::resolve_xref(
            self.catalog,
            self.current(),
            target,
            self.playbook.relativize_resource_refs,
            self.logger,
        )
    }

    /// Resolves an `image:`/`image::` directive, per §4.7.
    pub fn image(&mut self, target: &str) -> Link {
        xref::resolve_image(
            self.catalog,
            self.current(),
            target,
            self.playbook.relativize_resource_refs,
            self.logger,
        )
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
