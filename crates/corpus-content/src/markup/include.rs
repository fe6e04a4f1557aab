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

//! `include::` directive resolution (§4.7).

use crate::catalog::Catalog;
use crate::diagnostic::{Diagnostic, Logger, Severity};
use crate::identity::{Coordinate, Family, PermittedFamilies};
use crate::resolver::{self, Context, Resolved};

use super::tags::{self, LineRange, TagSelector};

// ----------------------------------------------------------------------------
// Structs
// ----------------------------------------------------------------------------

/// One `include::target[lines=..., tag(s)=...]` request.
#[derive(Clone, Debug, Default)]
pub struct Request {
    /// The resource spec named by the directive.
    pub target: String,
    /// The directive's own raw source text, used in the unresolved-include
    /// placeholder (§4.7).
    pub raw: String,
    /// Whether the directive carries `opts=optional` (§4.7, §7): an
    /// unresolved optional include is dropped silently instead of leaving a
    /// placeholder.
    pub optional: bool,
    /// Parsed `lines=` attribute, if present.
    pub lines: Option<Vec<LineRange>>,
    /// Parsed `tag=`/`tags=` attribute, if present.
    pub tags: Option<Vec<TagSelector>>,
}

/// The outcome of a resolved (or unresolved-but-placeholdered) include.
#[derive(Clone, Debug)]
pub struct Resolution {
    /// The filtered content to splice in place of the directive.
    pub content: String,
    /// Coordinate of the file the content came from, for nested resolution.
    pub coordinate: Coordinate,
    /// Raw on-disk path of the file the content came from.
    pub path: String,
}

// ----------------------------------------------------------------------------
// Functions
// ----------------------------------------------------------------------------

/// Resolves one include request.
///
/// `max_depth == 0` disables includes outright: the directive is dropped
/// silently, with no placeholder and no diagnostic (§8). A nonzero depth
/// that's been exceeded logs `max-include-depth-exceeded` and also drops the
/// directive. An unresolved non-optional target instead returns a
/// placeholder [`Resolution`] so the directive's presence survives in the
/// converted output (§4.7); an unresolved `opts=optional` target is dropped
/// with only an `info` diagnostic.
pub fn resolve(
    catalog: &Catalog, ctx: &Context, request: &Request, depth: u32, max_depth: u32,
    logger: &mut dyn Logger,
) -> Option<Resolution> {
    if max_depth == 0 {
        return None;
    }
    if depth >= max_depth {
        logger.log(Diagnostic::new(
            Severity::Error,
            "max-include-depth-exceeded",
            format!("include chain exceeded the maximum depth of {max_depth}"),
        ));
        return None;
    }

    let resolved =
        resolver::resolve(catalog, &request.target, ctx, Family::Partial, PermittedFamilies::INCLUDE);

    let file = match resolved {
        Resolved::Found(file) => file,
        Resolved::NotFound => return unresolved(ctx, request, logger),
        Resolved::Invalid => {
            logger.log(Diagnostic::new(
                Severity::Error,
                "invalid-resource-syntax",
                format!("invalid include target syntax: {}", request.target),
            ));
            return None;
        }
    };

    let mut content = file.contents_str().into_owned();
    if let Some(ranges) = &request.lines {
        content = tags::select_lines(&content, ranges);
    }
    if let Some(selectors) = &request.tags {
        content = tags::select_tags(&content, selectors, &file.path, logger);
    }

    Some(Resolution { content, coordinate: file.src.coordinate.clone(), path: file.path.clone() })
}

/// Handles an include target that failed to resolve (§4.7, §7): an optional
/// include is dropped with an `info` diagnostic, a non-optional one leaves a
/// placeholder behind with an `error` diagnostic.
fn unresolved(ctx: &Context, request: &Request, logger: &mut dyn Logger) -> Option<Resolution> {
    if request.optional {
        logger.log(Diagnostic::new(
            Severity::Info,
            "unresolved-reference",
            format!("optional include target not found, dropping directive: {}", request.target),
        ));
        return None;
    }

    logger.log(Diagnostic::new(
        Severity::Error,
        "unresolved-reference",
        format!("include target not found: {}", request.target),
    ));

    let raw = if request.raw.is_empty() { request.target.as_str() } else { request.raw.as_str() };
    let content = format!("Unresolved include directive in {} - {}", ctx.path, raw);
    Some(Resolution { content, coordinate: ctx.src.clone(), path: ctx.path.clone() })
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
